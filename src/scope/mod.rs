//! Binding scopes
//!
//! Pure value types with no dependency on the network layer:
//! - `cluster` - cluster id registry and cluster scope composition
//! - `request` - request scopes (cluster scope + resource patterns)
//! - `resource` - resource types, pattern types and resource patterns

mod cluster;
mod request;
mod resource;

pub use cluster::{ClusterIds, ClusterKind, ClusterScope};
pub use request::{RequestScope, RequestScopeBuilder};
pub use resource::{PatternType, ResourcePattern, ResourceType};
