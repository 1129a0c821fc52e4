#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

//! # Streamline RBAC
//!
//! Client for the role-based access control API of a Confluent Metadata
//! Service (MDS). It creates and deletes role bindings and answers reverse
//! lookups (who holds a role, which roles a principal holds, which resources
//! a binding covers).
//!
//! ## Features
//!
//! - **Resource-scoped bindings**: grant a role on a topic, group, subject or
//!   any other resource, literal or prefixed
//! - **Cluster-level bindings**: grant a role on a whole Kafka, Connect,
//!   Schema Registry or ksqlDB cluster, or on a connector or Control Center
//! - **Reverse lookups**: advisory reads that never fail the caller
//! - **Pluggable transport**: blocking `reqwest` by default, any
//!   [`client::HttpTransport`] in tests
//!
//! ## Quick Start
//!
//! ```bash
//! # Grant DeveloperRead on the topic "orders"
//! $ streamline-rbac --user mds-admin --password secret --kafka-cluster-id kafka-1 \
//!     bind --principal User:alice --role DeveloperRead --resource orders
//!
//! # Grant SystemAdmin on the Connect cluster
//! $ streamline-rbac --kafka-cluster-id kafka-1 --connect-cluster-id connect-1 \
//!     bind-cluster --principal Group:ops --role SystemAdmin --connect
//! ```
//!
//! ## Library Use
//!
//! ```no_run
//! use streamline_rbac::{MdsClient, PatternType, RbacConfig};
//! use streamline_rbac::scope::ClusterIds;
//!
//! let config = RbacConfig {
//!     user: Some("mds-admin".to_string()),
//!     password: Some("secret".to_string()),
//!     cluster_ids: ClusterIds::new("kafka-1"),
//!     ..RbacConfig::default()
//! };
//! let client = MdsClient::new(&config)?;
//! client.bind_topic("User:alice", "DeveloperRead", "orders", PatternType::Literal)?;
//!
//! for principal in client.lookup_principals_by_role("DeveloperRead") {
//!     println!("{}", principal);
//! }
//! # Ok::<(), streamline_rbac::RbacError>(())
//! ```
//!
//! ## Modules
//!
//! - `auth` - Basic credential and token record
//! - `binding` - role bindings and the cluster-level builder
//! - `client` - MDS client, HTTP gateway and lookups
//! - `config` - configuration and TOML config file
//! - `error` - error types and operator hints
//! - `scope` - cluster scopes, request scopes and resource patterns

pub mod auth;
pub mod binding;
pub mod client;
pub mod config;
pub mod error;
pub mod scope;

pub use auth::{AuthSession, AuthToken};
pub use binding::{ClusterRoleBuilder, RoleBinding};
pub use client::{HttpTransport, MdsClient};
pub use config::{ConfigFile, RbacConfig};
pub use error::{RbacError, Result};
pub use scope::{ClusterIds, ClusterKind, PatternType, RequestScope, ResourcePattern, ResourceType};
