//! Authentication against the Metadata Service
//!
//! MDS authenticates every RBAC API call with HTTP Basic credentials. The
//! `authenticate` endpoint additionally issues a bearer token, which this
//! client records but does not use for authorization.

pub mod session;

pub use session::{AuthSession, AuthToken};
