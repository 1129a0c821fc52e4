//! Error hints for actionable error messages

use super::{AuthenticationError, RbacError, ScopeError, TransportError};
use crate::scope::ClusterKind;

/// Extension trait for adding hints to errors
pub trait ErrorHint {
    /// Get a helpful hint for resolving this error
    fn hint(&self) -> Option<String>;

    /// Format the error with hint for display
    fn with_hint(&self) -> String;
}

fn status_hint(status: u16) -> Option<String> {
    match status {
        401 => Some(
            "MDS did not accept the credentials. Check --user/--password or the [mds] section of the config file".to_string(),
        ),
        403 => Some(
            "The authenticated principal is not allowed to manage role bindings. It usually needs UserAdmin or SystemAdmin on the target cluster".to_string(),
        ),
        404 => Some(
            "The endpoint was not found. Check that --server-url points at the MDS listener and that the role name exists (`streamline-rbac roles`)".to_string(),
        ),
        500..=599 => Some("MDS reported an internal error. Check the MDS server logs".to_string()),
        _ => None,
    }
}

fn cluster_setting(kind: ClusterKind) -> &'static str {
    match kind {
        ClusterKind::Kafka => "--kafka-cluster-id (or clusters.kafka)",
        ClusterKind::Connect => "--connect-cluster-id (or clusters.connect)",
        ClusterKind::SchemaRegistry => {
            "--schema-registry-cluster-id (or clusters.schema_registry)"
        }
        ClusterKind::Ksql => "--ksql-cluster-id (or clusters.ksql)",
    }
}

impl ErrorHint for RbacError {
    fn hint(&self) -> Option<String> {
        match self {
            RbacError::Authentication(AuthenticationError::MissingCredentials) => {
                Some("Provide a user and password before authenticating".to_string())
            }
            RbacError::Authentication(AuthenticationError::Rejected { status, .. }) => {
                status_hint(*status)
            }
            RbacError::Authentication(AuthenticationError::Connection(_))
            | RbacError::Transport(TransportError::Connection { .. }) => Some(
                "Could not reach MDS. Check --server-url and network connectivity; set --timeout-ms to bound hanging calls".to_string(),
            ),
            RbacError::Transport(TransportError::Status { status, .. }) => status_hint(*status),
            RbacError::Scope(ScopeError::MissingClusterId(kind)) => Some(format!(
                "Set the {} id with {}",
                kind,
                cluster_setting(*kind)
            )),
            RbacError::Scope(ScopeError::Unscoped) => Some(
                "Choose exactly one cluster or resource for a cluster-level binding".to_string(),
            ),
            RbacError::Config(_) => Some(
                "Generate a starting point with `streamline-rbac config example`".to_string(),
            ),
            RbacError::Io(e) if e.kind() == std::io::ErrorKind::NotFound => Some(
                "Check the --config path, or drop it to use the default locations".to_string(),
            ),
            _ => None,
        }
    }

    fn with_hint(&self) -> String {
        let error_msg = self.to_string();
        match self.hint() {
            Some(hint) => format!("{}\n  hint: {}", error_msg, hint),
            None => error_msg,
        }
    }
}
