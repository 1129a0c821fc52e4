//! Error types for streamline-rbac
//!
//! Binding and deletion failures surface as [`RbacError`]; lookups log and
//! downgrade their failures to an empty result instead (see [`crate::client`]).

use thiserror::Error;

mod domain;
mod hints;

pub use domain::{AuthenticationError, ScopeError, TransportError};
pub use hints::ErrorHint;

/// Result type alias for RBAC client operations
pub type Result<T> = std::result::Result<T, RbacError>;

/// Main error type for the RBAC client
#[derive(Error, Debug)]
pub enum RbacError {
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Scope error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RbacError {
    /// Create a configuration error for a specific setting
    pub fn config(setting: &str, reason: impl Into<String>) -> Self {
        RbacError::Config(format!("{}: {}", setting, reason.into()))
    }

    /// HTTP status carried by the error, if MDS answered the request
    pub fn http_status(&self) -> Option<u16> {
        match self {
            RbacError::Authentication(e) => e.status(),
            RbacError::Transport(e) => e.status_code(),
            _ => None,
        }
    }
}
