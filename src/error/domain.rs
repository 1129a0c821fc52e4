//! Domain-specific error types for the RBAC client

use crate::scope::ClusterKind;
use thiserror::Error;

/// Failures of the authenticate handshake
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("no credentials: call login() before authenticate()")]
    MissingCredentials,
    #[error("MDS rejected authentication with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("connection failed: {0}")]
    Connection(String),
    #[error("malformed authenticate response: {0}")]
    MalformedResponse(String),
}

impl AuthenticationError {
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse(detail.into())
    }

    /// HTTP status returned by MDS, when the failure carried one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures of a single HTTP exchange with MDS
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("unexpected response status {status} for {request}")]
    Status { status: u16, request: String },
    #[error("{request}: connection failed: {detail}")]
    Connection { request: String, detail: String },
    #[error("{request}: failed to read response body: {detail}")]
    Body { request: String, detail: String },
}

impl TransportError {
    pub fn status(status: u16, request: impl Into<String>) -> Self {
        Self::Status {
            status,
            request: request.into(),
        }
    }

    pub fn connection(request: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Connection {
            request: request.into(),
            detail: detail.into(),
        }
    }

    pub fn body(request: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Body {
            request: request.into(),
            detail: detail.into(),
        }
    }

    /// HTTP status code, if the server answered at all
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failures while composing a binding scope
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("no {0} id is configured")]
    MissingClusterId(ClusterKind),
    #[error("cluster role builder was applied before choosing a cluster")]
    Unscoped,
    #[error("request scope has no resource patterns")]
    NoResources,
}
