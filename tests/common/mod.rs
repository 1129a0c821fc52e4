//! Shared test fixtures for streamline-rbac integration tests
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```
//!
//! - `ScriptedTransport`: in-memory [`HttpTransport`] that replays queued
//!   responses and records every request
//! - Cluster id and client fixtures

#![allow(dead_code)]

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use streamline_rbac::client::{ApiRequest, ApiResponse, HttpTransport};
use streamline_rbac::error::TransportError;
use streamline_rbac::{ClusterIds, MdsClient};

pub const SERVER_URL: &str = "http://mds.test:8090";
pub const ADMIN_USER: &str = "mds-admin";
pub const ADMIN_PASSWORD: &str = "mds-admin-secret";

/// Base64 of `mds-admin:mds-admin-secret`
pub const ADMIN_BASIC: &str = "Basic bWRzLWFkbWluOm1kcy1hZG1pbi1zZWNyZXQ=";

// ============================================================================
// Scripted transport
// ============================================================================

/// Replays queued replies in order. When the queue is empty every call fails
/// with a connection error.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<ApiResponse, String>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a connection failure
    pub fn fail(self, detail: &str) -> Self {
        self.replies.lock().push_back(Err(detail.to_string()));
        self
    }

    /// Every request executed so far
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> ApiRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("no request was executed")
    }

    /// Body of the last request parsed as JSON
    pub fn last_body(&self) -> serde_json::Value {
        let body = self.last_request().body.expect("last request had no body");
        serde_json::from_str(&body).expect("request body is not JSON")
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().push(request.clone());
        match self.replies.lock().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(detail)) => Err(TransportError::connection(request.describe(), detail)),
            None => Err(TransportError::connection(
                request.describe(),
                "no scripted reply",
            )),
        }
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn all_cluster_ids() -> ClusterIds {
    ClusterIds::new("kafka-1")
        .with_connect("connect-1")
        .with_schema_registry("sr-1")
        .with_ksql("ksql-1")
}

/// Logged-in client over `transport`
pub fn client_with(transport: &ScriptedTransport, cluster_ids: ClusterIds) -> MdsClient {
    let client = MdsClient::with_transport(SERVER_URL, cluster_ids, transport.clone());
    client.login(ADMIN_USER, ADMIN_PASSWORD);
    client
}

pub fn client(transport: &ScriptedTransport) -> MdsClient {
    client_with(transport, all_cluster_ids())
}

/// Absolute URL for an API path
pub fn api_url(path: &str) -> String {
    format!("{}/security/1.0/{}", SERVER_URL, path)
}
