//! In-memory transport shared by the client unit tests

use super::{ApiRequest, ApiResponse, HttpTransport};
use crate::error::TransportError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Replays queued replies and records every request. An empty queue fails
/// with a connection error.
#[derive(Clone, Default)]
pub(crate) struct Scripted {
    replies: Arc<Mutex<VecDeque<ApiResponse>>>,
    pub(crate) seen: Arc<Mutex<Vec<ApiRequest>>>,
}

impl Scripted {
    pub(crate) fn reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().push_back(ApiResponse::new(status, body));
        self
    }
}

impl HttpTransport for Scripted {
    fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.lock().push(request.clone());
        self.replies
            .lock()
            .pop_front()
            .ok_or_else(|| TransportError::connection(request.describe(), "connection refused"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Method;

    fn get(url: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: url.to_string(),
            authorization: None,
            body: None,
        }
    }

    #[test]
    fn test_replies_in_order_then_refuses() {
        let transport = Scripted::default().reply(200, "first").reply(204, "");
        let request = get("http://mds/security/1.0/roleNames");

        assert_eq!(transport.execute(&request).unwrap().status, 200);
        assert_eq!(transport.execute(&request).unwrap().status, 204);
        assert!(matches!(
            transport.execute(&request),
            Err(TransportError::Connection { .. })
        ));

        let seen = transport.seen.lock();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|r| r.method == Method::Get));
    }

    #[test]
    fn test_clones_share_state() {
        let transport = Scripted::default();
        let copy = transport.clone().reply(200, "[]");
        let request = get("http://mds/x");

        assert!(transport.execute(&request).is_ok());
        assert_eq!(copy.seen.lock().len(), 1);
    }
}
