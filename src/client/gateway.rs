//! HTTP gateway to the MDS RBAC API
//!
//! [`ApiGateway`] owns the session and attaches its Basic credential to every
//! request. The actual exchange goes through an [`HttpTransport`], which is
//! [`ReqwestTransport`] in production.

use crate::auth::AuthSession;
use crate::config::{HttpConfig, API_PREFIX};
use crate::error::{RbacError, Result, TransportError};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::ops::RangeInclusive;
use tracing::debug;

/// Statuses accepted for GET calls
pub const GET_SUCCESS: RangeInclusive<u16> = 200..=204;

/// Statuses accepted for POST and DELETE calls
pub const MUTATION_SUCCESS: RangeInclusive<u16> = 200..=299;

/// HTTP method of an MDS call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// A fully resolved request
#[derive(Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// `Authorization` header value
    pub authorization: Option<String>,
    /// JSON body
    pub body: Option<String>,
}

impl ApiRequest {
    /// `METHOD url`, safe to log
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.url)
    }
}

impl std::fmt::Display for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

impl std::fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("authorized", &self.authorization.is_some())
            .field("body", &self.body)
            .finish()
    }
}

/// Status and body of a completed exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Executes one request and returns the fully read response.
///
/// Implementations must release the underlying connection before returning,
/// on success and on error.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError>;
}

/// Blocking reqwest transport
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.timeout());
        if let Some(connect_timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder
            .build()
            .map_err(|e| RbacError::Config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn execute(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        let mut req = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };

        req = req.header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref authorization) = request.authorization {
            req = req.header(reqwest::header::AUTHORIZATION, authorization);
        }
        if let Some(ref body) = request.body {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = req
            .send()
            .map_err(|e| TransportError::connection(request.describe(), e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| TransportError::body(request.describe(), e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Issues calls against `{base_url}/security/1.0/`
pub struct ApiGateway {
    base_url: String,
    transport: Box<dyn HttpTransport>,
    session: RwLock<AuthSession>,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>, transport: Box<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
            session: RwLock::new(AuthSession::new()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path below the API prefix
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            API_PREFIX,
            path.trim_start_matches('/')
        )
    }

    pub fn session(&self) -> RwLockReadGuard<'_, AuthSession> {
        self.session.read()
    }

    pub fn session_mut(&self) -> RwLockWriteGuard<'_, AuthSession> {
        self.session.write()
    }

    fn request(&self, method: Method, path: &str, body: Option<String>) -> ApiRequest {
        ApiRequest {
            method,
            url: self.url(path),
            authorization: self.session.read().authorization_header(),
            body,
        }
    }

    fn execute(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportError> {
        debug!(request = %request, body = ?request.body, "{}.request", request.method);
        let response = self.transport.execute(request)?;
        debug!(request = %request, status = response.status, "{}.response", request.method);
        Ok(response)
    }

    /// GET returning the raw response; callers classify the status
    pub fn get(&self, path: &str) -> std::result::Result<ApiResponse, TransportError> {
        let request = self.request(Method::Get, path, None);
        self.execute(&request)
    }

    /// GET that fails outside [`GET_SUCCESS`]
    pub fn get_ok(&self, path: &str) -> std::result::Result<String, TransportError> {
        let request = self.request(Method::Get, path, None);
        let response = self.execute(&request)?;
        classify(&request, response, GET_SUCCESS)
    }

    /// POST a JSON body; returns the (possibly empty) response body
    pub fn post(&self, path: &str, body: String) -> std::result::Result<String, TransportError> {
        let request = self.request(Method::Post, path, Some(body));
        let response = self.execute(&request)?;
        classify(&request, response, MUTATION_SUCCESS)
    }

    /// DELETE with a JSON body; returns the (possibly empty) response body
    pub fn delete(&self, path: &str, body: String) -> std::result::Result<String, TransportError> {
        let request = self.request(Method::Delete, path, Some(body));
        let response = self.execute(&request)?;
        classify(&request, response, MUTATION_SUCCESS)
    }
}

fn classify(
    request: &ApiRequest,
    response: ApiResponse,
    accepted: RangeInclusive<u16>,
) -> std::result::Result<String, TransportError> {
    if accepted.contains(&response.status) {
        Ok(response.body)
    } else {
        Err(TransportError::status(response.status, request.describe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::Scripted;

    #[test]
    fn test_url_joins_prefix() {
        let gateway = ApiGateway::new("http://mds:8090/", Box::new(Scripted::default()));
        assert_eq!(gateway.url("roleNames"), "http://mds:8090/security/1.0/roleNames");
        assert_eq!(
            gateway.url("/lookup/role/X"),
            "http://mds:8090/security/1.0/lookup/role/X"
        );
    }

    #[test]
    fn test_post_attaches_basic_credential() {
        let transport = Scripted::default().reply(204, "");
        let gateway = ApiGateway::new("http://mds", Box::new(transport.clone()));
        gateway.session_mut().login("admin", "admin-secret");

        let body = gateway.post("lookup/role/X", "{}".to_string()).unwrap();
        assert_eq!(body, "");

        let seen = transport.seen.lock();
        assert_eq!(seen[0].method, Method::Post);
        assert_eq!(
            seen[0].authorization.as_deref(),
            Some("Basic YWRtaW46YWRtaW4tc2VjcmV0")
        );
        assert_eq!(seen[0].body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_post_outside_success_band_fails() {
        let transport = Scripted::default().reply(300, "moved");
        let gateway = ApiGateway::new("http://mds", Box::new(transport));

        let err = gateway.post("x", "{}".to_string()).unwrap_err();
        assert_eq!(
            err,
            TransportError::status(300, "POST http://mds/security/1.0/x")
        );
    }

    #[test]
    fn test_get_ok_accepts_only_200_to_204() {
        let transport = Scripted::default().reply(204, "[]").reply(206, "[]");
        let gateway = ApiGateway::new("http://mds", Box::new(transport));

        assert_eq!(gateway.get_ok("roleNames").unwrap(), "[]");
        assert_eq!(gateway.get_ok("roleNames").unwrap_err().status_code(), Some(206));
    }

    #[test]
    fn test_delete_fails_on_error_status() {
        let transport = Scripted::default().reply(404, "not found");
        let gateway = ApiGateway::new("http://mds", Box::new(transport.clone()));

        let err = gateway.delete("principals/p/roles/r", "{}".to_string()).unwrap_err();
        assert_eq!(err.status_code(), Some(404));
        assert_eq!(transport.seen.lock()[0].method, Method::Delete);
    }

    #[test]
    fn test_transport_failure_propagates() {
        let gateway = ApiGateway::new("http://mds", Box::new(Scripted::default()));
        let err = gateway.get("authenticate").unwrap_err();
        assert!(matches!(err, TransportError::Connection { .. }));
    }

    #[test]
    fn test_request_debug_hides_credentials() {
        let request = ApiRequest {
            method: Method::Get,
            url: "http://mds/security/1.0/authenticate".to_string(),
            authorization: Some("Basic c2VjcmV0".to_string()),
            body: None,
        };
        let rendered = format!("{:?}", request);
        assert!(!rendered.contains("c2VjcmV0"));
        assert_eq!(request.to_string(), "GET http://mds/security/1.0/authenticate");
    }

    #[test]
    fn test_reqwest_transport_builds_with_timeouts() {
        let config = HttpConfig {
            timeout_ms: Some(1000),
            connect_timeout_ms: Some(100),
        };
        assert!(ReqwestTransport::new(&config).is_ok());
        assert!(ReqwestTransport::new(&HttpConfig::default()).is_ok());
    }
}
