//! MDS client
//!
//! [`MdsClient`] ties the pieces together: it owns the [`ApiGateway`] (and
//! through it the session) and the cluster id registry, and turns role
//! bindings into MDS calls.
//!
//! ```no_run
//! use streamline_rbac::client::MdsClient;
//! use streamline_rbac::config::RbacConfig;
//! use streamline_rbac::scope::{ClusterIds, PatternType};
//!
//! let config = RbacConfig {
//!     user: Some("mds-admin".to_string()),
//!     password: Some("mds-admin-secret".to_string()),
//!     cluster_ids: ClusterIds::new("kafka-1").with_connect("connect-1"),
//!     ..RbacConfig::default()
//! };
//! let client = MdsClient::new(&config)?;
//! client.authenticate()?;
//!
//! client.bind_topic("User:alice", "DeveloperRead", "orders", PatternType::Literal)?;
//!
//! let binding = client.bind("User:ops", "SystemAdmin").for_kafka_connect()?.apply()?;
//! client.bind_request(&binding)?;
//! # Ok::<(), streamline_rbac::RbacError>(())
//! ```

pub mod gateway;
mod lookup;
#[cfg(test)]
pub(crate) mod test_support;

pub use gateway::{ApiGateway, ApiRequest, ApiResponse, HttpTransport, Method, ReqwestTransport};

use crate::auth::session::AuthenticateResponse;
use crate::auth::AuthToken;
use crate::binding::{role_path, ClusterRoleBuilder, RoleBinding};
use crate::config::RbacConfig;
use crate::error::{AuthenticationError, Result};
use crate::scope::{ClusterIds, ClusterScope, PatternType, RequestScope, ResourceType};
use chrono::Utc;
use gateway::GET_SUCCESS;
use tracing::{debug, error, info};

const AUTHENTICATE_PATH: &str = "authenticate";

/// Blocking client for the MDS RBAC API.
///
/// The client is `Send + Sync`. Session changes (`login`, `authenticate`)
/// take a write lock, so establish credentials before sharing the client if
/// callers must all observe the same credential.
pub struct MdsClient {
    gateway: ApiGateway,
    cluster_ids: ClusterIds,
}

impl MdsClient {
    /// Client over HTTP, logged in when the configuration carries credentials
    pub fn new(config: &RbacConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config.http)?;
        let client = Self::with_transport(
            config.base_url(),
            config.cluster_ids.clone(),
            transport,
        );
        if let (Some(user), Some(password)) = (&config.user, &config.password) {
            client.login(user, password);
        }
        Ok(client)
    }

    /// Client over a caller-supplied transport
    pub fn with_transport(
        server_url: impl Into<String>,
        cluster_ids: ClusterIds,
        transport: impl HttpTransport + 'static,
    ) -> Self {
        Self {
            gateway: ApiGateway::new(server_url, Box::new(transport)),
            cluster_ids,
        }
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Registry every binding and lookup scope is composed from
    pub fn cluster_ids(&self) -> &ClusterIds {
        &self.cluster_ids
    }

    /// Snapshot of the registry for composing custom scopes
    pub fn detached_scope(&self) -> ClusterScope {
        self.cluster_ids.detached()
    }

    /// Store the Basic credential sent with every call
    pub fn login(&self, user: &str, password: &str) {
        self.gateway.session_mut().login(user, password);
        debug!(user, "credentials set");
    }

    /// Exchange the Basic credential for a token.
    ///
    /// On success the token is recorded and returned. On failure the
    /// previously recorded token, if any, is left as it was.
    pub fn authenticate(&self) -> Result<AuthToken> {
        if !self.gateway.session().is_logged_in() {
            return Err(AuthenticationError::MissingCredentials.into());
        }

        let response = self.gateway.get(AUTHENTICATE_PATH).map_err(|e| {
            error!(error = %e, "authenticate failed");
            AuthenticationError::Connection(e.to_string())
        })?;

        if !GET_SUCCESS.contains(&response.status) {
            error!(status = response.status, "authenticate rejected");
            return Err(AuthenticationError::rejected(response.status, response.body).into());
        }

        let token = AuthenticateResponse::parse(&response.body)
            .map_err(|e| {
                error!(error = %e, "authenticate returned an unreadable token");
                e
            })?
            .into_token(Utc::now());

        self.gateway.session_mut().record_token(token.clone());
        info!(
            token_type = %token.kind,
            expires_in = token.expires_in_secs,
            "authenticated against MDS"
        );
        Ok(token)
    }

    /// Token recorded by the last successful [`authenticate`](Self::authenticate)
    pub fn credentials(&self) -> Option<AuthToken> {
        self.gateway.session().token().cloned()
    }

    /// Start a cluster-level binding; submit the result with
    /// [`bind_request`](Self::bind_request)
    pub fn bind(&self, principal: impl Into<String>, role: impl Into<String>) -> ClusterRoleBuilder {
        ClusterRoleBuilder::new(principal, role, self.cluster_ids.clone())
    }

    /// Grant `role` on one resource of the Kafka cluster
    pub fn bind_resource(
        &self,
        principal: &str,
        role: &str,
        resource_type: ResourceType,
        resource_name: &str,
        pattern_type: PatternType,
    ) -> Result<()> {
        let binding = RoleBinding::for_resource(
            principal,
            role,
            &self.cluster_ids,
            resource_type,
            resource_name,
            pattern_type,
        )?;
        self.bind_request(&binding)
    }

    /// Grant `role` on a topic of the Kafka cluster
    pub fn bind_topic(
        &self,
        principal: &str,
        role: &str,
        topic: &str,
        pattern_type: PatternType,
    ) -> Result<()> {
        self.bind_resource(principal, role, ResourceType::Topic, topic, pattern_type)
    }

    /// Grant `role` at a caller-built scope. Only the first resource pattern
    /// describes the binding.
    pub fn bind_scope(&self, principal: &str, role: &str, scope: RequestScope) -> Result<()> {
        let binding = RoleBinding::from_scope(principal, role, scope)?;
        self.bind_request(&binding)
    }

    /// Submit a binding. The endpoint and body follow
    /// [`RoleBinding::is_cluster_level`].
    pub fn bind_request(&self, binding: &RoleBinding) -> Result<()> {
        let path = binding.request_path();
        let body = binding.request_body()?;

        match self.gateway.post(&path, body) {
            Ok(_) => {
                info!(binding = %binding, cluster_level = binding.is_cluster_level(), "role binding created");
                Ok(())
            }
            Err(e) => {
                error!(binding = %binding, error = %e, "role binding failed");
                Err(e.into())
            }
        }
    }

    /// Remove `role` from `principal` at the clusters of `scope`. Resource
    /// patterns in `scope` are not sent.
    pub fn delete_role(&self, principal: &str, role: &str, scope: &RequestScope) -> Result<()> {
        let path = role_path(principal, role);
        let body = scope.clusters_as_json()?;

        match self.gateway.delete(&path, body) {
            Ok(_) => {
                info!(principal, role, "role binding deleted");
                Ok(())
            }
            Err(e) => {
                error!(principal, role, error = %e, "role binding delete failed");
                Err(e.into())
            }
        }
    }

    /// Remove the role membership `binding` granted, at its cluster scope
    pub fn delete_binding(&self, binding: &RoleBinding) -> Result<()> {
        self.delete_role(binding.principal(), binding.role(), binding.scope())
    }
}

impl std::fmt::Debug for MdsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MdsClient")
            .field("base_url", &self.gateway.base_url())
            .field("cluster_ids", &self.cluster_ids)
            .field("session", &*self.gateway.session())
            .finish()
    }
}
