//! Fluent builder for cluster-level role bindings
//!
//! Each `for_*` call replaces the builder's scope; narrowing twice keeps only
//! the last choice.
//!
//! ```
//! use streamline_rbac::binding::ClusterRoleBuilder;
//! use streamline_rbac::scope::ClusterIds;
//!
//! let ids = ClusterIds::new("kafka-1").with_connect("connect-1");
//! let binding = ClusterRoleBuilder::new("User:ops", "SystemAdmin", ids)
//!     .for_kafka_connect()?
//!     .apply()?;
//! assert_eq!(binding.request_path(), "principals/User:ops/roles/SystemAdmin");
//! # Ok::<(), streamline_rbac::error::ScopeError>(())
//! ```

use super::RoleBinding;
use crate::config::{CONNECTOR_RESOURCE_PREFIX, CONTROL_CENTER_RESOURCE_NAME};
use crate::error::ScopeError;
use crate::scope::{ClusterIds, ClusterScope, PatternType, RequestScope, ResourceType};

/// Narrows a cluster-level grant to one cluster or cluster resource
#[derive(Debug, Clone)]
pub struct ClusterRoleBuilder {
    principal: String,
    role: String,
    cluster_ids: ClusterIds,
    scope: Option<RequestScope>,
}

impl ClusterRoleBuilder {
    pub fn new(principal: impl Into<String>, role: impl Into<String>, cluster_ids: ClusterIds) -> Self {
        Self {
            principal: principal.into(),
            role: role.into(),
            cluster_ids,
            scope: None,
        }
    }

    fn with_scope(mut self, scope: RequestScope) -> Self {
        self.scope = Some(scope);
        self
    }

    fn clusters(&self) -> ClusterScope {
        self.cluster_ids.detached()
    }

    /// The whole Kafka cluster
    pub fn for_kafka(self) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_kafka()?;
        Ok(self.with_scope(RequestScope::clusters_only(clusters)))
    }

    /// The whole Kafka Connect cluster
    pub fn for_kafka_connect(self) -> Result<Self, ScopeError> {
        self.for_kafka_connect_with(None)
    }

    /// The whole Kafka Connect cluster, with the Connect cluster id taken
    /// from a connector definition when it names one
    pub fn for_kafka_connect_with(self, connect_cluster_id: Option<&str>) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_connect_with(connect_cluster_id)?;
        Ok(self.with_scope(RequestScope::clusters_only(clusters)))
    }

    /// The whole Schema Registry cluster
    pub fn for_schema_registry(self) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_schema_registry()?;
        Ok(self.with_scope(RequestScope::clusters_only(clusters)))
    }

    /// The whole ksqlDB cluster
    pub fn for_ksql(self) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_ksql()?;
        Ok(self.with_scope(RequestScope::clusters_only(clusters)))
    }

    /// A single Schema Registry subject, matched literally
    pub fn for_schema_subject(self, subject: &str) -> Result<Self, ScopeError> {
        self.for_schema_subject_with(subject, PatternType::Literal)
    }

    /// Schema Registry subjects matching `subject` with `pattern_type`
    pub fn for_schema_subject_with(
        self,
        subject: &str,
        pattern_type: PatternType,
    ) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_schema_registry()?;
        let scope = RequestScope::builder(clusters)
            .add_resource(ResourceType::Subject, subject, pattern_type)
            .build();
        Ok(self.with_scope(scope))
    }

    /// A single Kafka Connect connector
    pub fn for_connector(self, connector: &str) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_connect()?;
        let scope = RequestScope::builder(clusters)
            .add_resource(
                ResourceType::Connector,
                format!("{}{}", CONNECTOR_RESOURCE_PREFIX, connector),
                PatternType::Literal,
            )
            .build();
        Ok(self.with_scope(scope))
    }

    /// Control Center, addressed as a pseudo-resource of the Kafka cluster
    pub fn for_control_center(self) -> Result<Self, ScopeError> {
        let clusters = self.clusters().for_kafka()?;
        let scope = RequestScope::builder(clusters)
            .add_resource(
                ResourceType::Cluster,
                CONTROL_CENTER_RESOURCE_NAME,
                PatternType::Literal,
            )
            .build();
        Ok(self.with_scope(scope))
    }

    /// Scope chosen by the last `for_*` call
    pub fn scope(&self) -> Option<&RequestScope> {
        self.scope.as_ref()
    }

    /// Produce the binding with the `Cluster`/`cluster` descriptor
    pub fn apply(self) -> Result<RoleBinding, ScopeError> {
        let scope = self.scope.ok_or(ScopeError::Unscoped)?;
        Ok(RoleBinding::cluster_level(self.principal, self.role, scope))
    }

    /// Produce the binding with a custom descriptor type and name
    pub fn apply_as(
        self,
        resource_type: ResourceType,
        resource_name: impl Into<String>,
    ) -> Result<RoleBinding, ScopeError> {
        let scope = self.scope.ok_or(ScopeError::Unscoped)?;
        Ok(RoleBinding::cluster_level_as(
            self.principal,
            self.role,
            resource_type,
            resource_name,
            scope,
        ))
    }
}
