//! Role bindings
//!
//! A [`RoleBinding`] grants `role` to `principal` at a [`RequestScope`]. It
//! comes in two shapes:
//!
//! - **resource-scoped**: the scope names exactly one resource pattern, and
//!   the binding is sent as the full scope form to
//!   `principals/{p}/roles/{r}/bindings`
//! - **cluster-level**: built with [`ClusterRoleBuilder`]; when its scope
//!   carries no resource patterns it is sent as the clusters-only form to
//!   `principals/{p}/roles/{r}`
//!
//! Which shape goes on the wire is decided by [`RoleBinding::is_cluster_level`]
//! when the binding is submitted, not by the constructor that produced it. A
//! cluster-level builder narrowed to a schema subject carries a resource
//! pattern and is therefore submitted as a resource-scoped binding.

mod cluster_role;

pub use cluster_role::ClusterRoleBuilder;

use crate::config::{CLUSTER_RESOURCE_NAME, WILDCARD_RESOURCE_NAME};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use crate::error::ScopeError;
use crate::scope::{ClusterIds, PatternType, RequestScope, ResourcePattern, ResourceType};

/// A role binding ready to be submitted to MDS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleBinding {
    principal: String,
    role: String,
    resource_type: ResourceType,
    resource_name: String,
    pattern_type: PatternType,
    scope: RequestScope,
}

impl RoleBinding {
    /// Bind `role` on a single resource in the Kafka cluster
    pub fn for_resource(
        principal: impl Into<String>,
        role: impl Into<String>,
        cluster_ids: &ClusterIds,
        resource_type: ResourceType,
        resource_name: impl Into<String>,
        pattern_type: PatternType,
    ) -> Result<Self, ScopeError> {
        let scope = RequestScope::builder(cluster_ids.for_kafka()?)
            .add_resource(resource_type, resource_name, pattern_type)
            .build();
        Self::from_scope(principal, role, scope)
    }

    /// Bind `role` on a single topic in the Kafka cluster
    pub fn for_topic(
        principal: impl Into<String>,
        role: impl Into<String>,
        cluster_ids: &ClusterIds,
        topic: impl Into<String>,
        pattern_type: PatternType,
    ) -> Result<Self, ScopeError> {
        Self::for_resource(
            principal,
            role,
            cluster_ids,
            ResourceType::Topic,
            topic,
            pattern_type,
        )
    }

    /// Resource-scoped binding from a caller-built scope.
    ///
    /// Only the first resource pattern describes the binding; MDS still
    /// receives the whole scope.
    pub fn from_scope(
        principal: impl Into<String>,
        role: impl Into<String>,
        scope: RequestScope,
    ) -> Result<Self, ScopeError> {
        let first = scope.resource(0).ok_or(ScopeError::NoResources)?;
        let resource_type = first.resource_type.clone();
        let pattern_type = first.pattern_type;
        Ok(Self {
            principal: principal.into(),
            role: role.into(),
            resource_type,
            resource_name: WILDCARD_RESOURCE_NAME.to_string(),
            pattern_type,
            scope,
        })
    }

    /// Cluster-level binding with the default `Cluster`/`cluster` descriptor
    pub fn cluster_level(
        principal: impl Into<String>,
        role: impl Into<String>,
        scope: RequestScope,
    ) -> Self {
        Self::cluster_level_as(
            principal,
            role,
            ResourceType::Cluster,
            CLUSTER_RESOURCE_NAME,
            scope,
        )
    }

    /// Cluster-level binding with an explicit descriptor type and name
    pub fn cluster_level_as(
        principal: impl Into<String>,
        role: impl Into<String>,
        resource_type: ResourceType,
        resource_name: impl Into<String>,
        scope: RequestScope,
    ) -> Self {
        Self {
            principal: principal.into(),
            role: role.into(),
            resource_type,
            resource_name: resource_name.into(),
            pattern_type: PatternType::Literal,
            scope,
        }
    }

    pub fn principal(&self) -> &str {
        &self.principal
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn resource_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Descriptor name: `*` for resource-scoped bindings, `cluster` for
    /// cluster-level ones. See [`target`](Self::target) for the real resource.
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn pattern_type(&self) -> PatternType {
        self.pattern_type
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    /// Resource the binding actually targets, if it targets one
    pub fn target(&self) -> Option<&ResourcePattern> {
        self.scope.resource(0)
    }

    /// True when the binding goes to the cluster-level endpoint
    pub fn is_cluster_level(&self) -> bool {
        self.resource_type == ResourceType::Cluster && !self.scope.has_resources()
    }

    /// Path below the API prefix the binding is POSTed to
    pub fn request_path(&self) -> String {
        let path = role_path(&self.principal, &self.role);
        if self.is_cluster_level() {
            path
        } else {
            format!("{}/bindings", path)
        }
    }

    /// JSON body matching [`request_path`](Self::request_path)
    pub fn request_body(&self) -> serde_json::Result<String> {
        if self.is_cluster_level() {
            self.scope.clusters_as_json()
        } else {
            self.scope.as_json()
        }
    }
}

impl std::fmt::Display for RoleBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.target() {
            Some(target) => write!(f, "{} -> {} on {}", self.principal, self.role, target),
            None => write!(
                f,
                "{} -> {} on {} {}",
                self.principal, self.role, self.resource_type, self.resource_name
            ),
        }
    }
}

/// `principals/{principal}/roles/{role}`
pub(crate) fn role_path(principal: &str, role: &str) -> String {
    format!(
        "principals/{}/roles/{}",
        encode_path_segment(principal),
        encode_path_segment(role)
    )
}

/// Bytes escaped in a principal or role path segment. `:` stays literal so
/// `User:alice` is sent as-is.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'\\')
    .add(b'&')
    .add(b'=')
    .add(b'+')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

pub(crate) fn encode_path_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}
