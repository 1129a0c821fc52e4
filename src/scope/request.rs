//! Request scopes: a cluster scope plus the resource patterns it targets
//!
//! A [`RequestScope`] can only be obtained from [`RequestScopeBuilder::build`],
//! so a scope is always complete before it is serialized.

use super::cluster::ClusterScope;
use super::resource::{PatternType, ResourcePattern, ResourceType};
use serde::Serialize;

/// Accumulates resource patterns before the scope is finalized
#[derive(Debug, Clone)]
pub struct RequestScopeBuilder {
    clusters: ClusterScope,
    resources: Vec<ResourcePattern>,
}

impl RequestScopeBuilder {
    /// Append a resource pattern
    pub fn add_resource(
        self,
        resource_type: ResourceType,
        name: impl Into<String>,
        pattern_type: PatternType,
    ) -> Self {
        self.add_pattern(ResourcePattern::new(resource_type, name, pattern_type))
    }

    /// Append an already constructed pattern
    pub fn add_pattern(mut self, pattern: ResourcePattern) -> Self {
        self.resources.push(pattern);
        self
    }

    /// Finalize the scope
    pub fn build(self) -> RequestScope {
        RequestScope {
            clusters: self.clusters,
            resources: self.resources,
        }
    }
}

/// A finalized binding scope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestScope {
    clusters: ClusterScope,
    resources: Vec<ResourcePattern>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FullForm<'a> {
    scope: &'a ClusterScope,
    resource_patterns: &'a [ResourcePattern],
}

impl RequestScope {
    pub fn builder(clusters: ClusterScope) -> RequestScopeBuilder {
        RequestScopeBuilder {
            clusters,
            resources: Vec::new(),
        }
    }

    /// Scope with no resource patterns
    pub fn clusters_only(clusters: ClusterScope) -> Self {
        Self::builder(clusters).build()
    }

    pub fn clusters(&self) -> &ClusterScope {
        &self.clusters
    }

    /// Resource patterns in insertion order
    pub fn resources(&self) -> &[ResourcePattern] {
        &self.resources
    }

    pub fn resource(&self, index: usize) -> Option<&ResourcePattern> {
        self.resources.get(index)
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    /// Full form: `{"scope":{"clusters":{..}},"resourcePatterns":[..]}`
    pub fn as_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&FullForm {
            scope: &self.clusters,
            resource_patterns: &self.resources,
        })
    }

    /// Clusters-only form: `{"clusters":{..}}`. Resource patterns are dropped.
    pub fn clusters_as_json(&self) -> serde_json::Result<String> {
        self.clusters.to_json()
    }
}
