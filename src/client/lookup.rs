//! Reverse lookups against MDS
//!
//! Lookups feed reconciliation and are advisory: a failed call (transport,
//! status, unreadable body, or a scope that cannot be composed) is logged and
//! returns an empty list. An empty result therefore means "unknown", not
//! "none".

use super::MdsClient;
use crate::binding::{encode_path_segment, role_path};
use crate::error::{RbacError, Result, ScopeError};
use crate::scope::{ClusterKind, ClusterScope, ResourcePattern};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

impl MdsClient {
    /// Principals holding `role` on the Kafka cluster
    pub fn lookup_principals_by_role(&self, role: &str) -> Vec<String> {
        self.principals_by_role(role, self.cluster_ids.for_kafka())
    }

    /// Principals holding `role` on the Kafka Connect cluster
    pub fn lookup_principals_by_role_for_connect(&self, role: &str) -> Vec<String> {
        self.principals_by_role(role, self.cluster_ids.for_connect())
    }

    /// Principals holding `role` on the Schema Registry cluster
    pub fn lookup_principals_by_role_for_schema_registry(&self, role: &str) -> Vec<String> {
        self.principals_by_role(role, self.cluster_ids.for_schema_registry())
    }

    pub fn lookup_principals_by_role_in(&self, role: &str, clusters: &ClusterScope) -> Vec<String> {
        self.principals_by_role(role, Ok(clusters.clone()))
    }

    /// Roles bound to `principal` on the Kafka cluster
    pub fn lookup_roles(&self, principal: &str) -> Vec<String> {
        self.roles(principal, self.cluster_ids.for_kafka())
    }

    /// Roles bound to `principal` on the Kafka Connect cluster
    pub fn lookup_roles_for_connect(&self, principal: &str) -> Vec<String> {
        self.roles(principal, self.cluster_ids.for_connect())
    }

    /// Roles bound to `principal` on the Schema Registry cluster
    pub fn lookup_roles_for_schema_registry(&self, principal: &str) -> Vec<String> {
        self.roles(principal, self.cluster_ids.for_schema_registry())
    }

    pub fn lookup_roles_in(&self, principal: &str, clusters: &ClusterScope) -> Vec<String> {
        self.roles(principal, Ok(clusters.clone()))
    }

    /// Resources `role` is bound on for `principal` in the Kafka cluster
    pub fn lookup_resources(&self, principal: &str, role: &str) -> Vec<ResourcePattern> {
        self.resources(principal, role, self.cluster_ids.for_kafka())
    }

    /// Resources `role` is bound on for `principal` in the Kafka Connect cluster
    pub fn lookup_resources_for_connect(&self, principal: &str, role: &str) -> Vec<ResourcePattern> {
        self.resources(principal, role, self.cluster_ids.for_connect())
    }

    /// Resources `role` is bound on for `principal` in the Schema Registry cluster
    pub fn lookup_resources_for_schema_registry(
        &self,
        principal: &str,
        role: &str,
    ) -> Vec<ResourcePattern> {
        self.resources(principal, role, self.cluster_ids.for_schema_registry())
    }

    pub fn lookup_resources_in(
        &self,
        principal: &str,
        role: &str,
        clusters: &ClusterScope,
    ) -> Vec<ResourcePattern> {
        self.resources(principal, role, Ok(clusters.clone()))
    }

    /// Every role name MDS knows about
    pub fn role_names(&self) -> Vec<String> {
        let result = self
            .gateway
            .get_ok("roleNames")
            .map_err(RbacError::from)
            .and_then(|body| parse_list(&body));
        downgrade("role names", result)
    }

    fn principals_by_role(
        &self,
        role: &str,
        clusters: std::result::Result<ClusterScope, ScopeError>,
    ) -> Vec<String> {
        let path = format!("lookup/role/{}", encode_path_segment(role));
        downgrade("principals by role", self.post_lookup(&path, clusters))
    }

    fn roles(
        &self,
        principal: &str,
        clusters: std::result::Result<ClusterScope, ScopeError>,
    ) -> Vec<String> {
        let path = format!(
            "lookup/principals/{}/roleNames",
            encode_path_segment(principal)
        );
        downgrade("roles by principal", self.post_lookup(&path, clusters))
    }

    fn resources(
        &self,
        principal: &str,
        role: &str,
        clusters: std::result::Result<ClusterScope, ScopeError>,
    ) -> Vec<ResourcePattern> {
        let path = format!("{}/resources", role_path(principal, role));
        downgrade("resources by role", self.post_lookup(&path, clusters))
    }

    fn post_lookup<T: DeserializeOwned>(
        &self,
        path: &str,
        clusters: std::result::Result<ClusterScope, ScopeError>,
    ) -> Result<Vec<T>> {
        let clusters = clusters?;
        if !clusters.contains(ClusterKind::Kafka) {
            return Err(ScopeError::MissingClusterId(ClusterKind::Kafka).into());
        }
        let body = self.gateway.post(path, clusters.to_json()?)?;
        parse_list(&body)
    }
}

fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(body)?)
}

fn downgrade<T>(lookup: &str, result: Result<Vec<T>>) -> Vec<T> {
    match result {
        Ok(items) => {
            debug!(lookup, count = items.len(), "lookup completed");
            items
        }
        Err(e) => {
            warn!(lookup, error = %e, "lookup failed, returning empty result");
            Vec::new()
        }
    }
}
