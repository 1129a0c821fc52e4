//! Cluster identifiers and cluster scopes
//!
//! [`ClusterIds`] is the authoritative registry of the cluster ids this
//! client manages bindings for. It is set once from configuration and only
//! read afterwards. [`ClusterScope`] is the value that goes on the wire: a
//! selection of `label -> id` entries, composed from a registry snapshot.
//!
//! Every composition function returns a new scope and always selects the
//! Kafka cluster, since every other component's resources are addressed
//! relative to it. Compositions therefore commute:
//!
//! ```
//! use streamline_rbac::scope::ClusterIds;
//!
//! let ids = ClusterIds::new("kafka-1").with_connect("connect-1");
//! let a = ids.detached().for_connect().unwrap().for_kafka().unwrap();
//! let b = ids.detached().for_kafka().unwrap().for_connect().unwrap();
//! assert_eq!(a, b);
//! ```

use crate::error::ScopeError;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Logical cluster roles in a Confluent Platform deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClusterKind {
    /// Core Kafka broker cluster
    #[serde(rename = "kafka-cluster")]
    Kafka,
    /// Kafka Connect worker cluster
    #[serde(rename = "connect-cluster")]
    Connect,
    /// Schema Registry cluster
    #[serde(rename = "schema-registry-cluster")]
    SchemaRegistry,
    /// ksqlDB cluster
    #[serde(rename = "ksql-cluster")]
    Ksql,
}

impl ClusterKind {
    /// Label MDS uses for this cluster in scope maps
    pub fn label(self) -> &'static str {
        match self {
            ClusterKind::Kafka => "kafka-cluster",
            ClusterKind::Connect => "connect-cluster",
            ClusterKind::SchemaRegistry => "schema-registry-cluster",
            ClusterKind::Ksql => "ksql-cluster",
        }
    }

    /// Parse from a short name (`kafka`, `connect`, `schema-registry`, `ksql`)
    /// or a wire label
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "kafka" | "kafka-cluster" => Some(ClusterKind::Kafka),
            "connect" | "connect-cluster" => Some(ClusterKind::Connect),
            "schema-registry" | "schema_registry" | "schema-registry-cluster" => {
                Some(ClusterKind::SchemaRegistry)
            }
            "ksql" | "ksql-cluster" => Some(ClusterKind::Ksql),
            _ => None,
        }
    }
}

impl std::str::FromStr for ClusterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClusterKind::parse(s).ok_or_else(|| format!("unknown cluster kind '{}'", s))
    }
}

impl std::fmt::Display for ClusterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Registry of known cluster ids
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterIds {
    /// Kafka cluster id
    pub kafka: Option<String>,
    /// Kafka Connect cluster id
    pub connect: Option<String>,
    /// Schema Registry cluster id
    pub schema_registry: Option<String>,
    /// ksqlDB cluster id
    pub ksql: Option<String>,
}

impl ClusterIds {
    /// Create a registry knowing only the Kafka cluster
    pub fn new(kafka: impl Into<String>) -> Self {
        Self {
            kafka: Some(kafka.into()),
            ..Self::default()
        }
    }

    /// Set the Kafka Connect cluster id
    pub fn with_connect(mut self, id: impl Into<String>) -> Self {
        self.connect = Some(id.into());
        self
    }

    /// Set the Schema Registry cluster id
    pub fn with_schema_registry(mut self, id: impl Into<String>) -> Self {
        self.schema_registry = Some(id.into());
        self
    }

    /// Set the ksqlDB cluster id
    pub fn with_ksql(mut self, id: impl Into<String>) -> Self {
        self.ksql = Some(id.into());
        self
    }

    /// Id registered for `kind`, if any
    pub fn get(&self, kind: ClusterKind) -> Option<&str> {
        match kind {
            ClusterKind::Kafka => self.kafka.as_deref(),
            ClusterKind::Connect => self.connect.as_deref(),
            ClusterKind::SchemaRegistry => self.schema_registry.as_deref(),
            ClusterKind::Ksql => self.ksql.as_deref(),
        }
    }

    fn set(&mut self, kind: ClusterKind, id: String) {
        let slot = match kind {
            ClusterKind::Kafka => &mut self.kafka,
            ClusterKind::Connect => &mut self.connect,
            ClusterKind::SchemaRegistry => &mut self.schema_registry,
            ClusterKind::Ksql => &mut self.ksql,
        };
        *slot = Some(id);
    }

    /// A cleared snapshot of this registry: it knows every id, but selects
    /// none. Changes made through the snapshot never reach `self`.
    pub fn detached(&self) -> ClusterScope {
        ClusterScope {
            registry: self.clone(),
            clusters: BTreeMap::new(),
        }
    }

    /// Scope containing only the Kafka cluster
    pub fn for_kafka(&self) -> Result<ClusterScope, ScopeError> {
        self.detached().for_kafka()
    }

    /// Scope containing the Kafka and Kafka Connect clusters
    pub fn for_connect(&self) -> Result<ClusterScope, ScopeError> {
        self.detached().for_connect()
    }

    /// Scope containing the Kafka and Schema Registry clusters
    pub fn for_schema_registry(&self) -> Result<ClusterScope, ScopeError> {
        self.detached().for_schema_registry()
    }

    /// Scope containing the Kafka and ksqlDB clusters
    pub fn for_ksql(&self) -> Result<ClusterScope, ScopeError> {
        self.detached().for_ksql()
    }

    /// Scope for the component `kind`, always including Kafka
    pub fn scope_for(&self, kind: ClusterKind) -> Result<ClusterScope, ScopeError> {
        match kind {
            ClusterKind::Kafka => self.for_kafka(),
            ClusterKind::Connect => self.for_connect(),
            ClusterKind::SchemaRegistry => self.for_schema_registry(),
            ClusterKind::Ksql => self.for_ksql(),
        }
    }
}

/// Selected cluster ids for a single binding or lookup request.
///
/// Serializes to the clusters-only wire form:
/// `{"clusters":{"kafka-cluster":"<id>", ...}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterScope {
    registry: ClusterIds,
    clusters: BTreeMap<ClusterKind, String>,
}

impl ClusterScope {
    fn select(&self, kind: ClusterKind) -> Result<Self, ScopeError> {
        let id = self
            .registry
            .get(kind)
            .ok_or(ScopeError::MissingClusterId(kind))?
            .to_string();
        let mut next = self.clone();
        next.clusters.insert(kind, id);
        Ok(next)
    }

    fn select_with_kafka(&self, kind: ClusterKind) -> Result<Self, ScopeError> {
        self.select(ClusterKind::Kafka)?.select(kind)
    }

    /// Add the Kafka cluster
    pub fn for_kafka(&self) -> Result<Self, ScopeError> {
        self.select(ClusterKind::Kafka)
    }

    /// Add the Kafka and Kafka Connect clusters
    pub fn for_connect(&self) -> Result<Self, ScopeError> {
        self.select_with_kafka(ClusterKind::Connect)
    }

    /// Add the Kafka and Kafka Connect clusters, using `connect_cluster_id`
    /// instead of the registered Connect id when one is given. The override
    /// only affects the returned scope.
    pub fn for_connect_with(&self, connect_cluster_id: Option<&str>) -> Result<Self, ScopeError> {
        match connect_cluster_id {
            Some(id) => self
                .with_cluster_id(ClusterKind::Connect, id)
                .for_connect(),
            None => self.for_connect(),
        }
    }

    /// Add the Kafka and Schema Registry clusters
    pub fn for_schema_registry(&self) -> Result<Self, ScopeError> {
        self.select_with_kafka(ClusterKind::SchemaRegistry)
    }

    /// Add the Kafka and ksqlDB clusters
    pub fn for_ksql(&self) -> Result<Self, ScopeError> {
        self.select_with_kafka(ClusterKind::Ksql)
    }

    /// Copy of this scope whose snapshot uses `id` for `kind`. An entry for
    /// `kind` that is already selected is replaced as well.
    pub fn with_cluster_id(&self, kind: ClusterKind, id: impl Into<String>) -> Self {
        let id = id.into();
        let mut next = self.clone();
        if let Some(selected) = next.clusters.get_mut(&kind) {
            *selected = id.clone();
        }
        next.registry.set(kind, id);
        next
    }

    /// Selected cluster ids, keyed by cluster kind
    pub fn clusters(&self) -> &BTreeMap<ClusterKind, String> {
        &self.clusters
    }

    /// Selected id for `kind`
    pub fn get(&self, kind: ClusterKind) -> Option<&str> {
        self.clusters.get(&kind).map(String::as_str)
    }

    pub fn contains(&self, kind: ClusterKind) -> bool {
        self.clusters.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters-only JSON body
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for ClusterScope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            clusters: &'a BTreeMap<ClusterKind, String>,
        }

        Wire {
            clusters: &self.clusters,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ClusterIds {
        ClusterIds::new("kafka-1")
            .with_connect("connect-1")
            .with_schema_registry("sr-1")
            .with_ksql("ksql-1")
    }

    #[test]
    fn test_for_kafka_selects_only_core() {
        let scope = registry().for_kafka().unwrap();
        assert_eq!(scope.len(), 1);
        assert_eq!(scope.get(ClusterKind::Kafka), Some("kafka-1"));
    }

    #[test]
    fn test_every_composition_includes_kafka() {
        let ids = registry();
        for scope in [
            ids.for_connect().unwrap(),
            ids.for_schema_registry().unwrap(),
            ids.for_ksql().unwrap(),
        ] {
            assert_eq!(scope.get(ClusterKind::Kafka), Some("kafka-1"));
            assert_eq!(scope.len(), 2);
        }
    }

    #[test]
    fn test_composition_is_order_independent() {
        let ids = registry();
        let a = ids.detached().for_schema_registry().unwrap().for_kafka().unwrap();
        let b = ids.detached().for_kafka().unwrap().for_schema_registry().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_composition_does_not_mutate_source() {
        let base = registry().for_kafka().unwrap();
        let wider = base.for_connect().unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(wider.len(), 2);
    }

    #[test]
    fn test_missing_id_is_an_error() {
        let ids = ClusterIds::new("kafka-1");
        assert_eq!(
            ids.for_connect(),
            Err(ScopeError::MissingClusterId(ClusterKind::Connect))
        );
        assert_eq!(
            ClusterIds::default().for_kafka(),
            Err(ScopeError::MissingClusterId(ClusterKind::Kafka))
        );
    }

    #[test]
    fn test_connect_override_replaces_default_id() {
        let ids = registry();
        let scope = ids
            .detached()
            .for_connect_with(Some("connect-override"))
            .unwrap();
        assert_eq!(scope.get(ClusterKind::Connect), Some("connect-override"));
        assert_eq!(ids.connect.as_deref(), Some("connect-1"));

        let plain = ids.detached().for_connect_with(None).unwrap();
        assert_eq!(plain.get(ClusterKind::Connect), Some("connect-1"));
    }

    #[test]
    fn test_connect_override_works_without_registered_connect_id() {
        let scope = ClusterIds::new("kafka-1")
            .detached()
            .for_connect_with(Some("connect-x"))
            .unwrap();
        assert_eq!(scope.get(ClusterKind::Connect), Some("connect-x"));
    }

    #[test]
    fn test_detached_snapshot_changes_stay_local() {
        let ids = registry();
        let snapshot = ids
            .detached()
            .with_cluster_id(ClusterKind::Kafka, "kafka-other");
        assert_eq!(
            snapshot.for_kafka().unwrap().get(ClusterKind::Kafka),
            Some("kafka-other")
        );
        assert_eq!(
            ids.for_kafka().unwrap().get(ClusterKind::Kafka),
            Some("kafka-1")
        );
    }

    #[test]
    fn test_clusters_only_wire_shape() {
        let scope = registry().for_connect().unwrap();
        let json: serde_json::Value = serde_json::from_str(&scope.to_json().unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "clusters": {"kafka-cluster": "kafka-1", "connect-cluster": "connect-1"}
            })
        );
    }

    #[test]
    fn test_cluster_kind_parse() {
        assert_eq!(ClusterKind::parse("schema-registry"), Some(ClusterKind::SchemaRegistry));
        assert_eq!(ClusterKind::parse("KSQL"), Some(ClusterKind::Ksql));
        assert_eq!(ClusterKind::parse("connect-cluster"), Some(ClusterKind::Connect));
        assert!("zookeeper".parse::<ClusterKind>().is_err());
    }

    #[test]
    fn test_scope_for_matches_named_compositions() {
        let ids = registry();
        assert_eq!(ids.scope_for(ClusterKind::Kafka), ids.for_kafka());
        assert_eq!(ids.scope_for(ClusterKind::Connect), ids.for_connect());
        assert_eq!(
            ids.scope_for(ClusterKind::SchemaRegistry),
            ids.for_schema_registry()
        );
    }
}
