//! Resource patterns addressed by role bindings
//!
//! MDS names resource types in PascalCase (`Topic`, `Subject`, `Connector`)
//! and pattern types in upper case (`LITERAL`, `PREFIXED`).

use serde::{Deserialize, Serialize};

/// Resource types that can be targeted by a role binding
///
/// Two values are equal when they put the same name on the wire, so
/// `Other("Cluster")` and `Cluster` compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    /// Topic resource
    Topic,
    /// Consumer group resource
    Group,
    /// Cluster-level resource
    Cluster,
    /// Transactional ID resource
    TransactionalId,
    /// Schema Registry subject
    Subject,
    /// Kafka Connect connector
    Connector,
    /// ksqlDB cluster
    KsqlCluster,
    /// Any type MDS knows about that this client does not
    Other(String),
}

impl ResourceType {
    /// Parse from string representation (case-insensitive)
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "topic" => ResourceType::Topic,
            "group" => ResourceType::Group,
            "cluster" => ResourceType::Cluster,
            "transactionalid" | "transactional_id" => ResourceType::TransactionalId,
            "subject" => ResourceType::Subject,
            "connector" => ResourceType::Connector,
            "ksqlcluster" | "ksql_cluster" => ResourceType::KsqlCluster,
            _ => ResourceType::Other(s.to_string()),
        }
    }

    /// Name as it appears on the wire
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Topic => "Topic",
            ResourceType::Group => "Group",
            ResourceType::Cluster => "Cluster",
            ResourceType::TransactionalId => "TransactionalId",
            ResourceType::Subject => "Subject",
            ResourceType::Connector => "Connector",
            ResourceType::KsqlCluster => "KsqlCluster",
            ResourceType::Other(name) => name,
        }
    }
}

impl PartialEq for ResourceType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ResourceType {}

impl std::hash::Hash for ResourceType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        ResourceType::parse(&value)
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pattern type for resource name matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatternType {
    /// Exact literal match
    #[default]
    Literal,
    /// Prefix match (resource name starts with pattern)
    Prefixed,
}

impl PatternType {
    /// Parse from string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "literal" => Some(PatternType::Literal),
            "prefixed" | "prefix" => Some(PatternType::Prefixed),
            _ => None,
        }
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatternType::parse(s).ok_or_else(|| format!("unknown pattern type '{}'", s))
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternType::Literal => write!(f, "LITERAL"),
            PatternType::Prefixed => write!(f, "PREFIXED"),
        }
    }
}

/// A single resource pattern. Also the shape MDS returns when listing the
/// resources a principal holds a role on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePattern {
    pub resource_type: ResourceType,
    pub name: String,
    #[serde(default)]
    pub pattern_type: PatternType,
}

impl ResourcePattern {
    pub fn new(resource_type: ResourceType, name: impl Into<String>, pattern_type: PatternType) -> Self {
        Self {
            resource_type,
            name: name.into(),
            pattern_type,
        }
    }

    /// Literal topic pattern
    pub fn topic(name: impl Into<String>) -> Self {
        Self::new(ResourceType::Topic, name, PatternType::Literal)
    }
}

impl std::fmt::Display for ResourcePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} ({})", self.resource_type, self.name, self.pattern_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_parse() {
        assert_eq!(ResourceType::parse("topic"), ResourceType::Topic);
        assert_eq!(ResourceType::parse("SUBJECT"), ResourceType::Subject);
        assert_eq!(ResourceType::parse("Connector"), ResourceType::Connector);
        assert_eq!(
            ResourceType::parse("DelegationToken"),
            ResourceType::Other("DelegationToken".to_string())
        );
    }

    #[test]
    fn test_unknown_resource_type_keeps_wire_name() {
        let rt = ResourceType::parse("DelegationToken");
        assert_eq!(rt.as_str(), "DelegationToken");
        assert_eq!(
            serde_json::to_string(&rt).unwrap(),
            "\"DelegationToken\""
        );
    }

    #[test]
    fn test_other_with_known_wire_name_equals_known_variant() {
        use std::collections::HashSet;

        let other = ResourceType::Other("Cluster".to_string());
        assert_eq!(other, ResourceType::Cluster);
        assert_eq!(other.to_string(), ResourceType::Cluster.to_string());
        assert_ne!(ResourceType::Other("cluster".to_string()), ResourceType::Cluster);
        assert_ne!(ResourceType::Other("Topics".to_string()), ResourceType::Topic);

        let set: HashSet<_> = [other, ResourceType::Cluster].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_pattern_type_parse() {
        assert_eq!(PatternType::parse("literal"), Some(PatternType::Literal));
        assert_eq!(PatternType::parse("PREFIXED"), Some(PatternType::Prefixed));
        assert_eq!(PatternType::parse("match"), None);
        assert!("bogus".parse::<PatternType>().is_err());
    }

    #[test]
    fn test_resource_pattern_wire_shape() {
        let pattern = ResourcePattern::new(ResourceType::Topic, "orders", PatternType::Prefixed);
        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"resourceType": "Topic", "name": "orders", "patternType": "PREFIXED"})
        );
    }

    #[test]
    fn test_resource_descriptor_without_pattern_type_defaults_literal() {
        let parsed: ResourcePattern =
            serde_json::from_str(r#"{"resourceType":"Subject","name":"orders-value"}"#).unwrap();
        assert_eq!(parsed.resource_type, ResourceType::Subject);
        assert_eq!(parsed.pattern_type, PatternType::Literal);
    }
}
