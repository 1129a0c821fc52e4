//! Integration tests for reverse lookups

mod common;

use common::*;
use serde_json::json;
use streamline_rbac::{ClusterKind, PatternType, ResourcePattern, ResourceType};

#[test]
fn test_principals_by_role_variants() {
    let transport = ScriptedTransport::new()
        .reply(200, r#"["User:alice"]"#)
        .reply(200, r#"["User:connect"]"#)
        .reply(200, r#"["User:sr"]"#);
    let client = client(&transport);

    assert_eq!(client.lookup_principals_by_role("DeveloperRead"), vec!["User:alice"]);
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-1"}})
    );

    assert_eq!(
        client.lookup_principals_by_role_for_connect("DeveloperRead"),
        vec!["User:connect"]
    );
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-1", "connect-cluster": "connect-1"}})
    );

    assert_eq!(
        client.lookup_principals_by_role_for_schema_registry("DeveloperRead"),
        vec!["User:sr"]
    );
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-1", "schema-registry-cluster": "sr-1"}})
    );

    for request in transport.requests() {
        assert_eq!(request.url, api_url("lookup/role/DeveloperRead"));
    }
}

#[test]
fn test_roles_by_principal() {
    let transport = ScriptedTransport::new().reply(200, r#"["DeveloperRead","ResourceOwner"]"#);
    let client = client(&transport);

    let roles = client.lookup_roles_for_connect("User:alice");
    assert_eq!(roles, vec!["DeveloperRead", "ResourceOwner"]);
    assert_eq!(
        transport.last_request().url,
        api_url("lookup/principals/User:alice/roleNames")
    );
}

#[test]
fn test_resources_by_role() {
    let transport = ScriptedTransport::new().reply(
        200,
        r#"[{"resourceType":"Subject","name":"orders-","patternType":"PREFIXED"}]"#,
    );
    let client = client(&transport);

    let resources = client.lookup_resources_for_schema_registry("User:alice", "ResourceOwner");
    assert_eq!(
        resources,
        vec![ResourcePattern::new(
            ResourceType::Subject,
            "orders-",
            PatternType::Prefixed
        )]
    );
    assert_eq!(
        transport.last_request().url,
        api_url("principals/User:alice/roles/ResourceOwner/resources")
    );
}

#[test]
fn test_empty_body_is_an_empty_list() {
    let transport = ScriptedTransport::new().reply(204, "").reply(200, "");
    let client = client(&transport);

    assert!(client.lookup_roles("User:nobody").is_empty());
    assert!(client.lookup_resources("User:nobody", "DeveloperRead").is_empty());
}

#[test]
fn test_failures_return_empty_lists() {
    let transport = ScriptedTransport::new()
        .reply(500, "internal error")
        .reply(200, "{not json")
        .fail("connection reset");
    let client = client(&transport);

    assert!(client.lookup_principals_by_role("DeveloperRead").is_empty());
    assert!(client.lookup_roles("User:alice").is_empty());
    assert!(client.lookup_resources("User:alice", "DeveloperRead").is_empty());
    assert_eq!(transport.requests().len(), 3);
}

#[test]
fn test_lookup_in_custom_scope() {
    let transport = ScriptedTransport::new().reply(200, r#"["User:ksql"]"#);
    let client = client(&transport);

    let clusters = client.detached_scope().for_ksql().unwrap();
    let principals = client.lookup_principals_by_role_in("ResourceOwner", &clusters);

    assert_eq!(principals, vec!["User:ksql"]);
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-1", "ksql-cluster": "ksql-1"}})
    );
}

#[test]
fn test_detached_scope_changes_do_not_leak() {
    let transport = ScriptedTransport::new().reply(200, "[]").reply(200, "[]");
    let client = client(&transport);

    let custom = client
        .detached_scope()
        .with_cluster_id(ClusterKind::Kafka, "kafka-other")
        .for_kafka()
        .unwrap();
    client.lookup_roles_in("User:alice", &custom);
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-other"}})
    );

    client.lookup_roles("User:alice");
    assert_eq!(
        transport.last_body(),
        json!({"clusters": {"kafka-cluster": "kafka-1"}})
    );
    assert_eq!(client.cluster_ids().kafka.as_deref(), Some("kafka-1"));
}

#[test]
fn test_role_names() {
    let transport = ScriptedTransport::new()
        .reply(200, r#"["DeveloperRead","SystemAdmin","UserAdmin"]"#)
        .reply(401, "");
    let client = client(&transport);

    assert_eq!(client.role_names().len(), 3);
    assert_eq!(transport.last_request().url, api_url("roleNames"));
    assert!(client.role_names().is_empty());
}
