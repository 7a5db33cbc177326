use crate::{
    ClusterResource, DashError, GuestKind, Node, NodeListItem, NodeResolver, Vmid,
    core::infrastructure::cluster_api::MockClusterApi, pick_default_node,
};
use std::sync::Arc;

fn node(name: &str, status: &str) -> NodeListItem {
    NodeListItem {
        node: name.to_string(),
        status: status.to_string(),
        cpu: None,
        uptime: None,
        id: Some(format!("node/{}", name)),
    }
}

fn member(name: &str, online: bool) -> Node {
    Node {
        name: name.to_string(),
        online,
    }
}

fn resources(value: serde_json::Value) -> Vec<ClusterResource> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_pick_default_node_prefers_online() {
    let nodes = vec![member("a", false), member("b", true)];
    assert_eq!(pick_default_node(&nodes).unwrap(), "b");
}

#[test]
fn test_pick_default_node_falls_back_to_first() {
    let nodes = vec![member("a", false), member("b", false)];
    assert_eq!(pick_default_node(&nodes).unwrap(), "a");
}

#[test]
fn test_pick_default_node_empty_list() {
    assert!(matches!(
        pick_default_node(&[]),
        Err(DashError::NoNodesAvailable)
    ));
}

#[tokio::test]
async fn test_resolve_node_auto_detects_online_node() {
    let mut api = MockClusterApi::new();
    api.expect_nodes()
        .times(1)
        .returning(|| Ok(vec![node("a", "offline"), node("b", "online")]));

    let resolver = NodeResolver::new(Arc::new(api), None);
    assert_eq!(resolver.resolve_node(None).await.unwrap(), "b");
}

#[tokio::test]
async fn test_resolve_node_treats_unknown_status_as_offline() {
    let mut api = MockClusterApi::new();
    api.expect_nodes()
        .times(1)
        .returning(|| Ok(vec![node("a", "unknown"), node("b", "offline")]));

    let resolver = NodeResolver::new(Arc::new(api), None);
    assert_eq!(resolver.resolve_node(None).await.unwrap(), "a");
}

#[tokio::test]
async fn test_resolve_node_without_nodes() {
    let mut api = MockClusterApi::new();
    api.expect_nodes().times(1).returning(|| Ok(Vec::new()));

    let resolver = NodeResolver::new(Arc::new(api), None);
    let result = resolver.resolve_node(None).await;
    assert!(matches!(result, Err(DashError::NoNodesAvailable)));
}

#[tokio::test]
async fn test_explicit_node_wins_without_upstream_call() {
    let mut api = MockClusterApi::new();
    api.expect_nodes().times(0);

    let resolver = NodeResolver::new(Arc::new(api), Some("pve1".to_string()));
    assert_eq!(resolver.resolve_node(Some("pve9")).await.unwrap(), "pve9");
}

#[tokio::test]
async fn test_configured_node_wins_over_auto_detection() {
    let mut api = MockClusterApi::new();
    api.expect_nodes().times(0);

    let resolver = NodeResolver::new(Arc::new(api), Some("  pve1 ".to_string()));
    assert_eq!(resolver.default_node(), Some("pve1"));
    assert_eq!(resolver.resolve_node(None).await.unwrap(), "pve1");
    assert_eq!(resolver.resolve_node(Some("")).await.unwrap(), "pve1");
}

#[tokio::test]
async fn test_blank_configured_node_means_auto_detect() {
    let mut api = MockClusterApi::new();
    api.expect_nodes()
        .times(1)
        .returning(|| Ok(vec![node("pve2", "online")]));

    let resolver = NodeResolver::new(Arc::new(api), Some("   ".to_string()));
    assert_eq!(resolver.default_node(), None);
    assert_eq!(resolver.resolve_node(None).await.unwrap(), "pve2");
}

#[tokio::test]
async fn test_node_list_failure_is_propagated() {
    let mut api = MockClusterApi::new();
    api.expect_nodes().times(1).returning(|| {
        Err(DashError::UpstreamRejected {
            status: 401,
            body: serde_json::Value::String("authentication failure".to_string()),
        })
    });

    let resolver = NodeResolver::new(Arc::new(api), None);
    match resolver.resolve_node(None).await {
        Err(DashError::UpstreamRejected { status, .. }) => assert_eq!(status, 401),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_host_of_finds_guest_node() {
    let mut api = MockClusterApi::new();
    api.expect_cluster_resources().times(1).returning(|| {
        Ok(resources(serde_json::json!([
            {"type": "qemu", "vmid": 100, "node": "beta"},
            {"type": "lxc", "vmid": 101, "node": "alpha"}
        ])))
    });

    let resolver = NodeResolver::new(Arc::new(api), Some("gamma".to_string()));
    let host = resolver
        .resolve_host_of(Vmid::new_unchecked(101), GuestKind::Container)
        .await
        .unwrap();
    assert_eq!(host, "alpha");
}

#[tokio::test]
async fn test_resolve_host_of_matches_kind() {
    let mut api = MockClusterApi::new();
    api.expect_cluster_resources().times(1).returning(|| {
        Ok(resources(serde_json::json!([
            {"type": "qemu", "vmid": 101, "node": "beta"}
        ])))
    });

    let resolver = NodeResolver::new(Arc::new(api), None);
    let result = resolver
        .resolve_host_of(Vmid::new_unchecked(101), GuestKind::Container)
        .await;
    match result {
        Err(DashError::GuestNotFound { kind, vmid }) => {
            assert_eq!(kind, GuestKind::Container);
            assert_eq!(vmid, 101);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_resolve_host_of_compares_ids_numerically() {
    let mut api = MockClusterApi::new();
    api.expect_cluster_resources().times(1).returning(|| {
        Ok(resources(serde_json::json!([
            {"type": "qemu", "vmid": "102", "node": "alpha"}
        ])))
    });

    let resolver = NodeResolver::new(Arc::new(api), None);
    let host = resolver
        .resolve_host_of(Vmid::parse("102").unwrap(), GuestKind::VirtualMachine)
        .await
        .unwrap();
    assert_eq!(host, "alpha");
}

#[tokio::test]
async fn test_resolve_host_of_unknown_guest() {
    let mut api = MockClusterApi::new();
    api.expect_cluster_resources()
        .times(1)
        .returning(|| Ok(Vec::new()));

    let resolver = NodeResolver::new(Arc::new(api), None);
    let result = resolver
        .resolve_host_of(Vmid::new_unchecked(999), GuestKind::VirtualMachine)
        .await;
    assert!(matches!(result, Err(DashError::GuestNotFound { .. })));
}
