use crate::{
    ClusterMode, DashError, GuestAction, GuestKind, GuestService, Vmid, VmAction,
    core::infrastructure::cluster_api::MockClusterApi,
    tests::support::{create_test_service, mount_cluster_resources, task_body},
};
use std::sync::Arc;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

#[tokio::test]
async fn test_container_action_targets_host_node() {
    let mock_server = MockServer::start().await;
    mount_cluster_resources(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/alpha/lxc/101/status/start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_body("alpha", "vz", 101, "start")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, Some("gamma"), ClusterMode::Cluster);

    let task = service
        .perform_action(GuestKind::Container, Vmid::new_unchecked(101), "start", None)
        .await
        .unwrap();

    assert_eq!(task, task_body("alpha", "vz", 101, "start"));
}

#[tokio::test]
async fn test_explicit_node_overrides_host_lookup() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api2/json/cluster/resources"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/beta/lxc/101/status/start"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_body("beta", "vz", 101, "start")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, None, ClusterMode::Cluster);

    let result = service
        .perform_action(
            GuestKind::Container,
            Vmid::new_unchecked(101),
            "start",
            Some("beta"),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_vm_suspend_always_goes_to_disk() {
    let mock_server = MockServer::start().await;
    mount_cluster_resources(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/alpha/qemu/102/status/suspend"))
        .and(query_param("todisk", "1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_body("alpha", "qm", 102, "suspend")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, None, ClusterMode::Cluster);

    let result = service
        .perform_action(
            GuestKind::VirtualMachine,
            Vmid::new_unchecked(102),
            "suspend",
            None,
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_unsupported_action_is_not_forwarded() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, None, ClusterMode::Cluster);

    let suspend = service
        .perform_action(GuestKind::Container, Vmid::new_unchecked(101), "suspend", None)
        .await;
    let destroy = service
        .perform_action(
            GuestKind::VirtualMachine,
            Vmid::new_unchecked(100),
            "destroy",
            Some("beta"),
        )
        .await;

    assert!(matches!(suspend, Err(DashError::UnsupportedAction { .. })));
    assert!(matches!(destroy, Err(DashError::UnsupportedAction { .. })));
}

#[tokio::test]
async fn test_unknown_guest_is_not_forwarded() {
    let mock_server = MockServer::start().await;
    mount_cluster_resources(&mock_server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, None, ClusterMode::Cluster);

    // 100 is a VM, not a container
    let result = service
        .perform_action(GuestKind::Container, Vmid::new_unchecked(100), "stop", None)
        .await;

    assert!(matches!(
        result,
        Err(DashError::GuestNotFound { vmid: 100, .. })
    ));
}

#[tokio::test]
async fn test_upstream_conflict_is_relayed() {
    let mock_server = MockServer::start().await;
    mount_cluster_resources(&mock_server).await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/beta/qemu/100/status/shutdown"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "data": null,
            "errors": {"vmid": "VM 100 not running"}
        })))
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, None, ClusterMode::Cluster);

    let result = service
        .perform_action(
            GuestKind::VirtualMachine,
            Vmid::new_unchecked(100),
            "shutdown",
            None,
        )
        .await;

    match result {
        Err(DashError::UpstreamRejected { status, body }) => {
            assert_eq!(status, 409);
            assert_eq!(body["errors"]["vmid"], "VM 100 not running");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_single_node_mode_acts_on_dashboard_node() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api2/json/nodes/pve1/lxc/101/status/reboot"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(task_body("pve1", "vz", 101, "reboot")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    let service = create_test_service(&mock_server, Some("pve1"), ClusterMode::SingleNode);

    let result = service
        .perform_action(GuestKind::Container, Vmid::new_unchecked(101), "reboot", None)
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_action_reaches_cluster_api_unchanged() {
    let mut api = MockClusterApi::new();
    api.expect_cluster_resources().times(0);
    api.expect_change_status()
        .withf(|node, vmid, action| {
            node.to_string() == "pve3"
                && vmid.get() == 250
                && *action == GuestAction::Vm(VmAction::Shutdown)
        })
        .times(1)
        .returning(|_, _, _| Ok(serde_json::json!({"data": "UPID:pve3:shutdown"})));
    let service = GuestService::with_mode(Arc::new(api), None, ClusterMode::Cluster);

    let task = service
        .perform_action(
            GuestKind::VirtualMachine,
            Vmid::new_unchecked(250),
            "shutdown",
            Some("pve3"),
        )
        .await
        .unwrap();

    assert_eq!(task["data"], "UPID:pve3:shutdown");
}
