use crate::{
    ApiClient, ClusterMode, DEFAULT_TIMEOUT, GuestService, ProxmoxApiToken, ProxmoxConnection,
};
use std::sync::Arc;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub(crate) fn create_test_client(server_url: &str) -> ApiClient {
    let token = ProxmoxApiToken::new_unchecked("root@pam", "lxcdash", "secret");
    let url = Url::parse(server_url).unwrap();
    ApiClient::new(ProxmoxConnection::with_url(url, token), DEFAULT_TIMEOUT).unwrap()
}

pub(crate) fn create_test_service(
    mock_server: &MockServer,
    default_node: Option<&str>,
    mode: ClusterMode,
) -> GuestService {
    let client = create_test_client(&mock_server.uri());
    GuestService::with_mode(Arc::new(client), default_node.map(str::to_string), mode)
}

/// Two containers and two VMs spread over `alpha` and `beta`, plus a storage entry.
pub(crate) fn cluster_resources_body() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {"type": "lxc", "vmid": 101, "node": "alpha", "id": "lxc/101", "name": "web", "status": "running"},
            {"type": "qemu", "vmid": 100, "node": "beta", "id": "qemu/100", "name": "ubuntu-vm", "status": "stopped"},
            {"type": "lxc", "vmid": 105, "node": "beta", "id": "lxc/105", "status": "stopped"},
            {"type": "storage", "storage": "local", "node": "alpha", "id": "storage/local", "status": "available"},
            {"type": "qemu", "vmid": "102", "node": "alpha", "id": "qemu/102", "status": "running"}
        ]
    })
}

pub(crate) async fn mount_cluster_resources(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api2/json/cluster/resources"))
        .and(query_param("type", "vm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cluster_resources_body()))
        .mount(mock_server)
        .await;
}

pub(crate) fn task_body(node: &str, kind: &str, vmid: u32, action: &str) -> serde_json::Value {
    serde_json::json!({
        "data": format!("UPID:{}:000A1B2C:0123ABCD:65A1B2C3:{}{}:{}:root@pam!lxcdash:", node, kind, action, vmid)
    })
}
