//! The slice of the Proxmox API the dashboard consumes.

use crate::core::domain::{
    error::DashResult,
    model::{
        cluster_resource::ClusterResource,
        guest::{GuestAction, GuestKind},
        node_guest::NodeGuestItem,
        node_list_item::NodeListItem,
    },
    value_object::Vmid,
};
use async_trait::async_trait;

/// Upstream operations used by the node resolver and the guest service.
///
/// [`ApiClient`](super::api_client::ApiClient) is the production
/// implementation; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// `GET /cluster/resources?type=vm`: every guest of every node.
    async fn cluster_resources(&self) -> DashResult<Vec<ClusterResource>>;

    /// `GET /nodes`: cluster members with their online status.
    async fn nodes(&self) -> DashResult<Vec<NodeListItem>>;

    /// `GET /nodes/{node}/lxc` or `GET /nodes/{node}/qemu`.
    async fn node_guests(&self, node: &str, kind: GuestKind) -> DashResult<Vec<NodeGuestItem>>;

    /// `POST /nodes/{node}/{kind}/{vmid}/status/{action}`.
    ///
    /// Returns the upstream body verbatim (the task descriptor).
    async fn change_status(
        &self,
        node: &str,
        vmid: Vmid,
        action: GuestAction,
    ) -> DashResult<serde_json::Value>;
}
