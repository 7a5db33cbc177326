use crate::core::{
    domain::{
        error::{DashError, DashResult},
        model::{guest::GuestKind, node_list_item::Node},
        value_object::Vmid,
    },
    infrastructure::cluster_api::ClusterApi,
};
use std::sync::Arc;
use tracing::debug;

/// Decides which cluster node a request targets.
///
/// Nothing is cached: every resolution that needs cluster data queries the
/// cluster again, so a guest that migrated between two calls is found on its
/// new node.
pub struct NodeResolver {
    api: Arc<dyn ClusterApi>,
    default_node: Option<String>,
}

impl NodeResolver {
    pub fn new(api: Arc<dyn ClusterApi>, default_node: Option<String>) -> Self {
        Self {
            api,
            default_node: default_node
                .map(|node| node.trim().to_string())
                .filter(|node| !node.is_empty()),
        }
    }

    /// The statically configured node, if any.
    pub fn default_node(&self) -> Option<&str> {
        self.default_node.as_deref()
    }

    /// Resolves the node for a request that is not tied to one guest.
    ///
    /// Precedence: the explicit node (returned as given, without validation),
    /// then the configured default, then the first online cluster node, then
    /// the first cluster node at all.
    ///
    /// # Errors
    /// Returns `DashError::NoNodesAvailable` if the cluster reports no nodes,
    /// or the upstream error if the node list cannot be fetched.
    pub async fn resolve_node(&self, explicit: Option<&str>) -> DashResult<String> {
        if let Some(node) = explicit.filter(|node| !node.is_empty()) {
            debug!(node, "using explicit node");
            return Ok(node.to_string());
        }

        if let Some(node) = &self.default_node {
            debug!(node = %node, "using configured node");
            return Ok(node.clone());
        }

        let nodes: Vec<Node> = self.api.nodes().await?.iter().map(Node::from).collect();
        let node = pick_default_node(&nodes)?;
        debug!(node = %node, candidates = nodes.len(), "auto-detected node");
        Ok(node)
    }

    /// Finds the node currently hosting guest `vmid` of the given kind.
    ///
    /// Scans the whole cluster resource list; cost is linear in the number of
    /// guests in the cluster.
    ///
    /// # Errors
    /// Returns `DashError::GuestNotFound` if no guest matches both id and kind.
    pub async fn resolve_host_of(&self, vmid: Vmid, kind: GuestKind) -> DashResult<String> {
        let resources = self.api.cluster_resources().await?;

        let host = resources
            .iter()
            .filter_map(|resource| resource.as_guest())
            .find(|(resource_kind, guest)| *resource_kind == kind && guest.vmid == vmid.get())
            .map(|(_, guest)| guest.node.clone())
            .ok_or(DashError::GuestNotFound {
                kind,
                vmid: vmid.get(),
            })?;

        debug!(%vmid, %kind, node = %host, "resolved host node");
        Ok(host)
    }
}

/// Picks the first online node, else the first node of the list.
///
/// # Errors
/// Returns `DashError::NoNodesAvailable` for an empty list.
pub fn pick_default_node(nodes: &[Node]) -> DashResult<String> {
    nodes
        .iter()
        .find(|node| node.online)
        .or_else(|| nodes.first())
        .map(|node| node.name.clone())
        .ok_or(DashError::NoNodesAvailable)
}
