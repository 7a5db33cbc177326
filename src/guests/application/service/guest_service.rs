use crate::{
    config::{ClusterMode, DashConfig},
    core::{
        domain::{
            error::DashResult,
            model::guest::{Guest, GuestAction, GuestKind},
            value_object::Vmid,
        },
        infrastructure::cluster_api::ClusterApi,
    },
    guests::application::service::node_resolver::NodeResolver,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Lists guests and forwards status changes to the cluster.
///
/// The service holds no mutable state. Concurrent calls, including two
/// actions on the same guest, reach the cluster unordered, exactly as if
/// they had been sent to the Proxmox API directly.
pub struct GuestService {
    api: Arc<dyn ClusterApi>,
    resolver: NodeResolver,
    mode: ClusterMode,
}

impl GuestService {
    /// Creates the service from the process configuration.
    pub fn new(api: Arc<dyn ClusterApi>, config: &DashConfig) -> Self {
        Self::with_mode(
            api,
            config.default_node().map(str::to_string),
            config.mode,
        )
    }

    pub fn with_mode(
        api: Arc<dyn ClusterApi>,
        default_node: Option<String>,
        mode: ClusterMode,
    ) -> Self {
        Self {
            resolver: NodeResolver::new(Arc::clone(&api), default_node),
            api,
            mode,
        }
    }

    /// Name of the node the dashboard presents as "its" node.
    pub async fn node_name(&self) -> DashResult<String> {
        self.resolver.resolve_node(None).await
    }

    /// Lists every guest of `kind`, in the order upstream returns them.
    ///
    /// In cluster mode this is one `/cluster/resources` call filtered by kind;
    /// in single-node mode one per-node listing call on the resolved node.
    pub async fn list_guests(&self, kind: GuestKind) -> DashResult<Vec<Guest>> {
        let guests: Vec<Guest> = match self.mode {
            ClusterMode::Cluster => self
                .api
                .cluster_resources()
                .await?
                .iter()
                .filter_map(|resource| resource.as_guest())
                .filter(|(resource_kind, _)| *resource_kind == kind)
                .map(|(kind, guest)| Guest::from_cluster_resource(kind, guest))
                .collect(),
            ClusterMode::SingleNode => {
                let node = self.resolver.resolve_node(None).await?;
                self.api
                    .node_guests(&node, kind)
                    .await?
                    .iter()
                    .map(|item| Guest::from_node_listing(kind, &node, item))
                    .collect()
            }
        };

        debug!(%kind, count = guests.len(), "listed guests");
        Ok(guests)
    }

    /// Sends `action` for guest `vmid` of `kind` and returns the upstream task
    /// descriptor uninterpreted.
    ///
    /// The action is checked against the closed action set of the kind before
    /// anything is sent. The target node is `explicit_node` when given,
    /// otherwise the guest's host node (cluster mode) or the dashboard's node
    /// (single-node mode). No check is made that the transition makes sense
    /// for the guest's current state.
    ///
    /// # Errors
    /// Returns `DashError::UnsupportedAction` for an action outside the kind's
    /// set, resolution errors, or the upstream error verbatim.
    pub async fn perform_action(
        &self,
        kind: GuestKind,
        vmid: Vmid,
        action: &str,
        explicit_node: Option<&str>,
    ) -> DashResult<serde_json::Value> {
        let action = GuestAction::parse(kind, action)?;
        let explicit_node = explicit_node.filter(|node| !node.is_empty());

        let node = match (explicit_node, self.mode) {
            (Some(node), _) => node.to_string(),
            (None, ClusterMode::Cluster) => self.resolver.resolve_host_of(vmid, kind).await?,
            (None, ClusterMode::SingleNode) => self.resolver.resolve_node(None).await?,
        };

        info!(%kind, %vmid, %action, node = %node, "forwarding guest action");
        self.api.change_status(&node, vmid, action).await
    }
}
