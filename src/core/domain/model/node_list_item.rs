//! Domain model for node list items from the `/nodes` endpoint.
//!
//! This module defines the structure of a node as returned by the Proxmox API
//! when listing all nodes in the cluster.

use serde::{Deserialize, Serialize};

/// A node in the Proxmox cluster.
///
/// This struct represents a node as returned by the `/api2/json/nodes` endpoint.
/// Only the name and status matter for picking a default node; the usage
/// counters are kept for logging.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeListItem {
    /// The node name (e.g., "pve1").
    pub node: String,
    /// Current node status (e.g., "online", "offline", "unknown").
    #[serde(default)]
    pub status: String,
    /// CPU usage percentage (0.0 to 1.0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<f64>,
    /// System uptime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Unique node identifier (e.g., "node/pve1").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl NodeListItem {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// A cluster member host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub name: String,
    pub online: bool,
}

impl From<&NodeListItem> for Node {
    fn from(item: &NodeListItem) -> Self {
        Self {
            name: item.node.clone(),
            online: item.is_online(),
        }
    }
}
