//! Domain model for guests (LXC containers and QEMU virtual machines).
//!
//! Upstream records come in several shapes depending on the endpoint they were
//! fetched from. Each shape has exactly one mapping function into [`Guest`], so
//! upstream field names never leak into the rest of the crate.

use crate::core::domain::{
    error::{DashError, DashResult},
    model::{cluster_resource::GuestResource, node_guest::NodeGuestItem},
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two kinds of guest a Proxmox node can host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum GuestKind {
    /// An LXC container.
    #[serde(rename = "lxc")]
    Container,
    /// A QEMU virtual machine.
    #[serde(rename = "qemu")]
    VirtualMachine,
}

impl GuestKind {
    /// Path segment used by the Proxmox API for this kind (`lxc` or `qemu`).
    pub fn api_segment(&self) -> &'static str {
        match self {
            GuestKind::Container => "lxc",
            GuestKind::VirtualMachine => "qemu",
        }
    }

    /// Prefix of synthesized display names (`ct` or `vm`).
    pub fn name_prefix(&self) -> &'static str {
        match self {
            GuestKind::Container => "ct",
            GuestKind::VirtualMachine => "vm",
        }
    }

    /// Display name used when upstream omits one, e.g. `ct105`.
    pub fn default_name(&self, vmid: u32) -> String {
        format!("{}{}", self.name_prefix(), vmid)
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}

/// A guest as served to dashboard clients.
///
/// The wire names (`vmid`, `name`, `status`, `node`, `type`) are the ones the
/// browser front end reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Guest {
    /// Cluster-scoped guest identifier.
    #[serde(rename = "vmid")]
    pub id: u32,
    /// Container or virtual machine.
    #[serde(rename = "type")]
    pub kind: GuestKind,
    /// Human-readable name, synthesized as `<prefix><id>` when absent.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Run state as reported upstream (`running`, `stopped`, ...). Opaque.
    #[serde(rename = "status")]
    pub run_state: String,
    /// Node currently hosting the guest. May be stale after a migration.
    #[serde(rename = "node")]
    pub host_node: String,
}

impl Guest {
    /// Maps a `/cluster/resources` record.
    pub fn from_cluster_resource(kind: GuestKind, resource: &GuestResource) -> Self {
        Self {
            id: resource.vmid,
            kind,
            display_name: display_name_or_default(resource.name.as_deref(), kind, resource.vmid),
            run_state: resource.status.clone().unwrap_or_default(),
            host_node: resource.node.clone(),
        }
    }

    /// Maps a `/nodes/{node}/lxc` or `/nodes/{node}/qemu` record.
    ///
    /// Per-node listings do not always repeat the node name, so the node the
    /// listing was fetched from is used as fallback.
    pub fn from_node_listing(kind: GuestKind, node: &str, item: &NodeGuestItem) -> Self {
        Self {
            id: item.vmid,
            kind,
            display_name: display_name_or_default(item.name.as_deref(), kind, item.vmid),
            run_state: item.status.clone().unwrap_or_default(),
            host_node: item.node.clone().unwrap_or_else(|| node.to_string()),
        }
    }
}

fn display_name_or_default(name: Option<&str>, kind: GuestKind, vmid: u32) -> String {
    match name {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => kind.default_name(vmid),
    }
}

/// Status changes accepted for LXC containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Reboot,
}

impl FromStr for ContainerAction {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(ContainerAction::Start),
            "stop" => Ok(ContainerAction::Stop),
            "reboot" => Ok(ContainerAction::Reboot),
            other => Err(DashError::UnsupportedAction {
                kind: GuestKind::Container,
                action: other.to_string(),
            }),
        }
    }
}

/// Status changes accepted for QEMU virtual machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmAction {
    Start,
    Shutdown,
    Suspend,
    Reboot,
}

impl FromStr for VmAction {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(VmAction::Start),
            "shutdown" => Ok(VmAction::Shutdown),
            "suspend" => Ok(VmAction::Suspend),
            "reboot" => Ok(VmAction::Reboot),
            other => Err(DashError::UnsupportedAction {
                kind: GuestKind::VirtualMachine,
                action: other.to_string(),
            }),
        }
    }
}

/// A validated status change for a guest of a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestAction {
    Container(ContainerAction),
    Vm(VmAction),
}

impl GuestAction {
    /// Parses an action name against the closed action set of `kind`.
    ///
    /// # Errors
    /// Returns `DashError::UnsupportedAction` for names outside that set.
    pub fn parse(kind: GuestKind, action: &str) -> DashResult<Self> {
        match kind {
            GuestKind::Container => action.parse().map(GuestAction::Container),
            GuestKind::VirtualMachine => action.parse().map(GuestAction::Vm),
        }
    }

    pub fn kind(&self) -> GuestKind {
        match self {
            GuestAction::Container(_) => GuestKind::Container,
            GuestAction::Vm(_) => GuestKind::VirtualMachine,
        }
    }

    /// Last path segment of the upstream `status/{action}` call.
    pub fn api_segment(&self) -> &'static str {
        match self {
            GuestAction::Container(ContainerAction::Start) | GuestAction::Vm(VmAction::Start) => {
                "start"
            }
            GuestAction::Container(ContainerAction::Stop) => "stop",
            GuestAction::Container(ContainerAction::Reboot) | GuestAction::Vm(VmAction::Reboot) => {
                "reboot"
            }
            GuestAction::Vm(VmAction::Shutdown) => "shutdown",
            GuestAction::Vm(VmAction::Suspend) => "suspend",
        }
    }

    /// Fixed query parameters sent with the action.
    ///
    /// Suspend always hibernates to disk; suspend-to-RAM is never requested.
    pub fn query(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            GuestAction::Vm(VmAction::Suspend) => &[("todisk", "1")],
            _ => &[],
        }
    }
}

impl fmt::Display for GuestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}
