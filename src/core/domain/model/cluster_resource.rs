//! Domain models for cluster-wide resources.
//!
//! This module defines the structures returned by the `/cluster/resources` endpoint.
//! The response contains a heterogeneous list of resources (VMs, containers, storage, etc.),
//! each identified by a `type` field. We model this as an enum to provide type safety.

use crate::core::domain::{model::guest::GuestKind, value_object::serde_helpers};
use serde::{Deserialize, Serialize};

/// A resource discovered in the Proxmox cluster.
///
/// Only guests are of interest here; storage, node, pool and SDN entries
/// collapse into [`ClusterResource::Other`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClusterResource {
    /// A QEMU virtual machine.
    Qemu(GuestResource),
    /// An LXC container.
    Lxc(GuestResource),
    /// Any other resource type.
    #[serde(other)]
    Other,
}

impl ClusterResource {
    /// Returns the guest record and its kind, if this resource is a guest.
    pub fn as_guest(&self) -> Option<(GuestKind, &GuestResource)> {
        match self {
            ClusterResource::Qemu(vm) => Some((GuestKind::VirtualMachine, vm)),
            ClusterResource::Lxc(ct) => Some((GuestKind::Container, ct)),
            ClusterResource::Other => None,
        }
    }
}

/// A guest entry of the cluster resource list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuestResource {
    /// The guest identifier. Accepted as number or numeric string.
    #[serde(deserialize_with = "serde_helpers::vmid::deserialize")]
    pub vmid: u32,
    /// The Proxmox node where this guest resides.
    pub node: String,
    /// Human-readable name (may be absent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Guest status (e.g., `running`, `stopped`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Unique resource identifier (e.g., `qemu/100`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Uptime in seconds (if applicable).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
}
