//! Domain models for per-node guest listings.
//!
//! This module defines the records returned by `/nodes/{node}/lxc` and
//! `/nodes/{node}/qemu`. Both endpoints share the fields the dashboard needs,
//! but the container listing reports `vmid` as a string while the VM listing
//! reports it as a number, and neither reliably repeats the node name.

use crate::core::domain::value_object::serde_helpers;
use serde::{Deserialize, Serialize};

/// A guest as returned by a per-node listing endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeGuestItem {
    /// The guest identifier (unique per cluster).
    #[serde(deserialize_with = "serde_helpers::vmid::deserialize")]
    pub vmid: u32,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Current status (e.g., "running", "stopped").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// The Proxmox node where this guest resides, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
    /// Guest type as reported by the container listing (`lxc`).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub guest_type: Option<String>,
    /// Uptime in seconds (if running).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uptime: Option<u64>,
    /// Additional tags (if any).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}
