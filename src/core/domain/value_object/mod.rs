mod proxmox_api_token;
mod proxmox_host;
mod proxmox_port;
pub mod serde_helpers;
mod vmid;

pub use proxmox_api_token::ProxmoxApiToken;
pub use proxmox_host::ProxmoxHost;
pub use proxmox_port::ProxmoxPort;
pub use vmid::Vmid;

// Re-export validation functions for internal use
pub(crate) use proxmox_api_token::validate_api_token;
pub(crate) use proxmox_host::validate_host;
pub(crate) use proxmox_port::validate_port;
