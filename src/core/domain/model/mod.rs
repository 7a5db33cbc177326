pub mod cluster_resource;
pub mod guest;
pub mod node_guest;
pub mod node_list_item;
pub mod proxmox_connection;
