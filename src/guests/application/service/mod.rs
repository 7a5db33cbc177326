pub mod guest_service;
pub mod node_resolver;
