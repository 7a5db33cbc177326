pub mod api_client;
pub mod cluster_api;
