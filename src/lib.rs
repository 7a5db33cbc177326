//! lxcdash: a thin dashboard and control surface for a Proxmox VE cluster.
//!
//! The crate lists LXC containers and QEMU virtual machines and forwards
//! start/stop/reboot/shutdown/suspend actions to the Proxmox REST API,
//! resolving which cluster node owns a given guest.
//!
//! # Examples
//!
//! ```no_run
//! use lxcdash::{ApiClient, AppState, DashConfig, DashResult, GuestService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> DashResult<()> {
//!     let (config, _) = DashConfig::load(None).await?;
//!     let client = ApiClient::new(config.connection()?, config.timeout())?;
//!     let guests = GuestService::new(Arc::new(client), &config);
//!
//!     for guest in guests.list_guests(lxcdash::GuestKind::Container).await? {
//!         println!("{} {} on {}", guest.id, guest.display_name, guest.host_node);
//!     }
//!
//!     let app = lxcdash::router(AppState::new(guests), config.web_dir.clone());
//!     let listener = tokio::net::TcpListener::bind(config.listen_addr()?).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//!     Ok(())
//! }
//! ```

mod api;
mod config;
mod core;
mod guests;

pub use crate::api::{
    AppState, NodeOverride,
    response::{ActionResponse, ErrorResponse, GuestListResponse, NodeResponse, PingResponse},
    router,
};
pub use crate::config::{CONFIG_PATHS, ClusterMode, DashConfig};
pub use crate::core::{
    domain::{
        error::{DashError, DashResult, ValidationError},
        model::{
            cluster_resource::{ClusterResource, GuestResource},
            guest::{ContainerAction, Guest, GuestAction, GuestKind, VmAction},
            node_guest::NodeGuestItem,
            node_list_item::{Node, NodeListItem},
            proxmox_connection::ProxmoxConnection,
        },
        value_object::{ProxmoxApiToken, ProxmoxHost, ProxmoxPort, Vmid},
    },
    infrastructure::{
        api_client::{ApiClient, DEFAULT_TIMEOUT},
        cluster_api::ClusterApi,
    },
};
pub use crate::guests::application::service::{
    guest_service::GuestService,
    node_resolver::{NodeResolver, pick_default_node},
};

#[cfg(test)]
mod tests;
