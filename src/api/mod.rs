//! JSON API consumed by the dashboard front end.
//!
//! Every handler is a thin adapter: it parses the path, delegates to
//! [`GuestService`] and wraps the result in the response envelope. Failures
//! are rendered by the `IntoResponse` impl in [`error`].

mod error;
pub mod response;

use crate::{
    core::domain::{
        error::{DashError, ValidationError},
        model::guest::GuestKind,
        value_object::Vmid,
    },
    guests::application::service::guest_service::GuestService,
};
use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    routing::{get, post},
};
use response::{ActionResponse, GuestListResponse, NodeResponse, PingResponse};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Shared, immutable state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub guests: Arc<GuestService>,
}

impl AppState {
    pub fn new(guests: GuestService) -> Self {
        Self {
            guests: Arc::new(guests),
        }
    }
}

/// Optional `?node=` override of action routes.
#[derive(Debug, Default, Deserialize)]
pub struct NodeOverride {
    pub node: Option<String>,
}

/// Builds the application router.
///
/// When `web_dir` is given, every path outside `/api` is served from it.
pub fn router(state: AppState, web_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/api/ping", get(ping))
        .route("/api/node", get(node))
        .route("/api/containers", get(list_containers))
        .route("/api/vms", get(list_vms))
        .route("/api/containers/{id}/{action}", post(container_action))
        .route("/api/vms/{id}/{action}", post(vm_action))
        .with_state(state);

    let app = match web_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
}

async fn ping() -> Json<PingResponse> {
    Json(PingResponse { ok: true })
}

async fn node(State(state): State<AppState>) -> Result<Json<NodeResponse>, DashError> {
    let node = state.guests.node_name().await?;
    Ok(Json(NodeResponse { node }))
}

async fn list_containers(
    State(state): State<AppState>,
) -> Result<Json<GuestListResponse>, DashError> {
    let data = state.guests.list_guests(GuestKind::Container).await?;
    Ok(Json(GuestListResponse { data }))
}

async fn list_vms(State(state): State<AppState>) -> Result<Json<GuestListResponse>, DashError> {
    let data = state.guests.list_guests(GuestKind::VirtualMachine).await?;
    Ok(Json(GuestListResponse { data }))
}

type ActionPath = Result<Path<(String, String)>, PathRejection>;
type ActionQuery = Result<Query<NodeOverride>, QueryRejection>;

async fn container_action(
    State(state): State<AppState>,
    path: ActionPath,
    query: ActionQuery,
) -> Result<Json<ActionResponse>, DashError> {
    guest_action(&state, GuestKind::Container, path, query).await
}

async fn vm_action(
    State(state): State<AppState>,
    path: ActionPath,
    query: ActionQuery,
) -> Result<Json<ActionResponse>, DashError> {
    guest_action(&state, GuestKind::VirtualMachine, path, query).await
}

/// Extractor failures are reported in the same envelope as every other error.
fn malformed_request(message: String) -> DashError {
    DashError::Validation(ValidationError::Format(message))
}

async fn guest_action(
    state: &AppState,
    kind: GuestKind,
    path: ActionPath,
    query: ActionQuery,
) -> Result<Json<ActionResponse>, DashError> {
    let Path((id, action)) = path.map_err(|rejection| malformed_request(rejection.body_text()))?;
    let Query(query) = query.map_err(|rejection| malformed_request(rejection.body_text()))?;
    let vmid = Vmid::parse(&id)?;
    let task = state
        .guests
        .perform_action(kind, vmid, &action, query.node.as_deref())
        .await?;
    Ok(Json(ActionResponse { ok: true, task }))
}
