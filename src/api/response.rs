//! Response bodies of the dashboard API.

use crate::core::domain::model::guest::Guest;
use serde::{Deserialize, Serialize};

/// `GET /api/ping`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PingResponse {
    pub ok: bool,
}

/// `GET /api/node`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeResponse {
    pub node: String,
}

/// `GET /api/containers` and `GET /api/vms`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GuestListResponse {
    pub data: Vec<Guest>,
}

/// Successful guest action. `task` is the upstream body, uninterpreted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ActionResponse {
    pub ok: bool,
    pub task: serde_json::Value,
}

/// Failure envelope. `error` is a message or the upstream error body.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: serde_json::Value,
}
