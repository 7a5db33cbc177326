use crate::core::domain::model::guest::GuestKind;
use thiserror::Error;

/// The main error type for dashboard operations.
///
/// Every failure that can happen while resolving a node, listing guests or
/// forwarding an action ends up here. The HTTP layer turns each variant into
/// the `{ ok: false, error }` envelope using [`DashError::status_code`].
#[derive(Error, Debug)]
pub enum DashError {
    /// The Proxmox API could not be reached (network failure or timeout).
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while sending the request
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// The Proxmox API answered with a non-success status.
    ///
    /// # Fields
    /// * `status` - The HTTP status returned by the cluster
    /// * `body` - The response body, parsed as JSON when possible
    #[error("Upstream rejected request ({status}): {body}")]
    UpstreamRejected {
        status: u16,
        body: serde_json::Value,
    },

    /// The Proxmox API answered with a body that could not be decoded.
    #[error("Upstream payload error: {0}")]
    UpstreamPayload(String),

    /// The cluster resource scan found no guest with the given id and kind.
    #[error("No {kind} with vmid {vmid} found in the cluster")]
    GuestNotFound { kind: GuestKind, vmid: u32 },

    /// Node auto-detection received an empty node list.
    #[error("No nodes available in the cluster")]
    NoNodesAvailable,

    /// The requested action is not part of the closed action set of the kind.
    #[error("Action '{action}' is not supported for {kind}")]
    UnsupportedAction { kind: GuestKind, action: String },

    /// The configuration file is missing, unreadable or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents validation failures of request or configuration values
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DashError {
    /// HTTP status the error is reported with.
    ///
    /// Upstream rejections mirror the cluster's status; everything that has no
    /// upstream status falls back to `502 Bad Gateway`, and caller mistakes are
    /// `400 Bad Request`.
    pub fn status_code(&self) -> u16 {
        match self {
            DashError::UpstreamRejected { status, .. } => *status,
            DashError::UpstreamUnreachable(_)
            | DashError::UpstreamPayload(_)
            | DashError::GuestNotFound { .. }
            | DashError::NoNodesAvailable => 502,
            DashError::UnsupportedAction { .. } | DashError::Validation(_) => 400,
            DashError::Config(_) => 500,
        }
    }

    /// The `error` member of the JSON error envelope.
    ///
    /// Upstream rejections relay the cluster's body verbatim; every other
    /// variant is rendered as its message.
    pub fn error_payload(&self) -> serde_json::Value {
        match self {
            DashError::UpstreamRejected { body, .. } => body.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Type alias for Results that may fail with a DashError
pub type DashResult<T> = Result<T, DashError>;
