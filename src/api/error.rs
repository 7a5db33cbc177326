use super::response::ErrorResponse;
use crate::core::domain::error::DashError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

impl IntoResponse for DashError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        error!(status = status.as_u16(), error = %self, "api error");

        (
            status,
            Json(ErrorResponse {
                ok: false,
                error: self.error_payload(),
            }),
        )
            .into_response()
    }
}
