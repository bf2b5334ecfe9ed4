//! Error types for the Observer API server.
//!
//! [`ObserverError`] unifies all failure modes into a single enum that
//! can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use life_grid::GridError;

/// Errors that can occur in the Observer API layer.
#[derive(Debug, thiserror::Error)]
pub enum ObserverError {
    /// A grid coordinate or shape was rejected.
    #[error("{0}")]
    Grid(#[from] GridError),

    /// The request was well-formed but carried an unusable value.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request conflicts with the current run state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A serialization or deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The server was started without run control attached.
    #[error("run control not available")]
    ControlUnavailable,
}

impl IntoResponse for ObserverError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Grid(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::ControlUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
