//! The uniform response envelope and route-level error handling.
//!
//! Every route replies `{"status": "ok", "data": ...}` or
//! `{"status": "error", "error": "..."}`. Validation failures are the
//! caller's fault and map to 400 with the specific complaint; adapter
//! failures map to 500 with a generic message, the detail going to the
//! log rather than the response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rustore_client::ClientError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// A request rejected at the gateway boundary, before any adapter call.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("no {0} given")]
    Missing(&'static str),

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Anything a route handler can fail with.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Adapter(#[from] ClientError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Validation(err) => failure(StatusCode::BAD_REQUEST, err.to_string()),
            GatewayError::Adapter(err) => {
                error!("upstream call failed: {err}");
                failure(StatusCode::INTERNAL_SERVER_ERROR, "server error")
            }
        }
    }
}

#[derive(Serialize)]
struct OkEnvelope<T> {
    status: &'static str,
    data: T,
}

#[derive(Serialize)]
struct ErrorEnvelope {
    status: &'static str,
    error: String,
}

pub(crate) fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(OkEnvelope { status: "ok", data })).into_response()
}

pub(crate) fn failure(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            status: "error",
            error: error.into(),
        }),
    )
        .into_response()
}
