//! Error → HTTP response mapping.
//!
//! # Design Decisions
//! - Every failure answers with a JSON body `{"error": "..."}`
//! - Client errors (missing parameters) are 400
//! - A non-200 upstream is a 500 with a fixed message per operation
//! - An unreachable upstream or unusable upstream payload is a 502
//! - An upstream still pending at the request deadline is a 504

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::gateway::GatewayError;

/// JSON error body returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// HTTP status for a gateway failure.
pub fn status_for(error: &GatewayError) -> StatusCode {
    match error {
        GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
        GatewayError::UpstreamStatus { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        GatewayError::UpstreamShape { .. } | GatewayError::Transport { .. } => {
            StatusCode::BAD_GATEWAY
        }
        GatewayError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(ErrorBody::new(self.client_message()))).into_response()
    }
}
