//! HTTP error responses

use crate::plod::PlodError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced by the route handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Resolution failed inside the P-LOD resolver
    #[error(transparent)]
    Resolve(#[from] PlodError),

    /// Query string could not be decoded
    #[error(transparent)]
    Query(#[from] QueryRejection),

    /// Route matched but the path shape is not served
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ApiError {
    /// Status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Resolve(PlodError::InvalidIdentifier { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Resolve(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
