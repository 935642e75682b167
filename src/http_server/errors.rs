//! # Gateway Errors
//!
//! Maps core errors onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::UnknownView;
use crate::filter::FilterError;
use crate::store::StoreError;

/// Result type for gateway handlers
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors surfaced by the query gateway
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Filter parameters failed validation
    #[error("{}", .0.message())]
    InvalidFilter(#[from] FilterError),

    /// No view with this name
    #[error("{0}")]
    UnknownView(#[from] UnknownView),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Dataset not loaded yet
    #[error("{}", .0.message())]
    NotReady(#[from] StoreError),

    /// Query task panicked or was cancelled
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            GatewayError::UnknownView(_) => StatusCode::NOT_FOUND,
            GatewayError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, when the core error carries one
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            GatewayError::InvalidFilter(e) => Some(e.code().code()),
            GatewayError::NotReady(e) => Some(e.code().code()),
            _ => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
}

impl From<GatewayError> for ErrorResponse {
    fn from(err: GatewayError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error_code: err.error_code(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
