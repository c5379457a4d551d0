//! Response bodies and error mapping.
//!
//! # Design Decisions
//! - Every response body is JSON with a `status` field
//! - Malformed payloads are client errors (400)
//! - Storage failures are server errors (500) and carry the diagnostic message

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::notification::NormalizeError;
use crate::writer::WriteError;

/// Acknowledgement returned for a logged notification.
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
    pub message: &'static str,
}

impl Ack {
    pub fn logged() -> Self {
        Self {
            status: "success",
            message: "Notification logged",
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Malformed(#[from] NormalizeError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Malformed(_) => StatusCode::BAD_REQUEST,
            ApiError::Write(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
