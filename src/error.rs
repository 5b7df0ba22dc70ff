use std::fmt::Display;

use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub mod codes {
    pub const CHANNEL_NAME_REQUIRED: &str = "channelName required";
    pub const TOKEN_GENERATION_FAILED: &str = "token_generation_failed";
    pub const MISSING_CALL_FIELDS: &str = "Missing calleeId or channelName";
    pub const CALLEE_NOT_FOUND: &str = "Callee not found";
    pub const CALLEE_PUSH_TOKEN_MISSING: &str = "callee FCM token missing";
    pub const CALL_FAILED: &str = "call_failed";
}

/// Errors a handler can answer with. The carried code is the only thing the
/// caller ever sees.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    BadRequest(&'static str),
    NotFound(&'static str),
    Internal(&'static str),
}

impl AppError {
    /// Collapses a collaborator failure into an `Internal` error, logging the
    /// source so the detail stays server-side.
    pub fn internal<E: Display>(code: &'static str, source: E) -> Self {
        tracing::error!(code, "Collaborator call failed: {}", source);
        AppError::Internal(code)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(code) | AppError::NotFound(code) | AppError::Internal(code) => {
                code
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse { error: self.code() });
        (self.status(), body).into_response()
    }
}

/// Failures of the token-signing collaborator.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("app id and app certificate must be 32 hexadecimal characters")]
    InvalidCredentials,
    #[error("token expiry {0} does not fit in 32 bits")]
    ExpiryOutOfRange(u64),
    #[error("channel name of {0} bytes is too long")]
    ChannelNameTooLong(usize),
    #[error("failed to compress token: {0}")]
    Compression(#[from] std::io::Error),
}

/// Failures of the document-store / push-messaging collaborator.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("firebase credentials are not configured")]
    NotConfigured,
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(String),
    #[error("failed to sign service account assertion: {0}")]
    Assertion(#[from] jsonwebtoken::errors::Error),
    #[error("{service} responded with {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },
    #[error("unexpected response from {0}")]
    Decode(&'static str),
}
