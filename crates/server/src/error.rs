// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for kbd.
//!
//! [`Error`] covers startup (configuration, data directory, lock file).
//! [`ApiError`] is what a handler returns; it renders as an HTTP status plus a
//! failed [`Envelope`].

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use kb_core::{Envelope, ErrorKind};

/// Message returned for both missing and inaccessible entities, so callers
/// cannot discover IDs they are not allowed to see.
pub const NOT_FOUND_MESSAGE: &str = "not found or you do not have permission";

const INTERNAL_MESSAGE: &str = "internal server error";

/// Startup errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("another kbd instance is already serving {0}")]
    Locked(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] kb_core::Error),
}

/// A specialized Result type for kbd startup.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of a single request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing x-user-id header")]
    Unauthorized,

    #[error("invalid request body: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Core(#[from] kb_core::Error),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(e) => match e.kind() {
                ErrorKind::NotFound | ErrorKind::Forbidden => StatusCode::NOT_FOUND,
                ErrorKind::InvalidPermutation
                | ErrorKind::InvalidTarget
                | ErrorKind::InvalidOrder
                | ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ErrorKind::TransactionConflict => StatusCode::CONFLICT,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message shown to the caller.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::NOT_FOUND => NOT_FOUND_MESSAGE.to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::INTERNAL_SERVER_ERROR => tracing::error!(error = %self, "request failed"),
            StatusCode::CONFLICT => tracing::warn!(error = %self, "request conflicted"),
            _ => tracing::debug!(error = %self, status = status.as_u16(), "request rejected"),
        }
        let body: Envelope<()> = Envelope::error(self.public_message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
