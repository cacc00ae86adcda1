// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for kb-client.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] kb_core::Error),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid gesture: {0}")]
    InvalidGesture(String),
}

/// A specialized Result type for kb-client operations.
pub type Result<T> = std::result::Result<T, Error>;
