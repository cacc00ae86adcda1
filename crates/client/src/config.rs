// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration.

use std::time::Duration;

/// Default time a mutation may take before it is treated as failed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the server lives and who is calling it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root, e.g. `http://127.0.0.1:7891`.
    pub base_url: String,
    pub user_id: String,
    pub email: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_id: user_id.into(),
            email: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
