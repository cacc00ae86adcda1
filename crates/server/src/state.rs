// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared server state.
//!
//! Wraps the board database for use from async handlers. SQLite calls block,
//! so every database closure runs on the blocking pool.

use std::sync::{Arc, Mutex};

use kb_core::Database;

use crate::config::Config;
use crate::error::{ApiError, Result};

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Database>>,
}

impl AppState {
    /// Opens (creating if needed) the database under the configured data dir.
    pub fn open(config: &Config) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let mut db = Database::open(&config.db_path())?;
        db.set_busy_timeout(config.busy_timeout())?;
        db.max_retries = config.max_retries;
        Ok(Self::from_database(db))
    }

    pub fn from_database(db: Database) -> Self {
        AppState {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Runs `f` against the database on the blocking pool.
    pub async fn with_db<T, F>(&self, f: F) -> std::result::Result<T, ApiError>
    where
        F: FnOnce(&mut Database) -> kb_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || {
            let mut guard = db
                .lock()
                .map_err(|_| ApiError::Internal("database mutex poisoned".to_string()))?;
            f(&mut *guard).map_err(ApiError::from)
        })
        .await
        .map_err(|e| ApiError::Internal(format!("database task failed: {e}")))?
    }
}
