// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kb-server: HTTP front end for the kanban board store.
//!
//! Exposes board, column and task operations over JSON. Ordering mutations
//! (`PUT /boards/{boardId}/column-order`, `PATCH /tasks/{taskId}/move`) run
//! as single store transactions in kb-core.

pub mod auth;
pub mod config;
pub mod error;
pub mod lock;
pub mod routes;
pub mod state;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;

pub use config::Config;
pub use error::{ApiError, Error, Result};
pub use state::AppState;

/// Builds the kbd router over `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/boards", post(routes::create_board))
        .route("/boards/{board_id}", get(routes::get_board))
        .route("/boards/{board_id}/column-order", put(routes::reorder_columns))
        .route("/boards/{board_id}/members", post(routes::add_member))
        .route("/boards/{board_id}/columns", post(routes::create_column))
        .route("/columns/{column_id}", delete(routes::delete_column))
        .route("/columns/{column_id}/lock", patch(routes::lock_column))
        .route("/columns/{column_id}/tasks", post(routes::create_task))
        .route("/tasks/{task_id}", delete(routes::delete_task))
        .route("/tasks/{task_id}/move", patch(routes::move_task))
        .with_state(state)
}
