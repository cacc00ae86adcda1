// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP handlers.
//!
//! Each handler resolves the principal, runs one core operation on the
//! blocking pool and wraps the result in an [`Envelope`].

use axum::extract::{FromRequest, Path, Request, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use kb_core::protocol::{
    AddMemberRequest, CreateBoardRequest, CreateColumnRequest, CreateTaskRequest,
    LockColumnRequest, MoveTaskRequest, ReorderColumnsRequest,
};
use kb_core::{Board, BoardDetail, Column, Envelope, MoveOutcome, Task};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

/// JSON request body whose rejection renders as a failed envelope.
pub struct Body<T>(pub T);

impl<S, T> FromRequest<S> for Body<T>
where
    Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Body(value))
    }
}

type Reply<T> = Result<Json<Envelope<T>>, ApiError>;
type Created<T> = Result<(StatusCode, Json<Envelope<T>>), ApiError>;

fn reply<T>(data: T, message: &str) -> Reply<T> {
    Ok(Json(Envelope::ok(data, message)))
}

fn created<T>(data: T, message: &str) -> Created<T> {
    Ok((StatusCode::CREATED, Json(Envelope::ok(data, message))))
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

/// Echo of a deleted entity.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: String,
}

pub async fn health() -> Reply<Health> {
    reply(
        Health {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        },
        "ok",
    )
}

pub async fn create_board(
    State(state): State<AppState>,
    principal: Principal,
    Body(request): Body<CreateBoardRequest>,
) -> Created<Board> {
    let board = state
        .with_db(move |db| db.create_board(&request.name, &principal.user_id))
        .await?;
    created(board, "Board created")
}

pub async fn get_board(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    principal: Principal,
) -> Reply<BoardDetail> {
    let detail = state
        .with_db(move |db| db.board_detail(&board_id, &principal.user_id))
        .await?;
    reply(detail, "Board fetched")
}

pub async fn reorder_columns(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    principal: Principal,
    Body(request): Body<ReorderColumnsRequest>,
) -> Reply<BoardDetail> {
    let detail = state
        .with_db(move |db| db.reorder_columns(&board_id, &request.column_ids, &principal.user_id))
        .await?;
    reply(detail, "Columns reordered")
}

pub async fn add_member(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    principal: Principal,
    Body(request): Body<AddMemberRequest>,
) -> Reply<Board> {
    let board = state
        .with_db(move |db| {
            db.add_member(&board_id, &request.user_id, request.role, &principal.user_id)
        })
        .await?;
    reply(board, "Member added")
}

pub async fn create_column(
    State(state): State<AppState>,
    Path(board_id): Path<String>,
    principal: Principal,
    Body(request): Body<CreateColumnRequest>,
) -> Created<Column> {
    let column = state
        .with_db(move |db| db.create_column(&board_id, &request.name, &principal.user_id))
        .await?;
    created(column, "Column created")
}

pub async fn lock_column(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    principal: Principal,
    Body(request): Body<LockColumnRequest>,
) -> Reply<Column> {
    let column = state
        .with_db(move |db| db.set_column_locked(&column_id, request.locked, &principal.user_id))
        .await?;
    let message = if column.locked {
        "Column locked"
    } else {
        "Column unlocked"
    };
    reply(column, message)
}

pub async fn delete_column(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    principal: Principal,
) -> Reply<Deleted> {
    let id = column_id.clone();
    state
        .with_db(move |db| db.delete_column(&column_id, &principal.user_id))
        .await?;
    reply(Deleted { id }, "Column deleted")
}

pub async fn create_task(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    principal: Principal,
    Body(request): Body<CreateTaskRequest>,
) -> Created<Task> {
    let task = state
        .with_db(move |db| db.create_task(&column_id, &request, &principal.user_id))
        .await?;
    created(task, "Task created")
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    principal: Principal,
) -> Reply<Deleted> {
    let id = task_id.clone();
    state
        .with_db(move |db| db.delete_task(&task_id, &principal.user_id))
        .await?;
    reply(Deleted { id }, "Task deleted")
}

pub async fn move_task(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
    principal: Principal,
    Body(request): Body<MoveTaskRequest>,
) -> Reply<MoveOutcome> {
    let outcome = state
        .with_db(move |db| {
            db.move_task(
                &task_id,
                &request.target_column_id,
                request.new_order,
                &principal.user_id,
            )
        })
        .await?;
    reply(outcome, "Task moved")
}
