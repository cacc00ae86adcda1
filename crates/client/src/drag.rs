// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Drag gestures with optimistic updates.
//!
//! A gesture moves through `Idle → Dragging → PendingConfirm` and ends as
//! `Reconciled` (server confirmed, its order applied) or `RolledBack` (request
//! failed, board refetched). The origin is captured when the drag begins and
//! cannot change afterwards. Because a [`DragGesture`] mutably borrows its
//! [`BoardController`], at most one gesture is in flight per board.

use std::future::Future;
use std::time::Duration;

use kb_core::Order;

use crate::api::BoardApi;
use crate::error::{Error, Result};
use crate::view::BoardState;

/// What is being dragged, and where it was when the drag began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOrigin {
    Column {
        column_id: String,
        index: usize,
    },
    Task {
        task_id: String,
        column_id: String,
        index: usize,
    },
}

/// Where the dragged item was released. Indices name the final position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Column { index: usize },
    Task { column_id: String, index: usize },
}

/// Locally applied result awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction {
    Columns(Order),
    Task {
        task_id: String,
        column_id: String,
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging(DragOrigin),
    PendingConfirm(Prediction),
    Reconciled,
    RolledBack,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped where it started; nothing was sent.
    NoOp,
    /// The server accepted the change and its order is now shown.
    Confirmed,
    /// The server refused or did not answer; the board was refetched.
    RolledBack { reason: String },
}

/// A board plus the API that owns its authoritative state.
pub struct BoardController<A: BoardApi> {
    api: A,
    state: BoardState,
    phase: DragPhase,
    stale: bool,
    timeout: Duration,
}

impl<A: BoardApi> BoardController<A> {
    /// Fetches `board_id` and wraps it in a controller.
    pub async fn load(api: A, board_id: &str, timeout: Duration) -> Result<Self> {
        let detail = with_timeout(timeout, api.fetch_board(board_id)).await?;
        Ok(BoardController {
            api,
            state: BoardState::new(detail),
            phase: DragPhase::Idle,
            stale: false,
            timeout,
        })
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// True when local state may diverge from the server and must be
    /// refetched before the next gesture.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Replaces local state with the server's.
    pub async fn refetch(&mut self) -> Result<()> {
        let board_id = self.state.board_id().to_string();
        let detail = with_timeout(self.timeout, self.api.fetch_board(&board_id)).await?;
        self.state.replace(detail);
        self.stale = false;
        Ok(())
    }

    /// Starts a gesture. `origin` must match the current local state.
    pub fn begin_drag(&mut self, origin: DragOrigin) -> Result<DragGesture<'_, A>> {
        if self.stale {
            return Err(Error::InvalidGesture(
                "board state is stale, refetch before dragging".to_string(),
            ));
        }
        let found = match &origin {
            DragOrigin::Column { column_id, index } => {
                self.state.column_order().position(column_id) == Some(*index)
            }
            DragOrigin::Task {
                task_id,
                column_id,
                index,
            } => self
                .state
                .locate_task(task_id)
                .is_some_and(|at| at.column_id == *column_id && at.index == *index),
        };
        if !found {
            return Err(Error::InvalidGesture(format!(
                "{origin:?} does not match the board"
            )));
        }

        tracing::debug!(?origin, "drag started");
        self.phase = DragPhase::Dragging(origin.clone());
        Ok(DragGesture {
            board: self,
            origin,
            finished: false,
        })
    }

    async fn complete(&mut self, origin: &DragOrigin, target: DropTarget) -> Result<DropOutcome> {
        match (origin, target) {
            (DragOrigin::Column { index, .. }, DropTarget::Column { index: to }) => {
                self.drop_column(*index, to).await
            }
            (
                DragOrigin::Task {
                    task_id,
                    column_id,
                    index,
                },
                DropTarget::Task {
                    column_id: target,
                    index: to,
                },
            ) => self.drop_task(task_id, column_id, *index, &target, to).await,
            _ => {
                self.phase = DragPhase::Idle;
                Err(Error::InvalidGesture(
                    "columns drop among columns and tasks drop into columns".to_string(),
                ))
            }
        }
    }

    async fn drop_column(&mut self, from: usize, to: usize) -> Result<DropOutcome> {
        let to = to.min(self.state.column_order().len().saturating_sub(1));
        if to == from {
            self.phase = DragPhase::Idle;
            return Ok(DropOutcome::NoOp);
        }

        let Some(order) = self.state.predict_reorder(from, to) else {
            self.phase = DragPhase::Idle;
            return Err(Error::InvalidGesture(format!("no column at {from}")));
        };
        self.phase = DragPhase::PendingConfirm(Prediction::Columns(order.clone()));

        let board_id = self.state.board_id().to_string();
        let result = with_timeout(
            self.timeout,
            self.api.reorder_columns(&board_id, order.as_slice()),
        )
        .await;
        match result {
            Ok(detail) => {
                self.state.replace(detail);
                self.phase = DragPhase::Reconciled;
                tracing::debug!(board = %board_id, order = %order, "column reorder confirmed");
                Ok(DropOutcome::Confirmed)
            }
            Err(e) => Ok(self.roll_back(e).await),
        }
    }

    async fn drop_task(
        &mut self,
        task_id: &str,
        from_column: &str,
        from: usize,
        target_column: &str,
        to: usize,
    ) -> Result<DropOutcome> {
        let Some(target_len) = self.state.task_order(target_column).map(Order::len) else {
            self.phase = DragPhase::Idle;
            return Err(Error::InvalidGesture(format!("unknown column {target_column}")));
        };

        let to = if target_column == from_column {
            // Once the task is lifted its own column may be empty.
            if target_len <= 1 {
                self.phase = DragPhase::Idle;
                return Ok(DropOutcome::NoOp);
            }
            let to = to.min(target_len - 1);
            if to == from {
                self.phase = DragPhase::Idle;
                return Ok(DropOutcome::NoOp);
            }
            to
        } else {
            to.min(target_len)
        };

        let Some(index) = self.state.predict_move(task_id, target_column, to) else {
            self.phase = DragPhase::Idle;
            return Err(Error::InvalidGesture(format!("unknown task {task_id}")));
        };
        self.phase = DragPhase::PendingConfirm(Prediction::Task {
            task_id: task_id.to_string(),
            column_id: target_column.to_string(),
            index,
        });

        let result = with_timeout(
            self.timeout,
            self.api.move_task(task_id, target_column, index),
        )
        .await;
        match result {
            Ok(outcome) => {
                if !self.state.apply_move(&outcome) {
                    // The server's order names tasks we never fetched.
                    tracing::debug!(task = task_id, "move outcome incomplete locally, refetching board");
                    if let Err(e) = self.refetch().await {
                        tracing::warn!(error = %e, "refetch failed, board marked stale");
                        self.stale = true;
                    }
                }
                self.phase = DragPhase::Reconciled;
                tracing::debug!(
                    task = task_id,
                    column = %outcome.new_column_id,
                    index = outcome.new_order,
                    "task move confirmed"
                );
                Ok(DropOutcome::Confirmed)
            }
            Err(e) => Ok(self.roll_back(e).await),
        }
    }

    async fn roll_back(&mut self, err: Error) -> DropOutcome {
        tracing::warn!(board = %self.state.board_id(), error = %err, "mutation failed, refetching board");
        if let Err(refetch) = self.refetch().await {
            tracing::warn!(error = %refetch, "refetch failed, board marked stale");
            self.stale = true;
        }
        self.phase = DragPhase::RolledBack;
        DropOutcome::RolledBack {
            reason: err.to_string(),
        }
    }
}

async fn with_timeout<T>(timeout: Duration, fut: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::time::timeout(timeout, fut)
        .await
        .unwrap_or(Err(Error::Timeout(timeout)))
}

/// An in-progress drag. Dropping it without [`DragGesture::drop_at`] cancels.
pub struct DragGesture<'a, A: BoardApi> {
    board: &'a mut BoardController<A>,
    origin: DragOrigin,
    finished: bool,
}

impl<A: BoardApi> DragGesture<'_, A> {
    pub fn origin(&self) -> &DragOrigin {
        &self.origin
    }

    pub fn state(&self) -> &BoardState {
        &self.board.state
    }

    /// Abandons the drag without touching state.
    pub fn cancel(mut self) {
        self.finished = true;
        self.board.phase = DragPhase::Idle;
        tracing::debug!(origin = ?self.origin, "drag cancelled");
    }

    /// Releases the dragged item at `target`, predicting locally and then
    /// reconciling with the server.
    pub async fn drop_at(mut self, target: DropTarget) -> Result<DropOutcome> {
        let result = self.board.complete(&self.origin, target).await;
        self.finished = true;
        result
    }
}

impl<A: BoardApi> Drop for DragGesture<'_, A> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        // Abandoned while waiting on the server: the request may still land.
        if matches!(self.board.phase, DragPhase::PendingConfirm(_)) {
            tracing::warn!(origin = ?self.origin, "drop abandoned mid-flight, board marked stale");
            self.board.stale = true;
        }
        self.board.phase = DragPhase::Idle;
    }
}

#[cfg(test)]
#[path = "drag_tests.rs"]
mod tests;
