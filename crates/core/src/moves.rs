// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Moving a task within a column or between columns of one board.
//!
//! A task's owner is recorded twice: its `column_id` field and its entry in
//! that column's task order. A move rewrites the source order, the
//! destination order and the task row in one transaction, so no reader ever
//! sees the task in two columns or in none.

use serde::{Deserialize, Serialize};

use crate::access::{self, Permission};
use crate::board::{Action, Event};
use crate::db::{self as store, Database};
use crate::error::{Error, Result};
use crate::order::Order;

/// Authoritative placement of a task after a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    pub task_id: String,
    pub previous_column_id: String,
    pub new_column_id: String,
    /// Final index of the task in the new column.
    pub new_order: usize,
    /// Task order of the previous column after the move.
    pub previous_column_tasks: Order,
    /// Task order of the new column after the move. Equal to
    /// `previous_column_tasks` for a move within one column.
    pub new_column_tasks: Order,
    /// False when the task already sat at the requested position.
    pub moved: bool,
}

impl MoveOutcome {
    /// True when the task changed columns.
    pub fn crossed_columns(&self) -> bool {
        self.previous_column_id != self.new_column_id
    }
}

fn to_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Validates `index` against the inclusive range `0..=max`.
fn checked_index(index: i64, max: usize) -> Result<usize> {
    if index < 0 || index > to_i64(max) {
        return Err(Error::InvalidOrder {
            index,
            max: to_i64(max),
        });
    }
    usize::try_from(index).map_err(|_| Error::InvalidOrder {
        index,
        max: to_i64(max),
    })
}

impl Database {
    /// Moves a task to `new_order` in `target_column_id`.
    ///
    /// Within one column `new_order` must lie in `0..=len-1` and names the
    /// task's final index. Across columns it must lie in `0..=len` of the
    /// destination, where `len` inserts at the end. Moving a task onto its
    /// current position writes nothing.
    pub fn move_task(
        &mut self,
        task_id: &str,
        target_column_id: &str,
        new_order: i64,
        actor: &str,
    ) -> Result<MoveOutcome> {
        let outcome = self.transact(|tx| {
            let task = store::load_task(tx, task_id)?;
            let source = store::load_column(tx, &task.column_id)?;
            let board = store::load_board(tx, &source.board_id)?;
            access::require(&board, actor, Permission::MoveTasks)?;

            let from = source.tasks.position(task_id).ok_or_else(|| {
                Error::CorruptedData(format!(
                    "task {task_id} points at column {} but is not in its task order",
                    source.id
                ))
            })?;

            if target_column_id == source.id {
                let to = checked_index(new_order, source.tasks.len().saturating_sub(1))?;
                if to == from {
                    return Ok(MoveOutcome {
                        task_id: task_id.to_string(),
                        previous_column_id: source.id.clone(),
                        new_column_id: source.id.clone(),
                        new_order: from,
                        previous_column_tasks: source.tasks.clone(),
                        new_column_tasks: source.tasks,
                        moved: false,
                    });
                }

                let mut tasks = source.tasks.clone();
                tasks.move_within(from, to);
                store::save_column_tasks(tx, &source.id, &tasks)?;
                store::log_event(
                    tx,
                    &Event::new(&board.id, task_id, Action::TaskMoved, actor).with_values(
                        Some(format!("{}:{from}", source.id)),
                        Some(format!("{}:{to}", source.id)),
                    ),
                )?;
                return Ok(MoveOutcome {
                    task_id: task_id.to_string(),
                    previous_column_id: source.id.clone(),
                    new_column_id: source.id,
                    new_order: to,
                    previous_column_tasks: tasks.clone(),
                    new_column_tasks: tasks,
                    moved: true,
                });
            }

            // Read inside the transaction so the insertion index is checked
            // against the destination as it is now, not as the caller saw it.
            let target = store::load_column(tx, target_column_id)?;
            if target.board_id != board.id {
                return Err(Error::InvalidTarget {
                    column: target.id,
                    column_board: target.board_id,
                    task_board: board.id,
                });
            }
            let to = checked_index(new_order, target.tasks.len())?;

            let mut source_tasks = source.tasks.clone();
            source_tasks.remove(task_id);
            let mut target_tasks = target.tasks.clone();
            let to = target_tasks.insert_at(task_id, to);

            store::save_column_tasks(tx, &source.id, &source_tasks)?;
            store::save_column_tasks(tx, &target.id, &target_tasks)?;
            store::save_task_column(tx, task_id, &target.id)?;
            store::log_event(
                tx,
                &Event::new(&board.id, task_id, Action::TaskMoved, actor).with_values(
                    Some(format!("{}:{from}", source.id)),
                    Some(format!("{}:{to}", target.id)),
                ),
            )?;

            Ok(MoveOutcome {
                task_id: task_id.to_string(),
                previous_column_id: source.id,
                new_column_id: target.id,
                new_order: to,
                previous_column_tasks: source_tasks,
                new_column_tasks: target_tasks,
                moved: true,
            })
        })?;

        if outcome.moved {
            tracing::info!(
                task = task_id,
                from = %outcome.previous_column_id,
                to = %outcome.new_column_id,
                index = outcome.new_order,
                actor,
                "task moved"
            );
        } else {
            tracing::debug!(task = task_id, actor, "task already in place");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod tests;
