// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The client's copy of a board.
//!
//! Predictions run the same [`Order`] operations the server runs, so a
//! confirmed mutation leaves the local state unchanged. Authoritative results
//! always overwrite whatever was predicted.

use std::collections::HashMap;

use kb_core::{BoardDetail, ColumnDetail, MoveOutcome, Order, Task};

/// Local model of one board, rendered from `detail`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardState {
    detail: BoardDetail,
}

/// Where a task sits right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskLocation {
    pub column_id: String,
    pub index: usize,
}

impl BoardState {
    pub fn new(detail: BoardDetail) -> Self {
        BoardState { detail }
    }

    pub fn board_id(&self) -> &str {
        &self.detail.board.id
    }

    pub fn detail(&self) -> &BoardDetail {
        &self.detail
    }

    pub fn column_order(&self) -> &Order {
        &self.detail.board.columns
    }

    pub fn column(&self, column_id: &str) -> Option<&ColumnDetail> {
        self.detail
            .column_items
            .iter()
            .find(|c| c.column.id == column_id)
    }

    pub fn task_order(&self, column_id: &str) -> Option<&Order> {
        self.column(column_id).map(|c| &c.column.tasks)
    }

    pub fn locate_task(&self, task_id: &str) -> Option<TaskLocation> {
        self.detail.column_items.iter().find_map(|c| {
            c.column.tasks.position(task_id).map(|index| TaskLocation {
                column_id: c.column.id.clone(),
                index,
            })
        })
    }

    /// Discards local state in favor of a freshly fetched board.
    pub fn replace(&mut self, detail: BoardDetail) {
        self.detail = detail;
    }

    /// Moves the column at `from` to final index `to` (clamped). Returns the
    /// resulting order, or `None` if `from` is out of range.
    pub fn predict_reorder(&mut self, from: usize, to: usize) -> Option<Order> {
        let mut order = self.detail.board.columns.clone();
        order.move_within(from, to)?;
        self.detail.board.columns = order.clone();
        self.sync_columns();
        Some(order)
    }

    /// Moves a task to `index` of `target_column_id`, clamping the index to
    /// the valid range. Returns the task's final index, or `None` if the task
    /// or column is unknown.
    pub fn predict_move(&mut self, task_id: &str, target_column_id: &str, index: usize) -> Option<usize> {
        let from = self.locate_task(task_id)?;
        self.column(target_column_id)?;

        if from.column_id == target_column_id {
            let column = self.column_mut(target_column_id)?;
            let to = column.column.tasks.move_within(from.index, index)?;
            sync_tasks(column);
            return Some(to);
        }

        let source = self.column_mut(&from.column_id)?;
        let position = source.task_items.iter().position(|t| t.id == task_id)?;
        source.column.tasks.remove(task_id);
        let mut task = source.task_items.remove(position);
        task.column_id = target_column_id.to_string();

        let target = self.column_mut(target_column_id)?;
        let to = target.column.tasks.insert_at(task_id, index);
        target.task_items.push(task);
        sync_tasks(target);
        Some(to)
    }

    /// Overwrites both affected columns with the server's orders.
    ///
    /// Returns false when the outcome names a column or task this state
    /// never held, so the columns could not be fully rebuilt. The caller
    /// must refetch in that case.
    pub fn apply_move(&mut self, outcome: &MoveOutcome) -> bool {
        let mut pool: HashMap<String, Task> = HashMap::new();
        for id in [&outcome.previous_column_id, &outcome.new_column_id] {
            if let Some(column) = self.column_mut(id) {
                for task in column.task_items.drain(..) {
                    pool.insert(task.id.clone(), task);
                }
            }
        }
        if let Some(task) = pool.get_mut(&outcome.task_id) {
            task.column_id = outcome.new_column_id.clone();
        }

        let updates = [
            (&outcome.previous_column_id, &outcome.previous_column_tasks),
            (&outcome.new_column_id, &outcome.new_column_tasks),
        ];
        let mut complete = true;
        for (id, tasks) in updates {
            let Some(column) = self.column_mut(id) else {
                complete = false;
                continue;
            };
            column.column.tasks = tasks.clone();
            column.task_items = tasks.iter().filter_map(|t| pool.get(t).cloned()).collect();
            complete &= column.task_items.len() == tasks.len();
        }
        complete
    }

    fn column_mut(&mut self, column_id: &str) -> Option<&mut ColumnDetail> {
        self.detail
            .column_items
            .iter_mut()
            .find(|c| c.column.id == column_id)
    }

    /// Reorders `column_items` to follow the board's column order.
    fn sync_columns(&mut self) {
        let order = &self.detail.board.columns;
        self.detail
            .column_items
            .sort_by_key(|c| order.position(&c.column.id).unwrap_or(usize::MAX));
    }
}

/// Reorders `task_items` to follow the column's task order.
fn sync_tasks(column: &mut ColumnDetail) {
    let order = &column.column.tasks;
    column
        .task_items
        .sort_by_key(|t| order.position(&t.id).unwrap_or(usize::MAX));
}

#[cfg(test)]
#[path = "view_tests.rs"]
mod tests;
