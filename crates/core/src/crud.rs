// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Creation, deletion and lookup of boards, columns and tasks.
//!
//! Creation appends the new ID to its parent's order array and deletion
//! removes it, in the same transaction that writes the entity row. That keeps
//! the owner reference and the order array agreeing at every commit.

use chrono::Utc;
use rusqlite::Connection;

use crate::access::{self, Permission};
use crate::board::{
    Action, Board, BoardDetail, Column, ColumnDetail, Event, Member, NewTask, Role, Task,
};
use crate::db::{self as store, Database};
use crate::error::{Error, Result};
use crate::id::{generate_unique_id, IdKind};
use crate::order::Order;

fn non_empty(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// Resolves a board's columns and tasks in display order.
pub(crate) fn populate(conn: &Connection, board: Board) -> Result<BoardDetail> {
    let mut column_items = Vec::with_capacity(board.columns.len());
    for column_id in &board.columns {
        let column = store::load_column(conn, column_id).map_err(|e| match e {
            Error::ColumnNotFound(_) => {
                Error::CorruptedData(format!("board {} lists missing column {column_id}", board.id))
            }
            other => other,
        })?;
        if column.board_id != board.id {
            return Err(Error::CorruptedData(format!(
                "board {} lists column {column_id} owned by {}",
                board.id, column.board_id
            )));
        }

        let mut task_items = Vec::with_capacity(column.tasks.len());
        for task_id in &column.tasks {
            let task = store::load_task(conn, task_id).map_err(|e| match e {
                Error::TaskNotFound(_) => {
                    Error::CorruptedData(format!("column {column_id} lists missing task {task_id}"))
                }
                other => other,
            })?;
            task_items.push(task);
        }
        column_items.push(ColumnDetail { column, task_items });
    }
    Ok(BoardDetail {
        board,
        column_items,
    })
}

impl Database {
    /// Runs read-only `f` against a consistent snapshot.
    pub fn read<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&*tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Creates an empty board owned by `owner`.
    pub fn create_board(&mut self, name: &str, owner: &str) -> Result<Board> {
        let name = non_empty(name, "board name")?;
        let owner = non_empty(owner, "owner")?;

        let board = self.transact(|tx| {
            let now = Utc::now();
            let id = generate_unique_id(IdKind::Board, &name, &now, |id| {
                store::board_exists(tx, id)
            })?;
            let board = Board {
                id,
                name: name.clone(),
                owner_id: owner.clone(),
                members: Vec::new(),
                columns: Order::new(),
                created_at: now,
                updated_at: now,
            };
            store::insert_board(tx, &board)?;
            store::log_event(tx, &Event::new(&board.id, &board.id, Action::BoardCreated, &owner))?;
            Ok(board)
        })?;

        tracing::info!(board = %board.id, owner = %board.owner_id, "board created");
        Ok(board)
    }

    /// Adds or updates a member's role. Requires owner or admin.
    pub fn add_member(&mut self, board_id: &str, user_id: &str, role: Role, actor: &str) -> Result<Board> {
        let user_id = non_empty(user_id, "user id")?;

        self.transact(|tx| {
            let board = store::load_board(tx, board_id)?;
            access::require(&board, actor, Permission::Manage)?;
            if board.is_owner(&user_id) {
                return Err(Error::InvalidInput(format!(
                    "{user_id} owns this board and cannot be added as a member"
                )));
            }
            let member = Member {
                user_id: user_id.clone(),
                role,
            };
            store::insert_member(tx, board_id, &member)?;
            store::log_event(
                tx,
                &Event::new(board_id, &user_id, Action::MemberAdded, actor)
                    .with_values(None, Some(role.to_string())),
            )?;
            store::load_board(tx, board_id)
        })
    }

    /// Returns the board with columns and tasks in display order.
    pub fn board_detail(&self, board_id: &str, actor: &str) -> Result<BoardDetail> {
        self.read(|conn| {
            let board = store::load_board(conn, board_id)?;
            access::require(&board, actor, Permission::View)?;
            populate(conn, board)
        })
    }

    /// Creates a column and appends it to the board's column order.
    pub fn create_column(&mut self, board_id: &str, name: &str, actor: &str) -> Result<Column> {
        let name = non_empty(name, "column name")?;

        let column = self.transact(|tx| {
            let mut board = store::load_board(tx, board_id)?;
            access::require(&board, actor, Permission::Edit)?;

            let now = Utc::now();
            let id = generate_unique_id(IdKind::Column, &name, &now, |id| {
                store::column_exists(tx, id)
            })?;
            let column = Column {
                id,
                board_id: board.id.clone(),
                name: name.clone(),
                locked: false,
                tasks: Order::new(),
                created_at: now,
                updated_at: now,
            };
            store::insert_column(tx, &column)?;
            board.columns.append(column.id.clone());
            store::save_board_columns(tx, &board.id, &board.columns)?;
            store::log_event(tx, &Event::new(&board.id, &column.id, Action::ColumnCreated, actor))?;
            Ok(column)
        })?;

        tracing::info!(board = board_id, column = %column.id, actor, "column created");
        Ok(column)
    }

    /// Sets a column's advisory lock flag.
    pub fn set_column_locked(&mut self, column_id: &str, locked: bool, actor: &str) -> Result<Column> {
        self.transact(|tx| {
            let column = store::load_column(tx, column_id)?;
            let board = store::load_board(tx, &column.board_id)?;
            access::require(&board, actor, Permission::Edit)?;
            if column.locked != locked {
                store::save_column_locked(tx, column_id, locked)?;
                let action = if locked {
                    Action::ColumnLocked
                } else {
                    Action::ColumnUnlocked
                };
                store::log_event(tx, &Event::new(&board.id, column_id, action, actor))?;
            }
            store::load_column(tx, column_id)
        })
    }

    /// Deletes a column and its tasks, removing it from the board's order.
    pub fn delete_column(&mut self, column_id: &str, actor: &str) -> Result<()> {
        let board_id = self.transact(|tx| {
            let column = store::load_column(tx, column_id)?;
            let mut board = store::load_board(tx, &column.board_id)?;
            access::require(&board, actor, Permission::Edit)?;

            // Delete by owner reference as well as by order array so a task
            // that somehow fell out of the array does not block the delete.
            let mut doomed: Vec<String> = column.tasks.iter().cloned().collect();
            for task in store::tasks_of_column(tx, column_id)? {
                if !doomed.contains(&task.id) {
                    doomed.push(task.id);
                }
            }
            for task_id in &doomed {
                store::delete_task_row(tx, task_id)?;
            }

            board.columns.remove(column_id);
            store::save_board_columns(tx, &board.id, &board.columns)?;
            store::delete_column_row(tx, column_id)?;
            store::log_event(
                tx,
                &Event::new(&board.id, column_id, Action::ColumnDeleted, actor)
                    .with_values(Some(column.name.clone()), None),
            )?;
            Ok(board.id)
        })?;

        tracing::info!(board = %board_id, column = column_id, actor, "column deleted");
        Ok(())
    }

    /// Creates a task and appends it to the column's task order.
    pub fn create_task(&mut self, column_id: &str, new_task: &NewTask, actor: &str) -> Result<Task> {
        let title = non_empty(&new_task.title, "task title")?;

        let task = self.transact(|tx| {
            let mut column = store::load_column(tx, column_id)?;
            let board = store::load_board(tx, &column.board_id)?;
            access::require(&board, actor, Permission::MoveTasks)?;

            let now = Utc::now();
            let id = generate_unique_id(IdKind::Task, &title, &now, |id| {
                store::task_exists(tx, id)
            })?;
            let task = Task {
                id,
                board_id: board.id.clone(),
                column_id: column.id.clone(),
                title: title.clone(),
                description: new_task.description.clone(),
                priority: new_task.priority,
                due_date: new_task.due_date,
                tags: new_task.tags.clone(),
                assignees: new_task.assignees.clone(),
                created_by: actor.to_string(),
                created_at: now,
                updated_at: now,
            };
            store::insert_task(tx, &task)?;
            column.tasks.append(task.id.clone());
            store::save_column_tasks(tx, &column.id, &column.tasks)?;
            store::log_event(tx, &Event::new(&board.id, &task.id, Action::TaskCreated, actor))?;
            Ok(task)
        })?;

        tracing::info!(column = column_id, task = %task.id, actor, "task created");
        Ok(task)
    }

    /// Deletes a task, removing it from its column's task order.
    pub fn delete_task(&mut self, task_id: &str, actor: &str) -> Result<()> {
        self.transact(|tx| {
            let task = store::load_task(tx, task_id)?;
            let mut column = store::load_column(tx, &task.column_id)?;
            let board = store::load_board(tx, &column.board_id)?;
            access::require(&board, actor, Permission::MoveTasks)?;

            column.tasks.remove(task_id);
            store::save_column_tasks(tx, &column.id, &column.tasks)?;
            store::delete_task_row(tx, task_id)?;
            store::log_event(
                tx,
                &Event::new(&board.id, task_id, Action::TaskDeleted, actor)
                    .with_values(Some(task.title.clone()), None),
            )?;
            Ok(())
        })?;

        tracing::info!(task = task_id, actor, "task deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "crud_tests.rs"]
mod tests;
