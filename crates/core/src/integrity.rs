// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Consistency checks between order arrays and owner references.
//!
//! [`Database::check_integrity`] reports every place where a board's column
//! order or a column's task order disagrees with the rows it references.

use std::collections::HashSet;
use std::fmt;

use rusqlite::Connection;
use serde::Serialize;

use crate::board::Column;
use crate::db::{self as store, Database};
use crate::error::{Error, Result};

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// An order array names an entity that does not exist.
    Dangling { parent: String, child: String },
    /// An order array names an entity owned by someone else.
    Foreign {
        parent: String,
        child: String,
        owner: String,
    },
    /// An entity points at a parent whose order array omits it.
    Unlisted { parent: String, child: String },
    /// An order array names the same entity more than once.
    Duplicate { parent: String, child: String },
    /// A task's denormalized board differs from its column's board.
    BoardMismatch {
        task: String,
        task_board: String,
        column_board: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Dangling { parent, child } => {
                write!(f, "{parent} lists {child}, which does not exist")
            }
            Violation::Foreign {
                parent,
                child,
                owner,
            } => write!(f, "{parent} lists {child}, which belongs to {owner}"),
            Violation::Unlisted { parent, child } => {
                write!(f, "{child} belongs to {parent} but is missing from its order")
            }
            Violation::Duplicate { parent, child } => {
                write!(f, "{parent} lists {child} more than once")
            }
            Violation::BoardMismatch {
                task,
                task_board,
                column_board,
            } => write!(
                f,
                "{task} records board {task_board} but its column is on {column_board}"
            ),
        }
    }
}

fn check_columns(conn: &Connection, board_id: &str, out: &mut Vec<Violation>) -> Result<Vec<Column>> {
    let board = store::load_board(conn, board_id)?;

    for dup in board.columns.duplicates() {
        out.push(Violation::Duplicate {
            parent: board.id.clone(),
            child: dup.to_string(),
        });
    }

    let mut listed = Vec::new();
    for column_id in &board.columns {
        match store::load_column(conn, column_id) {
            Ok(column) if column.board_id != board.id => out.push(Violation::Foreign {
                parent: board.id.clone(),
                child: column.id,
                owner: column.board_id,
            }),
            Ok(column) => listed.push(column),
            Err(Error::ColumnNotFound(_)) => out.push(Violation::Dangling {
                parent: board.id.clone(),
                child: column_id.clone(),
            }),
            Err(e) => return Err(e),
        }
    }

    let mut owned = store::columns_of_board(conn, &board.id)?;
    for column in &owned {
        if !board.columns.contains(&column.id) {
            out.push(Violation::Unlisted {
                parent: board.id.clone(),
                child: column.id.clone(),
            });
        }
    }

    // Unlisted columns still own tasks; check those too.
    let listed_ids: HashSet<String> = listed.iter().map(|c| c.id.clone()).collect();
    owned.retain(|c| !listed_ids.contains(&c.id));
    listed.extend(owned);
    Ok(listed)
}

fn check_tasks(conn: &Connection, column: &Column, out: &mut Vec<Violation>) -> Result<()> {
    for dup in column.tasks.duplicates() {
        out.push(Violation::Duplicate {
            parent: column.id.clone(),
            child: dup.to_string(),
        });
    }

    for task_id in &column.tasks {
        match store::load_task(conn, task_id) {
            Ok(task) if task.column_id != column.id => out.push(Violation::Foreign {
                parent: column.id.clone(),
                child: task.id,
                owner: task.column_id,
            }),
            Ok(_) => {}
            Err(Error::TaskNotFound(_)) => out.push(Violation::Dangling {
                parent: column.id.clone(),
                child: task_id.clone(),
            }),
            Err(e) => return Err(e),
        }
    }

    for task in store::tasks_of_column(conn, &column.id)? {
        if !column.tasks.contains(&task.id) {
            out.push(Violation::Unlisted {
                parent: column.id.clone(),
                child: task.id.clone(),
            });
        }
        if task.board_id != column.board_id {
            out.push(Violation::BoardMismatch {
                task: task.id,
                task_board: task.board_id,
                column_board: column.board_id.clone(),
            });
        }
    }
    Ok(())
}

impl Database {
    /// Lists every invariant violation on a board. Empty means consistent.
    pub fn check_integrity(&self, board_id: &str) -> Result<Vec<Violation>> {
        self.read(|conn| {
            let mut violations = Vec::new();
            let columns = check_columns(conn, board_id, &mut violations)?;
            for column in &columns {
                check_tasks(conn, column, &mut violations)?;
            }
            Ok(violations)
        })
    }
}

#[cfg(test)]
#[path = "integrity_tests.rs"]
mod tests;
