// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed document store for boards, columns and tasks.
//!
//! Boards and columns keep their child order as a JSON array column
//! (`column_order`, `task_order`). Those arrays are the only persisted order
//! representation. The row-level helpers in this module take a plain
//! [`Connection`] so they can run both on the [`Database`] connection and
//! inside a transaction opened by [`Database::transact`].

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::time::Duration;

use crate::board::{Board, Column, Event, Member, Task};
use crate::error::{Error, Result};
use crate::order::Order;

/// SQL schema for the board store.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS boards (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    owner_id TEXT NOT NULL,
    column_order TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS members (
    board_id TEXT NOT NULL,
    user_id TEXT NOT NULL,
    role TEXT NOT NULL,
    PRIMARY KEY (board_id, user_id),
    FOREIGN KEY (board_id) REFERENCES boards(id)
);

CREATE TABLE IF NOT EXISTS columns (
    id TEXT PRIMARY KEY,
    board_id TEXT NOT NULL,
    name TEXT NOT NULL,
    task_order TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (board_id) REFERENCES boards(id)
);

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    board_id TEXT NOT NULL,
    column_id TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    priority TEXT,
    due_date TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    assignees TEXT NOT NULL DEFAULT '[]',
    created_by TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    FOREIGN KEY (board_id) REFERENCES boards(id),
    FOREIGN KEY (column_id) REFERENCES columns(id)
);

-- Audit trail of structural and ordering changes
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    board_id TEXT NOT NULL,
    entity_id TEXT NOT NULL,
    action TEXT NOT NULL,
    old_value TEXT,
    new_value TEXT,
    actor TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_members_user ON members(user_id);
CREATE INDEX IF NOT EXISTS idx_columns_board ON columns(board_id);
CREATE INDEX IF NOT EXISTS idx_tasks_column ON tasks(column_id);
CREATE INDEX IF NOT EXISTS idx_tasks_board ON tasks(board_id);
CREATE INDEX IF NOT EXISTS idx_events_board ON events(board_id);
"#;

/// Default number of times a conflicting transaction is re-run.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default SQLite busy timeout for file databases.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

/// Parse a JSON array column.
fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|e| conversion_error(format!("invalid JSON in column '{column}': {e}")))
}

/// Run schema creation and all migrations on a database connection.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_locked(conn)?;
    Ok(())
}

/// Migration: Add the lock flag to columns created before it existed.
fn migrate_add_locked(conn: &Connection) -> Result<()> {
    let has_locked: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('columns') WHERE name = 'locked'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_locked {
        conn.execute(
            "ALTER TABLE columns ADD COLUMN locked INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }
    Ok(())
}

/// SQLite connection with board store operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
    /// How many times [`Database::transact`] re-runs a conflicting transaction.
    pub max_retries: u32,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(DEFAULT_BUSY_TIMEOUT)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;",
        )?;

        let db = Database {
            conn,
            max_retries: DEFAULT_MAX_RETRIES,
        };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database {
            conn,
            max_retries: DEFAULT_MAX_RETRIES,
        };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Sets how long SQLite waits on a locked database before reporting busy.
    pub fn set_busy_timeout(&self, timeout: Duration) -> Result<()> {
        self.conn.busy_timeout(timeout)?;
        Ok(())
    }

    /// Get a board by ID, without permission checks.
    pub fn get_board(&self, id: &str) -> Result<Board> {
        load_board(&self.conn, id)
    }

    /// Get a column by ID, without permission checks.
    pub fn get_column(&self, id: &str) -> Result<Column> {
        load_column(&self.conn, id)
    }

    /// Get a task by ID, without permission checks.
    pub fn get_task(&self, id: &str) -> Result<Task> {
        load_task(&self.conn, id)
    }

    /// Get the audit trail for a board, oldest first.
    pub fn get_events(&self, board_id: &str) -> Result<Vec<Event>> {
        events_for_board(&self.conn, board_id)
    }
}

// Boards

pub(crate) fn insert_board(conn: &Connection, board: &Board) -> Result<()> {
    conn.execute(
        "INSERT INTO boards (id, name, owner_id, column_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            board.id,
            board.name,
            board.owner_id,
            serde_json::to_string(&board.columns)?,
            board.created_at.to_rfc3339(),
            board.updated_at.to_rfc3339(),
        ],
    )?;
    for member in &board.members {
        insert_member(conn, &board.id, member)?;
    }
    Ok(())
}

pub(crate) fn insert_member(conn: &Connection, board_id: &str, member: &Member) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO members (board_id, user_id, role) VALUES (?1, ?2, ?3)",
        params![board_id, member.user_id, member.role.as_str()],
    )?;
    Ok(())
}

pub(crate) fn board_exists(conn: &Connection, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM boards WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub(crate) fn load_board(conn: &Connection, id: &str) -> Result<Board> {
    let board = conn
        .query_row(
            "SELECT id, name, owner_id, column_order, created_at, updated_at
             FROM boards WHERE id = ?1",
            params![id],
            |row| {
                let order_str: String = row.get(3)?;
                let created_str: String = row.get(4)?;
                let updated_str: String = row.get(5)?;
                Ok(Board {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    owner_id: row.get(2)?,
                    members: Vec::new(),
                    columns: parse_json(&order_str, "column_order")?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                    updated_at: parse_timestamp(&updated_str, "updated_at")?,
                })
            },
        )
        .optional()?;

    let mut board = board.ok_or_else(|| Error::BoardNotFound(id.to_string()))?;
    board.members = load_members(conn, id)?;
    Ok(board)
}

fn load_members(conn: &Connection, board_id: &str) -> Result<Vec<Member>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, role FROM members WHERE board_id = ?1 ORDER BY user_id",
    )?;
    let members = stmt
        .query_map(params![board_id], |row| {
            let role_str: String = row.get(1)?;
            Ok(Member {
                user_id: row.get(0)?,
                role: parse_db(&role_str, "role")?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(members)
}

pub(crate) fn save_board_columns(conn: &Connection, board_id: &str, columns: &Order) -> Result<()> {
    let affected = conn.execute(
        "UPDATE boards SET column_order = ?1, updated_at = ?2 WHERE id = ?3",
        params![
            serde_json::to_string(columns)?,
            Utc::now().to_rfc3339(),
            board_id
        ],
    )?;
    if affected == 0 {
        return Err(Error::BoardNotFound(board_id.to_string()));
    }
    Ok(())
}

// Columns

const COLUMN_FIELDS: &str = "id, board_id, name, locked, task_order, created_at, updated_at";

fn column_from_row(row: &Row<'_>) -> std::result::Result<Column, rusqlite::Error> {
    let order_str: String = row.get(4)?;
    let created_str: String = row.get(5)?;
    let updated_str: String = row.get(6)?;
    Ok(Column {
        id: row.get(0)?,
        board_id: row.get(1)?,
        name: row.get(2)?,
        locked: row.get(3)?,
        tasks: parse_json(&order_str, "task_order")?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

pub(crate) fn insert_column(conn: &Connection, column: &Column) -> Result<()> {
    conn.execute(
        "INSERT INTO columns (id, board_id, name, locked, task_order, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            column.id,
            column.board_id,
            column.name,
            column.locked,
            serde_json::to_string(&column.tasks)?,
            column.created_at.to_rfc3339(),
            column.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub(crate) fn column_exists(conn: &Connection, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM columns WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub(crate) fn load_column(conn: &Connection, id: &str) -> Result<Column> {
    let column = conn
        .query_row(
            &format!("SELECT {COLUMN_FIELDS} FROM columns WHERE id = ?1"),
            params![id],
            column_from_row,
        )
        .optional()?;
    column.ok_or_else(|| Error::ColumnNotFound(id.to_string()))
}

/// Columns whose `board_id` points at the board, in no particular order.
pub(crate) fn columns_of_board(conn: &Connection, board_id: &str) -> Result<Vec<Column>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMN_FIELDS} FROM columns WHERE board_id = ?1 ORDER BY id"
    ))?;
    let columns = stmt
        .query_map(params![board_id], column_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(columns)
}

pub(crate) fn save_column_tasks(conn: &Connection, column_id: &str, tasks: &Order) -> Result<()> {
    let affected = conn.execute(
        "UPDATE columns SET task_order = ?1, updated_at = ?2 WHERE id = ?3",
        params![
            serde_json::to_string(tasks)?,
            Utc::now().to_rfc3339(),
            column_id
        ],
    )?;
    if affected == 0 {
        return Err(Error::ColumnNotFound(column_id.to_string()));
    }
    Ok(())
}

pub(crate) fn save_column_locked(conn: &Connection, column_id: &str, locked: bool) -> Result<()> {
    let affected = conn.execute(
        "UPDATE columns SET locked = ?1, updated_at = ?2 WHERE id = ?3",
        params![locked, Utc::now().to_rfc3339(), column_id],
    )?;
    if affected == 0 {
        return Err(Error::ColumnNotFound(column_id.to_string()));
    }
    Ok(())
}

pub(crate) fn delete_column_row(conn: &Connection, column_id: &str) -> Result<()> {
    conn.execute("DELETE FROM columns WHERE id = ?1", params![column_id])?;
    Ok(())
}

// Tasks

const TASK_FIELDS: &str = "id, board_id, column_id, title, description, priority, due_date,
     tags, assignees, created_by, created_at, updated_at";

fn task_from_row(row: &Row<'_>) -> std::result::Result<Task, rusqlite::Error> {
    let priority_str: Option<String> = row.get(5)?;
    let due_str: Option<String> = row.get(6)?;
    let tags_str: String = row.get(7)?;
    let assignees_str: String = row.get(8)?;
    let created_str: String = row.get(10)?;
    let updated_str: String = row.get(11)?;
    Ok(Task {
        id: row.get(0)?,
        board_id: row.get(1)?,
        column_id: row.get(2)?,
        title: row.get(3)?,
        description: row.get(4)?,
        priority: priority_str
            .map(|p| parse_db(&p, "priority"))
            .transpose()?,
        due_date: due_str
            .map(|d| parse_timestamp(&d, "due_date"))
            .transpose()?,
        tags: parse_json(&tags_str, "tags")?,
        assignees: parse_json(&assignees_str, "assignees")?,
        created_by: row.get(9)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
    })
}

pub(crate) fn insert_task(conn: &Connection, task: &Task) -> Result<()> {
    conn.execute(
        "INSERT INTO tasks (id, board_id, column_id, title, description, priority, due_date,
         tags, assignees, created_by, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            task.id,
            task.board_id,
            task.column_id,
            task.title,
            task.description,
            task.priority.map(|p| p.as_str()),
            task.due_date.map(|d| d.to_rfc3339()),
            serde_json::to_string(&task.tags)?,
            serde_json::to_string(&task.assignees)?,
            task.created_by,
            task.created_at.to_rfc3339(),
            task.updated_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

pub(crate) fn task_exists(conn: &Connection, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM tasks WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub(crate) fn load_task(conn: &Connection, id: &str) -> Result<Task> {
    let task = conn
        .query_row(
            &format!("SELECT {TASK_FIELDS} FROM tasks WHERE id = ?1"),
            params![id],
            task_from_row,
        )
        .optional()?;
    task.ok_or_else(|| Error::TaskNotFound(id.to_string()))
}

/// Tasks whose `column_id` points at the column, in no particular order.
pub(crate) fn tasks_of_column(conn: &Connection, column_id: &str) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {TASK_FIELDS} FROM tasks WHERE column_id = ?1 ORDER BY id"
    ))?;
    let tasks = stmt
        .query_map(params![column_id], task_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tasks)
}

/// Points a task at a new owning column.
pub(crate) fn save_task_column(conn: &Connection, task_id: &str, column_id: &str) -> Result<()> {
    let affected = conn.execute(
        "UPDATE tasks SET column_id = ?1, updated_at = ?2 WHERE id = ?3",
        params![column_id, Utc::now().to_rfc3339(), task_id],
    )?;
    if affected == 0 {
        return Err(Error::TaskNotFound(task_id.to_string()));
    }
    Ok(())
}

pub(crate) fn delete_task_row(conn: &Connection, task_id: &str) -> Result<()> {
    conn.execute("DELETE FROM tasks WHERE id = ?1", params![task_id])?;
    Ok(())
}

// Events

pub(crate) fn log_event(conn: &Connection, event: &Event) -> Result<i64> {
    conn.execute(
        "INSERT INTO events (board_id, entity_id, action, old_value, new_value, actor, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event.board_id,
            event.entity_id,
            event.action.as_str(),
            event.old_value,
            event.new_value,
            event.actor,
            event.created_at.to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub(crate) fn events_for_board(conn: &Connection, board_id: &str) -> Result<Vec<Event>> {
    let mut stmt = conn.prepare(
        "SELECT id, board_id, entity_id, action, old_value, new_value, actor, created_at
         FROM events WHERE board_id = ?1 ORDER BY id",
    )?;
    let events = stmt
        .query_map(params![board_id], |row| {
            let action_str: String = row.get(3)?;
            let created_str: String = row.get(7)?;
            Ok(Event {
                id: row.get(0)?,
                board_id: row.get(1)?,
                entity_id: row.get(2)?,
                action: parse_db(&action_str, "action")?,
                old_value: row.get(4)?,
                new_value: row.get(5)?,
                actor: row.get(6)?,
                created_at: parse_timestamp(&created_str, "created_at")?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(events)
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
