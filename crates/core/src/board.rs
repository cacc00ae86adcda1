// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core board types: Board, Column, Task, Member, Role, and the audit Event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::order::Order;

/// Role of a non-owner member on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages members and structure.
    Admin,
    /// Edits structure and tasks.
    Editor,
    /// Reads the board and moves tasks.
    Viewer,
}

impl Role {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Editor => "editor",
            Role::Viewer => "viewer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "editor" => Ok(Role::Editor),
            "viewer" => Ok(Role::Viewer),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// A user's membership on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub user_id: String,
    pub role: Role,
}

/// A board. Its `columns` order is the only source of column display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique identifier (format: `brd-{hash}`).
    pub id: String,
    pub name: String,
    /// User who created the board. Owners are not listed in `members`.
    pub owner_id: String,
    pub members: Vec<Member>,
    /// Column IDs in display order.
    pub columns: Order,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Role of `user_id` on this board, if they are a member.
    pub fn role_of(&self, user_id: &str) -> Option<Role> {
        self.members
            .iter()
            .find(|m| m.user_id == user_id)
            .map(|m| m.role)
    }

    pub fn is_owner(&self, user_id: &str) -> bool {
        self.owner_id == user_id
    }
}

/// A column. Its `tasks` order is the only source of task display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Unique identifier (format: `col-{hash}`).
    pub id: String,
    pub board_id: String,
    pub name: String,
    /// Advisory lock shown by clients; ordering operations ignore it.
    pub locked: bool,
    /// Task IDs in display order.
    pub tasks: Order,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (format: `tsk-{hash}`).
    pub id: String,
    /// Denormalized from the owning column.
    pub board_id: String,
    /// The column currently holding this task.
    pub column_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a caller supplies when creating a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        NewTask {
            title: title.into(),
            ..NewTask::default()
        }
    }
}

/// A column with its tasks resolved in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDetail {
    #[serde(flatten)]
    pub column: Column,
    #[serde(rename = "taskItems")]
    pub task_items: Vec<Task>,
}

/// A board with columns and tasks resolved in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDetail {
    #[serde(flatten)]
    pub board: Board,
    #[serde(rename = "columnItems")]
    pub column_items: Vec<ColumnDetail>,
}

/// Kinds of mutation recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    BoardCreated,
    MemberAdded,
    ColumnCreated,
    ColumnDeleted,
    ColumnLocked,
    ColumnUnlocked,
    ColumnsReordered,
    TaskCreated,
    TaskDeleted,
    TaskMoved,
}

impl Action {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::BoardCreated => "board_created",
            Action::MemberAdded => "member_added",
            Action::ColumnCreated => "column_created",
            Action::ColumnDeleted => "column_deleted",
            Action::ColumnLocked => "column_locked",
            Action::ColumnUnlocked => "column_unlocked",
            Action::ColumnsReordered => "columns_reordered",
            Action::TaskCreated => "task_created",
            Action::TaskDeleted => "task_deleted",
            Action::TaskMoved => "task_moved",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "board_created" => Ok(Action::BoardCreated),
            "member_added" => Ok(Action::MemberAdded),
            "column_created" => Ok(Action::ColumnCreated),
            "column_deleted" => Ok(Action::ColumnDeleted),
            "column_locked" => Ok(Action::ColumnLocked),
            "column_unlocked" => Ok(Action::ColumnUnlocked),
            "columns_reordered" => Ok(Action::ColumnsReordered),
            "task_created" => Ok(Action::TaskCreated),
            "task_deleted" => Ok(Action::TaskDeleted),
            "task_moved" => Ok(Action::TaskMoved),
            _ => Err(Error::InvalidAction(s.to_string())),
        }
    }
}

/// An entry in the board's audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Database-assigned ID (0 before insertion).
    pub id: i64,
    pub board_id: String,
    /// The board, column or task the action applied to.
    pub entity_id: String,
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub actor: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Creates a new event stamped with the current time.
    pub fn new(board_id: &str, entity_id: &str, action: Action, actor: &str) -> Self {
        Event {
            id: 0,
            board_id: board_id.to_string(),
            entity_id: entity_id.to_string(),
            action,
            old_value: None,
            new_value: None,
            actor: actor.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Sets old and new values.
    pub fn with_values(mut self, old: Option<String>, new: Option<String>) -> Self {
        self.old_value = old;
        self.new_value = new;
        self
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
