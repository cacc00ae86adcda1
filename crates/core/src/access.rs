// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board-level permission checks.
//!
//! The owner can do anything. Members are gated by [`Role`]:
//!
//! | Permission | owner | admin | editor | viewer |
//! |------------|-------|-------|--------|--------|
//! | `View`     | yes   | yes   | yes    | yes    |
//! | `MoveTasks`| yes   | yes   | yes    | yes    |
//! | `Edit`     | yes   | yes   | yes    | no     |
//! | `Manage`   | yes   | yes   | no     | no     |

use crate::board::{Board, Role};
use crate::error::{Error, Result};

/// What an acting user is trying to do on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Read the board and its contents.
    View,
    /// Create, delete or move tasks.
    MoveTasks,
    /// Create, delete, lock or reorder columns.
    Edit,
    /// Add members.
    Manage,
}

impl Permission {
    fn describe(&self) -> &'static str {
        match self {
            Permission::View => "view the board",
            Permission::MoveTasks => "change tasks",
            Permission::Edit => "edit columns",
            Permission::Manage => "manage members",
        }
    }

    fn granted_to(&self, role: Role) -> bool {
        match self {
            Permission::View | Permission::MoveTasks => true,
            Permission::Edit => matches!(role, Role::Admin | Role::Editor),
            Permission::Manage => role == Role::Admin,
        }
    }
}

/// Fails with [`Error::Forbidden`] unless `user_id` holds `permission`.
pub fn require(board: &Board, user_id: &str, permission: Permission) -> Result<()> {
    if board.is_owner(user_id) {
        return Ok(());
    }
    match board.role_of(user_id) {
        Some(role) if permission.granted_to(role) => Ok(()),
        _ => Err(Error::Forbidden {
            user: user_id.to_string(),
            board: board.id.clone(),
            action: permission.describe(),
        }),
    }
}

#[cfg(test)]
#[path = "access_tests.rs"]
mod tests;
