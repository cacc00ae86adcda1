// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kb-core: Shared library for the kanban board service
//!
//! This crate provides the board data model, the order-array primitive, the
//! SQLite store with its transaction wrapper, and the reorder and move
//! operations used by the kbd server and mirrored by the client.

pub mod access;
pub mod board;
pub mod crud;
pub mod db;
pub mod error;
pub mod id;
pub mod integrity;
pub mod moves;
pub mod order;
pub mod protocol;
pub mod reorder;
pub mod txn;

pub use access::Permission;
pub use board::{
    Action, Board, BoardDetail, Column, ColumnDetail, Event, Member, NewTask, Priority, Role, Task,
};
pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use integrity::Violation;
pub use moves::MoveOutcome;
pub use order::{Order, PermutationMismatch};
pub use protocol::Envelope;

#[cfg(test)]
pub(crate) mod test_support;
