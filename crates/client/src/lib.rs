// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! kb-client: client-side board model with optimistic drag-and-drop.
//!
//! A [`BoardController`] holds the local copy of a board. Drags predict their
//! result with the same order operations the server uses, send the
//! authoritative mutation, then either adopt the server's order or refetch.

pub mod api;
pub mod config;
pub mod drag;
pub mod error;
pub mod view;

pub use api::{BoardApi, HttpBoardApi};
pub use config::ClientConfig;
pub use drag::{BoardController, DragGesture, DragOrigin, DragPhase, DropOutcome, DropTarget};
pub use error::{Error, Result};
pub use view::{BoardState, TaskLocation};

#[cfg(test)]
pub(crate) mod test_support;
