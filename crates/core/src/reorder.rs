// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Column reordering on a board.

use crate::access::{self, Permission};
use crate::board::{Action, BoardDetail, Event};
use crate::crud::populate;
use crate::db::{self as store, Database};
use crate::error::{Error, Result};
use crate::order::Order;

impl Database {
    /// Replaces a board's column order with `column_ids`.
    ///
    /// `column_ids` must be a rearrangement of the board's current columns:
    /// no column may be added, dropped or repeated. Only the board's order
    /// array is written; column and task rows are untouched. Returns the
    /// board populated in the new order.
    pub fn reorder_columns(
        &mut self,
        board_id: &str,
        column_ids: &[String],
        actor: &str,
    ) -> Result<BoardDetail> {
        let (detail, changed) = self.transact(|tx| {
            let board = store::load_board(tx, board_id)?;
            access::require(&board, actor, Permission::Edit)?;
            board
                .columns
                .check_permutation(column_ids)
                .map_err(|mismatch| Error::InvalidPermutation(mismatch.to_string()))?;

            let reordered = Order::from(column_ids.to_vec());
            let changed = reordered != board.columns;
            if changed {
                store::save_board_columns(tx, board_id, &reordered)?;
                store::log_event(
                    tx,
                    &Event::new(board_id, board_id, Action::ColumnsReordered, actor).with_values(
                        Some(board.columns.to_string()),
                        Some(reordered.to_string()),
                    ),
                )?;
            }

            let board = store::load_board(tx, board_id)?;
            Ok((populate(tx, board)?, changed))
        })?;

        if changed {
            tracing::info!(board = board_id, actor, order = %detail.board.columns, "columns reordered");
        } else {
            tracing::debug!(board = board_id, actor, "column order unchanged");
        }
        Ok(detail)
    }
}

#[cfg(test)]
#[path = "reorder_tests.rs"]
mod tests;
