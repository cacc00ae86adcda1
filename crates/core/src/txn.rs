// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transaction wrapper for multi-document mutations.
//!
//! Every write to an order array happens inside [`Database::transact`]. The
//! closure does its reads and writes against the transaction; the wrapper
//! commits when it returns `Ok` and rolls back otherwise, so no partial
//! mutation is ever observable.
//!
//! SQLite reports concurrent writers as `SQLITE_BUSY` / `SQLITE_LOCKED`;
//! those surface as [`Error::TransactionConflict`]. The wrapper re-runs the
//! whole closure on conflict, so each attempt re-reads current state and
//! re-validates against it instead of reusing indices computed earlier.

use std::time::Duration;

use rusqlite::{ErrorCode, Transaction, TransactionBehavior};

use crate::db::Database;
use crate::error::{Error, Result};

/// Pause before retry `attempt` (1-based).
fn backoff(attempt: u32) -> Duration {
    Duration::from_millis(10 * u64::from(attempt))
}

/// Maps store-level lock contention to [`Error::TransactionConflict`].
pub(crate) fn classify(err: rusqlite::Error) -> Error {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
            Error::TransactionConflict
        }
        _ => Error::from(err),
    }
}

fn reclassify(err: Error) -> Error {
    match err {
        Error::Database(e) => classify(e),
        other => other,
    }
}

impl Database {
    /// Runs `f` inside an immediate (write-locking) transaction.
    ///
    /// Retries up to `max_retries` times on [`Error::TransactionConflict`];
    /// any other error aborts immediately and is returned as is.
    pub fn transact<T, F>(&mut self, mut f: F) -> Result<T>
    where
        F: FnMut(&Transaction<'_>) -> Result<T>,
    {
        let mut attempt = 0;
        loop {
            match self.transact_once(&mut f) {
                Err(Error::TransactionConflict) if attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, max = self.max_retries, "transaction conflict, retrying");
                    std::thread::sleep(backoff(attempt));
                }
                other => return other,
            }
        }
    }

    fn transact_once<T, F>(&mut self, f: &mut F) -> Result<T>
    where
        F: FnMut(&Transaction<'_>) -> Result<T>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(classify)?;
        // Dropping `tx` on the error path rolls back.
        let value = f(&tx).map_err(reclassify)?;
        tx.commit().map_err(classify)?;
        Ok(value)
    }
}

#[cfg(test)]
#[path = "txn_tests.rs"]
mod tests;
