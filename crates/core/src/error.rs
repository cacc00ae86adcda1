// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for kb-core operations.

use thiserror::Error;

/// All possible errors that can occur in kb-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("board not found: {0}")]
    BoardNotFound(String),

    #[error("column not found: {0}")]
    ColumnNotFound(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("user '{user}' may not {action} on board {board}")]
    Forbidden {
        user: String,
        board: String,
        action: &'static str,
    },

    #[error("invalid column order: {0}\n  hint: submit every column of the board exactly once")]
    InvalidPermutation(String),

    #[error("column {column} belongs to board {column_board}, not {task_board}")]
    InvalidTarget {
        column: String,
        column_board: String,
        task_board: String,
    },

    #[error("invalid position {index}: valid range is 0..={max}")]
    InvalidOrder { index: i64, max: i64 },

    #[error("transaction conflict: the board was modified concurrently, retry the request")]
    TransactionConflict,

    #[error("invalid role: '{0}'\n  hint: valid roles are: admin, editor, viewer")]
    InvalidRole(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: low, medium, high")]
    InvalidPriority(String),

    #[error("invalid action: '{0}'")]
    InvalidAction(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl From<rusqlite::Error> for Error {
    /// Row mappers report unreadable stored values as a conversion failure
    /// wrapping [`Error::CorruptedData`]; that inner error is surfaced as is.
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::FromSqlConversionFailure(index, ty, source) => {
                match source.downcast::<Error>() {
                    Ok(inner) => *inner,
                    Err(source) => {
                        Error::Database(rusqlite::Error::FromSqlConversionFailure(index, ty, source))
                    }
                }
            }
            other => Error::Database(other),
        }
    }
}

/// Coarse classification of an [`Error`], used by transports to pick a
/// status code and by clients to decide whether a retry is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    InvalidPermutation,
    InvalidTarget,
    InvalidOrder,
    InvalidInput,
    TransactionConflict,
    Internal,
}

impl Error {
    /// Returns the taxonomy bucket this error falls into.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::BoardNotFound(_) | Error::ColumnNotFound(_) | Error::TaskNotFound(_) => {
                ErrorKind::NotFound
            }
            Error::Forbidden { .. } => ErrorKind::Forbidden,
            Error::InvalidPermutation(_) => ErrorKind::InvalidPermutation,
            Error::InvalidTarget { .. } => ErrorKind::InvalidTarget,
            Error::InvalidOrder { .. } => ErrorKind::InvalidOrder,
            Error::InvalidRole(_)
            | Error::InvalidPriority(_)
            | Error::InvalidAction(_)
            | Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::TransactionConflict => ErrorKind::TransactionConflict,
            Error::Database(_) | Error::Io(_) | Error::Json(_) | Error::CorruptedData(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// True when the error was raised by validation, before any write happened.
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidPermutation
                | ErrorKind::InvalidTarget
                | ErrorKind::InvalidOrder
                | ErrorKind::InvalidInput
        )
    }
}

/// A specialized Result type for kb-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
