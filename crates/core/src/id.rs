// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier generation for boards, columns and tasks.
//!
//! IDs look like `col-1a2b3c4d`: a kind prefix and the first 8 hex chars of
//! SHA-256 over the entity name, creation time and a collision salt.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Which table an ID belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Board,
    Column,
    Task,
}

impl IdKind {
    pub fn prefix(self) -> &'static str {
        match self {
            IdKind::Board => "brd",
            IdKind::Column => "col",
            IdKind::Task => "tsk",
        }
    }
}

/// Hashes `name`, `created_at` and `salt` into an ID of `kind`.
pub fn generate_id(kind: IdKind, name: &str, created_at: &DateTime<Utc>, salt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    hasher.update(created_at.to_rfc3339().as_bytes());
    if salt > 0 {
        hasher.update(salt.to_le_bytes());
    }
    let hash = hasher.finalize();
    format!("{}-{}", kind.prefix(), hex::encode(&hash[..4]))
}

/// Generates an ID of `kind` that `exists` reports as free, rehashing with
/// an increasing salt on collision. Errors from `exists` are returned as is.
pub fn generate_unique_id<F, E>(
    kind: IdKind,
    name: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String, E>
where
    F: FnMut(&str) -> Result<bool, E>,
{
    let mut salt = 0;
    loop {
        let id = generate_id(kind, name, created_at, salt);
        if !exists(&id)? {
            return Ok(id);
        }
        salt += 1;
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
