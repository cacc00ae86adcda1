// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Single-instance guard for a data directory.

use std::fs;
use std::path::Path;

use fs2::FileExt;

use crate::error::{Error, Result};

/// Exclusive lock on `<data_dir>/kbd.lock`, released on drop.
#[derive(Debug)]
pub struct InstanceLock {
    _file: fs::File,
}

/// Takes the lock at `lock_path`, failing if another process holds it.
pub fn acquire_lock(lock_path: &Path) -> Result<InstanceLock> {
    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| Error::Locked(lock_path.display().to_string()))?;
    Ok(InstanceLock { _file: file })
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
