// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Order arrays: sequences of entity IDs whose position encodes display order.
//!
//! An [`Order`] is the only authority for sequencing. A board's column order
//! and a column's task order are both stored as one. Every mutation of an
//! order array, whether from a drag-and-drop move or from creating or deleting
//! an entity, goes through the methods here so the server and the client
//! predict the same result.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An ordered sequence of opaque entity IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Order(Vec<String>);

/// Why a proposed order is not a rearrangement of the current one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermutationMismatch {
    #[error("expected {expected} ids, got {actual}")]
    Length { expected: usize, actual: usize },
    #[error("'{0}' is not part of this collection")]
    Foreign(String),
    #[error("'{0}' appears more than once")]
    Duplicate(String),
    #[error("'{0}' is missing")]
    Missing(String),
}

impl Order {
    /// Creates an empty order.
    pub fn new() -> Self {
        Order(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Index of the first occurrence of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.0.iter().position(|existing| existing == id)
    }

    /// Removes the first occurrence of `id`, returning the index it held.
    ///
    /// Absent IDs leave the order untouched.
    pub fn remove(&mut self, id: &str) -> Option<usize> {
        let index = self.position(id)?;
        self.0.remove(index);
        Some(index)
    }

    /// Inserts `id` at `index`, clamped to `[0, len]`. Returns the index used.
    pub fn insert_at(&mut self, id: impl Into<String>, index: usize) -> usize {
        let index = index.min(self.0.len());
        self.0.insert(index, id.into());
        index
    }

    /// Appends `id` at the end. Returns its index.
    pub fn append(&mut self, id: impl Into<String>) -> usize {
        self.0.push(id.into());
        self.0.len() - 1
    }

    /// Moves the element at `from` so that it ends up at index `to`.
    ///
    /// `to` is interpreted against the sequence after the element has been
    /// taken out, clamped to `len - 1`. Moving to the current index is a
    /// no-op. Returns the final index, or `None` if `from` is out of range.
    pub fn move_within(&mut self, from: usize, to: usize) -> Option<usize> {
        if from >= self.0.len() {
            return None;
        }
        let item = self.0.remove(from);
        let to = to.min(self.0.len());
        self.0.insert(to, item);
        Some(to)
    }

    /// Checks that `candidate` holds exactly the IDs of this order, each once.
    pub fn check_permutation(&self, candidate: &[String]) -> Result<(), PermutationMismatch> {
        let current: HashSet<&str> = self.0.iter().map(String::as_str).collect();
        let mut seen: HashSet<&str> = HashSet::with_capacity(candidate.len());

        for id in candidate {
            if !current.contains(id.as_str()) {
                return Err(PermutationMismatch::Foreign(id.clone()));
            }
            if !seen.insert(id.as_str()) {
                return Err(PermutationMismatch::Duplicate(id.clone()));
            }
        }

        if candidate.len() != self.0.len() {
            return Err(PermutationMismatch::Length {
                expected: self.0.len(),
                actual: candidate.len(),
            });
        }

        // Same length, no foreign ids and no duplicates: only a duplicated
        // entry in `self` could still leave something uncovered.
        if let Some(missing) = self.0.iter().find(|id| !seen.contains(id.as_str())) {
            return Err(PermutationMismatch::Missing(missing.clone()));
        }
        Ok(())
    }

    /// IDs occurring more than once.
    pub fn duplicates(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut dups = Vec::new();
        for id in &self.0 {
            if !seen.insert(id.as_str()) && !dups.contains(&id.as_str()) {
                dups.push(id.as_str());
            }
        }
        dups
    }
}

impl From<Vec<String>> for Order {
    fn from(ids: Vec<String>) -> Self {
        Order(ids)
    }
}

impl<S: Into<String>> FromIterator<S> for Order {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Order(iter.into_iter().map(Into::into).collect())
    }
}

impl<'a> IntoIterator for &'a Order {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl PartialEq<[&str]> for Order {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for Order {
    fn eq(&self, other: &[&str; N]) -> bool {
        self == &other[..]
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}

#[cfg(test)]
#[path = "order_tests.rs"]
mod tests;
