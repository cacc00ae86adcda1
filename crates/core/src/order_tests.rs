// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn order(ids: &[&str]) -> Order {
    ids.iter().copied().collect()
}

#[test]
fn remove_first_occurrence() {
    let mut seq = order(&["a", "b", "c"]);
    assert_eq!(seq.remove("b"), Some(1));
    assert_eq!(seq, ["a", "c"]);
}

#[test]
fn remove_absent_is_identity() {
    let mut seq = order(&["a", "b"]);
    assert_eq!(seq.remove("z"), None);
    assert_eq!(seq, ["a", "b"]);
}

#[parameterized(
    front = { 0, &["x", "a", "b"], 0 },
    middle = { 1, &["a", "x", "b"], 1 },
    end = { 2, &["a", "b", "x"], 2 },
    past_end = { 9, &["a", "b", "x"], 2 },
)]
fn insert_at_clamps(index: usize, expected: &[&str], used: usize) {
    let mut seq = order(&["a", "b"]);
    assert_eq!(seq.insert_at("x", index), used);
    assert_eq!(seq, *expected);
}

#[test]
fn insert_into_empty() {
    let mut seq = Order::new();
    assert_eq!(seq.insert_at("x", 3), 0);
    assert_eq!(seq, ["x"]);
}

#[test]
fn append_returns_last_index() {
    let mut seq = order(&["a"]);
    assert_eq!(seq.append("b"), 1);
    assert_eq!(seq, ["a", "b"]);
}

#[parameterized(
    first_to_last = { 0, 2, &["b", "c", "a"] },
    last_to_first = { 2, 0, &["c", "a", "b"] },
    own_position = { 1, 1, &["a", "b", "c"] },
    middle_to_end = { 1, 2, &["a", "c", "b"] },
    to_front = { 1, 0, &["b", "a", "c"] },
    clamped_past_end = { 0, 7, &["b", "c", "a"] },
)]
fn move_within_uses_post_removal_index(from: usize, to: usize, expected: &[&str]) {
    let mut seq = order(&["a", "b", "c"]);
    seq.move_within(from, to).unwrap();
    assert_eq!(seq, *expected);
}

#[test]
fn move_within_single_element_to_end_stays_put() {
    let mut seq = order(&["only"]);
    assert_eq!(seq.move_within(0, 1), Some(0));
    assert_eq!(seq, ["only"]);
}

#[test]
fn move_within_out_of_range_source() {
    let mut seq = order(&["a"]);
    assert_eq!(seq.move_within(3, 0), None);
    assert_eq!(seq, ["a"]);
}

#[test]
fn permutation_accepts_rearrangement() {
    let seq = order(&["c1", "c2", "c3"]);
    let candidate = vec!["c3".to_string(), "c1".to_string(), "c2".to_string()];
    assert!(seq.check_permutation(&candidate).is_ok());
}

#[parameterized(
    short = { &["c1"], PermutationMismatch::Length { expected: 2, actual: 1 } },
    foreign = { &["c1", "zz"], PermutationMismatch::Foreign("zz".into()) },
    duplicate = { &["c1", "c1"], PermutationMismatch::Duplicate("c1".into()) },
    long = { &["c1", "c2", "c2"], PermutationMismatch::Duplicate("c2".into()) },
)]
fn permutation_rejects(candidate: &[&str], expected: PermutationMismatch) {
    let seq = order(&["c1", "c2"]);
    let candidate: Vec<String> = candidate.iter().map(|s| s.to_string()).collect();
    assert_eq!(seq.check_permutation(&candidate), Err(expected));
}

#[test]
fn permutation_flags_gap_left_by_corrupt_source() {
    let seq = order(&["c1", "c1", "c2"]);
    let candidate = vec!["c1".to_string(), "c2".to_string(), "c2".to_string()];
    // The duplicate in the candidate is reported before the gap.
    assert!(seq.check_permutation(&candidate).is_err());
}

#[test]
fn duplicates_reports_each_once() {
    let seq = order(&["a", "b", "a", "a", "b", "c"]);
    assert_eq!(seq.duplicates(), vec!["a", "b"]);
}

#[test]
fn serializes_as_plain_array() {
    let seq = order(&["a", "b"]);
    assert_eq!(serde_json::to_string(&seq).unwrap(), r#"["a","b"]"#);
    let back: Order = serde_json::from_str(r#"["a","b"]"#).unwrap();
    assert_eq!(back, seq);
}
