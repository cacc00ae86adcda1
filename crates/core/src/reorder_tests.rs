// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::board::Role;
use crate::test_support::{fixture, OWNER};
use yare::parameterized;

fn ids(ids: &[&String]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn swap_two_columns() {
    let mut fx = fixture(&[0, 0]);
    let (c1, c2) = (fx.columns[0].clone(), fx.columns[1].clone());

    let detail = fx
        .db
        .reorder_columns(&fx.board, &ids(&[&c2, &c1]), OWNER)
        .unwrap();

    assert_eq!(fx.column_order(), vec![c2.clone(), c1.clone()]);
    assert_eq!(detail.board.columns.as_slice(), &[c2.clone(), c1.clone()]);
    let rendered: Vec<&str> = detail.column_items.iter().map(|c| c.column.id.as_str()).collect();
    assert_eq!(rendered, vec![c2.as_str(), c1.as_str()]);
}

#[test]
fn detail_carries_tasks_in_order() {
    let mut fx = fixture(&[2, 1]);
    let (c1, c2) = (fx.columns[0].clone(), fx.columns[1].clone());

    let detail = fx
        .db
        .reorder_columns(&fx.board, &ids(&[&c2, &c1]), OWNER)
        .unwrap();

    let second: Vec<String> = detail.column_items[1]
        .task_items
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(second, fx.tasks[0]);
}

#[test]
fn partial_order_is_rejected_and_nothing_changes() {
    let mut fx = fixture(&[1, 1]);
    let before = fx.column_order();
    let c1 = fx.columns[0].clone();

    let err = fx
        .db
        .reorder_columns(&fx.board, &ids(&[&c1]), OWNER)
        .unwrap_err();

    assert!(matches!(err, Error::InvalidPermutation(_)));
    assert_eq!(fx.column_order(), before);
    fx.assert_consistent();
}

#[parameterized(
    duplicate = { &[0, 0, 2] },
    dropped = { &[2, 1] },
    reversed_with_duplicate = { &[2, 2, 1] },
)]
fn non_permutations_are_rejected(picks: &[usize]) {
    let mut fx = fixture(&[0, 0, 0]);
    let candidate: Vec<String> = picks.iter().map(|i| fx.columns[*i].clone()).collect();

    let err = fx.db.reorder_columns(&fx.board, &candidate, OWNER).unwrap_err();
    assert!(matches!(err, Error::InvalidPermutation(_)));
}

#[test]
fn foreign_column_is_rejected() {
    let mut fx = fixture(&[0, 0]);
    let other = fx.db.create_board("Other", OWNER).unwrap();
    let stranger = fx.db.create_column(&other.id, "Elsewhere", OWNER).unwrap();
    let candidate = vec![fx.columns[0].clone(), stranger.id];

    let err = fx.db.reorder_columns(&fx.board, &candidate, OWNER).unwrap_err();
    assert!(matches!(err, Error::InvalidPermutation(_)));
}

#[test]
fn every_rotation_is_a_permutation_of_the_original() {
    let mut fx = fixture(&[0, 0, 0, 0]);
    let original = fx.column_order();

    for shift in 0..original.len() {
        let mut rotated = original.clone();
        rotated.rotate_left(shift);
        fx.db.reorder_columns(&fx.board, &rotated, OWNER).unwrap();

        let stored = fx.column_order();
        assert_eq!(stored, rotated);
        let mut sorted_stored = stored.clone();
        sorted_stored.sort();
        let mut sorted_original = original.clone();
        sorted_original.sort();
        assert_eq!(sorted_stored, sorted_original);
    }
    fx.assert_consistent();
}

#[test]
fn same_order_writes_no_event() {
    let mut fx = fixture(&[0, 0]);
    let before = fx.db.get_events(&fx.board).unwrap().len();

    let order = fx.column_order();
    fx.db.reorder_columns(&fx.board, &order, OWNER).unwrap();

    assert_eq!(fx.db.get_events(&fx.board).unwrap().len(), before);
}

#[test]
fn reorder_is_logged() {
    let mut fx = fixture(&[0, 0]);
    let mut order = fx.column_order();
    order.reverse();
    fx.db.reorder_columns(&fx.board, &order, OWNER).unwrap();

    let last = fx.db.get_events(&fx.board).unwrap().pop().unwrap();
    assert_eq!(last.action, Action::ColumnsReordered);
    assert_eq!(last.actor, OWNER);
}

#[parameterized(
    editor = { Role::Editor, true },
    admin = { Role::Admin, true },
    viewer = { Role::Viewer, false },
)]
fn member_roles(role: Role, allowed: bool) {
    let mut fx = fixture(&[0, 0]);
    fx.db.add_member(&fx.board, "member", role, OWNER).unwrap();
    let mut order = fx.column_order();
    order.reverse();

    let result = fx.db.reorder_columns(&fx.board, &order, "member");
    assert_eq!(result.is_ok(), allowed);
    if !allowed {
        assert!(matches!(result, Err(Error::Forbidden { .. })));
    }
}

#[test]
fn non_member_is_forbidden() {
    let mut fx = fixture(&[0, 0]);
    let order = fx.column_order();
    let err = fx.db.reorder_columns(&fx.board, &order, "stranger").unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[test]
fn unknown_board_is_not_found() {
    let mut fx = fixture(&[]);
    let err = fx.db.reorder_columns("brd-missing", &[], OWNER).unwrap_err();
    assert!(matches!(err, Error::BoardNotFound(_)));
}

#[test]
fn empty_board_accepts_empty_order() {
    let mut fx = fixture(&[]);
    let detail = fx.db.reorder_columns(&fx.board, &[], OWNER).unwrap();
    assert!(detail.column_items.is_empty());
}
