// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::test_support::{fixture, OWNER};
use yare::parameterized;

#[test]
fn new_board_is_empty_and_logged() {
    let mut db = Database::open_in_memory().unwrap();
    let board = db.create_board("  Roadmap ", "alice").unwrap();

    assert!(board.id.starts_with("brd-"));
    assert_eq!(board.name, "Roadmap");
    assert!(board.columns.is_empty());
    assert!(board.members.is_empty());

    let events = db.get_events(&board.id).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, Action::BoardCreated);
}

#[parameterized(
    blank_name = { "   ", "alice" },
    blank_owner = { "Roadmap", "" },
)]
fn create_board_rejects_blank_input(name: &str, owner: &str) {
    let mut db = Database::open_in_memory().unwrap();
    let err = db.create_board(name, owner).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn columns_append_in_creation_order() {
    let fx = fixture(&[0, 0, 0]);
    assert_eq!(fx.column_order(), fx.columns);
    assert!(fx.columns.iter().all(|c| c.starts_with("col-")));
    fx.assert_consistent();
}

#[test]
fn tasks_append_in_creation_order() {
    let fx = fixture(&[3]);
    assert_eq!(fx.tasks_of(0), fx.tasks[0]);
    let task = fx.db.get_task(&fx.tasks[0][2]).unwrap();
    assert_eq!(task.column_id, fx.columns[0]);
    assert_eq!(task.board_id, fx.board);
    assert_eq!(task.created_by, OWNER);
    fx.assert_consistent();
}

#[test]
fn task_fields_are_kept() {
    let mut fx = fixture(&[0]);
    let new_task = NewTask {
        title: "Ship".to_string(),
        description: Some("v1".to_string()),
        priority: Some(crate::board::Priority::Medium),
        tags: vec!["release".to_string()],
        ..NewTask::default()
    };

    let task = fx.db.create_task(&fx.columns[0], &new_task, OWNER).unwrap();
    let loaded = fx.db.get_task(&task.id).unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn blank_task_title_is_rejected() {
    let mut fx = fixture(&[0]);
    let err = fx
        .db
        .create_task(&fx.columns[0], &NewTask::titled(" "), OWNER)
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(fx.tasks_of(0).is_empty());
}

#[test]
fn detail_lists_columns_and_tasks_in_order() {
    let fx = fixture(&[2, 1]);
    let detail = fx.db.board_detail(&fx.board, OWNER).unwrap();

    let columns: Vec<&str> = detail.column_items.iter().map(|c| c.column.id.as_str()).collect();
    assert_eq!(columns, vec![fx.columns[0].as_str(), fx.columns[1].as_str()]);
    let first: Vec<String> = detail.column_items[0]
        .task_items
        .iter()
        .map(|t| t.id.clone())
        .collect();
    assert_eq!(first, fx.tasks[0]);
    assert_eq!(detail.column_items[1].task_items.len(), 1);
}

#[test]
fn detail_with_dangling_reference_is_corrupted() {
    let fx = fixture(&[1]);
    fx.db
        .conn
        .execute(
            "UPDATE columns SET task_order = '[\"tsk-ghost\"]' WHERE id = ?1",
            [&fx.columns[0]],
        )
        .unwrap();

    let err = fx.db.board_detail(&fx.board, OWNER).unwrap_err();
    assert!(matches!(err, Error::CorruptedData(_)));
}

#[test]
fn delete_task_removes_it_from_order() {
    let mut fx = fixture(&[3]);
    let middle = fx.tasks[0][1].clone();

    fx.db.delete_task(&middle, OWNER).unwrap();

    assert_eq!(fx.tasks_of(0), vec![fx.tasks[0][0].clone(), fx.tasks[0][2].clone()]);
    assert!(matches!(fx.db.get_task(&middle), Err(Error::TaskNotFound(_))));
    fx.assert_consistent();
}

#[test]
fn delete_column_takes_its_tasks() {
    let mut fx = fixture(&[2, 1, 0]);
    let doomed = fx.columns[0].clone();

    fx.db.delete_column(&doomed, OWNER).unwrap();

    assert_eq!(fx.column_order(), vec![fx.columns[1].clone(), fx.columns[2].clone()]);
    assert!(matches!(fx.db.get_column(&doomed), Err(Error::ColumnNotFound(_))));
    for task in &fx.tasks[0] {
        assert!(matches!(fx.db.get_task(task), Err(Error::TaskNotFound(_))));
    }
    assert_eq!(fx.tasks_of(1), fx.tasks[1]);
    fx.assert_consistent();
}

#[test]
fn deletes_leave_no_dangling_references() {
    let mut fx = fixture(&[3, 3, 3]);
    fx.db.delete_task(&fx.tasks[1][0].clone(), OWNER).unwrap();
    fx.db.delete_column(&fx.columns[2].clone(), OWNER).unwrap();
    fx.db.delete_task(&fx.tasks[0][2].clone(), OWNER).unwrap();

    let detail = fx.db.board_detail(&fx.board, OWNER).unwrap();
    assert_eq!(detail.column_items.len(), 2);
    let remaining: usize = detail.column_items.iter().map(|c| c.task_items.len()).sum();
    assert_eq!(remaining, 4);
    fx.assert_consistent();
}

#[test]
fn lock_toggles_and_logs_once() {
    let mut fx = fixture(&[0]);
    let column = fx.columns[0].clone();
    let before = fx.db.get_events(&fx.board).unwrap().len();

    assert!(fx.db.set_column_locked(&column, true, OWNER).unwrap().locked);
    assert!(fx.db.set_column_locked(&column, true, OWNER).unwrap().locked);
    assert!(!fx.db.set_column_locked(&column, false, OWNER).unwrap().locked);

    let events = fx.db.get_events(&fx.board).unwrap();
    let actions: Vec<Action> = events[before..].iter().map(|e| e.action).collect();
    assert_eq!(actions, vec![Action::ColumnLocked, Action::ColumnUnlocked]);
}

#[test]
fn locked_column_still_accepts_moves() {
    let mut fx = fixture(&[1, 0]);
    let target = fx.columns[1].clone();
    fx.db.set_column_locked(&target, true, OWNER).unwrap();

    fx.db.move_task(&fx.tasks[0][0].clone(), &target, 0, OWNER).unwrap();
    assert_eq!(fx.tasks_of(1), fx.tasks[0]);
}

#[test]
fn add_member_grants_role() {
    let mut fx = fixture(&[0]);
    let board = fx.db.add_member(&fx.board, "bob", Role::Editor, OWNER).unwrap();
    assert_eq!(board.role_of("bob"), Some(Role::Editor));

    // Admins manage membership too.
    fx.db.add_member(&fx.board, "carol", Role::Admin, OWNER).unwrap();
    let board = fx.db.add_member(&fx.board, "bob", Role::Viewer, "carol").unwrap();
    assert_eq!(board.role_of("bob"), Some(Role::Viewer));
}

#[test]
fn owner_cannot_be_added_as_member() {
    let mut fx = fixture(&[0]);
    let err = fx.db.add_member(&fx.board, OWNER, Role::Viewer, OWNER).unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[parameterized(
    editor = { Role::Editor },
    viewer = { Role::Viewer },
)]
fn non_admins_cannot_add_members(role: Role) {
    let mut fx = fixture(&[0]);
    fx.db.add_member(&fx.board, "bob", role, OWNER).unwrap();
    let err = fx.db.add_member(&fx.board, "dave", Role::Viewer, "bob").unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[parameterized(
    admin = { Role::Admin, true },
    editor = { Role::Editor, true },
    viewer = { Role::Viewer, false },
)]
fn column_structure_needs_edit_rights(role: Role, allowed: bool) {
    let mut fx = fixture(&[1]);
    fx.db.add_member(&fx.board, "bob", role, OWNER).unwrap();
    let column = fx.columns[0].clone();

    assert_eq!(fx.db.create_column(&fx.board, "New", "bob").is_ok(), allowed);
    assert_eq!(fx.db.set_column_locked(&column, true, "bob").is_ok(), allowed);
    assert_eq!(fx.db.delete_column(&column, "bob").is_ok(), allowed);
}

#[test]
fn viewers_may_create_and_delete_tasks() {
    let mut fx = fixture(&[0]);
    fx.db.add_member(&fx.board, "vic", Role::Viewer, OWNER).unwrap();

    let task = fx
        .db
        .create_task(&fx.columns[0], &NewTask::titled("from a viewer"), "vic")
        .unwrap();
    fx.db.delete_task(&task.id, "vic").unwrap();
    fx.assert_consistent();
}

#[test]
fn strangers_see_nothing() {
    let mut fx = fixture(&[1]);
    let err = fx.db.board_detail(&fx.board, "mallory").unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    let err = fx
        .db
        .create_task(&fx.columns[0], &NewTask::titled("x"), "mallory")
        .unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
    let err = fx.db.delete_task(&fx.tasks[0][0].clone(), "mallory").unwrap_err();
    assert!(matches!(err, Error::Forbidden { .. }));
}

#[test]
fn missing_parents_are_not_found() {
    let mut db = Database::open_in_memory().unwrap();
    assert!(matches!(
        db.create_column("brd-missing", "Todo", OWNER),
        Err(Error::BoardNotFound(_))
    ));
    assert!(matches!(
        db.create_task("col-missing", &NewTask::titled("x"), OWNER),
        Err(Error::ColumnNotFound(_))
    ));
    assert!(matches!(db.delete_task("tsk-missing", OWNER), Err(Error::TaskNotFound(_))));
    assert!(matches!(db.delete_column("col-missing", OWNER), Err(Error::ColumnNotFound(_))));
}
