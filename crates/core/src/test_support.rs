// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board fixtures shared by unit tests.

#![allow(clippy::unwrap_used)]

use crate::board::NewTask;
use crate::db::Database;

pub(crate) const OWNER: &str = "owner";

/// A board with columns and tasks laid out by [`fixture`].
pub(crate) struct Fixture {
    pub db: Database,
    pub board: String,
    /// Column IDs in creation order.
    pub columns: Vec<String>,
    /// Task IDs per column, in creation order.
    pub tasks: Vec<Vec<String>>,
}

impl Fixture {
    /// Current task order of column `index`.
    pub fn tasks_of(&self, index: usize) -> Vec<String> {
        self.db
            .get_column(&self.columns[index])
            .unwrap()
            .tasks
            .into_vec()
    }

    /// Current column order of the board.
    pub fn column_order(&self) -> Vec<String> {
        self.db.get_board(&self.board).unwrap().columns.into_vec()
    }

    /// Asserts the board has no integrity violations.
    pub fn assert_consistent(&self) {
        let violations = self.db.check_integrity(&self.board).unwrap();
        assert!(violations.is_empty(), "violations: {violations:?}");
    }
}

/// Builds a board owned by [`OWNER`] with one column per entry of `layout`,
/// each holding that many tasks.
pub(crate) fn fixture(layout: &[usize]) -> Fixture {
    let mut db = Database::open_in_memory().unwrap();
    let board = db.create_board("Fixture", OWNER).unwrap().id;

    let mut columns = Vec::new();
    let mut tasks = Vec::new();
    for (c, count) in layout.iter().enumerate() {
        let column = db
            .create_column(&board, &format!("C{}", c + 1), OWNER)
            .unwrap()
            .id;
        let mut ids = Vec::new();
        for t in 0..*count {
            let title = format!("C{} T{}", c + 1, t + 1);
            ids.push(db.create_task(&column, &NewTask::titled(title), OWNER).unwrap().id);
        }
        columns.push(column);
        tasks.push(ids);
    }

    Fixture {
        db,
        board,
        columns,
        tasks,
    }
}
