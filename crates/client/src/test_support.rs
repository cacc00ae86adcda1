// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process [`BoardApi`] backed by a real kb-core store.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use kb_core::{BoardDetail, Database, MoveOutcome, NewTask};

use crate::api::BoardApi;
use crate::error::{Error, Result};
use crate::view::BoardState;

pub(crate) const OWNER: &str = "owner";

pub(crate) struct FakeApi {
    pub db: Mutex<Database>,
    fail_next: AtomicBool,
    delay: Mutex<Duration>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeApi {
    /// Makes the next mutation fail with a 500-style error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Delays every mutation by `delay` before it reaches the store.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    /// Authoritative orders, for comparison with local state.
    pub fn server_orders(&self, board_id: &str) -> Orders {
        let detail = self.db.lock().unwrap().board_detail(board_id, OWNER).unwrap();
        orders(&BoardState::new(detail))
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    async fn before_mutation(&self) -> Result<()> {
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Api {
                status: 500,
                message: "internal server error".to_string(),
            });
        }
        Ok(())
    }
}

impl BoardApi for FakeApi {
    async fn fetch_board(&self, board_id: &str) -> Result<BoardDetail> {
        self.record("fetch");
        let detail = self.db.lock().unwrap().board_detail(board_id, OWNER)?;
        Ok(detail)
    }

    async fn reorder_columns(&self, board_id: &str, column_ids: &[String]) -> Result<BoardDetail> {
        self.record("reorder");
        self.before_mutation().await?;
        let detail = self
            .db
            .lock()
            .unwrap()
            .reorder_columns(board_id, column_ids, OWNER)?;
        Ok(detail)
    }

    async fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        new_order: usize,
    ) -> Result<MoveOutcome> {
        self.record("move");
        self.before_mutation().await?;
        let outcome = self.db.lock().unwrap().move_task(
            task_id,
            target_column_id,
            i64::try_from(new_order).unwrap(),
            OWNER,
        )?;
        Ok(outcome)
    }
}

/// Column order and per-column task orders.
pub(crate) type Orders = (Vec<String>, Vec<Vec<String>>);

pub(crate) fn orders(state: &BoardState) -> Orders {
    let columns = state.column_order().as_slice().to_vec();
    let tasks = columns
        .iter()
        .map(|c| state.task_order(c).unwrap().as_slice().to_vec())
        .collect();
    (columns, tasks)
}

pub(crate) struct Seeded {
    pub api: FakeApi,
    pub board: String,
    pub columns: Vec<String>,
    pub tasks: Vec<Vec<String>>,
}

/// A store holding one board with one column per entry of `layout`.
pub(crate) fn seed(layout: &[usize]) -> Seeded {
    let mut db = Database::open_in_memory().unwrap();
    let board = db.create_board("Client", OWNER).unwrap().id;
    let mut columns = Vec::new();
    let mut tasks = Vec::new();
    for (c, count) in layout.iter().enumerate() {
        let column = db
            .create_column(&board, &format!("C{}", c + 1), OWNER)
            .unwrap()
            .id;
        let mut ids = Vec::new();
        for t in 0..*count {
            let task = NewTask::titled(format!("C{} T{}", c + 1, t + 1));
            ids.push(db.create_task(&column, &task, OWNER).unwrap().id);
        }
        columns.push(column);
        tasks.push(ids);
    }
    Seeded {
        api: FakeApi {
            db: Mutex::new(db),
            fail_next: AtomicBool::new(false),
            delay: Mutex::new(Duration::ZERO),
            calls: Mutex::new(Vec::new()),
        },
        board,
        columns,
        tasks,
    }
}

/// Local state of `seeded`'s board as the server holds it now.
pub(crate) fn local_state(seeded: &Seeded) -> BoardState {
    let detail = seeded
        .api
        .db
        .lock()
        .unwrap()
        .board_detail(&seeded.board, OWNER)
        .unwrap();
    BoardState::new(detail)
}
