// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Server access.
//!
//! [`BoardApi`] is the seam between the drag controller and the network.
//! [`HttpBoardApi`] talks to kbd; tests substitute an in-process store.

use std::future::Future;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use kb_core::protocol::{MoveTaskRequest, ReorderColumnsRequest};
use kb_core::{BoardDetail, Envelope, MoveOutcome};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// The authoritative operations the client depends on.
pub trait BoardApi: Send + Sync {
    /// Fetches the populated board.
    fn fetch_board(&self, board_id: &str) -> impl Future<Output = Result<BoardDetail>> + Send;

    /// Replaces the board's column order.
    fn reorder_columns(
        &self,
        board_id: &str,
        column_ids: &[String],
    ) -> impl Future<Output = Result<BoardDetail>> + Send;

    /// Moves a task to `new_order` in `target_column_id`.
    fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        new_order: usize,
    ) -> impl Future<Output = Result<MoveOutcome>> + Send;
}

/// [`BoardApi`] over HTTP with reqwest.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpBoardApi {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(HttpBoardApi { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.config.url(path))
            .header("x-user-id", &self.config.user_id);
        if let Some(email) = &self.config.email {
            builder = builder.header("x-user-email", email);
        }
        builder
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(|e| self.transport(e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| self.transport(e))?;

        match serde_json::from_slice::<Envelope<T>>(&bytes) {
            Ok(envelope) if status.is_success() => {
                envelope.into_result().map_err(|message| Error::Api {
                    status: status.as_u16(),
                    message,
                })
            }
            Ok(envelope) => Err(Error::Api {
                status: status.as_u16(),
                message: envelope.message,
            }),
            Err(_) => Err(Error::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("unreadable response")
                    .to_string(),
            }),
        }
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(method, path).json(body)).await
    }

    fn transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.config.timeout)
        } else {
            Error::Transport(err)
        }
    }
}

impl BoardApi for HttpBoardApi {
    async fn fetch_board(&self, board_id: &str) -> Result<BoardDetail> {
        self.send(self.request(Method::GET, &format!("boards/{board_id}")))
            .await
    }

    async fn reorder_columns(&self, board_id: &str, column_ids: &[String]) -> Result<BoardDetail> {
        let body = ReorderColumnsRequest {
            column_ids: column_ids.to_vec(),
        };
        self.send_json(Method::PUT, &format!("boards/{board_id}/column-order"), &body)
            .await
    }

    async fn move_task(
        &self,
        task_id: &str,
        target_column_id: &str,
        new_order: usize,
    ) -> Result<MoveOutcome> {
        let body = MoveTaskRequest {
            target_column_id: target_column_id.to_string(),
            new_order: i64::try_from(new_order).unwrap_or(i64::MAX),
        };
        self.send_json(Method::PATCH, &format!("tasks/{task_id}/move"), &body)
            .await
    }
}
