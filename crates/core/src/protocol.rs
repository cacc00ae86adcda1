// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP protocol types shared by the server and the client.
//!
//! Every response body is an [`Envelope`]:
//! `{ "success": bool, "data": ..., "message": string }`. Failed requests
//! omit `data`.

use serde::{Deserialize, Serialize};

use crate::board::{NewTask, Role};

/// Uniform response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
}

impl<T> Envelope<T> {
    /// A successful response carrying `data`.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: message.into(),
        }
    }

    /// A failed response.
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            message: message.into(),
        }
    }

    /// Converts into a `Result`, treating `success: false` or missing data as an error message.
    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(format!("response carried no data: {}", self.message)),
            (false, _) => Err(self.message),
        }
    }
}

/// Body of `PUT /boards/{boardId}/column-order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderColumnsRequest {
    pub column_ids: Vec<String>,
}

/// Body of `PATCH /tasks/{taskId}/move`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    pub target_column_id: String,
    /// Destination index. Signed so that negative input reaches validation.
    pub new_order: i64,
}

/// Body of `POST /boards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardRequest {
    pub name: String,
}

/// Body of `POST /boards/{boardId}/columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateColumnRequest {
    pub name: String,
}

/// Body of `POST /boards/{boardId}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub user_id: String,
    pub role: Role,
}

/// Body of `PATCH /columns/{columnId}/lock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockColumnRequest {
    pub locked: bool,
}

/// Body of `POST /columns/{columnId}/tasks`.
pub type CreateTaskRequest = NewTask;

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
