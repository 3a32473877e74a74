//! Request/response payload types shared across API handlers.

use serde::{Deserialize, Serialize};

use crate::tasks::{OwnerSummary, Task};

/// Body of the natural-language assistant endpoint.
#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub prompt: String,
    pub email: String,
}

/// Success payload: a human-readable message plus the action's result.
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub message: String,
    pub result: AssistantResult,
}

/// The structured result of the executed action.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantResult {
    Created { task: Task },
    Updated { task: Task },
    Deleted { task: Task },
    Completed { task: Task },
    Listing { tasks: Vec<Task> },
    Clarification { notes: Option<String> },
}

/// Failure payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Expiration unix seconds.
    pub exp: i64,
    /// The normalized email the token was issued for.
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct AdminUsersResponse {
    pub users: Vec<OwnerSummary>,
}
