//! The natural-language assistant endpoint.
//!
//! Everything the pipeline can raise is caught here and converted into a
//! structured JSON failure payload; nothing crashes the process.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::intent::{ActionOutcome, IntentError};
use crate::tasks::StoreError;

use super::routes::AppState;
use super::types::{AssistantRequest, AssistantResponse, AssistantResult, ErrorResponse};

/// POST /api/tasks/ai — translate one natural-language request into at
/// most one task operation.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AssistantRequest>,
) -> Result<Json<AssistantResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.pipeline.process(&req.prompt, &req.email).await {
        Ok(outcome) => Ok(Json(into_response(outcome))),
        Err(e) => Err(into_error(e)),
    }
}

fn into_response(outcome: ActionOutcome) -> AssistantResponse {
    match outcome {
        ActionOutcome::Created(task) => AssistantResponse {
            message: format!(
                "Task \"{}\" created with {} priority.",
                task.name, task.priority
            ),
            result: AssistantResult::Created { task },
        },
        ActionOutcome::Updated(task) => AssistantResponse {
            message: format!(
                "Task updated: \"{}\" (priority: {}).",
                task.name, task.priority
            ),
            result: AssistantResult::Updated { task },
        },
        ActionOutcome::Deleted(task) => AssistantResponse {
            message: format!("Task \"{}\" deleted.", task.name),
            result: AssistantResult::Deleted { task },
        },
        ActionOutcome::Completed(task) => AssistantResponse {
            message: format!("Task \"{}\" marked as {}.", task.name, task.status),
            result: AssistantResult::Completed { task },
        },
        ActionOutcome::Listing(tasks) => AssistantResponse {
            message: match tasks.len() {
                0 => "No matching tasks.".to_string(),
                1 => "Found 1 task.".to_string(),
                n => format!("Found {n} tasks."),
            },
            result: AssistantResult::Listing { tasks },
        },
        ActionOutcome::Clarification { notes } => AssistantResponse {
            message: notes.clone().unwrap_or_else(|| {
                "I couldn't determine what to do with that request. Please rephrase it."
                    .to_string()
            }),
            result: AssistantResult::Clarification { notes },
        },
    }
}

fn into_error(e: IntentError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match &e {
        IntentError::Validation(_)
        | IntentError::MissingField(_)
        | IntentError::InvalidField { .. } => StatusCode::BAD_REQUEST,
        IntentError::NotFound { .. } => StatusCode::NOT_FOUND,
        IntentError::AiUnavailable(_) => StatusCode::BAD_GATEWAY,
        // Invariant violations caught by the store backstop are the
        // caller's input problem, not a persistence failure.
        IntentError::Store(StoreError::Invalid(_)) => StatusCode::BAD_REQUEST,
        IntentError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %e, "assistant request failed");
    } else {
        tracing::debug!(error = %e, "assistant request rejected");
    }

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}
