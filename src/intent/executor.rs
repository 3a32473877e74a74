//! Action executors.
//!
//! One executor per classified intent. Each validates its extracted fields
//! and issues a single task-store operation; the dispatch point below is
//! what guarantees at most one mutation per incoming request, regardless
//! of how many actions the oracle's text appears to describe.

use std::sync::Arc;

use crate::tasks::{Priority, Task, TaskChanges, TaskFilter, TaskStatus, TaskStore, MAX_NAME_LEN};

use super::classifier::Intent;
use super::error::IntentError;
use super::grammar::{Field, ParsedResponse};

/// Outcome of one executed action.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Created(Task),
    Updated(Task),
    Deleted(Task),
    Completed(Task),
    Listing(Vec<Task>),
    /// No action could be settled on; the caller should ask the user to
    /// rephrase. Carries the oracle's Notes when present.
    Clarification { notes: Option<String> },
}

/// Executes exactly one store operation per classified intent.
pub struct ActionExecutor {
    store: Arc<dyn TaskStore>,
}

impl ActionExecutor {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Dispatch to the single executor for `intent`. `owner` must already
    /// be normalized.
    pub async fn execute(
        &self,
        intent: Intent,
        parsed: &ParsedResponse,
        owner: &str,
    ) -> Result<ActionOutcome, IntentError> {
        match intent {
            Intent::Create => self.create(parsed, owner).await,
            Intent::Update => self.update(parsed, owner).await,
            Intent::Delete => self.delete(parsed, owner).await,
            Intent::Complete => self.complete(parsed, owner).await,
            Intent::List => self.list(parsed, owner).await,
            Intent::Unclear => Ok(ActionOutcome::Clarification {
                notes: parsed.get(Field::Notes).map(str::to_string),
            }),
        }
    }

    async fn create(&self, parsed: &ParsedResponse, owner: &str) -> Result<ActionOutcome, IntentError> {
        let name = required_name(parsed, Field::TaskName, "task name")?;
        let priority = parsed
            .get(Field::Priority)
            .and_then(Priority::parse)
            .unwrap_or_default();

        let task = Task::new(owner, &name, priority)?;
        let created = self.store.insert(task).await?;
        Ok(ActionOutcome::Created(created))
    }

    async fn update(&self, parsed: &ParsedResponse, owner: &str) -> Result<ActionOutcome, IntentError> {
        let old_name = required_name(parsed, Field::OldTaskName, "task to update")?;

        let existing = self
            .store
            .find_by_name(owner, &old_name)
            .await?
            .ok_or_else(|| IntentError::NotFound {
                name: old_name.clone(),
            })?;

        // Partial update: only fields the oracle mentioned are touched.
        let mut changes = TaskChanges::default();
        if parsed.has(Field::NewTaskName) {
            changes.name = Some(required_name(parsed, Field::NewTaskName, "new task name")?);
        }
        if let Some(priority) = parsed.get(Field::Priority).and_then(Priority::parse) {
            changes.priority = Some(priority);
        }

        let updated = self
            .store
            .update(existing.id, changes)
            .await?
            .ok_or(IntentError::NotFound { name: old_name })?;
        Ok(ActionOutcome::Updated(updated))
    }

    async fn delete(&self, parsed: &ParsedResponse, owner: &str) -> Result<ActionOutcome, IntentError> {
        let name = required_name(parsed, Field::TaskName, "task to delete")?;

        let removed = self
            .store
            .delete(owner, &name)
            .await?
            .ok_or(IntentError::NotFound { name })?;
        Ok(ActionOutcome::Deleted(removed))
    }

    async fn complete(&self, parsed: &ParsedResponse, owner: &str) -> Result<ActionOutcome, IntentError> {
        let name = required_name(parsed, Field::TaskName, "task name")?;
        let status = parsed
            .get(Field::CompletionStatus)
            .and_then(TaskStatus::parse)
            .ok_or(IntentError::MissingField("completion status"))?;

        let existing = self
            .store
            .find_by_name(owner, &name)
            .await?
            .ok_or_else(|| IntentError::NotFound { name: name.clone() })?;

        let changes = TaskChanges {
            status: Some(status),
            ..Default::default()
        };
        let updated = self
            .store
            .update(existing.id, changes)
            .await?
            .ok_or(IntentError::NotFound { name })?;
        Ok(ActionOutcome::Completed(updated))
    }

    async fn list(&self, parsed: &ParsedResponse, owner: &str) -> Result<ActionOutcome, IntentError> {
        let filter = parsed
            .get(Field::Filter)
            .map(TaskFilter::from_phrase)
            .unwrap_or_default();

        let tasks = self.store.list(owner, filter).await?;
        Ok(ActionOutcome::Listing(tasks))
    }
}

/// Extract a required name-like field: present, non-blank, bounded.
fn required_name(
    parsed: &ParsedResponse,
    field: Field,
    label: &'static str,
) -> Result<String, IntentError> {
    let value = parsed
        .get(field)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(IntentError::MissingField(label))?;

    if value.chars().count() > MAX_NAME_LEN {
        return Err(IntentError::InvalidField {
            field: label,
            reason: format!("longer than {MAX_NAME_LEN} characters"),
        });
    }
    Ok(value.to_string())
}
