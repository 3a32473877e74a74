//! Task records and the task-store contract.
//!
//! Tasks are strictly partitioned by owner (a normalized email): no
//! cross-owner visibility or mutation, ever. Name lookups are exact but
//! case-insensitive within an owner's set. Duplicate names are permitted by
//! the store; lookups resolve to the oldest matching record.

mod file;

pub use file::FileTaskStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted task name length, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Task priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Parse a priority word ("low"/"medium"/"high"), case-insensitively.
    /// Anything else is treated as unspecified.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

/// Completion status of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Parse a status phrase. Accepts "completed", "pending", and the
    /// "not completed" wording some models produce for pending tasks.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim().to_lowercase();
        if raw.contains("not completed") || raw.contains("pending") {
            Some(Self::Pending)
        } else if raw.contains("completed") {
            Some(Self::Completed)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Lower-case and trim an email so it can act as a partition key.
pub fn normalize_owner(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A task record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Normalized email of the owning user.
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new pending task for an owner. The name must be non-empty
    /// after trimming and at most [`MAX_NAME_LEN`] characters.
    pub fn new(owner: &str, name: &str, priority: Priority) -> Result<Self, StoreError> {
        let owner = normalize_owner(owner);
        let name = name.trim().to_string();
        if owner.is_empty() {
            return Err(StoreError::Invalid("task owner is required".to_string()));
        }
        if name.is_empty() {
            return Err(StoreError::Invalid("task name is empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::Invalid(format!(
                "task name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            owner,
            name,
            priority,
            status: TaskStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Field changes applied by an in-place update. Fields left as `None` are
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskChanges {
    pub name: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
}

/// Narrowing applied to a list query: at most one status filter and at most
/// one priority filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    /// Derive a filter from a free-text phrase such as "High Priority",
    /// "Not Completed", or "All". An unrecognized phrase means no narrowing.
    pub fn from_phrase(raw: &str) -> Self {
        let raw = raw.trim().to_lowercase();
        let mut filter = Self::default();

        if raw.contains("high priority") {
            filter.priority = Some(Priority::High);
        } else if raw.contains("medium priority") {
            filter.priority = Some(Priority::Medium);
        } else if raw.contains("low priority") {
            filter.priority = Some(Priority::Low);
        }

        // "not completed" must be checked before "completed".
        if raw.contains("not completed") || raw.contains("pending") {
            filter.status = Some(TaskStatus::Pending);
        } else if raw.contains("completed") {
            filter.status = Some(TaskStatus::Completed);
        }

        filter
    }

    /// Whether a task passes this filter.
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |s| task.status == s)
            && self.priority.map_or(true, |p| task.priority == p)
    }
}

/// Summary row for the admin owner listing.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub email: String,
    pub task_count: usize,
}

/// Persistence layer failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("invalid task: {0}")]
    Invalid(String),
}

/// The task-store contract consumed by the action executors.
///
/// Implementations enforce the owner partition and the task-entity
/// constraints (enumerated fields, bounded non-empty name) as a backstop
/// behind the executors' own validation.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a new task record.
    async fn insert(&self, task: Task) -> Result<Task, StoreError>;

    /// Find one task by owner and exact case-insensitive name. Duplicate
    /// names resolve to the oldest created match.
    async fn find_by_name(&self, owner: &str, name: &str) -> Result<Option<Task>, StoreError>;

    /// List an owner's tasks, newest created first, narrowed by `filter`.
    /// An empty result is a valid outcome, not an error.
    async fn list(&self, owner: &str, filter: TaskFilter) -> Result<Vec<Task>, StoreError>;

    /// Apply `changes` to a task in place, refreshing `updated_at`. Returns
    /// the updated record, or `None` when the id is unknown. `created_at`
    /// is never touched.
    async fn update(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>, StoreError>;

    /// Remove one task by owner and case-insensitive name. Returns the
    /// removed record, or `None` when nothing matched.
    async fn delete(&self, owner: &str, name: &str) -> Result<Option<Task>, StoreError>;

    /// Distinct owners with their task counts, for the admin listing.
    async fn owners(&self) -> Result<Vec<OwnerSummary>, StoreError>;
}
