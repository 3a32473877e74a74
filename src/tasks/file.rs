//! JSON-file-backed task store.
//!
//! The full task set lives in one JSON document under the data directory
//! and is rewritten after every mutation, mirroring how the other
//! configuration stores persist. Same-owner races resolve last-write-wins.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    normalize_owner, OwnerSummary, StoreError, Task, TaskChanges, TaskFilter, TaskStore,
    MAX_NAME_LEN,
};

/// Task store persisting to `{data_dir}/tasks.json`.
pub struct FileTaskStore {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
    storage_path: PathBuf,
}

impl FileTaskStore {
    /// Open (or create) a store under `data_dir`.
    pub fn new(data_dir: &Path) -> Result<Self, StoreError> {
        let storage_path = data_dir.join("tasks.json");
        let loaded = Self::load_from_path(&storage_path)?;
        if !loaded.is_empty() {
            tracing::info!(
                "Loaded {} tasks from {}",
                loaded.len(),
                storage_path.display()
            );
        }
        Ok(Self {
            tasks: Arc::new(RwLock::new(loaded)),
            storage_path,
        })
    }

    fn load_from_path(path: &Path) -> Result<HashMap<Uuid, Task>, StoreError> {
        if !path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(path)?;
        let tasks: Vec<Task> = serde_json::from_str(&contents)?;
        Ok(tasks.into_iter().map(|t| (t.id, t)).collect())
    }

    async fn save_to_disk(&self) -> Result<(), StoreError> {
        let tasks = self.tasks.read().await;
        let mut rows: Vec<&Task> = tasks.values().collect();
        // Stable file ordering keeps diffs readable.
        rows.sort_by_key(|t| t.created_at);

        if let Some(parent) = self.storage_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(&rows)?;
        std::fs::write(&self.storage_path, contents)?;
        Ok(())
    }

    /// Backstop for the task-entity name invariant.
    fn validate_name(name: &str) -> Result<(), StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Invalid("task name is empty".to_string()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(StoreError::Invalid(format!(
                "task name exceeds {MAX_NAME_LEN} characters"
            )));
        }
        Ok(())
    }

    /// Id of the oldest task matching owner+name, case-insensitively.
    fn find_id(tasks: &HashMap<Uuid, Task>, owner: &str, name: &str) -> Option<Uuid> {
        let owner = normalize_owner(owner);
        let needle = name.trim().to_lowercase();
        tasks
            .values()
            .filter(|t| t.owner == owner && t.name.to_lowercase() == needle)
            .min_by_key(|t| t.created_at)
            .map(|t| t.id)
    }
}

#[async_trait]
impl TaskStore for FileTaskStore {
    async fn insert(&self, task: Task) -> Result<Task, StoreError> {
        Self::validate_name(&task.name)?;
        if task.owner.trim().is_empty() {
            return Err(StoreError::Invalid("task owner is required".to_string()));
        }

        {
            let mut tasks = self.tasks.write().await;
            tasks.insert(task.id, task.clone());
        }
        self.save_to_disk().await?;
        Ok(task)
    }

    async fn find_by_name(&self, owner: &str, name: &str) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(Self::find_id(&tasks, owner, name).and_then(|id| tasks.get(&id).cloned()))
    }

    async fn list(&self, owner: &str, filter: TaskFilter) -> Result<Vec<Task>, StoreError> {
        let owner = normalize_owner(owner);
        let tasks = self.tasks.read().await;
        let mut rows: Vec<Task> = tasks
            .values()
            .filter(|t| t.owner == owner && filter.matches(t))
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>, StoreError> {
        if let Some(name) = changes.name.as_deref() {
            Self::validate_name(name)?;
        }

        let updated = {
            let mut tasks = self.tasks.write().await;
            match tasks.get_mut(&id) {
                Some(task) => {
                    if let Some(name) = changes.name {
                        task.name = name.trim().to_string();
                    }
                    if let Some(priority) = changes.priority {
                        task.priority = priority;
                    }
                    if let Some(status) = changes.status {
                        task.status = status;
                    }
                    task.updated_at = Utc::now();
                    Some(task.clone())
                }
                None => None,
            }
        };

        if updated.is_some() {
            self.save_to_disk().await?;
        }
        Ok(updated)
    }

    async fn delete(&self, owner: &str, name: &str) -> Result<Option<Task>, StoreError> {
        let removed = {
            let mut tasks = self.tasks.write().await;
            Self::find_id(&tasks, owner, name).and_then(|id| tasks.remove(&id))
        };

        if removed.is_some() {
            self.save_to_disk().await?;
        }
        Ok(removed)
    }

    async fn owners(&self) -> Result<Vec<OwnerSummary>, StoreError> {
        let tasks = self.tasks.read().await;
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for task in tasks.values() {
            *counts.entry(task.owner.as_str()).or_default() += 1;
        }
        let mut users: Vec<OwnerSummary> = counts
            .into_iter()
            .map(|(email, task_count)| OwnerSummary {
                email: email.to_string(),
                task_count,
            })
            .collect();
        users.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{Priority, TaskStatus};
    use tempfile::tempdir;

    const OWNER: &str = "user@example.com";

    fn store(dir: &Path) -> FileTaskStore {
        FileTaskStore::new(dir).unwrap()
    }

    async fn add(store: &FileTaskStore, owner: &str, name: &str, priority: Priority) -> Task {
        store
            .insert(Task::new(owner, name, priority).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_case_insensitive_find() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        add(&store, OWNER, "Buy Milk", Priority::Medium).await;

        let found = store.find_by_name(OWNER, "buy milk").await.unwrap();
        assert_eq!(found.unwrap().name, "Buy Milk");

        let found = store.find_by_name(OWNER, "  BUY MILK ").await.unwrap();
        assert!(found.is_some());

        assert!(store
            .find_by_name(OWNER, "buy bread")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let temp = tempdir().unwrap();
        {
            let store = store(temp.path());
            add(&store, OWNER, "Buy milk", Priority::High).await;
        }

        let reopened = store(temp.path());
        let tasks = reopened.list(OWNER, TaskFilter::default()).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Buy milk");
        assert_eq!(tasks[0].priority, Priority::High);
    }

    #[tokio::test]
    async fn test_duplicate_names_resolve_to_oldest() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        let first = add(&store, OWNER, "Buy milk", Priority::Low).await;
        let _second = add(&store, OWNER, "buy milk", Priority::High).await;

        let found = store.find_by_name(OWNER, "Buy Milk").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        let task = add(&store, OWNER, "Buy milk", Priority::Medium).await;
        let changes = TaskChanges {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let updated = store.update(task.id, changes).await.unwrap().unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at > task.updated_at);
        assert_eq!(updated.name, "Buy milk");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());
        let result = store
            .update(Uuid::new_v4(), TaskChanges::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_name() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());
        let task = add(&store, OWNER, "Buy milk", Priority::Medium).await;

        let changes = TaskChanges {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(store.update(task.id, changes).await.is_err());
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        add(&store, OWNER, "Buy milk", Priority::Medium).await;
        add(&store, OWNER, "Buy bread", Priority::Medium).await;

        let removed = store.delete(OWNER, "BUY MILK").await.unwrap();
        assert_eq!(removed.unwrap().name, "Buy milk");

        // Second delete of the same name finds nothing.
        assert!(store.delete(OWNER, "buy milk").await.unwrap().is_none());

        let remaining = store.list(OWNER, TaskFilter::default()).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].name, "Buy bread");
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_filtered() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        add(&store, OWNER, "Old task", Priority::High).await;
        add(&store, OWNER, "Middle task", Priority::Low).await;
        add(&store, OWNER, "New task", Priority::High).await;

        let all = store.list(OWNER, TaskFilter::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["New task", "Middle task", "Old task"]);

        let high = store
            .list(
                OWNER,
                TaskFilter {
                    priority: Some(Priority::High),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let names: Vec<&str> = high.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["New task", "Old task"]);
    }

    #[tokio::test]
    async fn test_owner_partition_is_hard() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        add(&store, OWNER, "Buy milk", Priority::Medium).await;
        add(&store, "other@example.com", "Buy milk", Priority::Medium).await;

        // Mutating one owner's task never touches the other's.
        let removed = store.delete(OWNER, "buy milk").await.unwrap();
        assert!(removed.is_some());

        let other = store
            .list("other@example.com", TaskFilter::default())
            .await
            .unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].name, "Buy milk");

        let mine = store.list(OWNER, TaskFilter::default()).await.unwrap();
        assert!(mine.is_empty());
    }

    #[tokio::test]
    async fn test_owners_summary() {
        let temp = tempdir().unwrap();
        let store = store(temp.path());

        add(&store, "b@example.com", "One", Priority::Medium).await;
        add(&store, "a@example.com", "Two", Priority::Medium).await;
        add(&store, "a@example.com", "Three", Priority::Medium).await;

        let users = store.owners().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].email, "a@example.com");
        assert_eq!(users[0].task_count, 2);
        assert_eq!(users[1].email, "b@example.com");
        assert_eq!(users[1].task_count, 1);
    }
}
