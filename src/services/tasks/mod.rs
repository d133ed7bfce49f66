/*
 * Responsibility
 * - task CRUD のドメイン操作 (validation + owner scoping)
 * - handler からは Principal を明示パラメータで受け取る (ambient state なし)
 */
pub mod store;

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::services::auth::Principal;
use store::{NewTask, StoreError, TaskRecord, TaskStatus, TaskStore};

pub const MAX_TITLE_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("invalid title: {reason}")]
    InvalidTitle { reason: &'static str },

    #[error("invalid status: {reason}")]
    InvalidStatus { reason: &'static str },

    /// Missing and not-owned are deliberately the same variant so that no
    /// caller can learn whether someone else's id exists.
    #[error("task not found")]
    NotFound,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ownership-scoped operations over tasks.
///
/// Holds no state between calls besides the store handle; every operation
/// is parameterized by the caller's [`Principal`] and every store call
/// carries the owner filter.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, principal: &Principal) -> Result<Vec<TaskRecord>, TaskError> {
        let tasks = self.store.list_for_owner(principal.subject_id).await?;
        Ok(tasks)
    }

    pub async fn create(&self, principal: &Principal, title: &str) -> Result<TaskRecord, TaskError> {
        let title = normalize_title(title)?;

        // owner_id comes from the verified credential, never from the body.
        let task = self
            .store
            .insert(NewTask {
                title,
                status: TaskStatus::Pending,
                owner_id: principal.subject_id,
            })
            .await?;

        tracing::info!(owner_id = %task.owner_id, task_id = %task.id, "task created");

        Ok(task)
    }

    pub async fn get(&self, principal: &Principal, task_id: Uuid) -> Result<TaskRecord, TaskError> {
        self.store
            .get_owned(principal.subject_id, task_id)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn update_title(
        &self,
        principal: &Principal,
        task_id: Uuid,
        title: &str,
    ) -> Result<TaskRecord, TaskError> {
        let title = normalize_title(title)?;

        self.store
            .update_title(principal.subject_id, task_id, &title)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn update_status(
        &self,
        principal: &Principal,
        task_id: Uuid,
        status: &str,
    ) -> Result<TaskRecord, TaskError> {
        let status: TaskStatus = status.parse().map_err(|_| TaskError::InvalidStatus {
            reason: "must be one of: pending, completed",
        })?;

        self.store
            .update_status(principal.subject_id, task_id, status)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn delete(&self, principal: &Principal, task_id: Uuid) -> Result<(), TaskError> {
        let deleted = self.store.delete(principal.subject_id, task_id).await?;

        if !deleted {
            // Already gone, or never this caller's to begin with.
            return Err(TaskError::NotFound);
        }

        tracing::info!(owner_id = %principal.subject_id, task_id = %task_id, "task deleted");

        Ok(())
    }
}

/// Trim surrounding whitespace, then enforce 1..=MAX_TITLE_CHARS.
fn normalize_title(raw: &str) -> Result<String, TaskError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(TaskError::InvalidTitle {
            reason: "must not be empty or whitespace only",
        });
    }
    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(TaskError::InvalidTitle {
            reason: "must be at most 500 characters",
        });
    }

    Ok(trimmed.to_string())
}
