/*
 * Responsibility
 * - task 永続化の契約 (TaskStore trait) と、その上で交換されるレコード型
 * - backend 実装は repos 側 (Postgres)、tests は in-memory 実装を差し込む
 */
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Exactly two values are representable; anything else is rejected at parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TaskRecord {
    pub id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload. `owner_id` is stamped by the service before the first
/// store call is issued, so a task without an owner is unrepresentable.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub status: TaskStatus,
    pub owner_id: Uuid,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Backend unreachable (pool exhausted, connection refused, ...).
    /// Surfaced as 503; the caller may retry, we do not.
    #[error("task store unavailable")]
    Unavailable(#[source] anyhow::Error),

    /// Any other backend failure. Surfaced as 500.
    #[error("task store failure")]
    Backend(#[source] anyhow::Error),
}

/// Persistence contract for tasks.
///
/// Every owned lookup takes `owner_id` and applies it inside the statement:
/// "does not exist" and "exists but not yours" are a single `None`/`false`
/// outcome by construction. Implementations must bind every value as a
/// parameter (no string concatenation of caller input).
#[async_trait::async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks of one owner, newest first by `created_at`.
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<TaskRecord>, StoreError>;

    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError>;

    async fn get_owned(&self, owner_id: Uuid, task_id: Uuid)
    -> Result<Option<TaskRecord>, StoreError>;

    /// `None` when the task is missing or owned by someone else.
    /// Refreshes `updated_at`; leaves `status` untouched.
    async fn update_title(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        title: &str,
    ) -> Result<Option<TaskRecord>, StoreError>;

    /// Refreshes `updated_at`; leaves `title` untouched.
    async fn update_status(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<TaskRecord>, StoreError>;

    /// Hard delete. `false` when nothing was removed (missing or not owned).
    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, StoreError>;
}
