/*
 * Responsibility
 * - tasks テーブル向け SQLx 操作 (TaskStore の Postgres 実装)
 * - すべての statement は owner_id でフィルタし、値は必ず bind する
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::classify_sqlx;
use crate::services::tasks::store::{NewTask, StoreError, TaskRecord, TaskStatus, TaskStore};

#[derive(Debug, FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    status: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_record(self) -> Result<TaskRecord, StoreError> {
        // The status column only ever holds values written through TaskStatus;
        // anything else means the row was mutated outside this service.
        let status: TaskStatus = self
            .status
            .parse()
            .map_err(|_| StoreError::Backend(anyhow::anyhow!("corrupt status column: {}", self.status)))?;

        Ok(TaskRecord {
            id: self.id,
            title: self.title,
            status,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl TaskStore for PgTaskStore {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<TaskRecord>, StoreError> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, status, owner_id, created_at, updated_at
            FROM tasks
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        rows.into_iter().map(TaskRow::into_record).collect()
    }

    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            INSERT INTO tasks (title, status, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, status, owner_id, created_at, updated_at
            "#,
        )
        .bind(&task.title)
        .bind(task.status.as_str())
        .bind(task.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        row.into_record()
    }

    async fn get_owned(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
    ) -> Result<Option<TaskRecord>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT id, title, status, owner_id, created_at, updated_at
            FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        row.map(TaskRow::into_record).transpose()
    }

    async fn update_title(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        title: &str,
    ) -> Result<Option<TaskRecord>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $3, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, status, owner_id, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(title)
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        row.map(TaskRow::into_record).transpose()
    }

    async fn update_status(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<TaskRecord>, StoreError> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET status = $3, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, status, owner_id, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        row.map(TaskRow::into_record).transpose()
    }

    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM tasks
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(task_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(classify_sqlx)?;

        Ok(result.rows_affected() > 0)
    }
}
