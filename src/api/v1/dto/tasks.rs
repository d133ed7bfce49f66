/*
 * Responsibility
 * - Tasks の request/response DTO
 * - 形式チェック (trim / 長さ / 列挙値) は service 層で実施し、DTO は形だけを持つ
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::services::tasks::store::TaskRecord;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTitleRequest {
    pub title: String,
}

// Status travels as a plain string so an unknown value becomes a
// field-level 400 from the service, not a serde rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub status: &'static str,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TaskRecord> for TaskResponse {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            status: record.status.as_str(),
            owner_id: record.owner_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

#[derive(Debug, Serialize)]
pub struct DeleteTaskResponse {
    pub message: &'static str,
}
