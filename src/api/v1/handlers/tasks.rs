/*
 * Responsibility
 * - /tasks 系 CRUD handler
 * - AuthCtx から Principal を取り出し、service に明示的に渡す
 * - ドメインの結果 / エラーを DTO と AppError に写すだけ。ロジックは持たない
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::tasks::{
            CreateTaskRequest, DeleteTaskResponse, TaskListResponse, TaskResponse,
            UpdateStatusRequest, UpdateTitleRequest,
        },
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    state::AppState,
};

pub async fn list_tasks(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
) -> Result<Json<TaskListResponse>, AppError> {
    let records = state.tasks.list(&auth.principal).await?;

    Ok(Json(TaskListResponse {
        tasks: records.into_iter().map(TaskResponse::from).collect(),
    }))
}

pub async fn create_task(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let record = state.tasks.create(&auth.principal, &req.title).await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn get_task(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<TaskResponse>, AppError> {
    let record = state.tasks.get(&auth.principal, task_id).await?;

    Ok(Json(record.into()))
}

pub async fn update_task_title(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateTitleRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let record = state
        .tasks
        .update_title(&auth.principal, task_id, &req.title)
        .await?;

    Ok(Json(record.into()))
}

pub async fn update_task_status(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let record = state
        .tasks
        .update_status(&auth.principal, task_id, &req.status)
        .await?;

    Ok(Json(record.into()))
}

pub async fn delete_task(
    AuthCtxExtractor(auth): AuthCtxExtractor,
    State(state): State<AppState>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<DeleteTaskResponse>, AppError> {
    state.tasks.delete(&auth.principal, task_id).await?;

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully",
    }))
}
