/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer が必要な範囲 (/tasks) にだけ auth middleware を適用する
 */
use axum::{Router, routing::get};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::tasks::{
    create_task, delete_task, get_task, list_tasks, update_task_status, update_task_title,
};

pub fn routes(state: AppState) -> Router<AppState> {
    // Everything under /tasks requires a verified Principal.
    // /health lives outside this subtree (see app::build_router).
    let tasks = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route(
            "/tasks/{task_id}",
            get(get_task)
                .put(update_task_title)
                .patch(update_task_status)
                .delete(delete_task),
        );

    middleware::auth::access::apply(tasks, state)
}
