/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::TokenVerifier, tasks::TaskService};

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
    pub tasks: TaskService,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>, tasks: TaskService) -> Self {
        Self { verifier, tasks }
    }
}
