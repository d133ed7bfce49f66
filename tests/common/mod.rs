//! Shared test fixtures: an in-memory `TaskStore`, HS256 token helpers and
//! a router builder that drives the real middleware stack.
#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::Router;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde_json::json;
use uuid::Uuid;

use task_api::app;
use task_api::config::{AppEnv, Config};
use task_api::services::auth::{Principal, TokenVerifier};
use task_api::services::tasks::TaskService;
use task_api::services::tasks::store::{NewTask, StoreError, TaskRecord, TaskStatus, TaskStore};
use task_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// In-memory `TaskStore` with the same owner-filter discipline as the
/// Postgres implementation. Also counts store calls so tests can assert
/// that rejected requests never reach persistence.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Vec<TaskRecord>>,
    calls: AtomicUsize,
}

impl MemoryTaskStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<TaskRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tasks = self.tasks.lock().unwrap();

        // Reverse insertion order first so the stable sort breaks
        // created_at ties in favor of the most recently inserted row.
        let mut owned: Vec<TaskRecord> = tasks
            .iter()
            .rev()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(owned)
    }

    async fn insert(&self, task: NewTask) -> Result<TaskRecord, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let record = TaskRecord {
            id: Uuid::new_v4(),
            title: task.title,
            status: task.status,
            owner_id: task.owner_id,
            created_at: now,
            updated_at: now,
        };

        self.tasks.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_owned(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
    ) -> Result<Option<TaskRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let tasks = self.tasks.lock().unwrap();

        Ok(tasks
            .iter()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
            .cloned())
    }

    async fn update_title(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        title: &str,
    ) -> Result<Option<TaskRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();

        Ok(tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
            .map(|t| {
                t.title = title.to_string();
                t.updated_at = Utc::now();
                t.clone()
            }))
    }

    async fn update_status(
        &self,
        owner_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<Option<TaskRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();

        Ok(tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
            .map(|t| {
                t.status = status;
                t.updated_at = Utc::now();
                t.clone()
            }))
    }

    async fn delete(&self, owner_id: Uuid, task_id: Uuid) -> Result<bool, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut tasks = self.tasks.lock().unwrap();

        let before = tasks.len();
        tasks.retain(|t| !(t.id == task_id && t.owner_id == owner_id));
        Ok(tasks.len() < before)
    }
}

/// A `TaskStore` whose every call fails, for driving the store-failure
/// branches of the HTTP error mapping.
pub struct FailingTaskStore {
    failure: StoreFailure,
}

enum StoreFailure {
    Unavailable,
    Backend,
}

impl FailingTaskStore {
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            failure: StoreFailure::Unavailable,
        })
    }

    pub fn backend() -> Arc<Self> {
        Arc::new(Self {
            failure: StoreFailure::Backend,
        })
    }

    fn err(&self) -> StoreError {
        match self.failure {
            StoreFailure::Unavailable => {
                StoreError::Unavailable(anyhow::anyhow!("connection refused"))
            }
            StoreFailure::Backend => StoreError::Backend(anyhow::anyhow!("row decode failed")),
        }
    }
}

#[async_trait::async_trait]
impl TaskStore for FailingTaskStore {
    async fn list_for_owner(&self, _owner_id: Uuid) -> Result<Vec<TaskRecord>, StoreError> {
        Err(self.err())
    }

    async fn insert(&self, _task: NewTask) -> Result<TaskRecord, StoreError> {
        Err(self.err())
    }

    async fn get_owned(
        &self,
        _owner_id: Uuid,
        _task_id: Uuid,
    ) -> Result<Option<TaskRecord>, StoreError> {
        Err(self.err())
    }

    async fn update_title(
        &self,
        _owner_id: Uuid,
        _task_id: Uuid,
        _title: &str,
    ) -> Result<Option<TaskRecord>, StoreError> {
        Err(self.err())
    }

    async fn update_status(
        &self,
        _owner_id: Uuid,
        _task_id: Uuid,
        _status: TaskStatus,
    ) -> Result<Option<TaskRecord>, StoreError> {
        Err(self.err())
    }

    async fn delete(&self, _owner_id: Uuid, _task_id: Uuid) -> Result<bool, StoreError> {
        Err(self.err())
    }
}

pub fn principal(subject_id: Uuid) -> Principal {
    Principal {
        subject_id,
        email: None,
    }
}

pub fn service(store: Arc<MemoryTaskStore>) -> TaskService {
    TaskService::new(store)
}

fn sign(claims: &serde_json::Value) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap()
}

pub fn token_for(subject_id: Uuid) -> String {
    sign(&json!({
        "sub": subject_id.to_string(),
        "email": "test@example.com",
        "exp": Utc::now().timestamp() + 600,
    }))
}

pub fn expired_token_for(subject_id: Uuid) -> String {
    sign(&json!({
        "sub": subject_id.to_string(),
        "exp": Utc::now().timestamp() - 60,
    }))
}

pub fn test_config() -> Config {
    Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url: String::new(),
        app_env: AppEnv::Development,
        cors_allowed_origins: Vec::new(),
        auth_secret: TEST_SECRET.to_string(),
        access_token_leeway_seconds: 0,
    }
}

pub fn test_state(store: Arc<dyn TaskStore>) -> AppState {
    let config = test_config();
    let verifier = Arc::new(TokenVerifier::new(
        &config.auth_secret,
        config.access_token_leeway_seconds,
    ));

    AppState::new(verifier, TaskService::new(store))
}

/// The real router (auth middleware, error mapping, routes) over the
/// given store.
pub fn test_router(store: Arc<dyn TaskStore>) -> Router {
    app::build_router(test_state(store), &test_config())
}
