//! Bearer token 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を検証し、sub を AuthCtx に入れる
//! - 失敗理由 (missing/expired/forged/...) は warn ログのみ。クライアントには
//!   一律 401 を返す（理由を区別させない）
//! - DB には一切触れない：検証が通るまで persistence アクセスは発生しない

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Apply authentication to a protected subtree.
///
/// 例：
/// ```ignore
/// let tasks = task_routes();
/// let tasks = middleware::auth::access::apply(tasks, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    // Prefix / signature / exp / sub checks live in the verifier.
    let principal = match state.verifier.verify_header(header_value) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(principal));

    Ok(next.run(req).await)
}
