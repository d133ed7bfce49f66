/*
 * Responsibility
 * - sqlx エラーを store 契約のエラーに分類する
 */
use crate::services::tasks::store::StoreError;

/// Connectivity-class failures become `Unavailable` (503, retryable by the
/// caller); everything else is a plain backend failure (500).
pub fn classify_sqlx(e: sqlx::Error) -> StoreError {
    let unavailable = matches!(
        &e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_)
    );

    if unavailable {
        StoreError::Unavailable(e.into())
    } else {
        StoreError::Backend(e.into())
    }
}
