/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - credential の検証ロジックは middleware/services 側の責務
 * - email は表示用。authorization の判断には使わない
 */

use crate::services::auth::Principal;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// リクエスト毎に作り直され、リクエスト終了とともに破棄される。
/// キャッシュも永続化もしない。
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub principal: Principal,
}

impl AuthCtx {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }
}
