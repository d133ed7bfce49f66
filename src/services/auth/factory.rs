/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    // Secret length was validated in Config::from_env (startup error).
    Arc::new(TokenVerifier::new(
        &config.auth_secret,
        config.access_token_leeway_seconds,
    ))
}
