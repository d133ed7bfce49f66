/*
 * Responsibility
 * - Bearer credential の検証 (prefix → 署名 → exp → sub) と Principal の生成
 * - (credential, 現在時刻, shared secret) の純関数。DB lookup なし・副作用なし
 */
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use uuid::Uuid;

/// Discriminated verification failures.
///
/// Every kind maps to the same uniform 401 at the boundary; the distinction
/// exists for logging and tests only and must never reach the client.
#[derive(Debug, thiserror::Error)]
pub enum AccessJwtError {
    #[error("missing or malformed Authorization header")]
    MissingCredential,

    /// Wrong secret, wrong algorithm, tampered payload, or otherwise
    /// undecodable token.
    #[error("signature verification failed")]
    InvalidSignature(#[source] jsonwebtoken::errors::Error),

    #[error("token expired")]
    Expired,

    #[error("missing or empty 'sub' claim")]
    MissingSubject,

    /// Project convention: subjects are UUIDs.
    #[error("invalid 'sub' claim (expected UUID)")]
    InvalidSubject,
}

/// Raw claims as carried by the token.
#[derive(Debug, Deserialize)]
struct AccessTokenClaims {
    #[serde(default)]
    sub: String,

    // Required by Validation; kept here so serde does not drop it.
    #[allow(dead_code)]
    exp: u64,

    #[serde(default)]
    email: Option<String>,
}

/// The authenticated identity for one request.
///
/// Constructed fresh per request by [`TokenVerifier::verify_header`],
/// discarded at request end. `email` is informational only and must not
/// feed authorization decisions.
#[derive(Debug, Clone)]
pub struct Principal {
    pub subject_id: Uuid,
    pub email: Option<String>,
}

/// HS256 access-token verifier over a process-wide shared secret.
///
/// - Stateless: verification is a pure function of (credential, current
///   time, secret). No I/O beyond the cryptographic check.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    /// `secret` length is validated at startup by `Config`; this constructor
    /// assumes it already passed.
    pub fn new(secret: &str, leeway_seconds: u64) -> Self {
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // Default leeway is 60s; exp must be exact unless config says otherwise.
        validation.leeway = leeway_seconds;

        Self {
            decoding_key,
            validation,
        }
    }

    /// Verify the raw `Authorization` header value.
    ///
    /// Handles the `Bearer ` transport prefix, then delegates to
    /// [`Self::verify_token`]. This is the entry-point for middleware.
    pub fn verify_header(&self, header: Option<&str>) -> Result<Principal, AccessJwtError> {
        let header = header.ok_or(AccessJwtError::MissingCredential)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AccessJwtError::MissingCredential)?;

        self.verify_token(token)
    }

    /// Verify a compact token (prefix already stripped).
    ///
    /// `jsonwebtoken::Validation` checks the signature and `exp`; on top of
    /// that the subject claim must be present, non-empty and a UUID.
    pub fn verify_token(&self, token: &str) -> Result<Principal, AccessJwtError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AccessJwtError::Expired,
            _ => AccessJwtError::InvalidSignature(e),
        })?;

        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::MissingSubject);
        }

        let subject_id =
            Uuid::parse_str(&claims.sub).map_err(|_| AccessJwtError::InvalidSubject)?;

        Ok(Principal {
            subject_id,
            email: claims.email,
        })
    }
}
