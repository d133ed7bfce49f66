/*!
 * Token verification services.
 *
 * Public API:
 * - TokenVerifier / Principal / AccessJwtError
 * - factory::build_token_verifier
 */

pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessJwtError, Principal, TokenVerifier};
