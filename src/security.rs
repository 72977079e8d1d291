use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::Result;

// =============================================================================
// Password Hashing
// =============================================================================

/// Hash a password with bcrypt at the given cost
///
/// bcrypt is CPU bound, so the work runs on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a login attempt against a stored bcrypt hash
pub async fn verify_password(password: String, stored_hash: String) -> Result<bool> {
    let is_valid =
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &stored_hash)).await??;
    Ok(is_valid)
}

// =============================================================================
// Bearer Tokens
// =============================================================================

/// JWT claims carried by a bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issue an HS256 JWT for a user, valid for `ttl_secs` from now
pub fn issue_token(user_id: i64, ttl_secs: i64, secret: &str) -> Result<String> {
    issue_token_at(user_id, chrono::Utc::now().timestamp(), ttl_secs, secret)
}

/// Issue a token as if it had been created at `issued_at`
pub fn issue_token_at(
    user_id: i64,
    issued_at: i64,
    ttl_secs: i64,
    secret: &str,
) -> Result<String> {
    let claims = Claims {
        sub: user_id.to_string(),
        iat: issued_at,
        exp: issued_at + ttl_secs,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Verify a bearer token, returning the user id it was issued for
///
/// Rejects tokens with a bad signature, a different algorithm, or an expired `exp`.
pub fn verify_token(token: &str, secret: &str) -> Option<i64> {
    let validation = Validation::new(Algorithm::HS256);
    let data = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Rejected bearer token: {}", e);
            return None;
        }
    };

    match data.claims.sub.parse() {
        Ok(user_id) => Some(user_id),
        Err(_) => {
            tracing::warn!("Bearer token subject is not a user id");
            None
        }
    }
}
