//! API key authentication middleware.
//!
//! This middleware intercepts every `/api` request to:
//! 1. Extract the API key from the Authorization header
//! 2. Hash it and check the digest against the configured keys
//! 3. Reject unauthorized requests with HTTP 401

use crate::{AppState, error::AppError};
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of an API key.
///
/// Configuration stores these digests, never the keys themselves.
pub fn hash_api_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())
}

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract `Authorization: Bearer <key>` header from request
/// 2. Hash the `<key>` using SHA-256
/// 3. Look the digest up in `AppState::api_key_hashes`
/// 4. If found: call next handler
/// 5. If not found: return 401 Unauthorized error
///
/// # Headers
///
/// Expected header format:
/// ```text
/// Authorization: Bearer abc123xyz
/// ```
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let api_key = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            tracing::debug!(path = %request.uri().path(), "Missing bearer credential");
            AppError::InvalidApiKey
        })?;

    let key_hash = hash_api_key(api_key);
    if !state.api_key_hashes.iter().any(|h| *h == key_hash) {
        tracing::debug!(path = %request.uri().path(), "Unknown API key");
        return Err(AppError::InvalidApiKey);
    }

    Ok(next.run(request).await)
}
