//! # API Key Check
//!
//! When `SAATY_API_KEY` is set, every route except `/health` needs the key in
//! the `Authorization` header, either bare or as `Bearer <key>`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// The configured key, read once when the router is built.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    /// `None` when the key is empty.
    #[must_use]
    pub fn new(key: &str) -> Option<Self> {
        (!key.is_empty()).then(|| Self(Arc::from(key)))
    }

    /// Key from `SAATY_API_KEY`; `None` when unset or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var("SAATY_API_KEY")
            .ok()
            .and_then(|key| Self::new(&key))
    }

    /// Whether an `Authorization` value carries this key.
    ///
    /// The candidate is padded or cut to the key's length before comparing,
    /// so the time taken depends only on the key.
    fn accepts(&self, authorization: &str) -> bool {
        let candidate = authorization
            .strip_prefix("Bearer ")
            .unwrap_or(authorization)
            .as_bytes();
        let key = self.0.as_bytes();

        let padded: Vec<u8> = (0..key.len())
            .map(|i| candidate.get(i).copied().unwrap_or(0))
            .collect();
        let same_length = candidate.len().ct_eq(&key.len());
        bool::from(padded.ct_eq(key) & same_length)
    }
}

/// Reject requests without the key with 401.
pub async fn require_api_key(
    State(key): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let verdict = request
        .headers()
        .get(header::AUTHORIZATION)
        .map(|value| value.to_str().is_ok_and(|value| key.accepts(value)));

    match verdict {
        Some(true) => Ok(next.run(request).await),
        Some(false) => {
            tracing::warn!(path = %request.uri().path(), "Rejected request: wrong API key");
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
        None => {
            tracing::warn!(path = %request.uri().path(), "Rejected request: no API key");
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ApiKey {
        ApiKey::new("s3cret").expect("non-empty key")
    }

    #[test]
    fn empty_key_disables_checking() {
        assert!(ApiKey::new("").is_none());
    }

    #[test]
    fn bearer_and_bare_forms_accepted() {
        assert!(key().accepts("Bearer s3cret"));
        assert!(key().accepts("s3cret"));
    }

    #[test]
    fn near_misses_rejected() {
        assert!(!key().accepts("s3c"));
        assert!(!key().accepts("s3cret-and-more"));
        assert!(!key().accepts("Bearer "));
        assert!(!key().accepts("bearer s3cret"));
        assert!(!key().accepts(""));
    }
}
