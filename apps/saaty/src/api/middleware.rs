//! # Request Throttling
//!
//! One token bucket shared by every route. `SAATY_RATE_LIMIT` sets the
//! requests per second (100 when unset or unreadable); `0` turns it off.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

const DEFAULT_RPS: u32 = 100;

/// The bucket every request draws from.
pub type Limiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Limiter for `SAATY_RATE_LIMIT`, or `None` when throttling is off.
#[must_use]
pub fn limiter_from_env() -> Option<Limiter> {
    limiter_for(std::env::var("SAATY_RATE_LIMIT").ok().as_deref())
}

fn limiter_for(setting: Option<&str>) -> Option<Limiter> {
    let rps = setting
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(DEFAULT_RPS);
    NonZeroU32::new(rps).map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))))
}

/// Answer 429 once the bucket is empty.
pub async fn throttle(
    State(limiter): State<Limiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if limiter.check().is_err() {
        tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
        return Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"));
    }
    Ok(next.run(request).await)
}
