//! Fixed-window rate limiting middleware.
//!
//! One counter is shared by every request on the routes it is layered onto
//! (the `/api` routes). When the window expires the counter resets. Limits
//! come from [`RateLimitConfig`]; `max_requests = 0` disables limiting.

use axum::{
    body::Body,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use social_graph_core::RateLimitConfig;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Shared rate limiter state.
#[derive(Debug)]
pub struct RateLimiterState {
    /// Maximum requests per window.
    pub max_requests: u64,
    /// Window duration in seconds.
    pub window_secs: u64,
    /// Requests counted in the current window.
    count: AtomicU64,
    /// Window start, seconds since process start.
    window_start: AtomicU64,
}

impl RateLimiterState {
    /// Creates a limiter from configuration, or `None` when limiting is
    /// disabled.
    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Option<Arc<Self>> {
        config
            .is_enabled()
            .then(|| Self::new(config.max_requests, config.window_secs))
    }

    /// Creates a rate limiter with explicit parameters.
    #[must_use]
    pub fn new(max_requests: u64, window_secs: u64) -> Arc<Self> {
        Arc::new(Self {
            max_requests,
            window_secs,
            count: AtomicU64::new(0),
            window_start: AtomicU64::new(current_epoch_secs()),
        })
    }

    /// Try to acquire a request slot. Returns true if allowed, false if rate limited.
    pub fn try_acquire(&self) -> bool {
        self.try_acquire_at(current_epoch_secs())
    }

    fn try_acquire_at(&self, now: u64) -> bool {
        let window_start = self.window_start.load(Ordering::Relaxed);

        if now.saturating_sub(window_start) >= self.window_secs {
            // CAS so only one request resets an expired window.
            if self
                .window_start
                .compare_exchange(window_start, now, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                self.count.store(1, Ordering::Relaxed);
                return true;
            }
        }

        let prev = self.count.fetch_add(1, Ordering::Relaxed);
        prev < self.max_requests
    }

    /// Returns remaining requests in the current window.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.max_requests
            .saturating_sub(self.count.load(Ordering::Relaxed))
    }

    /// Seconds until the current window resets.
    #[must_use]
    pub fn retry_after_secs(&self) -> u64 {
        self.retry_after_at(current_epoch_secs())
    }

    fn retry_after_at(&self, now: u64) -> u64 {
        let elapsed = now.saturating_sub(self.window_start.load(Ordering::Relaxed));
        self.window_secs.saturating_sub(elapsed).max(1)
    }
}

/// Returns seconds elapsed on a monotonic clock since first use.
fn current_epoch_secs() -> u64 {
    static START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();
    let start = START.get_or_init(Instant::now);
    start.elapsed().as_secs()
}

/// Rate limiting middleware.
///
/// Must be used with `axum::Extension<Option<Arc<RateLimiterState>>>`.
pub async fn rate_limit_middleware(
    limiter: axum::Extension<Option<Arc<RateLimiterState>>>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let Some(ref limiter) = *limiter else {
        return Ok(next.run(request).await);
    };

    if limiter.try_acquire() {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            path = %request.uri().path(),
            max_requests = limiter.max_requests,
            "Rate limit exceeded"
        );
        Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({
                "error": "Too many requests from this client, please try again later.",
                "retry_after_secs": limiter.retry_after_secs()
            })),
        ))
    }
}
