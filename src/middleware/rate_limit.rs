use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Window {
    start: Instant,
    count: u32,
}

/// Fixed-window limiter shared by every clone.
#[derive(Clone, Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Arc<Mutex<Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32) -> Self {
        Self {
            limit: limit.max(1),
            window: Arc::new(Mutex::new(Window {
                start: Instant::now(),
                count: 0,
            })),
        }
    }

    /// `Ok(())` when the request fits in the current window, otherwise the
    /// time left until the window resets.
    fn acquire(&self, now: Instant) -> Result<(), Duration> {
        let mut window = match self.window.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let elapsed = now.saturating_duration_since(window.start);
        if elapsed >= WINDOW {
            window.start = now;
            window.count = 0;
        }
        if window.count < self.limit {
            window.count += 1;
            Ok(())
        } else {
            Err(WINDOW.saturating_sub(elapsed))
        }
    }
}

pub async fn rps_middleware(
    State(limiter): State<RateLimiter>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if let Err(retry_after) = limiter.acquire(Instant::now()) {
        tracing::warn!(path = %req.uri().path(), "Rate limit exceeded");
        let secs = retry_after.as_secs().max(1);
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "rate_limit_exceeded" })),
        )
            .into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        return response;
    }
    next.run(req).await
}

pub fn new_rps_state(rps: u32) -> RateLimiter {
    RateLimiter::new(rps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_per_window() {
        let limiter = RateLimiter::new(2);
        let start = Instant::now();
        assert!(limiter.acquire(start).is_ok());
        assert!(limiter.acquire(start).is_ok());
        assert!(limiter.acquire(start).is_err());
        assert!(limiter.acquire(start + WINDOW).is_ok());
    }

    #[test]
    fn zero_limit_still_admits_one_request() {
        let limiter = RateLimiter::new(0);
        let start = Instant::now();
        assert!(limiter.acquire(start).is_ok());
        assert!(limiter.acquire(start).is_err());
    }
}
