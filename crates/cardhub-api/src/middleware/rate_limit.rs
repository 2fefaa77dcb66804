//! Fixed-window per-IP rate limiting for the public submission route.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use dashmap::DashMap;
use tracing::warn;

use cardhub_core::config::app::RateLimitConfig;
use cardhub_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// In-memory fixed-window rate limiter keyed by client IP.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<String, Window>>,
    max_requests: u32,
    window: Duration,
}

struct Window {
    started: Instant,
    count: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_seconds),
        }
    }

    /// Count a request against `key`; false means over the limit.
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entry = self.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        entry.count <= self.max_requests
    }

    /// Drop windows that have fully expired.
    pub fn prune(&self) {
        let now = Instant::now();
        self.windows
            .retain(|_, w| now.duration_since(w.started) < self.window);
    }

    /// Spawn a background task pruning expired windows once per window.
    ///
    /// Without this the map keeps one entry per distinct client address
    /// ever seen.
    pub fn start_pruning(&self) {
        let limiter = self.clone();
        let every = self.window.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(every);
            tick.tick().await; // first tick fires immediately
            loop {
                tick.tick().await;
                limiter.prune();
            }
        });
    }
}

/// Middleware enforcing the per-IP limit on the wrapped routes.
pub async fn enforce(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Honor a proxy-provided client address when present.
    let key = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| addr.ip().to_string());

    if !state.rate_limiter.check(&key) {
        warn!(ip = %key, "Submission rate limit exceeded");
        return Err(AppError::rate_limit(
            "Too many submissions from this address, try again later",
        )
        .into());
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max: u32, secs: u64) -> RateLimiter {
        RateLimiter::new(&RateLimitConfig {
            max_requests: max,
            window_seconds: secs,
        })
    }

    #[test]
    fn allows_up_to_the_limit_then_blocks() {
        let rl = limiter(3, 60);
        assert!(rl.check("1.2.3.4"));
        assert!(rl.check("1.2.3.4"));
        assert!(rl.check("1.2.3.4"));
        assert!(!rl.check("1.2.3.4"));
    }

    #[test]
    fn ips_are_tracked_independently() {
        let rl = limiter(1, 60);
        assert!(rl.check("1.2.3.4"));
        assert!(rl.check("5.6.7.8"));
        assert!(!rl.check("1.2.3.4"));
    }

    #[test]
    fn prune_keeps_live_windows() {
        let rl = limiter(5, 3600);
        rl.check("1.2.3.4");
        rl.prune();
        assert_eq!(rl.windows.len(), 1);
    }

    #[test]
    fn prune_drops_expired_windows() {
        // A zero-length window makes every entry expired immediately.
        let rl = limiter(5, 0);
        for i in 0..100 {
            rl.check(&format!("10.0.0.{i}"));
        }
        assert_eq!(rl.windows.len(), 100);
        rl.prune();
        assert_eq!(rl.windows.len(), 0);
    }
}
