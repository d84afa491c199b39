use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by caller IP. Used two ways: the
/// whole API shares one budget counted on every request, and login has a
/// separate budget counted only against failed attempts.
pub struct RateLimiter {
    max: u32,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    pub fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request against the budget; false means over the limit.
    pub fn try_acquire(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let window = hits.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }
        if window.count >= self.max {
            return false;
        }
        window.count += 1;
        true
    }

    /// Read-only check: does this caller still have budget left?
    pub fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        match hits.get_mut(&ip) {
            Some(window) => {
                if now.duration_since(window.started) >= self.window {
                    window.started = now;
                    window.count = 0;
                }
                window.count < self.max
            }
            None => true,
        }
    }

    /// Count one hit without gating, used for failed login attempts.
    pub fn record(&self, ip: IpAddr) {
        let now = Instant::now();
        let mut hits = self.hits.lock().unwrap_or_else(|e| e.into_inner());
        let window = hits.entry(ip).or_insert(Window {
            started: now,
            count: 0,
        });
        if now.duration_since(window.started) >= self.window {
            window.started = now;
            window.count = 0;
        }
        window.count += 1;
    }
}

/// Middleware applying the shared API budget to every request.
pub async fn api_rate_limit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    if !state.api_limiter.try_acquire(addr.ip()) {
        warn!(ip = %addr.ip(), "api rate limit exceeded");
        return ApiError::TooManyRequests.into_response();
    }
    next.run(req).await
}
