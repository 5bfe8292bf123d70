//! In-process rate limiting.
//!
//! Fixed-window counters keyed by client IP and endpoint category, held in
//! a DashMap. Window sizes mirror the limits the public site has always
//! enforced per 15-minute window (uploads per hour).

use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::debug;

use crate::state::AppState;

/// Rate limit configuration for different endpoint categories.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// General API requests: (max requests, window duration).
    pub api: (u32, Duration),
    /// Login / auth endpoints.
    pub auth: (u32, Duration),
    /// Admin endpoints.
    pub admin: (u32, Duration),
    /// File uploads.
    pub upload: (u32, Duration),
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            api: (100, Duration::from_secs(15 * 60)),
            auth: (20, Duration::from_secs(15 * 60)),
            admin: (50, Duration::from_secs(15 * 60)),
            upload: (20, Duration::from_secs(60 * 60)),
        }
    }
}

/// A single fixed window: start time and request count.
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window rate limiter.
#[derive(Debug)]
pub struct RateLimiter {
    windows: DashMap<String, Window>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    /// Check if a request should be rate limited.
    ///
    /// Returns Ok(()) if allowed, Err with retry-after seconds if limited.
    pub fn check(&self, category: &str, identifier: &str) -> Result<(), u64> {
        let (limit, window) = self.get_limit(category);
        let key = format!("rate:{category}:{identifier}");
        let now = Instant::now();

        let mut entry = self.windows.entry(key).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;

        if entry.count > limit {
            let elapsed = now.duration_since(entry.started);
            let retry_after = window.saturating_sub(elapsed).as_secs().max(1);
            debug!(
                category = category,
                identifier = identifier,
                count = entry.count,
                limit = limit,
                "rate limit exceeded"
            );
            Err(retry_after)
        } else {
            Ok(())
        }
    }

    /// Drop windows that expired more than one full window ago, bounding
    /// memory across distinct client IPs.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.windows.retain(|key, window| {
            let category = key.split(':').nth(1).unwrap_or("api");
            let (_, duration) = self.get_limit(category);
            now.duration_since(window.started) < duration * 2
        });
    }

    /// Get the rate limit for a category.
    fn get_limit(&self, category: &str) -> (u32, Duration) {
        match category {
            "auth" => self.config.auth,
            "admin" => self.config.admin,
            "upload" => self.config.upload,
            _ => self.config.api,
        }
    }
}

/// Categorize a request path for rate limiting.
///
/// The most specific category wins; paths outside the API are not limited.
pub fn categorize_path(path: &str) -> Option<&'static str> {
    if path.starts_with("/api/admin/upload") {
        Some("upload")
    } else if path.starts_with("/api/admin/") {
        Some("admin")
    } else if path.starts_with("/api/login")
        || path.starts_with("/api/callback")
        || path.starts_with("/api/logout")
        || path.starts_with("/api/auth")
    {
        Some("auth")
    } else if path.starts_with("/api/") {
        Some("api")
    } else {
        None
    }
}

/// Get the client identifier (IP address) for rate limiting.
pub fn get_client_id(
    addr: Option<std::net::SocketAddr>,
    headers: &axum::http::HeaderMap,
) -> String {
    // Check X-Forwarded-For header first (for proxied requests)
    if let Some(forwarded) = headers.get("x-forwarded-for")
        && let Ok(value) = forwarded.to_str()
    {
        // Take the first IP in the chain
        if let Some(ip) = value.split(',').next() {
            return ip.trim().to_string();
        }
    }

    // Check X-Real-IP header
    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(value) = real_ip.to_str()
    {
        return value.to_string();
    }

    // Fall back to connection address
    addr.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Axum middleware enforcing the per-category limits.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(category) = categorize_path(request.uri().path()) else {
        return next.run(request).await;
    };

    let addr = request
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0);
    let client_id = get_client_id(addr, request.headers());

    match state.rate_limiter().check(category, &client_id) {
        Ok(()) => next.run(request).await,
        Err(retry_after) => rate_limit_response(retry_after),
    }
}

/// Rate limit exceeded response.
pub fn rate_limit_response(retry_after: u64) -> Response {
    (
        StatusCode::TOO_MANY_REQUESTS,
        [
            ("retry-after", retry_after.to_string()),
            ("content-type", "application/json".to_string()),
        ],
        format!(r#"{{"message":"Too many requests. Please try again later.","retryAfter":{retry_after}}}"#),
    )
        .into_response()
}
