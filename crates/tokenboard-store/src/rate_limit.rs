//! Upload rate limiting
//!
//! Fixed-window limiter keyed by client identity. State is an explicit store
//! of per-key counters with expiry timestamps, not process-global memory, so
//! it can be constructed per service instance and tested with an injected
//! clock.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Uploads allowed per key per window
    pub max_uploads: u32,
    /// Window length
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_uploads: 10,
            window: Duration::hours(24),
        }
    }
}

impl RateLimitConfig {
    /// Create a new config
    #[must_use]
    pub fn new(max_uploads: u32, window: Duration) -> Self {
        Self {
            max_uploads,
            window,
        }
    }

    /// Allow `max_uploads` per day
    #[must_use]
    pub fn per_day(max_uploads: u32) -> Self {
        Self::new(max_uploads, Duration::hours(24))
    }
}

#[derive(Debug, Clone)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Fixed-window upload limiter keyed by client identity
///
/// # Examples
/// ```
/// use tokenboard_store::rate_limit::{RateLimitConfig, UploadRateLimiter};
/// use chrono::Duration;
///
/// let limiter = UploadRateLimiter::new(RateLimitConfig::new(2, Duration::hours(1)));
/// assert!(limiter.acquire("203.0.113.7"));
/// assert!(limiter.acquire("203.0.113.7"));
/// assert!(!limiter.acquire("203.0.113.7"));
/// assert!(limiter.acquire("198.51.100.2"));
/// ```
#[derive(Debug)]
pub struct UploadRateLimiter {
    config: RateLimitConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl UploadRateLimiter {
    /// Create a new limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Try to admit one upload for `key` now
    pub fn acquire(&self, key: &str) -> bool {
        self.acquire_at(key, Utc::now())
    }

    /// Try to admit one upload for `key` at `now` (injectable clock)
    pub fn acquire_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        match windows.get_mut(key) {
            Some(window) if now < window.reset_at => {
                if window.count >= self.config.max_uploads {
                    warn!(key, "upload rate limit hit");
                    return false;
                }
                window.count += 1;
                true
            }
            _ => {
                windows.insert(
                    key.to_string(),
                    Window {
                        count: 1,
                        reset_at: now + self.config.window,
                    },
                );
                true
            }
        }
    }

    /// Uploads `key` may still make in its current window
    pub fn remaining(&self, key: &str) -> u32 {
        self.remaining_at(key, Utc::now())
    }

    /// Remaining quota at `now` (injectable clock)
    pub fn remaining_at(&self, key: &str, now: DateTime<Utc>) -> u32 {
        let windows = self.windows.lock().expect("rate limiter mutex poisoned");
        match windows.get(key) {
            Some(window) if now < window.reset_at => {
                self.config.max_uploads.saturating_sub(window.count)
            }
            _ => self.config.max_uploads,
        }
    }

    /// Drop expired windows; returns how many were removed
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now())
    }

    /// Drop windows already expired at `now` (injectable clock)
    pub fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");
        let before = windows.len();
        windows.retain(|_, window| now < window.reset_at);
        before - windows.len()
    }
}
