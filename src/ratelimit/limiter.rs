//! Core sliding-window rate limiter implementation.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::clock::{Clock, SystemClock};
use super::decision::{AdmissionResult, StatusSnapshot};
use super::history::KeyHistory;
use crate::error::{LimiterError, Result};

/// Default number of requests admitted per key within the window.
pub const DEFAULT_LIMIT: u64 = 5;
/// Default length of the trailing window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

/// Validated limiter configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    limit: u64,
    window: Duration,
}

impl LimiterConfig {
    /// Create a configuration, rejecting a zero limit or a zero window.
    pub fn new(limit: u64, window: Duration) -> Result<Self> {
        if limit == 0 {
            return Err(LimiterError::Config("limit must be positive".to_string()));
        }
        if window.is_zero() {
            return Err(LimiterError::Config("window must be positive".to_string()));
        }
        Ok(Self { limit, window })
    }

    /// Create a configuration from raw signed values, such as those read from
    /// a settings file.
    pub fn from_secs(limit: i64, window_secs: f64) -> Result<Self> {
        let limit = u64::try_from(limit)
            .map_err(|_| LimiterError::Config(format!("limit must be positive, got {}", limit)))?;
        let window = Duration::try_from_secs_f64(window_secs).map_err(|_| {
            LimiterError::Config(format!("window must be positive, got {}", window_secs))
        })?;
        Self::new(limit, window)
    }

    /// Maximum admitted requests per key within the window.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Length of the trailing window.
    pub fn window(&self) -> Duration {
        self.window
    }
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            window: DEFAULT_WINDOW,
        }
    }
}

/// Per-key sliding-window rate limiter.
///
/// The limiter is thread-safe and meant to be shared (e.g. behind an `Arc`)
/// across request handlers. Each key's history sits behind its own mutex, so
/// evaluations for one key are serialized while unrelated keys proceed in
/// parallel. Expired timestamps are evicted lazily on the next access to a key.
pub struct SlidingWindowLimiter<C: Clock = SystemClock> {
    config: LimiterConfig,
    clock: C,
    /// Request histories indexed by key
    histories: DashMap<String, Arc<Mutex<KeyHistory>>>,
}

impl SlidingWindowLimiter<SystemClock> {
    /// Create a limiter driven by the system clock.
    pub fn new(config: LimiterConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }

    /// Validate `limit` and `window` and create a limiter in one step.
    pub fn try_new(limit: u64, window: Duration) -> Result<Self> {
        Ok(Self::new(LimiterConfig::new(limit, window)?))
    }
}

impl<C: Clock> SlidingWindowLimiter<C> {
    /// Create a limiter with a custom time source.
    pub fn with_clock(config: LimiterConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            histories: DashMap::new(),
        }
    }

    /// The configuration this limiter was built with.
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Check whether a request for `key` is admitted, recording it if so.
    ///
    /// Rejected requests are not recorded. Fails with
    /// [`LimiterError::InvalidKey`] for an empty key without touching any state.
    pub fn allow_request(&self, key: &str) -> Result<AdmissionResult> {
        if key.is_empty() {
            return Err(LimiterError::InvalidKey);
        }

        trace!(key = %key, "Checking rate limit");

        let limit = self.config.limit;
        let window = self.config.window;
        let history = self.history_for(key);
        let mut history = history.lock();

        // Sampled under the key lock so timestamps stay ordered per key.
        let now = self.clock.now();
        history.evict_expired(now, window);
        let count = history.len() as u64;

        if count >= limit {
            // floor(oldest + window - now) + 1, without forming `oldest + window`
            let retry_after = match history.oldest() {
                Some(oldest) => {
                    window
                        .saturating_sub(now.saturating_duration_since(oldest))
                        .as_secs()
                        .saturating_add(1)
                }
                None => 1,
            };
            debug!(
                key = %key,
                current_count = count,
                retry_after_secs = retry_after,
                "Rate limit exceeded"
            );
            return Ok(AdmissionResult::reject(key, limit, window, count, retry_after));
        }

        history.record(now);
        Ok(AdmissionResult::admit(
            key,
            limit,
            window,
            count + 1,
            limit - count - 1,
        ))
    }

    /// Report current usage for `key` without making a request.
    ///
    /// Expired entries are evicted first so the count is never inflated. An
    /// unseen key reports zero usage and is not added to the map.
    pub fn get_user_status(&self, key: &str) -> StatusSnapshot {
        let limit = self.config.limit;
        let current_count = match self.existing_history(key) {
            Some(history) => {
                let mut history = history.lock();
                history.evict_expired(self.clock.now(), self.config.window);
                history.len() as u64
            }
            None => 0,
        };

        StatusSnapshot {
            key: key.to_owned(),
            current_count,
            limit,
            remaining: limit.saturating_sub(current_count),
        }
    }

    /// Forget every recorded request for `key`.
    ///
    /// The key stays tracked with a zero count. Unseen keys are ignored.
    pub fn reset_key(&self, key: &str) {
        if let Some(history) = self.existing_history(key) {
            history.lock().clear();
            debug!(key = %key, "Rate limit history reset");
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.histories.len()
    }

    /// Forget every recorded request for every key.
    ///
    /// Keys stay tracked with a zero count, as with [`reset_key`](Self::reset_key).
    /// This is primarily useful for tests and administrative resets.
    pub fn clear(&self) {
        for entry in self.histories.iter() {
            entry.value().lock().clear();
        }
        debug!(tracked_keys = self.histories.len(), "All rate limit histories cleared");
    }

    fn existing_history(&self, key: &str) -> Option<Arc<Mutex<KeyHistory>>> {
        self.histories.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Get or create the history handle for `key`.
    ///
    /// The map shard is locked only long enough to clone the handle.
    fn history_for(&self, key: &str) -> Arc<Mutex<KeyHistory>> {
        if let Some(history) = self.existing_history(key) {
            return history;
        }

        let entry = self.histories.entry(key.to_owned()).or_insert_with(|| {
            debug!(
                key = %key,
                limit = self.config.limit,
                window = ?self.config.window,
                "Tracking new rate limit key"
            );
            Arc::new(Mutex::new(KeyHistory::new()))
        });
        Arc::clone(entry.value())
    }
}

impl Default for SlidingWindowLimiter<SystemClock> {
    fn default() -> Self {
        Self::new(LimiterConfig::default())
    }
}
