//! Per-key request history.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Timestamps of admitted requests for a single key, oldest first.
///
/// Timestamps are appended in arrival order, so expired entries are always
/// at the front and eviction is a series of cheap front pops.
#[derive(Debug, Default)]
pub struct KeyHistory {
    timestamps: VecDeque<Instant>,
}

impl KeyHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every timestamp `t` with `t <= now - window`.
    ///
    /// Returns the number of evicted entries.
    pub fn evict_expired(&mut self, now: Instant, window: Duration) -> usize {
        let mut evicted = 0;
        while let Some(&oldest) = self.timestamps.front() {
            if now.saturating_duration_since(oldest) < window {
                break;
            }
            self.timestamps.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Record an admitted request.
    pub fn record(&mut self, now: Instant) {
        self.timestamps.push_back(now);
    }

    /// The oldest timestamp still counted.
    pub fn oldest(&self) -> Option<Instant> {
        self.timestamps.front().copied()
    }

    /// Number of counted requests.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Whether no requests are counted.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Forget every recorded request.
    pub fn clear(&mut self) {
        self.timestamps.clear();
    }
}
