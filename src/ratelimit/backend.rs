//! Rate limiter trait for the request-handling layer.

use super::clock::Clock;
use super::decision::{AdmissionResult, StatusSnapshot};
use super::limiter::SlidingWindowLimiter;
use crate::error::Result;

/// Trait for keyed rate limiter implementations.
///
/// A host request layer (HTTP middleware, RPC interceptor) can hold an
/// `Arc<dyn KeyedRateLimiter>` and stay independent of the concrete limiter
/// and its clock.
pub trait KeyedRateLimiter: Send + Sync {
    /// Check and record a request for `key`.
    fn allow_request(&self, key: &str) -> Result<AdmissionResult>;

    /// Report usage for `key` without recording a request.
    fn get_user_status(&self, key: &str) -> StatusSnapshot;

    /// Forget every recorded request for `key`.
    fn reset_key(&self, key: &str);
}

impl<C: Clock> KeyedRateLimiter for SlidingWindowLimiter<C> {
    fn allow_request(&self, key: &str) -> Result<AdmissionResult> {
        SlidingWindowLimiter::allow_request(self, key)
    }

    fn get_user_status(&self, key: &str) -> StatusSnapshot {
        SlidingWindowLimiter::get_user_status(self, key)
    }

    fn reset_key(&self, key: &str) {
        SlidingWindowLimiter::reset_key(self, key)
    }
}
