//! Admission results and status snapshots returned by the limiter.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

/// Outcome-specific part of an admission result.
///
/// An admitted caller needs headroom; a rejected caller needs a wait time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    /// The request was admitted and recorded.
    Allowed {
        /// Requests still admissible in the current window
        remaining: u64,
    },
    /// The request was rejected and not recorded.
    Rejected {
        /// Whole seconds until a repeat request would be admitted
        retry_after_seconds: u64,
    },
}

/// Result of a single `allow_request` evaluation.
///
/// Only the limiter builds these, so `allowed` always agrees with the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdmissionResult {
    allowed: bool,
    key: String,
    limit: u64,
    #[serde(rename = "window_secs", serialize_with = "serialize_secs")]
    window: Duration,
    current_count: u64,
    #[serde(flatten)]
    verdict: Verdict,
}

impl AdmissionResult {
    pub(crate) fn admit(
        key: &str,
        limit: u64,
        window: Duration,
        current_count: u64,
        remaining: u64,
    ) -> Self {
        Self {
            allowed: true,
            key: key.to_owned(),
            limit,
            window,
            current_count,
            verdict: Verdict::Allowed { remaining },
        }
    }

    pub(crate) fn reject(
        key: &str,
        limit: u64,
        window: Duration,
        current_count: u64,
        retry_after_seconds: u64,
    ) -> Self {
        Self {
            allowed: false,
            key: key.to_owned(),
            limit,
            window,
            current_count,
            verdict: Verdict::Rejected {
                retry_after_seconds,
            },
        }
    }

    /// Whether the request was admitted.
    pub fn allowed(&self) -> bool {
        self.allowed
    }

    /// The key the request was counted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Configured limit.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Configured window.
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Requests counted after this evaluation; the pre-operation count when rejected.
    pub fn current_count(&self) -> u64 {
        self.current_count
    }

    /// Remaining headroom or retry delay.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// Remaining headroom, if the request was admitted.
    pub fn remaining(&self) -> Option<u64> {
        match self.verdict {
            Verdict::Allowed { remaining } => Some(remaining),
            Verdict::Rejected { .. } => None,
        }
    }

    /// Whole seconds to wait, if the request was rejected.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self.verdict {
            Verdict::Allowed { .. } => None,
            Verdict::Rejected {
                retry_after_seconds,
            } => Some(retry_after_seconds),
        }
    }

    /// Retry delay as a `Duration`, if the request was rejected.
    pub fn retry_after(&self) -> Option<Duration> {
        self.retry_after_secs().map(Duration::from_secs)
    }

    /// Human-readable summary suitable for a response body.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AdmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.verdict {
            Verdict::Allowed { remaining } => {
                write!(f, "Request allowed. {} requests remaining.", remaining)
            }
            Verdict::Rejected {
                retry_after_seconds,
            } => write!(
                f,
                "Rate limit exceeded. Try again in {} seconds.",
                retry_after_seconds
            ),
        }
    }
}

/// Point-in-time usage for a key, taken without making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    /// The key that was queried
    pub key: String,
    /// Requests counted inside the window
    pub current_count: u64,
    /// Configured limit
    pub limit: u64,
    /// Requests still admissible, never negative
    pub remaining: u64,
}

fn serialize_secs<S: Serializer>(window: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(window.as_secs_f64())
}
