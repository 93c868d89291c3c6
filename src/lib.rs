//! Slidewin - Per-Key Sliding-Window Rate Limiting
//!
//! This crate implements an in-memory admission-control primitive that tracks
//! request timestamps per key and admits or rejects requests based on a rolling
//! time window. A single limiter instance is meant to be shared across
//! concurrently running request handlers.

pub mod config;
pub mod error;
pub mod ratelimit;

pub use error::{LimiterError, Result};
pub use ratelimit::{
    AdmissionResult, KeyedRateLimiter, LimiterConfig, SlidingWindowLimiter, StatusSnapshot,
    Verdict,
};
