//! Rate limiting logic and state management.

mod backend;
mod clock;
mod decision;
mod history;
mod limiter;

pub use backend::KeyedRateLimiter;
pub use clock::{Clock, MockClock, SystemClock};
pub use decision::{AdmissionResult, StatusSnapshot, Verdict};
pub use history::KeyHistory;
pub use limiter::{LimiterConfig, SlidingWindowLimiter, DEFAULT_LIMIT, DEFAULT_WINDOW};
