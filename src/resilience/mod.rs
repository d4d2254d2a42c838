//! Caller-side resilience helpers.
//!
//! The pipeline never retries. [`RetryPolicy`] wraps a call from the outside
//! and uses the error classification to decide whether another attempt is
//! both useful and safe.

mod retry;

pub use retry::{RetryConfig, RetryPolicy};
