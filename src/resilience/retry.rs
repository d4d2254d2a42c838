//! Retry policy with exponential backoff.

use crate::error::{SdkError, SdkResult, ServiceErrorKind};
use crate::pipeline::Operation;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts.
    pub max_retries: u32,
    /// Initial backoff duration.
    pub initial_backoff: Duration,
    /// Maximum backoff duration.
    pub max_backoff: Duration,
    /// Backoff multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Add jitter to backoff.
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(20),
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Create a new retry configuration with custom values.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Default::default()
        }
    }

    /// Set the initial backoff duration.
    pub fn with_initial_backoff(mut self, duration: Duration) -> Self {
        self.initial_backoff = duration;
        self
    }

    /// Set the maximum backoff duration.
    pub fn with_max_backoff(mut self, duration: Duration) -> Self {
        self.max_backoff = duration;
        self
    }

    /// Set the backoff multiplier.
    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Enable or disable jitter.
    pub fn with_jitter(mut self, use_jitter: bool) -> Self {
        self.use_jitter = use_jitter;
        self
    }

    /// Create a no-retry configuration.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            ..Default::default()
        }
    }
}

/// Retries failed calls with exponential backoff.
///
/// An error is retried only when it is transient
/// ([`SdkError::is_retryable`]) and a repeat cannot apply the call twice:
/// either the operation is idempotent or the service is known not to have
/// seen the failed attempt ([`SdkError::outcome_unknown`] is false).
#[derive(Debug, Clone, Default)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy with the given configuration.
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Get the retry configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Whether `error` may be retried after `attempt` retries.
    pub fn should_retry<K: ServiceErrorKind>(
        &self,
        error: &SdkError<K>,
        idempotent: bool,
        attempt: u32,
    ) -> bool {
        attempt < self.config.max_retries
            && error.is_retryable()
            && (idempotent || !error.outcome_unknown())
    }

    /// Run `operation` for the typed operation `O`, using its idempotency.
    pub async fn execute_operation<O, F, Fut>(
        &self,
        operation: F,
    ) -> SdkResult<O::Output, O::ErrorKind>
    where
        O: Operation,
        F: Fn() -> Fut,
        Fut: Future<Output = SdkResult<O::Output, O::ErrorKind>>,
    {
        self.execute(O::IDEMPOTENT, operation).await
    }

    /// Run `operation`, retrying per the policy.
    pub async fn execute<F, Fut, T, K>(&self, idempotent: bool, operation: F) -> SdkResult<T, K>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = SdkResult<T, K>>,
        K: ServiceErrorKind,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(attempt, "Operation succeeded after retry");
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !self.should_retry(&error, idempotent, attempt) {
                        if attempt > 0 {
                            warn!(
                                attempt,
                                max_retries = self.config.max_retries,
                                error = %error,
                                "Operation failed after retries"
                            );
                        }
                        return Err(error);
                    }

                    let backoff = self.calculate_backoff(attempt);
                    debug!(
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %error,
                        "Retrying operation after backoff"
                    );

                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Backoff before retry number `attempt + 1`.
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let base = self.config.initial_backoff.as_millis() as f64;
        let multiplied = base * self.config.backoff_multiplier.powi(attempt as i32);
        let capped = multiplied.min(self.config.max_backoff.as_millis() as f64);

        let final_ms = if self.config.use_jitter {
            capped * rand::thread_rng().gen_range(0.5..=1.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}
