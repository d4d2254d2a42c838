//! Timing and outcome collection for invocations.
//!
//! The pipeline reports how long each stage took and how each call ended.
//! Collectors observe only; they never influence the outcome of a call.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Timed stage of an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricField {
    /// Whole invocation, start to finish.
    ClientExecuteTime,
    /// Credential resolution.
    CredentialsRequestTime,
    /// Request marshalling and validation.
    RequestMarshallTime,
    /// Request signing.
    RequestSigningTime,
    /// Transport dispatch, send to response.
    HttpRequestTime,
    /// Response unmarshalling.
    ResponseProcessingTime,
}

impl MetricField {
    /// Stable name for exporters.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricField::ClientExecuteTime => "ClientExecuteTime",
            MetricField::CredentialsRequestTime => "CredentialsRequestTime",
            MetricField::RequestMarshallTime => "RequestMarshallTime",
            MetricField::RequestSigningTime => "RequestSigningTime",
            MetricField::HttpRequestTime => "HttpRequestTime",
            MetricField::ResponseProcessingTime => "ResponseProcessingTime",
        }
    }
}

/// Final outcome of an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// The result shape was decoded.
    Success,
    /// The call failed. Carries the error category name and the service error
    /// code when there is one.
    Failure {
        /// Category name, e.g. `Service` or `Transport`.
        category: String,
        /// Service error code.
        code: Option<String>,
    },
}

/// Metrics collector interface.
pub trait MetricsCollector: Send + Sync {
    /// Record the duration of a stage.
    fn record_timing(&self, service: &str, operation: &str, field: MetricField, duration: Duration);

    /// Record how a call ended.
    fn record_outcome(&self, service: &str, operation: &str, outcome: &CallOutcome);
}

/// Collector that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl MetricsCollector for NoopMetrics {
    fn record_timing(&self, _: &str, _: &str, _: MetricField, _: Duration) {}

    fn record_outcome(&self, _: &str, _: &str, _: &CallOutcome) {}
}

/// Collector that emits `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMetrics;

impl MetricsCollector for TracingMetrics {
    fn record_timing(&self, service: &str, operation: &str, field: MetricField, duration: Duration) {
        debug!(
            service,
            operation,
            metric = field.as_str(),
            duration_ms = duration.as_secs_f64() * 1000.0,
            "timing"
        );
    }

    fn record_outcome(&self, service: &str, operation: &str, outcome: &CallOutcome) {
        match outcome {
            CallOutcome::Success => debug!(service, operation, "call succeeded"),
            CallOutcome::Failure { category, code } => debug!(
                service,
                operation,
                category = category.as_str(),
                code = code.as_deref().unwrap_or("-"),
                "call failed"
            ),
        }
    }
}

/// Aggregated counters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Calls that completed.
    pub total_calls: u64,
    /// Calls that succeeded.
    pub successful_calls: u64,
    /// Calls that failed.
    pub failed_calls: u64,
    /// Calls per `Service.Operation`.
    pub operations: HashMap<String, u64>,
    /// Failures per error code or category.
    pub errors: HashMap<String, u64>,
    /// Summed stage durations.
    pub timings: HashMap<MetricField, Duration>,
}

/// In-memory collector aggregating counters and summed timings.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    total_calls: AtomicU64,
    successful_calls: AtomicU64,
    failed_calls: AtomicU64,
    operations: RwLock<HashMap<String, u64>>,
    errors: RwLock<HashMap<String, u64>>,
    timings: RwLock<HashMap<MetricField, Duration>>,
}

impl InMemoryMetrics {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_calls: self.total_calls.load(Ordering::Relaxed),
            successful_calls: self.successful_calls.load(Ordering::Relaxed),
            failed_calls: self.failed_calls.load(Ordering::Relaxed),
            operations: self.operations.read().clone(),
            errors: self.errors.read().clone(),
            timings: self.timings.read().clone(),
        }
    }

    /// Clear all counters.
    pub fn reset(&self) {
        self.total_calls.store(0, Ordering::Relaxed);
        self.successful_calls.store(0, Ordering::Relaxed);
        self.failed_calls.store(0, Ordering::Relaxed);
        self.operations.write().clear();
        self.errors.write().clear();
        self.timings.write().clear();
    }
}

impl MetricsCollector for InMemoryMetrics {
    fn record_timing(&self, _service: &str, _operation: &str, field: MetricField, duration: Duration) {
        *self.timings.write().entry(field).or_default() += duration;
    }

    fn record_outcome(&self, service: &str, operation: &str, outcome: &CallOutcome) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        *self
            .operations
            .write()
            .entry(format!("{}.{}", service, operation))
            .or_insert(0) += 1;

        match outcome {
            CallOutcome::Success => {
                self.successful_calls.fetch_add(1, Ordering::Relaxed);
            }
            CallOutcome::Failure { category, code } => {
                self.failed_calls.fetch_add(1, Ordering::Relaxed);
                let key = code.clone().unwrap_or_else(|| category.clone());
                *self.errors.write().entry(key).or_insert(0) += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_aggregates() {
        let metrics = InMemoryMetrics::new();
        metrics.record_outcome("ecr", "CreateRepository", &CallOutcome::Success);
        metrics.record_outcome(
            "ecr",
            "CreateRepository",
            &CallOutcome::Failure {
                category: "Service".to_string(),
                code: Some("RepositoryAlreadyExistsException".to_string()),
            },
        );
        metrics.record_outcome(
            "ecr",
            "DescribeRepositories",
            &CallOutcome::Failure {
                category: "Transport".to_string(),
                code: None,
            },
        );
        metrics.record_timing("ecr", "CreateRepository", MetricField::HttpRequestTime, Duration::from_millis(5));
        metrics.record_timing("ecr", "CreateRepository", MetricField::HttpRequestTime, Duration::from_millis(7));

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_calls, 3);
        assert_eq!(snapshot.successful_calls, 1);
        assert_eq!(snapshot.failed_calls, 2);
        assert_eq!(snapshot.operations["ecr.CreateRepository"], 2);
        assert_eq!(snapshot.errors["RepositoryAlreadyExistsException"], 1);
        assert_eq!(snapshot.errors["Transport"], 1);
        assert_eq!(
            snapshot.timings[&MetricField::HttpRequestTime],
            Duration::from_millis(12)
        );

        metrics.reset();
        assert_eq!(metrics.snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_field_names() {
        assert_eq!(MetricField::ClientExecuteTime.as_str(), "ClientExecuteTime");
        assert_eq!(MetricField::ResponseProcessingTime.as_str(), "ResponseProcessingTime");
    }
}
