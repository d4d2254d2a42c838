//! Recording metrics collector.

use crate::metrics::{CallOutcome, MetricField, MetricsCollector};
use parking_lot::Mutex;
use std::time::Duration;

/// Collector that keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingMetrics {
    timings: Mutex<Vec<(String, MetricField, Duration)>>,
    outcomes: Mutex<Vec<(String, CallOutcome)>>,
}

impl RecordingMetrics {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fields timed for `operation`, in order.
    pub fn fields(&self, operation: &str) -> Vec<MetricField> {
        self.timings
            .lock()
            .iter()
            .filter(|(op, _, _)| op == operation)
            .map(|(_, field, _)| *field)
            .collect()
    }

    /// Outcomes recorded for `operation`, in order.
    pub fn outcomes(&self, operation: &str) -> Vec<CallOutcome> {
        self.outcomes
            .lock()
            .iter()
            .filter(|(op, _)| op == operation)
            .map(|(_, outcome)| outcome.clone())
            .collect()
    }
}

impl MetricsCollector for RecordingMetrics {
    fn record_timing(&self, _service: &str, operation: &str, field: MetricField, duration: Duration) {
        self.timings
            .lock()
            .push((operation.to_string(), field, duration));
    }

    fn record_outcome(&self, _service: &str, operation: &str, outcome: &CallOutcome) {
        self.outcomes
            .lock()
            .push((operation.to_string(), outcome.clone()));
    }
}
