//! Sink that exports measurements through the `metrics` facade.

use super::{JobMeasurement, MemorySink, SinkError};
use crate::observability::metrics;

/// Default metric name prefix.
pub const DEFAULT_PREFIX: &str = "sidekiq_job";

#[derive(Debug, Clone)]
pub struct MetricsSink {
    prefix: String,
}

impl MetricsSink {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for MetricsSink {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl MemorySink for MetricsSink {
    fn record(&self, m: &JobMeasurement<'_>) -> Result<(), SinkError> {
        metrics::record_job_memory(&self.prefix, m.job_class, m.queue, m.memory_diff_mb, m.objects_diff);
        Ok(())
    }
}
