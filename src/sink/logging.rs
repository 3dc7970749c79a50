//! Default sink: one informational line per job.

use std::sync::Arc;

use tracing::Level;

use super::{JobMeasurement, MemorySink, SinkError};
use crate::observability::logging::Logger;

/// Logs measurements through a [`Logger`] at INFO.
///
/// Line format:
/// `[MemoryLogger] job=<class> queue=<queue> memory_mb=<delta> objects=<delta>`
#[derive(Clone)]
pub struct LoggingSink {
    logger: Arc<dyn Logger>,
}

impl LoggingSink {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    pub fn format(measurement: &JobMeasurement<'_>) -> String {
        format!(
            "[MemoryLogger] job={} queue={} memory_mb={:.2} objects={}",
            measurement.job_class, measurement.queue, measurement.memory_diff_mb, measurement.objects_diff
        )
    }
}

impl MemorySink for LoggingSink {
    fn record(&self, measurement: &JobMeasurement<'_>) -> Result<(), SinkError> {
        self.logger.log(Level::INFO, &Self::format(measurement));
        Ok(())
    }
}

impl std::fmt::Debug for LoggingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingSink").finish_non_exhaustive()
    }
}
