//! Measurement sinks.
//!
//! # Data Flow
//! ```text
//! MemoryMiddleware (JobMeasurement)
//!     → resilience::isolation (catches Err and panics)
//!     → MemorySink::record
//!         → logging.rs   (default: one INFO line via Logger)
//!         → metrics.rs   (metrics facade)
//!         → recorder.rs  (bounded in-memory buffer)
//!         → NoopSink / from_fn closures
//! ```

pub mod logging;
pub mod metrics;
pub mod recorder;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

pub use self::logging::LoggingSink;
pub use self::metrics::MetricsSink;
pub use self::recorder::{RecordedMeasurement, RecordingSink};

/// Error a sink may return. Never propagated past the middleware.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Measurement of a single instrumented job.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JobMeasurement<'a> {
    /// Logical job class (adapter wrappers already resolved).
    pub job_class: &'a str,
    pub queue: &'a str,
    /// Resident memory delta in MB; negative when memory was released.
    pub memory_diff_mb: f64,
    /// Allocation counter delta.
    pub objects_diff: i64,
    /// `None` when the job record carried no `args` field at all.
    pub args: Option<&'a [Value]>,
}

/// Consumer of job measurements.
pub trait MemorySink: Send + Sync {
    fn record(&self, measurement: &JobMeasurement<'_>) -> Result<(), SinkError>;
}

impl<S: MemorySink + ?Sized> MemorySink for Arc<S> {
    fn record(&self, measurement: &JobMeasurement<'_>) -> Result<(), SinkError> {
        (**self).record(measurement)
    }
}

/// Discards every measurement.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl MemorySink for NoopSink {
    fn record(&self, _measurement: &JobMeasurement<'_>) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink backed by a closure. Built with [`from_fn`].
#[derive(Clone)]
pub struct FnSink<F> {
    f: F,
}

/// Adapt a five-argument callback into a [`MemorySink`].
///
/// The callback receives `(job_class, queue, memory_diff_mb, objects_diff, args)`.
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(&str, &str, f64, i64, Option<&[Value]>) -> Result<(), SinkError> + Send + Sync,
{
    FnSink { f }
}

impl<F> MemorySink for FnSink<F>
where
    F: Fn(&str, &str, f64, i64, Option<&[Value]>) -> Result<(), SinkError> + Send + Sync,
{
    fn record(&self, m: &JobMeasurement<'_>) -> Result<(), SinkError> {
        (self.f)(m.job_class, m.queue, m.memory_diff_mb, m.objects_diff, m.args)
    }
}

impl<F> fmt::Debug for FnSink<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnSink")
    }
}
