//! The instrumentation wrapper.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use futures_util::FutureExt;

use crate::config::{global, Configuration};
use crate::middleware::job::Job;
use crate::probe::Sample;
use crate::resilience::isolation::isolate_and_log;
use crate::sink::JobMeasurement;

/// Measures each job's memory and allocation deltas and hands them to the
/// configured sink.
///
/// The job's own outcome (value or panic) is always what the caller gets
/// back. Sink failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct MemoryMiddleware {
    config: Arc<Configuration>,
}

impl MemoryMiddleware {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }

    /// Snapshot of the global configuration at the time of the call.
    pub fn from_global() -> Self {
        Self::new(global::configuration())
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run a synchronous job body under measurement.
    pub fn call<F, R>(&self, job: &Job, queue: &str, next: F) -> R
    where
        F: FnOnce() -> R,
    {
        if !self.should_measure(queue) {
            return next();
        }

        let job_class = job.display_class();
        let start = self.sample();
        let outcome = panic::catch_unwind(AssertUnwindSafe(next));
        let end = self.sample();

        self.dispatch(job, job_class, queue, &start, &end);

        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Run an asynchronous job body under measurement.
    pub async fn call_async<Fut>(&self, job: &Job, queue: &str, next: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        if !self.should_measure(queue) {
            return next.await;
        }

        let job_class = job.display_class();
        let start = self.sample();
        let outcome = AssertUnwindSafe(next).catch_unwind().await;
        let end = self.sample();

        self.dispatch(job, job_class, queue, &start, &end);

        match outcome {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    fn should_measure(&self, queue: &str) -> bool {
        let allowed = self.config.queue_allow_list().allows(queue);
        if !allowed {
            tracing::debug!(queue = %queue, "Queue not in allow-list, skipping measurement");
        }
        allowed
    }

    fn sample(&self) -> Sample {
        Sample::take(
            self.config.memory_probe().as_ref(),
            self.config.allocation_counter().as_ref(),
        )
    }

    fn dispatch(&self, job: &Job, job_class: &str, queue: &str, start: &Sample, end: &Sample) {
        let (memory_diff_mb, objects_diff) = start.delta(end);
        let measurement = JobMeasurement {
            job_class,
            queue,
            memory_diff_mb,
            objects_diff,
            args: job.arguments(),
        };

        tracing::debug!(
            job = %job_class,
            queue = %queue,
            jid = ?job.jid,
            memory_diff_mb,
            objects_diff,
            "Job measured"
        );

        let sink = self.config.effective_sink();
        isolate_and_log(self.config.logger().as_ref(), || sink.record(&measurement));
    }
}
