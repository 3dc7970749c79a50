//! Metric recording helpers.
//!
//! # Metrics
//! - `<prefix>_memory_delta_mb` (histogram): resident memory delta per job
//! - `<prefix>_objects_delta` (histogram): allocation count delta per job
//! - `<prefix>_measured_total` (counter): measured jobs
//!
//! All three carry `job` and `queue` labels. Without an installed recorder
//! the calls are no-ops.

use metrics::{counter, histogram};

/// Record one job measurement under `prefix`.
pub fn record_job_memory(prefix: &str, job: &str, queue: &str, memory_diff_mb: f64, objects_diff: i64) {
    let labels = [("job", job.to_owned()), ("queue", queue.to_owned())];

    histogram!(format!("{prefix}_memory_delta_mb"), &labels).record(memory_diff_mb);
    histogram!(format!("{prefix}_objects_delta"), &labels).record(objects_diff as f64);
    counter!(format!("{prefix}_measured_total"), &labels).increment(1);
}

/// Metric prefixes may only contain `[A-Za-z0-9_:]` and must not start with a digit.
pub fn is_valid_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}
