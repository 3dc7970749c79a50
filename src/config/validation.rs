//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject empty and duplicate queue names
//! - Check the metric prefix when the metrics sink is selected
//! - Check the log level is one tracing understands
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MemoryLoggerSettings → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{MemoryLoggerSettings, SinkKind};
use crate::observability::metrics::is_valid_prefix;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("queue name at position {0} is empty")]
    EmptyQueueName(usize),

    #[error("queue `{0}` is listed more than once")]
    DuplicateQueue(String),

    #[error("metrics_prefix `{0}` is not a valid metric name prefix")]
    InvalidMetricsPrefix(String),

    #[error("log_level `{0}` is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),
}

pub fn validate_settings(settings: &MemoryLoggerSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (i, queue) in settings.queues.iter().enumerate() {
        if queue.trim().is_empty() {
            errors.push(ValidationError::EmptyQueueName(i));
        } else if !seen.insert(queue.as_str()) {
            errors.push(ValidationError::DuplicateQueue(queue.clone()));
        }
    }

    if settings.sink == SinkKind::Metrics && !is_valid_prefix(&settings.metrics_prefix) {
        errors.push(ValidationError::InvalidMetricsPrefix(settings.metrics_prefix.clone()));
    }

    if !LOG_LEVELS.contains(&settings.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::UnknownLogLevel(settings.log_level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
