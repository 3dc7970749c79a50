//! Settings schema definitions.
//!
//! File-based settings for hosts that prefer configuration files over code.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

use crate::sink::metrics::DEFAULT_PREFIX;

/// Root settings for the memory logger.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MemoryLoggerSettings {
    /// Queue allow-list. Empty instruments every queue.
    pub queues: Vec<String>,

    /// Which built-in sink receives measurements.
    pub sink: SinkKind,

    /// Metric name prefix used by the metrics sink.
    pub metrics_prefix: String,

    /// Log level (trace, debug, info, warn, error) for `init_tracing`.
    pub log_level: String,
}

impl Default for MemoryLoggerSettings {
    fn default() -> Self {
        Self {
            queues: Vec::new(),
            sink: SinkKind::default(),
            metrics_prefix: DEFAULT_PREFIX.to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Built-in sink selection.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// One INFO line per job through the configured logger.
    #[default]
    Log,
    /// Histograms and a counter through the `metrics` facade.
    Metrics,
    /// Measure, but discard.
    None,
}
