//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Middleware produces:
//!     → logging.rs (Logger seam: default sink lines, sink failure lines)
//!     → tracing events (internal diagnostics at DEBUG)
//!     → metrics.rs (histograms and counters for MetricsSink)
//!
//! Consumers:
//!     → host logger / tracing subscriber / stdout
//!     → whatever metrics recorder the host installed
//! ```
//!
//! # Design Decisions
//! - The user-visible logger is an injected trait object, resolved once
//! - Internal diagnostics always go through `tracing`
//! - Metrics go through the `metrics` facade; no exporter is owned here

pub mod logging;
pub mod metrics;
