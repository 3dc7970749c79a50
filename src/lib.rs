//! Per-job memory instrumentation for background job workers.
//!
//! # Architecture Overview
//!
//! ```text
//!     queue runtime
//!         │  (job, queue, next)
//!         ▼
//!   ┌──────────────────┐   bypass    ┌──────────┐
//!   │  queue filter    │────────────▶│  next()  │
//!   └────────┬─────────┘             └──────────┘
//!            ▼
//!   ┌──────────────────┐  before/after  ┌──────────────┐
//!   │ MemoryMiddleware │◀──────────────▶│    probes    │
//!   └────────┬─────────┘                └──────────────┘
//!            ▼
//!   ┌──────────────────┐                ┌──────────────┐
//!   │ isolation bound. │───────────────▶│     sink     │
//!   └──────────────────┘                └──────────────┘
//! ```
//!
//! The middleware never changes a job's outcome. Sink failures end up as a
//! single error line on the configured [`Logger`].

// Core subsystems
pub mod config;
pub mod middleware;
pub mod queue;
pub mod sink;

// Measurement primitives
pub mod probe;

// Cross-cutting concerns
pub mod observability;
pub mod resilience;

pub use config::Configuration;
pub use middleware::{Job, MemoryMiddleware};
pub use observability::logging::Logger;
pub use sink::{JobMeasurement, MemorySink, SinkError};
