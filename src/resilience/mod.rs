//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Measurement ready:
//!     → isolation.rs (run the sink, catch Err and panics)
//!     → On failure: one ERROR line via the configured Logger
//!     → Job outcome returned untouched
//! ```
//!
//! # Design Decisions
//! - A sink can never fail a job or replace its outcome
//! - No retries and no timeouts; sinks must bound themselves

pub mod isolation;
