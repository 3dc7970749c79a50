//! Job instrumentation middleware.
//!
//! # Data Flow
//! ```text
//! queue runtime (job record, queue, next)
//!     → instrument.rs
//!         → queue filter (bypass when not allowed)
//!         → job.rs (resolve logical class, borrow args)
//!         → sample before → next() → sample after
//!         → resilience::isolation → sink
//!     → next()'s outcome, untouched
//! ```
//!
//! # Design Decisions
//! - The after-sample runs on every exit path, panics included
//! - Job panics are resumed with their original payload
//! - Sync and async job bodies share one dispatch path

pub mod instrument;
pub mod job;

pub use instrument::MemoryMiddleware;
pub use job::Job;
