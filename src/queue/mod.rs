//! Queue selection.
//!
//! # Data Flow
//! ```text
//! Job arrives on queue Q
//!     → filter.rs (is Q in the allow-list?)
//!     → yes, or list empty: instrument
//!     → no: run the job untouched
//! ```
//!
//! # Design Decisions
//! - Empty allow-list = every queue is instrumented
//! - Exact, case-sensitive match on queue names
//! - Built once from configuration, read-only afterwards

pub mod filter;

pub use filter::QueueFilter;
