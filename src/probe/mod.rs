//! Measurement primitives.
//!
//! # Data Flow
//! ```text
//! MemoryMiddleware
//!     → memory.rs     (resident set size, MB)
//!     → allocation.rs (process-wide allocation counter)
//!     → Sample { memory_mb, allocations }
//! ```
//!
//! # Design Decisions
//! - Probes are infallible at the trait boundary; the built-in probes
//!   degrade to zero rather than erroring
//! - A probe that panics is not isolated and propagates out of the middleware
//! - Zero-argument closures are probes too, which keeps tests deterministic

pub mod allocation;
pub mod memory;

pub use allocation::{allocation_count, CountingAllocator, GlobalAllocationCounter};
pub use memory::ProcessMemoryProbe;

/// Current resident memory of the process, in megabytes.
pub trait MemoryProbe: Send + Sync {
    fn resident_mb(&self) -> f64;
}

impl<F> MemoryProbe for F
where
    F: Fn() -> f64 + Send + Sync,
{
    fn resident_mb(&self) -> f64 {
        self()
    }
}

/// Monotonically non-decreasing count of allocations made by the process.
pub trait AllocationCounter: Send + Sync {
    fn allocations(&self) -> u64;
}

impl<F> AllocationCounter for F
where
    F: Fn() -> u64 + Send + Sync,
{
    fn allocations(&self) -> u64 {
        self()
    }
}

/// One reading of both probes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub memory_mb: f64,
    pub allocations: u64,
}

impl Sample {
    pub fn take(memory: &dyn MemoryProbe, counter: &dyn AllocationCounter) -> Self {
        Self {
            memory_mb: memory.resident_mb(),
            allocations: counter.allocations(),
        }
    }

    /// `(memory_diff_mb, objects_diff)` from `self` to `end`.
    pub fn delta(&self, end: &Sample) -> (f64, i64) {
        let memory_diff = end.memory_mb - self.memory_mb;
        let objects_diff = end.allocations.wrapping_sub(self.allocations) as i64;
        (memory_diff, objects_diff)
    }
}
