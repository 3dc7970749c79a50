//! Allocation counting global allocator.
//!
//! Install once per binary to make `objects_diff` meaningful:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: memory_logger::probe::CountingAllocator = memory_logger::probe::CountingAllocator::system();
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use super::AllocationCounter;

static ALLOCATIONS: AtomicU64 = AtomicU64::new(0);

/// Total allocations observed by [`CountingAllocator`] since process start.
pub fn allocation_count() -> u64 {
    ALLOCATIONS.load(Ordering::Relaxed)
}

/// `GlobalAlloc` wrapper that counts new allocations.
///
/// Reallocations are not counted; they resize an existing allocation.
#[derive(Debug, Default)]
pub struct CountingAllocator<A = System> {
    inner: A,
}

impl CountingAllocator<System> {
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> CountingAllocator<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        self.inner.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
        self.inner.alloc_zeroed(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        self.inner.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        self.inner.realloc(ptr, layout, new_size)
    }
}

/// Reads the counter maintained by [`CountingAllocator`].
///
/// Stays at zero when the allocator is not installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAllocationCounter;

impl AllocationCounter for GlobalAllocationCounter {
    fn allocations(&self) -> u64 {
        allocation_count()
    }
}
