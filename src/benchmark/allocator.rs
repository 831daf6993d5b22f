//! Heap accounting allocator
//!
//! Wraps the system allocator and counts, per thread, the bytes currently
//! allocated and the high-water mark. [`PeakScope`] resets the calling
//! thread's high-water mark on entry, so the peak heap growth of a call made
//! on that thread can be read back afterwards without interference from
//! other threads.
//!
//! The library does not install it. Binaries opt in with
//! `#[global_allocator]`; without it every [`PeakScope`] reads zero.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    // Const-initialised and drop-free, so touching them never allocates.
    static THREAD_CURRENT_BYTES: Cell<usize> = const { Cell::new(0) };
    static THREAD_PEAK_BYTES: Cell<usize> = const { Cell::new(0) };
}

/// Global allocator that maintains the heap counters
#[derive(Debug, Default, Clone, Copy)]
pub struct TrackingAllocator<A = System> {
    inner: A,
}

impl<A> TrackingAllocator<A> {
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

fn record_alloc(size: usize) {
    let _ = THREAD_CURRENT_BYTES.try_with(|current| {
        let now = current.get().saturating_add(size);
        current.set(now);
        let _ = THREAD_PEAK_BYTES.try_with(|peak| peak.set(peak.get().max(now)));
    });
}

fn record_dealloc(size: usize) {
    // Saturate: memory can be freed on a different thread than it was allocated
    let _ = THREAD_CURRENT_BYTES.try_with(|current| current.set(current.get().saturating_sub(size)));
}

unsafe impl<A: GlobalAlloc> GlobalAlloc for TrackingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        record_dealloc(layout.size());
        unsafe { self.inner.dealloc(ptr, layout) }
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                record_alloc(new_size - old_size);
            } else {
                record_dealloc(old_size - new_size);
            }
        }
        new_ptr
    }
}

/// Bytes currently allocated by the calling thread and not yet freed by it
fn thread_current_bytes() -> usize {
    THREAD_CURRENT_BYTES.try_with(Cell::get).unwrap_or(0)
}

/// High-water mark of the calling thread since its last reset
fn thread_peak_bytes() -> usize {
    THREAD_PEAK_BYTES.try_with(Cell::get).unwrap_or(0)
}

/// Measures the peak heap growth of the calling thread between creation
/// and [`PeakScope::finish`]
#[derive(Debug)]
pub struct PeakScope {
    baseline: usize,
}

/// Heap usage observed by a [`PeakScope`], in bytes above its baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapUsage {
    pub current: usize,
    pub peak: usize,
}

impl PeakScope {
    /// Start a scope; resets this thread's high-water mark
    pub fn start() -> Self {
        let baseline = thread_current_bytes();
        let _ = THREAD_PEAK_BYTES.try_with(|peak| peak.set(baseline));
        Self { baseline }
    }

    pub fn finish(self) -> HeapUsage {
        HeapUsage {
            current: thread_current_bytes().saturating_sub(self.baseline),
            peak: thread_peak_bytes().saturating_sub(self.baseline),
        }
    }
}
