//! C-ABI exports for the stack-distance profiling core.
//!
//! This crate exposes the `stackdist-core` surface with C linkage so a
//! native instrumentation runtime can link the profiler and call it from
//! compiler-inserted callbacks. It provides:
//! 1. **Initialization:** `initialize_cache` (defaults) and
//!    `initialize_cache_with_line_size` (tuned hosts), both idempotent.
//! 2. **Hot Path:** `bf_touch_cache`, one call per memory reference.
//! 3. **Readouts:** the scalar counters, plus a two-call buffer protocol
//!    for the cumulative hits vector (a C caller cannot receive a Rust
//!    vector directly).
//!
//! All functions are safe to call from any thread once initialization has
//! happened; readouts assume instrumented threads have quiesced.

use stackdist_core::{registry, AccessKind, ModelConfig};

/// Idempotently prepares the profiling runtime with the default
/// configuration (64-byte lines, no trace).
///
/// May be called before any threads exist.
#[no_mangle]
pub extern "C" fn initialize_cache() {
    let _ = registry::initialize_cache(ModelConfig::default());
}

/// Idempotently prepares the profiling runtime with the given cache-line
/// size in bytes.
///
/// # Returns
///
/// `true` when the runtime is ready (newly created or already present);
/// `false` when `line_size` is zero or not a power of two.
#[no_mangle]
pub extern "C" fn initialize_cache_with_line_size(line_size: u64) -> bool {
    registry::initialize_cache(ModelConfig::with_line_size(line_size)).is_ok()
}

/// Records one memory reference on the calling thread.
///
/// `is_load` is 1 for loads and anything else for stores; the LRU model
/// ignores the distinction, the optional access trace records it. Calls
/// before initialization are ignored.
#[no_mangle]
pub extern "C" fn bf_touch_cache(base_addr: u64, num_bytes: u64, is_load: u64) {
    registry::touch_cache(base_addr, num_bytes, AccessKind::from_is_load(is_load));
}

/// Total line-granular accesses across all threads.
#[no_mangle]
pub extern "C" fn bf_get_cache_accesses() -> u64 {
    registry::cache_accesses()
}

/// Total distinct cache lines touched across all threads.
#[no_mangle]
pub extern "C" fn bf_get_cold_misses() -> u64 {
    registry::cold_misses()
}

/// Number of original references that crossed a cache-line boundary.
#[no_mangle]
pub extern "C" fn bf_get_split_accesses() -> u64 {
    registry::split_accesses()
}

/// Length of the cumulative hits vector, for sizing the buffer passed to
/// [`bf_get_cache_hits`].
#[no_mangle]
pub extern "C" fn bf_get_cache_hits_len() -> u64 {
    registry::cache_hits().len() as u64
}

/// Copies the cumulative hits vector into `buf`.
///
/// Element `i` is the hit count of a fully-associative LRU cache of
/// `i + 1` lines. At most `len` elements are written.
///
/// # Returns
///
/// The number of elements written.
///
/// # Safety
///
/// `buf` must point to storage for at least `len` `u64` values, or be null
/// (in which case nothing is written and zero is returned).
#[no_mangle]
pub unsafe extern "C" fn bf_get_cache_hits(buf: *mut u64, len: u64) -> u64 {
    if buf.is_null() {
        return 0;
    }
    let hits = registry::cache_hits();
    let count = hits.len().min(len as usize);
    // SAFETY: the caller guarantees `buf` holds at least `len` elements and
    // `count <= len`.
    unsafe {
        std::ptr::copy_nonoverlapping(hits.as_ptr(), buf, count);
    }
    count as u64
}
