//! LRU stack-distance profiling core.
//!
//! This crate is the cache-behavior modeling core of a
//! program-instrumentation runtime. The host injects a callback on every
//! memory reference; this crate consumes those references and produces, at
//! readout, the classical LRU stack-distance profile. It implements:
//! 1. **Reuse Distances:** An augmented order-statistics tree over
//!    unreferenced-timestamp intervals answers each distance query in
//!    O(log H).
//! 2. **Per-Thread Models:** Each observing thread owns its model; the
//!    hot path takes no shared lock after the thread's first reference.
//! 3. **Aggregation:** At readout the per-thread histograms merge and a
//!    prefix-sum transform yields the exact hit count of every
//!    fully-associative LRU cache size at once.
//! 4. **Configuration:** A single tunable, the cache-line size, plus an
//!    optional access-trace stream.
//!
//! The companion `stackdist-capi` crate exports this surface with C
//! linkage for native instrumentation runtimes.

/// Shared vocabulary types (line addresses, timestamps, access kinds, errors).
pub mod common;
/// Model configuration (line size, trace path).
pub mod config;
/// Per-thread cache model (last-use map, histogram, counters).
pub mod model;
/// Thread registry, aggregation, and the process-global runtime surface.
pub mod registry;
/// Merged profile snapshot with derived metrics.
pub mod stats;
/// Interval tree: the reuse-distance engine.
pub mod tree;

/// The per-reference classification carried by the instrumentation callback.
pub use crate::common::AccessKind;
/// The single configuration structure; use `ModelConfig::default()` or
/// deserialize from JSON.
pub use crate::config::ModelConfig;
/// One thread's stack-distance model; normally managed by the registry.
pub use crate::model::ThreadModel;
/// Quiescent readout of the whole process.
pub use crate::stats::ProfileSnapshot;
