//! Thread registry, aggregation, and the runtime surface.
//!
//! This module wires per-thread models into a process-wide profile. It
//! provides:
//! 1. **Registration:** One model per observing thread, created on the
//!    thread's first reference. The registry mutex is taken exactly once
//!    per thread, lifetime-wide; later references go through a thread-local
//!    handle.
//! 2. **Aggregation:** Merged counters and the merge-then-prefix-sum
//!    transform that turns per-thread reuse histograms into cumulative hit
//!    counts by cache capacity.
//! 3. **Runtime Surface:** The process-global entry points the
//!    instrumentation runtime calls: one initializer, one per-reference
//!    callback, four readouts.
//!
//! Readouts assume instrumented threads have quiesced (the program-exit
//! contract); they still take the uncontended model locks, and recover
//! poisoned ones, so a panicked instrumented thread cannot lose the
//! profile.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;

use log::debug;

use crate::common::{AccessKind, ConfigError};
use crate::config::ModelConfig;
use crate::model::ThreadModel;
use crate::stats::ProfileSnapshot;

/// Handle to one thread's model: owned by the thread, read at readout.
pub type SharedModel = Arc<Mutex<ThreadModel>>;

/// Process-wide list of per-thread models and the configuration they are
/// built from.
///
/// The embedded configuration is validated at construction, so model
/// creation at registration time cannot fail.
pub struct ThreadRegistry {
    config: ModelConfig,
    models: Mutex<Vec<SharedModel>>,
}

impl ThreadRegistry {
    /// Creates a registry from a validated configuration.
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            models: Mutex::new(Vec::new()),
        })
    }

    /// Registers a fresh model for the calling thread and returns the
    /// shared handle. Called once per thread, on its first reference.
    pub fn register(&self) -> SharedModel {
        let mut models = lock(&self.models);
        let seq = models.len();

        let mut config = self.config.clone();
        if seq > 0 {
            // Threads beyond the first get their own trace stream.
            config.trace_path = config.trace_path.map(|p| suffixed(p, seq));
        }
        let model = ThreadModel::new(&config)
            .expect("registry configuration was validated at construction");

        let shared = Arc::new(Mutex::new(model));
        models.push(Arc::clone(&shared));
        debug!(
            "registered cache model {} for thread {:?}",
            seq,
            thread::current().id()
        );
        shared
    }

    /// Sum of line-granular accesses across all registered threads.
    pub fn total_accesses(&self) -> u64 {
        self.fold(|m| m.accesses())
    }

    /// Sum of cold misses (distinct lines) across all registered threads.
    pub fn total_cold_misses(&self) -> u64 {
        self.fold(|m| m.cold_misses())
    }

    /// Sum of line-straddling references across all registered threads.
    pub fn total_split_accesses(&self) -> u64 {
        self.fold(|m| m.split_accesses())
    }

    /// Merges the per-thread histograms and transforms the result into
    /// cumulative hit counts.
    ///
    /// Element `i` of the returned vector is the number of references,
    /// across all threads, whose reuse distance was at most `i + 1` — the
    /// exact hit count of a fully-associative LRU cache of `i + 1` lines.
    pub fn merged_hits(&self) -> Vec<u64> {
        let models = lock(&self.models);
        let mut merged: Vec<u64> = Vec::new();
        for model in models.iter() {
            let model = lock(model);
            let hist = model.histogram().as_slice();
            if hist.len() > merged.len() {
                merged.resize(hist.len(), 0);
            }
            for (slot, count) in merged.iter_mut().zip(hist) {
                *slot += count;
            }
        }
        for i in 1..merged.len() {
            merged[i] += merged[i - 1];
        }
        merged
    }

    /// Captures all readouts in a single pass over the registered models.
    pub fn snapshot(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            accesses: self.total_accesses(),
            cold_misses: self.total_cold_misses(),
            split_accesses: self.total_split_accesses(),
            hits: self.merged_hits(),
        }
    }

    fn fold<F: Fn(&ThreadModel) -> u64>(&self, per_model: F) -> u64 {
        let models = lock(&self.models);
        models.iter().map(|m| per_model(&lock(m))).sum()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn suffixed(path: PathBuf, seq: usize) -> PathBuf {
    let mut name = path.into_os_string();
    name.push(format!(".{}", seq));
    PathBuf::from(name)
}

// ── process-global runtime surface ─────────────────────────────

static RUNTIME: OnceLock<ThreadRegistry> = OnceLock::new();

thread_local! {
    static LOCAL_MODEL: RefCell<Option<SharedModel>> = const { RefCell::new(None) };
}

/// Prepares the process-wide registry. Idempotent: the first successful
/// call wins and later calls keep the existing registry.
///
/// May be called before any instrumented thread exists. The configuration
/// is validated on every call, so an invalid `config` is rejected even
/// when a registry already exists.
pub fn initialize_cache(config: ModelConfig) -> Result<(), ConfigError> {
    let registry = ThreadRegistry::new(config)?;
    let _ = RUNTIME.set(registry);
    Ok(())
}

/// Records one memory reference on the calling thread.
///
/// Registers the thread's model on first use; afterwards the reference is
/// recorded without touching any shared lock other than the thread's own
/// uncontended model mutex. A call before [`initialize_cache`] is ignored.
pub fn touch_cache(base_addr: u64, num_bytes: u64, kind: AccessKind) {
    let Some(registry) = RUNTIME.get() else {
        return;
    };
    LOCAL_MODEL.with(|slot| {
        let mut slot = slot.borrow_mut();
        let model = slot.get_or_insert_with(|| registry.register());
        lock(model).access(base_addr, num_bytes, kind);
    });
}

/// Total line-granular accesses across all threads. Zero before
/// initialization.
pub fn cache_accesses() -> u64 {
    RUNTIME.get().map_or(0, ThreadRegistry::total_accesses)
}

/// Total distinct lines touched across all threads. Zero before
/// initialization.
pub fn cold_misses() -> u64 {
    RUNTIME.get().map_or(0, ThreadRegistry::total_cold_misses)
}

/// Number of original references that crossed a line boundary. Zero before
/// initialization.
pub fn split_accesses() -> u64 {
    RUNTIME.get().map_or(0, ThreadRegistry::total_split_accesses)
}

/// Cumulative hit counts by LRU cache capacity; element `i` corresponds to
/// a capacity of `i + 1` lines. Empty before initialization.
pub fn cache_hits() -> Vec<u64> {
    RUNTIME.get().map_or_else(Vec::new, ThreadRegistry::merged_hits)
}

/// All readouts captured together. Zeroed before initialization.
pub fn snapshot() -> ProfileSnapshot {
    RUNTIME
        .get()
        .map_or_else(ProfileSnapshot::default, ThreadRegistry::snapshot)
}
