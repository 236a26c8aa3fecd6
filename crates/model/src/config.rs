//! Configuration for the stack-distance model.
//!
//! This module defines the single configuration structure consumed at
//! per-thread model construction. It provides:
//! 1. **Defaults:** Baseline constants (line size, tracing off).
//! 2. **Structure:** `ModelConfig`, deserializable from JSON supplied by the host runtime.
//! 3. **Validation:** Rejection of nonsensical line sizes before any model exists.
//!
//! Configuration *loading* (files, environment, CLI) is the host's concern;
//! this crate only consumes the resulting values.

use serde::Deserialize;
use std::path::PathBuf;

use crate::common::ConfigError;

/// Default configuration constants for the model.
mod defaults {
    /// Default cache-line size in bytes (64 bytes).
    ///
    /// Matches typical modern processor cache lines; the value the model
    /// uses when the host runtime does not override it.
    pub const LINE_SIZE: u64 = 64;
}

/// Configuration consumed at per-thread model construction.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use stackdist_core::config::ModelConfig;
///
/// let config = ModelConfig::default();
/// assert_eq!(config.line_size, 64);
/// assert!(config.trace_path.is_none());
/// ```
///
/// Deserializing from JSON (typical host-runtime usage):
///
/// ```
/// use stackdist_core::config::ModelConfig;
///
/// let json = r#"{ "line_size": 128, "trace_path": "mem.trace" }"#;
/// let config: ModelConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.line_size, 128);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Cache-line size in bytes. Must be a nonzero power of two.
    #[serde(default = "ModelConfig::default_line_size")]
    pub line_size: u64,

    /// When set, every reference is appended to this trace file. Threads
    /// beyond the first write to `<path>.<n>` so streams never interleave.
    #[serde(default)]
    pub trace_path: Option<PathBuf>,
}

impl ModelConfig {
    /// Returns the default cache-line size.
    fn default_line_size() -> u64 {
        defaults::LINE_SIZE
    }

    /// Creates a configuration with the given line size and no tracing.
    pub fn with_line_size(line_size: u64) -> Self {
        Self {
            line_size,
            trace_path: None,
        }
    }

    /// Checks that the configuration is usable.
    ///
    /// # Returns
    ///
    /// `Ok(())` if the line size is a nonzero power of two, otherwise the
    /// corresponding [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.line_size == 0 {
            return Err(ConfigError::ZeroLineSize);
        }
        if !self.line_size.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo(self.line_size));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            line_size: defaults::LINE_SIZE,
            trace_path: None,
        }
    }
}
