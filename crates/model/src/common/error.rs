//! Configuration error definitions.
//!
//! This module defines the rejection reasons for model construction. The hot
//! path never reports errors; the only fallible seams are configuration
//! validation and trace I/O, and the latter surfaces as `std::io::Error`.

use std::fmt;

/// Reasons a [`ModelConfig`](crate::config::ModelConfig) is rejected.
///
/// The line size is the single tunable of the model and must be a nonzero
/// power of two so that line-index arithmetic is exact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The configured line size was zero.
    ZeroLineSize,

    /// The configured line size was not a power of two.
    ///
    /// The associated value is the offending size in bytes.
    LineSizeNotPowerOfTwo(u64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroLineSize => write!(f, "cache line size must be nonzero"),
            ConfigError::LineSizeNotPowerOfTwo(size) => {
                write!(f, "cache line size must be a power of two, got {}", size)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
