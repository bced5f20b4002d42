//! Configuration error definitions.
//!
//! This module defines the only fatal error class in the simulator. It provides:
//! 1. **Geometry Rejection:** Every way a cache geometry can be inconsistent.
//! 2. **Fail-Fast Semantics:** Errors surface at validation time, before any
//!    storage is allocated; `access` itself is total and never fails.

use thiserror::Error;

/// A rejected cache configuration.
///
/// Produced by validation before a hierarchy is constructed. Once a
/// configuration has been accepted, no further errors can occur during
/// simulation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A geometry parameter that must be a power of two is not.
    ///
    /// Also rejects zero, which is not a power of two.
    #[error("{field} must be a nonzero power of two (got {value})")]
    NotPowerOfTwo {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// A geometry parameter is outside its declared bounds.
    #[error("{field} out of range: {value} not in [{min}, {max}]")]
    OutOfRange {
        /// Name of the offending parameter.
        field: &'static str,
        /// The rejected value.
        value: u64,
        /// Inclusive lower bound.
        min: u64,
        /// Inclusive upper bound.
        max: u64,
    },

    /// The cache size is not an even multiple of the block size.
    #[error("cache size {size} is not divisible by block size {block}")]
    SizeNotBlockMultiple {
        /// Total cache size in bytes.
        size: u64,
        /// Block size in bytes.
        block: u64,
    },

    /// The block count cannot be divided evenly into sets of `ways` blocks.
    #[error("{blocks} blocks cannot be split into {ways}-way sets")]
    BlocksNotWayMultiple {
        /// Total number of blocks in the cache.
        blocks: u64,
        /// Requested associativity.
        ways: u64,
    },

    /// The hierarchy depth is neither 1 nor 2.
    #[error("cache level count must be 1 or 2 (got {0})")]
    BadLevelCount(u32),
}
