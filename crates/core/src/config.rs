//! Configuration system for the cache hierarchy simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the simulator. It provides:
//! 1. **Defaults:** Baseline geometry constants (size, ways, block, levels).
//! 2. **Structures:** L1 parameters, hierarchy depth, and prefetch policy.
//! 3. **Validation:** Power-of-two, bound, and divisibility checks that run
//!    before any cache storage is allocated.
//! 4. **Derivation:** L2 geometry is never supplied directly; it is derived
//!    from L1 when a second level is configured.
//!
//! Configuration is supplied via JSON (`serde`) or built directly by a front
//! end; use `HierarchyConfig::default()` for the baseline direct-mapped cache.

use serde::Deserialize;

use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline geometry when not explicitly overridden,
/// matching the smallest validated direct-mapped configuration.
mod defaults {
    /// Default L1 cache size in bytes (4 KiB).
    pub const CACHE_SIZE: u64 = 4096;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: u64 = 1;

    /// Default block size in bytes (the minimum the validator accepts).
    pub const BLOCK_BYTES: u64 = 4;

    /// Default hierarchy depth (L1 only).
    pub const LEVELS: u32 = 1;

    /// Smallest accepted L1 cache size in bytes.
    pub const MIN_CACHE_SIZE: u64 = 4;

    /// Largest accepted L1 cache size in bytes (16 KiB).
    pub const MAX_CACHE_SIZE: u64 = 16384;

    /// Smallest accepted block size in bytes.
    pub const MIN_BLOCK_BYTES: u64 = 4;

    /// Ratio of derived L2 capacity to L1 capacity.
    pub const L2_SIZE_FACTOR: u64 = 16;
}

/// Prefetch policy selection.
///
/// Only `Sequential` has defined fill semantics; `Stride` and `Custom` are
/// accepted by configuration and behave as `None` unless extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PrefetchPolicy {
    /// No prefetching.
    #[default]
    #[serde(alias = "none")]
    None,

    /// Next-block prefetcher.
    ///
    /// On an L1 miss, speculatively fills the block immediately after the
    /// missing one into L2.
    #[serde(alias = "sequential")]
    Sequential,

    /// Stride prefetcher (reserved; currently behaves as `None`).
    #[serde(alias = "stride")]
    Stride,

    /// User-defined prefetcher (reserved; currently behaves as `None`).
    #[serde(alias = "custom")]
    Custom,
}

/// Geometry of a single cache level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheParams {
    /// Total cache size in bytes
    #[serde(default = "CacheParams::default_size")]
    pub size_bytes: u64,

    /// Associativity (number of ways per set)
    #[serde(default = "CacheParams::default_ways")]
    pub ways: u64,

    /// Block size in bytes
    #[serde(default = "CacheParams::default_block")]
    pub block_bytes: u64,
}

impl CacheParams {
    /// Returns the default cache size in bytes.
    fn default_size() -> u64 {
        defaults::CACHE_SIZE
    }

    /// Returns the default associativity.
    fn default_ways() -> u64 {
        defaults::WAYS
    }

    /// Returns the default block size in bytes.
    fn default_block() -> u64 {
        defaults::BLOCK_BYTES
    }

    /// Total number of blocks this cache can hold.
    #[inline]
    pub const fn num_blocks(&self) -> u64 {
        self.size_bytes / self.block_bytes
    }

    /// Number of sets, i.e. `size / (block * ways)`.
    ///
    /// At least 1 for every geometry the validator accepts (a fully
    /// associative cache has exactly one set).
    #[inline]
    pub const fn num_sets(&self) -> u64 {
        self.num_blocks() / self.ways
    }

    /// Derives the second-level geometry from this first-level geometry.
    ///
    /// L2 is sixteen times the capacity at the same associativity and block
    /// size. The derivation preserves every invariant the validator checks
    /// on L1, so the result needs no separate validation.
    pub const fn derive_l2(&self) -> Self {
        Self {
            size_bytes: self.size_bytes * defaults::L2_SIZE_FACTOR,
            ways: self.ways,
            block_bytes: self.block_bytes,
        }
    }

    /// Checks this geometry against the accepted parameter space.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the size or block size is zero, not a
    /// power of two, or out of bounds; when the associativity is zero, not a
    /// power of two, or exceeds the block count; or when the divisibility
    /// invariants between size, block size, and ways do not hold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.size_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "size_bytes",
                value: self.size_bytes,
            });
        }
        if self.size_bytes < defaults::MIN_CACHE_SIZE || self.size_bytes > defaults::MAX_CACHE_SIZE
        {
            return Err(ConfigError::OutOfRange {
                field: "size_bytes",
                value: self.size_bytes,
                min: defaults::MIN_CACHE_SIZE,
                max: defaults::MAX_CACHE_SIZE,
            });
        }
        if !self.block_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "block_bytes",
                value: self.block_bytes,
            });
        }
        if self.block_bytes < defaults::MIN_BLOCK_BYTES || self.block_bytes > self.size_bytes {
            return Err(ConfigError::OutOfRange {
                field: "block_bytes",
                value: self.block_bytes,
                min: defaults::MIN_BLOCK_BYTES,
                max: self.size_bytes,
            });
        }
        if self.size_bytes % self.block_bytes != 0 {
            return Err(ConfigError::SizeNotBlockMultiple {
                size: self.size_bytes,
                block: self.block_bytes,
            });
        }
        if !self.ways.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "ways",
                value: self.ways,
            });
        }
        let blocks = self.num_blocks();
        if self.ways > blocks {
            return Err(ConfigError::OutOfRange {
                field: "ways",
                value: self.ways,
                min: 1,
                max: blocks,
            });
        }
        if blocks % self.ways != 0 {
            return Err(ConfigError::BlocksNotWayMultiple {
                blocks,
                ways: self.ways,
            });
        }
        Ok(())
    }
}

impl Default for CacheParams {
    /// Creates the baseline direct-mapped geometry (4 KiB, 1 way, 4-byte blocks).
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            ways: defaults::WAYS,
            block_bytes: defaults::BLOCK_BYTES,
        }
    }
}

/// Root configuration structure for a hierarchy.
///
/// # Examples
///
/// Deserializing from JSON:
///
/// ```
/// use cachetrace_core::config::{HierarchyConfig, PrefetchPolicy};
///
/// let json = r#"{
///     "l1": { "size_bytes": 4096, "ways": 2, "block_bytes": 64 },
///     "levels": 2,
///     "prefetch": "Sequential"
/// }"#;
///
/// let config: HierarchyConfig = serde_json::from_str(json).unwrap();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.l1.ways, 2);
/// assert_eq!(config.prefetch, PrefetchPolicy::Sequential);
///
/// let l2 = config.l2().unwrap();
/// assert_eq!(l2.size_bytes, 16 * 4096);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct HierarchyConfig {
    /// First-level cache geometry
    #[serde(default)]
    pub l1: CacheParams,

    /// Hierarchy depth: 1 (L1 only) or 2 (L1 + derived L2)
    #[serde(default = "HierarchyConfig::default_levels")]
    pub levels: u32,

    /// Prefetch policy, effective only when a second level exists
    #[serde(default)]
    pub prefetch: PrefetchPolicy,
}

impl HierarchyConfig {
    /// Returns the default hierarchy depth.
    fn default_levels() -> u32 {
        defaults::LEVELS
    }

    /// The derived L2 geometry, or `None` for a single-level hierarchy.
    pub fn l2(&self) -> Option<CacheParams> {
        (self.levels == 2).then(|| self.l1.derive_l2())
    }

    /// Checks the whole configuration before any storage is allocated.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the L1 geometry is rejected (see
    /// [`CacheParams::validate`]) or when the level count is neither 1 nor 2.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.l1.validate()?;
        if self.levels != 1 && self.levels != 2 {
            return Err(ConfigError::BadLevelCount(self.levels));
        }
        Ok(())
    }
}

impl Default for HierarchyConfig {
    /// Creates a single-level, direct-mapped configuration with no prefetching.
    fn default() -> Self {
        Self {
            l1: CacheParams::default(),
            levels: defaults::LEVELS,
            prefetch: PrefetchPolicy::default(),
        }
    }
}
