//! Two-level set-associative cache hierarchy simulator library.
//!
//! This crate models the behavior of a write-back, write-allocate cache
//! hierarchy driven by a stream of physical-address accesses. It provides:
//! 1. **Geometry:** Tag/index/offset decomposition for power-of-two caches.
//! 2. **Cache:** A one-level set-associative line array with LRU replacement.
//! 3. **Hierarchy:** An L1 + optional L2 controller with write-back-on-eviction,
//!    inclusion maintenance, and sequential prefetching.
//! 4. **Statistics:** Per-level and memory-traffic counters with report printing.
//! 5. **Configuration:** Validated, serde-deserializable cache geometry.
//!
//! No data is stored or moved — only addresses are tracked, so every access
//! resolves to a hit or a miss without modeling latency or contents.

/// One level of set-associative cache state and its replacement machinery.
pub mod cache;
/// Common types (address geometry, access classification, configuration errors).
pub mod common;
/// Simulator configuration (defaults, enums, validation, derived L2 geometry).
pub mod config;
/// The two-level hierarchy controller and its access state machine.
pub mod hierarchy;
/// Speculative fill engines invoked on L1 misses.
pub mod prefetch;
/// Access and memory-traffic counters with report printing.
pub mod stats;

/// Outcome of a single access; the only result type `access` produces.
pub use crate::common::data::AccessResult;
/// Classification of an access as a read or a write.
pub use crate::common::data::AccessType;
/// Root configuration type; validate before constructing a hierarchy.
pub use crate::config::HierarchyConfig;
/// Main simulator type; owns both cache levels, the clock, and the counters.
pub use crate::hierarchy::Hierarchy;
