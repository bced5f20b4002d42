//! Access Classification Types.
//!
//! This module defines the classification of cache accesses used throughout
//! the simulator. These types are used for the following:
//! 1. **Policy Decisions:** A write hit or fill marks the line dirty; a read does not.
//! 2. **Statistics Tracking:** Categorizing accesses into read/write counters.
//! 3. **Outcome Reporting:** Every access resolves to exactly `Hit` or `Miss`.

use std::fmt;

/// Type of cache access operation.
///
/// Used to distinguish loads from stores for dirty-bit handling and for
/// read/write counter attribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Data read access.
    Read,

    /// Data write access.
    ///
    /// Under the write-back, write-allocate policy a write miss still loads
    /// the block before the line is marked dirty.
    Write,
}

/// Outcome of a single cache access.
///
/// `access` is total: every address and operation combination yields one of
/// these two values, never an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessResult {
    /// The requested block was resident in L1.
    Hit,

    /// The requested block was absent from L1 and was filled on demand.
    Miss,
}

impl AccessResult {
    /// Returns `true` for a hit.
    #[inline]
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hit => write!(f, "HIT"),
            Self::Miss => write!(f, "MISS"),
        }
    }
}
