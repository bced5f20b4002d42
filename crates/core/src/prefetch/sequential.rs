//! Sequential (next-block) prefetcher.
//!
//! A simple spatial prefetcher that nominates the block immediately after the
//! one that missed. This exploits the spatial locality common in streaming
//! and array-walking access patterns.

use super::Prefetcher;

/// Sequential prefetcher state.
#[derive(Debug, Clone)]
pub struct SequentialPrefetcher {
    /// Size of a block in bytes.
    block_bytes: u64,
}

impl SequentialPrefetcher {
    /// Creates a new sequential prefetcher.
    ///
    /// # Arguments
    ///
    /// * `block_bytes` - The block size in bytes (power of two).
    pub const fn new(block_bytes: u64) -> Self {
        Self { block_bytes }
    }
}

impl Prefetcher for SequentialPrefetcher {
    /// Nominates the block following the missed address.
    ///
    /// The missed address is aligned down to its block before stepping, so
    /// the candidate is always exactly one block ahead regardless of the
    /// byte offset that triggered the miss.
    fn observe(&mut self, pa: u64) -> Option<u64> {
        Some((pa & !(self.block_bytes - 1)) + self.block_bytes)
    }
}
