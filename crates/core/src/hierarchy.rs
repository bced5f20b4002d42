//! The two-level hierarchy controller.
//!
//! This module composes an L1 cache and an optional L2 cache into a single
//! access pipeline. It implements:
//! 1. **Classification:** Every access resolves to `Hit` or `Miss`, never an error.
//! 2. **Write-back, write-allocate:** Writes are buffered in cache; a dirty
//!    victim is pushed to the next level (or memory) only on eviction, and a
//!    write miss still loads the block before marking it dirty.
//! 3. **Inclusion maintenance:** A block evicted from L2 is also dropped from
//!    L1, the single cross-level coherence action.
//! 4. **Prefetch hook:** On an L1 miss, a configured prefetcher may pull one
//!    subsequent block into L2 as a side effect.
//!
//! The controller exclusively owns both levels, the access clock, and the
//! counters; one access is fully processed before the next is admitted, and
//! LRU ordering depends on that strict sequencing.

use tracing::{debug, trace};

use crate::cache::CacheLevel;
use crate::cache::replacement::AccessClock;
use crate::common::data::{AccessResult, AccessType};
use crate::common::error::ConfigError;
use crate::config::{HierarchyConfig, PrefetchPolicy};
use crate::prefetch::{Prefetcher, SequentialPrefetcher};
use crate::stats::HierarchyStats;

/// A two-level cache hierarchy driven by physical-address accesses.
///
/// Constructed from a validated [`HierarchyConfig`]; see
/// [`Hierarchy::access`] for the per-request state machine. Dropping the
/// hierarchy releases all owned storage.
#[derive(Debug)]
pub struct Hierarchy {
    l1: CacheLevel,
    l2: Option<CacheLevel>,
    clock: AccessClock,
    stats: HierarchyStats,
    prefetcher: Option<Box<dyn Prefetcher>>,
}

impl Hierarchy {
    /// Builds a hierarchy, validating the configuration first.
    ///
    /// Validation runs before any storage is allocated; on rejection nothing
    /// is constructed. When `levels == 2` the L2 geometry is derived from L1.
    /// A prefetch engine is only constructed for policies with defined fill
    /// semantics and only when a second level exists to fill into.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the geometry is inconsistent; see
    /// [`HierarchyConfig::validate`].
    pub fn new(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let l2 = config.l2().map(|params| CacheLevel::new(&params));
        let prefetcher: Option<Box<dyn Prefetcher>> = match config.prefetch {
            PrefetchPolicy::Sequential if l2.is_some() => {
                Some(Box::new(SequentialPrefetcher::new(config.l1.block_bytes)))
            }
            // Stride and Custom are accepted but have no engine yet.
            _ => None,
        };

        Ok(Self {
            l1: CacheLevel::new(&config.l1),
            l2,
            clock: AccessClock::new(),
            stats: HierarchyStats::new(config.levels == 2),
            prefetcher,
        })
    }

    /// Processes one access and returns its outcome.
    ///
    /// Total over all inputs: every `(pa, op)` combination yields `Hit` or
    /// `Miss`. The access completes atomically — classification, eviction,
    /// write-back, and cross-level invalidation all happen before the call
    /// returns, and no in-flight state is visible to the caller.
    pub fn access(&mut self, pa: u64, op: AccessType) -> AccessResult {
        self.stats.l1.total_accesses += 1;
        match op {
            AccessType::Read => self.stats.l1.read_accesses += 1,
            AccessType::Write => self.stats.l1.write_accesses += 1,
        }

        if let Some(way) = self.l1.lookup(pa) {
            self.l1.touch(pa, way, &mut self.clock);
            if op == AccessType::Write {
                self.l1.mark_dirty(pa, way);
            }
            self.stats.l1.hits += 1;
            match op {
                AccessType::Read => self.stats.l1.read_hits += 1,
                AccessType::Write => self.stats.l1.write_hits += 1,
            }
            trace!(pa, ?op, "L1 hit");
            return AccessResult::Hit;
        }

        self.stats.l1.misses += 1;
        trace!(pa, ?op, "L1 miss");

        if self.l2.is_some() {
            // Speculate before servicing the demand miss.
            self.run_prefetch(pa);
            // Fetch the block through L2; an L2 miss fills from memory.
            self.l2_access(pa, AccessType::Read);
        } else {
            // Last level: the fill always comes from memory.
            self.stats.memory.record_read();
        }

        let evicted = self.l1.install(pa, op == AccessType::Write, &mut self.clock);
        if let Some(victim) = evicted {
            if victim.dirty {
                let victim_pa = victim.block_addr(self.l1.geometry());
                if self.l2.is_some() {
                    debug!(victim_pa, "dirty L1 victim written back to L2");
                    self.l2_access(victim_pa, AccessType::Write);
                } else {
                    debug!(victim_pa, "dirty L1 victim written back to memory");
                    self.stats.memory.record_write();
                }
            }
        }

        AccessResult::Miss
    }

    /// Read-only view of the counters.
    #[inline]
    pub const fn stats(&self) -> &HierarchyStats {
        &self.stats
    }

    /// Clones the counters out for later comparison.
    pub fn snapshot(&self) -> HierarchyStats {
        self.stats.clone()
    }

    /// Whether `pa`'s block is resident in L1.
    pub fn l1_contains(&self, pa: u64) -> bool {
        self.l1.contains(pa)
    }

    /// Whether `pa`'s block is resident in L2. `false` without a second level.
    pub fn l2_contains(&self, pa: u64) -> bool {
        self.l2.as_ref().is_some_and(|l2| l2.contains(pa))
    }

    /// Runs one nested access against L2, updating its counters.
    ///
    /// This is the one-level-down analogue of [`access`](Self::access): an L2
    /// miss charges one memory read (write-allocate: the block is loaded even
    /// for a write) and installs the block, with full eviction bookkeeping.
    /// No-op for a single-level hierarchy.
    fn l2_access(&mut self, pa: u64, op: AccessType) {
        let hit_way = match self.l2.as_ref() {
            Some(l2) => l2.lookup(pa),
            None => return,
        };
        let Some(stats) = self.stats.l2.as_mut() else {
            return;
        };

        stats.total_accesses += 1;
        match op {
            AccessType::Read => stats.read_accesses += 1,
            AccessType::Write => stats.write_accesses += 1,
        }

        if let Some(way) = hit_way {
            stats.hits += 1;
            match op {
                AccessType::Read => stats.read_hits += 1,
                AccessType::Write => stats.write_hits += 1,
            }
            if let Some(l2) = self.l2.as_mut() {
                l2.touch(pa, way, &mut self.clock);
                if op == AccessType::Write {
                    l2.mark_dirty(pa, way);
                }
            }
            trace!(pa, ?op, "L2 hit");
            return;
        }

        stats.misses += 1;
        trace!(pa, ?op, "L2 miss");
        self.stats.memory.record_read();
        self.l2_install(pa, op == AccessType::Write);
    }

    /// Installs `pa`'s block into L2 and settles the victim.
    ///
    /// A dirty victim is written back to memory. Any victim is additionally
    /// invalidated in L1: a block that leaves L2 must leave L1 too, or L1
    /// would hold a block the level below has forgotten.
    fn l2_install(&mut self, pa: u64, dirty: bool) {
        let Some(l2) = self.l2.as_mut() else {
            return;
        };
        if let Some(victim) = l2.install(pa, dirty, &mut self.clock) {
            let victim_pa = victim.block_addr(l2.geometry());
            if victim.dirty {
                debug!(victim_pa, "dirty L2 victim written back to memory");
                self.stats.memory.record_write();
            }
            self.l1.invalidate(victim_pa);
        }
    }

    /// Lets the prefetcher nominate one block and fills it into L2.
    ///
    /// Invoked only on an L1 miss. The fill is side-effect only: L1 is never
    /// touched, L2 hit/miss counters are not updated, and no outcome is
    /// reported. A resident nominee only has its L2 stamp refreshed.
    fn run_prefetch(&mut self, pa: u64) {
        let Some(prefetcher) = self.prefetcher.as_mut() else {
            return;
        };
        let Some(target) = prefetcher.observe(pa) else {
            return;
        };

        let Some(l2) = self.l2.as_mut() else {
            return;
        };
        if let Some(way) = l2.lookup(target) {
            l2.touch(target, way, &mut self.clock);
            return;
        }

        debug!(target, "prefetch fill into L2");
        self.stats.memory.record_read();
        self.l2_install(target, false);
    }
}
