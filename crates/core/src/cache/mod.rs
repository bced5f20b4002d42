//! One level of set-associative cache state.
//!
//! This module implements a single cache level as pure bookkeeping over an
//! in-memory line array. It performs lookup, install-with-eviction, dirty
//! tracking, and invalidation; what to do with an evicted block (write it
//! back, drop it, invalidate it elsewhere) is decided by the hierarchy
//! controller one layer up.

/// LRU replacement machinery (the access clock and victim selection).
pub mod replacement;

use self::replacement::{AccessClock, select_victim};
use crate::common::addr::Geometry;
use crate::config::CacheParams;

/// Cache line entry containing tag, validity, dirty bit, and LRU stamp.
///
/// Lines are created invalid when the level is allocated and become valid on
/// install; eviction merely overwrites the slot.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct CacheLine {
    pub(crate) tag: u64,
    pub(crate) valid: bool,
    pub(crate) dirty: bool,
    pub(crate) last_access: u64,
}

/// Victim state captured by [`CacheLevel::install`] before the slot is
/// overwritten.
///
/// Only produced for a previously valid victim; the caller uses it to decide
/// whether a write-back is due and to reconstruct the evicted block address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvictedLine {
    /// Tag of the evicted block.
    pub tag: u64,
    /// Set index the block occupied.
    pub index: usize,
    /// Whether the block had been written since installation.
    pub dirty: bool,
}

impl EvictedLine {
    /// Block-aligned physical address of the evicted block.
    ///
    /// The offset bits of the result are zero; callers must not rely on the
    /// low bits beyond block identity.
    pub const fn block_addr(&self, geometry: &Geometry) -> u64 {
        geometry.block_addr(self.tag, self.index)
    }
}

/// One set-associative cache level.
///
/// Lines live in a single flat arena indexed by `(set * ways) + way`; there
/// is no per-set allocation. All operations are O(associativity) and none of
/// them can fail.
#[derive(Debug)]
pub struct CacheLevel {
    lines: Vec<CacheLine>, // index = (set * ways) + way
    geometry: Geometry,
    ways: usize,
}

impl CacheLevel {
    /// Allocates an empty cache level for a validated geometry.
    ///
    /// # Arguments
    ///
    /// * `params` - Level geometry; must have passed [`CacheParams::validate`].
    pub fn new(params: &CacheParams) -> Self {
        let ways = params.ways as usize;
        let num_sets = params.num_sets();
        Self {
            lines: vec![CacheLine::default(); num_sets as usize * ways],
            geometry: Geometry::new(params.block_bytes, num_sets),
            ways,
        }
    }

    /// The address geometry of this level.
    #[inline]
    pub const fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Finds the way holding `pa`'s block, if resident.
    ///
    /// Scans the target set for a valid line with a matching tag. At most one
    /// such line exists per set.
    ///
    /// # Panics
    ///
    /// This function will not panic. Indexing is guaranteed in bounds because
    /// `split` yields `index < num_sets` and the arena holds exactly
    /// `num_sets * ways` lines.
    pub fn lookup(&self, pa: u64) -> Option<usize> {
        let (index, tag) = self.geometry.split(pa);
        let base = index * self.ways;
        (0..self.ways).find(|&way| {
            let line = &self.lines[base + way];
            line.valid && line.tag == tag
        })
    }

    /// Whether `pa`'s block is resident. Non-mutating probe.
    #[inline]
    pub fn contains(&self, pa: u64) -> bool {
        self.lookup(pa).is_some()
    }

    /// Refreshes the LRU stamp of a way on a confirmed hit.
    pub fn touch(&mut self, pa: u64, way: usize, clock: &mut AccessClock) {
        let (index, _) = self.geometry.split(pa);
        self.lines[index * self.ways + way].last_access = clock.tick();
    }

    /// Marks a way dirty on a confirmed write hit.
    pub fn mark_dirty(&mut self, pa: u64, way: usize) {
        let (index, _) = self.geometry.split(pa);
        self.lines[index * self.ways + way].dirty = true;
    }

    /// Installs `pa`'s block, evicting the LRU victim of its set.
    ///
    /// The victim's prior state is captured before the slot is overwritten so
    /// the caller can perform write-back and invalidation bookkeeping. The new
    /// line is stamped as the most recent touch in its set.
    ///
    /// # Arguments
    ///
    /// * `pa` - Physical address of the block to install.
    /// * `dirty` - Whether the line starts dirty (a write fill) or clean.
    /// * `clock` - The hierarchy's access clock.
    ///
    /// # Returns
    ///
    /// The captured victim, or `None` when the chosen slot was invalid.
    pub fn install(&mut self, pa: u64, dirty: bool, clock: &mut AccessClock) -> Option<EvictedLine> {
        let (index, tag) = self.geometry.split(pa);
        let base = index * self.ways;
        let way = select_victim(&self.lines[base..base + self.ways]);

        let slot = &mut self.lines[base + way];
        let evicted = slot.valid.then(|| EvictedLine {
            tag: slot.tag,
            index,
            dirty: slot.dirty,
        });
        *slot = CacheLine {
            tag,
            valid: true,
            dirty,
            last_access: clock.tick(),
        };
        evicted
    }

    /// Drops `pa`'s block if resident, clearing validity and the dirty bit.
    ///
    /// Used by the controller to keep L1 consistent when the block leaves the
    /// level below it. A miss is a silent no-op.
    pub fn invalidate(&mut self, pa: u64) {
        if let Some(way) = self.lookup(pa) {
            let (index, _) = self.geometry.split(pa);
            let line = &mut self.lines[index * self.ways + way];
            line.valid = false;
            line.dirty = false;
        }
    }
}
