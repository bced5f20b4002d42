//! Simulation statistics collection and reporting.
//!
//! This module tracks access counters for the cache hierarchy. It provides:
//! 1. **Per-level counters:** Total/read/write accesses, hits by kind, misses.
//! 2. **Memory traffic:** Reads and writes that reached the backing memory.
//! 3. **Derived metrics:** Hit rates guarded against division by zero.
//! 4. **Reporting:** An aligned text report of the whole hierarchy.
//!
//! Counters are zeroed at initialization, monotonically incremented by the
//! hierarchy controller, and read-only everywhere else.

/// Access counters for one cache level.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelStats {
    /// Total accesses presented to this level.
    pub total_accesses: u64,
    /// Read accesses presented to this level.
    pub read_accesses: u64,
    /// Write accesses presented to this level.
    pub write_accesses: u64,
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Read accesses that hit.
    pub read_hits: u64,
    /// Write accesses that hit.
    pub write_hits: u64,
    /// Accesses that missed.
    pub misses: u64,
}

impl LevelStats {
    /// Fraction of accesses that hit, in `[0, 1]`. Zero when idle.
    pub fn hit_rate(&self) -> f64 {
        if self.total_accesses == 0 {
            0.0
        } else {
            self.hits as f64 / self.total_accesses as f64
        }
    }
}

/// Traffic counters for the backing memory.
///
/// Memory always succeeds and has no latency; only the traffic volume is
/// interesting, so these are plain counters with no hit/miss split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStats {
    /// Total accesses that reached memory.
    pub total_accesses: u64,
    /// Block fills read from memory.
    pub read_accesses: u64,
    /// Dirty blocks written back to memory.
    pub write_accesses: u64,
}

impl MemoryStats {
    /// Records one block fill from memory.
    pub(crate) const fn record_read(&mut self) {
        self.total_accesses += 1;
        self.read_accesses += 1;
    }

    /// Records one dirty write-back to memory.
    pub(crate) const fn record_write(&mut self) {
        self.total_accesses += 1;
        self.write_accesses += 1;
    }
}

/// All counters for one hierarchy instance.
///
/// Owned and mutated exclusively by the hierarchy controller; exposed
/// read-only through [`Hierarchy::stats`](crate::hierarchy::Hierarchy::stats)
/// and by value through
/// [`Hierarchy::snapshot`](crate::hierarchy::Hierarchy::snapshot).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchyStats {
    /// First-level counters.
    pub l1: LevelStats,
    /// Second-level counters; `None` for a single-level hierarchy.
    pub l2: Option<LevelStats>,
    /// Backing-memory traffic.
    pub memory: MemoryStats,
}

impl HierarchyStats {
    /// Creates zeroed counters for a hierarchy of the given depth.
    pub fn new(has_l2: bool) -> Self {
        Self {
            l1: LevelStats::default(),
            l2: has_l2.then(LevelStats::default),
            memory: MemoryStats::default(),
        }
    }

    /// Prints the statistics report to stdout.
    ///
    /// The L2 section is omitted for single-level hierarchies.
    ///
    /// # Panics
    ///
    /// This function will not panic. Percentage math goes through
    /// [`LevelStats::hit_rate`], which guards against division by zero.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("CACHE HIERARCHY SIMULATION STATISTICS");
        println!("==========================================================");
        println!("memory.total             {}", self.memory.total_accesses);
        println!("memory.reads             {}", self.memory.read_accesses);
        println!("memory.writes            {}", self.memory.write_accesses);
        println!("----------------------------------------------------------");
        let print_level = |name: &str, s: &LevelStats| {
            println!("{} LEVEL", name);
            println!(
                "  accesses.total         {} (r {} / w {})",
                s.total_accesses, s.read_accesses, s.write_accesses
            );
            println!(
                "  hits                   {} ({:.2}%)",
                s.hits,
                s.hit_rate() * 100.0
            );
            println!("  hits.read              {}", s.read_hits);
            println!("  hits.write             {}", s.write_hits);
            println!("  misses                 {}", s.misses);
            println!("----------------------------------------------------------");
        };
        print_level("L1", &self.l1);
        if let Some(l2) = &self.l2 {
            print_level("L2", l2);
        }
        println!("==========================================================");
    }
}
