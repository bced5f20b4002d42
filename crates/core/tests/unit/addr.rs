//! Address Geometry Unit Tests.
//!
//! Verifies the tag/index/offset decomposition and its inverse. The contract:
//! for every power-of-two geometry, reconstructing an address from its split
//! yields the original address with the offset bits masked to zero.

use cachetrace_core::common::addr::Geometry;
use proptest::prelude::*;

// ══════════════════════════════════════════════════════════
// 1. Fixed decompositions
// ══════════════════════════════════════════════════════════

/// 4-byte blocks, 4 sets: offset_bits = 2, index_bits = 2.
///
/// For 0x13: index = (0x13 >> 2) & 3 = 0, tag = 0x13 >> 4 = 1, and the
/// reconstructed block address drops the offset bits.
#[test]
fn splits_small_direct_mapped_geometry() {
    let geometry = Geometry::new(4, 4);
    assert_eq!(geometry.offset_bits(), 2);
    assert_eq!(geometry.index_bits(), 2);

    let (index, tag) = geometry.split(0x13);
    assert_eq!(index, 0);
    assert_eq!(tag, 1);
    assert_eq!(geometry.block_addr(tag, index), 0x10);
}

/// Adjacent blocks land in adjacent sets.
#[test]
fn consecutive_blocks_walk_the_sets() {
    let geometry = Geometry::new(4, 4);
    assert_eq!(geometry.split(0x00).0, 0);
    assert_eq!(geometry.split(0x04).0, 1);
    assert_eq!(geometry.split(0x08).0, 2);
    assert_eq!(geometry.split(0x0c).0, 3);
    // Wraps: the set field is only two bits wide.
    assert_eq!(geometry.split(0x10).0, 0);
}

/// A single-set (fully associative) cache has no index field: the whole
/// address above the offset is tag.
#[test]
fn single_set_geometry_has_zero_index_bits() {
    let geometry = Geometry::new(64, 1);
    assert_eq!(geometry.index_bits(), 0);

    let (index, tag) = geometry.split(0x1234);
    assert_eq!(index, 0);
    assert_eq!(tag, 0x1234 >> 6);
    assert_eq!(geometry.block_addr(tag, index), 0x1200);
}

/// Two addresses in the same block split identically.
#[test]
fn same_block_offsets_share_index_and_tag() {
    let geometry = Geometry::new(64, 8);
    assert_eq!(geometry.split(0x1000), geometry.split(0x103f));
    assert_ne!(geometry.split(0x1000), geometry.split(0x1040));
}

// ══════════════════════════════════════════════════════════
// 2. Round-trip property
// ══════════════════════════════════════════════════════════

proptest! {
    /// `block_addr(split(pa))` equals `pa` truncated to block granularity,
    /// for every geometry the validator can accept.
    #[test]
    fn round_trip_masks_offset_bits(
        block_shift in 2u32..=8,
        set_shift in 0u32..=8,
        pa in any::<u64>(),
    ) {
        let block_bytes = 1u64 << block_shift;
        let num_sets = 1u64 << set_shift;
        let geometry = Geometry::new(block_bytes, num_sets);

        let (index, tag) = geometry.split(pa);
        prop_assert!(index < num_sets as usize);
        prop_assert_eq!(geometry.block_addr(tag, index), pa & !(block_bytes - 1));
    }
}
