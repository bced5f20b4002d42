//! Configuration Tests.
//!
//! Covers configuration defaults, JSON deserialization, the validation rules
//! (power-of-two, bounds, divisibility, level count), and derived L2 geometry.

use cachetrace_core::common::error::ConfigError;
use cachetrace_core::config::{CacheParams, HierarchyConfig, PrefetchPolicy};
use rstest::rstest;

fn params(size_bytes: u64, ways: u64, block_bytes: u64) -> CacheParams {
    CacheParams {
        size_bytes,
        ways,
        block_bytes,
    }
}

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn default_config_is_valid_direct_mapped() {
    let config = HierarchyConfig::default();
    assert_eq!(config.l1.size_bytes, 4096);
    assert_eq!(config.l1.ways, 1);
    assert_eq!(config.l1.block_bytes, 4);
    assert_eq!(config.levels, 1);
    assert_eq!(config.prefetch, PrefetchPolicy::None);
    assert!(config.validate().is_ok());
    assert!(config.l2().is_none());
}

#[test]
fn empty_json_uses_defaults() {
    let config: HierarchyConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config.l1, CacheParams::default());
    assert_eq!(config.levels, 1);
    assert_eq!(config.prefetch, PrefetchPolicy::None);
}

#[test]
fn lowercase_prefetch_alias_deserializes() {
    let config: HierarchyConfig =
        serde_json::from_str(r#"{ "prefetch": "sequential" }"#).unwrap();
    assert_eq!(config.prefetch, PrefetchPolicy::Sequential);
}

// ══════════════════════════════════════════════════════════
// 2. Accepted geometries
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::minimal(4, 1, 4)]
#[case::classic(4096, 1, 4)]
#[case::two_way(32, 2, 4)]
#[case::wide_blocks(16384, 4, 64)]
#[case::fully_associative(64, 16, 4)]
fn accepts_valid_geometry(#[case] size: u64, #[case] ways: u64, #[case] block: u64) {
    assert_eq!(params(size, ways, block).validate(), Ok(()));
}

/// Every accepted geometry satisfies `num_sets × ways × block == size`.
#[test]
fn capacity_invariant_holds_for_all_accepted_geometries() {
    for size_shift in 2u32..=14 {
        for block_shift in 2u32..=size_shift {
            for way_shift in 0u32..=(size_shift - block_shift) {
                let p = params(1 << size_shift, 1 << way_shift, 1 << block_shift);
                assert_eq!(p.validate(), Ok(()), "{p:?} should be accepted");
                assert_eq!(p.num_sets() * p.ways * p.block_bytes, p.size_bytes);
                assert!(p.num_sets() >= 1);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════
// 3. Rejected geometries
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::size_not_pow2(100, 1, 4)]
#[case::size_zero(0, 1, 4)]
#[case::size_below_min(2, 1, 2)]
#[case::size_above_max(32768, 1, 4)]
#[case::block_not_pow2(4096, 1, 3)]
#[case::block_zero(4096, 1, 0)]
#[case::block_below_min(4096, 1, 2)]
#[case::block_above_size(4096, 1, 8192)]
#[case::ways_not_pow2(4096, 3, 4)]
#[case::ways_zero(4096, 0, 4)]
#[case::ways_above_blocks(16, 8, 4)]
fn rejects_invalid_geometry(#[case] size: u64, #[case] ways: u64, #[case] block: u64) {
    assert!(params(size, ways, block).validate().is_err());
}

#[test]
fn rejection_reports_the_offending_field() {
    assert_eq!(
        params(100, 1, 4).validate(),
        Err(ConfigError::NotPowerOfTwo {
            field: "size_bytes",
            value: 100
        })
    );
    assert_eq!(
        params(32768, 1, 4).validate(),
        Err(ConfigError::OutOfRange {
            field: "size_bytes",
            value: 32768,
            min: 4,
            max: 16384
        })
    );
    assert_eq!(
        params(16, 8, 4).validate(),
        Err(ConfigError::OutOfRange {
            field: "ways",
            value: 8,
            min: 1,
            max: 4
        })
    );
}

#[test]
fn rejects_bad_level_count() {
    for levels in [0, 3, 7] {
        let config = HierarchyConfig {
            levels,
            ..HierarchyConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::BadLevelCount(levels)));
    }
}

#[test]
fn error_messages_name_the_parameter() {
    let err = params(100, 1, 4).validate().unwrap_err();
    assert!(err.to_string().contains("size_bytes"));
    assert!(err.to_string().contains("100"));
}

// ══════════════════════════════════════════════════════════
// 4. Derived L2 geometry
// ══════════════════════════════════════════════════════════

#[test]
fn l2_is_sixteen_times_l1_with_same_shape() {
    let config = HierarchyConfig {
        l1: params(4096, 2, 64),
        levels: 2,
        prefetch: PrefetchPolicy::None,
    };
    let l2 = config.l2().unwrap();
    assert_eq!(l2.size_bytes, 16 * 4096);
    assert_eq!(l2.ways, 2);
    assert_eq!(l2.block_bytes, 64);
    // The derivation preserves the capacity invariant.
    assert_eq!(l2.num_sets() * l2.ways * l2.block_bytes, l2.size_bytes);
}

#[test]
fn single_level_config_derives_no_l2() {
    assert!(HierarchyConfig::default().l2().is_none());
}
