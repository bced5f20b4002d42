//! # Unit Components
//!
//! This module serves as the central hub for the component-level tests of the
//! simulator. It organizes the building blocks required for verification,
//! from pure address arithmetic up to the full two-level access pipeline.

/// Unit tests for address geometry (split/reconstruct round trips).
pub mod addr;


/// Unit tests for configuration defaults, validation, and L2 derivation.
pub mod config;

/// Behavioral tests for the hierarchy controller.
///
/// This module aggregates tests for:
/// - Single-level hit/miss classification and write-back accounting.
/// - Two-level fetch, write-back, and inclusion maintenance.
/// - Sequential prefetch side effects.
pub mod hierarchy;
