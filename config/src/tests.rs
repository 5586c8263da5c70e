//! # Tests for Config Constants
//!
//! Unit tests verifying the correctness of configuration constants.

use crate::constants::*;

// =============================================================================
// PRECISION TESTS
// =============================================================================

#[test]
fn test_epsilon_is_positive() {
    assert!(EPSILON > 0.0, "EPSILON must be positive");
}

#[test]
fn test_epsilon_is_small() {
    assert!(EPSILON < 1e-6, "EPSILON should be small for precision");
}

// =============================================================================
// NODE MATCHING TESTS
// =============================================================================

#[test]
fn test_node_equal_abs_tol_larger_than_epsilon() {
    assert!(
        NODE_EQUAL_ABS_TOL >= EPSILON,
        "NODE_EQUAL_ABS_TOL should be >= EPSILON"
    );
}

#[test]
fn test_node_equal_rel_tol_is_small() {
    // Relative tolerance applies to coordinates spanning many magnitudes;
    // it must stay well below typical mesh feature sizes.
    assert!(NODE_EQUAL_REL_TOL > 0.0);
    assert!(NODE_EQUAL_REL_TOL <= 1e-8);
}
