//! # Configuration Constants
//!
//! Centralized constants for the surface mesh core. All geometry tolerances
//! and simulation-facing defaults are defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Node Matching**: Tolerances for deciding that two node slots coincide
//! - **Randomness**: Default seed for the mesh-owned generator

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance. This value is chosen to balance precision with
/// robustness against floating-point errors.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// NODE MATCHING CONSTANTS
// =============================================================================

/// Absolute tolerance for node coincidence checks.
///
/// Two node coordinates closer than this are considered equal regardless of
/// magnitude. Guards the near-origin regime where a purely relative test
/// degenerates.
pub const NODE_EQUAL_ABS_TOL: f64 = 1e-8;

/// Relative tolerance for node coincidence checks.
///
/// Scales with the larger coordinate magnitude, so meshes spanning many
/// orders of magnitude still match shared nodes reliably.
pub const NODE_EQUAL_REL_TOL: f64 = 1e-10;

// =============================================================================
// RANDOMNESS CONSTANTS
// =============================================================================

/// Default seed for the random generator owned by each mesh.
///
/// Collaborator movers draw from the mesh-owned generator (e.g. to jitter
/// freshly inserted elements); a fixed default keeps runs reproducible unless
/// the simulation supplies its own seed.
pub const DEFAULT_RNG_SEED: u64 = 3_141_592;
