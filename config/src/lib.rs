//! # Config Crate
//!
//! Centralized configuration constants for the surface mesh geometry core.
//! All magic numbers and tunable tolerances are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, NODE_EQUAL_ABS_TOL};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-11;
//! assert!(value.abs() < EPSILON);
//! assert!(NODE_EQUAL_ABS_TOL >= EPSILON);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Deterministic**: Fixed default RNG seed for reproducible runs
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
