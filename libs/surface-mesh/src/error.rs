//! # Mesh Errors
//!
//! Error types for the surface mesh geometry core.
//!
//! Precondition violations are programmer errors in the surrounding
//! simulation; every message that can, names the offending mesh by its
//! identity string so the driver can report a descriptive fatal stop.

use std::collections::TryReserveError;
use thiserror::Error;

use crate::registry::MoveKind;

/// Errors that can occur in the surface mesh core.
#[derive(Debug, Error)]
pub enum MeshError {
    /// Mesh identity assigned more than once
    #[error("mesh '{mesh_id}': identity is set-once, cannot reassign to '{attempted}'")]
    IdentitySet { mesh_id: String, attempted: String },

    /// Scale factor must be positive and finite
    #[error("mesh '{mesh_id}': invalid scale factor {factor}, must be > 0 and finite")]
    InvalidScaleFactor { mesh_id: String, factor: f64 },

    /// Rotation axis has zero length
    #[error("mesh '{mesh_id}': rotation axis must have non-zero length")]
    InvalidRotationAxis { mesh_id: String },

    /// Unregistering a move kind whose counter is already zero
    #[error("mesh '{mesh_id}': unregistering {kind} move that was never registered")]
    UnbalancedUnregister { mesh_id: String, kind: MoveKind },

    /// Element index past the end of local+ghost storage
    #[error("mesh '{mesh_id}': element index {index} out of bounds (stored: {len})")]
    ElementOutOfBounds {
        mesh_id: String,
        index: usize,
        len: usize,
    },

    /// Storage growth or snapshot allocation failed
    #[error("allocation failure while growing mesh storage")]
    Allocation(#[from] TryReserveError),
}

impl MeshError {
    /// Creates an out-of-bounds error for the given element index.
    pub(crate) fn out_of_bounds(mesh_id: &str, index: usize, len: usize) -> Self {
        Self::ElementOutOfBounds {
            mesh_id: mesh_id.to_owned(),
            index,
            len,
        }
    }
}
