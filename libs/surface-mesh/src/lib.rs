//! # Surface Mesh
//!
//! Geometry core for a moving surface mesh participating in a particle/fluid
//! simulation: per-element node storage with derived centroids and bounding
//! radii, rigid-body-style transforms (scale, translate, quaternion
//! rotation), move registration with reset-to-original semantics, and
//! per-element plus global axis-aligned bounding boxes.
//!
//! ## Architecture
//!
//! ```text
//! mover registers intent → transform engine mutates node storage
//!        → summaries and per-element boxes refreshed
//!        → global box recomputed/reduced (domain collaborator)
//! ```
//!
//! Element connectivity, topology search, inter-process element distribution
//! and mesh file I/O are external collaborators; this crate only specifies
//! the contracts it needs from them ([`domain::Domain`],
//! [`domain::ElementCounting`]).
//!
//! ## Usage
//!
//! ```rust
//! use surface_mesh::{registry::MoveKinds, TriMesh};
//! use glam::DVec3;
//!
//! let mut mesh = TriMesh::new();
//! mesh.set_mesh_id("blade")?;
//! mesh.add_element([DVec3::ZERO, DVec3::X, DVec3::Y])?;
//!
//! assert!(mesh.register_move(MoveKinds::TRANSLATE)?);
//! mesh.translate(DVec3::X, DVec3::X);
//! mesh.unregister_move(MoveKinds::TRANSLATE)?; // back at rest pose
//! assert_eq!(mesh.node(0, 0), DVec3::ZERO);
//! # Ok::<(), surface_mesh::MeshError>(())
//! ```

pub mod bounds;
pub mod domain;
pub mod error;
pub mod mesh;
pub mod registry;

mod storage;
mod transform;

pub use bounds::BoundingBox;
pub use error::MeshError;
pub use mesh::{MoverAccess, SurfaceMesh, TriMesh};
pub use registry::MoveKinds;
