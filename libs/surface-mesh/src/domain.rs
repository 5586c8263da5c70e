//! # Domain Collaborator Contracts
//!
//! The geometry core does not perform inter-process communication itself.
//! The surrounding simulation partitions elements across processes and
//! supplies two capabilities:
//!
//! - [`Domain`]: the owned spatial region of this process and the
//!   cross-process reductions (box union, count sum). The reductions are
//!   blocking, synchronizing calls; every participant must reach them before
//!   any proceeds, which makes them the natural fence point each timestep.
//! - [`ElementCounting`]: local/ghost/global element counts, so the same
//!   geometry core works identically whether or not elements are partitioned.
//!
//! Serial implementations for single-process deployments are provided.

use crate::bounds::BoundingBox;

/// Spatial partition and reduction capability supplied by the simulation.
pub trait Domain {
    /// This process's owned spatial region, used to filter element boxes.
    fn subdomain(&self) -> BoundingBox;

    /// Unions the local box with every other participant's box.
    ///
    /// The result is identical and valid on every participant.
    fn reduce_box_union(&self, local: BoundingBox) -> BoundingBox;

    /// Sums a local count across all participants.
    fn reduce_count_sum(&self, local: usize) -> usize;
}

/// Element count capability, parameterized by the locally stored total so a
/// partition-aware implementation can split it into owned and ghost parts.
pub trait ElementCounting {
    /// Number of elements owned by this process.
    fn size_local(&self, stored: usize) -> usize;

    /// Number of cached copies of neighboring processes' boundary elements.
    fn size_ghost(&self, stored: usize) -> usize;

    /// Number of elements across all processes, each counted once.
    fn size_global(&self, stored: usize) -> usize;
}

/// Single-process domain: owns all of space, reductions are the identity.
#[derive(Debug, Clone, Copy)]
pub struct SerialDomain {
    region: BoundingBox,
}

impl SerialDomain {
    /// Creates a serial domain owning all of space.
    pub fn new() -> Self {
        Self {
            region: BoundingBox::unbounded(),
        }
    }

    /// Creates a serial domain with an explicit owned region.
    ///
    /// Useful in tests and for simulations that clip geometry to a fixed
    /// simulation box even when running on one process.
    pub fn with_region(region: BoundingBox) -> Self {
        Self { region }
    }
}

impl Default for SerialDomain {
    fn default() -> Self {
        Self::new()
    }
}

impl Domain for SerialDomain {
    fn subdomain(&self) -> BoundingBox {
        self.region
    }

    fn reduce_box_union(&self, local: BoundingBox) -> BoundingBox {
        local
    }

    fn reduce_count_sum(&self, local: usize) -> usize {
        local
    }
}

/// Single-process counting: every stored element is local, none are ghosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialCounting;

impl ElementCounting for SerialCounting {
    fn size_local(&self, stored: usize) -> usize {
        stored
    }

    fn size_ghost(&self, _stored: usize) -> usize {
        0
    }

    fn size_global(&self, stored: usize) -> usize {
        stored
    }
}
