//! # Node Storage & Element Summaries
//!
//! Contiguous per-element node records with a fixed, compile-time node count,
//! plus the derived per-element summary geometry (centroid, bounding radius)
//! and the optional original-configuration snapshot used by moving meshes.
//!
//! The const generic `N` keeps per-node loops flat and branch-free; every
//! element is one fixed-stride `[DVec3; N]` record.

use glam::DVec3;

use crate::error::MeshError;

/// Per-element node coordinates and derived summaries.
///
/// Invariants:
/// - `nodes`, `centers` and `r_bound` always have identical length.
/// - When the snapshot is present it has the same length and element
///   ordering as live storage.
#[derive(Debug, Clone)]
pub(crate) struct NodeStorage<const N: usize> {
    /// Live node positions, one fixed-stride record per element.
    nodes: Vec<[DVec3; N]>,
    /// Element centroids (arithmetic mean of the element's nodes).
    centers: Vec<DVec3>,
    /// Max distance from centroid to any node of the element.
    r_bound: Vec<f64>,
    /// Original-configuration snapshot, present only while a rollback-capable
    /// move is registered.
    orig: Option<Vec<[DVec3; N]>>,
}

impl<const N: usize> NodeStorage<N> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: Vec::new(),
            centers: Vec::new(),
            r_bound: Vec::new(),
            orig: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends an element and derives its summary.
    ///
    /// Growth is attempted fallibly so resource exhaustion surfaces as an
    /// [`MeshError::Allocation`] instead of an abort. If a snapshot is being
    /// tracked the new element joins it at its add-time pose, preserving the
    /// shape invariant.
    pub(crate) fn push(&mut self, nodes: [DVec3; N]) -> Result<usize, MeshError> {
        self.nodes.try_reserve(1)?;
        self.centers.try_reserve(1)?;
        self.r_bound.try_reserve(1)?;
        if let Some(orig) = &mut self.orig {
            orig.try_reserve(1)?;
            orig.push(nodes);
        }

        let index = self.nodes.len();
        self.nodes.push(nodes);
        let (center, radius) = summarize(&nodes);
        self.centers.push(center);
        self.r_bound.push(radius);
        Ok(index)
    }

    /// Removes an element, compacting all parallel containers so indices
    /// stay dense. External index remapping is the caller's concern.
    pub(crate) fn remove(&mut self, index: usize) {
        self.nodes.remove(index);
        self.centers.remove(index);
        self.r_bound.remove(index);
        if let Some(orig) = &mut self.orig {
            orig.remove(index);
        }
    }

    pub(crate) fn nodes(&self, index: usize) -> &[DVec3; N] {
        &self.nodes[index]
    }

    pub(crate) fn nodes_mut(&mut self, index: usize) -> &mut [DVec3; N] {
        &mut self.nodes[index]
    }

    pub(crate) fn center(&self, index: usize) -> DVec3 {
        self.centers[index]
    }

    pub(crate) fn center_mut(&mut self, index: usize) -> &mut DVec3 {
        &mut self.centers[index]
    }

    pub(crate) fn r_bound(&self, index: usize) -> f64 {
        self.r_bound[index]
    }

    pub(crate) fn r_bound_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.r_bound[index]
    }

    /// Re-derives centroid and bounding radius of one element from its
    /// current nodes.
    pub(crate) fn recompute_summary(&mut self, index: usize) {
        let (center, radius) = summarize(&self.nodes[index]);
        self.centers[index] = center;
        self.r_bound[index] = radius;
    }

    // ------------------------------------------------------------------
    // Original-configuration snapshot
    // ------------------------------------------------------------------

    pub(crate) fn has_orig(&self) -> bool {
        self.orig.is_some()
    }

    /// Captures the current node positions as the original configuration.
    ///
    /// Allocation failure is surfaced; live storage is left untouched.
    pub(crate) fn capture_orig(&mut self) -> Result<(), MeshError> {
        let mut snapshot = Vec::new();
        snapshot.try_reserve_exact(self.nodes.len())?;
        snapshot.extend_from_slice(&self.nodes);
        self.orig = Some(snapshot);
        Ok(())
    }

    /// Releases the snapshot once no rollback-capable mover remains.
    pub(crate) fn release_orig(&mut self) {
        self.orig = None;
    }

    pub(crate) fn orig(&self, index: usize) -> Option<&[DVec3; N]> {
        self.orig.as_ref().map(|orig| &orig[index])
    }

    pub(crate) fn orig_mut(&mut self, index: usize) -> Option<&mut [DVec3; N]> {
        self.orig.as_mut().map(|orig| &mut orig[index])
    }

    /// Copies the snapshot back into live storage and re-derives every
    /// element summary. No-op when no snapshot is present.
    pub(crate) fn restore_from_orig(&mut self) {
        let Some(orig) = &self.orig else {
            return;
        };
        self.nodes.copy_from_slice(orig);
        for i in 0..self.nodes.len() {
            self.recompute_summary(i);
        }
    }
}

/// Computes (centroid, bounding radius) of one element.
fn summarize<const N: usize>(nodes: &[DVec3; N]) -> (DVec3, f64) {
    let mut center = DVec3::ZERO;
    for node in nodes {
        center += *node;
    }
    center /= N as f64;

    let mut radius: f64 = 0.0;
    for node in nodes {
        radius = radius.max(node.distance(center));
    }
    (center, radius)
}
