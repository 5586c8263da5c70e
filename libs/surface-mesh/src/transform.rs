//! # Transform Engine
//!
//! Rigid-body-style deformations applied to every element's nodes: uniform
//! scaling about the origin, translation, and quaternion-based rotation,
//! each in an anchored (total + incremental) and an incremental-only form.
//!
//! The anchored forms recompute live nodes from the original-configuration
//! snapshot (`orig + total`, `total_q * orig + total_displ`) whenever one is
//! tracked, so rounding error over many timesteps stays bounded by a single
//! addition instead of accumulating. The incremental-only forms also apply
//! the delta to the snapshot: motion driven through them is permanent and is
//! not undone by reset.
//!
//! Derived values (centroids, radii, per-element boxes) are recomputed only
//! after all node writes of a call have succeeded; the global box is refreshed
//! separately via `update_global_bounding_box`, the per-timestep fence.

use glam::{DQuat, DVec3};

use crate::error::MeshError;
use crate::mesh::SurfaceMesh;

impl<const N: usize> SurfaceMesh<N> {
    // ------------------------------------------------------------------
    // Scale
    // ------------------------------------------------------------------

    /// Scales every node about the coordinate-system origin.
    ///
    /// Centroids and bounding radii scale by the same factor. The original
    /// configuration is left untouched, so reset restores the
    /// pre-registration pose exactly. A non-positive or non-finite factor is
    /// a precondition violation.
    pub fn scale(&mut self, factor: f64) -> Result<(), MeshError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Err(MeshError::InvalidScaleFactor {
                mesh_id: self.id_str().to_owned(),
                factor,
            });
        }

        for i in 0..self.storage.len() {
            for node in self.storage.nodes_mut(i) {
                *node *= factor;
            }
            *self.storage.center_mut(i) *= factor;
            *self.storage.r_bound_mut(i) *= factor;
        }
        self.refresh_all_boxes();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Translate
    // ------------------------------------------------------------------

    /// Translation with total and incremental displacement.
    ///
    /// `total` is the cumulative displacement since motion began,
    /// `incremental` the delta since the previous call; the caller must keep
    /// the pair consistent across a sequence of calls. While a snapshot is
    /// tracked, live nodes are recomputed as `orig + total`, eliminating
    /// incremental floating-point drift; otherwise only the incremental
    /// delta is applied.
    pub fn translate(&mut self, total: DVec3, incremental: DVec3) {
        if self.storage.has_orig() {
            for i in 0..self.storage.len() {
                let orig = match self.storage.orig(i) {
                    Some(orig) => *orig,
                    None => continue,
                };
                let nodes = self.storage.nodes_mut(i);
                for (node, orig_node) in nodes.iter_mut().zip(orig.iter()) {
                    *node = *orig_node + total;
                }
                self.storage.recompute_summary(i);
            }
        } else {
            for i in 0..self.storage.len() {
                for node in self.storage.nodes_mut(i) {
                    *node += incremental;
                }
                *self.storage.center_mut(i) += incremental;
            }
        }
        self.refresh_all_boxes();
    }

    /// Incremental-only translation, for motion that never needs exact
    /// rollback. The snapshot, when present, is shifted along so reset
    /// preserves this displacement.
    pub fn translate_incremental(&mut self, incremental: DVec3) {
        for i in 0..self.storage.len() {
            for node in self.storage.nodes_mut(i) {
                *node += incremental;
            }
            *self.storage.center_mut(i) += incremental;
            if let Some(orig) = self.storage.orig_mut(i) {
                for node in orig {
                    *node += incremental;
                }
            }
        }
        self.refresh_all_boxes();
    }

    // ------------------------------------------------------------------
    // Rotate
    // ------------------------------------------------------------------

    /// Rotation with total and incremental angle about an axis through a
    /// pivot point.
    ///
    /// Converts to unit quaternions and pivot displacements
    /// (`displ = pivot - q * pivot`) and delegates to
    /// [`rotate_quat`](Self::rotate_quat). Angles are in radians. A
    /// zero-length axis is a precondition violation.
    pub fn rotate(
        &mut self,
        total_angle: f64,
        d_angle: f64,
        axis: DVec3,
        pivot: DVec3,
    ) -> Result<(), MeshError> {
        let axis = self.unit_axis(axis)?;
        let total_q = DQuat::from_axis_angle(axis, total_angle);
        let dq = DQuat::from_axis_angle(axis, d_angle);
        let total_displ = pivot - total_q * pivot;
        let d_displ = pivot - dq * pivot;
        self.rotate_quat(total_q, dq, total_displ, d_displ);
        Ok(())
    }

    /// Rotation primitive taking explicit unit quaternions and reference
    /// point displacements.
    ///
    /// While a snapshot is tracked, live nodes are recomputed as
    /// `total_q * orig + total_displ` (drift-free anchor); otherwise the
    /// incremental pair is applied: `dq * node + d_displ`. Centroids are
    /// recomputed from the rotated nodes, and bounding radii are recomputed
    /// defensively even though rotation preserves them.
    pub fn rotate_quat(&mut self, total_q: DQuat, dq: DQuat, total_displ: DVec3, d_displ: DVec3) {
        if self.storage.has_orig() {
            for i in 0..self.storage.len() {
                let orig = match self.storage.orig(i) {
                    Some(orig) => *orig,
                    None => continue,
                };
                let nodes = self.storage.nodes_mut(i);
                for (node, orig_node) in nodes.iter_mut().zip(orig.iter()) {
                    *node = total_q * *orig_node + total_displ;
                }
                self.storage.recompute_summary(i);
            }
        } else {
            for i in 0..self.storage.len() {
                for node in self.storage.nodes_mut(i) {
                    *node = dq * *node + d_displ;
                }
                self.storage.recompute_summary(i);
            }
        }
        self.refresh_all_boxes();
    }

    /// Incremental-only rotation about an axis through a pivot point.
    ///
    /// Angle in radians. A zero-length axis is a precondition violation.
    pub fn rotate_incremental(
        &mut self,
        d_angle: f64,
        axis: DVec3,
        pivot: DVec3,
    ) -> Result<(), MeshError> {
        let axis = self.unit_axis(axis)?;
        let dq = DQuat::from_axis_angle(axis, d_angle);
        let d_displ = pivot - dq * pivot;
        self.rotate_quat_incremental(dq, d_displ);
        Ok(())
    }

    /// Incremental-only rotation primitive. The snapshot, when present, is
    /// rotated along so reset preserves this motion.
    pub fn rotate_quat_incremental(&mut self, dq: DQuat, d_displ: DVec3) {
        for i in 0..self.storage.len() {
            for node in self.storage.nodes_mut(i) {
                *node = dq * *node + d_displ;
            }
            if let Some(orig) = self.storage.orig_mut(i) {
                for node in orig {
                    *node = dq * *node + d_displ;
                }
            }
            self.storage.recompute_summary(i);
        }
        self.refresh_all_boxes();
    }

    // ------------------------------------------------------------------
    // Element-level primitive and reset
    // ------------------------------------------------------------------

    /// Shifts a single element by an incremental displacement.
    ///
    /// Privileged primitive reached through
    /// [`MoverAccess`](crate::mesh::MoverAccess); not part of the public
    /// surface.
    pub(crate) fn move_element(&mut self, index: usize, incremental: DVec3) {
        for node in self.storage.nodes_mut(index) {
            *node += incremental;
        }
        *self.storage.center_mut(index) += incremental;
        self.refresh_element_box(index);
    }

    /// Copies the original configuration back into live storage, re-derives
    /// all summaries and boxes, and records the step of reset.
    ///
    /// Called when the last registered mover unregisters; no-op without a
    /// snapshot.
    pub(crate) fn reset_nodes_to_orig(&mut self) {
        if !self.storage.has_orig() {
            return;
        }
        self.storage.restore_from_orig();
        self.refresh_all_boxes();
        self.step_last_reset = Some(self.step);
    }

    fn unit_axis(&self, axis: DVec3) -> Result<DVec3, MeshError> {
        axis.try_normalize().ok_or_else(|| MeshError::InvalidRotationAxis {
            mesh_id: self.id_str().to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::TriMesh;
    use crate::registry::MoveKinds;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn triangle() -> [DVec3; 3] {
        [DVec3::ZERO, DVec3::X, DVec3::Y]
    }

    fn moving_triangle_mesh(kinds: MoveKinds) -> TriMesh {
        let mut mesh = TriMesh::new();
        mesh.add_element(triangle()).unwrap();
        assert!(mesh.register_move(kinds).unwrap());
        mesh
    }

    #[test]
    fn test_translate_scenario() {
        // Single triangle; incremental translate by (1,0,0) with matching
        // total; unregister returns the nodes to the original three points.
        let mut mesh = moving_triangle_mesh(MoveKinds::TRANSLATE);
        mesh.translate(DVec3::X, DVec3::X);

        assert_eq!(mesh.node(0, 0), DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(mesh.node(0, 1), DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(mesh.node(0, 2), DVec3::new(1.0, 1.0, 0.0));
        assert_relative_eq!(mesh.center(0).x, 4.0 / 3.0);
        assert_relative_eq!(mesh.center(0).y, 1.0 / 3.0);
        assert_relative_eq!(mesh.center(0).z, 0.0);

        mesh.unregister_move(MoveKinds::TRANSLATE).unwrap();
        assert_eq!(mesh.node(0, 0), DVec3::ZERO);
        assert_eq!(mesh.node(0, 1), DVec3::X);
        assert_eq!(mesh.node(0, 2), DVec3::Y);
    }

    #[test]
    fn test_rotate_scenario() {
        // 90 degrees about (0,0,1) through the origin: (1,0,0) -> (0,1,0),
        // bounding radius unchanged.
        let mut mesh = moving_triangle_mesh(MoveKinds::ROTATE);
        let r_before = mesh.r_bound(0);
        mesh.rotate(FRAC_PI_2, FRAC_PI_2, DVec3::Z, DVec3::ZERO)
            .unwrap();

        let rotated = mesh.node(0, 1);
        assert_abs_diff_eq!(rotated.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rotated.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.r_bound(0), r_before, max_relative = 1e-12);
    }

    #[test]
    fn test_rotation_preserves_distance_to_pivot() {
        let mut mesh = moving_triangle_mesh(MoveKinds::ROTATE);
        let pivot = DVec3::new(0.5, -1.0, 2.0);
        let before: Vec<f64> = (0..3).map(|j| mesh.node(0, j).distance(pivot)).collect();

        mesh.rotate(0.7, 0.7, DVec3::new(1.0, 1.0, 0.0), pivot)
            .unwrap();

        for (j, d) in before.iter().enumerate() {
            assert_relative_eq!(mesh.node(0, j).distance(pivot), d, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_scale_linearity() {
        let mut once = TriMesh::new();
        once.add_element(triangle()).unwrap();
        let mut twice = TriMesh::new();
        twice.add_element(triangle()).unwrap();

        once.scale(2.5 * 1.6).unwrap();
        twice.scale(2.5).unwrap();
        twice.scale(1.6).unwrap();

        for j in 0..3 {
            assert_relative_eq!(once.node(0, j).x, twice.node(0, j).x, max_relative = 1e-14);
            assert_relative_eq!(once.node(0, j).y, twice.node(0, j).y, max_relative = 1e-14);
        }
        assert_relative_eq!(once.r_bound(0), twice.r_bound(0), max_relative = 1e-14);
    }

    #[test]
    fn test_scale_rejects_non_positive_factor() {
        let mut mesh = TriMesh::new();
        mesh.set_mesh_id("plate").unwrap();
        mesh.add_element(triangle()).unwrap();
        assert!(matches!(
            mesh.scale(0.0),
            Err(MeshError::InvalidScaleFactor { .. })
        ));
        assert!(matches!(
            mesh.scale(-1.5),
            Err(MeshError::InvalidScaleFactor { .. })
        ));
        assert!(matches!(
            mesh.scale(f64::NAN),
            Err(MeshError::InvalidScaleFactor { .. })
        ));
        // Failed calls leave geometry untouched
        assert_eq!(mesh.node(0, 1), DVec3::X);
    }

    #[test]
    fn test_reset_idempotence_after_mixed_transforms() {
        let kinds = MoveKinds::TRANSLATE.with_rotate().with_scale();
        let mut mesh = moving_triangle_mesh(kinds);
        let captured: Vec<DVec3> = (0..3).map(|j| mesh.node(0, j)).collect();

        mesh.translate(DVec3::new(1.0, 2.0, 3.0), DVec3::new(1.0, 2.0, 3.0));
        mesh.scale(3.0).unwrap();
        mesh.rotate(1.2, 1.2, DVec3::Z, DVec3::new(0.3, 0.3, 0.0))
            .unwrap();
        mesh.translate(DVec3::new(2.0, 2.0, 3.0), DVec3::new(1.0, 0.0, 0.0));

        mesh.unregister_move(kinds).unwrap();
        // Restore copies the untouched snapshot back verbatim.
        for (j, p) in captured.iter().enumerate() {
            assert_eq!(mesh.node(0, j), *p);
        }
        assert!(!mesh.is_moving());
    }

    #[test]
    fn test_anchored_translation_is_drift_free() {
        let mut mesh = moving_triangle_mesh(MoveKinds::TRANSLATE);
        // Many not-exactly-representable increments; the anchored path must
        // land on orig + total exactly, not on the sum of increments.
        let step = DVec3::new(0.1, 0.0, 0.0);
        for k in 1..=1000 {
            mesh.translate(step * f64::from(k), step);
        }
        let total = step * 1000.0;
        assert_eq!(mesh.node(0, 0), triangle()[0] + total);
        assert_eq!(mesh.node(0, 1), triangle()[1] + total);
    }

    #[test]
    fn test_incremental_only_translate_survives_reset() {
        let mut mesh = moving_triangle_mesh(MoveKinds::TRANSLATE);
        mesh.translate_incremental(DVec3::new(0.0, 0.0, 4.0));
        mesh.unregister_move(MoveKinds::TRANSLATE).unwrap();
        // Snapshot moved with the nodes: the displacement is permanent.
        assert_eq!(mesh.node(0, 0), DVec3::new(0.0, 0.0, 4.0));
    }

    #[test]
    fn test_boxes_follow_transforms() {
        let mut mesh = moving_triangle_mesh(MoveKinds::TRANSLATE.with_rotate());
        mesh.translate(DVec3::new(5.0, 0.0, 0.0), DVec3::new(5.0, 0.0, 0.0));
        mesh.rotate(0.4, 0.4, DVec3::Y, DVec3::new(5.0, 0.0, 0.0))
            .unwrap();

        let elem_box = mesh.element_bounding_box(0);
        for j in 0..3 {
            assert!(elem_box.contains_point(mesh.node(0, j)));
        }
        mesh.update_global_bounding_box();
        assert!(mesh.global_bounding_box().contains_box(&elem_box));
    }

    #[test]
    fn test_reset_records_step() {
        let mut mesh = moving_triangle_mesh(MoveKinds::ROTATE);
        mesh.advance_to(42);
        mesh.rotate(0.1, 0.1, DVec3::Z, DVec3::ZERO).unwrap();
        mesh.unregister_move(MoveKinds::ROTATE).unwrap();
        assert_eq!(mesh.step_last_reset(), Some(42));
    }

    #[test]
    fn test_move_element_shifts_one_element() {
        let mut mesh = TriMesh::new();
        mesh.add_element(triangle()).unwrap();
        mesh.add_element(triangle()).unwrap();
        assert!(mesh.register_move(MoveKinds::TRANSLATE).unwrap());

        let mut access = mesh.mover_access().unwrap();
        access.move_element(1, DVec3::new(0.0, 3.0, 0.0));

        assert_eq!(mesh.node(0, 0), DVec3::ZERO);
        assert_eq!(mesh.node(1, 0), DVec3::new(0.0, 3.0, 0.0));
        assert!(mesh
            .element_bounding_box(1)
            .contains_point(DVec3::new(0.0, 4.0, 0.0)));
    }

    #[test]
    fn test_mover_access_requires_registration() {
        let mut mesh = TriMesh::new();
        mesh.add_element(triangle()).unwrap();
        assert!(mesh.mover_access().is_none());

        assert!(mesh.register_move(MoveKinds::ROTATE).unwrap());
        assert!(mesh.mover_access().is_some());

        mesh.unregister_move(MoveKinds::ROTATE).unwrap();
        assert!(mesh.mover_access().is_none());
    }
}
