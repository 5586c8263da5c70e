//! # Surface Mesh Facade
//!
//! Composes node storage, element summaries, the bounding volume tracker and
//! the move registration ledger into the public mesh geometry API.
//!
//! All mutation is synchronous and single-threaded per process; the
//! distributed deployment is reached only through the injected
//! [`Domain`]/[`ElementCounting`] collaborators.

use glam::DVec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

use config::constants::{DEFAULT_RNG_SEED, NODE_EQUAL_ABS_TOL, NODE_EQUAL_REL_TOL};

use crate::bounds::BoundingBox;
use crate::domain::{Domain, ElementCounting, SerialCounting, SerialDomain};
use crate::error::MeshError;
use crate::registry::{MoveKinds, MoveRegistry};
use crate::storage::NodeStorage;

/// A surface mesh of fixed-node-count elements participating in a
/// particle/fluid simulation.
///
/// `N` is the node count per element, fixed for the whole mesh (3 for
/// triangles). Elements are addressed by dense local index
/// `0..size_local()+size_ghost()`; index management across processes is the
/// caller's concern.
///
/// # Example
///
/// ```rust
/// use surface_mesh::TriMesh;
/// use glam::DVec3;
///
/// let mut mesh = TriMesh::new();
/// mesh.set_mesh_id("wall").unwrap();
/// let i = mesh
///     .add_element([DVec3::ZERO, DVec3::X, DVec3::Y])
///     .unwrap();
/// assert_eq!(i, 0);
/// assert_eq!(mesh.size_local(), 1);
/// ```
pub struct SurfaceMesh<const N: usize> {
    /// Node coordinates and derived element summaries.
    pub(crate) storage: NodeStorage<N>,
    /// One axis-aligned box per element, index-aligned with storage.
    pub(crate) elem_boxes: Vec<BoundingBox>,
    /// Global bounding box across all processes, valid after the last
    /// [`update_global_bounding_box`](Self::update_global_bounding_box).
    pub(crate) bbox: BoundingBox,
    /// Move registration ledger.
    pub(crate) registry: MoveRegistry,
    /// Spatial partition / reduction collaborator.
    pub(crate) domain: Box<dyn Domain>,
    /// Local/ghost/global counting collaborator.
    pub(crate) counting: Box<dyn ElementCounting>,
    /// Seeded generator exposed to collaborator movers; never consumed here.
    pub(crate) random: StdRng,
    /// Immutable identity, set once.
    pub(crate) mesh_id: Option<String>,
    /// Current simulation step, advanced by the driver.
    pub(crate) step: u64,
    /// Step at which nodes were last reset to the original configuration.
    pub(crate) step_last_reset: Option<u64>,
}

/// Triangle mesh, the common case.
pub type TriMesh = SurfaceMesh<3>;

impl<const N: usize> SurfaceMesh<N> {
    /// Node count per element.
    pub const NUM_NODES: usize = N;

    /// Creates an empty mesh with serial (single-process) collaborators and
    /// the default RNG seed.
    pub fn new() -> Self {
        Self::with_collaborators(
            Box::new(SerialDomain::new()),
            Box::new(SerialCounting),
            DEFAULT_RNG_SEED,
        )
    }

    /// Creates an empty mesh with explicit collaborators and RNG seed.
    pub fn with_collaborators(
        domain: Box<dyn Domain>,
        counting: Box<dyn ElementCounting>,
        seed: u64,
    ) -> Self {
        Self {
            storage: NodeStorage::new(),
            elem_boxes: Vec::new(),
            bbox: BoundingBox::empty(),
            registry: MoveRegistry::new(),
            domain,
            counting,
            random: StdRng::seed_from_u64(seed),
            mesh_id: None,
            step: 0,
            step_last_reset: None,
        }
    }

    // ------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------

    /// Assigns the mesh identity. Set-once; reassignment is an error.
    ///
    /// The identity is the addressing key external movers use to target this
    /// mesh and must be unique within the simulation.
    pub fn set_mesh_id(&mut self, id: impl Into<String>) -> Result<(), MeshError> {
        let attempted = id.into();
        if let Some(existing) = &self.mesh_id {
            return Err(MeshError::IdentitySet {
                mesh_id: existing.clone(),
                attempted,
            });
        }
        self.mesh_id = Some(attempted);
        Ok(())
    }

    /// Returns the mesh identity, if assigned.
    pub fn mesh_id(&self) -> Option<&str> {
        self.mesh_id.as_deref()
    }

    /// Identity for error messages, before `set_mesh_id` has run.
    pub(crate) fn id_str(&self) -> &str {
        self.mesh_id.as_deref().unwrap_or("<unnamed>")
    }

    // ------------------------------------------------------------------
    // Elements
    // ------------------------------------------------------------------

    /// Appends a new element and returns its local index.
    ///
    /// The centroid, bounding radius and per-element box are derived
    /// immediately and the global box is extended to cover the newcomer.
    /// Duplicate geometry is not an error.
    pub fn add_element(&mut self, nodes: [DVec3; N]) -> Result<usize, MeshError> {
        self.elem_boxes.try_reserve(1)?;
        let index = self.storage.push(nodes)?;
        let elem_box = BoundingBox::from_points(&nodes);
        self.elem_boxes.push(elem_box);
        self.bbox.extend_box(&elem_box);
        Ok(index)
    }

    /// Removes an element, compacting downstream containers so indices stay
    /// dense. Any external index remapping is the caller's responsibility.
    pub fn delete_element(&mut self, index: usize) -> Result<(), MeshError> {
        if index >= self.storage.len() {
            return Err(MeshError::out_of_bounds(
                self.id_str(),
                index,
                self.storage.len(),
            ));
        }
        self.storage.remove(index);
        self.elem_boxes.remove(index);
        Ok(())
    }

    /// Returns true if two node slots coincide within tolerance.
    ///
    /// Uses a combined relative-and-absolute epsilon per coordinate, since
    /// mesh coordinates may span many orders of magnitude. A mismatch is not
    /// an error; the caller decides what `false` means.
    pub fn nodes_are_equal(
        &self,
        elem_a: usize,
        node_a: usize,
        elem_b: usize,
        node_b: usize,
    ) -> bool {
        let a = self.storage.nodes(elem_a)[node_a];
        let b = self.storage.nodes(elem_b)[node_b];
        coords_equal(a.x, b.x) && coords_equal(a.y, b.y) && coords_equal(a.z, b.z)
    }

    /// Returns a node's coordinates by value.
    pub fn node(&self, elem: usize, node: usize) -> DVec3 {
        self.storage.nodes(elem)[node]
    }

    /// Returns an element's centroid by value.
    pub fn center(&self, elem: usize) -> DVec3 {
        self.storage.center(elem)
    }

    /// Returns an element's bounding radius (max centroid-to-node distance).
    pub fn r_bound(&self, elem: usize) -> f64 {
        self.storage.r_bound(elem)
    }

    /// Node count per element.
    pub fn num_nodes(&self) -> usize {
        N
    }

    // ------------------------------------------------------------------
    // Size queries (delegated to the counting collaborator)
    // ------------------------------------------------------------------

    /// Number of elements owned by this process.
    pub fn size_local(&self) -> usize {
        self.counting.size_local(self.storage.len())
    }

    /// Number of ghost elements cached from neighboring processes.
    pub fn size_ghost(&self) -> usize {
        self.counting.size_ghost(self.storage.len())
    }

    /// Number of elements across all processes, each counted once.
    pub fn size_global(&self) -> usize {
        self.counting.size_global(self.storage.len())
    }

    // ------------------------------------------------------------------
    // Move registration
    // ------------------------------------------------------------------

    /// Declares intent to drive the mesh with the requested transform kinds.
    ///
    /// On the first registration of a rollback-requiring kind (translate or
    /// rotate) while the mesh is at rest, the original-configuration
    /// snapshot is captured from current node positions. Returns `Ok(false)`
    /// without registering when such a kind is requested while other movers
    /// are already active but no snapshot exists: capturing a mid-transform
    /// pose would corrupt later resets, so the caller must retry once the
    /// dependent state is ready. An empty request also returns `Ok(false)`.
    pub fn register_move(&mut self, kinds: MoveKinds) -> Result<bool, MeshError> {
        if kinds.is_empty() {
            return Ok(false);
        }
        if kinds.needs_rollback() && !self.storage.has_orig() {
            if self.registry.is_moving() {
                return Ok(false);
            }
            self.storage.capture_orig()?;
        }
        self.registry.register(kinds);
        Ok(true)
    }

    /// Withdraws a registration made with matching kinds.
    ///
    /// When the aggregate mover count reaches zero the mesh is reset to the
    /// original configuration (if one is tracked) and the snapshot is
    /// released, so an undriven mesh is always at its last reset pose.
    /// Unregistering a kind with zero count is a usage error and leaves the
    /// ledger untouched. An empty request is a no-op, matching the empty
    /// register that never registered anything.
    pub fn unregister_move(&mut self, kinds: MoveKinds) -> Result<(), MeshError> {
        if kinds.is_empty() {
            return Ok(());
        }
        let reached_zero =
            self.registry
                .unregister(kinds)
                .map_err(|kind| MeshError::UnbalancedUnregister {
                    mesh_id: self.id_str().to_owned(),
                    kind,
                })?;
        if reached_zero && self.storage.has_orig() {
            self.reset_nodes_to_orig();
            self.storage.release_orig();
        }
        Ok(())
    }

    /// True while any mover is registered.
    pub fn is_moving(&self) -> bool {
        self.registry.is_moving()
    }

    /// Grants element-level transform access to a registered mover.
    ///
    /// Returns `None` while no mover is registered: the element-level
    /// primitives are privileged and never part of the at-rest public
    /// surface.
    pub fn mover_access(&mut self) -> Option<MoverAccess<'_, N>> {
        if self.registry.is_moving() {
            Some(MoverAccess { mesh: self })
        } else {
            None
        }
    }

    /// True while any scaling mover is registered.
    pub fn is_scaling(&self) -> bool {
        self.registry.is_scaling()
    }

    /// True while any translating mover is registered.
    pub fn is_translating(&self) -> bool {
        self.registry.is_translating()
    }

    /// True while any rotating mover is registered.
    pub fn is_rotating(&self) -> bool {
        self.registry.is_rotating()
    }

    // ------------------------------------------------------------------
    // Bounding volume tracker
    // ------------------------------------------------------------------

    /// Recomputes the global bounding box from scratch.
    ///
    /// Folds all current per-element boxes (so the box shrinks again after
    /// elements move back), then unions with every other process's box via
    /// the domain collaborator. This is a synchronizing call in distributed
    /// deployments.
    pub fn update_global_bounding_box(&mut self) {
        let mut local = BoundingBox::empty();
        for elem_box in &self.elem_boxes {
            local.extend_box(elem_box);
        }
        self.bbox = self.domain.reduce_box_union(local);
    }

    /// Returns the global bounding box as of the last update.
    pub fn global_bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Returns element `n`'s axis-aligned box.
    pub fn element_bounding_box(&self, n: usize) -> BoundingBox {
        self.elem_boxes[n]
    }

    /// Returns element `n`'s box clipped to this process's owned region.
    pub fn element_bounding_box_on_subdomain(&self, n: usize) -> BoundingBox {
        self.elem_boxes[n].intersection(&self.domain.subdomain())
    }

    /// Recomputes one element's box from its current nodes.
    pub(crate) fn refresh_element_box(&mut self, index: usize) {
        self.elem_boxes[index] = BoundingBox::from_points(self.storage.nodes(index));
    }

    /// Recomputes every element's box from current nodes.
    pub(crate) fn refresh_all_boxes(&mut self) {
        for i in 0..self.elem_boxes.len() {
            self.refresh_element_box(i);
        }
    }

    // ------------------------------------------------------------------
    // Timestep bookkeeping and randomness
    // ------------------------------------------------------------------

    /// Advances the mesh's notion of the current simulation step.
    pub fn advance_to(&mut self, step: u64) {
        self.step = step;
    }

    /// Step at which nodes were last reset to the original configuration.
    pub fn step_last_reset(&self) -> Option<u64> {
        self.step_last_reset
    }

    /// The mesh-owned seeded generator, for collaborator movers (e.g. to
    /// jitter freshly inserted elements). This core never draws from it.
    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.random
    }
}

impl<const N: usize> Default for SurfaceMesh<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Narrow capability handed to registered movers.
///
/// Exposes the element-level transform primitives without making them part
/// of the mesh's public surface; obtained via
/// [`SurfaceMesh::mover_access`] and only while a move registration is
/// active.
pub struct MoverAccess<'a, const N: usize> {
    mesh: &'a mut SurfaceMesh<N>,
}

impl<const N: usize> MoverAccess<'_, N> {
    /// Shifts a single element by an incremental displacement, updating its
    /// centroid and bounding box.
    pub fn move_element(&mut self, index: usize, incremental: DVec3) {
        self.mesh.move_element(index, incremental);
    }

    /// The mesh-owned seeded generator, e.g. to jitter moved elements.
    pub fn rng(&mut self) -> &mut StdRng {
        self.mesh.rng()
    }
}

/// Combined relative-and-absolute tolerance test for one coordinate.
fn coords_equal(a: f64, b: f64) -> bool {
    let diff = (a - b).abs();
    diff <= NODE_EQUAL_ABS_TOL || diff <= NODE_EQUAL_REL_TOL * a.abs().max(b.abs())
}
