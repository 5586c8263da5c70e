//! # Move Registration Ledger
//!
//! Reference counts tracking how many independent movers are currently
//! driving the mesh, per transform kind plus an aggregate. Counts are only
//! mutated through invariant-checked register/unregister; decrementing a
//! counter that is already zero is a usage error surfaced to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A move registration request: which transform kinds a mover will apply.
///
/// # Example
///
/// ```rust
/// use surface_mesh::registry::MoveKinds;
///
/// let kinds = MoveKinds::TRANSLATE.with_rotate();
/// assert!(kinds.translate && kinds.rotate && !kinds.scale);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveKinds {
    /// Mover will apply uniform scaling.
    pub scale: bool,
    /// Mover will apply translations.
    pub translate: bool,
    /// Mover will apply rotations.
    pub rotate: bool,
}

impl MoveKinds {
    /// Scale-only request.
    pub const SCALE: Self = Self {
        scale: true,
        translate: false,
        rotate: false,
    };

    /// Translate-only request.
    pub const TRANSLATE: Self = Self {
        scale: false,
        translate: true,
        rotate: false,
    };

    /// Rotate-only request.
    pub const ROTATE: Self = Self {
        scale: false,
        translate: false,
        rotate: true,
    };

    /// Adds scaling to the request.
    pub const fn with_scale(mut self) -> Self {
        self.scale = true;
        self
    }

    /// Adds translation to the request.
    pub const fn with_translate(mut self) -> Self {
        self.translate = true;
        self
    }

    /// Adds rotation to the request.
    pub const fn with_rotate(mut self) -> Self {
        self.rotate = true;
        self
    }

    /// Returns true if no kind is requested.
    pub const fn is_empty(&self) -> bool {
        !self.scale && !self.translate && !self.rotate
    }

    /// Returns true if the request contains a kind that must be undone by
    /// reset-to-original (translation or rotation anchored to a snapshot).
    pub const fn needs_rollback(&self) -> bool {
        self.translate || self.rotate
    }
}

/// One move kind, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The aggregate mover count.
    Aggregate,
    /// Uniform scaling.
    Scale,
    /// Translation.
    Translate,
    /// Rotation.
    Rotate,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Aggregate => "aggregate",
            MoveKind::Scale => "scale",
            MoveKind::Translate => "translate",
            MoveKind::Rotate => "rotate",
        };
        f.write_str(name)
    }
}

/// Per-kind registration counters plus the aggregate mover count.
///
/// The aggregate counts register calls, not kinds: one mover registering both
/// translate and rotate holds a single aggregate slot and one slot in each
/// per-kind counter.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct MoveRegistry {
    n_move: u32,
    n_scale: u32,
    n_translate: u32,
    n_rotate: u32,
}

impl MoveRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records one registration. The request must be non-empty.
    pub(crate) fn register(&mut self, kinds: MoveKinds) {
        debug_assert!(!kinds.is_empty());
        self.n_move += 1;
        if kinds.scale {
            self.n_scale += 1;
        }
        if kinds.translate {
            self.n_translate += 1;
        }
        if kinds.rotate {
            self.n_rotate += 1;
        }
    }

    /// Removes one registration with matching kinds. The request must be
    /// non-empty, as for [`register`](Self::register).
    ///
    /// On success returns true if the aggregate count reached zero. Fails
    /// without mutating any counter when a requested kind (or the aggregate)
    /// is already zero.
    pub(crate) fn unregister(&mut self, kinds: MoveKinds) -> Result<bool, MoveKind> {
        debug_assert!(!kinds.is_empty());
        if self.n_move == 0 {
            return Err(MoveKind::Aggregate);
        }
        if kinds.scale && self.n_scale == 0 {
            return Err(MoveKind::Scale);
        }
        if kinds.translate && self.n_translate == 0 {
            return Err(MoveKind::Translate);
        }
        if kinds.rotate && self.n_rotate == 0 {
            return Err(MoveKind::Rotate);
        }

        self.n_move -= 1;
        if kinds.scale {
            self.n_scale -= 1;
        }
        if kinds.translate {
            self.n_translate -= 1;
        }
        if kinds.rotate {
            self.n_rotate -= 1;
        }
        Ok(self.n_move == 0)
    }

    pub(crate) fn is_moving(&self) -> bool {
        self.n_move > 0
    }

    pub(crate) fn is_scaling(&self) -> bool {
        self.n_scale > 0
    }

    pub(crate) fn is_translating(&self) -> bool {
        self.n_translate > 0
    }

    pub(crate) fn is_rotating(&self) -> bool {
        self.n_rotate > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_registry_is_idle() {
        let reg = MoveRegistry::new();
        assert!(!reg.is_moving());
        assert!(!reg.is_scaling());
        assert!(!reg.is_translating());
        assert!(!reg.is_rotating());
    }

    #[test]
    fn test_register_sets_kind_flags() {
        let mut reg = MoveRegistry::new();
        reg.register(MoveKinds::TRANSLATE.with_rotate());
        assert!(reg.is_moving());
        assert!(reg.is_translating());
        assert!(reg.is_rotating());
        assert!(!reg.is_scaling());
    }

    #[test]
    fn test_unregister_reaches_zero() {
        let mut reg = MoveRegistry::new();
        reg.register(MoveKinds::SCALE);
        reg.register(MoveKinds::TRANSLATE);
        assert_eq!(reg.unregister(MoveKinds::SCALE), Ok(false));
        assert!(reg.is_moving());
        assert_eq!(reg.unregister(MoveKinds::TRANSLATE), Ok(true));
        assert!(!reg.is_moving());
    }

    #[test]
    fn test_unregister_unregistered_kind_is_rejected() {
        let mut reg = MoveRegistry::new();
        reg.register(MoveKinds::TRANSLATE);
        assert_eq!(reg.unregister(MoveKinds::ROTATE), Err(MoveKind::Rotate));
        // Rejection leaves counters untouched
        assert!(reg.is_translating());
        assert_eq!(reg.unregister(MoveKinds::TRANSLATE), Ok(true));
    }

    #[test]
    fn test_unregister_on_idle_registry_is_rejected() {
        let mut reg = MoveRegistry::new();
        assert_eq!(reg.unregister(MoveKinds::SCALE), Err(MoveKind::Aggregate));
    }

    #[test]
    fn test_independent_movers_of_same_kind() {
        // Two independent translators may hold registrations concurrently
        let mut reg = MoveRegistry::new();
        reg.register(MoveKinds::TRANSLATE);
        reg.register(MoveKinds::TRANSLATE);
        assert_eq!(reg.unregister(MoveKinds::TRANSLATE), Ok(false));
        assert!(reg.is_translating());
        assert_eq!(reg.unregister(MoveKinds::TRANSLATE), Ok(true));
        assert!(!reg.is_translating());
    }
}
