//! Invariant checks for levels and hierarchies.
//!
//! A [`LevelGrid`](crate::hierarchy::LevelGrid) must keep an even, positive
//! extent, an even non-negative origin, a non-negative parent offset, a
//! field buffer shaped like its extent, and an aligned region that contains
//! the requested one. A [`GridHierarchy`](crate::hierarchy::GridHierarchy)
//! additionally keeps its levels contiguous and ascending, its base box at
//! the origin with side `2^level_min`, and every offset equal to
//! `origin / 2 - parent.origin`.
//!
//! Constructors run these checks through [`debug_invariants!`] in debug
//! builds, or in release builds with the `check-invariants` feature.

use crate::grid_error::GridError;

/// Structural self-checks on grid types.
pub trait DebugInvariants {
    /// Panic on the first broken invariant when checking is enabled.
    fn debug_assert_invariants(&self);
    /// Check every invariant; the error names the first one broken.
    fn validate_invariants(&self) -> Result<(), GridError>;
}

/// Run a fallible check and panic with `ctx` on error, only in debug builds
/// or with the `check-invariants` feature.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
