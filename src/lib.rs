#![cfg_attr(docsrs, feature(doc_cfg))]
//! # grafic-zoom
//!
//! grafic-zoom builds the nested grid hierarchy used as initial conditions
//! for cosmological zoom-in simulations, and writes per-level fields in the
//! grafic record format.
//!
//! ## Features
//! - Integer geometry ([`geometry::IVec3`], [`geometry::Region`]) with
//!   parent alignment: every level's origin and extent are even, so each
//!   level lands exactly on whole cells of its parent.
//! - [`GridHierarchy`](hierarchy::GridHierarchy): levels from `level_min`
//!   (the full box, `2^level_min` cells per axis) up to the zoom region at
//!   `level_max`, padded by ghost cells on every coarser level and carrying
//!   parent-relative offsets.
//! - Zero-initialized `f32` field buffers per level, filled in place by the
//!   caller, and per-level cosmology metadata.
//! - Grafic writer and reader ([`io::grafic`]).
//!
//! ## Determinism
//!
//! Construction is a pure function of [`HierarchyConfig`](hierarchy::HierarchyConfig):
//! the same parameters always produce the same levels, and either every level
//! is built or an error is returned.
//!
//! ## Usage
//! ```rust
//! # fn try_main() -> Result<(), grafic_zoom::grid_error::GridError> {
//! use grafic_zoom::prelude::*;
//!
//! let cfg = HierarchyConfig::new(5, 7, [48, 48, 48], [8, 8, 8]).with_pad(4);
//! let mut h = GridHierarchy::build(&cfg)?;
//! for grid in h.iter_mut() {
//!     grid.field_mut().fill(1.0);
//! }
//! assert_eq!(h.finest().offset(), IVec3::splat(4));
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod grid_error;
pub mod hierarchy;
pub mod io;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::data::{Cosmology, Field3};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::{IVec3, Region};
    pub use crate::grid_error::GridError;
    pub use crate::hierarchy::{DEFAULT_PAD, GridHierarchy, HierarchyConfig, LevelGrid};
    pub use crate::io::{
        GraficOutput, GraficReader, GraficWriter, LevelFieldReader, LevelFieldWriter,
        STANDARD_FIELDS, read_grafic,
    };
}
