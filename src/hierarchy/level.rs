//! LevelGrid: one aligned level of a zoom hierarchy.
//!
//! A level is built from a requested working region. Construction validates
//! the region, aligns it to the parent's cells and allocates a zero-filled
//! field buffer of the aligned extent, all in one step. Geometry is
//! read-only afterwards; only the field payload and the attached cosmology
//! can change.

use crate::data::{Cosmology, Field3};
use crate::debug_invariants::DebugInvariants;
use crate::geometry::{IVec3, Region};
use crate::grid_error::GridError;

/// One level of a nested grid hierarchy.
///
/// # Invariants
///
/// - `level > 0`.
/// - `extent` is positive and even on every axis.
/// - `origin` and `offset` are non-negative; `origin` is even.
/// - The aligned region contains the requested region.
/// - The field buffer has shape `extent`.
#[derive(Clone, Debug)]
pub struct LevelGrid {
    level: u32,
    requested: Region,
    region: Region,
    offset: IVec3,
    field: Field3,
    cosmology: Option<Cosmology>,
}

impl LevelGrid {
    /// Build a level from a requested region, with a zero parent offset.
    ///
    /// # Errors
    /// `InvalidLevel` for level 0, `NonPositiveExtent` / `NegativeOrigin`
    /// for bad geometry, `AlignmentInvariant` if alignment misbehaves.
    pub fn new(level: u32, requested: Region) -> Result<Self, GridError> {
        Self::with_offset(level, requested, IVec3::ZERO)
    }

    /// Build a level with an explicit offset relative to its parent, in
    /// parent cells.
    pub fn with_offset(level: u32, requested: Region, offset: IVec3) -> Result<Self, GridError> {
        if level == 0 {
            return Err(GridError::InvalidLevel(level));
        }
        requested.validate(level)?;
        if !offset.all(|c| c >= 0) {
            return Err(GridError::NegativeOffset { level, offset });
        }
        let region = requested.aligned(level)?;
        let field = Field3::for_extent(region.extent, level)?;
        log::debug!(
            "level {level}: requested origin={} extent={} -> aligned origin={} extent={}",
            requested.origin,
            requested.extent,
            region.origin,
            region.extent
        );
        let grid = Self {
            level,
            requested,
            region,
            offset,
            field,
            cosmology: None,
        };
        crate::debug_invariants!(grid.validate_invariants(), "LevelGrid::with_offset");
        Ok(grid)
    }

    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Aligned lower corner, in this level's cells.
    #[inline]
    pub fn origin(&self) -> IVec3 {
        self.region.origin
    }

    /// Aligned number of cells per axis.
    #[inline]
    pub fn extent(&self) -> IVec3 {
        self.region.extent
    }

    /// Aligned region.
    #[inline]
    pub fn region(&self) -> Region {
        self.region
    }

    /// The region this level was asked to cover, before alignment.
    #[inline]
    pub fn requested(&self) -> Region {
        self.requested
    }

    /// Origin relative to the parent level's origin, in parent cells.
    #[inline]
    pub fn offset(&self) -> IVec3 {
        self.offset
    }

    #[inline]
    pub fn field(&self) -> &Field3 {
        &self.field
    }

    /// Mutable access for callers populating the payload.
    #[inline]
    pub fn field_mut(&mut self) -> &mut Field3 {
        &mut self.field
    }

    /// Replace the payload with a buffer of the same shape.
    pub fn set_field(&mut self, field: Field3) -> Result<(), GridError> {
        let expected = self.region.extent;
        if expected.to_shape() != Some(field.shape()) {
            return Err(GridError::FieldShapeMismatch {
                expected,
                found: field.shape(),
            });
        }
        self.field = field;
        Ok(())
    }

    #[inline]
    pub fn cosmology(&self) -> Option<&Cosmology> {
        self.cosmology.as_ref()
    }

    pub fn set_cosmology(&mut self, cosmology: Cosmology) {
        self.cosmology = Some(cosmology);
    }

    /// Cosmology, or `MissingCosmology` if none was attached.
    pub fn require_cosmology(&self) -> Result<&Cosmology, GridError> {
        self.cosmology
            .as_ref()
            .ok_or(GridError::MissingCosmology(self.level))
    }

    /// Same level and geometry, new parent offset. The payload and
    /// cosmology are carried over.
    pub(crate) fn into_with_offset(self, offset: IVec3) -> Result<Self, GridError> {
        if !offset.all(|c| c >= 0) {
            return Err(GridError::NegativeOffset {
                level: self.level,
                offset,
            });
        }
        Ok(Self { offset, ..self })
    }
}

impl DebugInvariants for LevelGrid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "LevelGrid");
    }

    fn validate_invariants(&self) -> Result<(), GridError> {
        if self.level == 0 {
            return Err(GridError::InvalidLevel(self.level));
        }
        self.region.validate(self.level)?;
        if !self.region.is_aligned() {
            return Err(GridError::AlignmentInvariant {
                level: self.level,
                origin: self.region.origin,
                extent: self.region.extent,
            });
        }
        if !self.offset.all(|c| c >= 0) {
            return Err(GridError::NegativeOffset {
                level: self.level,
                offset: self.offset,
            });
        }
        if self.region.extent.to_shape() != Some(self.field.shape()) {
            return Err(GridError::FieldShapeMismatch {
                expected: self.region.extent,
                found: self.field.shape(),
            });
        }
        Ok(())
    }
}
