//! Axis-aligned integer regions and parent alignment.
//!
//! A [`Region`] is a box of cells `[origin, origin + extent)` in the cell
//! units of one level. Each cell of the next coarser level covers exactly two
//! cells of this level along every axis, so a region maps onto whole parent
//! cells exactly when both its origin and its extent are even.

use crate::geometry::IVec3;
use crate::grid_error::GridError;
use serde::{Deserialize, Serialize};

/// Half-open cell box `[origin, origin + extent)` in a level's own units.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub origin: IVec3,
    pub extent: IVec3,
}

impl Region {
    #[inline]
    pub fn new(origin: impl Into<IVec3>, extent: impl Into<IVec3>) -> Self {
        Self {
            origin: origin.into(),
            extent: extent.into(),
        }
    }

    /// Upper (exclusive) corner.
    #[inline]
    pub fn end(self) -> IVec3 {
        self.origin + self.extent
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(self, other: Region) -> bool {
        self.origin.all_le(other.origin) && self.end().all_ge(other.end())
    }

    /// Whether origin and extent are both even on every axis.
    #[inline]
    pub fn is_aligned(self) -> bool {
        self.origin.is_even() && self.extent.is_even()
    }

    /// Check the geometric preconditions a level at `level` places on a region.
    pub fn validate(self, level: u32) -> Result<(), GridError> {
        if !self.extent.all(|c| c > 0) {
            return Err(GridError::NonPositiveExtent {
                level,
                extent: self.extent,
            });
        }
        if !self.origin.all(|c| c >= 0) {
            return Err(GridError::NegativeOrigin {
                level,
                origin: self.origin,
            });
        }
        Ok(())
    }

    /// Grow the region to the smallest even-aligned box that contains it.
    ///
    /// The lower corner moves down to the nearest even coordinate and the
    /// upper corner moves up to the nearest even coordinate, so each side
    /// grows by at most one cell. The upper corner is taken from the
    /// original region, so shifting an odd origin never drops cells on the
    /// high side. Aligned regions are returned unchanged.
    ///
    /// # Errors
    /// `AlignmentInvariant` if the result is not even; this cannot happen
    /// for valid input and signals a logic defect.
    pub fn aligned(self, level: u32) -> Result<Region, GridError> {
        let origin = self.origin - self.origin % 2;
        let right = self.end();
        let right = right + right % 2;
        let extent = right - origin;

        if !(origin.is_even() && extent.is_even()) {
            return Err(GridError::AlignmentInvariant {
                level,
                origin,
                extent,
            });
        }
        let out = Region { origin, extent };
        debug_assert!(out.contains(self), "alignment must not shrink {self:?}");
        Ok(out)
    }

    /// The next coarser working region: halve, then pad by `pad` cells on
    /// every side (in coarse cells).
    ///
    /// Padding is applied to the unaligned region; the coarser level aligns
    /// its own copy when it is built.
    pub fn coarsened(self, pad: i64) -> Region {
        Region {
            origin: self.origin / 2 - pad,
            extent: self.extent / 2 + 2 * pad,
        }
    }
}
