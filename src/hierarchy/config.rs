//! Construction parameters for a [`GridHierarchy`](super::GridHierarchy).

use crate::geometry::IVec3;
use crate::grid_error::GridError;
use serde::{Deserialize, Serialize};

/// Default ghost-cell padding per side, in the coarser level's cells.
pub const DEFAULT_PAD: u32 = 4;

/// Deepest level whose full-box extent `2^level` fits in an `i64`.
pub const MAX_LEVEL: u32 = 62;

fn default_pad() -> u32 {
    DEFAULT_PAD
}

/// Everything needed to build a hierarchy.
///
/// `origin` and `extent` describe the finest level (`level_max`) in its own
/// cell units. `pad` widens every coarser working region by that many
/// cells on each side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyConfig {
    pub level_min: u32,
    pub level_max: u32,
    pub origin: IVec3,
    pub extent: IVec3,
    #[serde(default = "default_pad")]
    pub pad: u32,
}

impl HierarchyConfig {
    /// Parameters with the default padding.
    pub fn new(
        level_min: u32,
        level_max: u32,
        origin: impl Into<IVec3>,
        extent: impl Into<IVec3>,
    ) -> Self {
        Self {
            level_min,
            level_max,
            origin: origin.into(),
            extent: extent.into(),
            pad: DEFAULT_PAD,
        }
    }

    /// Override the per-side padding.
    pub fn with_pad(mut self, pad: u32) -> Self {
        self.pad = pad;
        self
    }

    /// Number of levels the hierarchy will hold.
    pub fn num_levels(&self) -> usize {
        (self.level_max.saturating_sub(self.level_min) + 1) as usize
    }

    /// Check the level range and the finest region.
    ///
    /// # Errors
    /// `InvalidLevelRange`, `InvalidLevel` (for `level_min == 0`),
    /// `LevelTooDeep` (for `level_max` past [`MAX_LEVEL`] or a base box
    /// whose cell count overflows), `NonPositiveExtent` or `NegativeOrigin`.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.level_min > self.level_max {
            return Err(GridError::InvalidLevelRange {
                level_min: self.level_min,
                level_max: self.level_max,
            });
        }
        if self.level_min == 0 {
            return Err(GridError::InvalidLevel(self.level_min));
        }
        if self.level_max > MAX_LEVEL {
            return Err(GridError::LevelTooDeep(self.level_max));
        }
        // the base box holds 2^(3 * level_min) cells
        if IVec3::splat(1 << self.level_min).checked_product().is_none() {
            return Err(GridError::LevelTooDeep(self.level_min));
        }
        if !self.extent.all(|c| c > 0) {
            return Err(GridError::NonPositiveExtent {
                level: self.level_max,
                extent: self.extent,
            });
        }
        if !self.origin.all(|c| c >= 0) {
            return Err(GridError::NegativeOrigin {
                level: self.level_max,
                origin: self.origin,
            });
        }
        Ok(())
    }
}
