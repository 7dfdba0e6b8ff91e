//! GridHierarchy: the ordered stack of nested levels.
//!
//! Construction runs two sweeps:
//!
//! 1. **Coarsening** (fine → coarse). Starting from the finest region, each
//!    level from `level_max` down to `level_min + 1` is built from the
//!    current working region, which is then halved and padded by `pad`
//!    cells per side to give the next coarser working region. The base level
//!    is not derived this way: it always spans the full box,
//!    `2^level_min` cells per axis from the origin.
//! 2. **Offsets** (coarse → fine). Once every origin is aligned, each level's
//!    offset is its origin in parent cells minus the parent's origin.
//!
//! Nothing is returned until both sweeps succeed, so callers never see a
//! partially built hierarchy.

use crate::data::Cosmology;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::{IVec3, Region};
use crate::grid_error::GridError;
use crate::hierarchy::config::HierarchyConfig;
use crate::hierarchy::level::LevelGrid;
use std::iter::Rev;
use std::ops::Range;

/// Nested grid levels from `level_min` (index 0) to `level_max`.
#[derive(Clone, Debug)]
pub struct GridHierarchy {
    level_min: u32,
    level_max: u32,
    pad: u32,
    levels: Vec<LevelGrid>,
}

impl GridHierarchy {
    /// Build a hierarchy from its configuration.
    ///
    /// # Errors
    /// Any precondition violation from [`HierarchyConfig::validate`], and
    /// geometry errors raised by the level whose derived region is invalid
    /// (for example a padded origin that falls below zero).
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), grafic_zoom::grid_error::GridError> {
    /// use grafic_zoom::prelude::*;
    /// let cfg = HierarchyConfig::new(5, 7, [48, 48, 48], [8, 8, 8]);
    /// let h = GridHierarchy::build(&cfg)?;
    /// assert_eq!(h.len(), 3);
    /// assert_eq!(h.base().extent(), IVec3::splat(32));
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(config: &HierarchyConfig) -> Result<Self, GridError> {
        config.validate()?;
        let levels = coarsening_sweep(config)?;
        let levels = offset_sweep(levels)?;

        let hierarchy = Self {
            level_min: config.level_min,
            level_max: config.level_max,
            pad: config.pad,
            levels,
        };
        crate::debug_invariants!(hierarchy.validate_invariants(), "GridHierarchy::build");
        log::debug!(
            "built hierarchy with {} levels ({}..={}), pad={}",
            hierarchy.len(),
            hierarchy.level_min,
            hierarchy.level_max,
            hierarchy.pad
        );
        Ok(hierarchy)
    }

    #[inline]
    pub fn level_min(&self) -> u32 {
        self.level_min
    }

    #[inline]
    pub fn level_max(&self) -> u32 {
        self.level_max
    }

    #[inline]
    pub fn pad(&self) -> u32 {
        self.pad
    }

    /// Number of levels, `level_max - level_min + 1`.
    #[inline]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false for a built hierarchy.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Levels ordered coarsest first.
    #[inline]
    pub fn levels(&self) -> &[LevelGrid] {
        &self.levels
    }

    /// Forward sweep over level indices, coarsest first.
    #[inline]
    pub fn level_indices(&self) -> Range<usize> {
        0..self.levels.len()
    }

    /// Reverse sweep over level indices, finest first.
    #[inline]
    pub fn level_indices_rev(&self) -> Rev<Range<usize>> {
        self.level_indices().rev()
    }

    /// Levels coarsest first.
    pub fn iter(&self) -> std::slice::Iter<'_, LevelGrid> {
        self.levels.iter()
    }

    /// Levels finest first.
    pub fn iter_rev(&self) -> Rev<std::slice::Iter<'_, LevelGrid>> {
        self.levels.iter().rev()
    }

    /// Mutable levels, coarsest first, for filling fields and metadata.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, LevelGrid> {
        self.levels.iter_mut()
    }

    /// Parallel mutable access to the independent per-level buffers.
    #[cfg(feature = "rayon")]
    pub fn par_levels_mut(&mut self) -> rayon::slice::IterMut<'_, LevelGrid> {
        use rayon::iter::IntoParallelRefMutIterator;
        self.levels.par_iter_mut()
    }

    /// Level at position `index` (0 is the base level).
    #[inline]
    pub fn get(&self, index: usize) -> Option<&LevelGrid> {
        self.levels.get(index)
    }

    /// Level with absolute level number `level`.
    pub fn level(&self, level: u32) -> Option<&LevelGrid> {
        self.index_of(level).map(|i| &self.levels[i])
    }

    /// Mutable level with absolute level number `level`.
    pub fn level_mut(&mut self, level: u32) -> Option<&mut LevelGrid> {
        self.index_of(level).map(move |i| &mut self.levels[i])
    }

    /// Position of absolute level `level` in [`levels`](Self::levels).
    pub fn index_of(&self, level: u32) -> Option<usize> {
        (self.level_min..=self.level_max)
            .contains(&level)
            .then(|| (level - self.level_min) as usize)
    }

    /// The coarsest level, spanning the whole box.
    pub fn base(&self) -> &LevelGrid {
        &self.levels[0]
    }

    /// The zoom level.
    pub fn finest(&self) -> &LevelGrid {
        &self.levels[self.levels.len() - 1]
    }

    /// Attach cosmology to every level, computed from its level number.
    pub fn attach_cosmology(&mut self, mut cosmology: impl FnMut(u32) -> Cosmology) {
        for grid in &mut self.levels {
            let c = cosmology(grid.level());
            grid.set_cosmology(c);
        }
    }

    /// Attach cosmology to one level.
    pub fn set_cosmology(&mut self, level: u32, cosmology: Cosmology) -> Result<(), GridError> {
        self.level_mut(level)
            .ok_or(GridError::UnknownLevel(level))?
            .set_cosmology(cosmology);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a GridHierarchy {
    type Item = &'a LevelGrid;
    type IntoIter = std::slice::Iter<'a, LevelGrid>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

/// Fine → coarse pass. Returns levels ordered coarsest first, all with zero
/// offsets.
fn coarsening_sweep(config: &HierarchyConfig) -> Result<Vec<LevelGrid>, GridError> {
    let pad = i64::from(config.pad);
    let mut levels = Vec::with_capacity(config.num_levels());
    let mut working = Region::new(config.origin, config.extent);

    for level in (config.level_min + 1..=config.level_max).rev() {
        levels.push(LevelGrid::new(level, working)?);
        working = working.coarsened(pad);
    }
    if config.level_min == config.level_max {
        log::warn!(
            "level_min == level_max == {}: the requested zoom region is ignored, only the base level is built",
            config.level_min
        );
    }

    let side = 1i64 << config.level_min;
    levels.push(LevelGrid::new(
        config.level_min,
        Region::new(IVec3::ZERO, IVec3::splat(side)),
    )?);

    levels.reverse();
    Ok(levels)
}

/// Coarse → fine pass filling in parent-relative offsets.
fn offset_sweep(levels: Vec<LevelGrid>) -> Result<Vec<LevelGrid>, GridError> {
    let mut out: Vec<LevelGrid> = Vec::with_capacity(levels.len());
    for grid in levels {
        let offset = match out.last() {
            None => IVec3::ZERO,
            Some(parent) => relative_offset(&grid, parent),
        };
        out.push(grid.into_with_offset(offset)?);
    }
    Ok(out)
}

/// `child` origin in parent cells, relative to the parent's origin.
#[inline]
fn relative_offset(child: &LevelGrid, parent: &LevelGrid) -> IVec3 {
    child.origin() / 2 - parent.origin()
}

impl DebugInvariants for GridHierarchy {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "GridHierarchy");
    }

    fn validate_invariants(&self) -> Result<(), GridError> {
        let expected_len = (self.level_max - self.level_min + 1) as usize;
        if self.levels.len() != expected_len {
            return Err(GridError::Invariant(format!(
                "{} levels stored, expected {expected_len}",
                self.levels.len()
            )));
        }
        for (i, grid) in self.levels.iter().enumerate() {
            grid.validate_invariants()?;
            let level = self.level_min + i as u32;
            if grid.level() != level {
                return Err(GridError::Invariant(format!(
                    "level {} stored at index {i}, expected {level}",
                    grid.level()
                )));
            }
            let expected_offset = match i {
                0 => IVec3::ZERO,
                _ => relative_offset(grid, &self.levels[i - 1]),
            };
            if grid.offset() != expected_offset {
                return Err(GridError::Invariant(format!(
                    "level {level} offset {} differs from {expected_offset}",
                    grid.offset()
                )));
            }
        }
        let base = self.base();
        let side = 1i64 << self.level_min;
        if base.origin() != IVec3::ZERO || base.extent() != IVec3::splat(side) {
            return Err(GridError::Invariant(format!(
                "base level spans origin={} extent={}, expected the full {side}^3 box",
                base.origin(),
                base.extent()
            )));
        }
        Ok(())
    }
}
