//! Field3: a dense, zero-initialized 3-D `f32` buffer attached to one level.
//!
//! Values are stored in C order for a `(nx, ny, nz)` shape: `k` varies
//! fastest and `i` slowest, so `idx(i, j, k) = (i * ny + j) * nz + k`.
//! The crate never computes field contents; callers fill the buffer in place
//! (a refinement mask, an overdensity, a displacement component, ...).

use crate::geometry::IVec3;
use crate::grid_error::GridError;
use itertools::iproduct;
use std::ops::{Index, IndexMut};

/// Dense scalar field over a level's cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Field3 {
    shape: [usize; 3],
    data: Vec<f32>,
}

impl Field3 {
    /// Zero-filled buffer of the given shape.
    ///
    /// # Errors
    /// `ExtentTooLarge` if the cell count overflows `usize` or the buffer
    /// cannot be allocated.
    pub fn zeros(shape: [usize; 3]) -> Result<Self, GridError> {
        let len = cell_count(shape).ok_or_else(|| too_large(shape))?;
        let mut data = Vec::new();
        data.try_reserve_exact(len).map_err(|_| too_large(shape))?;
        data.resize(len, 0.0);
        Ok(Self { shape, data })
    }

    /// Zero-filled buffer sized to an extent.
    ///
    /// # Errors
    /// `NonPositiveExtent` if any component is `<= 0`; `level` is only used
    /// for the error report. `ExtentTooLarge` as for [`zeros`](Self::zeros).
    pub fn for_extent(extent: IVec3, level: u32) -> Result<Self, GridError> {
        match extent.to_shape() {
            Some(shape) if shape.iter().all(|&n| n > 0) => Self::zeros(shape),
            _ => Err(GridError::NonPositiveExtent { level, extent }),
        }
    }

    /// Wrap an existing C-ordered buffer.
    pub fn from_vec(shape: [usize; 3], data: Vec<f32>) -> Result<Self, GridError> {
        let expected = cell_count(shape).ok_or_else(|| too_large(shape))?;
        if data.len() != expected {
            return Err(GridError::RecordLength {
                record: 0,
                expected,
                found: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    #[inline]
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of cell `(i, j, k)`.
    #[inline]
    pub fn idx(&self, i: usize, j: usize, k: usize) -> usize {
        let [nx, ny, nz] = self.shape;
        debug_assert!(i < nx && j < ny && k < nz);
        (i * ny + j) * nz + k
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<f32> {
        let [nx, ny, nz] = self.shape;
        (i < nx && j < ny && k < nz).then(|| self.data[self.idx(i, j, k)])
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Set each cell from a function of its `(i, j, k)` index.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize, usize, usize) -> f32) {
        let [nx, ny, nz] = self.shape;
        for (i, j, k) in iproduct!(0..nx, 0..ny, 0..nz) {
            let at = self.idx(i, j, k);
            self.data[at] = f(i, j, k);
        }
    }

    /// The `k`-th `(nx, ny)` plane, transposed: `nx * ny` values with `i`
    /// varying fastest.
    pub fn plane_transposed(&self, k: usize) -> Vec<f32> {
        let [nx, ny, _] = self.shape;
        let mut out = Vec::with_capacity(nx * ny);
        for (j, i) in iproduct!(0..ny, 0..nx) {
            out.push(self.data[self.idx(i, j, k)]);
        }
        out
    }

    /// Inverse of [`plane_transposed`](Self::plane_transposed).
    pub fn set_plane_transposed(&mut self, k: usize, plane: &[f32]) -> Result<(), GridError> {
        let [nx, ny, _] = self.shape;
        if plane.len() != nx * ny {
            return Err(GridError::RecordLength {
                record: k + 1,
                expected: nx * ny,
                found: plane.len(),
            });
        }
        for (j, i) in iproduct!(0..ny, 0..nx) {
            let at = self.idx(i, j, k);
            self.data[at] = plane[j * nx + i];
        }
        Ok(())
    }
}

/// `nx * ny * nz`, or `None` on overflow.
pub fn cell_count([nx, ny, nz]: [usize; 3]) -> Option<usize> {
    nx.checked_mul(ny)?.checked_mul(nz)
}

fn too_large(shape: [usize; 3]) -> GridError {
    GridError::ExtentTooLarge(IVec3(shape.map(|n| i64::try_from(n).unwrap_or(i64::MAX))))
}

impl Index<(usize, usize, usize)> for Field3 {
    type Output = f32;

    #[inline]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &f32 {
        &self.data[self.idx(i, j, k)]
    }
}

impl IndexMut<(usize, usize, usize)> for Field3 {
    #[inline]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut f32 {
        let at = self.idx(i, j, k);
        &mut self.data[at]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_shape_and_is_zero() {
        let f = Field3::for_extent(IVec3::new(4, 2, 6), 3).unwrap();
        assert_eq!(f.shape(), [4, 2, 6]);
        assert_eq!(f.len(), 48);
        assert!(f.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn for_extent_rejects_empty_axis() {
        let err = Field3::for_extent(IVec3::new(4, 0, 6), 3).unwrap_err();
        assert!(matches!(err, GridError::NonPositiveExtent { level: 3, .. }));
    }

    #[test]
    fn indexing_is_c_ordered() {
        let f = Field3::zeros([2, 3, 4]).unwrap();
        assert_eq!(f.idx(0, 0, 1), 1);
        assert_eq!(f.idx(0, 1, 0), 4);
        assert_eq!(f.idx(1, 0, 0), 12);
        assert_eq!(f.idx(1, 2, 3), 23);
        assert_eq!(f.get(2, 0, 0), None);
    }

    #[test]
    fn transposed_plane_runs_i_fastest() {
        let mut f = Field3::zeros([2, 3, 2]).unwrap();
        f.fill_with(|i, j, k| (100 * k + 10 * j + i) as f32);
        assert_eq!(
            f.plane_transposed(1),
            vec![100.0, 101.0, 110.0, 111.0, 120.0, 121.0]
        );

        let mut g = Field3::zeros([2, 3, 2]).unwrap();
        for k in 0..2 {
            g.set_plane_transposed(k, &f.plane_transposed(k)).unwrap();
        }
        assert_eq!(g, f);
    }

    #[test]
    fn overflowing_shape_is_rejected() {
        let err = Field3::zeros([usize::MAX, 2, 1]).unwrap_err();
        assert!(matches!(err, GridError::ExtentTooLarge(_)));
        let err = Field3::from_vec([usize::MAX / 2, 4, 1], Vec::new()).unwrap_err();
        assert!(matches!(err, GridError::ExtentTooLarge(_)));
        let err = Field3::for_extent(IVec3::splat(1 << 22), 22).unwrap_err();
        assert!(matches!(err, GridError::ExtentTooLarge(_)));
        assert_eq!(cell_count([2, 3, 4]), Some(24));
        assert_eq!(cell_count([usize::MAX, 1, 2]), None);
    }

    #[test]
    fn from_vec_checks_length() {
        let f = Field3::from_vec([1, 2, 2], vec![0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(f[(0, 1, 0)], 2.0);
        let err = Field3::from_vec([1, 2, 2], vec![0.0; 3]).unwrap_err();
        assert!(matches!(err, GridError::RecordLength { expected: 4, found: 3, .. }));
    }

    #[test]
    fn index_mut_writes_in_place() {
        let mut f = Field3::zeros([2, 2, 2]).unwrap();
        f[(1, 0, 1)] = 3.5;
        assert_eq!(f[(1, 0, 1)], 3.5);
        assert_eq!(f.as_slice().iter().filter(|&&v| v != 0.0).count(), 1);
    }
}
