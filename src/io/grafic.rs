//! Grafic initial-condition files.
//!
//! One file holds one scalar field of one level:
//!
//! - record 1 (44 bytes): `nx, ny, nz` as `i32`, then `dx`, the level
//!   origin `x/y/z` in physical units (`origin * dx`), `astart`, `omegam`,
//!   `omegav`, `h0` as `f32`;
//! - records 2..=nz+1: plane `k` of the field, transposed, `nx * ny` `f32`
//!   values with `i` varying fastest.
//!
//! Files live at `<root>/level_{level:03}/ic_{field}`. The reader expects
//! exactly `nz` plane records after the header; short input and trailing
//! bytes are both errors.

use crate::data::Field3;
use crate::geometry::IVec3;
use crate::grid_error::GridError;
use crate::hierarchy::{GridHierarchy, LevelGrid};
use crate::io::wire::{self, HEADER_BYTES, WireHeader};
use crate::io::{LevelFieldReader, LevelFieldWriter};
use bytes::{Buf, Bytes, BytesMut};
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::mem::size_of;
use std::path::{Path, PathBuf};

/// Decoded header record.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GraficHeader {
    pub n: [i32; 3],
    pub dx: f32,
    /// Physical position of the level's lower corner.
    pub origin: [f32; 3],
    pub astart: f32,
    pub omegam: f32,
    pub omegav: f32,
    pub h0: f32,
}

impl GraficHeader {
    /// Header for a level; requires attached cosmology.
    pub fn for_level(grid: &LevelGrid) -> Result<Self, GridError> {
        let cosmo = grid.require_cosmology()?;
        let extent = grid.extent();
        let n = extent_to_i32(extent)?;
        let origin = grid.origin().0.map(|c| (c as f64 * cosmo.dx) as f32);
        Ok(Self {
            n,
            dx: cosmo.dx as f32,
            origin,
            astart: cosmo.astart as f32,
            omegam: cosmo.omegam as f32,
            omegav: cosmo.omegav as f32,
            h0: cosmo.h0 as f32,
        })
    }

    /// The eight header reals in file order.
    pub fn reals(&self) -> [f32; 8] {
        [
            self.dx,
            self.origin[0],
            self.origin[1],
            self.origin[2],
            self.astart,
            self.omegam,
            self.omegav,
            self.h0,
        ]
    }

    fn to_wire(self) -> WireHeader {
        WireHeader::new(self.n, self.reals())
    }

    fn from_wire(w: &WireHeader) -> Self {
        let r = w.reals();
        Self {
            n: w.n(),
            dx: r[0],
            origin: [r[1], r[2], r[3]],
            astart: r[4],
            omegam: r[5],
            omegav: r[6],
            h0: r[7],
        }
    }

    /// Field shape, or `None` if any dimension is not positive.
    pub fn shape(&self) -> Option<[usize; 3]> {
        let [nx, ny, nz] = self.n;
        if nx <= 0 || ny <= 0 || nz <= 0 {
            return None;
        }
        Some([nx as usize, ny as usize, nz as usize])
    }
}

fn extent_to_i32(extent: IVec3) -> Result<[i32; 3], GridError> {
    let n = [
        i32::try_from(extent.x()),
        i32::try_from(extent.y()),
        i32::try_from(extent.z()),
    ];
    match n {
        [Ok(nx), Ok(ny), Ok(nz)] => {
            // a plane record's length marker is itself 32 bits
            let plane = (nx as u64) * (ny as u64) * size_of::<f32>() as u64;
            if plane > u32::MAX as u64 {
                return Err(GridError::ExtentTooLarge(extent));
            }
            Ok([nx, ny, nz])
        }
        _ => Err(GridError::ExtentTooLarge(extent)),
    }
}

/// A parsed grafic file.
#[derive(Clone, Debug, PartialEq)]
pub struct GraficFile {
    pub header: GraficHeader,
    pub field: Field3,
}

/// Writes grafic records to any `Write`.
#[derive(Debug, Default, Clone)]
pub struct GraficWriter;

/// Parses grafic records from any `Read`.
#[derive(Debug, Default, Clone)]
pub struct GraficReader;

impl LevelFieldWriter for GraficWriter {
    fn write<W: Write>(
        &self,
        mut writer: W,
        grid: &LevelGrid,
        field: &Field3,
    ) -> Result<(), GridError> {
        let expected = grid.extent();
        if expected.to_shape() != Some(field.shape()) {
            return Err(GridError::FieldShapeMismatch {
                expected,
                found: field.shape(),
            });
        }
        let header = GraficHeader::for_level(grid)?;

        let mut buf = BytesMut::new();
        wire::put_record(&mut buf, bytemuck::bytes_of(&header.to_wire()))?;
        writer.write_all(&buf)?;

        let [_, _, nz] = field.shape();
        for k in 0..nz {
            buf.clear();
            wire::put_f32_record(&mut buf, &field.plane_transposed(k))?;
            writer.write_all(&buf)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl LevelFieldReader for GraficReader {
    type Output = GraficFile;

    fn read<R: Read>(&self, mut reader: R) -> Result<GraficFile, GridError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw)?;
        let mut buf = Bytes::from(raw);

        let head = wire::take_record(&mut buf, 0, HEADER_BYTES)?;
        let wire_header: WireHeader = bytemuck::pod_read_unaligned(&head);
        let header = GraficHeader::from_wire(&wire_header);
        let shape = header.shape().ok_or_else(|| {
            GridError::NonPositiveExtent {
                level: 0,
                extent: IVec3(header.n.map(i64::from)),
            }
        })?;

        let [nx, ny, nz] = shape;
        let too_large = || GridError::ExtentTooLarge(IVec3(header.n.map(i64::from)));
        let plane_bytes = nx
            .checked_mul(ny)
            .and_then(|n| n.checked_mul(size_of::<f32>()))
            .filter(|&b| b <= u32::MAX as usize)
            .ok_or_else(too_large)?;
        let record_bytes = plane_bytes + 2 * wire::MARKER_BYTES;
        let body_bytes = nz.checked_mul(record_bytes).ok_or_else(too_large)?;

        // check the size before allocating anything the header asks for
        let remaining = buf.remaining();
        if remaining < body_bytes {
            return Err(GridError::Truncated(remaining / record_bytes + 1));
        }
        if remaining > body_bytes {
            return Err(GridError::TrailingBytes(remaining - body_bytes));
        }

        let mut field = Field3::zeros(shape)?;
        for k in 0..nz {
            let payload = wire::take_record(&mut buf, k + 1, plane_bytes)?;
            field.set_plane_transposed(k, &wire::f32s_from_le(&payload))?;
        }
        Ok(GraficFile { header, field })
    }
}

/// `<root>/level_{level:03}/ic_{field}`.
pub fn level_path(root: &Path, level: u32, field: &str) -> PathBuf {
    root.join(format!("level_{level:03}"))
        .join(format!("ic_{field}"))
}

/// Writes grafic files under an output root using the per-level directory
/// layout.
#[derive(Debug, Clone)]
pub struct GraficOutput {
    root: PathBuf,
    writer: GraficWriter,
}

impl GraficOutput {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            writer: GraficWriter,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for `field` at absolute level `level`, creating the level
    /// directory if needed. Warns if the file already exists.
    pub fn prepare_path(&self, level: u32, field: &str) -> Result<PathBuf, GridError> {
        let path = level_path(&self.root, level, field);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        if path.is_file() {
            log::warn!("overwriting {}", path.display());
        }
        Ok(path)
    }

    /// Write `data` as field `field` of `grid`, filed under absolute level
    /// `level`.
    pub fn write_field(
        &self,
        grid: &LevelGrid,
        field: &str,
        level: u32,
        data: &Field3,
    ) -> Result<PathBuf, GridError> {
        // fail before touching the filesystem
        GraficHeader::for_level(grid)?;
        let path = self.prepare_path(level, field)?;
        let file = BufWriter::new(File::create(&path)?);
        self.writer.write(file, grid, data)?;
        log::debug!(
            "wrote {} ({} x {} x {})",
            path.display(),
            data.shape()[0],
            data.shape()[1],
            data.shape()[2]
        );
        Ok(path)
    }

    /// Write the level's own buffer as field `field`.
    pub fn write_level(&self, grid: &LevelGrid, field: &str) -> Result<PathBuf, GridError> {
        self.write_field(grid, field, grid.level(), grid.field())
    }

    /// Write every level's buffer once per name in `fields`.
    pub fn write_hierarchy<S: AsRef<str>>(
        &self,
        hierarchy: &GridHierarchy,
        fields: &[S],
    ) -> Result<Vec<PathBuf>, GridError> {
        let mut written = Vec::with_capacity(hierarchy.len() * fields.len());
        for grid in hierarchy {
            for name in fields {
                written.push(self.write_level(grid, name.as_ref())?);
            }
        }
        Ok(written)
    }
}

/// Read a grafic file from disk.
pub fn read_grafic(path: &Path) -> Result<GraficFile, GridError> {
    GraficReader.read(File::open(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Cosmology;
    use crate::geometry::Region;

    fn level_with_cosmo() -> LevelGrid {
        let mut grid = LevelGrid::new(3, Region::new([2, 4, 6], [4, 2, 2])).unwrap();
        grid.set_cosmology(Cosmology {
            dx: 0.5,
            astart: 0.01,
            omegam: 0.3,
            omegav: 0.7,
            h0: 70.0,
        });
        grid.field_mut()
            .fill_with(|i, j, k| (i * 100 + j * 10 + k) as f32);
        grid
    }

    #[test]
    fn header_uses_physical_origin() {
        let h = GraficHeader::for_level(&level_with_cosmo()).unwrap();
        assert_eq!(h.n, [4, 2, 2]);
        assert_eq!(h.origin, [1.0, 2.0, 3.0]);
        assert_eq!(
            h.reals(),
            [0.5, 1.0, 2.0, 3.0, 0.01f64 as f32, 0.3f64 as f32, 0.7f64 as f32, 70.0]
        );
    }

    #[test]
    fn in_memory_layout_and_round_trip() {
        let grid = level_with_cosmo();
        let mut bytes = Vec::new();
        GraficWriter.write(&mut bytes, &grid, grid.field()).unwrap();

        // header record + 2 planes of 4*2 floats
        assert_eq!(bytes.len(), (44 + 8) + 2 * (32 + 8));
        assert_eq!(&bytes[0..4], &44u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &4i32.to_le_bytes());
        assert_eq!(&bytes[48..52], &44u32.to_le_bytes());
        assert_eq!(&bytes[52..56], &32u32.to_le_bytes());
        // first value of plane 0 is (0,0,0), second is (1,0,0)
        assert_eq!(&bytes[60..64], &100.0f32.to_le_bytes());

        let back = GraficReader.read(bytes.as_slice()).unwrap();
        assert_eq!(back.header, GraficHeader::for_level(&grid).unwrap());
        assert_eq!(&back.field, grid.field());
    }

    #[test]
    fn writing_without_cosmology_fails() {
        let grid = LevelGrid::new(3, Region::new([0, 0, 0], [2, 2, 2])).unwrap();
        let err = GraficWriter
            .write(Vec::new(), &grid, grid.field())
            .unwrap_err();
        assert!(matches!(err, GridError::MissingCosmology(3)));
    }

    #[test]
    fn writing_mismatched_data_fails() {
        let grid = level_with_cosmo();
        let err = GraficWriter
            .write(Vec::new(), &grid, &Field3::zeros([2, 2, 2]).unwrap())
            .unwrap_err();
        assert!(matches!(err, GridError::FieldShapeMismatch { .. }));
    }

    #[test]
    fn level_path_convention() {
        let p = level_path(Path::new("/out"), 7, "deltab");
        assert_eq!(p, PathBuf::from("/out/level_007/ic_deltab"));
    }

    #[test]
    fn truncated_plane_is_reported() {
        let grid = level_with_cosmo();
        let mut bytes = Vec::new();
        GraficWriter.write(&mut bytes, &grid, grid.field()).unwrap();
        bytes.truncate(bytes.len() - 6);
        let err = GraficReader.read(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, GridError::Truncated(2)));
    }

    fn header_only(n: [i32; 3]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        let header = WireHeader::new(n, [1.0, 0.0, 0.0, 0.0, 0.01, 0.3, 0.7, 70.0]);
        wire::put_record(&mut buf, bytemuck::bytes_of(&header)).unwrap();
        buf.to_vec()
    }

    #[test]
    fn oversized_header_is_rejected_without_allocating() {
        let bytes = header_only([i32::MAX; 3]);
        let err = GraficReader.read(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, GridError::ExtentTooLarge(_)));
    }

    #[test]
    fn missing_planes_are_truncated_not_allocated() {
        let bytes = header_only([4096, 4096, 4096]);
        let err = GraficReader.read(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, GridError::Truncated(1)));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let grid = level_with_cosmo();
        let mut bytes = Vec::new();
        GraficWriter.write(&mut bytes, &grid, grid.field()).unwrap();
        bytes.extend_from_slice(&[0, 0, 0]);
        let err = GraficReader.read(bytes.as_slice()).unwrap_err();
        assert!(matches!(err, GridError::TrailingBytes(3)));
    }
}
