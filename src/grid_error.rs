//! GridError: Unified error type for grafic-zoom public APIs
//!
//! Every failure is a precondition violation detected synchronously while a
//! hierarchy is being built, or an I/O problem while writing or reading
//! grafic files. Library code never panics on bad input.

use crate::geometry::IVec3;
use thiserror::Error;

/// Unified error type for hierarchy construction and grafic I/O.
#[derive(Debug, Error)]
pub enum GridError {
    /// `level_min` exceeds `level_max`.
    #[error("invalid level range: level_min={level_min} > level_max={level_max}")]
    InvalidLevelRange { level_min: u32, level_max: u32 },
    /// Level-aware grids require `level > 0`.
    #[error("invalid level {0}: refined levels must be > 0")]
    InvalidLevel(u32),
    /// The base level would not fit into the integer coordinate range.
    #[error("level {0} is too deep for 64-bit cell coordinates")]
    LevelTooDeep(u32),
    /// An input or derived extent has a component `<= 0`.
    #[error("non-positive extent {extent} at level {level}")]
    NonPositiveExtent { level: u32, extent: IVec3 },
    /// An input or derived origin has a negative component.
    #[error("negative origin {origin} at level {level}")]
    NegativeOrigin { level: u32, origin: IVec3 },
    /// A level's lower corner falls outside its parent's lower corner.
    #[error("negative offset {offset} of level {level} relative to its parent")]
    NegativeOffset { level: u32, offset: IVec3 },
    /// Alignment produced odd coordinates; this is a logic defect.
    #[error("alignment invariant violated at level {level}: origin={origin} extent={extent}")]
    AlignmentInvariant {
        level: u32,
        origin: IVec3,
        extent: IVec3,
    },
    /// A structural invariant of a built hierarchy does not hold.
    #[error("hierarchy invariant violated: {0}")]
    Invariant(String),
    /// The field buffer does not match the level geometry.
    #[error("field shape {found:?} does not match extent {expected}")]
    FieldShapeMismatch { expected: IVec3, found: [usize; 3] },
    /// The extent cannot be allocated, or cannot be expressed in the 32-bit
    /// grafic header and record markers.
    #[error("extent {0} is too large to store")]
    ExtentTooLarge(IVec3),
    /// A required cosmology key was absent from a key/value mapping.
    #[error("missing cosmology key `{0}`")]
    MissingCosmologyKey(&'static str),
    /// A key/value mapping carried a key that is not a cosmology parameter.
    #[error("unknown cosmology key `{0}`")]
    UnknownCosmologyKey(String),
    /// A level was written before cosmology metadata was attached.
    #[error("level {0} has no cosmology attached")]
    MissingCosmology(u32),
    /// No level with this index exists in the hierarchy.
    #[error("level {0} is not part of the hierarchy")]
    UnknownLevel(u32),
    /// A record's leading and trailing length markers disagree, or the
    /// record does not have the expected size.
    #[error("record {record}: expected {expected} bytes, found {found}")]
    RecordLength {
        record: usize,
        expected: usize,
        found: usize,
    },
    /// The input ended inside a record.
    #[error("truncated grafic data in record {0}")]
    Truncated(usize),
    /// Bytes remained after the last plane record.
    #[error("{0} trailing bytes after the last grafic record")]
    TrailingBytes(usize),
    /// Underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
