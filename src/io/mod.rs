//! Field I/O for hierarchy levels.
//!
//! This module provides trait-based writers and readers for serializing a
//! level's scalar field together with its geometry and cosmology, and the
//! grafic implementation of both.

pub mod grafic;
pub mod wire;

use crate::data::Field3;
use crate::grid_error::GridError;
use crate::hierarchy::LevelGrid;
use std::io::{Read, Write};

pub use grafic::{
    GraficFile, GraficHeader, GraficOutput, GraficReader, GraficWriter, level_path, read_grafic,
};

/// Overdensity field name.
pub const FIELD_DELTAB: &str = "deltab";
/// Refinement mask field name.
pub const FIELD_REFMAP: &str = "refmap";

/// Field names of a standard initial-conditions set.
pub const STANDARD_FIELDS: [&str; 8] = [
    FIELD_DELTAB,
    "poscx",
    "poscy",
    "poscz",
    "velcx",
    "velcy",
    "velcz",
    FIELD_REFMAP,
];

/// Trait for writers that serialize one field of one level.
pub trait LevelFieldWriter {
    /// Write `field`, described by `grid`'s geometry and cosmology.
    fn write<W: Write>(&self, writer: W, grid: &LevelGrid, field: &Field3)
    -> Result<(), GridError>;
}

/// Trait for readers that parse one serialized field.
pub trait LevelFieldReader {
    /// Parsed representation.
    type Output;

    /// Parse from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Self::Output, GridError>;
}
