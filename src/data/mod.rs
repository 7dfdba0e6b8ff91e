//! Data module: per-level field buffers and cosmological metadata

pub mod cosmology;
pub mod field;

pub use cosmology::{COSMOLOGY_KEYS, Cosmology};
pub use field::Field3;
