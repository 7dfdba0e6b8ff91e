//! Fixed little-endian records for grafic files.
//!
//! Grafic files are Fortran "unformatted" sequential files: every payload is
//! bracketed by a 4-byte record length before and after it. All multi-byte
//! values are **little-endian**; the header struct stores them pre-LE with
//! `.to_le()` and decodes with `from_le()`.

use bytemuck::{Pod, Zeroable};
use bytes::{Buf, BufMut, BytesMut};
use static_assertions::const_assert_eq;
use std::mem::size_of;

use crate::grid_error::GridError;

/// Size of the length marker around each record.
pub const MARKER_BYTES: usize = size_of::<u32>();

/// Payload size of the header record: 3 `i32` + 8 `f32`.
pub const HEADER_BYTES: usize = 44;

/// Header record as laid out on disk.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WireHeader {
    pub n_le: [i32; 3],
    /// `f32` bit patterns: dx, x/y/z origin, astart, omegam, omegav, h0.
    pub reals_le: [u32; 8],
}

const_assert_eq!(size_of::<WireHeader>(), HEADER_BYTES);

impl WireHeader {
    pub fn new(n: [i32; 3], reals: [f32; 8]) -> Self {
        Self {
            n_le: n.map(i32::to_le),
            reals_le: reals.map(|r| r.to_bits().to_le()),
        }
    }

    pub fn n(&self) -> [i32; 3] {
        self.n_le.map(i32::from_le)
    }

    pub fn reals(&self) -> [f32; 8] {
        self.reals_le.map(|r| f32::from_bits(u32::from_le(r)))
    }
}

/// Append one framed record.
pub fn put_record(buf: &mut BytesMut, payload: &[u8]) -> Result<(), GridError> {
    let len = u32::try_from(payload.len()).map_err(|_| GridError::RecordLength {
        record: 0,
        expected: u32::MAX as usize,
        found: payload.len(),
    })?;
    buf.reserve(payload.len() + 2 * MARKER_BYTES);
    buf.put_u32_le(len);
    buf.put_slice(payload);
    buf.put_u32_le(len);
    Ok(())
}

/// Append one framed record of `f32` values.
pub fn put_f32_record(buf: &mut BytesMut, values: &[f32]) -> Result<(), GridError> {
    let mut payload = BytesMut::with_capacity(values.len() * size_of::<f32>());
    for &v in values {
        payload.put_f32_le(v);
    }
    put_record(buf, &payload)
}

/// Split the next framed record off `buf`, checking both markers against
/// `expected` payload bytes. `record` is the 0-based record number used in
/// error reports.
pub fn take_record<B: Buf>(buf: &mut B, record: usize, expected: usize) -> Result<Vec<u8>, GridError> {
    if buf.remaining() < MARKER_BYTES {
        return Err(GridError::Truncated(record));
    }
    let lead = buf.get_u32_le() as usize;
    if lead != expected {
        return Err(GridError::RecordLength {
            record,
            expected,
            found: lead,
        });
    }
    if buf.remaining() < lead + MARKER_BYTES {
        return Err(GridError::Truncated(record));
    }
    let mut payload = vec![0u8; lead];
    buf.copy_to_slice(&mut payload);
    let trail = buf.get_u32_le() as usize;
    if trail != lead {
        return Err(GridError::RecordLength {
            record,
            expected: lead,
            found: trail,
        });
    }
    Ok(payload)
}

/// Decode a little-endian `f32` payload.
pub fn f32s_from_le(mut payload: &[u8]) -> Vec<f32> {
    let mut out = Vec::with_capacity(payload.len() / size_of::<f32>());
    while payload.remaining() >= size_of::<f32>() {
        out.push(payload.get_f32_le());
    }
    out
}
