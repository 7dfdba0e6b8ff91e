//! Cosmological parameters attached to a level for grafic output.

use crate::grid_error::GridError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recognized keys of the key/value form, in header order.
pub const COSMOLOGY_KEYS: [&str; 5] = ["dx", "astart", "omegam", "omegav", "h0"];

/// Per-level physical parameters written into the grafic header.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cosmology {
    /// Cell size of this level.
    pub dx: f64,
    /// Starting scale factor.
    pub astart: f64,
    /// Matter density parameter.
    pub omegam: f64,
    /// Vacuum density parameter.
    pub omegav: f64,
    /// Hubble parameter.
    pub h0: f64,
}

impl Cosmology {
    /// Build from `(key, value)` pairs using the recognized keys.
    ///
    /// # Errors
    /// `UnknownCosmologyKey` for any key outside [`COSMOLOGY_KEYS`],
    /// `MissingCosmologyKey` if one of them is absent. Later duplicates win.
    pub fn from_pairs<K, I>(pairs: I) -> Result<Self, GridError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut slots: [Option<f64>; 5] = [None; 5];
        for (key, value) in pairs {
            let key = key.as_ref();
            let at = COSMOLOGY_KEYS
                .iter()
                .position(|k| *k == key)
                .ok_or_else(|| GridError::UnknownCosmologyKey(key.to_string()))?;
            slots[at] = Some(value);
        }
        let take = |at: usize| slots[at].ok_or(GridError::MissingCosmologyKey(COSMOLOGY_KEYS[at]));
        Ok(Self {
            dx: take(0)?,
            astart: take(1)?,
            omegam: take(2)?,
            omegav: take(3)?,
            h0: take(4)?,
        })
    }

    /// Key/value view in [`COSMOLOGY_KEYS`] order.
    pub fn to_pairs(&self) -> [(&'static str, f64); 5] {
        [
            ("dx", self.dx),
            ("astart", self.astart),
            ("omegam", self.omegam),
            ("omegav", self.omegav),
            ("h0", self.h0),
        ]
    }
}

impl TryFrom<&BTreeMap<String, f64>> for Cosmology {
    type Error = GridError;

    fn try_from(map: &BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Cosmology::from_pairs(map.iter().map(|(k, v)| (k.as_str(), *v)))
    }
}
