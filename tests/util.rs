#![allow(dead_code)]
use grafic_zoom::prelude::*;
use std::path::PathBuf;

/// Levels 5..=7 around a 8^3 zoom region at (48, 48, 48), pad 4.
pub fn scenario_c() -> GridHierarchy {
    GridHierarchy::build(&HierarchyConfig::new(5, 7, [48, 48, 48], [8, 8, 8]).with_pad(4))
        .expect("scenario C must build")
}

pub fn cosmology(dx: f64) -> Cosmology {
    Cosmology {
        dx,
        astart: 0.01,
        omegam: 0.3,
        omegav: 0.7,
        h0: 70.0,
    }
}

/// Fresh, empty scratch directory unique to this test and process.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("grafic-zoom-{name}-{}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).expect("clear scratch dir");
    }
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
