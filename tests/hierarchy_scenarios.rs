mod util;

use grafic_zoom::prelude::*;
use util::scenario_c;

#[test]
fn level_at_full_resolution_keeps_its_origin() {
    let m = LevelGrid::new(6, Region::new([0, 0, 0], [64, 64, 64])).unwrap();
    assert_eq!(m.origin(), IVec3::ZERO);
    assert_eq!(m.extent(), IVec3::splat(64));
    assert_eq!(m.field().shape(), [64, 64, 64]);
}

#[test]
fn odd_origin_aligns_to_parent_cells() {
    let m = LevelGrid::new(6, Region::new([12, 5, 37], [64, 64, 64])).unwrap();
    assert_eq!(m.origin(), IVec3::new(12, 4, 36));
    assert!(m.region().contains(m.requested()));
}

#[test]
fn three_level_zoom_has_expected_shape() {
    let lmin = 5;
    let lmax = 7;
    let pad = 4;
    let h = scenario_c();

    assert_eq!(h.len(), (lmax - lmin + 1) as usize);
    for i in h.level_indices() {
        assert_eq!(h.get(i).unwrap().level(), lmin + i as u32);
    }

    // extents shrink by half plus padding walking down from the finest level
    let mut nn = IVec3::splat(8);
    for i in (1..=(lmax - lmin) as usize).rev() {
        assert_eq!(h.get(i).unwrap().extent(), nn);
        nn = nn / 2 + 2 * pad;
    }
    assert_eq!(h.get(1).unwrap().extent(), IVec3::splat(12));
}

#[test]
fn base_level_spans_the_box() {
    for lmin in 1..=6u32 {
        let h = GridHierarchy::build(&HierarchyConfig::new(
            lmin,
            lmin + 1,
            [1i64 << lmin, 1 << lmin, 1 << lmin],
            [2, 2, 2],
        ))
        .unwrap();
        let base = h.base();
        assert_eq!(base.level(), lmin);
        assert_eq!(base.origin(), IVec3::ZERO);
        assert_eq!(base.extent(), IVec3::splat(1 << lmin));
        assert_eq!(base.offset(), IVec3::ZERO);
    }
}

#[test]
fn offsets_follow_parent_origins() {
    let h = scenario_c();
    assert_eq!(h.base().offset(), IVec3::ZERO);
    for i in 1..h.len() {
        let child = h.get(i).unwrap();
        let parent = h.get(i - 1).unwrap();
        assert_eq!(child.offset(), child.origin() / 2 - parent.origin());
    }
    let offsets: Vec<IVec3> = h.iter().map(LevelGrid::offset).collect();
    assert_eq!(
        offsets,
        vec![IVec3::ZERO, IVec3::splat(10), IVec3::splat(4)]
    );
}

#[test]
fn forward_and_reverse_sweeps() {
    let h = scenario_c();
    let nl = h.len();
    for (i, il) in h.level_indices().enumerate() {
        assert_eq!(il, i);
    }
    for (i, il) in h.level_indices_rev().enumerate() {
        assert_eq!(il, nl - 1 - i);
    }
}

#[test]
fn padding_is_taken_from_the_config() {
    let tight = GridHierarchy::build(
        &HierarchyConfig::new(5, 7, [48, 48, 48], [8, 8, 8]).with_pad(1),
    )
    .unwrap();
    // 8/2 + 2 = 6
    assert_eq!(tight.level(6).unwrap().extent(), IVec3::splat(6));
    assert_eq!(tight.pad(), 1);
}

#[test]
fn invalid_range_is_rejected_before_building() {
    let err = GridHierarchy::build(&HierarchyConfig::new(7, 5, [48, 48, 48], [8, 8, 8]))
        .unwrap_err();
    assert!(matches!(
        err,
        GridError::InvalidLevelRange {
            level_min: 7,
            level_max: 5
        }
    ));
}

#[test]
fn base_box_too_large_to_count_is_rejected() {
    let err = GridHierarchy::build(&HierarchyConfig::new(22, 22, [0, 0, 0], [2, 2, 2]))
        .unwrap_err();
    assert!(matches!(err, GridError::LevelTooDeep(22)));
}

#[test]
fn hierarchy_validates() {
    let h = scenario_c();
    h.validate_invariants().unwrap();
    for grid in &h {
        grid.validate_invariants().unwrap();
    }
}

#[test]
fn config_from_json_builds_the_same_hierarchy() {
    let cfg: HierarchyConfig = serde_json::from_str(
        r#"{ "level_min": 5, "level_max": 7, "origin": [48, 48, 48], "extent": [8, 8, 8] }"#,
    )
    .unwrap();
    let a = GridHierarchy::build(&cfg).unwrap();
    let b = scenario_c();
    for (x, y) in a.iter().zip(b.iter()) {
        assert_eq!(x.region(), y.region());
        assert_eq!(x.offset(), y.offset());
    }
}
