//! Selective teardown of geometry collections.

use keygeom_arena::{free_geometry, GeomParts, Geometry};
use keygeom_test_utils::fixtures::full_geometry;

/// `(part, allocated?)` for every single collection.
fn allocation_map(geom: &Geometry) -> Vec<(GeomParts, bool)> {
    vec![
        (GeomParts::PROPERTIES, geom.properties().is_allocated()),
        (GeomParts::COLORS, geom.colors().is_allocated()),
        (GeomParts::SHAPES, geom.shapes().is_allocated()),
        (GeomParts::SECTIONS, geom.sections().is_allocated()),
        (GeomParts::DOODADS, geom.doodads().is_allocated()),
        (GeomParts::KEY_ALIASES, geom.key_aliases().is_allocated()),
    ]
}

#[test]
fn each_part_clears_independently() {
    for part in GeomParts::ALL.iter() {
        let mut geom = full_geometry();
        assert!(allocation_map(&geom).iter().all(|&(_, a)| a));

        geom.free_parts(part);
        for (p, allocated) in allocation_map(&geom) {
            assert_eq!(allocated, p != part, "after clearing {part:?}, {p:?}");
        }
    }
}

#[test]
fn masked_free_keeps_record_and_font() {
    let mut slot = Some(full_geometry());
    free_geometry(&mut slot, GeomParts::COLORS | GeomParts::DOODADS, false);
    let geom = slot.as_ref().unwrap();
    assert_eq!(geom.label_font.as_deref(), Some("helvetica"));
    assert!(geom.base_color().is_none());
    assert!(!geom.doodads().is_allocated());
    // Section doodads belong to the section, not the geometry-level part.
    assert_eq!(geom.sections()[0].doodads().len(), 1);
}

#[test]
fn free_map_ignores_mask() {
    let mut slot = Some(full_geometry());
    free_geometry(&mut slot, GeomParts::empty(), true);
    assert!(slot.is_none());
}

#[test]
fn free_all_ignores_range_arguments() {
    let mut geom = full_geometry();
    geom.free_colors(3, 1, true);
    assert_eq!(geom.colors().len(), 0);
    assert!(!geom.colors().is_allocated());
}

#[test]
fn interior_removal_compacts_tail() {
    let mut geom = Geometry::new();
    for name in ["p0", "p1", "p2", "p3", "p4"] {
        geom.add_property(name, name).unwrap();
    }
    geom.free_properties(1, 2, false);
    let names: Vec<_> = geom.properties().iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["p0", "p3", "p4"]);
    assert_eq!(geom.properties().capacity(), 5);
}

#[test]
fn removal_reaching_the_end_truncates() {
    let mut geom = Geometry::new();
    for name in ["p0", "p1", "p2"] {
        geom.add_property(name, "v").unwrap();
    }
    geom.free_properties(1, 10, false);
    assert_eq!(geom.properties().len(), 1);
    assert_eq!(geom.property("p0"), Some("v"));
    assert_eq!(geom.property("p1"), None);
}

#[test]
fn out_of_range_removal_is_a_no_op() {
    let mut geom = full_geometry();
    let before = geom.properties().len();
    geom.free_properties(before, 1, false);
    geom.free_properties(0, 0, false);
    assert_eq!(geom.properties().len(), before);
}
