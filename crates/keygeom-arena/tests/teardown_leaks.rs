//! Recursive teardown releases every buffer in the tree.
//!
//! A counting global allocator tracks live heap bytes per thread; each test
//! records a baseline, builds and tears down a tree, and checks the count
//! returns to the baseline.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use keygeom_arena::{alloc_geometry, free_geometry, GeomParts, GeometrySizes, MAX_SLOTS};
use keygeom_test_utils::fixtures::{full_geometry, grid_geometry, uniform_sizes};

struct Counting;

thread_local! {
    static LIVE: Cell<isize> = const { Cell::new(0) };
}

fn adjust(delta: isize) {
    // Ignore accesses during thread teardown.
    let _ = LIVE.try_with(|live| live.set(live.get() + delta));
}

unsafe impl GlobalAlloc for Counting {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            adjust(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        adjust(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new = System.realloc(ptr, layout, new_size);
        if !new.is_null() {
            adjust(new_size as isize - layout.size() as isize);
        }
        new
    }
}

#[global_allocator]
static ALLOCATOR: Counting = Counting;

fn live_bytes() -> isize {
    LIVE.with(Cell::get)
}

#[test]
fn free_geometry_releases_sections_rows_and_keys() {
    let baseline = live_bytes();
    let mut slot = Some(grid_geometry(4, 5, 6));
    assert!(live_bytes() > baseline);

    let geom = slot.as_ref().unwrap();
    assert_eq!(geom.sections().len(), 4);
    assert_eq!(geom.sections()[3].rows()[4].keys().len(), 6);

    free_geometry(&mut slot, GeomParts::ALL, true);
    assert!(slot.is_none());
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn free_sections_part_leaves_sections_empty() {
    let baseline = live_bytes();
    let mut slot = Some(grid_geometry(3, 2, 2));

    free_geometry(&mut slot, GeomParts::SECTIONS, false);
    let geom = slot.as_ref().unwrap();
    assert_eq!(geom.sections().len(), 0);
    assert!(!geom.sections().is_allocated());
    assert!(geom.shapes().is_allocated());

    free_geometry(&mut slot, GeomParts::empty(), true);
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn full_tree_with_strings_and_overlays_is_released() {
    let baseline = live_bytes();
    let mut slot = Some(full_geometry());
    free_geometry(&mut slot, GeomParts::ALL, true);
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn ranged_removals_release_removed_subtrees() {
    let baseline = live_bytes();
    let mut slot = Some(grid_geometry(3, 3, 3));
    if let Some(geom) = slot.as_mut() {
        geom.section_mut(1).unwrap().free_rows(0, 2, false);
        geom.free_sections(0, 1, false);
        geom.shapes_mut()[0].free_outlines(0, 1, false);
        assert_eq!(geom.sections().len(), 2);
        assert_eq!(geom.sections()[0].rows().len(), 1);
    }
    free_geometry(&mut slot, GeomParts::ALL, true);
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn failed_alloc_geometry_leaves_nothing_behind() {
    let baseline = live_bytes();
    let mut slot = None;
    let sizes = uniform_sizes(8).with(GeomParts::KEY_ALIASES, MAX_SLOTS + 1);
    assert!(alloc_geometry(&mut slot, &sizes).is_err());
    assert!(slot.is_none());
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn alloc_then_free_round_trips_to_baseline() {
    let baseline = live_bytes();
    let mut slot = None;
    let sizes = GeometrySizes::new().with(GeomParts::ALL, 16);
    let geom = alloc_geometry(&mut slot, &sizes).unwrap();
    assert_eq!(geom.doodads().capacity(), 16);
    free_geometry(&mut slot, GeomParts::ALL, true);
    assert_eq!(live_bytes(), baseline);
}
