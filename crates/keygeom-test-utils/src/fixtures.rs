//! Canned geometry trees.
//!
//! - [`grid_geometry`]: N sections × M rows × K keys, one shape.
//! - [`full_geometry`]: every collection populated, including overlays and
//!   both doodad variants that own strings.

use keygeom_arena::{
    Doodad, DoodadKind, GeomParts, Geometry, GeometrySizes, LogoDoodad, TextDoodad,
};
use keygeom_core::{Atom, KeyName};

use crate::{key_name, GeometryBuilder};

/// `sections` sections of `rows` rows with `keys` keys each.
///
/// Panics on allocation failure; fixtures are test-only.
pub fn grid_geometry(sections: usize, rows: usize, keys: usize) -> Geometry {
    let mut b = GeometryBuilder::new("grid")
        .shape("NORM", 18, 18)
        .expect("shape");
    for s in 0..sections {
        b = b.section(&format!("s{s}"), rows, keys).expect("section");
    }
    b.build().0
}

/// A geometry with every collection in use.
///
/// Section `alpha` has two rows of four keys and an overlay `kp` mapping
/// `RA00`/`RA01` to `KP7`/`KP8`. Section `alpha` also holds a text doodad;
/// the geometry holds a logo doodad.
pub fn full_geometry() -> Geometry {
    let (mut geom, mut atoms) = GeometryBuilder::new("full")
        .property("vendor", "keygeom")
        .and_then(|b| b.color("black", 0))
        .and_then(|b| b.color("grey20", 0x333333))
        .and_then(|b| b.shape("NORM", 18, 18))
        .and_then(|b| b.section("alpha", 2, 4))
        .and_then(|b| b.overlay("alpha", "kp", 0, &[("KP7", "RA00"), ("KP8", "RA01")]))
        .expect("full geometry")
        .build();

    geom.label_font = Some("helvetica".into());
    geom.set_base_color(1).expect("base color");
    geom.add_key_alias(KeyName::new("LatA"), key_name(0, 0))
        .expect("alias");

    let text: &mut Doodad = geom
        .add_doodad(Some(0), atoms.intern("label"))
        .expect("text doodad");
    text.kind = DoodadKind::Text(TextDoodad {
        text: "Caps Lock".into(),
        font: "helvetica".into(),
        ..Default::default()
    });

    let logo = geom
        .add_doodad(None, atoms.intern("logo"))
        .expect("logo doodad");
    logo.kind = DoodadKind::Logo(LogoDoodad {
        logo_name: "keygeom".into(),
        ..Default::default()
    });
    geom
}

/// Sizes reserving `n` of every collection.
pub fn uniform_sizes(n: usize) -> GeometrySizes {
    GeometrySizes::new().with(GeomParts::ALL, n)
}

/// An atom that no fixture interns.
pub const UNUSED_ATOM: Atom = Atom(u32::MAX);
