//! keygeom: arena-style storage for keyboard layout geometry.
//!
//! This is the top-level facade crate that re-exports the public API from the
//! keygeom sub-crates. For most users, adding `keygeom` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use keygeom::prelude::*;
//!
//! let mut atoms = AtomTable::new();
//! let mut slot = None;
//! let sizes = GeometrySizes::new().with(GeomParts::SHAPES | GeomParts::SECTIONS, 1);
//! let geom = alloc_geometry(&mut slot, &sizes).unwrap();
//!
//! // One 18×18 key shape.
//! let shape = geom.add_shape(atoms.intern("NORM"), 1).unwrap();
//! shape.add_outline(1).unwrap().add_point(Point::new(18, 18)).unwrap();
//! shape.compute_bounds();
//!
//! // A section with one row of two keys.
//! let section = geom.add_section(atoms.intern("alpha"), 1, 0, 1).unwrap();
//! let row = section.add_row(2).unwrap();
//! row.add_key().unwrap().name = KeyName::new("AE01");
//! row.add_key().unwrap().name = KeyName::new("AE02");
//!
//! // Adding the same section again grows it instead of duplicating it.
//! geom.add_section(atoms.intern("alpha"), 1, 0, 0).unwrap();
//! assert_eq!(geom.sections().len(), 1);
//!
//! // Overlay keys must name a key in the row they lie over.
//! geom.add_overlay(0, atoms.intern("keypad"), 1).unwrap();
//! geom.add_overlay_row(0, 0, 0, 1).unwrap();
//! geom.add_overlay_key(0, 0, 0, KeyName::new("KP1"), KeyName::new("AE01")).unwrap();
//! assert!(geom
//!     .add_overlay_key(0, 0, 0, KeyName::new("KP2"), KeyName::new("AE09"))
//!     .is_err());
//!
//! free_geometry(&mut slot, GeomParts::ALL, true);
//! assert!(slot.is_none());
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`arena`] | `keygeom-arena` | Slot arrays, geometry records, whole-tree operations |
//! | [`types`] | `keygeom-core` | Atoms, key names, record kinds, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Slot arrays and geometry records (`keygeom-arena`).
///
/// The root is [`arena::Geometry`]; every collection below it is an
/// [`arena::SlotArray`].
pub use keygeom_arena as arena;

/// Identifiers and errors (`keygeom-core`).
///
/// Contains [`types::Atom`], [`types::KeyName`], and [`types::GeomError`].
pub use keygeom_core as types;

/// Common imports for typical keygeom usage.
///
/// ```rust
/// use keygeom::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use keygeom_core::{Atom, AtomTable, ErrorKind, GeomError, KeyName, RecordKind};

    // Records
    pub use keygeom_arena::{
        Bounds, Color, Doodad, DoodadKind, Key, KeyAlias, Outline, Overlay, OverlayKey,
        OverlayRow, Point, Property, Row, Section, Shape,
    };

    // Root and configuration
    pub use keygeom_arena::{
        alloc_geometry, free_geometry, GeomParts, Geometry, GeometrySizes, SlotArray,
    };
}
