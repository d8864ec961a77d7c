//! Slot-array storage for keyboard geometry trees.
//!
//! Every record kind of an XKB-style keyboard geometry lives in a
//! [`SlotArray`]: a growable array with exact (non-amortised) growth,
//! zero-filled spare slots, ranged removal with tail compaction, and a
//! per-element finalizer that tears down owned children before anything
//! moves.
//!
//! # Architecture
//!
//! ```text
//! Geometry (root)
//! ├── Property[]                      name/value strings
//! ├── Color[]                         spec + pixel
//! ├── Shape[]
//! │   └── Outline[] → Point[]         primary/approx: indices into Outline[]
//! ├── Section[]
//! │   ├── Row[] → Key[]
//! │   ├── Doodad[]                    section-local
//! │   └── Overlay[] → OverlayRow[] → OverlayKey[]
//! │                                   section_under, row_under: indices
//! ├── Doodad[]                        geometry-level
//! └── KeyAlias[]
//! ```
//!
//! # Mutation model
//!
//! - **Allocate** (`alloc_*`) reserves capacity and never changes length.
//! - **Add** (`add_*`) is find-or-create: a matching element is updated or
//!   grown in place, otherwise a new element is appended.
//! - **Free** (`free_*`) removes a range or, with `free_all`, everything,
//!   releasing each removed element's subtree first.
//!
//! Cross-references are plain indices. Those whose target this crate
//! compacts (distinguished outlines, label/base colors, `section_under`)
//! are fixed up by the compacting operation; `row_under` is revalidated
//! every time it is followed.
//!
//! All operations are single-threaded and synchronous.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod doodad;
pub mod geometry;
pub mod overlay;
pub mod section;
pub mod shape;
pub mod slots;
pub mod table;

// Public re-exports for the primary API surface.
pub use config::{GeomParts, GeometrySizes};
pub use doodad::{
    Doodad, DoodadKind, IndicatorDoodad, LogoDoodad, ShapeDoodad, TextDoodad,
};
pub use geometry::{alloc_geometry, free_geometry, Geometry};
pub use overlay::{Overlay, OverlayKey, OverlayRow};
pub use section::{Key, Row, Section};
pub use shape::{Bounds, Outline, Point, Shape};
pub use slots::{Record, SlotArray, MAX_SLOTS};
pub use table::{Color, KeyAlias, Property};
