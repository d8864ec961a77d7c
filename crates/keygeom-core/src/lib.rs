//! Core types for the keygeom keyboard geometry framework.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the identifiers and error types shared by the rest of the workspace:
//! interned names ([`Atom`], [`AtomTable`]), fixed-length key names
//! ([`KeyName`]), the [`RecordKind`] catalogue, and [`GeomError`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod atom;
pub mod error;
pub mod id;

pub use atom::AtomTable;
pub use error::{ErrorKind, GeomError};
pub use id::{Atom, KeyName, RecordKind, KEY_NAME_LEN};
