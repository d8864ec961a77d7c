//! Error types for geometry allocation and mutation.
//!
//! Every failure falls into one of two [`ErrorKind`]s: the allocator could
//! not satisfy a reservation, or the caller passed an argument that names
//! nothing (missing name, bad index, broken cross-reference).

use std::error::Error;
use std::fmt;

use crate::id::{KeyName, RecordKind};

/// Coarse classification of a [`GeomError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Out of memory, or a reservation beyond the slot limit.
    Alloc,
    /// Missing name, out-of-range index, or unmet referential precondition.
    InvalidArgument,
}

/// Errors from geometry allocation, insertion, and lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeomError {
    /// A slot array could not grow. The array has been reset to empty.
    AllocFailed {
        /// Kind of the array that failed to grow.
        kind: RecordKind,
        /// Total number of slots that were requested.
        requested: usize,
    },
    /// A required name was `Atom::NONE` or an empty string.
    MissingName {
        /// Kind of the record being added.
        kind: RecordKind,
    },
    /// An overlay was requested with no rows.
    EmptyOverlay,
    /// An index did not name a live element.
    IndexOutOfRange {
        /// Kind of the indexed array.
        kind: RecordKind,
        /// The offending index.
        index: usize,
        /// Number of live elements.
        len: usize,
    },
    /// An overlay row points past the rows of the section it overlays.
    RowUnderOutOfRange {
        /// The overlay row's `row_under`.
        row_under: usize,
        /// Number of rows in the section.
        rows: usize,
    },
    /// The `under` key of an overlay key is not in the target row.
    UnknownUnderKey {
        /// The key name that was not found.
        under: KeyName,
    },
    /// An overlay's `section_under` does not match the section holding it.
    StaleRelation {
        /// Section the overlay was reached through.
        section: usize,
        /// Section the overlay claims to overlay.
        section_under: usize,
    },
}

impl GeomError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AllocFailed { .. } => ErrorKind::Alloc,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllocFailed { kind, requested } => {
                write!(f, "failed to allocate {requested} {kind} slots")
            }
            Self::MissingName { kind } => write!(f, "{kind} requires a name"),
            Self::EmptyOverlay => write!(f, "overlay requires at least one row"),
            Self::IndexOutOfRange { kind, index, len } => {
                write!(f, "{kind} index {index} out of range (len {len})")
            }
            Self::RowUnderOutOfRange { row_under, rows } => {
                write!(f, "row_under {row_under} out of range (section has {rows} rows)")
            }
            Self::UnknownUnderKey { under } => {
                write!(f, "key <{under}> not found in the row under the overlay")
            }
            Self::StaleRelation {
                section,
                section_under,
            } => {
                write!(
                    f,
                    "overlay in section {section} claims to overlay section {section_under}"
                )
            }
        }
    }
}

impl Error for GeomError {}
