//! Strongly-typed identifiers: [`Atom`], [`KeyName`], and [`RecordKind`].

use std::fmt;

/// Length in bytes of a [`KeyName`].
pub const KEY_NAME_LEN: usize = 4;

/// An interned name.
///
/// Atoms are handed out by an [`AtomTable`](crate::AtomTable) and compare
/// by value. `Atom::NONE` is reserved and never names anything, so every
/// name-keyed insertion rejects it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// The reserved "no name" atom.
    pub const NONE: Atom = Atom(0);

    /// Whether this is [`Atom::NONE`].
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Atom {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// A fixed-length key name such as `AE01` or `TLDE`.
///
/// Built with `strncpy` semantics: input longer than [`KEY_NAME_LEN`] bytes is
/// truncated and shorter input is zero-padded. Equality is the bounded
/// comparison over all four bytes, so `"ESC"` and `"ESC\0"` are the same name.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyName([u8; KEY_NAME_LEN]);

impl KeyName {
    /// The all-zero name held by freshly reserved slots.
    pub const EMPTY: KeyName = KeyName([0; KEY_NAME_LEN]);

    /// Build a key name from a string, truncating or padding to four bytes.
    pub fn new(name: &str) -> Self {
        Self::from_bytes(name.as_bytes())
    }

    /// Build a key name from raw bytes with `strncpy` semantics.
    ///
    /// Copying stops at the first NUL byte; the remainder is zero-filled.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut raw = [0u8; KEY_NAME_LEN];
        for (dst, &src) in raw.iter_mut().zip(bytes.iter().take_while(|&&b| b != 0)) {
            *dst = src;
        }
        Self(raw)
    }

    /// The raw four bytes, including any zero padding.
    pub fn as_bytes(&self) -> &[u8; KEY_NAME_LEN] {
        &self.0
    }

    /// Whether no byte of the name is set.
    pub fn is_empty(&self) -> bool {
        self.0[0] == 0
    }

    /// The significant bytes (up to the first NUL).
    pub fn trimmed(&self) -> &[u8] {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(KEY_NAME_LEN);
        &self.0[..end]
    }
}

impl From<&str> for KeyName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.trimmed()))
    }
}

impl fmt::Debug for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyName(<{self}>)")
    }
}

/// The record kinds that make up a geometry tree.
///
/// Used for diagnostics and to tag allocation errors with the array
/// that failed to grow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// The root record.
    Geometry,
    /// Name/value string pair.
    Property,
    /// Color spec plus pixel.
    Color,
    /// Key alias pair.
    KeyAlias,
    /// Named outline template.
    Shape,
    /// Point list of a shape.
    Outline,
    /// Coordinate pair.
    Point,
    /// Named group of rows.
    Section,
    /// Row of keys.
    Row,
    /// Key descriptor.
    Key,
    /// Decorative element.
    Doodad,
    /// Alternate key mapping over a section.
    Overlay,
    /// Overlay row bound to a section row.
    OverlayRow,
    /// Over/under key name pair.
    OverlayKey,
}

impl RecordKind {
    /// Lowercase name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Geometry => "geometry",
            Self::Property => "property",
            Self::Color => "color",
            Self::KeyAlias => "key alias",
            Self::Shape => "shape",
            Self::Outline => "outline",
            Self::Point => "point",
            Self::Section => "section",
            Self::Row => "row",
            Self::Key => "key",
            Self::Doodad => "doodad",
            Self::Overlay => "overlay",
            Self::OverlayRow => "overlay row",
            Self::OverlayKey => "overlay key",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
