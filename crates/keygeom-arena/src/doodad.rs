//! Doodads: decorative, non-key elements of a layout.
//!
//! A doodad lives either in the geometry's own doodad array or in a
//! section's, never both. Its payload is a closed set of variants; only the
//! text and logo variants own strings, so only they have anything to
//! release.

use keygeom_core::{Atom, GeomError, RecordKind};

use crate::slots::{Record, SlotArray};

/// Payload of an outline or solid doodad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShapeDoodad {
    /// Index into the geometry colors.
    pub color_ndx: u16,
    /// Index into the geometry shapes.
    pub shape_ndx: u16,
}

/// Payload of a text doodad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextDoodad {
    /// Box width.
    pub width: i16,
    /// Box height.
    pub height: i16,
    /// Index into the geometry colors.
    pub color_ndx: u16,
    /// The label text.
    pub text: String,
    /// Font used to draw the text.
    pub font: String,
}

/// Payload of an indicator (LED) doodad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndicatorDoodad {
    /// Index into the geometry shapes.
    pub shape_ndx: u16,
    /// Color when lit.
    pub on_color_ndx: u16,
    /// Color when dark.
    pub off_color_ndx: u16,
}

/// Payload of a logo doodad.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogoDoodad {
    /// Index into the geometry colors.
    pub color_ndx: u16,
    /// Index into the geometry shapes.
    pub shape_ndx: u16,
    /// Name of the logo to draw.
    pub logo_name: String,
}

/// What a doodad draws.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DoodadKind {
    /// Freshly reserved, not yet typed.
    #[default]
    None,
    /// Shape outline.
    Outline(ShapeDoodad),
    /// Filled shape.
    Solid(ShapeDoodad),
    /// Text label.
    Text(TextDoodad),
    /// Indicator light.
    Indicator(IndicatorDoodad),
    /// Vendor logo.
    Logo(LogoDoodad),
}

impl DoodadKind {
    /// The XKB doodad type code (0 when untyped).
    pub fn type_code(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Outline(_) => 1,
            Self::Solid(_) => 2,
            Self::Text(_) => 3,
            Self::Indicator(_) => 4,
            Self::Logo(_) => 5,
        }
    }
}

/// A decorative element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doodad {
    /// Interned name; unique within the owning array.
    pub name: Atom,
    /// Drawing order.
    pub priority: u8,
    /// Vertical position.
    pub top: i16,
    /// Horizontal position.
    pub left: i16,
    /// Rotation in tenths of a degree.
    pub angle: i16,
    /// Type-specific payload.
    pub kind: DoodadKind,
}

impl Record for Doodad {
    const KIND: RecordKind = RecordKind::Doodad;

    fn release(&mut self) {
        match &mut self.kind {
            DoodadKind::Text(text) => {
                text.text = String::new();
                text.font = String::new();
            }
            DoodadKind::Logo(logo) => logo.logo_name = String::new(),
            DoodadKind::None
            | DoodadKind::Outline(_)
            | DoodadKind::Solid(_)
            | DoodadKind::Indicator(_) => {}
        }
    }
}

/// Find the doodad called `name` in `doodads`, appending a new one if absent.
pub(crate) fn find_or_add(
    doodads: &mut SlotArray<Doodad>,
    name: Atom,
) -> Result<&mut Doodad, GeomError> {
    if name.is_none() {
        return Err(GeomError::MissingName {
            kind: RecordKind::Doodad,
        });
    }
    if let Some(i) = doodads.position(|d| d.name == name) {
        log::debug!("doodad {name} already present at {i}");
        return Ok(&mut doodads[i]);
    }
    doodads.push_with(Doodad {
        name,
        ..Default::default()
    })
}
