//! Sections, their rows, and keys.
//!
//! A [`Section`] owns three arrays: rows of keys, section-local doodads, and
//! overlays. Overlays reach back into the rows by index, so every operation
//! that follows an overlay row checks `row_under` against the rows as they
//! are now, not as they were when the overlay row was created.

use keygeom_core::{Atom, GeomError, KeyName, RecordKind};

use crate::doodad::{self, Doodad};
use crate::overlay::{Overlay, OverlayKey, OverlayRow};
use crate::shape::{Bounds, Shape};
use crate::slots::{Record, SlotArray};

/// A physical key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Key {
    /// Key name, e.g. `AE01`.
    pub name: KeyName,
    /// Space before this key along the row.
    pub gap: i16,
    /// Index into the geometry shapes.
    pub shape_ndx: u8,
    /// Index into the geometry colors.
    pub color_ndx: u8,
}

impl Record for Key {
    const KIND: RecordKind = RecordKind::Key;
}

/// A row of keys laid out left to right (or top to bottom).
#[derive(Clone, Debug, Default)]
pub struct Row {
    /// Vertical offset within the section.
    pub top: i16,
    /// Horizontal offset within the section.
    pub left: i16,
    /// Keys run downward instead of rightward.
    pub vertical: bool,
    /// Extent, refreshed by [`Geometry::compute_row_bounds`](crate::Geometry::compute_row_bounds).
    pub bounds: Bounds,
    pub(crate) keys: SlotArray<Key>,
}

impl Row {
    /// The row's keys.
    pub fn keys(&self) -> &SlotArray<Key> {
        &self.keys
    }

    /// The row's keys, mutably.
    pub fn keys_mut(&mut self) -> &mut [Key] {
        self.keys.as_mut_slice()
    }

    /// Reserve room for `n` more keys.
    pub fn alloc_keys(&mut self, n: usize) -> Result<(), GeomError> {
        self.keys.reserve(n)
    }

    /// Remove keys `[first, first + n)`, or all of them.
    pub fn free_keys(&mut self, first: usize, n: usize, free_all: bool) {
        self.keys.free(first, n, free_all);
    }

    /// Append an empty key.
    ///
    /// A row already holding [`MAX_SLOTS`](crate::MAX_SLOTS) keys cannot
    /// grow; the failure empties it.
    pub fn add_key(&mut self) -> Result<&mut Key, GeomError> {
        self.keys.push()
    }

    /// Index of the key called `name`.
    pub fn find_key(&self, name: KeyName) -> Option<usize> {
        self.keys.position(|k| k.name == name)
    }

    /// Recompute [`bounds`](Self::bounds) by walking the keys in order.
    ///
    /// Each key advances the pen by its gap, then by its shape's width (or
    /// height for vertical rows). Shapes are looked up in `shapes`.
    pub fn compute_bounds(&mut self, shapes: &[Shape]) -> Result<Bounds, GeomError> {
        let mut bounds = Bounds::default();
        let mut pos: i16 = 0;
        for key in &self.keys {
            let shape = shapes
                .get(usize::from(key.shape_ndx))
                .ok_or(GeomError::IndexOutOfRange {
                    kind: RecordKind::Shape,
                    index: usize::from(key.shape_ndx),
                    len: shapes.len(),
                })?;
            let sb = shape.bounds;
            if self.vertical {
                bounds.include(0, pos);
                if key.gap != 0 {
                    pos = pos.saturating_add(key.gap);
                    bounds.include(0, pos);
                }
                bounds.include(sb.x1, pos.saturating_add(sb.y1));
                bounds.include(sb.x2, pos.saturating_add(sb.y2));
                pos = pos.saturating_add(sb.y2);
            } else {
                bounds.include(pos, 0);
                if key.gap != 0 {
                    pos = pos.saturating_add(key.gap);
                    bounds.include(pos, 0);
                }
                bounds.include(pos.saturating_add(sb.x1), sb.y1);
                bounds.include(pos.saturating_add(sb.x2), sb.y2);
                pos = pos.saturating_add(sb.x2);
            }
        }
        self.bounds = bounds;
        Ok(bounds)
    }
}

impl Record for Row {
    const KIND: RecordKind = RecordKind::Row;

    fn release(&mut self) {
        self.keys.clear();
    }
}

/// A named physical grouping of rows, e.g. the keypad.
#[derive(Clone, Debug, Default)]
pub struct Section {
    /// Interned section name; the find-or-create key.
    pub name: Atom,
    /// Drawing order.
    pub priority: u8,
    /// Vertical position.
    pub top: i16,
    /// Horizontal position.
    pub left: i16,
    /// Width.
    pub width: u16,
    /// Height.
    pub height: u16,
    /// Rotation in tenths of a degree.
    pub angle: i16,
    /// Extent of the section's rows.
    pub bounds: Bounds,
    pub(crate) rows: SlotArray<Row>,
    pub(crate) doodads: SlotArray<Doodad>,
    pub(crate) overlays: SlotArray<Overlay>,
}

impl Section {
    /// The section's rows.
    pub fn rows(&self) -> &SlotArray<Row> {
        &self.rows
    }

    /// The section's rows, mutably.
    pub fn rows_mut(&mut self) -> &mut [Row] {
        self.rows.as_mut_slice()
    }

    /// The section's own doodads.
    pub fn doodads(&self) -> &SlotArray<Doodad> {
        &self.doodads
    }

    /// The section's own doodads, mutably.
    pub fn doodads_mut(&mut self) -> &mut [Doodad] {
        self.doodads.as_mut_slice()
    }

    /// The section's overlays.
    pub fn overlays(&self) -> &SlotArray<Overlay> {
        &self.overlays
    }

    /// The section's overlays, mutably.
    pub fn overlays_mut(&mut self) -> &mut [Overlay] {
        self.overlays.as_mut_slice()
    }

    /// Reserve room for `n` more rows.
    pub fn alloc_rows(&mut self, n: usize) -> Result<(), GeomError> {
        self.rows.reserve(n)
    }

    /// Reserve room for `n` more section doodads.
    pub fn alloc_doodads(&mut self, n: usize) -> Result<(), GeomError> {
        self.doodads.reserve(n)
    }

    /// Reserve room for `n` more overlays.
    pub fn alloc_overlays(&mut self, n: usize) -> Result<(), GeomError> {
        self.overlays.reserve(n)
    }

    /// Remove rows `[first, first + n)`, or all of them.
    ///
    /// Overlay rows keep their `row_under`; followers revalidate it.
    pub fn free_rows(&mut self, first: usize, n: usize, free_all: bool) {
        self.rows.free(first, n, free_all);
    }

    /// Remove section doodads `[first, first + n)`, or all of them.
    pub fn free_doodads(&mut self, first: usize, n: usize, free_all: bool) {
        self.doodads.free(first, n, free_all);
    }

    /// Remove overlays `[first, first + n)`, or all of them.
    pub fn free_overlays(&mut self, first: usize, n: usize, free_all: bool) {
        self.overlays.free(first, n, free_all);
    }

    /// Append a row with room for `sz_keys` keys.
    ///
    /// If the key reservation fails no row is appended. If the rows
    /// themselves cannot grow, every row is dropped.
    pub fn add_row(&mut self, sz_keys: usize) -> Result<&mut Row, GeomError> {
        let mut row = Row::default();
        row.alloc_keys(sz_keys)?;
        self.rows.push_with(row)
    }

    /// Find-or-create the section doodad called `name`.
    pub fn add_doodad(&mut self, name: Atom) -> Result<&mut Doodad, GeomError> {
        doodad::find_or_add(&mut self.doodads, name)
    }

    /// Index of the overlay called `name`.
    pub fn overlay_index(&self, name: Atom) -> Option<usize> {
        self.overlays.position(|o| o.name == name)
    }

    /// Find-or-create the overlay called `name`, recording `section_under`.
    ///
    /// An existing overlay gets `sz_rows` more row slots.
    pub(crate) fn add_overlay(
        &mut self,
        section_under: usize,
        name: Atom,
        sz_rows: usize,
    ) -> Result<&mut Overlay, GeomError> {
        if name.is_none() {
            return Err(GeomError::MissingName {
                kind: RecordKind::Overlay,
            });
        }
        if sz_rows == 0 {
            return Err(GeomError::EmptyOverlay);
        }
        if let Some(i) = self.overlay_index(name) {
            log::debug!("overlay {name} found at {i}; reserving {sz_rows} rows");
            let overlay = &mut self.overlays[i];
            overlay.rows.reserve(sz_rows)?;
            return Ok(overlay);
        }
        let mut overlay = Overlay {
            name,
            section_under,
            ..Default::default()
        };
        overlay.rows.reserve(sz_rows)?;
        self.overlays.push_with(overlay)
    }

    /// Find-or-create the row of overlay `overlay` bound to row `row_under`.
    ///
    /// Fails if `row_under` is not a row of this section.
    pub fn add_overlay_row(
        &mut self,
        overlay: usize,
        row_under: usize,
        sz_keys: usize,
    ) -> Result<&mut OverlayRow, GeomError> {
        let rows = self.rows.len();
        if row_under >= rows {
            return Err(GeomError::RowUnderOutOfRange { row_under, rows });
        }
        let len = self.overlays.len();
        self.overlays
            .get_mut(overlay)
            .ok_or(GeomError::IndexOutOfRange {
                kind: RecordKind::Overlay,
                index: overlay,
                len,
            })?
            .add_row(row_under, sz_keys)
    }

    /// The section row that row `row` of overlay `overlay` lies over.
    ///
    /// Revalidates `row_under` against the current rows.
    pub fn overlay_row_target(&self, overlay: usize, row: usize) -> Result<&Row, GeomError> {
        let overlay = self
            .overlays
            .get(overlay)
            .ok_or(GeomError::IndexOutOfRange {
                kind: RecordKind::Overlay,
                index: overlay,
                len: self.overlays.len(),
            })?;
        let orow = overlay.rows.get(row).ok_or(GeomError::IndexOutOfRange {
            kind: RecordKind::OverlayRow,
            index: row,
            len: overlay.rows.len(),
        })?;
        self.rows
            .get(orow.row_under)
            .ok_or(GeomError::RowUnderOutOfRange {
                row_under: orow.row_under,
                rows: self.rows.len(),
            })
    }

    /// Append an overlay key to row `row` of overlay `overlay`.
    ///
    /// `under` must name a key currently in the section row the overlay row
    /// lies over; otherwise nothing is appended.
    pub fn add_overlay_key(
        &mut self,
        overlay: usize,
        row: usize,
        over: KeyName,
        under: KeyName,
    ) -> Result<&mut OverlayKey, GeomError> {
        let target = self.overlay_row_target(overlay, row)?;
        if target.find_key(under).is_none() {
            log::warn!("overlay key <{over}> rejected: <{under}> is not in the row under it");
            return Err(GeomError::UnknownUnderKey { under });
        }
        // Both indices were just validated.
        let orow = &mut self.overlays[overlay].rows[row];
        orow.keys.push_with(OverlayKey { over, under })
    }

    /// The key drawn over `under` by any overlay of this section.
    pub fn find_overlay_for_key(&self, under: KeyName) -> Option<KeyName> {
        self.overlays
            .iter()
            .flat_map(|o| o.rows.iter())
            .find_map(|r| r.over_for(under))
    }

    /// Recompute [`bounds`](Self::bounds) from the rows' own bounds.
    ///
    /// Row bounds should be current; see [`Row::compute_bounds`].
    pub fn compute_bounds(&mut self) -> Bounds {
        let mut bounds = Bounds::INVERTED;
        for row in &self.rows {
            let rb = row.bounds;
            bounds.include(row.left.saturating_add(rb.x1), row.top.saturating_add(rb.y1));
            bounds.include(row.left.saturating_add(rb.x2), row.top.saturating_add(rb.y2));
        }
        if self.rows.is_empty() {
            bounds = Bounds::default();
        }
        self.bounds = bounds;
        bounds
    }
}

impl Record for Section {
    const KIND: RecordKind = RecordKind::Section;

    fn release(&mut self) {
        self.rows.clear();
        self.doodads.clear();
        self.overlays.clear();
    }
}
