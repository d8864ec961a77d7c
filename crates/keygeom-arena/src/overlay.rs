//! Overlays: alternate key mappings layered over a section's rows.
//!
//! An [`Overlay`] belongs to the section it overlays and records that
//! section's index as `section_under`. Each [`OverlayRow`] names one row of
//! that section by index (`row_under`). Neither relation is owning: both are
//! plain indices, revalidated whenever they are followed.

use keygeom_core::{Atom, GeomError, KeyName, RecordKind};

use crate::shape::Bounds;
use crate::slots::{Record, SlotArray};

/// Replaces the key named `under` with the key named `over`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OverlayKey {
    /// Key drawn when the overlay is active.
    pub over: KeyName,
    /// Key of the underlying row being overlaid.
    pub under: KeyName,
}

impl Record for OverlayKey {
    const KIND: RecordKind = RecordKind::OverlayKey;
}

/// The overlay keys for one row of the underlying section.
#[derive(Clone, Debug, Default)]
pub struct OverlayRow {
    /// Index of the overlaid row within the section.
    pub row_under: usize,
    pub(crate) keys: SlotArray<OverlayKey>,
}

impl OverlayRow {
    /// The row's overlay keys.
    pub fn keys(&self) -> &SlotArray<OverlayKey> {
        &self.keys
    }

    /// The row's overlay keys, mutably.
    pub fn keys_mut(&mut self) -> &mut [OverlayKey] {
        self.keys.as_mut_slice()
    }

    /// Reserve room for `n` more overlay keys.
    pub fn alloc_keys(&mut self, n: usize) -> Result<(), GeomError> {
        self.keys.reserve(n)
    }

    /// Remove overlay keys `[first, first + n)`, or all of them.
    pub fn free_keys(&mut self, first: usize, n: usize, free_all: bool) {
        self.keys.free(first, n, free_all);
    }

    /// The overlay key mapped over `under`, if any.
    pub fn over_for(&self, under: KeyName) -> Option<KeyName> {
        self.keys.iter().find(|k| k.under == under).map(|k| k.over)
    }
}

impl Record for OverlayRow {
    const KIND: RecordKind = RecordKind::OverlayRow;

    fn release(&mut self) {
        self.keys.clear();
    }
}

/// A named alternate mapping over a section.
#[derive(Clone, Debug, Default)]
pub struct Overlay {
    /// Interned overlay name; the find-or-create key.
    pub name: Atom,
    /// Overall extent.
    pub bounds: Bounds,
    pub(crate) section_under: usize,
    pub(crate) rows: SlotArray<OverlayRow>,
}

impl Overlay {
    /// Index of the section this overlay lies over.
    pub fn section_under(&self) -> usize {
        self.section_under
    }

    /// The overlay's rows.
    pub fn rows(&self) -> &SlotArray<OverlayRow> {
        &self.rows
    }

    /// The overlay's rows, mutably.
    pub fn rows_mut(&mut self) -> &mut [OverlayRow] {
        self.rows.as_mut_slice()
    }

    /// Reserve room for `n` more overlay rows.
    pub fn alloc_rows(&mut self, n: usize) -> Result<(), GeomError> {
        self.rows.reserve(n)
    }

    /// Remove overlay rows `[first, first + n)`, or all of them.
    pub fn free_rows(&mut self, first: usize, n: usize, free_all: bool) {
        self.rows.free(first, n, free_all);
    }

    /// Index of the overlay row bound to section row `row_under`.
    pub fn row_index(&self, row_under: usize) -> Option<usize> {
        self.rows.position(|r| r.row_under == row_under)
    }

    /// Find-or-create the overlay row for `row_under`.
    ///
    /// The caller has already checked `row_under` against the section. An
    /// existing row whose key capacity is below `sz_keys` gets `sz_keys`
    /// more key slots.
    pub(crate) fn add_row(
        &mut self,
        row_under: usize,
        sz_keys: usize,
    ) -> Result<&mut OverlayRow, GeomError> {
        if let Some(i) = self.row_index(row_under) {
            let row = &mut self.rows[i];
            if row.keys.capacity() < sz_keys {
                row.keys.reserve(sz_keys)?;
            }
            return Ok(row);
        }
        let mut row = OverlayRow {
            row_under,
            ..Default::default()
        };
        row.keys.reserve(sz_keys)?;
        self.rows.push_with(row)
    }
}

impl Record for Overlay {
    const KIND: RecordKind = RecordKind::Overlay;

    fn release(&mut self) {
        self.rows.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_row_dedups_by_row_under() {
        let mut overlay = Overlay::default();
        overlay.add_row(2, 0).unwrap();
        overlay.add_row(0, 0).unwrap();
        overlay.add_row(2, 0).unwrap();
        assert_eq!(overlay.rows().len(), 2);
        assert_eq!(overlay.row_index(0), Some(1));
    }

    #[test]
    fn add_row_grows_keys_on_match_only_when_short() {
        let mut overlay = Overlay::default();
        overlay.add_row(1, 4).unwrap();
        let row = overlay.add_row(1, 3).unwrap();
        assert_eq!(row.keys().capacity(), 4);
        let row = overlay.add_row(1, 6).unwrap();
        assert_eq!(row.keys().capacity(), 6);
    }

    #[test]
    fn over_for_finds_mapping() {
        let mut row = OverlayRow::default();
        row.keys
            .push_with(OverlayKey {
                over: KeyName::new("KP7"),
                under: KeyName::new("AE07"),
            })
            .unwrap();
        assert_eq!(row.over_for(KeyName::new("AE07")), Some(KeyName::new("KP7")));
        assert_eq!(row.over_for(KeyName::new("AE08")), None);
    }

    #[test]
    fn release_cascades_to_keys() {
        let mut overlay = Overlay::default();
        overlay.add_row(0, 5).unwrap();
        overlay.release();
        assert!(!overlay.rows().is_allocated());
    }
}
