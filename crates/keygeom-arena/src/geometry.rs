//! The geometry root and its whole-tree operations.
//!
//! A [`Geometry`] owns six top-level collections. Everything below it is
//! reached through those collections, so dropping or clearing a collection
//! releases its entire subtree.
//!
//! Two cross-references live at this level and are kept valid by the
//! operations that compact their targets:
//!
//! - `label_color`/`base_color` index `colors`; removing colors shifts or
//!   forgets them.
//! - every overlay's `section_under` indexes `sections`; removing sections
//!   re-stamps the survivors.

use keygeom_core::{Atom, GeomError, KeyName, RecordKind};

use crate::config::{GeomParts, GeometrySizes};
use crate::doodad::{self, Doodad};
use crate::overlay::{Overlay, OverlayKey, OverlayRow};
use crate::section::Section;
use crate::shape::{shift_after_removal, Bounds, Shape};
use crate::slots::SlotArray;
use crate::table::{Color, KeyAlias, Property};

/// Root of a keyboard geometry tree.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    /// Interned geometry name.
    pub name: Atom,
    /// Physical width in millimetres.
    pub width_mm: u16,
    /// Physical height in millimetres.
    pub height_mm: u16,
    /// Font used for key labels.
    pub label_font: Option<String>,
    label_color: Option<usize>,
    base_color: Option<usize>,
    pub(crate) properties: SlotArray<Property>,
    pub(crate) colors: SlotArray<Color>,
    pub(crate) shapes: SlotArray<Shape>,
    pub(crate) sections: SlotArray<Section>,
    pub(crate) doodads: SlotArray<Doodad>,
    pub(crate) key_aliases: SlotArray<KeyAlias>,
}

impl Geometry {
    /// Create an empty geometry with no buffers.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Name/value properties.
    pub fn properties(&self) -> &SlotArray<Property> {
        &self.properties
    }

    /// Named colors.
    pub fn colors(&self) -> &SlotArray<Color> {
        &self.colors
    }

    /// Shape templates.
    pub fn shapes(&self) -> &SlotArray<Shape> {
        &self.shapes
    }

    /// Shape templates, mutably.
    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        self.shapes.as_mut_slice()
    }

    /// Sections.
    pub fn sections(&self) -> &SlotArray<Section> {
        &self.sections
    }

    /// Sections, mutably.
    ///
    /// Reordering sections through this slice leaves their overlays'
    /// `section_under` behind; the overlay entry points report that as
    /// [`GeomError::StaleRelation`].
    pub fn sections_mut(&mut self) -> &mut [Section] {
        self.sections.as_mut_slice()
    }

    /// Geometry-level doodads.
    pub fn doodads(&self) -> &SlotArray<Doodad> {
        &self.doodads
    }

    /// Geometry-level doodads, mutably.
    pub fn doodads_mut(&mut self) -> &mut [Doodad] {
        self.doodads.as_mut_slice()
    }

    /// Key aliases.
    pub fn key_aliases(&self) -> &SlotArray<KeyAlias> {
        &self.key_aliases
    }

    /// The section at `index`.
    pub fn section(&self, index: usize) -> Result<&Section, GeomError> {
        self.sections.get(index).ok_or(GeomError::IndexOutOfRange {
            kind: RecordKind::Section,
            index,
            len: self.sections.len(),
        })
    }

    /// The section at `index`, mutably.
    pub fn section_mut(&mut self, index: usize) -> Result<&mut Section, GeomError> {
        let len = self.sections.len();
        self.sections
            .get_mut(index)
            .ok_or(GeomError::IndexOutOfRange {
                kind: RecordKind::Section,
                index,
                len,
            })
    }

    // ── Lookup ──────────────────────────────────────────────────

    /// Value of the property called `name`.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    /// Index of the color with spec `spec`.
    pub fn color_index(&self, spec: &str) -> Option<usize> {
        self.colors.position(|c| c.spec == spec)
    }

    /// Index of the shape called `name`.
    pub fn shape_index(&self, name: Atom) -> Option<usize> {
        self.shapes.position(|s| s.name == name)
    }

    /// Index of the section called `name`.
    pub fn section_index(&self, name: Atom) -> Option<usize> {
        self.sections.position(|s| s.name == name)
    }

    /// The real key name behind `alias`, if it is an alias.
    pub fn resolve_alias(&self, alias: KeyName) -> Option<KeyName> {
        self.key_aliases
            .iter()
            .find(|a| a.alias == alias)
            .map(|a| a.real)
    }

    /// The key drawn over `under` by any overlay of section `section`.
    pub fn find_overlay_for_key(&self, section: usize, under: KeyName) -> Option<KeyName> {
        self.sections.get(section)?.find_overlay_for_key(under)
    }

    // ── Label and base colors ───────────────────────────────────

    /// The color used for key labels.
    pub fn label_color(&self) -> Option<&Color> {
        self.colors.get(self.label_color?)
    }

    /// The keyboard base color.
    pub fn base_color(&self) -> Option<&Color> {
        self.colors.get(self.base_color?)
    }

    /// Index of the label color.
    pub fn label_color_index(&self) -> Option<usize> {
        self.label_color
    }

    /// Index of the base color.
    pub fn base_color_index(&self) -> Option<usize> {
        self.base_color
    }

    /// Use color `index` for key labels.
    pub fn set_label_color(&mut self, index: usize) -> Result<(), GeomError> {
        self.label_color = Some(self.check_color(index)?);
        Ok(())
    }

    /// Use color `index` as the base color.
    pub fn set_base_color(&mut self, index: usize) -> Result<(), GeomError> {
        self.base_color = Some(self.check_color(index)?);
        Ok(())
    }

    fn check_color(&self, index: usize) -> Result<usize, GeomError> {
        if index < self.colors.len() {
            Ok(index)
        } else {
            Err(GeomError::IndexOutOfRange {
                kind: RecordKind::Color,
                index,
                len: self.colors.len(),
            })
        }
    }

    // ── Allocate ────────────────────────────────────────────────

    /// Reserve room for `n` more properties.
    pub fn alloc_properties(&mut self, n: usize) -> Result<(), GeomError> {
        self.properties.reserve(n)
    }

    /// Reserve room for `n` more colors.
    pub fn alloc_colors(&mut self, n: usize) -> Result<(), GeomError> {
        let result = self.colors.reserve(n);
        if result.is_err() {
            // The array was reset; nothing is left to index.
            self.label_color = None;
            self.base_color = None;
        }
        result
    }

    /// Reserve room for `n` more shapes.
    pub fn alloc_shapes(&mut self, n: usize) -> Result<(), GeomError> {
        self.shapes.reserve(n)
    }

    /// Reserve room for `n` more sections.
    pub fn alloc_sections(&mut self, n: usize) -> Result<(), GeomError> {
        self.sections.reserve(n)
    }

    /// Reserve room for `n` more geometry-level doodads.
    pub fn alloc_doodads(&mut self, n: usize) -> Result<(), GeomError> {
        self.doodads.reserve(n)
    }

    /// Reserve room for `n` more key aliases.
    pub fn alloc_key_aliases(&mut self, n: usize) -> Result<(), GeomError> {
        self.key_aliases.reserve(n)
    }

    fn reserve(&mut self, sizes: &GeometrySizes) -> Result<(), GeomError> {
        self.alloc_properties(sizes.count_for(GeomParts::PROPERTIES))?;
        self.alloc_colors(sizes.count_for(GeomParts::COLORS))?;
        self.alloc_shapes(sizes.count_for(GeomParts::SHAPES))?;
        self.alloc_sections(sizes.count_for(GeomParts::SECTIONS))?;
        self.alloc_doodads(sizes.count_for(GeomParts::DOODADS))?;
        self.alloc_key_aliases(sizes.count_for(GeomParts::KEY_ALIASES))?;
        Ok(())
    }

    // ── Free ────────────────────────────────────────────────────

    /// Remove properties `[first, first + n)`, or all of them.
    pub fn free_properties(&mut self, first: usize, n: usize, free_all: bool) {
        self.properties.free(first, n, free_all);
    }

    /// Remove colors `[first, first + n)`, or all of them.
    ///
    /// The label and base color indices follow the compaction.
    pub fn free_colors(&mut self, first: usize, n: usize, free_all: bool) {
        let len = self.colors.len();
        if free_all {
            self.label_color = None;
            self.base_color = None;
        } else if first < len && n > 0 {
            let n = n.min(len - first);
            self.label_color = shift_after_removal(self.label_color, first, n);
            self.base_color = shift_after_removal(self.base_color, first, n);
        }
        self.colors.free(first, n, free_all);
    }

    /// Remove shapes `[first, first + n)`, or all of them.
    pub fn free_shapes(&mut self, first: usize, n: usize, free_all: bool) {
        self.shapes.free(first, n, free_all);
    }

    /// Remove sections `[first, first + n)`, or all of them.
    ///
    /// Surviving overlays are re-stamped with their section's new index.
    pub fn free_sections(&mut self, first: usize, n: usize, free_all: bool) {
        self.sections.free(first, n, free_all);
        if free_all {
            return;
        }
        for (index, section) in self.sections.iter_mut().enumerate() {
            for overlay in section.overlays.iter_mut() {
                overlay.section_under = index;
            }
        }
    }

    /// Remove geometry-level doodads `[first, first + n)`, or all of them.
    pub fn free_doodads(&mut self, first: usize, n: usize, free_all: bool) {
        self.doodads.free(first, n, free_all);
    }

    /// Remove key aliases `[first, first + n)`, or all of them.
    pub fn free_key_aliases(&mut self, first: usize, n: usize, free_all: bool) {
        self.key_aliases.free(first, n, free_all);
    }

    /// Clear every collection selected by `which`, independently.
    pub fn free_parts(&mut self, which: GeomParts) {
        if which.contains(GeomParts::PROPERTIES) {
            self.free_properties(0, 0, true);
        }
        if which.contains(GeomParts::COLORS) {
            self.free_colors(0, 0, true);
        }
        if which.contains(GeomParts::SHAPES) {
            self.free_shapes(0, 0, true);
        }
        if which.contains(GeomParts::SECTIONS) {
            self.free_sections(0, 0, true);
        }
        if which.contains(GeomParts::DOODADS) {
            self.free_doodads(0, 0, true);
        }
        if which.contains(GeomParts::KEY_ALIASES) {
            self.free_key_aliases(0, 0, true);
        }
    }

    // ── Find-or-create ──────────────────────────────────────────

    /// Set property `name` to `value`, creating it if absent.
    ///
    /// The empty string is a valid name.
    pub fn add_property(&mut self, name: &str, value: &str) -> Result<&mut Property, GeomError> {
        if let Some(i) = self.properties.position(|p| p.name == name) {
            log::debug!("property {name:?} updated at {i}");
            let prop = &mut self.properties[i];
            prop.value = value.to_owned();
            return Ok(prop);
        }
        self.properties.push_with(Property {
            name: name.to_owned(),
            value: value.to_owned(),
        })
    }

    /// Set the pixel of color `spec`, creating it if absent.
    ///
    /// The empty string is a valid spec.
    pub fn add_color(&mut self, spec: &str, pixel: u32) -> Result<&mut Color, GeomError> {
        if let Some(i) = self.color_index(spec) {
            log::debug!("color {spec:?} updated at {i}");
            let color = &mut self.colors[i];
            color.pixel = pixel;
            return Ok(color);
        }
        let pushed = self.colors.push_with(Color {
            spec: spec.to_owned(),
            pixel,
        });
        if pushed.is_err() {
            self.label_color = None;
            self.base_color = None;
        }
        pushed
    }

    /// Map `alias` onto `real`, overwriting an existing mapping.
    pub fn add_key_alias(
        &mut self,
        alias: KeyName,
        real: KeyName,
    ) -> Result<&mut KeyAlias, GeomError> {
        if alias.is_empty() || real.is_empty() {
            return Err(GeomError::MissingName {
                kind: RecordKind::KeyAlias,
            });
        }
        if let Some(i) = self.key_aliases.position(|a| a.alias == alias) {
            log::debug!("key alias <{alias}> remapped to <{real}>");
            let entry = &mut self.key_aliases[i];
            entry.real = real;
            return Ok(entry);
        }
        self.key_aliases.push_with(KeyAlias { alias, real })
    }

    /// Find the shape called `name`, or create it with room for
    /// `sz_outlines` outlines.
    ///
    /// An existing shape is returned as is.
    pub fn add_shape(&mut self, name: Atom, sz_outlines: usize) -> Result<&mut Shape, GeomError> {
        if name.is_none() {
            return Err(GeomError::MissingName {
                kind: RecordKind::Shape,
            });
        }
        if let Some(i) = self.shape_index(name) {
            log::debug!("shape {name} already present at {i}");
            return Ok(&mut self.shapes[i]);
        }
        let mut shape = Shape::new(name);
        shape.alloc_outlines(sz_outlines)?;
        self.shapes.push_with(shape)
    }

    /// Find the section called `name`, or create it.
    ///
    /// Either way the section ends up with room for `sz_rows` more rows,
    /// `sz_doodads` more doodads, and `sz_overlays` more overlays.
    pub fn add_section(
        &mut self,
        name: Atom,
        sz_rows: usize,
        sz_doodads: usize,
        sz_overlays: usize,
    ) -> Result<&mut Section, GeomError> {
        if name.is_none() {
            return Err(GeomError::MissingName {
                kind: RecordKind::Section,
            });
        }
        if let Some(i) = self.section_index(name) {
            log::debug!("section {name} found at {i}; growing in place");
            let section = &mut self.sections[i];
            section.alloc_rows(sz_rows)?;
            section.alloc_doodads(sz_doodads)?;
            section.alloc_overlays(sz_overlays)?;
            return Ok(section);
        }
        let mut section = Section {
            name,
            ..Default::default()
        };
        section.alloc_rows(sz_rows)?;
        section.alloc_doodads(sz_doodads)?;
        section.alloc_overlays(sz_overlays)?;
        self.sections.push_with(section)
    }

    /// Find-or-create the doodad called `name`.
    ///
    /// With `section` set the lookup is confined to that section's doodads;
    /// otherwise to the geometry-level ones.
    pub fn add_doodad(
        &mut self,
        section: Option<usize>,
        name: Atom,
    ) -> Result<&mut Doodad, GeomError> {
        match section {
            Some(index) => self.section_mut(index)?.add_doodad(name),
            None => doodad::find_or_add(&mut self.doodads, name),
        }
    }

    /// Find-or-create overlay `name` over section `section`.
    ///
    /// `sz_rows` must be at least one.
    pub fn add_overlay(
        &mut self,
        section: usize,
        name: Atom,
        sz_rows: usize,
    ) -> Result<&mut Overlay, GeomError> {
        self.section_mut(section)?.add_overlay(section, name, sz_rows)
    }

    /// Find-or-create the row of overlay `overlay` (in section `section`)
    /// bound to section row `row_under`.
    pub fn add_overlay_row(
        &mut self,
        section: usize,
        overlay: usize,
        row_under: usize,
        sz_keys: usize,
    ) -> Result<&mut OverlayRow, GeomError> {
        self.overlay_owner(section, overlay)?
            .add_overlay_row(overlay, row_under, sz_keys)
    }

    /// Append overlay key `over` for `under` to row `row` of overlay
    /// `overlay` in section `section`.
    ///
    /// Fails with [`GeomError::UnknownUnderKey`] unless `under` names a key
    /// of the section row the overlay row lies over.
    pub fn add_overlay_key(
        &mut self,
        section: usize,
        overlay: usize,
        row: usize,
        over: KeyName,
        under: KeyName,
    ) -> Result<&mut OverlayKey, GeomError> {
        self.overlay_owner(section, overlay)?
            .add_overlay_key(overlay, row, over, under)
    }

    /// The section holding overlay `overlay`, checked to be the one the
    /// overlay lies over.
    fn overlay_owner(&mut self, section: usize, overlay: usize) -> Result<&mut Section, GeomError> {
        let owner = self.section_mut(section)?;
        let len = owner.overlays.len();
        let section_under = owner
            .overlays
            .get(overlay)
            .ok_or(GeomError::IndexOutOfRange {
                kind: RecordKind::Overlay,
                index: overlay,
                len,
            })?
            .section_under;
        if section_under != section {
            log::warn!("overlay {overlay} in section {section} points at section {section_under}");
            return Err(GeomError::StaleRelation {
                section,
                section_under,
            });
        }
        Ok(owner)
    }

    // ── Bounds ──────────────────────────────────────────────────

    /// Recompute the bounds of every row of section `section`, then of the
    /// section itself.
    pub fn compute_row_bounds(&mut self, section: usize) -> Result<Bounds, GeomError> {
        let len = self.sections.len();
        let shapes = self.shapes.as_slice();
        let target = self
            .sections
            .get_mut(section)
            .ok_or(GeomError::IndexOutOfRange {
                kind: RecordKind::Section,
                index: section,
                len,
            })?;
        for row in target.rows.iter_mut() {
            row.compute_bounds(shapes)?;
        }
        Ok(target.compute_bounds())
    }
}

/// Tear down the parts of `*slot` selected by `which`.
///
/// With `free_map` set every part is cleared regardless of `which`, the
/// label font is dropped, and the geometry record itself is reclaimed,
/// leaving `None`. Does nothing if `*slot` is `None`.
pub fn free_geometry(slot: &mut Option<Geometry>, which: GeomParts, free_map: bool) {
    let Some(geom) = slot.as_mut() else {
        return;
    };
    let which = if free_map { GeomParts::ALL } else { which };
    geom.free_parts(which);
    if free_map {
        geom.label_font = None;
        *slot = None;
        log::trace!("geometry freed");
    }
}

/// Create `*slot` if absent and reserve each collection `sizes` selects.
///
/// On failure the whole geometry is torn down and `*slot` is `None`.
pub fn alloc_geometry<'a>(
    slot: &'a mut Option<Geometry>,
    sizes: &GeometrySizes,
) -> Result<&'a mut Geometry, GeomError> {
    let reserved = slot.get_or_insert_with(Geometry::default).reserve(sizes);
    if let Err(err) = reserved {
        free_geometry(slot, GeomParts::ALL, true);
        return Err(err);
    }
    Ok(slot.get_or_insert_with(Geometry::default))
}
