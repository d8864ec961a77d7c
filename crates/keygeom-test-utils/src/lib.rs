//! Test utilities for keygeom development.
//!
//! Provides a [`GeometryBuilder`] for assembling small geometry trees by
//! name, plus canned trees in [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use keygeom_arena::{Geometry, Point};
use keygeom_core::{Atom, AtomTable, GeomError, KeyName};

/// Key name for column `col` of row `row`: `R` + row letter + two digits.
///
/// Rows wrap after 26 and columns after 100, so keep fixtures below that
/// when names must be unique.
pub fn key_name(row: usize, col: usize) -> KeyName {
    let letter = char::from(b'A' + (row % 26) as u8);
    KeyName::new(&format!("R{letter}{:02}", col % 100))
}

/// Builder for geometry trees with interned names.
///
/// Names passed to the builder are interned into its own [`AtomTable`],
/// returned alongside the geometry from [`build`](GeometryBuilder::build).
pub struct GeometryBuilder {
    atoms: AtomTable,
    geom: Geometry,
}

impl GeometryBuilder {
    pub fn new(name: &str) -> Self {
        let mut atoms = AtomTable::new();
        let mut geom = Geometry::new();
        geom.name = atoms.intern(name);
        Self { atoms, geom }
    }

    /// Intern `name` in the builder's table.
    pub fn atom(&mut self, name: &str) -> Atom {
        self.atoms.intern(name)
    }

    /// Add a rectangular shape `width` by `height` with a single outline.
    pub fn shape(mut self, name: &str, width: i16, height: i16) -> Result<Self, GeomError> {
        let atom = self.atoms.intern(name);
        let shape = self.geom.add_shape(atom, 1)?;
        shape.add_outline(1)?.add_point(Point::new(width, height))?;
        shape.set_primary(0)?;
        shape.compute_bounds();
        Ok(self)
    }

    /// Add a section of `rows` rows with `keys` keys each, named with
    /// [`key_name`]. Every key uses shape 0.
    pub fn section(mut self, name: &str, rows: usize, keys: usize) -> Result<Self, GeomError> {
        let atom = self.atoms.intern(name);
        let section = self.geom.add_section(atom, rows, 0, 0)?;
        for r in 0..rows {
            let row = section.add_row(keys)?;
            row.top = i16::try_from(r * 20).unwrap_or(i16::MAX);
            for k in 0..keys {
                row.add_key()?.name = key_name(r, k);
            }
        }
        Ok(self)
    }

    /// Overlay row `row` of section `section` so that each `(over, under)`
    /// pair maps `under` to `over`.
    pub fn overlay(
        mut self,
        section: &str,
        name: &str,
        row: usize,
        pairs: &[(&str, &str)],
    ) -> Result<Self, GeomError> {
        let section_atom = self.atoms.intern(section);
        let overlay_atom = self.atoms.intern(name);
        let Some(s) = self.geom.section_index(section_atom) else {
            return Err(GeomError::MissingName {
                kind: keygeom_core::RecordKind::Section,
            });
        };
        self.geom.add_overlay(s, overlay_atom, 1)?;
        let o = self
            .geom
            .section(s)?
            .overlay_index(overlay_atom)
            .unwrap_or_default();
        self.geom.add_overlay_row(s, o, row, pairs.len())?;
        let orow = self.geom.section(s)?.overlays()[o]
            .row_index(row)
            .unwrap_or_default();
        for (over, under) in pairs {
            self.geom
                .add_overlay_key(s, o, orow, KeyName::new(over), KeyName::new(under))?;
        }
        Ok(self)
    }

    /// Set a property.
    pub fn property(mut self, name: &str, value: &str) -> Result<Self, GeomError> {
        self.geom.add_property(name, value)?;
        Ok(self)
    }

    /// Add a color.
    pub fn color(mut self, spec: &str, pixel: u32) -> Result<Self, GeomError> {
        self.geom.add_color(spec, pixel)?;
        Ok(self)
    }

    pub fn build(self) -> (Geometry, AtomTable) {
        (self.geom, self.atoms)
    }
}
