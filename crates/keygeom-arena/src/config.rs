//! Geometry sizing configuration.

bitflags::bitflags! {
    /// Selects the top-level collections of a [`Geometry`](crate::Geometry).
    ///
    /// Bit values match the XKB geometry masks so they can be taken straight
    /// from a decoded `which` field.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GeomParts: u8 {
        /// Name/value properties.
        const PROPERTIES = 1 << 0;
        /// Named colors.
        const COLORS = 1 << 1;
        /// Shape templates.
        const SHAPES = 1 << 2;
        /// Sections (and everything they own).
        const SECTIONS = 1 << 3;
        /// Geometry-level doodads.
        const DOODADS = 1 << 4;
        /// Key aliases.
        const KEY_ALIASES = 1 << 5;
        /// Every collection.
        const ALL = 0x3f;
    }
}

/// Up-front reservation sizes for a geometry.
///
/// Consumed by [`alloc_geometry`](crate::alloc_geometry). Only the counts
/// whose part is selected in `which` are reserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeometrySizes {
    /// Which counts below are meaningful.
    pub which: GeomParts,
    /// Properties to reserve.
    pub num_properties: usize,
    /// Colors to reserve.
    pub num_colors: usize,
    /// Shapes to reserve.
    pub num_shapes: usize,
    /// Sections to reserve.
    pub num_sections: usize,
    /// Geometry-level doodads to reserve.
    pub num_doodads: usize,
    /// Key aliases to reserve.
    pub num_key_aliases: usize,
}

impl GeometrySizes {
    /// Sizes selecting nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `parts` and set each of their counts to `n`.
    pub fn with(mut self, parts: GeomParts, n: usize) -> Self {
        self.which |= parts;
        for part in parts.iter() {
            *self.count_mut(part) = n;
        }
        self
    }

    /// The reservation size for a single part, or 0 if it is not selected.
    pub fn count_for(&self, part: GeomParts) -> usize {
        if !self.which.contains(part) {
            return 0;
        }
        if part == GeomParts::PROPERTIES {
            self.num_properties
        } else if part == GeomParts::COLORS {
            self.num_colors
        } else if part == GeomParts::SHAPES {
            self.num_shapes
        } else if part == GeomParts::SECTIONS {
            self.num_sections
        } else if part == GeomParts::DOODADS {
            self.num_doodads
        } else if part == GeomParts::KEY_ALIASES {
            self.num_key_aliases
        } else {
            0
        }
    }

    fn count_mut(&mut self, part: GeomParts) -> &mut usize {
        if part == GeomParts::PROPERTIES {
            &mut self.num_properties
        } else if part == GeomParts::COLORS {
            &mut self.num_colors
        } else if part == GeomParts::SHAPES {
            &mut self.num_shapes
        } else if part == GeomParts::SECTIONS {
            &mut self.num_sections
        } else if part == GeomParts::DOODADS {
            &mut self.num_doodads
        } else {
            &mut self.num_key_aliases
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_values_match_xkb() {
        assert_eq!(GeomParts::PROPERTIES.bits(), 0x01);
        assert_eq!(GeomParts::KEY_ALIASES.bits(), 0x20);
        assert_eq!(GeomParts::ALL, GeomParts::all());
    }

    #[test]
    fn with_selects_and_sets_counts() {
        let sizes = GeometrySizes::new()
            .with(GeomParts::SHAPES, 4)
            .with(GeomParts::COLORS | GeomParts::DOODADS, 2);
        assert_eq!(
            sizes.which,
            GeomParts::SHAPES | GeomParts::COLORS | GeomParts::DOODADS
        );
        assert_eq!(sizes.count_for(GeomParts::SHAPES), 4);
        assert_eq!(sizes.count_for(GeomParts::COLORS), 2);
        assert_eq!(sizes.count_for(GeomParts::DOODADS), 2);
    }

    #[test]
    fn unselected_parts_count_zero() {
        let mut sizes = GeometrySizes::new();
        sizes.num_sections = 9;
        assert_eq!(sizes.count_for(GeomParts::SECTIONS), 0);
    }
}
