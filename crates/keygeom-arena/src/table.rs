//! Flat geometry tables: properties, colors, and key aliases.

use keygeom_core::{KeyName, RecordKind};

use crate::slots::Record;

/// A name/value string pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Property {
    /// Property name; the find-or-create key.
    pub name: String,
    /// Property value.
    pub value: String,
}

impl Record for Property {
    const KIND: RecordKind = RecordKind::Property;

    fn release(&mut self) {
        self.name = String::new();
        self.value = String::new();
    }
}

/// A named color.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    /// Color spec, e.g. `"grey20"`; the find-or-create key.
    pub spec: String,
    /// Resolved pixel value.
    pub pixel: u32,
}

impl Record for Color {
    const KIND: RecordKind = RecordKind::Color;

    fn release(&mut self) {
        self.spec = String::new();
    }
}

/// Maps an alias key name onto a real one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyAlias {
    /// Alias name; the find-or-create key.
    pub alias: KeyName,
    /// Name of the key the alias stands for.
    pub real: KeyName,
}

impl Record for KeyAlias {
    const KIND: RecordKind = RecordKind::KeyAlias;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_release_drops_both_strings() {
        let mut prop = Property {
            name: "vendor".into(),
            value: "keygeom".into(),
        };
        prop.release();
        assert_eq!(prop, Property::default());
    }

    #[test]
    fn color_release_keeps_pixel() {
        let mut color = Color {
            spec: "grey20".into(),
            pixel: 7,
        };
        color.release();
        assert!(color.spec.is_empty());
        assert_eq!(color.pixel, 7);
    }
}
