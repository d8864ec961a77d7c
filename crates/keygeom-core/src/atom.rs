//! Name interning.
//!
//! Shapes, sections, doodads, and overlays are keyed by interned names
//! rather than strings, so their find-or-create lookups compare integers.
//! [`AtomTable`] hands out the atoms.

use indexmap::IndexSet;

use crate::id::Atom;

/// Bidirectional string ↔ [`Atom`] table.
///
/// Atoms are `index + 1` into an insertion-ordered set, so they are stable
/// for the table's lifetime and `Atom::NONE` (0) is never handed out for a
/// real name.
#[derive(Clone, Debug, Default)]
pub struct AtomTable {
    names: IndexSet<Box<str>>,
}

impl AtomTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern `name`, returning the existing atom if it was seen before.
    ///
    /// The empty string interns to [`Atom::NONE`].
    pub fn intern(&mut self, name: &str) -> Atom {
        if name.is_empty() {
            return Atom::NONE;
        }
        if let Some(idx) = self.names.get_index_of(name) {
            return Self::atom_at(idx);
        }
        let (idx, _) = self.names.insert_full(name.into());
        Self::atom_at(idx)
    }

    /// Look up an already interned name without inserting.
    pub fn lookup(&self, name: &str) -> Option<Atom> {
        self.names.get_index_of(name).map(Self::atom_at)
    }

    /// Resolve an atom back to its name.
    pub fn name(&self, atom: Atom) -> Option<&str> {
        let idx = (atom.0 as usize).checked_sub(1)?;
        self.names.get_index(idx).map(|s| &**s)
    }

    /// Number of interned names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing has been interned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn atom_at(idx: usize) -> Atom {
        Atom(idx as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intern_is_idempotent() {
        let mut atoms = AtomTable::new();
        let a = atoms.intern("ALPH");
        let b = atoms.intern("ALPH");
        let c = atoms.intern("KPAD");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(atoms.len(), 2);
    }

    #[test]
    fn atoms_resolve_to_names() {
        let mut atoms = AtomTable::new();
        let a = atoms.intern("Editing");
        assert_eq!(atoms.name(a), Some("Editing"));
        assert_eq!(atoms.name(Atom::NONE), None);
        assert_eq!(atoms.name(Atom(99)), None);
    }

    #[test]
    fn empty_name_is_none() {
        let mut atoms = AtomTable::new();
        assert!(atoms.intern("").is_none());
        assert!(atoms.is_empty());
    }

    #[test]
    fn lookup_does_not_insert() {
        let mut atoms = AtomTable::new();
        assert_eq!(atoms.lookup("NORM"), None);
        let a = atoms.intern("NORM");
        assert_eq!(atoms.lookup("NORM"), Some(a));
        assert_eq!(atoms.len(), 1);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn distinct_names_get_distinct_atoms(
                names in proptest::collection::vec("[a-z]{1,6}", 1..30),
            ) {
                let mut atoms = AtomTable::new();
                for n in &names {
                    atoms.intern(n);
                }
                let distinct: std::collections::HashSet<_> = names.iter().collect();
                prop_assert_eq!(atoms.len(), distinct.len());
                for n in &names {
                    let a = atoms.lookup(n).unwrap();
                    prop_assert!(!a.is_none());
                    prop_assert_eq!(atoms.name(a), Some(n.as_str()));
                }
            }
        }
    }
}
