//! Growable slot arrays with exact growth and ranged removal.
//!
//! A [`SlotArray`] tracks two numbers: `len` (slots in logical use) and
//! `capacity` (slots physically reserved). Every record kind in a geometry
//! tree lives in one of these, and every per-kind allocate/free operation is
//! a thin call into [`SlotArray::reserve`] or [`SlotArray::free`].
//!
//! Invariants:
//!
//! - `len <= capacity <= MAX_SLOTS`.
//! - `is_allocated()` iff `capacity > 0`.
//! - Growth is exact: a reservation that does not fit reallocates to
//!   precisely `len + n` slots, never more.
//! - Slots in `[len, capacity)` after a reservation are `Default`. After a
//!   truncating removal they keep whatever the finalizer left behind.

use std::ops::{Index, IndexMut};

use keygeom_core::{GeomError, RecordKind};

/// Largest number of slots any array may hold.
///
/// Geometry counts travel as 16-bit values on the wire; a reservation past
/// this is reported as an allocation failure.
pub const MAX_SLOTS: usize = u16::MAX as usize;

/// A fixed-size element of a geometry tree.
///
/// `Default` is the zeroed state a freshly reserved slot holds.
/// [`release`](Record::release) is the per-element finalizer run before the
/// element is removed: it must drop everything the record owns (nested
/// arrays, strings). Leaf kinds own nothing and keep the no-op default.
pub trait Record: Default {
    /// Which kind of record this is.
    const KIND: RecordKind;

    /// Release owned substructures, leaving the record empty.
    fn release(&mut self) {}
}

/// Contiguous array of records with explicit length/capacity bookkeeping.
///
/// Backed by a `Vec<T>` whose length is the logical capacity, so spare
/// slots are materialised and observable through [`spare`](Self::spare).
#[derive(Clone, Debug)]
pub struct SlotArray<T> {
    /// Every reserved slot; `slots.len()` is the capacity.
    slots: Vec<T>,
    /// Number of slots in logical use.
    count: usize,
}

impl<T> Default for SlotArray<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            count: 0,
        }
    }
}

impl<T: Record> SlotArray<T> {
    /// Create an empty array with no buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots in logical use.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether no slot is in use.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots reserved.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Whether a buffer is currently held.
    pub fn is_allocated(&self) -> bool {
        !self.slots.is_empty()
    }

    /// The slots in logical use.
    pub fn as_slice(&self) -> &[T] {
        &self.slots[..self.count]
    }

    /// The slots in logical use, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.slots[..self.count]
    }

    /// Reserved slots beyond `len`.
    pub fn spare(&self) -> &[T] {
        &self.slots[self.count..]
    }

    /// Element at `index` if it is in use.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index` if it is in use.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Iterate over the slots in use.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the slots in use.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Index of the first in-use element matching `pred`.
    pub fn position(&self, pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter().position(pred)
    }

    /// Make room for `n` more elements.
    ///
    /// Does not change `len`. A reservation that fits in the current capacity
    /// is free; otherwise the buffer is resized to exactly `len + n` slots
    /// and every slot from `len` onward is reset to `Default`.
    ///
    /// On failure the array is reset to empty (`len == capacity == 0`) and
    /// [`GeomError::AllocFailed`] is returned.
    pub fn reserve(&mut self, n: usize) -> Result<(), GeomError> {
        if n == 0 {
            return Ok(());
        }
        debug_assert!(self.count <= self.slots.len());
        let total = self.count.saturating_add(n);
        if total <= self.slots.len() {
            return Ok(());
        }
        if total > MAX_SLOTS {
            return Err(self.fail(total));
        }

        let old_capacity = self.slots.len();
        // Stale slots past `len` are replaced by fresh defaults below.
        self.slots.truncate(self.count);
        if self.slots.try_reserve_exact(total - self.count).is_err() {
            return Err(self.fail(total));
        }
        self.slots.resize_with(total, T::default);
        log::trace!(
            "{} slots grown from {old_capacity} to {total} (len {})",
            T::KIND,
            self.count
        );
        Ok(())
    }

    /// Append a `Default` element, growing by one slot only when full.
    ///
    /// Fails like [`push_with`](Self::push_with).
    pub fn push(&mut self) -> Result<&mut T, GeomError> {
        self.push_with(T::default())
    }

    /// Append `value`, growing by one slot only when full.
    ///
    /// A full array already holding [`MAX_SLOTS`] elements cannot grow, and
    /// that failed growth resets it like any other: every existing element
    /// is dropped and the array is left empty.
    pub fn push_with(&mut self, value: T) -> Result<&mut T, GeomError> {
        if self.count >= self.slots.len() {
            self.reserve(1)?;
        }
        let index = self.count;
        self.slots[index] = value;
        self.count += 1;
        Ok(&mut self.slots[index])
    }

    /// Remove `n` elements starting at `first`, or everything if `free_all`.
    ///
    /// See [`remove`](Self::remove) and [`clear`](Self::clear).
    pub fn free(&mut self, first: usize, n: usize, free_all: bool) {
        if free_all {
            self.clear();
        } else {
            self.remove(first, n);
        }
    }

    /// Remove `n` elements starting at `first`.
    ///
    /// No-op when `first >= len` or `n == 0`; `n` is clamped to the end of
    /// the array. Each removed element is released in ascending order before
    /// anything moves. A range reaching the end only truncates `len`; an
    /// interior range shifts the `len - first - n` trailing elements down by
    /// `n` slots.
    pub fn remove(&mut self, first: usize, n: usize) {
        if first >= self.count || n == 0 {
            return;
        }
        let n = n.min(self.count - first);
        for slot in &mut self.slots[first..first + n] {
            slot.release();
        }
        if first + n >= self.count {
            self.count = first;
        } else {
            // Released elements rotate out past the new `len`.
            self.slots[first..self.count].rotate_left(n);
            self.count -= n;
        }
        log::trace!("removed {n} {} at {first} (len {})", T::KIND, self.count);
    }

    /// Release every element and drop the buffer.
    pub fn clear(&mut self) {
        for slot in self.as_mut_slice() {
            slot.release();
        }
        if self.is_allocated() {
            log::trace!("freed {} {} slots", self.slots.len(), T::KIND);
        }
        self.slots = Vec::new();
        self.count = 0;
    }

    fn fail(&mut self, requested: usize) -> GeomError {
        log::warn!(
            "{} allocation of {requested} slots failed; array reset",
            T::KIND
        );
        self.slots = Vec::new();
        self.count = 0;
        GeomError::AllocFailed {
            kind: T::KIND,
            requested,
        }
    }
}

impl<T: Record> Index<usize> for SlotArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T: Record> IndexMut<usize> for SlotArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<'a, T: Record> IntoIterator for &'a SlotArray<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
