//! Index-addressed growable sequence.
//!
//! [`DynamicArray`] backs JSON arrays. Elements are appended at the end and
//! never removed or reordered; the backing storage starts at
//! [`INITIAL_CAPACITY`] slots and doubles whenever it fills up.
//!
//! ## Examples
//!
//! ```rust
//! use plaindoc::DynamicArray;
//!
//! let mut list = DynamicArray::new();
//! list.add("first");
//! list.add("second");
//!
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.get(1), Some(&"second"));
//! assert_eq!(list.get(5), None);
//! ```

use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;

/// Slot count of a freshly created array.
pub const INITIAL_CAPACITY: usize = 64;

/// A growable array whose live elements occupy indices `0..len()`.
#[derive(Clone)]
pub struct DynamicArray<V> {
    slots: Vec<Option<V>>,
    size: usize,
}

impl<V> DynamicArray<V> {
    /// Creates an empty array with [`INITIAL_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        let mut slots = Vec::with_capacity(INITIAL_CAPACITY);
        slots.resize_with(INITIAL_CAPACITY, || None);
        DynamicArray { slots, size: 0 }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Number of slots in the backing storage.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Appends `value`, doubling the backing storage first if it is full.
    pub fn add(&mut self, value: V) {
        if self.size == self.slots.len() {
            let capacity = self.slots.len() * 2;
            self.slots.resize_with(capacity, || None);
        }
        self.slots[self.size] = Some(value);
        self.size += 1;
    }

    /// Returns the element at `index`, or `None` for an unset slot or an
    /// index past the backing storage.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&V> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Returns an iterator over the elements in append order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots[..self.size].iter(),
            yielded: 0,
        }
    }

    /// Tears the array down, handing every element to `destructor`.
    ///
    /// Walks the whole backing storage and skips unset slots.
    pub fn free<F>(self, mut destructor: F)
    where
        F: FnMut(V),
    {
        for value in self.slots.into_iter().flatten() {
            destructor(value);
        }
    }
}

impl<V> Default for DynamicArray<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for DynamicArray<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for DynamicArray<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

/// Iterator over the elements of a [`DynamicArray`].
pub struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Option<V>>,
    yielded: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Number of elements produced so far.
    #[inline]
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.slots.by_ref().find_map(Option::as_ref)?;
        self.yielded += 1;
        Some(value)
    }
}

impl<'a, V> IntoIterator for &'a DynamicArray<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for DynamicArray<V> {
    type Item = V;
    type IntoIter = std::iter::Flatten<std::vec::IntoIter<Option<V>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.into_iter().flatten()
    }
}

impl<V> FromIterator<V> for DynamicArray<V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        let mut list = DynamicArray::new();
        for value in iter {
            list.add(value);
        }
        list
    }
}

impl<V> Extend<V> for DynamicArray<V> {
    fn extend<T: IntoIterator<Item = V>>(&mut self, iter: T) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<V: Serialize> Serialize for DynamicArray<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.size))?;
        for value in self {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_order() {
        let list: DynamicArray<i32> = (0..10).collect();
        assert_eq!(list.len(), 10);
        for i in 0..10 {
            assert_eq!(list.get(i as usize), Some(&i));
        }
        assert_eq!(list.get(10), None);
    }

    #[test]
    fn test_doubles_when_full() {
        let mut list = DynamicArray::new();
        for i in 0..INITIAL_CAPACITY {
            list.add(i);
        }
        assert_eq!(list.capacity(), INITIAL_CAPACITY);
        list.add(INITIAL_CAPACITY);
        assert_eq!(list.capacity(), INITIAL_CAPACITY * 2);
        assert_eq!(list.get(INITIAL_CAPACITY), Some(&INITIAL_CAPACITY));
    }

    #[test]
    fn test_out_of_range_get_is_none() {
        let list: DynamicArray<u8> = DynamicArray::new();
        assert_eq!(list.get(0), None);
        assert_eq!(list.get(usize::MAX), None);
    }

    #[test]
    fn test_iterator_yielded_count() {
        let list: DynamicArray<&str> = ["a", "b"].into_iter().collect();
        let mut it = list.iter();
        assert_eq!(it.next(), Some(&"a"));
        assert_eq!(it.yielded(), 1);
        assert_eq!(it.next(), Some(&"b"));
        assert_eq!(it.next(), None);
        assert_eq!(it.yielded(), 2);
    }

    #[test]
    fn test_free_visits_every_element() {
        let list: DynamicArray<String> = (0..70).map(|i| i.to_string()).collect();
        let mut seen = Vec::new();
        list.free(|value| seen.push(value));
        assert_eq!(seen.len(), 70);
        assert_eq!(seen[69], "69");
    }

    #[test]
    fn test_get_mut() {
        let mut list: DynamicArray<i32> = [1, 2, 3].into_iter().collect();
        if let Some(value) = list.get_mut(1) {
            *value = 20;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 20, 3]);
    }
}
