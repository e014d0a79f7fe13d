//! Byte-string-keyed open-addressing hash table.
//!
//! [`HashTable`] backs JSON objects, XML attribute sets and XML child sets.
//! Keys are arbitrary byte strings; every method taking a key accepts
//! anything that is `AsRef<[u8]>`, so `&str` keys work as-is. Keys are hashed with djb2 and placed by linear probing in a fixed-size
//! slot array that doubles whenever it fills up.
//!
//! ## Iteration order
//!
//! Entries are visited in slot order, not insertion order. Growing the table
//! reinserts every entry into fresh storage, so the order observed before a
//! resize says nothing about the order after it.
//!
//! ## Examples
//!
//! ```rust
//! use plaindoc::HashTable;
//!
//! let mut table = HashTable::new();
//! assert!(table.add("name", "Alice").is_ok());
//! assert_eq!(table.add("name", "Bob"), Err("Bob"));
//!
//! assert_eq!(table.get("name"), Some(&"Alice"));
//! assert_eq!(table.len(), 1);
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Slot count of a freshly created table.
pub const INITIAL_CAPACITY: usize = 64;

/// A live key/value pair stored in a [`HashTable`] slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<V> {
    key: Vec<u8>,
    value: V,
}

impl<V> Entry<V> {
    #[inline]
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// An open-addressing hash table keyed by owned byte strings.
///
/// Invariants:
///
/// - `len() <= capacity()`, and a full table grows before the next insertion
/// - no two live entries share a key
/// - an entry lives at `positive_mod(djb2(key), capacity)` or, after a
///   collision, at the first free slot found by probing forward from there
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Vec<Option<Entry<V>>>,
    size: usize,
}

/// djb2 over the key's bytes in wrapping 32-bit signed arithmetic.
///
/// Bytes are added sign-extended, so keys with bytes of `0x80` and above
/// land where a signed-`char` djb2 puts them.
pub(crate) fn djb2(key: &[u8]) -> i32 {
    key.iter().fold(5381i32, |hash, &byte| {
        hash.wrapping_shl(5)
            .wrapping_add(hash)
            .wrapping_add(i32::from(byte as i8))
    })
}

/// Folds a signed hash into `0..modulus`.
pub(crate) fn positive_mod(value: i32, modulus: usize) -> usize {
    (i64::from(value).rem_euclid(modulus as i64)) as usize
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_slots(INITIAL_CAPACITY)
    }

    fn with_slots(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        HashTable { slots, size: 0 }
    }

    /// Number of live entries.
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

    /// Inserts `value` under an owned copy of `key`.
    ///
    /// Returns `Err(value)` without storing anything when `key` is already
    /// present, handing ownership of the rejected value back to the caller.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plaindoc::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.add("k", 1), Ok(()));
    /// assert_eq!(table.add("k", 2), Err(2));
    /// assert_eq!(table.get("k"), Some(&1));
    /// ```
    pub fn add<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Result<(), V> {
        let key = key.as_ref();
        if self.size == self.slots.len() {
            self.grow();
        }
        let capacity = self.slots.len();
        let mut index = positive_mod(djb2(key), capacity);
        while let Some(entry) = &self.slots[index] {
            if entry.key == key {
                return Err(value);
            }
            index = (index + 1) % capacity;
        }
        self.slots[index] = Some(Entry {
            key: key.to_vec(),
            value,
        });
        self.size += 1;
        Ok(())
    }

    /// Stores `value` under `key`, replacing and returning any previous value.
    pub fn replace<K: AsRef<[u8]>>(&mut self, key: K, value: V) -> Option<V> {
        let key = key.as_ref();
        match self.find(key) {
            Some(index) => self.slots[index]
                .as_mut()
                .map(|entry| std::mem::replace(&mut entry.value, value)),
            None => {
                // The key is absent, so add cannot reject it.
                let _ = self.add(key, value);
                None
            }
        }
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get<K: AsRef<[u8]>>(&self, key: K) -> Option<&V> {
        let index = self.find(key.as_ref())?;
        self.slots[index].as_ref().map(|entry| &entry.value)
    }

    pub fn get_mut<K: AsRef<[u8]>>(&mut self, key: K) -> Option<&mut V> {
        let index = self.find(key.as_ref())?;
        self.slots[index].as_mut().map(|entry| &mut entry.value)
    }

    #[must_use]
    pub fn contains_key<K: AsRef<[u8]>>(&self, key: K) -> bool {
        self.find(key.as_ref()).is_some()
    }

    /// Returns an iterator over live entries in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            yielded: 0,
        }
    }

    /// Returns an iterator over the keys, in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.iter().map(Entry::key)
    }

    /// Returns an iterator over the values, in slot order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(Entry::value)
    }

    /// Tears the table down, handing every live value to `destructor`.
    ///
    /// Keys are released as they are visited. Plain `drop` does the same with
    /// each value's own destructor.
    pub fn free<F>(self, mut destructor: F)
    where
        F: FnMut(V),
    {
        for entry in self.slots.into_iter().flatten() {
            destructor(entry.value);
        }
    }

    // The probe is bounded by the capacity so a table full of foreign keys
    // still terminates.
    fn find(&self, key: &[u8]) -> Option<usize> {
        let capacity = self.slots.len();
        let mut index = positive_mod(djb2(key), capacity);
        for _ in 0..capacity {
            match &self.slots[index] {
                Some(entry) if entry.key == key => return Some(index),
                Some(_) => index = (index + 1) % capacity,
                None => return None,
            }
        }
        None
    }

    fn grow(&mut self) {
        let old_capacity = self.slots.len();
        let new_capacity = old_capacity * 2;
        tracing::trace!(old_capacity, new_capacity, "growing hash table");

        let old = std::mem::replace(self, Self::with_slots(new_capacity));
        for entry in old.slots.into_iter().flatten() {
            // Keys were unique before the resize.
            let _ = self.add(&entry.key, entry.value);
        }
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for HashTable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|entry| (String::from_utf8_lossy(entry.key()), entry.value())),
            )
            .finish()
    }
}

/// Two tables are equal when they hold the same keys mapped to equal values,
/// whatever slots the entries occupy.
impl<V: PartialEq> PartialEq for HashTable<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .iter()
                .all(|entry| other.get(entry.key()) == Some(entry.value()))
    }
}

/// Iterator over the live entries of a [`HashTable`].
pub struct Iter<'a, V> {
    slots: std::slice::Iter<'a, Option<Entry<V>>>,
    yielded: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Number of entries produced so far.
    #[inline]
    #[must_use]
    pub fn yielded(&self) -> usize {
        self.yielded
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Option::as_ref)?;
        self.yielded += 1;
        Some(entry)
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for HashTable<V> {
    type Item = (Vec<u8>, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
        }
    }
}

/// Owning iterator over the entries of a [`HashTable`], in slot order.
pub struct IntoIter<V> {
    slots: std::vec::IntoIter<Option<Entry<V>>>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (Vec<u8>, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots
            .by_ref()
            .find_map(|slot| slot.map(|entry| (entry.key, entry.value)))
    }
}

/// Collects pairs with [`HashTable::add`] semantics: the first value seen for
/// a key wins.
impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for HashTable<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = HashTable::new();
        for (key, value) in iter {
            let _ = table.add(key, value);
        }
        table
    }
}

impl<V: Serialize> Serialize for HashTable<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.size))?;
        for entry in self {
            map.serialize_entry(&ByteText(entry.key()), entry.value())?;
        }
        map.end()
    }
}

/// Serializes a byte string as a string when it is UTF-8 and as raw bytes
/// otherwise.
pub(crate) struct ByteText<'a>(pub(crate) &'a [u8]);

impl Serialize for ByteText<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match std::str::from_utf8(self.0) {
            Ok(text) => serializer.serialize_str(text),
            Err(_) => serializer.serialize_bytes(self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_djb2_known_values() {
        assert_eq!(djb2(b""), 5381);
        assert_eq!(djb2(b"a"), 5381 * 33 + 97);
    }

    #[test]
    fn test_djb2_sign_extends_high_bytes() {
        assert_eq!(djb2(&[0xe9]), 5381 * 33 - 23);
        assert_eq!(djb2(&[0xff]), 5381 * 33 - 1);
    }

    #[test]
    fn test_non_utf8_keys() {
        let mut table = HashTable::new();
        assert!(table.add(b"caf\xe9", 1).is_ok());
        assert!(table.add("café", 2).is_ok());
        assert_eq!(table.get(b"caf\xe9"), Some(&1));
        assert_eq!(table.get("café"), Some(&2));
        assert_eq!(table.keys().filter(|key| key.starts_with(b"caf")).count(), 2);
    }

    #[test]
    fn test_positive_mod_folds_negative_hashes() {
        assert_eq!(positive_mod(-1, 64), 63);
        assert_eq!(positive_mod(-64, 64), 0);
        assert_eq!(positive_mod(130, 64), 2);
        // Long keys overflow into negative hashes; the slot must stay in range.
        let hash = djb2("a considerably longer key that wraps around".as_bytes());
        assert!(positive_mod(hash, 64) < 64);
    }

    #[test]
    fn test_full_table_lookup_terminates() {
        let mut table = HashTable::new();
        for i in 0..INITIAL_CAPACITY {
            assert!(table.add(&format!("key{}", i), i).is_ok());
        }
        assert_eq!(table.len(), table.capacity());
        assert_eq!(table.get("absent"), None);
        assert!(!table.contains_key("absent"));
    }

    #[test]
    fn test_grows_when_full() {
        let mut table = HashTable::new();
        for i in 0..=INITIAL_CAPACITY {
            assert!(table.add(&i.to_string(), i).is_ok());
        }
        assert_eq!(table.capacity(), INITIAL_CAPACITY * 2);
        for i in 0..=INITIAL_CAPACITY {
            assert_eq!(table.get(&i.to_string()), Some(&i));
        }
    }

    #[test]
    fn test_replace() {
        let mut table = HashTable::new();
        assert_eq!(table.replace("k", 1), None);
        assert_eq!(table.replace("k", 2), Some(1));
        assert_eq!(table.get("k"), Some(&2));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_iterator_yielded_count() {
        let table: HashTable<i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let mut it = table.iter();
        assert_eq!(it.yielded(), 0);
        it.next();
        it.next();
        assert_eq!(it.yielded(), 2);
        it.next();
        assert!(it.next().is_none());
        assert_eq!(it.yielded(), 3);
    }

    #[test]
    fn test_free_visits_every_value() {
        let mut table = HashTable::new();
        for i in 0..100 {
            let _ = table.add(&format!("k{}", i), i);
        }
        let mut sum = 0;
        table.free(|value| sum += value);
        assert_eq!(sum, (0..100).sum::<i32>());
    }

    #[test]
    fn test_equality_ignores_slot_order() {
        let mut small = HashTable::new();
        let _ = small.add("x", 1);
        let _ = small.add("y", 2);

        let mut grown = HashTable::new();
        for i in 0..100 {
            let _ = grown.add(&format!("filler{}", i), 0);
        }
        let mut rebuilt = HashTable::new();
        let _ = rebuilt.add("y", 2);
        let _ = rebuilt.add("x", 1);

        assert_eq!(small, rebuilt);
        assert_ne!(small, grown);
    }
}
