//! The XML element tree.
//!
//! Each [`Element`] owns its name, its text, an attribute set and a child
//! set. Both sets are [`HashTable`]s; children are keyed by their own tag
//! name, so at most one child per distinct name is held. Names, text and
//! attribute values are byte strings and are never decoded.
//!
//! ```rust
//! use plaindoc::xml::Element;
//!
//! let mut root = Element::named("root");
//! assert!(root.add_attribute("version", "2"));
//!
//! let mut child = Element::named("child");
//! child.set_text("hi");
//! root.add_child(child);
//!
//! assert_eq!(root.get_attribute("version"), Some(&b"2"[..]));
//! assert_eq!(root.get_child("child").and_then(|c| c.text_str()), Some("hi"));
//! ```

use crate::table::ByteText;
use crate::HashTable;
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    name: Vec<u8>,
    text: Vec<u8>,
    attributes: HashTable<Vec<u8>>,
    children: HashTable<Element>,
}

impl Element {
    /// Creates an element with an empty name.
    #[must_use]
    pub fn new() -> Self {
        Element::default()
    }

    #[must_use]
    pub fn named<N: AsRef<[u8]>>(name: N) -> Self {
        Element {
            name: name.as_ref().to_vec(),
            ..Element::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// The name as `&str`, or `None` if it is not UTF-8.
    #[must_use]
    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    pub fn set_name<N: AsRef<[u8]>>(&mut self, name: N) {
        self.name = name.as_ref().to_vec();
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The text as `&str`, or `None` if it is not UTF-8.
    #[must_use]
    pub fn text_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.text).ok()
    }

    pub fn set_text<T: AsRef<[u8]>>(&mut self, text: T) {
        self.text = text.as_ref().to_vec();
    }

    #[must_use]
    pub fn get_attribute<K: AsRef<[u8]>>(&self, key: K) -> Option<&[u8]> {
        self.attributes.get(key).map(Vec::as_slice)
    }

    /// Adds an attribute. Returns `false`, leaving the existing value in
    /// place, if `key` is already present.
    pub fn add_attribute<K, T>(&mut self, key: K, value: T) -> bool
    where
        K: AsRef<[u8]>,
        T: AsRef<[u8]>,
    {
        self.attributes.add(key, value.as_ref().to_vec()).is_ok()
    }

    #[must_use]
    pub fn attributes(&self) -> &HashTable<Vec<u8>> {
        &self.attributes
    }

    #[must_use]
    pub fn get_child<K: AsRef<[u8]>>(&self, name: K) -> Option<&Element> {
        self.children.get(name)
    }

    pub fn get_child_mut<K: AsRef<[u8]>>(&mut self, name: K) -> Option<&mut Element> {
        self.children.get_mut(name)
    }

    /// Stores `child` under its own name, returning the previous child of
    /// that name if there was one.
    pub fn add_child(&mut self, child: Element) -> Option<Element> {
        let name = child.name.clone();
        self.children.replace(name, child)
    }

    #[must_use]
    pub fn children(&self) -> &HashTable<Element> {
        &self.children
    }

    /// Returns `true` when the element has neither text nor children and
    /// therefore serializes as self-closing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    /// Tears the element down, releasing attributes and children
    /// depth-first before the element itself.
    pub fn free(self) {
        self.attributes.free(drop);
        self.children.free(Element::free);
    }
}

struct Attributes<'a>(&'a HashTable<Vec<u8>>);

impl Serialize for Attributes<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0.iter() {
            map.serialize_entry(&ByteText(entry.key()), &ByteText(entry.value()))?;
        }
        map.end()
    }
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Element", 4)?;
        state.serialize_field("name", &ByteText(&self.name))?;
        state.serialize_field("text", &ByteText(&self.text))?;
        state.serialize_field("attributes", &Attributes(&self.attributes))?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

/// Lossy for names or text that are not UTF-8; see [`super::to_vec`].
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::to_string(self))
    }
}
