//! Dynamic value representation for JSON documents.
//!
//! [`Value`] is a sum type over the six kinds the format knows about. Objects
//! are [`HashTable`]s and arrays are [`DynamicArray`]s of nested values; a
//! composite exclusively owns everything reachable through it, so dropping the
//! root releases the whole document.
//!
//! ## Creating Values
//!
//! ```rust
//! use plaindoc::json::{Object, Value};
//!
//! let mut object = Object::new();
//! object.add("name", Value::from("Alice")).unwrap();
//! object.add("age", Value::from(30)).unwrap();
//!
//! let value = Value::Object(object);
//! assert!(value.is_object());
//! ```
//!
//! ## Extracting Values
//!
//! ```rust
//! use plaindoc::json;
//!
//! let value = json::from_str(r#"{"user": {"age": 30, "tags": ["a", "b"]}}"#).unwrap();
//! let user = value.as_object().and_then(|o| o.get_object("user")).unwrap();
//!
//! assert_eq!(user.get_i64("age"), Some(30));
//! assert_eq!(user.get_array("tags").and_then(|t| t.get_str(1)), Some("b"));
//! ```

use crate::table::ByteText;
use crate::{DynamicArray, HashTable};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A JSON object: byte-string keys mapped to owned values.
pub type Object = HashTable<Value>;

/// A JSON array: owned values in document order.
pub type Array = DynamicArray<Value>;

/// Any value that can appear in a document.
///
/// # Examples
///
/// ```rust
/// use plaindoc::json::Value;
///
/// let flag = Value::Boolean(true);
/// let count = Value::from(42);
/// let ratio = Value::from(0.5);
///
/// assert!(flag.is_boolean());
/// assert_eq!(count.as_i64(), Some(42));
/// assert_eq!(ratio.as_f64(), Some(0.5));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Object(Object),
    Array(Array),
    Boolean(bool),
    Integer(i64),
    Decimal(f64),
    /// Raw bytes between the quotes; not necessarily UTF-8.
    String(Vec<u8>),
}

impl Value {
    /// Creates an empty object value.
    #[must_use]
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Creates an empty array value.
    #[must_use]
    pub fn array() -> Self {
        Value::Array(Array::new())
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_decimal(&self) -> bool {
        matches!(self, Value::Decimal(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` for objects and arrays.
    #[inline]
    #[must_use]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Array(_))
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns decimals as-is and widens integers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plaindoc::json::Value;
    ///
    /// assert_eq!(Value::Decimal(2.5).as_f64(), Some(2.5));
    /// assert_eq!(Value::Integer(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::from("2").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Decimal(d) => Some(*d),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Returns the string payload if it is valid UTF-8.
    ///
    /// ```rust
    /// use plaindoc::json::Value;
    ///
    /// assert_eq!(Value::from("caf\u{e9}").as_str(), Some("caf\u{e9}"));
    /// assert_eq!(Value::String(b"caf\xe9".to_vec()).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => std::str::from_utf8(s).ok(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Releases the value and everything reachable through it, children
    /// before their container.
    pub fn free(self) {
        match self {
            Value::Object(object) => object.free(Value::free),
            Value::Array(array) => array.free(Value::free),
            _ => {}
        }
    }
}

impl HashTable<Value> {
    pub fn get_object<K: AsRef<[u8]>>(&self, key: K) -> Option<&Object> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn get_array<K: AsRef<[u8]>>(&self, key: K) -> Option<&Array> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn get_bool<K: AsRef<[u8]>>(&self, key: K) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_i64<K: AsRef<[u8]>>(&self, key: K) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64<K: AsRef<[u8]>>(&self, key: K) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_str<K: AsRef<[u8]>>(&self, key: K) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bytes<K: AsRef<[u8]>>(&self, key: K) -> Option<&[u8]> {
        self.get(key).and_then(Value::as_bytes)
    }
}

impl DynamicArray<Value> {
    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.get(index).and_then(Value::as_object)
    }

    pub fn get_array(&self, index: usize) -> Option<&Array> {
        self.get(index).and_then(Value::as_array)
    }

    pub fn get_bool(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(Value::as_f64)
    }

    pub fn get_str(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(Value::as_str)
    }

    pub fn get_bytes(&self, index: usize) -> Option<&[u8]> {
        self.get(index).and_then(Value::as_bytes)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Decimal(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value.into_bytes())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::String(value.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::String(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::to_string(self))
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Object(object) => object.serialize(serializer),
            Value::Array(array) => array.serialize(serializer),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::Decimal(d) => serializer.serialize_f64(*d),
            Value::String(s) => ByteText(s).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object, array, boolean, number or string")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Boolean(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                match i64::try_from(value) {
                    Ok(i) => Ok(Value::Integer(i)),
                    Err(_) => Ok(Value::Decimal(value as f64)),
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Decimal(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Err(E::custom("null has no representation in this value model"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut array = Array::new();
                while let Some(element) = seq.next_element()? {
                    array.add(element);
                }
                Ok(Value::Array(array))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut object = Object::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    let _ = object.add(&key, value);
                }
                Ok(Value::Object(object))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Integer(i) => Ok(i),
            other => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Decimal(d) => Ok(d),
            Value::Integer(i) => Ok(i as f64),
            other => Err(crate::Error::custom(format!(
                "expected decimal, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => {
                String::from_utf8(s).map_err(|_| crate::Error::custom("string is not UTF-8"))
            }
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}
