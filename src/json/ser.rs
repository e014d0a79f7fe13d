//! JSON serialization.
//!
//! [`Emitter`] pretty-prints a [`Value`] tree depth-first: one entry per line,
//! one indentation unit per nesting depth, a comma after every entry except
//! the last. Strings are written between quotes without escaping and decimals
//! always carry six fractional digits.
//!
//! ```rust
//! use plaindoc::json;
//!
//! let value = json::from_str(r#"{"c": {"d": 2.5}}"#).unwrap();
//! assert_eq!(
//!     json::to_string(&value),
//!     "{\n\t\"c\": {\n\t\t\"d\": 2.500000\n\t}\n}\n"
//! );
//! ```
//!
//! [`ValueSerializer`] goes the other way round, turning any
//! `T: serde::Serialize` into a [`Value`]; see [`crate::json::to_value`].

use super::value::{Array, Object, Value};
use crate::{Error, Result, WriteOptions};
use serde::{ser, Serialize};

/// Pretty-printer writing a [`Value`] into an in-memory byte buffer.
pub struct Emitter {
    output: Vec<u8>,
    options: WriteOptions,
}

impl Emitter {
    pub fn new(options: &WriteOptions) -> Self {
        Emitter {
            output: Vec::with_capacity(256),
            options: options.clone(),
        }
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.output
    }

    /// Writes a complete document: the value followed by one newline.
    pub fn emit_document(&mut self, value: &Value) {
        self.emit(value, 1);
        self.output.push(b'\n');
    }

    /// Writes `value`; `depth` is the indentation of its entries.
    fn emit(&mut self, value: &Value, depth: usize) {
        match value {
            Value::Boolean(b) => self
                .output
                .extend_from_slice(if *b { b"true" } else { b"false" }),
            Value::Integer(i) => self.output.extend_from_slice(i.to_string().as_bytes()),
            Value::Decimal(d) => self
                .output
                .extend_from_slice(format!("{:.6}", d).as_bytes()),
            Value::String(s) => {
                self.output.push(b'"');
                self.output.extend_from_slice(s);
                self.output.push(b'"');
            }
            Value::Object(object) => self.emit_object(object, depth),
            Value::Array(array) => self.emit_array(array, depth),
        }
    }

    fn emit_object(&mut self, object: &Object, depth: usize) {
        self.output.extend_from_slice(b"{\n");
        let mut it = object.iter();
        while let Some(entry) = it.next() {
            self.options.indent.write(&mut self.output, depth);
            self.output.push(b'"');
            self.output.extend_from_slice(entry.key());
            self.output.extend_from_slice(b"\": ");
            self.emit(entry.value(), depth + 1);
            if it.yielded() < object.len() {
                self.output.push(b',');
            }
            self.output.push(b'\n');
        }
        self.options.indent.write(&mut self.output, depth - 1);
        self.output.push(b'}');
    }

    fn emit_array(&mut self, array: &Array, depth: usize) {
        self.output.extend_from_slice(b"[\n");
        let mut it = array.iter();
        while let Some(element) = it.next() {
            self.options.indent.write(&mut self.output, depth);
            self.emit(element, depth + 1);
            if it.yielded() < array.len() {
                self.output.push(b',');
            }
            self.output.push(b'\n');
        }
        self.options.indent.write(&mut self.output, depth - 1);
        self.output.push(b']');
    }
}

/// Serializer producing a [`Value`] from any `T: Serialize`.
///
/// The value model has no null, so `None`, `()` and unit structs are
/// rejected with [`Error::UnsupportedType`].
pub struct ValueSerializer;

pub struct SerializeVec {
    array: Array,
}

pub struct SerializeMap {
    object: Object,
    current_key: Option<Vec<u8>>,
}

/// Builds `{variant: inner}` for newtype variants.
pub struct SerializeVariant {
    variant: &'static str,
    inner: Value,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = ser::Impossible<Value, Error>;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = ser::Impossible<Value, Error>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Integer(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Integer(i64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        match i64::try_from(v) {
            Ok(i) => Ok(Value::Integer(i)),
            Err(_) => Ok(Value::Decimal(v as f64)),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Decimal(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Decimal(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::from(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(
            v.iter().map(|&b| Value::Integer(i64::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Value> {
        Err(Error::unsupported_type("none"))
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Err(Error::unsupported_type("unit"))
    }

    fn serialize_unit_struct(self, name: &'static str) -> Result<Value> {
        Err(Error::unsupported_type(&format!("unit struct {}", name)))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        SerializeVariant {
            variant,
            inner: to_value(value)?,
        }
        .end()
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec {
            array: Array::new(),
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            object: Object::new(),
            current_key: None,
        }
    }

    fn insert(&mut self, key: &[u8], value: Value) -> Result<()> {
        self.object.add(key, value).map_err(|_| {
            Error::custom(format!(
                "duplicate key `{}`",
                String::from_utf8_lossy(key)
            ))
        })
    }
}

impl SerializeVariant {
    fn end(self) -> Result<Value> {
        let mut object = Object::new();
        let _ = object.add(self.variant, self.inner);
        Ok(Value::Object(object))
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.array.add(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.array))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "map keys must be strings, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.insert(&key, to_value(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.as_bytes(), to_value(value)?)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

/// Converts any `T: Serialize` into a [`Value`].
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}
