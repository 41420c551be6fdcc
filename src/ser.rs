//! Encoding.
//!
//! Encoding runs in two steps. Any `T: Serialize` is first turned into a
//! [`Value`] tree by the [`ValueSerializer`]; the tree is then laid out as text
//! by [`encode`](crate::encode).
//!
//! ## Layout
//!
//! - **Mappings** indent their children by 4 spaces
//! - **Sequences** indent by 2; each item starts with `- `, and a mapping item puts
//!   its first key on the dash line
//! - **Empty collections** stay on the key line as `key: []` or `key: {}`
//! - **Strings** holding a tab, form feed, backspace or carriage return are
//!   double-quoted and escaped; other multi-line strings become `|` blocks; all
//!   others are written bare
//! - **Numbers** print without a fractional part when integral
//!
//! ## Usage
//!
//! ```rust
//! use serde_yamlite::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, tags: Vec<&'static str> }
//!
//! let data = Data { x: 1, tags: vec!["a", "b"] };
//! assert_eq!(to_string(&data).unwrap(), "x: 1\ntags:\n    - a\n    - b\n");
//! ```

use crate::{Error, Mapping, Result, Value};
use serde::{ser, Serialize};

const MAPPING_INDENT: usize = 4;
const SEQUENCE_INDENT: usize = 2;

/// Lays out a value tree as text.
pub(crate) struct Emitter {
    output: String,
}

impl Emitter {
    pub(crate) fn new() -> Self {
        Emitter {
            output: String::with_capacity(256),
        }
    }

    pub(crate) fn into_inner(self) -> String {
        self.output
    }

    /// Writes `value` as a whole document.
    ///
    /// An empty mapping is the empty document. Non-mapping roots are written
    /// too, even though they do not decode back.
    pub(crate) fn write_document(&mut self, value: &Value) {
        match value {
            Value::Mapping(map) => self.write_mapping(map, 0, false),
            Value::Sequence(seq) if seq.is_empty() => self.output.push_str("[]\n"),
            Value::Sequence(seq) => self.write_sequence(seq, 0),
            Value::String(s) if is_block(s) => self.write_block(s, SEQUENCE_INDENT),
            scalar => {
                self.write_scalar(scalar);
                self.output.push('\n');
            }
        }
    }

    fn write_indent(&mut self, col: usize) {
        self.output.extend(std::iter::repeat(' ').take(col));
    }

    /// Writes the entries of `map` with their keys at column `col`.
    ///
    /// Inside a sequence the first key shares the item's `- ` line, which sits
    /// two columns to the left of the keys.
    fn write_mapping(&mut self, map: &Mapping, col: usize, in_sequence: bool) {
        for (i, (key, value)) in map.iter().enumerate() {
            if i == 0 && in_sequence {
                self.write_indent(col.saturating_sub(SEQUENCE_INDENT));
                self.output.push_str("- ");
            } else {
                self.write_indent(col);
            }
            self.write_key(key);
            self.output.push(':');
            self.write_inline(value, col + MAPPING_INDENT);
        }
    }

    /// Writes the items of `seq` with their dashes at column `col`.
    fn write_sequence(&mut self, seq: &[Value], col: usize) {
        for item in seq {
            match item {
                Value::Mapping(map) if !map.is_empty() => {
                    self.write_mapping(map, col + SEQUENCE_INDENT, true)
                }
                _ => {
                    self.write_indent(col);
                    self.output.push('-');
                    self.write_inline(item, col + SEQUENCE_INDENT);
                }
            }
        }
    }

    /// Finishes a `key:` or `-` line with `value`.
    ///
    /// Nested content starts on the next line at `child_col`.
    fn write_inline(&mut self, value: &Value, child_col: usize) {
        match value {
            Value::Sequence(seq) if seq.is_empty() => self.output.push_str(" []\n"),
            Value::Mapping(map) if map.is_empty() => self.output.push_str(" {}\n"),
            Value::Sequence(seq) => {
                self.output.push('\n');
                self.write_sequence(seq, child_col);
            }
            Value::Mapping(map) => {
                self.output.push('\n');
                self.write_mapping(map, child_col, false);
            }
            Value::String(s) if s.is_empty() => self.output.push('\n'),
            Value::String(s) if is_block(s) => {
                self.output.push(' ');
                self.write_block(s, child_col);
            }
            scalar => {
                self.output.push(' ');
                self.write_scalar(scalar);
                self.output.push('\n');
            }
        }
    }

    fn write_scalar(&mut self, value: &Value) {
        match value {
            Value::Null => self.output.push_str("null"),
            Value::Bool(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Value::Number(n) => self.output.push_str(&format_number(*n)),
            Value::String(s) if needs_quotes(s) => self.write_quoted(s, false),
            Value::String(s) => self.output.push_str(s),
            // Laid out by write_inline.
            Value::Sequence(_) | Value::Mapping(_) => {}
        }
    }

    /// Writes `|` and the lines of `text` at column `col`.
    ///
    /// One trailing newline is dropped since the decoder adds it back.
    fn write_block(&mut self, text: &str, col: usize) {
        self.output.push_str("|\n");
        let body = text.strip_suffix('\n').unwrap_or(text);
        for line in body.split('\n') {
            if !line.is_empty() {
                self.write_indent(col);
                self.output.push_str(line);
            }
            self.output.push('\n');
        }
    }

    fn write_key(&mut self, key: &str) {
        if key_needs_quotes(key) {
            self.write_quoted(key, true);
        } else {
            self.output.push_str(key);
        }
    }

    /// Writes `s` in double quotes.
    ///
    /// Keys also escape `#` so the line source does not cut them at a comment;
    /// values are read back literally and keep it as is.
    fn write_quoted(&mut self, s: &str, is_key: bool) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '#' if is_key => self.output.push_str("\\#"),
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"),
                '\u{000C}' => self.output.push_str("\\f"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

/// Integral values print without a fraction; others use the shortest text that
/// parses back to the same value. Exponent form wins when it is shorter.
pub(crate) fn format_number(n: f64) -> String {
    let plain = n.to_string();
    let scientific = format!("{:e}", n);
    if scientific.len() < plain.len() {
        scientific
    } else {
        plain
    }
}

#[inline]
fn is_escaped_control(c: char) -> bool {
    matches!(c, '\t' | '\r' | '\u{0008}' | '\u{000C}')
}

#[inline]
fn needs_quotes(s: &str) -> bool {
    s.chars().any(is_escaped_control)
}

#[inline]
fn is_block(s: &str) -> bool {
    s.contains('\n') && !needs_quotes(s)
}

/// Keys the decoder would misread unquoted.
#[inline]
fn key_needs_quotes(key: &str) -> bool {
    key.is_empty()
        || key.starts_with('-')
        || key.trim() != key
        || key
            .chars()
            .any(|c| matches!(c, ':' | '#' | '"' | '\\' | '\n') || is_escaped_control(c))
}

/// Serializer whose output is a [`Value`] tree.
///
/// Struct fields keep their declared order, unit variants become text and other
/// enum variants become a single-entry mapping keyed by the variant name.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_yamlite::{Value, ValueSerializer};
///
/// let value = vec![1, 2].serialize(ValueSerializer).unwrap();
/// assert_eq!(value, Value::Sequence(vec![Value::from(1), Value::from(2)]));
/// ```
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: Mapping,
    current_key: Option<String>,
    variant: Option<&'static str>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::Number(v as f64))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Number(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Number(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::Number(f64::from(b))).collect();
        Ok(Value::Sequence(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
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
        Ok(tag_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(len, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn finish(self) -> Value {
        let seq = Value::Sequence(self.vec);
        match self.variant {
            Some(variant) => tag_variant(variant, seq),
            None => seq,
        }
    }
}

impl SerializeMap {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeMap {
            map: Mapping::with_capacity(capacity),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> Value {
        let map = Value::Mapping(self.map);
        match self.variant {
            Some(variant) => tag_variant(variant, map),
            None => map,
        }
    }
}

fn tag_variant(variant: &str, value: Value) -> Value {
    let mut map = Mapping::with_capacity(1);
    map.insert(variant.to_string(), value);
    Value::Mapping(map)
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_value(key)? {
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(n),
            other => return Err(Error::UnsupportedKey(other.type_name().to_string())),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(self.finish())
    }
}

/// Converts any `T: Serialize` into a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{to_value, Value};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("n", 3);
/// let value = to_value(&map).unwrap();
/// assert_eq!(value.get("n"), Some(&Value::Number(3.0)));
/// ```
///
/// # Errors
///
/// Fails when a map key is not a string, boolean or number, or when a
/// `Serialize` impl reports an error of its own.
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}
