//! Decoding.
//!
//! This module provides the [`Decoder`], an indentation-driven recursive-descent
//! parser that turns text into a [`Value`] tree, and the serde glue that turns
//! such a tree into any `T: Deserialize`.
//!
//! ## Overview
//!
//! - **Pull-style**: the decoder asks its line source for one line at a time and
//!   hands back at most one line it read too far
//! - **Indentation only**: the number of leading spaces is the sole structural
//!   delimiter; a collection ends at the first line indented less than it
//! - **Nested values**: a key with nothing after its colon takes the following,
//!   more indented block as its value
//! - **Block scalars**: `key: |` reads the following more indented lines as one
//!   string ending in exactly one newline
//!
//! ## Usage
//!
//! ```rust
//! use serde_yamlite::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, tags: Vec<String> }
//!
//! let text = "x: 1\ntags:\n  - a\n  - b\n";
//! let data: Data = from_str(text).unwrap();
//! assert_eq!(data, Data { x: 1, tags: vec!["a".into(), "b".into()] });
//! ```
//!
//! ## Known gaps
//!
//! Blank lines and `#` comments are dropped before a block scalar sees them, so
//! a literal block loses its interior blank lines. Quoted scalar values keep
//! their quotes and backslashes.

use crate::lines::{find_unescaped, indent_of, LineSource};
use crate::scalar::interpret_scalar;
use crate::ser::format_number;
use crate::value::integral_i64;
use crate::{Error, Mapping, Options, Result, Value};
use log::{debug, trace};
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};
use std::io::BufRead;

const BLOCK_MARKER: &str = "|";

/// The text decoder.
///
/// One decoder reads one document and must not be shared between decodes; it
/// holds the single line of pushback for its input.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{Decoder, Value};
///
/// let mut decoder = Decoder::new("a:\n  b: 1\nc: 2\n".as_bytes());
/// let doc = decoder.decode_document().unwrap();
/// assert_eq!(doc.get("c"), Some(&Value::Number(2.0)));
/// ```
pub struct Decoder<R> {
    lines: LineSource<R>,
    options: Options,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, Options::default())
    }

    pub fn with_options(reader: R, options: Options) -> Self {
        Decoder {
            lines: LineSource::new(reader),
            options,
        }
    }

    /// Decodes the whole input as one document.
    ///
    /// Empty input (or input holding only comments and markers) is an empty
    /// mapping.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnexpectedTopLevelType`] if the document is not a
    /// mapping, and with the structural errors of [`Error`] on malformed text.
    pub fn decode_document(&mut self) -> Result<Mapping> {
        debug!("decoding document");
        match self.decode_collection(0, 1)? {
            None => Ok(Mapping::new()),
            Some(Value::Mapping(map)) => {
                debug!(
                    "decoded document with {} top-level keys over {} lines",
                    map.len(),
                    self.lines.line_no()
                );
                Ok(map)
            }
            Some(other) => Err(Error::unexpected_top_level(other.type_name())),
        }
    }

    /// Decodes the collection whose entries sit at column `level`.
    ///
    /// Returns `None` when input ends (or the enclosing block closes) before
    /// any entry is read.
    fn decode_collection(&mut self, level: usize, depth: usize) -> Result<Option<Value>> {
        if depth > self.options.max_depth {
            return Err(Error::recursion_limit(
                self.lines.line_no(),
                self.options.max_depth,
            ));
        }

        let line = match self.lines.get_non_empty_line()? {
            Some(line) => line,
            None => return Ok(None),
        };
        let indent = indent_of(&line);
        if indent < level {
            self.lines.unget_line(line)?;
            return Ok(None);
        }
        if indent > level {
            return Err(Error::bad_indent(self.lines.line_no(), level, indent));
        }

        let is_sequence = is_sequence_marker(&line[indent..]);
        self.lines.unget_line(line)?;
        if is_sequence {
            Ok(Some(Value::Sequence(self.decode_sequence(level, depth, false)?)))
        } else {
            Ok(Some(Value::Mapping(self.decode_mapping(level, depth)?)))
        }
    }

    fn decode_mapping(&mut self, level: usize, depth: usize) -> Result<Mapping> {
        let mut map = Mapping::new();

        while let Some(line) = self.lines.get_non_empty_line()? {
            let indent = indent_of(&line);
            if indent < level {
                self.lines.unget_line(line)?;
                break;
            }
            let line_no = self.lines.line_no();
            if indent > level {
                return Err(Error::bad_indent(line_no, level, indent));
            }
            if is_sequence_marker(&line[indent..]) {
                return Err(Error::malformed_entry(
                    line_no,
                    "sequence entry where a mapping key was expected",
                ));
            }

            let (key, inline) = parse_key(&line[indent..], line_no)?;
            let value = self.decode_entry_value(inline, indent, depth, true)?;
            // Duplicate keys overwrite.
            map.insert(key, value);
        }

        Ok(map)
    }

    /// Reads `- ` items at column `level`.
    ///
    /// A compact sequence shares its column with the parent mapping's keys, so
    /// the first non-item line at that column ends it instead of being an error.
    fn decode_sequence(
        &mut self,
        level: usize,
        depth: usize,
        compact: bool,
    ) -> Result<Vec<Value>> {
        let mut seq = Vec::new();

        while let Some(line) = self.lines.get_non_empty_line()? {
            let indent = indent_of(&line);
            if indent < level {
                self.lines.unget_line(line)?;
                break;
            }
            let line_no = self.lines.line_no();
            if indent > level {
                return Err(Error::bad_indent(line_no, level, indent));
            }
            if !is_sequence_marker(&line[indent..]) {
                if compact {
                    self.lines.unget_line(line)?;
                    break;
                }
                return Err(Error::malformed_entry(
                    line_no,
                    "mapping entry where a sequence item was expected",
                ));
            }

            let item_start = indent + 1 + indent_of(&line[indent + 1..]);
            let item = line[item_start..].trim_end();

            if item.is_empty() || item == BLOCK_MARKER {
                let value = self.decode_entry_value(item, indent, depth, false)?;
                seq.push(value);
            } else if has_key_colon(item) || is_sequence_marker(item) {
                // Blank out the dash so the item's entries line up at `item_start`.
                let mut rewritten = line.clone();
                rewritten.replace_range(indent..indent + 1, " ");
                self.lines.unget_line(rewritten)?;
                trace!("inline collection in sequence item at line {}", line_no);
                let value = self
                    .decode_collection(item_start, depth + 1)?
                    .unwrap_or(Value::Null);
                seq.push(value);
            } else {
                seq.push(interpret_scalar(item));
            }
        }

        Ok(seq)
    }

    /// Decodes whatever follows a key's colon or an item's dash.
    ///
    /// `anchor` is the column of the entry that owns the value. Only a key may
    /// own a sequence written at its own column.
    fn decode_entry_value(
        &mut self,
        inline: &str,
        anchor: usize,
        depth: usize,
        from_key: bool,
    ) -> Result<Value> {
        let inline = inline.trim();
        if inline.is_empty() {
            self.decode_nested(anchor, depth, from_key)
        } else if inline == BLOCK_MARKER {
            self.read_block_scalar(anchor)
        } else {
            Ok(interpret_scalar(inline))
        }
    }

    /// Reads the more indented block below an entry, or `Null` if there is none.
    ///
    /// With `compact` set, `- ` lines at the anchor column also form the value.
    fn decode_nested(&mut self, anchor: usize, depth: usize, compact: bool) -> Result<Value> {
        let next = match self.lines.get_non_empty_line()? {
            Some(line) => line,
            None => return Ok(Value::Null),
        };
        let level = indent_of(&next);
        let compact = compact && level == anchor && is_sequence_marker(&next[level..]);
        self.lines.unget_line(next)?;
        if compact {
            if depth + 1 > self.options.max_depth {
                return Err(Error::recursion_limit(
                    self.lines.line_no(),
                    self.options.max_depth,
                ));
            }
            trace!(
                "compact sequence at column {} from line {}",
                level,
                self.lines.line_no()
            );
            let seq = self.decode_sequence(level, depth + 1, true)?;
            return Ok(Value::Sequence(seq));
        }
        if level <= anchor {
            return Ok(Value::Null);
        }

        trace!(
            "nested collection at column {} from line {}",
            level,
            self.lines.line_no()
        );
        Ok(self
            .decode_collection(level, depth + 1)?
            .unwrap_or(Value::Null))
    }

    /// Reads a literal block scalar below the entry at column `anchor`.
    ///
    /// The first content line fixes the left margin; reading stops at the first
    /// line indented less than that margin. The result always ends with exactly
    /// one newline.
    fn read_block_scalar(&mut self, anchor: usize) -> Result<Value> {
        let first = match self.lines.get_non_empty_line()? {
            Some(line) => line,
            None => return Ok(Value::String(String::new())),
        };
        let margin = indent_of(&first);
        if margin <= anchor {
            self.lines.unget_line(first)?;
            return Ok(Value::String(String::new()));
        }

        trace!(
            "block scalar with margin {} at line {}",
            margin,
            self.lines.line_no()
        );
        let mut text = first[margin..].to_string();
        while let Some(line) = self.lines.get_non_empty_line()? {
            if indent_of(&line) < margin {
                self.lines.unget_line(line)?;
                break;
            }
            text.push('\n');
            text.push_str(&line[margin..]);
        }
        text.push('\n');

        Ok(Value::String(text))
    }
}

/// `-` followed by a space or the end of the line.
fn is_sequence_marker(body: &str) -> bool {
    body == "-" || body.starts_with("- ")
}

/// Whether a sequence item holds a `key:` rather than a plain scalar.
fn has_key_colon(item: &str) -> bool {
    match item.strip_prefix('"') {
        Some(quoted) => match find_unescaped(quoted, '"') {
            Some(close) => quoted[close + 1..].trim_start().starts_with(':'),
            None => false,
        },
        None => find_unescaped(item, ':').is_some(),
    }
}

/// Splits a mapping entry into its key and the text after the colon.
///
/// `body` starts at the key's first character.
fn parse_key(body: &str, line_no: usize) -> Result<(String, &str)> {
    if let Some(quoted) = body.strip_prefix('"') {
        let close =
            find_unescaped(quoted, '"').ok_or_else(|| Error::unterminated_quoted_key(line_no))?;
        let inline = quoted[close + 1..]
            .trim_start_matches(' ')
            .strip_prefix(':')
            .ok_or_else(|| Error::malformed_key(line_no, "missing ':' after quoted key"))?;
        return Ok((unescape_key(&quoted[..close]), inline));
    }

    let colon = find_unescaped(body, ':')
        .ok_or_else(|| Error::malformed_key(line_no, "missing ':' after key"))?;
    let key = body[..colon].trim_end();
    if key.is_empty() {
        return Err(Error::malformed_key(line_no, "empty key"));
    }
    if key.contains('"') {
        return Err(Error::malformed_key(
            line_no,
            "unquoted key contains a '\"' character",
        ));
    }
    Ok((key.to_string(), &body[colon + 1..]))
}

/// Undoes the escapes the encoder writes inside a quoted key.
///
/// Unknown escapes are kept as written.
fn unescape_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            key.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => key.push('\n'),
            Some('t') => key.push('\t'),
            Some('r') => key.push('\r'),
            Some('b') => key.push('\u{0008}'),
            Some('f') => key.push('\u{000C}'),
            Some(c @ ('"' | '\\' | '#')) => key.push(c),
            Some(other) => {
                key.push('\\');
                key.push(other);
            }
            None => key.push('\\'),
        }
    }
    key
}

/// Deserializes an instance of `T` from an already decoded tree.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{from_value, yaml};
/// use std::collections::BTreeMap;
///
/// let value = yaml!({"a": 1, "b": 2});
/// let map: BTreeMap<String, u8> = from_value(value).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
///
/// # Errors
///
/// Returns an error if the tree's shape does not match `T`.
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: <Mapping as IntoIterator>::IntoIter,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Mapping) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Value,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Value,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Value::Null => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ValueDeserializer::new(self.value))
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(ValueDeserializer::new(self.value), visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(ValueDeserializer::new(self.value), visitor)
    }
}

/// Feeds a [`Value`] to serde visitors.
///
/// The text format cannot tell `"7"` from `7`, has no null literal and never
/// reads flow collections back, so typed targets get a few coercions: numbers
/// and booleans satisfy string targets (null gives the empty string), the text
/// `null` satisfies options and units, and the texts `[]` and `{}` satisfy
/// sequence and map targets.
struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }

    fn is_null_like(&self) -> bool {
        match &self.value {
            Value::Null => true,
            Value::String(s) => s == "null",
            _ => false,
        }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(n) => match integral_i64(n) {
                Some(i) => visitor.visit_i64(i),
                None if n.fract() == 0.0 && n > 0.0 && n < u64::MAX as f64 => {
                    visitor.visit_u64(n as u64)
                }
                None => visitor.visit_f64(n),
            },
            Value::String(s) => visitor.visit_string(s),
            Value::Sequence(seq) => visitor.visit_seq(SeqDeserializer::new(seq)),
            Value::Mapping(map) => visitor.visit_map(MapDeserializer::new(map)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            // `key:` with nothing after it.
            Value::Null => visitor.visit_string(String::new()),
            Value::Number(n) => visitor.visit_string(format_number(n)),
            Value::Bool(b) => visitor.visit_string(b.to_string()),
            _ => self.deserialize_any(visitor),
        }
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_null_like() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.is_null_like() {
            visitor.visit_unit()
        } else {
            self.deserialize_any(visitor)
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if matches!(&self.value, Value::String(s) if s == "[]") {
            visitor.visit_seq(SeqDeserializer::new(vec![]))
        } else {
            self.deserialize_any(visitor)
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if matches!(&self.value, Value::String(s) if s == "{}") {
            visitor.visit_map(MapDeserializer::new(Mapping::new()))
        } else {
            self.deserialize_any(visitor)
        }
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Mapping(map) if map.len() == 1 => match map.into_iter().next() {
                Some((variant, value)) => visitor.visit_enum(EnumDeserializer { variant, value }),
                None => Err(Error::custom("expected enum variant")),
            },
            other => Err(Error::custom(format!(
                "expected enum, found {}",
                other.type_name()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64
        bytes byte_buf ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(text: &str) -> Result<Mapping> {
        Decoder::new(text.as_bytes()).decode_document()
    }

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn test_indentation_boundary() {
        let doc = decode("a:\n  b: 1\nc: 2\n").unwrap();
        let a = doc.get("a").and_then(Value::as_mapping).unwrap();
        assert_eq!(a.get("b"), Some(&num(1.0)));
        assert_eq!(doc.get("c"), Some(&num(2.0)));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_sequence_of_scalars() {
        let doc = decode("items:\n  - 1\n  - 2\n").unwrap();
        assert_eq!(
            doc.get("items"),
            Some(&Value::Sequence(vec![num(1.0), num(2.0)]))
        );
    }

    #[test]
    fn test_inline_mapping_in_sequence() {
        let doc = decode("list:\n  - name: x\n    val: 1\n  - name: y\n").unwrap();
        let list = doc.get("list").and_then(Value::as_sequence).unwrap();
        assert_eq!(list.len(), 2);
        let first = list[0].as_mapping().unwrap();
        assert_eq!(first.get("name"), Some(&Value::from("x")));
        assert_eq!(first.get("val"), Some(&num(1.0)));
        assert_eq!(list[1].get("name"), Some(&Value::from("y")));
    }

    #[test]
    fn test_sequence_item_with_nested_value() {
        let doc = decode("l:\n  - a:\n      b: 1\n    c: 2\n").unwrap();
        let item = &doc.get("l").and_then(Value::as_sequence).unwrap()[0];
        assert_eq!(item.get("a").and_then(|a| a.get("b")), Some(&num(1.0)));
        assert_eq!(item.get("c"), Some(&num(2.0)));
    }

    #[test]
    fn test_nested_sequences() {
        let doc = decode("m:\n  -\n    - 1\n    - 2\n  - - 3\n").unwrap();
        assert_eq!(
            doc.get("m"),
            Some(&Value::Sequence(vec![
                Value::Sequence(vec![num(1.0), num(2.0)]),
                Value::Sequence(vec![num(3.0)]),
            ]))
        );
    }

    #[test]
    fn test_block_scalar_trailing_newline() {
        let doc = decode("note: |\n  hello\n  world\n").unwrap();
        assert_eq!(doc.get("note"), Some(&Value::from("hello\nworld\n")));

        let doc = decode("note: |\n    one\nnext: 1\n").unwrap();
        assert_eq!(doc.get("note"), Some(&Value::from("one\n")));
        assert_eq!(doc.get("next"), Some(&num(1.0)));
    }

    #[test]
    fn test_block_scalar_keeps_deeper_indentation() {
        let doc = decode("code: |\n  fn main() {\n      body\n  }\n").unwrap();
        assert_eq!(
            doc.get("code"),
            Some(&Value::from("fn main() {\n    body\n}\n"))
        );
    }

    #[test]
    fn test_block_scalar_loses_blank_lines() {
        let doc = decode("text: |\n  a\n\n  b\n").unwrap();
        assert_eq!(doc.get("text"), Some(&Value::from("a\nb\n")));
    }

    #[test]
    fn test_empty_block_scalar() {
        let doc = decode("a: |\nb: 1\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("")));
        assert_eq!(doc.get("b"), Some(&num(1.0)));

        let doc = decode("a: |\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("")));
    }

    #[test]
    fn test_block_scalar_in_sequence() {
        let doc = decode("s:\n  - |\n    x\n    y\n  - z\n").unwrap();
        assert_eq!(
            doc.get("s"),
            Some(&Value::Sequence(vec![Value::from("x\ny\n"), Value::from("z")]))
        );
    }

    #[test]
    fn test_malformed_key() {
        assert!(matches!(
            decode("a b\n"),
            Err(Error::MalformedKey { line: 1, .. })
        ));
        assert!(matches!(
            decode("ok: 1\nx\"y: 2\n"),
            Err(Error::MalformedKey { line: 2, .. })
        ));
        assert!(matches!(
            decode(": 1\n"),
            Err(Error::MalformedKey { .. })
        ));
        assert!(matches!(
            decode("\"key\" 1\n"),
            Err(Error::MalformedKey { .. })
        ));
    }

    #[test]
    fn test_quoted_keys() {
        let doc = decode("\"a:b\": 1\n\"c d\" : 2\n").unwrap();
        assert_eq!(doc.get("a:b"), Some(&num(1.0)));
        assert_eq!(doc.get("c d"), Some(&num(2.0)));
    }

    #[test]
    fn test_unterminated_quoted_key() {
        assert_eq!(
            decode("x: 1\n\"abc: 2\n"),
            Err(Error::UnterminatedQuotedKey { line: 2 })
        );
    }

    #[test]
    fn test_bad_indent() {
        assert_eq!(
            decode("a: 1\n  b: 2\n"),
            Err(Error::BadIndent {
                line: 2,
                expected: 0,
                found: 2
            })
        );
        assert!(matches!(decode("  a: 1\n"), Err(Error::BadIndent { .. })));
    }

    #[test]
    fn test_mixed_entries_are_malformed() {
        assert!(matches!(
            decode("a:\n  b: 1\n  - 2\n"),
            Err(Error::MalformedEntry { line: 3, .. })
        ));
        assert!(matches!(
            decode("a:\n  - 1\n  b: 2\n"),
            Err(Error::MalformedEntry { line: 3, .. })
        ));
        // A compact sequence still may not be followed by deeper keys.
        assert!(matches!(
            decode("a:\n- 1\n  b: 2\n"),
            Err(Error::BadIndent { line: 3, .. })
        ));
    }

    #[test]
    fn test_compact_sequence_under_key() {
        let doc = decode("items:\n- a\n- b\nnext: 1\n").unwrap();
        assert_eq!(
            doc.get("items"),
            Some(&Value::Sequence(vec![Value::from("a"), Value::from("b")]))
        );
        assert_eq!(doc.get("next"), Some(&num(1.0)));

        let doc = decode("outer:\n  list:\n  - name: x\n    val: 1\n  - y\n  tail: z\n").unwrap();
        let outer = doc.get("outer").unwrap();
        let list = outer.get("list").and_then(Value::as_sequence).unwrap();
        assert_eq!(list[0].get("val"), Some(&num(1.0)));
        assert_eq!(list[1], Value::from("y"));
        assert_eq!(outer.get("tail"), Some(&Value::from("z")));
    }

    #[test]
    fn test_sibling_key_at_same_column_is_null() {
        let doc = decode("a:\nb:\n- 1\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::Null));
        assert_eq!(doc.get("b"), Some(&Value::Sequence(vec![num(1.0)])));
    }

    #[test]
    fn test_empty_item_does_not_take_sibling_items() {
        let doc = decode("l:\n  -\n  - 2\n").unwrap();
        assert_eq!(
            doc.get("l"),
            Some(&Value::Sequence(vec![Value::Null, num(2.0)]))
        );
    }

    #[test]
    fn test_quoted_keys_are_unescaped() {
        let doc = decode("\"a\\\"b\": 1\n\"h\\#\": 2\n\"back\\\\\": 3\n\"t\\tx\\q\": 4\n").unwrap();
        assert_eq!(doc.get("a\"b"), Some(&num(1.0)));
        assert_eq!(doc.get("h#"), Some(&num(2.0)));
        assert_eq!(doc.get("back\\"), Some(&num(3.0)));
        // Unknown escapes stay as written.
        assert_eq!(doc.get("t\tx\\q"), Some(&num(4.0)));
    }

    #[test]
    fn test_top_level_must_be_mapping() {
        assert_eq!(
            decode("- 1\n- 2\n"),
            Err(Error::unexpected_top_level("sequence"))
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(decode("").unwrap(), Mapping::new());
        assert_eq!(decode("# only\n---\n...\n\n").unwrap(), Mapping::new());
    }

    #[test]
    fn test_empty_inline_value_is_null() {
        let doc = decode("a:\nb: 1\nc:\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::Null));
        assert_eq!(doc.get("b"), Some(&num(1.0)));
        assert_eq!(doc.get("c"), Some(&Value::Null));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let doc = decode("a: 1\nb: 2\na: 3\n").unwrap();
        assert_eq!(doc.get("a"), Some(&num(3.0)));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_comments_and_markers_are_ignored() {
        let doc = decode("---\n# title\na: 1 # one\n\nb: x\\#y\n...\n").unwrap();
        assert_eq!(doc.get("a"), Some(&num(1.0)));
        assert_eq!(doc.get("b"), Some(&Value::from("x\\#y")));
    }

    #[test]
    fn test_quoted_values_pass_through() {
        let doc = decode("a: \"x\\ty\"\nl:\n  - \"p:q\"\n").unwrap();
        assert_eq!(doc.get("a"), Some(&Value::from("\"x\\ty\"")));
        assert_eq!(
            doc.get("l"),
            Some(&Value::Sequence(vec![Value::from("\"p:q\"")]))
        );
    }

    #[test]
    fn test_negative_number_key_is_not_a_sequence() {
        let doc = decode("-5: minus\n").unwrap();
        assert_eq!(doc.get("-5"), Some(&Value::from("minus")));
    }

    #[test]
    fn test_recursion_limit() {
        let mut text = String::new();
        for depth in 0..10 {
            text.push_str(&" ".repeat(depth * 2));
            text.push_str("k:\n");
        }
        let options = Options::new().with_max_depth(4);
        let err = Decoder::with_options(text.as_bytes(), options)
            .decode_document()
            .unwrap_err();
        assert!(matches!(err, Error::RecursionLimitExceeded { limit: 4, .. }));

        assert!(decode(&text).is_ok());
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let doc = decode("a: 1\r\nb:\r\n  - x\r\n  - y").unwrap();
        assert_eq!(doc.get("a"), Some(&num(1.0)));
        assert_eq!(
            doc.get("b"),
            Some(&Value::Sequence(vec![Value::from("x"), Value::from("y")]))
        );
    }

    #[test]
    fn test_value_deserializer_coercions() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        struct Record {
            name: String,
            count: u32,
            ratio: f64,
            tags: Vec<String>,
            extra: std::collections::BTreeMap<String, i32>,
            missing: Option<i32>,
        }

        let doc = decode("name: 123\ncount: 7\nratio: 2\ntags: []\nextra: {}\nmissing: null\n")
            .unwrap();
        let record: Record = from_value(Value::Mapping(doc)).unwrap();
        assert_eq!(
            record,
            Record {
                name: "123".to_string(),
                count: 7,
                ratio: 2.0,
                tags: vec![],
                extra: Default::default(),
                missing: None,
            }
        );
    }

    #[test]
    fn test_value_deserializer_enums() {
        use serde::Deserialize;

        #[derive(Deserialize, Debug, PartialEq)]
        enum Shape {
            Empty,
            Circle(f64),
            Rect { w: u32, h: u32 },
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Doc {
            shapes: Vec<Shape>,
        }

        let text = "shapes:\n  - Empty\n  - Circle: 1.5\n  - Rect:\n      w: 2\n      h: 3\n";
        let doc: Doc = from_value(Value::Mapping(decode(text).unwrap())).unwrap();
        assert_eq!(
            doc.shapes,
            vec![Shape::Empty, Shape::Circle(1.5), Shape::Rect { w: 2, h: 3 }]
        );
    }
}
