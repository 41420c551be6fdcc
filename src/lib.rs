//! # serde_yamlite
//!
//! A Serde-compatible codec for a small, indentation-based subset of YAML.
//!
//! ## What is accepted?
//!
//! Block mappings and block sequences nested by spaces, plain scalars, `|`
//! literal blocks, `#` comments and the `---` / `...` document markers. There
//! are no anchors, aliases, tags, flow collections or multi-document streams.
//! The document itself must be a mapping. See [`syntax`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Small**: a hand-written line-based parser with one line of lookahead
//! - **Deterministic**: mappings keep insertion order, so encoding is stable
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]` types
//! - **Bounded**: decoding depth is capped (see [`Options`])
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_yamlite = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization and Deserialization
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_yamlite::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Service {
//!     name: String,
//!     port: u16,
//!     hosts: Vec<String>,
//! }
//!
//! let service = Service {
//!     name: "api".to_string(),
//!     port: 8080,
//!     hosts: vec!["a.local".to_string(), "b.local".to_string()],
//! };
//!
//! let text = to_string(&service).unwrap();
//! assert_eq!(text, "name: api\nport: 8080\nhosts:\n    - a.local\n    - b.local\n");
//!
//! let back: Service = from_str(&text).unwrap();
//! assert_eq!(service, back);
//! ```
//!
//! ### Dynamic Values
//!
//! ```rust
//! use serde_yamlite::{from_str, Value};
//!
//! let doc: Value = from_str("server:\n  port: 80\n  tls: false\n").unwrap();
//! assert_eq!(doc.get("server").and_then(|s| s.get("port")), Some(&Value::Number(80.0)));
//! ```
//!
//! ## Lossy corners
//!
//! The text carries no types, so a string that looks like a number or boolean
//! decodes as one, and quoted values keep their quotes. Typed deserialization
//! papers over the common cases; see [`from_value`].
//!
//! ## Examples
//!
//! The `demos/` directory holds runnable programs:
//!
//! - **`simple.rs`** - round-tripping a struct
//! - **`dynamic_values.rs`** - building and inspecting [`Value`] trees
//! - **`yaml2json.rs`** - converting documents to JSON
//! - **`json2yaml.rs`** - converting JSON to documents
//!
//! Run any of them with: `cargo run --example <name>`

pub mod de;
pub mod error;
mod lines;
pub mod macros;
pub mod map;
pub mod options;
mod scalar;
pub mod ser;
pub mod syntax;
pub mod value;

pub use de::{from_value, Decoder};
pub use error::{Error, Result};
pub use map::Mapping;
pub use options::Options;
pub use scalar::interpret_scalar;
pub use ser::{to_value, ValueSerializer};
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// Renders a value tree as text.
///
/// Encoding cannot fail. A mapping renders as a document; other roots render
/// too but do not decode back.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{encode, yaml};
///
/// let value = yaml!({"items": [], "name": "x"});
/// assert_eq!(encode(&value), "items: []\nname: x\n");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    let mut emitter = ser::Emitter::new();
    emitter.write_document(value);
    emitter.into_inner()
}

/// Serialize any `T: Serialize` to a string.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x: 1\ny: 2\n");
/// ```
///
/// # Errors
///
/// Returns an error if a map key is not a scalar or a `Serialize` impl fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(encode(&to_value(value)?))
}

/// Serialize any `T: Serialize` to a writer.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("k", "v");
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &map).unwrap();
/// assert_eq!(buffer, b"k: v\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Deserialize an instance of type `T` from a document.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x: 1\ny: 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text is malformed, the document is not a mapping,
/// or the tree cannot be deserialized to type `T`. Decode errors carry the
/// line number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    decode_into(s.as_bytes())
}

/// Deserialize an instance of type `T` from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, or for any reason
/// [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream.
///
/// The stream is read line by line as decoding proceeds.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x: 1\ny: 2\n")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, or for any reason [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    decode_into(io::BufReader::new(reader))
}

/// Deserialize an instance of type `T` from the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be opened or read, or for any
/// reason [`from_str`] fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P, T>(path: P) -> Result<T>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let file = File::open(path)?;
    from_reader(file)
}

fn decode_into<R, T>(reader: R) -> Result<T>
where
    R: io::BufRead,
    T: DeserializeOwned,
{
    let doc = Decoder::new(reader).decode_document()?;
    from_value(Value::Mapping(doc))
}
