//! Accepted syntax
//!
//! This module documents the subset of YAML read and written by this library.
//!
//! # Lines
//!
//! Input is read one line at a time. A line ends at `\n`; a `\r` just before it
//! is dropped as well. Before a line is looked at:
//!
//! - everything from the first `#` not preceded by a backslash is removed
//! - lines left empty or holding only spaces are skipped
//! - lines consisting of exactly `---` or `...` are skipped
//!
//! Indentation is the number of leading space characters. Tabs are not
//! indentation.
//!
//! ```rust
//! use serde_yamlite::{from_str, Value};
//!
//! let doc: Value = from_str("---\n# settings\nname: demo # inline comment\n...\n").unwrap();
//! assert_eq!(doc.get("name"), Some(&Value::from("demo")));
//! ```
//!
//! # Mappings
//!
//! A mapping entry is `key: value`. The key runs up to the first unescaped `:`
//! and has trailing spaces trimmed; it may not contain `"`. A key can instead be
//! double-quoted, in which case it runs to the next unescaped `"` and must be
//! followed by `:`. Inside a quoted key `\"`, `\\`, `\#`, `\n`, `\t`, `\r`, `\b`
//! and `\f` are escapes; the writer quotes any key holding one of those
//! characters, a `:`, or leading and trailing whitespace.
//!
//! ```text
//! name: Alice
//! "http:port": 8080
//! ```
//!
//! All entries of one mapping sit at the same column. A key with nothing after
//! its colon takes the following, more indented lines as its value; if the next
//! line is not more indented the value is null.
//!
//! ```text
//! server:
//!   host: localhost
//!   port: 8080
//! empty:
//! ```
//!
//! Repeating a key replaces the earlier value.
//!
//! # Sequences
//!
//! A sequence item starts with `-` followed by a space or the end of the line.
//! What follows the dash is either a scalar, a `|` block, or the first entry of
//! a mapping whose other entries line up under it. A bare `-` takes the
//! following, more indented lines as its value.
//!
//! ```text
//! items:
//!   - one
//!   - name: two
//!     weight: 2
//!   -
//!     - nested
//! ```
//!
//! A key's sequence may also sit at the key's own column. It ends at the first
//! line in that column that is not a `-` item.
//!
//! ```rust
//! use serde_yamlite::{from_str, Value};
//!
//! let doc: Value = from_str("items:\n- a\n- b\ncount: 2\n").unwrap();
//! assert_eq!(doc.get("items").and_then(Value::as_sequence).map(Vec::len), Some(2));
//! assert_eq!(doc.get("count"), Some(&Value::Number(2.0)));
//! ```
//!
//! Otherwise one collection cannot mix `-` items and keys.
//!
//! # Scalars
//!
//! A scalar is the trimmed rest of the line. `true` and `false` are booleans;
//! anything that parses as a decimal floating point number is a number;
//! everything else is text, taken literally. Quotes around a value are kept.
//!
//! ```rust
//! use serde_yamlite::{from_str, Value};
//!
//! let doc: Value = from_str("a: 007\nb: true\nc: \"quoted\"\nd: null\n").unwrap();
//! assert_eq!(doc.get("a"), Some(&Value::Number(7.0)));
//! assert_eq!(doc.get("b"), Some(&Value::Bool(true)));
//! assert_eq!(doc.get("c"), Some(&Value::from("\"quoted\"")));
//! assert_eq!(doc.get("d"), Some(&Value::from("null")));
//! ```
//!
//! # Literal blocks
//!
//! `key: |` (or `- |`) starts a literal block. Its first line sets the left
//! margin, which must be deeper than the owning entry. The block ends at the
//! first line indented less than the margin. Lines are joined with `\n` and the
//! result ends with exactly one `\n`.
//!
//! ```rust
//! use serde_yamlite::{from_str, Value};
//!
//! let doc: Value = from_str("note: |\n  hello\n    world\nnext: 1\n").unwrap();
//! assert_eq!(doc.get("note"), Some(&Value::from("hello\n  world\n")));
//! ```
//!
//! Blank lines and comment lines inside a block are dropped.
//!
//! # Writing
//!
//! Output uses 4 spaces per mapping level and 2 per sequence level. Empty
//! collections are written as `[]` and `{}` on the key line; they read back as
//! the text `[]` and `{}`. Null is written as `null`, which reads back as text.
//! Strings containing a tab, carriage return, backspace or form feed are
//! double-quoted with backslash escapes; other strings containing a newline are
//! written as literal blocks.
//!
//! ```rust
//! use serde_yamlite::{encode, yaml};
//!
//! let value = yaml!({"list": [{"a": 1, "b": 2}], "note": "x\ny\n"});
//! assert_eq!(encode(&value), "list:\n    - a: 1\n      b: 2\nnote: |\n    x\n    y\n");
//! ```
//!
//! # Not supported
//!
//! Anchors and aliases, tags, flow collections with content, complex keys,
//! escapes inside quoted values and multiple documents.
