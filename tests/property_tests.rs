//! Property-based tests for the round-trip guarantees.
//!
//! Generated trees stay inside the part of the value space that survives a
//! trip through text: non-empty collections, and string values that cannot be
//! mistaken for numbers, booleans, comments or entries. Keys may be anything
//! the writer can quote.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use serde_yamlite::{encode, from_str, to_string, Mapping, Value};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn safe_text() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_ .-]{0,12}[a-zA-Z0-9_]"
        .prop_filter("looks like a scalar", |s| {
            s.parse::<f64>().is_err() && s != "true" && s != "false" && s != "null"
        })
}

fn safe_key() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,8}"
}

// Keys the writer has to quote and escape.
fn risky_key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z:#\"\\\\ -]{1,8}",
        "[ -][a-z]{0,4}",
        "[a-z]{0,4}[ \\\\]",
    ]
}

fn any_key() -> impl Strategy<Value = String> {
    prop_oneof![3 => safe_key(), 1 => risky_key()]
}

fn number() -> impl Strategy<Value = f64> {
    prop_oneof![
        (-1_000_000i64..1_000_000).prop_map(|n| n as f64),
        (-1.0e6f64..1.0e6).prop_filter("finite", |n| n.is_finite()),
    ]
}

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        number().prop_map(Value::Number),
        safe_text().prop_map(Value::String),
        prop::collection::vec(safe_text(), 1..4)
            .prop_map(|lines| Value::String(lines.join("\n") + "\n")),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Value::Sequence),
            prop::collection::vec((any_key(), inner), 1..4)
                .prop_map(|entries| Value::Mapping(entries.into_iter().collect())),
        ]
    })
}

fn document() -> impl Strategy<Value = Mapping> {
    prop::collection::vec((any_key(), tree()), 1..5)
        .prop_map(|entries| entries.into_iter().collect())
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Record {
    id: u32,
    score: i64,
    enabled: bool,
    tags: Vec<String>,
    limit: Option<u16>,
}

proptest! {
    #[test]
    fn prop_document_roundtrip(doc in document()) {
        let value = Value::Mapping(doc);
        let text = encode(&value);
        let decoded: Value = from_str(&text).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_reencode_is_stable(doc in document()) {
        let text = encode(&Value::Mapping(doc));
        let decoded: Value = from_str(&text).unwrap();
        prop_assert_eq!(encode(&decoded), text);
    }

    #[test]
    fn prop_record_roundtrip(
        id in any::<u32>(),
        score in -(1i64 << 53)..(1i64 << 53),
        enabled in any::<bool>(),
        tags in prop::collection::vec(safe_text(), 0..5),
        limit in proptest::option::of(any::<u16>()),
    ) {
        let record = Record { id, score, enabled, tags, limit };
        prop_assert!(roundtrip(&record));
    }

    #[test]
    fn prop_nested_sequences(v in prop::collection::vec(prop::collection::vec(any::<i32>(), 0..5), 0..5)) {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Grid {
            rows: Vec<Vec<i32>>,
        }
        let grid = Grid { rows: v };
        prop_assert!(roundtrip(&grid));
    }

    #[test]
    fn prop_risky_keys_roundtrip(key in risky_key(), value in leaf()) {
        let mut doc = Mapping::new();
        doc.insert(key.clone(), value);
        let nested = Value::Mapping(
            std::iter::once(("list".to_string(), Value::Sequence(vec![Value::Mapping(doc.clone())])))
                .collect(),
        );

        let decoded: Value = from_str(&encode(&Value::Mapping(doc.clone()))).unwrap();
        prop_assert_eq!(decoded, Value::Mapping(doc));
        let decoded: Value = from_str(&encode(&nested)).unwrap();
        prop_assert_eq!(decoded, nested);
    }

    #[test]
    fn prop_decoder_never_panics(text in "[ a-z:#|\"\\-\n]{0,64}") {
        let _ = from_str::<Value>(&text);
    }
}
