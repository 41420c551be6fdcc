//! The [`yaml!`] macro for building [`Value`](crate::Value) trees inline.
//!
//! ```rust
//! use serde_yamlite::{encode, yaml};
//!
//! let value = yaml!({
//!     "name": "demo",
//!     "ports": [80, 443],
//!     "tls": {"enabled": true}
//! });
//! assert_eq!(
//!     encode(&value),
//!     "name: demo\nports:\n    - 80\n    - 443\ntls:\n    enabled: true\n"
//! );
//! ```

#[macro_export]
macro_rules! yaml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Sequence(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Sequence(vec![$($crate::yaml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Mapping($crate::Mapping::new())
    };

    // Keys keep the order they are written in.
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut mapping = $crate::Mapping::new();
        $(
            mapping.insert($key.to_string(), $crate::yaml!($value));
        )*
        $crate::Value::Mapping(mapping)
    }};

    // Anything else goes through serde.
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Mapping, Value};

    #[test]
    fn test_yaml_macro_primitives() {
        assert_eq!(yaml!(null), Value::Null);
        assert_eq!(yaml!(true), Value::Bool(true));
        assert_eq!(yaml!(false), Value::Bool(false));
        assert_eq!(yaml!(42), Value::Number(42.0));
        assert_eq!(yaml!(3.5), Value::Number(3.5));
        assert_eq!(yaml!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn test_yaml_macro_sequences() {
        assert_eq!(yaml!([]), Value::Sequence(vec![]));
        assert_eq!(
            yaml!([1, "two", [3]]),
            Value::Sequence(vec![
                Value::Number(1.0),
                Value::from("two"),
                Value::Sequence(vec![Value::Number(3.0)]),
            ])
        );
    }

    #[test]
    fn test_yaml_macro_mappings() {
        assert_eq!(yaml!({}), Value::Mapping(Mapping::new()));

        let value = yaml!({
            "name": "Alice",
            "age": 30
        });
        let map = value.as_mapping().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age"]);
        assert_eq!(map.get("age"), Some(&Value::Number(30.0)));
    }

    #[test]
    fn test_yaml_macro_expressions() {
        let port: u16 = 8080;
        assert_eq!(yaml!(port), Value::Number(8080.0));
        assert_eq!(yaml!(Some("x")), Value::from("x"));
    }
}
