//! Classification of inline scalar tokens.
//!
//! Quoted tokens are not unquoted or unescaped: the token `"x"` decodes to the
//! three-character text `"x"`, quotes included.

use crate::Value;

/// Interprets a trimmed inline token as a boolean, a number or text.
///
/// # Examples
///
/// ```rust
/// use serde_yamlite::{interpret_scalar, Value};
///
/// assert_eq!(interpret_scalar("true"), Value::Bool(true));
/// assert_eq!(interpret_scalar("007"), Value::Number(7.0));
/// assert_eq!(interpret_scalar("abc"), Value::from("abc"));
/// ```
#[must_use]
pub fn interpret_scalar(token: &str) -> Value {
    match token {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match token.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::String(token.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booleans() {
        assert_eq!(interpret_scalar("true"), Value::Bool(true));
        assert_eq!(interpret_scalar("false"), Value::Bool(false));
        assert_eq!(interpret_scalar("True"), Value::from("True"));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_numbers() {
        assert_eq!(interpret_scalar("3.14"), Value::Number(3.14));
        assert_eq!(interpret_scalar("-2"), Value::Number(-2.0));
        assert_eq!(interpret_scalar("007"), Value::Number(7.0));
        assert_eq!(interpret_scalar("1e3"), Value::Number(1000.0));
    }

    #[test]
    fn test_text_passes_through() {
        assert_eq!(interpret_scalar("abc"), Value::from("abc"));
        assert_eq!(interpret_scalar("\"quoted\""), Value::from("\"quoted\""));
        assert_eq!(interpret_scalar("null"), Value::from("null"));
        assert_eq!(interpret_scalar("1.2.3"), Value::from("1.2.3"));
    }
}
