//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::Serialize;
use serde_yamlite::{encode, from_str, to_value, yaml, Value};
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = yaml!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "limits": {},
        "debug": true
    });

    println!("Config:\n{}", encode(&config));

    if let Some(host) = config.get("host").and_then(Value::as_str) {
        println!("Accessing field 'host': {}", host);
    }
    if let Some(port) = config.get("port").and_then(Value::as_i64) {
        println!("Accessing field 'port': {}", port);
    }
    if let Some(features) = config.get("features").and_then(Value::as_sequence) {
        println!("Accessing field 'features': {} items\n", features.len());
    }

    // Empty collections come back as text.
    let decoded: Value = from_str(&encode(&config))?;
    println!("'limits' after decoding: {:?}\n", decoded.get("limits"));

    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}", user_value);

    println!("Type checks:");
    println!("  is_mapping:  {}", user_value.is_mapping());
    println!("  is_sequence: {}", user_value.is_sequence());
    println!("  is_string:   {}", user_value.is_string());

    Ok(())
}
