//! Working with Value for runtime flexibility.
//!
//! Run with: cargo run --example dynamic_values

use serde::{Deserialize, Serialize};
use serde_tueson::{to_string, to_value, tueson, Value};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with the tueson! macro
    let config = tueson!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config as tueson:\n{}", to_string(&config)?);

    // Access values dynamically
    if let Value::Record(fields) = &config {
        if let Some(host) = fields.get("host").and_then(|v| v.as_str()) {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = fields.get("port").and_then(|v| v.as_i64()) {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(Value::List(features)) = fields.get("features") {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    // Convert an existing struct to Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = to_value(&user)?;
    println!("User as Value:\n{}", to_string(&user_value)?);

    // Parse a document whose shape isn't known in advance
    let incoming = "record\n  kind 'greeting\n  body text\n    hello\n    world\n";
    let parsed: Value = incoming.parse()?;
    println!(
        "Parsed kind: {:?}",
        parsed.as_record().and_then(|r| r.get("kind")).and_then(|v| v.as_str())
    );

    Ok(())
}
