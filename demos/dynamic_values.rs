//! Working with JSON values and XML elements at runtime.
//!
//! Run with: cargo run --example dynamic_values

use plaindoc::json;
use plaindoc::json::Value;
use plaindoc::xml::{self, Element};
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    roles: Vec<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Build config dynamically with json! macro
    let config = json!({
        "host": "localhost",
        "port": 8080,
        "features": ["auth", "logging", "metrics"],
        "debug": true
    });

    println!("Config:\n{}", json::to_string(&config));

    if let Value::Object(obj) = &config {
        if let Some(host) = obj.get_str("host") {
            println!("Accessing field 'host': {}", host);
        }

        if let Some(port) = obj.get_i64("port") {
            println!("Accessing field 'port': {}", port);
        }

        if let Some(features) = obj.get_array("features") {
            println!("Accessing field 'features': {} items\n", features.len());
        }
    }

    // Convert existing struct to Value
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        roles: vec!["admin".to_string(), "developer".to_string()],
    };

    let user_value = json::to_value(&user)?;
    println!("User as Value:\n{}", user_value);

    // The same data as an element tree
    let mut root = Element::named("user");
    root.add_attribute("id", &user.id.to_string());
    let mut name = Element::named("name");
    name.set_text(&user.name);
    root.add_child(name);

    let text = xml::to_string(&root);
    println!("User as XML:\n{}", text);
    let reparsed = xml::from_str(&text)?;
    println!("Round trip equal: {}", reparsed == root);

    Ok(())
}
