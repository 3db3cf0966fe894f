//! Persisted name-list format
//!
//! A list of names is stored as double-quoted names joined by `", "`,
//! e.g. `"first", "second"`. Each name is written as a JSON string literal so
//! the value reads back as the body of a JSON array.

use serde_json::Value;

/// Encode names in order
pub fn encode_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    names
        .into_iter()
        .map(|name| Value::String(name.to_string()).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Decode a stored value back into names, in stored order
pub fn decode_names(value: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(&format!("[{}]", value))
}
