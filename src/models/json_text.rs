//! Serialization for JSON documents stored in text columns
//!
//! `media_url` and `other_fees` are kept as JSON text so both backends can
//! store them. They are parsed on the way out so clients get real JSON.
//! Text that does not parse is passed through as a plain string.

use serde::{Serialize, Serializer};
use serde_json::Value;

pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value.as_deref().map(parse) {
        Some(parsed) => parsed.serialize(serializer),
        None => serializer.serialize_none(),
    }
}

fn parse(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
