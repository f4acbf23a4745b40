//! Lenient field deserializers for collection payloads.
//!
//! The backend stores flags and ids in SQLite and serialises them loosely
//! (`1`, `"1"`, `true`, `"Yes"` all mean the same thing).

use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts booleans, `0`/`1`, and the strings `true/false`, `1/0`, `yes/no`.
/// `null` and missing values are `false`.
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(b),
        Some(Value::Number(n)) => Ok(n.as_f64().map(|f| f != 0.0).unwrap_or(false)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" => Ok(true),
            "0" | "false" | "no" | "" => Ok(false),
            other => Err(D::Error::custom(format!("invalid flag value: {other}"))),
        },
        Some(other) => Err(D::Error::custom(format!("invalid flag value: {other}"))),
    }
}

/// Ids arrive as integers from some tables and as strings from others.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Text column that may be `null` or numeric in stored rows.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(other) => Err(D::Error::custom(format!("invalid text: {other}"))),
    }
}

/// Optional numeric field that may be encoded as a string.
pub fn optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| D::Error::custom(format!("invalid number {s:?}: {e}"))),
        Some(other) => Err(D::Error::custom(format!("invalid number: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "flexible_bool")]
        disabled: bool,
        #[serde(default, deserialize_with = "optional_f64")]
        created_at: Option<f64>,
        #[serde(default, deserialize_with = "lenient_string")]
        note: String,
    }

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flags() {
        for truthy in ["1", "\"1\"", "true", "\"true\"", "\"Yes\""] {
            assert!(row(&format!(r#"{{"id":1,"disabled":{truthy}}}"#)).disabled, "{truthy}");
        }
        for falsy in ["0", "\"0\"", "false", "\"no\"", "null"] {
            assert!(!row(&format!(r#"{{"id":1,"disabled":{falsy}}}"#)).disabled, "{falsy}");
        }
        assert!(!row(r#"{"id":1}"#).disabled);
        assert!(serde_json::from_str::<Row>(r#"{"id":1,"disabled":"maybe"}"#).is_err());
    }

    #[test]
    fn test_ids() {
        assert_eq!(row(r#"{"id":42}"#).id, "42");
        assert_eq!(row(r#"{"id":"abc-1"}"#).id, "abc-1");
    }

    #[test]
    fn test_lenient_text() {
        assert_eq!(row(r#"{"id":1,"note":null}"#).note, "");
        assert_eq!(row(r#"{"id":1,"note":0}"#).note, "0");
        assert_eq!(row(r#"{"id":1,"note":"-1h"}"#).note, "-1h");
        assert_eq!(row(r#"{"id":1}"#).note, "");
    }

    #[test]
    fn test_optional_numbers() {
        assert_eq!(row(r#"{"id":1,"created_at":1700000000}"#).created_at, Some(1.7e9));
        assert_eq!(row(r#"{"id":1,"created_at":"12.5"}"#).created_at, Some(12.5));
        assert_eq!(row(r#"{"id":1,"created_at":""}"#).created_at, None);
        assert_eq!(row(r#"{"id":1}"#).created_at, None);
    }
}
