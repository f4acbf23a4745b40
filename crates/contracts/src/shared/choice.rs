//! Yes/no selects as the collection forms submit them.

use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Serialised lowercase; stored rows come back as `"Yes"`, `"no"`, `1`, `true`...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YesNo {
    Yes,
    #[default]
    No,
}

impl YesNo {
    pub fn as_str(&self) -> &'static str {
        match self {
            YesNo::Yes => "yes",
            YesNo::No => "no",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    pub fn is_yes(&self) -> bool {
        *self == YesNo::Yes
    }

    /// Value of an HTML `<select>`; anything but "yes" reads as `No`.
    pub fn from_select(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("yes") {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl From<bool> for YesNo {
    fn from(flag: bool) -> Self {
        if flag {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl Serialize for YesNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// `serialize_with` for tables that keep the capitalised label.
pub fn serialize_label<S: Serializer>(value: &YesNo, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.label())
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(YesNo::No),
            Some(Value::Bool(b)) => Ok(b.into()),
            Some(Value::Number(n)) => Ok((n.as_f64().unwrap_or(0.0) != 0.0).into()),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "true" | "1" => Ok(YesNo::Yes),
                "no" | "false" | "0" | "" => Ok(YesNo::No),
                other => Err(D::Error::custom(format!("expected yes or no, got {other:?}"))),
            },
            Some(other) => Err(D::Error::custom(format!("expected yes or no, got {other}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_spellings() {
        for (raw, expected) in [
            ("\"Yes\"", YesNo::Yes),
            ("\"no\"", YesNo::No),
            ("1", YesNo::Yes),
            ("false", YesNo::No),
            ("null", YesNo::No),
        ] {
            assert_eq!(serde_json::from_str::<YesNo>(raw).unwrap(), expected, "{raw}");
        }
        assert!(serde_json::from_str::<YesNo>("\"sometimes\"").is_err());
        assert_eq!(serde_json::to_string(&YesNo::Yes).unwrap(), "\"yes\"");
    }

    #[test]
    fn test_from_select() {
        assert_eq!(YesNo::from_select("Yes"), YesNo::Yes);
        assert_eq!(YesNo::from_select("no"), YesNo::No);
        assert_eq!(YesNo::from_select(""), YesNo::No);
    }
}
