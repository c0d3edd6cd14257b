use std::fmt;

use chrono::NaiveDateTime;

use crate::temporal;

/// An attribute value.
///
/// Attributes set through the console are always text; the timestamp
/// variant only appears for `created_at` and `updated_at`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    Text(String),
    Timestamp(NaiveDateTime),
}

impl AttrValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Timestamp(_) => None,
        }
    }

    /// Render for persistence and display; timestamps become ISO-8601.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Timestamp(ts) => temporal::format(ts),
        }
    }

    /// Convert a JSON value from a record or argument body.
    ///
    /// Strings are taken as-is; anything else keeps its JSON text.
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NaiveDateTime> for AttrValue {
    fn from(ts: NaiveDateTime) -> Self {
        Self::Timestamp(ts)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_strings() {
        assert_eq!(AttrValue::from_json(&json!("Betty")), AttrValue::from("Betty"));
    }

    #[test]
    fn from_json_stringifies_scalars() {
        assert_eq!(AttrValue::from_json(&json!(4)), AttrValue::from("4"));
        assert_eq!(AttrValue::from_json(&json!(9.5)), AttrValue::from("9.5"));
        assert_eq!(AttrValue::from_json(&json!(true)), AttrValue::from("true"));
        assert_eq!(AttrValue::from_json(&json!([])), AttrValue::from("[]"));
    }

    #[test]
    fn timestamp_renders_iso() {
        let ts = temporal::parse("created_at", "2026-01-02T03:04:05.000006").unwrap();
        assert_eq!(AttrValue::from(ts).render(), "2026-01-02T03:04:05.000006");
        assert_eq!(AttrValue::from(ts).as_text(), None);
    }
}
