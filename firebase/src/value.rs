//! Firestore's typed JSON value encoding.
//!
//! Every field in a REST document is wrapped in a single-key object naming its
//! type, e.g. `{"stringValue": "piyo"}` or `{"integerValue": "12"}`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 travels as a decimal string.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::StringValue(s.into())
    }

    /// Render scalar values as text. Documents written by other clients may store
    /// numbers natively where we keep them as strings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::StringValue(s) => Some(s.clone()),
            Value::IntegerValue(i) => Some(i.clone()),
            Value::DoubleValue(d) => Some(d.to_string()),
            Value::BooleanValue(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::IntegerValue(i) => i.parse().ok(),
            _ => None,
        }
    }
}

/// A Firestore document as returned by `GET` and accepted by `PATCH`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.fields.get(name).and_then(Value::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_written_by_web_client() {
        let raw = r#"{
            "name": "projects/p/databases/(default)/documents/users/u1/profile/current",
            "fields": {
                "nickname": {"stringValue": "piyo"},
                "height": {"integerValue": "170"},
                "goalFat": {"doubleValue": 12.5},
                "sex": {"stringValue": "male"},
                "tags": {"arrayValue": {}},
                "note": {"nullValue": null}
            },
            "createTime": "2024-05-01T10:00:00.000000Z",
            "updateTime": "2024-05-02T10:00:00.000000Z"
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();

        assert_eq!(doc.text("nickname").as_deref(), Some("piyo"));
        assert_eq!(doc.text("height").as_deref(), Some("170"));
        assert_eq!(doc.text("goalFat").as_deref(), Some("12.5"));
        assert_eq!(doc.text("note"), None);
        assert_eq!(doc.text("missing"), None);
        assert_eq!(
            doc.fields.get("tags"),
            Some(&Value::ArrayValue(ArrayValue::default()))
        );
    }

    #[test]
    fn patch_body_omits_server_metadata() {
        let doc = Document::new().with_field("nickname", Value::string("piyo"));
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"fields": {"nickname": {"stringValue": "piyo"}}})
        );
    }

    #[test]
    fn integer_value_parses_from_string() {
        assert_eq!(Value::IntegerValue("42".to_string()).as_integer(), Some(42));
        assert_eq!(Value::string("42").as_integer(), None);
    }
}
