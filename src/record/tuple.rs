//! Records and field values.

use serde::{Deserialize, Serialize};

use crate::types::Span;

/// One field value inside a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum FieldValue {
    String(String),
    Text(String),
    Integer(i64),
    Double(f64),
    SpanList(Vec<Span>),
}

impl FieldValue {
    /// Text view of the field, present only for string-like values.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_span_list(&self) -> Option<&[Span]> {
        match self {
            FieldValue::SpanList(spans) => Some(spans),
            _ => None,
        }
    }
}

/// One record: ordered `(attribute name, value)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tuple {
    fields: Vec<(String, FieldValue)>,
}

impl Tuple {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    pub fn add_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.push((name.into(), value));
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_lookup_preserves_insertion_order() {
        let tuple = Tuple::new()
            .with_field("id", FieldValue::Integer(7))
            .with_field("content", FieldValue::Text("hello".into()));
        assert_eq!(tuple.fields()[0].0, "id");
        assert_eq!(tuple.field("content").and_then(FieldValue::as_text), Some("hello"));
        assert!(tuple.field("missing").is_none());
    }

    #[test]
    fn as_text_rejects_non_string_fields() {
        assert!(FieldValue::Integer(3).as_text().is_none());
        assert_eq!(FieldValue::String("x".into()).as_text(), Some("x"));
    }
}
