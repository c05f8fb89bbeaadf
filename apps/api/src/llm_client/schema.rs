//! Schema-with-defaults merge for loosely-typed LLM output.
//!
//! Providers enforce no schema, so every AI response object is passed through
//! `merge_with_defaults` before a typed record is built from it. The merge never fails:
//! - missing (or `null`) keys take the field's default
//! - list fields holding a scalar or object become a one-element list of its string form
//! - object fields holding anything else become `{"summary": <string form>}`
//! - text fields holding a non-string take its string form
//!
//! Keys outside the schema are dropped.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    List,
    Object,
    Text { default: &'static str },
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn list(key: &'static str) -> Self {
        Self { key, kind: FieldKind::List }
    }

    pub const fn object(key: &'static str) -> Self {
        Self { key, kind: FieldKind::Object }
    }

    pub const fn text(key: &'static str, default: &'static str) -> Self {
        Self { key, kind: FieldKind::Text { default } }
    }
}

/// A response object with every schema key present and correctly shaped.
#[derive(Debug, Clone)]
pub struct MergedRecord {
    fields: Map<String, Value>,
    /// Keys that were defaulted or coerced, for logging.
    pub repaired: Vec<&'static str>,
}

impl MergedRecord {
    pub fn list(&self, key: &str) -> Vec<Value> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    /// List field rendered as strings (string elements verbatim, others as JSON).
    pub fn string_list(&self, key: &str) -> Vec<String> {
        self.list(key).iter().map(string_form).collect()
    }

    pub fn object(&self, key: &str) -> Map<String, Value> {
        self.fields
            .get(key)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    }

    pub fn text(&self, key: &str) -> String {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }
}

pub fn merge_with_defaults(raw: &Map<String, Value>, schema: &[FieldSpec]) -> MergedRecord {
    let mut fields = Map::new();
    let mut repaired = Vec::new();

    for spec in schema {
        let value = raw.get(spec.key).filter(|v| !v.is_null());
        let (merged, was_repaired) = match (spec.kind, value) {
            (FieldKind::List, Some(Value::Array(items))) => (Value::Array(items.clone()), false),
            (FieldKind::List, Some(other)) => {
                (Value::Array(vec![Value::String(string_form(other))]), true)
            }
            (FieldKind::List, None) => (Value::Array(vec![]), true),

            (FieldKind::Object, Some(Value::Object(map))) => (Value::Object(map.clone()), false),
            (FieldKind::Object, Some(other)) => {
                let mut map = Map::new();
                map.insert("summary".to_string(), Value::String(string_form(other)));
                (Value::Object(map), true)
            }
            (FieldKind::Object, None) => (Value::Object(Map::new()), true),

            (FieldKind::Text { .. }, Some(Value::String(s))) => (Value::String(s.clone()), false),
            (FieldKind::Text { .. }, Some(other)) => (Value::String(string_form(other)), true),
            (FieldKind::Text { default }, None) => (Value::String(default.to_string()), true),
        };

        if was_repaired {
            repaired.push(spec.key);
        }
        fields.insert(spec.key.to_string(), merged);
    }

    MergedRecord { fields, repaired }
}

fn string_form(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::list("items"),
        FieldSpec::object("plan"),
        FieldSpec::text("note", "No note provided."),
    ];

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_well_formed_input_passes_through() {
        let merged = merge_with_defaults(
            &raw(json!({"items": [1, 2], "plan": {"a": "b"}, "note": "hi"})),
            SCHEMA,
        );
        assert_eq!(merged.list("items"), vec![json!(1), json!(2)]);
        assert_eq!(merged.object("plan").get("a"), Some(&json!("b")));
        assert_eq!(merged.text("note"), "hi");
        assert!(merged.repaired.is_empty());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let merged = merge_with_defaults(&Map::new(), SCHEMA);
        assert!(merged.list("items").is_empty());
        assert!(merged.object("plan").is_empty());
        assert_eq!(merged.text("note"), "No note provided.");
        assert_eq!(merged.repaired, vec!["items", "plan", "note"]);
    }

    #[test]
    fn test_null_is_treated_as_missing() {
        let merged = merge_with_defaults(&raw(json!({"items": null, "note": null})), SCHEMA);
        assert!(merged.list("items").is_empty());
        assert_eq!(merged.text("note"), "No note provided.");
    }

    #[test]
    fn test_scalar_in_list_slot_becomes_single_string_element() {
        let merged = merge_with_defaults(&raw(json!({"items": "Data Analyst"})), SCHEMA);
        assert_eq!(merged.list("items"), vec![json!("Data Analyst")]);

        let merged = merge_with_defaults(&raw(json!({"items": 42})), SCHEMA);
        assert_eq!(merged.string_list("items"), vec!["42".to_string()]);
    }

    #[test]
    fn test_wrong_shape_object_is_wrapped() {
        let merged = merge_with_defaults(&raw(json!({"plan": "learn SQL"})), SCHEMA);
        assert_eq!(merged.object("plan").get("summary"), Some(&json!("learn SQL")));
        assert!(merged.repaired.contains(&"plan"));
    }

    #[test]
    fn test_non_string_text_takes_string_form() {
        let merged = merge_with_defaults(&raw(json!({"note": ["a", "b"]})), SCHEMA);
        assert_eq!(merged.text("note"), "[\"a\",\"b\"]");
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let merged = merge_with_defaults(&raw(json!({"extra": true})), SCHEMA);
        assert!(merged.fields.get("extra").is_none());
    }
}
