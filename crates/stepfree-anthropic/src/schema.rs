//! Adapts a canonical JSON Schema to what Anthropic structured outputs accept.
//!
//! The structured-output mechanism supports a subset of JSON Schema: no
//! numeric or string bounds, no custom formats, `minItems` of 0 or 1 only,
//! and every object must be closed with `additionalProperties: false`.
//! Constraints dropped here are still enforced by the caller's validator
//! against the canonical schema.
use serde_json::{Map, Value};

const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "format",
    "minimum",
    "maximum",
    "exclusiveMinimum",
    "exclusiveMaximum",
    "multipleOf",
    "minLength",
    "maxLength",
    "pattern",
    "maxItems",
    "uniqueItems",
];

/// Largest `minItems` the provider accepts.
pub const MAX_MIN_ITEMS: u64 = 1;

/// Derive the schema declared to the provider from `canonical`.
pub fn structured_output_schema(canonical: &Value) -> Value {
    let mut schema = canonical.clone();
    if let Some(root) = schema.as_object_mut() {
        root.remove("$schema");
        root.remove("title");
        root.remove("definitions");
    }
    relax(&mut schema);
    schema
}

fn relax(node: &mut Value) {
    let Some(map) = node.as_object_mut() else {
        return;
    };

    for keyword in UNSUPPORTED_KEYWORDS {
        map.remove(*keyword);
    }

    if map
        .get("minItems")
        .and_then(Value::as_u64)
        .is_some_and(|min| min > MAX_MIN_ITEMS)
    {
        map.insert("minItems".into(), MAX_MIN_ITEMS.into());
    }

    if map.get("type").and_then(Value::as_str) == Some("object") {
        map.insert("additionalProperties".into(), Value::Bool(false));
    }

    relax_children(map);
}

fn relax_children(map: &mut Map<String, Value>) {
    if let Some(Value::Object(properties)) = map.get_mut("properties") {
        properties.values_mut().for_each(relax);
    }

    match map.get_mut("items") {
        Some(Value::Array(items)) => items.iter_mut().for_each(relax),
        Some(items) => relax(items),
        None => {}
    }

    for combinator in ["allOf", "anyOf", "oneOf"] {
        if let Some(Value::Array(branches)) = map.get_mut(combinator) {
            branches.iter_mut().for_each(relax);
        }
    }
}
