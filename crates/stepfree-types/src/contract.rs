//! Renders a JSON Schema as a human-readable field list.
//!
//! The system prompt must spell out the output contract. Rendering it from
//! [`crate::plan::plan_response_schema`] instead of writing it by hand means a
//! field added to [`crate::PlanResponse`] shows up in the prompt, the
//! validator and the provider declaration at the same time.
use serde_json::Value;
use stepfree_core::schema_util::required_fields;
use stepfree_prompt::builder::PromptBuilder;

/// One `- name (type): description` line per property, nested properties
/// indented below their parent.
pub fn render_contract(schema: &Value) -> String {
    render_object(PromptBuilder::new(), schema, 0).finalize()
}

fn render_object(mut builder: PromptBuilder, schema: &Value, depth: usize) -> PromptBuilder {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return builder;
    };
    let required = required_fields(schema);

    for (name, property) in properties {
        let optional = if required.contains(&name.as_str()) {
            ""
        } else {
            ", optional"
        };
        let line = match property.get("description").and_then(Value::as_str) {
            Some(description) => format!(
                "- {name} ({}{optional}): {}",
                describe(property),
                first_line(description)
            ),
            None => format!("- {name} ({}{optional})", describe(property)),
        };
        builder = builder.add_indented_line(depth, line);

        if let Some(object) = nested_object(property) {
            builder = render_object(builder, object, depth + 1);
        }
    }

    builder
}

/// The object schema whose fields should be listed below `property`.
fn nested_object(property: &Value) -> Option<&Value> {
    match schema_type(property) {
        Some("object") => Some(property),
        Some("array") => property
            .get("items")
            .filter(|items| schema_type(items) == Some("object")),
        _ => None,
    }
}

fn describe(schema: &Value) -> String {
    match schema_type(schema) {
        Some("string") if min_length(schema) > 0 => "non-empty string".into(),
        Some("string") => "string".into(),
        Some("integer") => describe_number(schema, "integer"),
        Some("number") => describe_number(schema, "number"),
        Some("boolean") => "boolean".into(),
        Some("object") => "object".into(),
        Some("array") => {
            let items = schema
                .get("items")
                .map(|items| plural(schema_type(items).unwrap_or("value")))
                .unwrap_or("values");
            match schema.get("minItems").and_then(Value::as_u64) {
                Some(min) if min > 0 => format!("array of {items}, at least {min}"),
                _ => format!("array of {items}, may be empty"),
            }
        }
        _ => "any JSON value".into(),
    }
}

fn describe_number(schema: &Value, kind: &str) -> String {
    let min = schema.get("minimum").and_then(Value::as_f64);
    let max = schema.get("maximum").and_then(Value::as_f64);

    match (min, max) {
        (Some(min), Some(max)) => format!("{kind} from {min} to {max}"),
        (Some(min), None) if min == 0.0 => format!("non-negative {kind}"),
        (Some(min), None) => format!("{kind} of at least {min}"),
        (None, Some(max)) => format!("{kind} of at most {max}"),
        (None, None) => kind.to_owned(),
    }
}

fn plural(kind: &str) -> &'static str {
    match kind {
        "string" => "strings",
        "integer" => "integers",
        "number" => "numbers",
        "boolean" => "booleans",
        "object" => "objects",
        "array" => "arrays",
        _ => "values",
    }
}

fn schema_type(schema: &Value) -> Option<&str> {
    schema.get("type").and_then(Value::as_str)
}

fn min_length(schema: &Value) -> u64 {
    schema.get("minLength").and_then(Value::as_u64).unwrap_or(0)
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default().trim()
}
