//! Helpers for turning Rust type information into JSON Schema.
//!
//! The schema derived here is the *canonical* contract of a typed output: the
//! prompt renders it as prose, the validator checks responses against it and
//! provider adapters derive their structured-output declaration from it.
//! Keeping one derivation point is what prevents those three from drifting.

use schemars::{
    JsonSchema,
    r#gen::{SchemaGenerator, SchemaSettings},
};
use serde_json::Value;

/// Generate a draft-07 JSON Schema for `T` with every subschema **inlined**,
/// i.e. without `$ref` pointers to external definitions.
///
/// # Panics
///
/// Only if the generated root schema cannot be serialised into JSON, which
/// `schemars` never produces.
///
/// # Example
///
/// ```
/// use stepfree_core::schema_util::derive_response_schema;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Foo { bar: String }
///
/// let schema = derive_response_schema::<Foo>();
/// assert_eq!(schema["properties"]["bar"]["type"], "string");
/// ```
pub fn derive_response_schema<T>() -> Value
where
    T: JsonSchema + 'static,
{
    let mut settings = SchemaSettings::draft07();
    settings.inline_subschemas = true;

    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    serde_json::to_value(root).expect("generated schema should be serialisable")
}

/// Names of the `required` properties of an object schema, in declaration
/// order.
pub fn required_fields(schema: &Value) -> Vec<&str> {
    schema
        .get("required")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Leg {
        name: String,
        #[schemars(length(min = 1))]
        stops: Vec<String>,
        minutes: u32,
    }

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct Journey {
        legs: Vec<Leg>,
    }

    #[test]
    fn test_nested_schemas_are_inlined() {
        let schema = derive_response_schema::<Journey>();
        let leg = &schema["properties"]["legs"]["items"];

        assert!(leg.get("$ref").is_none());
        assert_eq!(leg["properties"]["stops"]["minItems"], 1);
        assert_eq!(leg["properties"]["minutes"]["minimum"], 0.0);
    }

    #[test]
    fn test_required_fields_lists_every_field() {
        let schema = derive_response_schema::<Leg>();
        let mut required = required_fields(&schema);
        required.sort_unstable();
        assert_eq!(required, vec!["minutes", "name", "stops"]);
    }
}
