//! Inbound journey request and its validator.
//!
//! Validation runs on the untyped JSON body so that *every* violated
//! constraint is reported at once, not just the first one `serde` trips
//! over. It is synchronous, allocation-light and happens before any network
//! call.
use serde::Serialize;
use serde_json::{Map, Value};

use crate::violation::FieldViolation;

/// A validated travel request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    start: String,
    destination: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    needs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disruption: Option<String>,
}

impl PlanRequest {
    /// Validate an untyped request body.
    ///
    /// `start` and `destination` must be non-blank strings. `dateTime`,
    /// `needs` and `disruption` are optional strings; `null` and blank values
    /// count as absent. Accepted values are kept exactly as sent. Unknown
    /// fields are ignored.
    ///
    /// ```rust
    /// use serde_json::json;
    /// use stepfree_types::PlanRequest;
    ///
    /// let request = PlanRequest::validate(&json!({
    ///     "start": "King's Cross Station",
    ///     "destination": "London Bridge",
    ///     "needs": "step-free",
    /// })).unwrap();
    /// assert_eq!(request.needs(), Some("step-free"));
    ///
    /// let violations = PlanRequest::validate(&json!({"start": ""})).unwrap_err();
    /// assert_eq!(violations.len(), 2);
    /// ```
    pub fn validate(body: &Value) -> Result<Self, Vec<FieldViolation>> {
        let Some(fields) = body.as_object() else {
            return Err(vec![FieldViolation::new(
                "",
                "request body must be a JSON object",
            )]);
        };

        let mut violations = Vec::new();

        let start = required_text(fields, "start", &mut violations);
        let destination = required_text(fields, "destination", &mut violations);
        let date_time = optional_text(fields, "dateTime", &mut violations);
        let needs = optional_text(fields, "needs", &mut violations);
        let disruption = optional_text(fields, "disruption", &mut violations);

        match (start, destination) {
            (Some(start), Some(destination)) if violations.is_empty() => Ok(Self {
                start,
                destination,
                date_time,
                needs,
                disruption,
            }),
            _ => Err(violations),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn date_time(&self) -> Option<&str> {
        self.date_time.as_deref()
    }

    pub fn needs(&self) -> Option<&str> {
        self.needs.as_deref()
    }

    pub fn disruption(&self) -> Option<&str> {
        self.disruption.as_deref()
    }
}

impl TryFrom<&Value> for PlanRequest {
    type Error = Vec<FieldViolation>;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::validate(value)
    }
}

fn required_text(
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.get(name) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(name, "is required"));
            None
        }
        Some(Value::String(text)) if text.trim().is_empty() => {
            violations.push(FieldViolation::new(name, "must not be empty"));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => {
            violations.push(FieldViolation::new(
                name,
                format!("must be a string, got {}", json_type(other)),
            ));
            None
        }
    }
}

fn optional_text(
    fields: &Map<String, Value>,
    name: &str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match fields.get(name) {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => (!text.trim().is_empty()).then(|| text.clone()),
        Some(other) => {
            violations.push(FieldViolation::new(
                name,
                format!("must be a string, got {}", json_type(other)),
            ));
            None
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
