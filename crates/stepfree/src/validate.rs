//! Schema validator.
//!
//! Checks parsed model output against the canonical [`PlanResponse`] schema
//! and reports every violation, then converts it into the typed value.
use serde_json::Value;
use serde_path_to_error::Segment;
use stepfree_core::preview::{PREVIEW_CHARS, preview};
use stepfree_types::{FieldViolation, PlanResponse, plan::plan_response_schema};

use crate::error::PipelineError;

/// A compiled [`PlanResponse`] validator. Compile once, share freely.
pub struct ResponseValidator {
    validator: jsonschema::Validator,
}

impl ResponseValidator {
    /// Compile the canonical schema.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Unknown`] if the derived schema does not compile,
    /// which means the data model itself is broken.
    pub fn new() -> Result<Self, PipelineError> {
        Self::for_schema(&plan_response_schema())
    }

    pub fn for_schema(schema: &Value) -> Result<Self, PipelineError> {
        let validator = jsonschema::validator_for(schema).map_err(|err| {
            PipelineError::Unknown(format!("response schema does not compile: {err}"))
        })?;
        Ok(Self { validator })
    }

    /// Every violated constraint in `value`, in document order.
    pub fn violations(&self, value: &Value) -> Vec<FieldViolation> {
        self.validator
            .iter_errors(value)
            .map(|err| FieldViolation::at_pointer(&err.instance_path.to_string(), err.to_string()))
            .collect()
    }

    /// Validate `value` and convert it into a [`PlanResponse`].
    ///
    /// `raw` is the model text `value` was parsed from; a preview of it goes
    /// into the error.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Schema`] listing every violation.
    pub fn validate(&self, value: &Value, raw: &str) -> Result<PlanResponse, PipelineError> {
        let schema_error = |violations| PipelineError::Schema {
            violations,
            raw: preview(raw, PREVIEW_CHARS).into_owned(),
        };

        let violations = self.violations(value);
        if !violations.is_empty() {
            return Err(schema_error(violations));
        }

        // Only trips on what JSON Schema cannot express, e.g. minutes beyond
        // `u32`.
        serde_path_to_error::deserialize(value).map_err(|err| {
            let path = err
                .path()
                .iter()
                .map(|segment| match segment {
                    Segment::Seq { index } => index.to_string(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".");
            schema_error(vec![FieldViolation::new(path, err.inner().to_string())])
        })
    }
}

impl std::fmt::Debug for ResponseValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseValidator").finish_non_exhaustive()
    }
}
