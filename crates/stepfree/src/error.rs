//! Classified pipeline failures.
//!
//! Every stage returns [`PipelineError`]; [`PipelineError::kind`] is the
//! machine-distinguishable classification callers branch on, and
//! [`ErrorKind::status_code`] the HTTP status it maps to.
use std::time::Duration;

use serde::Serialize;
use stepfree_core::error::StepFreeError;
use stepfree_types::FieldViolation;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    InvalidRequest,
    ConfigurationError,
    UpstreamError,
    UpstreamTimeout,
    Cancelled,
    FormatMismatch,
    ParseError,
    SchemaViolation,
    BusinessRuleViolation,
    UnknownError,
}

impl ErrorKind {
    /// Client error for rejected input, gateway timeout for an expired
    /// deadline, server error for everything else.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::InvalidRequest => 400,
            ErrorKind::UpstreamTimeout => 504,
            _ => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "InvalidRequest",
            ErrorKind::ConfigurationError => "ConfigurationError",
            ErrorKind::UpstreamError => "UpstreamError",
            ErrorKind::UpstreamTimeout => "UpstreamTimeout",
            ErrorKind::Cancelled => "Cancelled",
            ErrorKind::FormatMismatch => "FormatMismatch",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::SchemaViolation => "SchemaViolation",
            ErrorKind::BusinessRuleViolation => "BusinessRuleViolation",
            ErrorKind::UnknownError => "UnknownError",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    #[error("invalid request body: {}", join(.0))]
    InvalidRequest(Vec<FieldViolation>),

    #[error("{0}")]
    Configuration(String),

    #[error("upstream returned status {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("upstream did not answer within {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("request was cancelled before the upstream answered")]
    Cancelled,

    #[error("{0}")]
    FormatMismatch(String),

    /// `raw` is already capped.
    #[error("failed to parse model output as JSON: {message}")]
    Parse { message: String, raw: String },

    /// `raw` is already capped.
    #[error("model output failed schema validation: {}", join(.violations))]
    Schema {
        violations: Vec<FieldViolation>,
        raw: String,
    },

    /// `raw` is already capped.
    #[error("expected exactly {expected} backup plans, got {actual}")]
    BusinessRule {
        expected: usize,
        actual: usize,
        raw: String,
    },

    #[error("{0}")]
    Unknown(String),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::InvalidRequest(_) => ErrorKind::InvalidRequest,
            PipelineError::Configuration(_) => ErrorKind::ConfigurationError,
            PipelineError::Upstream { .. } => ErrorKind::UpstreamError,
            PipelineError::Timeout(_) => ErrorKind::UpstreamTimeout,
            PipelineError::Cancelled => ErrorKind::Cancelled,
            PipelineError::FormatMismatch(_) => ErrorKind::FormatMismatch,
            PipelineError::Parse { .. } => ErrorKind::ParseError,
            PipelineError::Schema { .. } => ErrorKind::SchemaViolation,
            PipelineError::BusinessRule { .. } => ErrorKind::BusinessRuleViolation,
            PipelineError::Unknown(_) => ErrorKind::UnknownError,
        }
    }

    /// Itemised field violations, for the failures that have them.
    pub fn details(&self) -> Option<&[FieldViolation]> {
        match self {
            PipelineError::InvalidRequest(violations)
            | PipelineError::Schema { violations, .. } => Some(violations),
            _ => None,
        }
    }

    /// Bounded preview of the model output that was rejected.
    pub fn raw_preview(&self) -> Option<&str> {
        match self {
            PipelineError::Parse { raw, .. }
            | PipelineError::Schema { raw, .. }
            | PipelineError::BusinessRule { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Failures a correction re-prompt can plausibly fix.
    pub fn is_repairable(&self) -> bool {
        matches!(
            self,
            PipelineError::Schema { .. } | PipelineError::BusinessRule { .. }
        )
    }
}

impl From<StepFreeError> for PipelineError {
    fn from(value: StepFreeError) -> Self {
        match value {
            err @ StepFreeError::NotConfigured { .. } => PipelineError::Configuration(err.to_string()),
            StepFreeError::Upstream { status, body } => PipelineError::Upstream { status, body },
            StepFreeError::Format(message) => PipelineError::FormatMismatch(message),
            err @ StepFreeError::Transport(_) => PipelineError::Unknown(err.to_string()),
        }
    }
}

fn join(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_request_is_a_client_error() {
        let kinds = [
            ErrorKind::ConfigurationError,
            ErrorKind::UpstreamError,
            ErrorKind::Cancelled,
            ErrorKind::FormatMismatch,
            ErrorKind::ParseError,
            ErrorKind::SchemaViolation,
            ErrorKind::BusinessRuleViolation,
            ErrorKind::UnknownError,
        ];
        assert!(kinds.iter().all(|kind| kind.status_code() == 500));
        assert_eq!(ErrorKind::InvalidRequest.status_code(), 400);
        assert_eq!(ErrorKind::UpstreamTimeout.status_code(), 504);
    }

    #[test]
    fn test_core_errors_are_classified() {
        let missing = PipelineError::from(StepFreeError::NotConfigured {
            provider: "anthropic",
            reason: "missing env variable: `ANTHROPIC_API_KEY`".into(),
        });
        assert_eq!(missing.kind(), ErrorKind::ConfigurationError);
        assert!(missing.to_string().contains("ANTHROPIC_API_KEY"));

        let upstream = PipelineError::from(StepFreeError::Upstream {
            status: 429,
            body: "slow down".into(),
        });
        assert_eq!(upstream.kind(), ErrorKind::UpstreamError);
        assert_eq!(upstream.to_string(), "upstream returned status 429: slow down");

        let transport = PipelineError::from(StepFreeError::Transport("connection reset".into()));
        assert_eq!(transport.kind(), ErrorKind::UnknownError);
    }

    #[test]
    fn test_business_rule_names_the_count() {
        let err = PipelineError::BusinessRule {
            expected: 2,
            actual: 1,
            raw: String::new(),
        };
        assert_eq!(err.to_string(), "expected exactly 2 backup plans, got 1");
        assert!(err.is_repairable());
    }

    #[test]
    fn test_invalid_request_lists_every_field() {
        let err = PipelineError::InvalidRequest(vec![
            FieldViolation::new("start", "must not be empty"),
            FieldViolation::new("destination", "is required"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid request body: start: must not be empty; destination: is required"
        );
        assert_eq!(err.details().map(<[_]>::len), Some(2));
    }
}
