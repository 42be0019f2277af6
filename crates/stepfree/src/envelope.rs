//! Result assembler output.
//!
//! On the wire a [`ResultEnvelope`] is
//!
//! ```json
//! {"ok": true, "data": {...}, "debug": {"model": "...", "latency_ms": 812, "repaired": false}}
//! ```
//!
//! or
//!
//! ```json
//! {"ok": false, "error": "...", "kind": "SchemaViolation",
//!  "debug": {"model": "...", "latency_ms": 812, "repaired": false, "raw_response": "..."},
//!  "details": [{"path": "summary", "message": "..."}]}
//! ```
//!
//! `raw_response` and `details` only appear when the failure has them.
use serde::{Serialize, Serializer};
use stepfree_types::{FieldViolation, PlanResponse};

use crate::error::{ErrorKind, PipelineError};

/// Metadata attached to every envelope, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// Model identifier reported by the completion service. `None` when the
    /// run failed before a completion arrived.
    pub model: Option<String>,
    /// Wall-clock time from pipeline entry to assembly.
    pub latency_ms: u64,
    /// Whether the data came from a correction re-prompt.
    pub repaired: bool,
}

#[derive(Debug)]
pub enum ResultEnvelope {
    Success {
        data: PlanResponse,
        diagnostics: Diagnostics,
    },
    Failure {
        error: PipelineError,
        diagnostics: Diagnostics,
    },
}

impl ResultEnvelope {
    pub fn is_ok(&self) -> bool {
        matches!(self, ResultEnvelope::Success { .. })
    }

    pub fn data(&self) -> Option<&PlanResponse> {
        match self {
            ResultEnvelope::Success { data, .. } => Some(data),
            ResultEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&PipelineError> {
        match self {
            ResultEnvelope::Success { .. } => None,
            ResultEnvelope::Failure { error, .. } => Some(error),
        }
    }

    pub fn kind(&self) -> Option<ErrorKind> {
        self.error().map(PipelineError::kind)
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            ResultEnvelope::Success { diagnostics, .. }
            | ResultEnvelope::Failure { diagnostics, .. } => diagnostics,
        }
    }

    /// HTTP status for this envelope.
    pub fn status_code(&self) -> u16 {
        self.kind().map_or(200, ErrorKind::status_code)
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum Wire<'a> {
    Success {
        ok: bool,
        data: &'a PlanResponse,
        debug: &'a Diagnostics,
    },
    Failure {
        ok: bool,
        error: String,
        kind: ErrorKind,
        debug: FailureDebug<'a>,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<&'a [FieldViolation]>,
    },
}

#[derive(Serialize)]
struct FailureDebug<'a> {
    #[serde(flatten)]
    diagnostics: &'a Diagnostics,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw_response: Option<&'a str>,
}

impl Serialize for ResultEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            ResultEnvelope::Success { data, diagnostics } => Wire::Success {
                ok: true,
                data,
                debug: diagnostics,
            },
            ResultEnvelope::Failure { error, diagnostics } => Wire::Failure {
                ok: false,
                error: error.to_string(),
                kind: error.kind(),
                debug: FailureDebug {
                    diagnostics,
                    raw_response: error.raw_preview(),
                },
                details: error.details(),
            },
        };
        wire.serialize(serializer)
    }
}
