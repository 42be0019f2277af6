use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// One violated field constraint: where, and what is wrong.
///
/// `path` uses dotted notation (`primary_plan.steps.0.title`); an empty path
/// refers to the document itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub path: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a violation from a JSON Pointer (`/a/0/b`).
    pub fn at_pointer(pointer: &str, message: impl Into<String>) -> Self {
        let path = pointer
            .split('/')
            .skip(1)
            .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
            .collect::<Vec<_>>()
            .join(".");
        Self::new(path, message)
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}
