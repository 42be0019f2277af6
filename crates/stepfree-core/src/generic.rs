//! Generic message and response types shared by every provider.
//!
//! They mirror the concepts most completion APIs expose ("system", "user",
//! "assistant") and are converted into provider-specific wire structs by the
//! adapter crates.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single chat message independent of any specific provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericMessage {
    pub content: String,
    pub role: GenericRole,
}

impl GenericMessage {
    /// ```rust
    /// use stepfree_core::generic::{GenericMessage, GenericRole};
    ///
    /// let sys = GenericMessage::new("You are a journey planner.", GenericRole::System);
    /// assert_eq!(sys.role, GenericRole::System);
    /// ```
    pub fn new(content: impl Into<String>, role: GenericRole) -> Self {
        Self {
            content: content.into(),
            role,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(content, GenericRole::System)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, GenericRole::User)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, GenericRole::Assistant)
    }
}

/// Chat roles recognised by the supported providers.
///
/// `Display` renders the canonical lowercase name used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericRole {
    /// Global behaviour and output rules.
    System,
    /// Messages produced by the model.
    Assistant,
    /// Messages originating from the caller.
    User,
}

impl Display for GenericRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenericRole::System => write!(f, "system"),
            GenericRole::Assistant => write!(f, "assistant"),
            GenericRole::User => write!(f, "user"),
        }
    }
}

/// Raw outcome of one completion round-trip.
///
/// `content` is the unparsed text the model produced; turning it into typed
/// data is the caller's job so that every parse failure can be classified.
#[derive(Debug, Clone)]
pub struct GenericChatCompletionResponse {
    pub content: String,
    /// Model identifier as reported by the provider.
    pub model: String,
    pub stop_reason: Option<String>,
}
