//! Abstractions that tie a **prompt** to a concrete **model** and a **typed
//! response**.
//!
//! 1. [`IntoPrompt`] – turns a value into a list of chat messages.
//! 2. [`PromptTemplate`] – adds the target model, the output budget and the
//!    type whose JSON Schema constrains the answer.
//!
//! ```rust
//! use stepfree_core::template::{IntoPrompt, PromptTemplate};
//! use stepfree_core::generic::GenericMessage;
//! use stepfree_core::model::{AnthropicModel, Model};
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct Hello { greeting: String }
//!
//! struct HelloPrompt;
//!
//! impl IntoPrompt for HelloPrompt {
//!     type Message = GenericMessage;
//!     fn into_prompt(self) -> Vec<Self::Message> {
//!         vec![GenericMessage::user("Say hello!")]
//!     }
//! }
//!
//! impl PromptTemplate for HelloPrompt {
//!     type Output = Hello;
//!     const MODEL: Model = Model::Anthropic(AnthropicModel::ClaudeHaiku4_5);
//! }
//! ```
use std::any::Any;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::model::Model;

/// High-level description of a prompt.
///
/// Implement this trait **in addition** to [`IntoPrompt`] to specify:
///
/// * `Output` – the Rust type the model output must deserialize into. Its
///   schema is shipped to the provider as the structured-output contract.
/// * `MODEL` – the model that handles the request unless overridden.
/// * `MAX_TOKENS` – the output budget.
pub trait PromptTemplate: IntoPrompt {
    type Output: JsonSchema + DeserializeOwned + Any;

    const MODEL: Model;

    const MAX_TOKENS: u32 = 4000;
}

/// Converts a value into a series of chat messages.
pub trait IntoPrompt {
    /// Chat message representation emitted by the prompt.
    type Message: Send + Sync + 'static;

    /// Consume `self` and return **all** messages in the desired order.
    fn into_prompt(self) -> Vec<Self::Message>;
}

/// A single [`crate::generic::GenericMessage`] is a prompt of its own.
impl IntoPrompt for crate::generic::GenericMessage {
    type Message = crate::generic::GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![self]
    }
}
