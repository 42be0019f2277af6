use std::{future::Future, pin::Pin};

use crate::{
    error::Result,
    generic::{GenericChatCompletionResponse, GenericMessage},
    model::Model,
};

/// Boxed future returned by [`ChatCompletionProvider::chat_complete`].
pub type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenericChatCompletionResponse>> + Send + 'a>>;

/// A **provider** turns a list of chat messages into a single network call to
/// a concrete completion service and hands back the raw text it produced.
///
/// The trait is intentionally minimal:
///
/// * **One associated type** – the in-memory `Message` representation this
///   provider accepts.
/// * **One async-ish method** – `chat_complete`, exactly one non-streaming
///   round-trip. Providers never retry on their own.
///
/// The method returns a boxed future so we stay object-safe without pulling
/// in `async_trait`. Tests substitute a scripted implementation.
pub trait ChatCompletionProvider: Send + Sync {
    /// Chat message type consumed by this provider.
    type Message: Send + Sync + 'static;

    /// Execute the completion and return the raw model output.
    ///
    /// Implementations must fail with
    /// [`crate::error::StepFreeError::NotConfigured`] *before* touching the
    /// network when their credential is absent.
    fn chat_complete<'a, M>(&'a self, params: ChatCompleteParameters<M>) -> CompletionFuture<'a>
    where
        M: Into<Self::Message> + Send + 'a;
}

/// Everything a provider needs for one round-trip.
#[derive(Debug, Clone)]
pub struct ChatCompleteParameters<M> {
    pub messages: Vec<M>,
    pub model: Model,
    pub max_tokens: u32,
    /// JSON Schema the output must follow. Providers adapt it to whatever
    /// subset their structured-output mechanism understands.
    pub response_format: Option<serde_json::Value>,
}

impl<M> ChatCompleteParameters<M> {
    pub fn new(messages: Vec<M>, model: Model, max_tokens: u32) -> Self {
        Self {
            messages,
            model,
            max_tokens,
            response_format: None,
        }
    }

    pub fn messages(&self) -> &[M] {
        &self.messages
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn with_response_format(mut self, response_format: serde_json::Value) -> Self {
        self.response_format = Some(response_format);
        self
    }

    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Append further turns, e.g. a correction request after a rejected answer.
    pub fn push_message(&mut self, message: M) {
        self.messages.push(message);
    }

    /// Convert the message list into another representation, keeping all
    /// other settings.
    pub fn map_messages<N>(self, f: impl FnMut(M) -> N) -> ChatCompleteParameters<N> {
        ChatCompleteParameters {
            messages: self.messages.into_iter().map(f).collect(),
            model: self.model,
            max_tokens: self.max_tokens,
            response_format: self.response_format,
        }
    }
}

impl ChatCompleteParameters<GenericMessage> {
    /// Concatenated content of all system messages, `None` if there are none.
    pub fn system_text(&self) -> Option<String> {
        let parts: Vec<&str> = self
            .messages
            .iter()
            .filter(|m| m.role == crate::generic::GenericRole::System)
            .map(|m| m.content.as_str())
            .collect();

        (!parts.is_empty()).then(|| parts.join("\n\n"))
    }
}
