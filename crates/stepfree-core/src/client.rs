//! Lightweight client that executes a [`PromptTemplate`] against a single
//! concrete [`ChatCompletionProvider`].
//!
//! The client is **generic over the provider type `B`**, so the compiler
//! guarantees the prompt's `Message` type matches what the provider expects
//! and no dynamic dispatch appears in user code. Swapping the Anthropic
//! adapter for a scripted fake in tests is a type parameter change.
use std::sync::Arc;

use crate::{
    error::Result,
    generic::GenericChatCompletionResponse,
    provider::{ChatCompleteParameters, ChatCompletionProvider, CompletionFuture},
    schema_util::derive_response_schema,
    template::{IntoPrompt, PromptTemplate},
};

/// A client bound to a single provider.
///
/// Cloning is cheap: the provider sits behind an `Arc`.
#[derive(Debug)]
pub struct CompletionClient<B> {
    backend: Arc<B>,
}

impl<B> Clone for CompletionClient<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> CompletionClient<B>
where
    B: ChatCompletionProvider,
{
    /// Create a new client that delegates all calls to `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Access the underlying provider (e.g. to inspect provider-specific settings).
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Build the parameters for `prompt`: its messages, model, output budget
    /// and the JSON Schema of `P::Output` as the response format.
    pub fn parameters_for<P>(prompt: P) -> ChatCompleteParameters<P::Message>
    where
        P: PromptTemplate,
    {
        ChatCompleteParameters::new(prompt.into_prompt(), P::MODEL, P::MAX_TOKENS)
            .with_response_format(derive_response_schema::<P::Output>())
    }

    /// Run `prompt` once and return the raw completion.
    pub async fn complete<P>(&self, prompt: P) -> Result<GenericChatCompletionResponse>
    where
        P: PromptTemplate,
        <P as IntoPrompt>::Message: Into<B::Message>,
    {
        self.backend.chat_complete(Self::parameters_for(prompt)).await
    }
}

impl<B: ChatCompletionProvider> ChatCompletionProvider for CompletionClient<B> {
    type Message = B::Message;

    fn chat_complete<'a, M>(&'a self, params: ChatCompleteParameters<M>) -> CompletionFuture<'a>
    where
        M: Into<Self::Message> + Send + 'a,
    {
        self.backend.chat_complete(params)
    }
}
