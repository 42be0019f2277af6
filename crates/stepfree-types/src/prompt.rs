//! The prompt composer.
//!
//! [`JourneyPrompt`] is the [`PromptTemplate`] the pipeline sends: the fixed
//! [`SystemPreamble`] followed by the per-request [`JourneyRequestFragment`].
//! Composition is a pure function of the request, so the same request always
//! yields byte-identical messages.
use stepfree_core::{
    generic::GenericMessage,
    model::{AnthropicModel, Model},
    template::{IntoPrompt, PromptTemplate},
};
use stepfree_prompt::chain::PromptChain;

use crate::{
    PlanRequest, PlanResponse,
    fragments::{JourneyRequestFragment, SystemPreamble},
};

/// Separator between the system block and the request block in
/// [`compose`]'s single-text rendering.
const BLOCK_SEPARATOR: &str = "\n---\n\n";

#[derive(Debug, Clone, Copy)]
pub struct JourneyPrompt<'a> {
    request: &'a PlanRequest,
}

impl<'a> JourneyPrompt<'a> {
    pub fn new(request: &'a PlanRequest) -> Self {
        Self { request }
    }
}

impl IntoPrompt for JourneyPrompt<'_> {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        PromptChain::new()
            .with(SystemPreamble::new())
            .with(JourneyRequestFragment::new(self.request))
            .build()
    }
}

impl PromptTemplate for JourneyPrompt<'_> {
    type Output = PlanResponse;
    const MODEL: Model = Model::Anthropic(AnthropicModel::ClaudeSonnet4_5);
    const MAX_TOKENS: u32 = 4000;
}

/// Render the whole prompt as one text: the system block, a separator, then
/// the request block.
pub fn compose(request: &PlanRequest) -> String {
    JourneyPrompt::new(request)
        .into_prompt()
        .iter()
        .map(|message| message.content.as_str())
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}
