//! Concatenates the messages of several
//! [`IntoPrompt`](stepfree_core::template::IntoPrompt) values.
//!
//! ```text
//! ┌────────────────┐    IntoPrompt     ┌────────────────┐
//! │ SystemPreamble │ ─────────────────►│ Vec<Message>   │
//! ├────────────────┤                   ├────────────────┤
//! │ JourneyRequest │ ─────────────────►│ Vec<Message>   │
//! └────────────────┘                   └────────────────┘
//!            ▲                                     │
//!            └────────── PromptChain::build() ◄────┘
//! ```
//!
//! ```rust
//! use stepfree_prompt::chain::PromptChain;
//! use stepfree_core::generic::GenericMessage;
//!
//! let messages = PromptChain::new()
//!     .with(GenericMessage::system("You plan journeys."))
//!     .with(GenericMessage::user("Plan one."))
//!     .build();
//!
//! assert_eq!(messages.len(), 2);
//! ```
use stepfree_core::template::IntoPrompt;

/// Accumulates messages produced by [`IntoPrompt`] implementors, in order.
pub struct PromptChain<Message>(Vec<Message>);

impl<Message> Default for PromptChain<Message> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Message> PromptChain<Message> {
    pub fn new() -> Self {
        Self(vec![])
    }

    /// Append the messages produced by `fragment`.
    pub fn with(mut self, fragment: impl IntoPrompt<Message = Message>) -> Self {
        self.0.extend(fragment.into_prompt());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the chain and return the accumulated messages.
    pub fn build(self) -> Vec<Message> {
        self.0
    }
}
