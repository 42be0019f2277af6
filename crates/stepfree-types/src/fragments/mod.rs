//! Prompt fragments. Each one renders a single message and implements
//! [`IntoPrompt`](stepfree_core::template::IntoPrompt) so they can be lined up
//! with a [`PromptChain`](stepfree_prompt::chain::PromptChain).
mod journey;
mod preamble;
mod repair;

pub use journey::JourneyRequestFragment;
pub use preamble::SystemPreamble;
pub use repair::RepairFragment;
