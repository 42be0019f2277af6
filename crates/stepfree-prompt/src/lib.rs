//! Prompt composition helpers: [`builder::PromptBuilder`] for text and
//! [`chain::PromptChain`] for message lists.
pub mod builder;
pub mod chain;
