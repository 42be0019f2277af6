//! Provider-agnostic building blocks of the Step Free planner.
//!
//! | Module          | What it provides                                                  |
//! |-----------------|-------------------------------------------------------------------|
//! | [`client`]      | [`CompletionClient`], a cheap-to-clone handle around a provider   |
//! | [`provider`]    | the [`provider::ChatCompletionProvider`] trait and its parameters |
//! | [`template`]    | [`template::IntoPrompt`] / [`template::PromptTemplate`]           |
//! | [`generic`]     | provider-independent messages and responses                       |
//! | [`model`]       | model identifiers                                                 |
//! | [`schema_util`] | JSON Schema derivation for typed outputs                          |
//! | [`preview`]     | length-capped previews of untrusted payloads                      |
//! | [`error`]       | [`error::StepFreeError`]                                          |
pub mod client;
pub mod error;
pub mod generic;
pub mod model;
pub mod preview;
pub mod provider;
pub mod schema_util;
pub mod template;

pub use client::CompletionClient;
