//! Anthropic Messages API backend.
//!
//! [`AnthropicAdapter`] implements
//! [`ChatCompletionProvider`](stepfree_core::provider::ChatCompletionProvider):
//! one `POST /v1/messages` per call, output constrained by a JSON Schema
//! through `output_config.format`, the first text content block returned as
//! the raw completion.
mod adapter;
mod model_map;
mod provider_impl;

pub use adapter::{API_KEY_ENV, AnthropicAdapter, AnthropicAdapterBuilder};
pub mod api_v1;
mod client;
pub mod error;
pub mod schema;

pub use client::AnthropicClient;
