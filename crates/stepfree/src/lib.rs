//! # `stepfree` – accessibility-first journey planning
//!
//! Turns a free-form travel request into a strictly shaped journey plan
//! produced by a structured-output LLM, or into a precisely classified
//! failure.
//!
//! | Crate                    | What it provides                                                          |
//! |--------------------------|---------------------------------------------------------------------------|
//! | **`stepfree-core`**      | provider trait, generic client, messages, models, previews, errors        |
//! | **`stepfree-prompt`**    | markdown prompt builder and message chains                                |
//! | **`stepfree-types`**     | request validator, plan data model, output contract, prompt fragments     |
//! | **`stepfree-anthropic`** | Anthropic Messages API backend *(feature `anthropic`, on by default)*     |
//!
//! This crate adds the pipeline on top: [`extract`], [`validate`], [`rules`],
//! [`envelope`] and the [`pipeline::Planner`] that strings them together.
//! The `server` feature adds an `axum` router and the `stepfree-server`
//! binary.
//!
//! ```rust,no_run
//! use serde_json::json;
//! use stepfree::{Planner, PlannerConfig, anthropic::AnthropicAdapterBuilder};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let backend = AnthropicAdapterBuilder::new_from_env().build()?;
//! let planner = Planner::new(backend, PlannerConfig::from_env()?)?;
//!
//! let envelope = planner
//!     .plan(
//!         &json!({"start": "King's Cross Station", "destination": "London Bridge"}),
//!         CancellationToken::new(),
//!     )
//!     .await;
//! println!("{}", serde_json::to_string_pretty(&envelope)?);
//! # Ok(())
//! # }
//! ```
pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod rules;
#[cfg(feature = "server")]
pub mod server;
pub mod validate;

pub use config::PlannerConfig;
pub use envelope::{Diagnostics, ResultEnvelope};
pub use error::{ErrorKind, PipelineError};
pub use pipeline::Planner;

pub use stepfree_core::{CompletionClient, generic, model, preview, provider, template};
pub use stepfree_prompt as prompt;
pub use stepfree_types as types;

#[cfg(feature = "anthropic")]
pub use stepfree_anthropic as anthropic;
