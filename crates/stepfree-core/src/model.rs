//! Model identifiers.
//!
//! Application code picks an enum variant and lets the provider crate
//! translate it into its own naming scheme (see
//! `stepfree-anthropic::model_map`). Anything not covered by a dedicated
//! variant goes through [`Model::Custom`], e.g. a model name supplied via
//! configuration at runtime.
//!
//! ```rust
//! use stepfree_core::model::{AnthropicModel, Model};
//! assert_eq!(Model::from(AnthropicModel::ClaudeSonnet4_5),
//!            Model::Anthropic(AnthropicModel::ClaudeSonnet4_5));
//! ```
use std::borrow::Cow;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Built-in Anthropic models (Messages API).
    Anthropic(AnthropicModel),
    /// Provider model name passed through verbatim.
    Custom(Cow<'static, str>),
}

impl Model {
    pub fn custom(name: impl Into<Cow<'static, str>>) -> Self {
        Model::Custom(name.into())
    }
}

/// Anthropic models the planner has been exercised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnthropicModel {
    ClaudeSonnet4_5,
    ClaudeOpus4_1,
    ClaudeHaiku4_5,
}

impl From<AnthropicModel> for Model {
    fn from(val: AnthropicModel) -> Self {
        Model::Anthropic(val)
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Model::Anthropic(model) => write!(f, "{model:?}"),
            Model::Custom(name) => write!(f, "{name}"),
        }
    }
}
