//! Planner settings.
//!
//! | Variable                 | Meaning                            | Default                |
//! |--------------------------|------------------------------------|------------------------|
//! | `STEPFREE_MODEL`         | provider model name                | Claude Sonnet 4.5      |
//! | `STEPFREE_MAX_TOKENS`    | output token budget                | 4000                   |
//! | `STEPFREE_DEADLINE_SECS` | per-run deadline for the upstream  | 60                     |
//! | `STEPFREE_REPAIR`        | one correction re-prompt on reject | off                    |
//!
//! Blank values count as unset.
use std::{env, time::Duration};

use stepfree_core::{model::Model, template::PromptTemplate};
use stepfree_types::prompt::JourneyPrompt;
use thiserror::Error;

pub const MODEL_ENV: &str = "STEPFREE_MODEL";
pub const MAX_TOKENS_ENV: &str = "STEPFREE_MAX_TOKENS";
pub const DEADLINE_ENV: &str = "STEPFREE_DEADLINE_SECS";
pub const REPAIR_ENV: &str = "STEPFREE_REPAIR";

pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(60);

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for `{variable}`: {value:?} ({expected})")]
pub struct ConfigError {
    pub variable: &'static str,
    pub value: String,
    pub expected: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub model: Model,
    pub max_tokens: u32,
    pub deadline: Duration,
    pub repair: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: JourneyPrompt::MODEL,
            max_tokens: JourneyPrompt::MAX_TOKENS,
            deadline: DEFAULT_DEADLINE,
            repair: false,
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`PlannerConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(model) = get(MODEL_ENV) {
            config.model = Model::custom(model);
        }

        if let Some(value) = get(MAX_TOKENS_ENV) {
            config.max_tokens = match value.parse::<u32>() {
                Ok(tokens) if tokens > 0 => tokens,
                _ => return Err(invalid(MAX_TOKENS_ENV, value, "a positive integer")),
            };
        }

        if let Some(value) = get(DEADLINE_ENV) {
            config.deadline = match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(invalid(DEADLINE_ENV, value, "a positive number of seconds")),
            };
        }

        if let Some(value) = get(REPAIR_ENV) {
            config.repair = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => return Err(invalid(REPAIR_ENV, value, "true or false")),
            };
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<Model>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_repair(mut self, repair: bool) -> Self {
        self.repair = repair;
        self
    }
}

fn invalid(variable: &'static str, value: String, expected: &'static str) -> ConfigError {
    ConfigError {
        variable,
        value,
        expected,
    }
}
