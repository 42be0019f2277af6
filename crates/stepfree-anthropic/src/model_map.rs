use std::borrow::Cow;

use stepfree_core::model::{AnthropicModel, Model};

pub const CLAUDE_SONNET_4_5: &str = "claude-sonnet-4-5-20250929";
pub const CLAUDE_OPUS_4_1: &str = "claude-opus-4-1-20250805";
pub const CLAUDE_HAIKU_4_5: &str = "claude-haiku-4-5-20251001";

pub(crate) fn map_model(model: &Model) -> Cow<'static, str> {
    match model {
        Model::Custom(custom) => custom.clone(),
        Model::Anthropic(AnthropicModel::ClaudeSonnet4_5) => CLAUDE_SONNET_4_5.into(),
        Model::Anthropic(AnthropicModel::ClaudeOpus4_1) => CLAUDE_OPUS_4_1.into(),
        Model::Anthropic(AnthropicModel::ClaudeHaiku4_5) => CLAUDE_HAIKU_4_5.into(),
    }
}
