//! The fixed system instruction block.
//!
//! Static accessibility guidance (bundled markdown) followed by the output
//! contract rendered from the canonical schema and the rules the schema
//! cannot express. The text is identical for every request.

use stepfree_core::{generic::GenericMessage, template::IntoPrompt};
use stepfree_prompt::builder::PromptBuilder;

use crate::{
    contract::render_contract,
    plan::{REQUIRED_BACKUP_PLANS, plan_response_schema},
};

const GUIDANCE: &str = include_str!("../../data/system_preamble.md");

/// System message: accessibility-first framing plus the output contract.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPreamble;

impl SystemPreamble {
    pub fn new() -> Self {
        Self
    }

    /// Render the complete system instruction text.
    pub fn render(&self) -> String {
        PromptBuilder::new()
            .add_text(GUIDANCE)
            .add_blank_line()
            .add_section_h2("Output format")
            .add_blank_line()
            .add_line(
                "Return ONLY a single JSON object. No markdown, no code fences, \
                 no backticks and no text before or after the JSON.",
            )
            .add_line(
                "Use exactly these field names. Strings are quoted, numbers are \
                 unquoted, lists are JSON arrays:",
            )
            .add_blank_line()
            .add_text(&render_contract(&plan_response_schema()))
            .add_blank_line()
            .add_section_h2("Rules")
            .add_blank_line()
            .add_bullet(format_args!(
                "backup_plans must contain exactly {REQUIRED_BACKUP_PLANS} plans, \
                 each usable when the primary plan fails for a different reason."
            ))
            .add_bullet("primary_plan and every backup plan have at least one step.")
            .add_bullet("estimated_time_mins and walking_mins are whole, non-negative minutes.")
            .add_bullet("confidence_score is between 0 and 100.")
            .add_bullet("staff_script has one spoken line per entry.")
            .finalize()
    }
}

impl IntoPrompt for SystemPreamble {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![GenericMessage::system(self.render())]
    }
}
