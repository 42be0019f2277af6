use stepfree_core::{generic::GenericMessage, template::IntoPrompt};
use stepfree_prompt::builder::PromptBuilder;

use crate::violation::FieldViolation;

/// Feeds a rejected answer back to the model together with what was wrong
/// with it. Renders two messages: the previous assistant turn and the
/// correction request.
#[derive(Debug, Clone)]
pub struct RepairFragment<'a> {
    previous_answer: &'a str,
    violations: &'a [FieldViolation],
}

impl<'a> RepairFragment<'a> {
    pub fn new(previous_answer: &'a str, violations: &'a [FieldViolation]) -> Self {
        Self {
            previous_answer,
            violations,
        }
    }

    pub fn render_correction(&self) -> String {
        PromptBuilder::new()
            .add_line("Your previous answer was rejected for these reasons:")
            .add_bullets(self.violations)
            .add_blank_line()
            .add_line(
                "Return the complete, corrected JSON object. Keep everything that \
                 was valid, fix only what is listed above, and return ONLY the JSON.",
            )
            .finalize()
    }
}

impl IntoPrompt for RepairFragment<'_> {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![
            GenericMessage::assistant(self.previous_answer),
            GenericMessage::user(self.render_correction()),
        ]
    }
}
