use stepfree_core::{generic::GenericMessage, template::IntoPrompt};
use stepfree_prompt::builder::PromptBuilder;

use crate::{PlanRequest, plan::REQUIRED_BACKUP_PLANS};

/// User message describing one journey. Optional request fields only appear
/// when present, and are echoed verbatim.
#[derive(Debug, Clone, Copy)]
pub struct JourneyRequestFragment<'a> {
    request: &'a PlanRequest,
}

impl<'a> JourneyRequestFragment<'a> {
    pub fn new(request: &'a PlanRequest) -> Self {
        Self { request }
    }

    pub fn render(&self) -> String {
        let request = self.request;

        PromptBuilder::new()
            .add_line(format_args!(
                "Plan an accessibility-first journey from \"{}\" to \"{}\".",
                request.start(),
                request.destination()
            ))
            .add_blank_line()
            .add_optional_key_value("Travel date/time", request.date_time())
            .add_optional_key_value("Accessibility needs", request.needs())
            .add_optional_key_value("Known disruption or concern", request.disruption())
            .add_blank_line()
            .add_line("Provide a complete journey plan with:")
            .add_bullets([
                "a clear summary of the recommended route",
                "your assumptions about the journey",
                "a confidence score (0-100) with its rationale",
                "a primary plan with detailed step-by-step instructions",
            ])
            .add_bullet(format_args!(
                "exactly {REQUIRED_BACKUP_PLANS} backup plans, each with a clear reason for when to use it"
            ))
            .add_bullets([
                "a staff script for assisting the traveller",
                "a before-you-leave checklist",
                "any risk flags that should be considered",
            ])
            .add_blank_line()
            .add_line("Remember:")
            .add_bullets([
                "prioritise step-free access and accessibility features",
                "consider sensory needs, fatigue and likely disruptions",
                "never claim certainty; acknowledge the limits of the plan",
                "give accessibility notes, sensory notes and risk flags for every step",
                "keep the staff script conversational and helpful",
            ])
            .add_blank_line()
            .add_line("Return ONLY the JSON object. No markdown, no code fences, no explanations.")
            .finalize()
    }
}

impl IntoPrompt for JourneyRequestFragment<'_> {
    type Message = GenericMessage;

    fn into_prompt(self) -> Vec<Self::Message> {
        vec![GenericMessage::user(self.render())]
    }
}
