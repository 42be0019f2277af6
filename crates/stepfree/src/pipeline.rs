//! The planning pipeline.
//!
//! One [`Planner::plan`] call runs, strictly in order:
//!
//! 1. request validation ([`PlanRequest::validate`]), before any network I/O
//! 2. prompt composition ([`JourneyPrompt`])
//! 3. the completion call, raced against the deadline and the cancellation token
//! 4. extraction ([`crate::extract`])
//! 5. schema validation ([`ResponseValidator`])
//! 6. business rules ([`crate::rules`])
//! 7. optionally one correction re-prompt if 5 or 6 rejected the answer
//! 8. assembly into a [`ResultEnvelope`]
//!
//! Any stage failure ends the run. Runs share nothing mutable, so a
//! [`Planner`] can serve any number of them concurrently.
use std::sync::Arc;

use serde_json::Value;
use stepfree_core::{
    CompletionClient,
    generic::{GenericChatCompletionResponse, GenericMessage},
    provider::{ChatCompleteParameters, ChatCompletionProvider},
    template::IntoPrompt,
};
use stepfree_types::{
    FieldViolation, PlanRequest, PlanResponse, fragments::RepairFragment, prompt::JourneyPrompt,
};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    config::PlannerConfig,
    envelope::{Diagnostics, ResultEnvelope},
    error::PipelineError,
    extract::extract_json,
    rules,
    validate::ResponseValidator,
};

/// Runs journey requests through a completion provider.
pub struct Planner<B> {
    client: CompletionClient<B>,
    validator: Arc<ResponseValidator>,
    config: PlannerConfig,
}

impl<B> Clone for Planner<B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            validator: Arc::clone(&self.validator),
            config: self.config.clone(),
        }
    }
}

/// What a run learned about itself, kept even when it fails.
#[derive(Default)]
struct RunState {
    model: Option<String>,
    repaired: bool,
}

impl<B> Planner<B>
where
    B: ChatCompletionProvider<Message = GenericMessage>,
{
    /// # Errors
    ///
    /// Only if the response schema fails to compile.
    pub fn new(backend: B, config: PlannerConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            client: CompletionClient::new(backend),
            validator: Arc::new(ResponseValidator::new()?),
            config,
        })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        self.client.backend()
    }

    /// Turn an untyped request body into a plan.
    ///
    /// Never fails: every outcome, including a cancelled or timed-out run,
    /// comes back as a [`ResultEnvelope`] carrying the elapsed time.
    pub async fn plan(&self, body: &Value, cancel: CancellationToken) -> ResultEnvelope {
        let started = Instant::now();
        let mut state = RunState::default();

        let outcome = self.run(body, &cancel, started, &mut state).await;

        let diagnostics = Diagnostics {
            model: state.model,
            latency_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            repaired: state.repaired,
        };

        match outcome {
            Ok(data) => {
                info!(
                    model = diagnostics.model.as_deref().unwrap_or_default(),
                    latency_ms = diagnostics.latency_ms,
                    repaired = diagnostics.repaired,
                    "plan ready"
                );
                ResultEnvelope::Success { data, diagnostics }
            }
            Err(error) => {
                warn!(
                    kind = %error.kind(),
                    latency_ms = diagnostics.latency_ms,
                    repaired = diagnostics.repaired,
                    error = %error,
                    "plan failed"
                );
                ResultEnvelope::Failure { error, diagnostics }
            }
        }
    }

    async fn run(
        &self,
        body: &Value,
        cancel: &CancellationToken,
        started: Instant,
        state: &mut RunState,
    ) -> Result<PlanResponse, PipelineError> {
        let request = PlanRequest::validate(body).map_err(PipelineError::InvalidRequest)?;
        debug!(start = request.start(), destination = request.destination(), "request accepted");

        let deadline = started + self.config.deadline;
        let mut params = self.parameters(&request);

        let first = self.complete(params.clone(), cancel, deadline).await?;
        state.model = Some(first.model.clone());

        let rejection = match self.check(&first.content) {
            Ok(plan) => return Ok(plan),
            Err(err) if self.config.repair && err.is_repairable() => err,
            Err(err) => return Err(err),
        };

        let feedback = repair_feedback(&rejection);
        debug!(
            kind = %rejection.kind(),
            violations = feedback.len(),
            "answer rejected, re-prompting once"
        );
        for message in RepairFragment::new(&first.content, &feedback).into_prompt() {
            params.push_message(message);
        }

        let second = self.complete(params, cancel, deadline).await?;
        state.model = Some(second.model.clone());

        let plan = self.check(&second.content)?;
        state.repaired = true;
        Ok(plan)
    }

    fn parameters(&self, request: &PlanRequest) -> ChatCompleteParameters<GenericMessage> {
        CompletionClient::<B>::parameters_for(JourneyPrompt::new(request))
            .with_model(self.config.model.clone())
            .with_max_tokens(self.config.max_tokens)
    }

    /// One completion call. Whichever comes first wins: the answer, the
    /// deadline or cancellation. Losing the race drops the in-flight call.
    async fn complete(
        &self,
        params: ChatCompleteParameters<GenericMessage>,
        cancel: &CancellationToken,
        deadline: Instant,
    ) -> Result<GenericChatCompletionResponse, PipelineError> {
        let call = tokio::time::timeout_at(deadline, self.client.chat_complete(params));

        let completion = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            result = call => match result {
                Ok(completion) => completion?,
                Err(_) => return Err(PipelineError::Timeout(self.config.deadline)),
            },
        };

        debug!(
            model = %completion.model,
            stop_reason = completion.stop_reason.as_deref().unwrap_or_default(),
            chars = completion.content.len(),
            "completion received"
        );
        Ok(completion)
    }

    /// Extract, validate and rule-check one raw answer.
    fn check(&self, raw: &str) -> Result<PlanResponse, PipelineError> {
        let value = extract_json(raw)?;
        let plan = self.validator.validate(&value, raw)?;
        rules::enforce(&plan, raw)?;
        Ok(plan)
    }
}

fn repair_feedback(rejection: &PipelineError) -> Vec<FieldViolation> {
    match rejection {
        PipelineError::Schema { violations, .. } => violations.clone(),
        other => vec![FieldViolation::new("backup_plans", other.to_string())],
    }
}
