//! Scripted completion provider shared by the integration tests.
#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use serde_json::Value;
use stepfree::{
    generic::{GenericChatCompletionResponse, GenericMessage},
    provider::{ChatCompleteParameters, ChatCompletionProvider, CompletionFuture},
    types::example::EXAMPLE_PLAN_JSON,
};
use stepfree_core::error::StepFreeError;

pub const SCRIPTED_MODEL: &str = "claude-scripted";

/// One scripted answer.
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Upstream { status: u16, body: String },
    Format(String),
    /// Never answers.
    Hang,
}

/// Plays back [`Reply`]s in order and records every call.
pub struct ScriptedProvider {
    replies: Vec<Reply>,
    calls: AtomicUsize,
    seen: Mutex<Vec<ChatCompleteParameters<GenericMessage>>>,
}

impl ScriptedProvider {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new([Reply::Text(text.into())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<ChatCompleteParameters<GenericMessage>> {
        self.seen.lock().unwrap().clone()
    }
}

impl ChatCompletionProvider for ScriptedProvider {
    type Message = GenericMessage;

    fn chat_complete<'a, M>(&'a self, params: ChatCompleteParameters<M>) -> CompletionFuture<'a>
    where
        M: Into<Self::Message> + Send + 'a,
    {
        Box::pin(async move {
            let index = self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(params.map_messages(Into::into));

            let reply = self
                .replies
                .get(index)
                .cloned()
                .unwrap_or_else(|| panic!("no scripted reply for call {index}"));

            match reply {
                Reply::Text(content) => Ok(GenericChatCompletionResponse {
                    content,
                    model: SCRIPTED_MODEL.into(),
                    stop_reason: Some("end_turn".into()),
                }),
                Reply::Upstream { status, body } => Err(StepFreeError::Upstream { status, body }),
                Reply::Format(message) => Err(StepFreeError::Format(message)),
                Reply::Hang => std::future::pending().await,
            }
        })
    }
}

/// The bundled example plan as a JSON value.
pub fn example_value() -> Value {
    serde_json::from_str(EXAMPLE_PLAN_JSON).unwrap()
}

/// The example plan with `count` backup plans, as model text.
pub fn plan_with_backups(count: usize) -> String {
    let mut value = example_value();
    let template = value["backup_plans"][0].clone();
    value["backup_plans"] = Value::Array(vec![template; count]);
    value.to_string()
}
