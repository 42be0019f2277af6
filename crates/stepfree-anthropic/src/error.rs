use reqwest::StatusCode;
use stepfree_core::error::StepFreeError;

/// Every failure mode the Anthropic client can hit.
#[derive(Debug, thiserror::Error)]
pub enum AnthropicError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Anthropic returned non-success status {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Anthropic format error: {0}")]
    Format(String),

    #[error("missing env variable: `ANTHROPIC_API_KEY`")]
    MissingApiKey,

    #[error("API key contains characters that are not valid in an HTTP header")]
    InvalidApiKey,
}

impl From<AnthropicError> for StepFreeError {
    fn from(value: AnthropicError) -> Self {
        match value {
            AnthropicError::Api { status, body } => StepFreeError::Upstream {
                status: status.as_u16(),
                body,
            },
            AnthropicError::Format(message) => StepFreeError::Format(message),
            AnthropicError::Http(err) => StepFreeError::Transport(Box::new(err)),
            err @ (AnthropicError::MissingApiKey | AnthropicError::InvalidApiKey) => {
                StepFreeError::NotConfigured {
                    provider: "anthropic",
                    reason: err.to_string(),
                }
            }
        }
    }
}
