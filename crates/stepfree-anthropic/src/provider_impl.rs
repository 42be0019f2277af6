use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use stepfree_core::{
    generic::{GenericChatCompletionResponse, GenericMessage},
    preview::{PREVIEW_CHARS, preview},
    provider::{ChatCompleteParameters, ChatCompletionProvider, CompletionFuture},
};

use crate::{
    AnthropicAdapter,
    api_v1::{ContentBlock, MessagesRequest, MessagesResponse},
    error::AnthropicError,
    model_map::map_model,
    schema::structured_output_schema,
};

impl ChatCompletionProvider for AnthropicAdapter {
    type Message = GenericMessage;

    fn chat_complete<'a, M>(&'a self, params: ChatCompleteParameters<M>) -> CompletionFuture<'a>
    where
        M: Into<Self::Message> + Send + 'a,
    {
        let client = Arc::clone(&self.client);

        Box::pin(async move {
            // Checked before anything else: no credential, no network.
            let api_key = self.api_key()?;

            let model = map_model(&params.model).into_owned();
            let params = params.map_messages(Into::into);

            let mut request = MessagesRequest::new(model.clone(), params.max_tokens, params.messages);
            if let Some(schema) = &params.response_format {
                request = request.with_json_schema(structured_output_schema(schema));
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(%model, max_tokens = request.max_tokens, "sending messages request");

            let body = client.messages(api_key, &request).await?;
            let response = into_completion(&body, &model)?;

            #[cfg(feature = "tracing")]
            tracing::debug!(
                model = %response.model,
                stop_reason = ?response.stop_reason,
                chars = response.content.len(),
                "messages response received"
            );

            Ok(response)
        })
    }
}

/// Pull the first text block out of a decoded response body.
///
/// The reported model wins over the requested one.
fn into_completion(
    body: &Value,
    requested_model: &str,
) -> Result<GenericChatCompletionResponse, AnthropicError> {
    let response = MessagesResponse::deserialize(body).map_err(|_| format_mismatch(body))?;

    let text = match response.content.first() {
        Some(ContentBlock::Text { text }) => text.trim().to_owned(),
        Some(other) => {
            return Err(AnthropicError::Format(format!(
                "unexpected content block type `{}`",
                other.kind()
            )));
        }
        None => return Err(format_mismatch(body)),
    };

    Ok(GenericChatCompletionResponse {
        content: text,
        model: response
            .model
            .unwrap_or_else(|| requested_model.to_owned()),
        stop_reason: response.stop_reason,
    })
}

fn format_mismatch(body: &Value) -> AnthropicError {
    AnthropicError::Format(format!(
        "response has no text content. Response structure: {}",
        preview(&body.to_string(), PREVIEW_CHARS)
    ))
}
