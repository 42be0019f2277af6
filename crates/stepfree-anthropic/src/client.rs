use reqwest::{
    Client as HttpClient,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use stepfree_core::preview::{PREVIEW_CHARS, preview};

use crate::{api_v1::MessagesRequest, error::AnthropicError};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-api-key");
const VERSION_HEADER: HeaderName = HeaderName::from_static("anthropic-version");

/// Minimal HTTP client for the *messages* endpoint.
///
/// * Non-streaming only (one request ▶ one response), no retries.
/// * Shares a single `reqwest::Client`, so cloning is cheap.
/// * The API key is passed per call; the client itself holds no secret.
#[derive(Clone, Debug)]
pub struct AnthropicClient {
    http: HttpClient,
    base: String,
}

impl AnthropicClient {
    pub fn new(http: HttpClient, base_url: Option<String>) -> Self {
        Self {
            http,
            base: base_url
                .map(|url| url.trim_end_matches('/').to_owned())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// Perform one non-streaming `messages` call and return the decoded JSON
    /// body. Interpreting the body is left to the caller so that a shape
    /// mismatch can be reported with a preview of what actually arrived.
    ///
    /// Non-success statuses become [`AnthropicError::Api`] with the body
    /// capped at [`PREVIEW_CHARS`].
    pub async fn messages(
        &self,
        api_key: &str,
        request: &MessagesRequest,
    ) -> Result<Value, AnthropicError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(VERSION_HEADER, HeaderValue::from_static(ANTHROPIC_VERSION));
        let mut key = HeaderValue::from_str(api_key).map_err(|_| AnthropicError::InvalidApiKey)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);

        let url = format!("{}/messages", self.base);
        let resp = self
            .http
            .post(url)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(AnthropicError::Api {
                status,
                body: preview(&body, PREVIEW_CHARS).into_owned(),
            });
        }

        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            AnthropicError::Format(format!(
                "response body is not JSON ({err}): {}",
                preview(&String::from_utf8_lossy(&bytes), PREVIEW_CHARS)
            ))
        })
    }
}
