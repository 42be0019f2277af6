use std::{env, sync::Arc, time::Duration};

use reqwest::Client as HttpClient;
use stepfree_core::error::{Result, StepFreeError};

use crate::{client::AnthropicClient, error::AnthropicError};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Wires the HTTP [`AnthropicClient`] and the credential into a value that
/// implements
/// [`ChatCompletionProvider`](stepfree_core::provider::ChatCompletionProvider).
///
/// The credential is optional at construction time. It is checked on every
/// call, before any network activity, so a missing key surfaces as a
/// reportable [`StepFreeError::NotConfigured`] instead of a startup crash.
pub struct AnthropicAdapter {
    pub(crate) client: Arc<AnthropicClient>,
    pub(crate) api_key: Option<String>,
}

impl AnthropicAdapter {
    /// Whether a credential is present. Does not check it is accepted.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub(crate) fn api_key(&self) -> std::result::Result<&str, AnthropicError> {
        self.api_key.as_deref().ok_or(AnthropicError::MissingApiKey)
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

impl std::fmt::Debug for AnthropicAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicAdapter")
            .field("base_url", &self.client.base_url())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Builder for [`AnthropicAdapter`].
///
/// ```rust,no_run
/// use stepfree_anthropic::AnthropicAdapterBuilder;
///
/// let backend = AnthropicAdapterBuilder::new_from_env().build()?;
/// # Ok::<(), stepfree_core::error::StepFreeError>(())
/// ```
#[derive(Default)]
pub struct AnthropicAdapterBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    http: Option<HttpClient>,
    timeout: Option<Duration>,
}

impl AnthropicAdapterBuilder {
    /// Create an *empty* builder. Supply the API key manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the `ANTHROPIC_API_KEY` environment variable. The value is
    /// trimmed; an empty value counts as absent.
    ///
    /// Never fails. A missing key only surfaces on the first completion call.
    pub fn new_from_env() -> Self {
        Self::new().with_optional_api_key(env::var(API_KEY_ENV).ok())
    }

    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        self.with_optional_api_key(Some(api_key.into()))
    }

    fn with_optional_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key
            .map(|key| key.trim().to_owned())
            .filter(|key| !key.is_empty());
        self
    }

    /// Point the client at another endpoint (a proxy, or a local stub in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a preconfigured `reqwest::Client` (proxy, custom TLS, ...).
    pub fn with_http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    /// Transport-level timeout for the whole request. Ignored when a custom
    /// HTTP client is supplied.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Finalise the builder.
    ///
    /// # Errors
    ///
    /// * [`StepFreeError::Transport`] – the HTTP client could not be built
    ///   (e.g. no TLS backend). A missing API key is **not** an error here.
    pub fn build(self) -> Result<AnthropicAdapter> {
        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder = HttpClient::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder
                    .build()
                    .map_err(|err| StepFreeError::Transport(Box::new(err)))?
            }
        };

        Ok(AnthropicAdapter {
            client: Arc::new(AnthropicClient::new(http, self.base_url)),
            api_key: self.api_key,
        })
    }
}
