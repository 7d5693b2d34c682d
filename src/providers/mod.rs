mod anthropic;
mod factory;
mod google;
mod open_ai;
mod retry;
mod scripted;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use retry::{Backoff, RetryDecision, RetryPolicy, RetryingProvider};
pub use scripted::ScriptedProvider;

use crate::error::{has_rate_limit_signal, ProviderError};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

/// Unified trait for all text-completion providers
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Send a free-text prompt and return the provider's free-text completion
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Turn a provider HTTP response into completion text.
///
/// `pointer` is a JSON pointer to the text field in a successful body.
/// Non-success statuses become `RateLimited` when the status or body carries a
/// throttling signal, `Api` otherwise.
pub(crate) async fn read_completion(
    response: reqwest::Response,
    pointer: &str,
) -> Result<String, ProviderError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        debug!("Provider error body ({}): {}", status, message);

        if status.as_u16() == 429 || has_rate_limit_signal(&message) {
            return Err(ProviderError::RateLimited(format!("{}: {}", status, message)));
        }
        return Err(ProviderError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let body: Value = response.json().await?;
    debug!("{:?}", body);

    body.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            ProviderError::MalformedResponse(format!("missing text at {}", pointer))
        })
}
