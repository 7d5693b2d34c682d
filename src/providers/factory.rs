use crate::config::{AppConfig, ProviderConfig};
use crate::error::ProviderError;
use crate::providers::{
    AnthropicProvider, CompletionProvider, GoogleProvider, OpenAIProvider, RetryPolicy,
    RetryingProvider,
};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Duration,
    ) -> Result<Box<dyn CompletionProvider>, ProviderError> {
        if !config.enabled {
            return Err(ProviderError::NotConfigured(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            _ => Err(ProviderError::NotConfigured(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &AppConfig,
    ) -> Result<Box<dyn CompletionProvider>, ProviderError> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            ProviderError::NotConfigured(format!(
                "Default provider '{}' not found in configuration",
                provider_name
            ))
        })?;

        Self::create(provider_name, provider_config, config.request_timeout())
    }

    /// Default provider wrapped in the configured rate-limit retry policy
    pub fn build_from_config(
        config: &AppConfig,
    ) -> Result<Box<dyn CompletionProvider>, ProviderError> {
        let inner = Self::get_default_provider(config)?;
        let policy = RetryPolicy::from_config(&config.retry);
        Ok(Box::new(RetryingProvider::new(inner, policy)))
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic"]
    }
}
