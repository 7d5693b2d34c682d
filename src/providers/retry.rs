use crate::config::RetryConfig;
use crate::error::ProviderError;
use crate::providers::CompletionProvider;
use async_trait::async_trait;
use log::{debug, info, warn};
use std::fmt;
use std::time::Duration;
use tokio::time::sleep;

/// How the pause between attempts grows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same pause after every failed attempt
    Fixed,
    /// Pause multiplied by the attempt number
    Linear,
}

/// Verdict of the retry classifier for one failed attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    Retryable,
    Fatal,
}

/// Retry schedule for provider calls.
///
/// The policy only decides; it never waits. Executors such as
/// [`RetryingProvider`] ask it for the next delay and pick their own way of
/// pausing.
#[derive(Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff: Backoff,
    classifier: fn(&ProviderError) -> RetryDecision,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("delay", &self.delay)
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

/// Default classifier: throttling is retryable, everything else is fatal.
pub fn rate_limit_classifier(error: &ProviderError) -> RetryDecision {
    match error {
        ProviderError::RateLimitExhausted { .. } => RetryDecision::Fatal,
        e if e.is_rate_limit() => RetryDecision::Retryable,
        _ => RetryDecision::Fatal,
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration, backoff: Backoff) -> Self {
        RetryPolicy {
            max_attempts: max_attempts.max(1),
            delay,
            backoff,
            classifier: rate_limit_classifier,
        }
    }

    /// Fixed-delay rate-limit policy from configuration
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_secs(config.rate_limit_delay_secs),
            Backoff::Fixed,
        )
    }

    /// Replace the function deciding which errors are worth another attempt
    pub fn with_classifier(mut self, classifier: fn(&ProviderError) -> RetryDecision) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classify(&self, error: &ProviderError) -> RetryDecision {
        (self.classifier)(error)
    }

    /// Delay before the attempt following `attempt` (1-based), or `None` when
    /// the budget is spent.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        match self.backoff {
            Backoff::Fixed => Some(self.delay),
            Backoff::Linear => Some(self.delay * attempt),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

/// Provider decorator that re-runs throttled calls according to a [`RetryPolicy`]
pub struct RetryingProvider {
    inner: Box<dyn CompletionProvider>,
    policy: RetryPolicy,
}

impl RetryingProvider {
    pub fn new(inner: Box<dyn CompletionProvider>, policy: RetryPolicy) -> Self {
        RetryingProvider { inner, policy }
    }
}

#[async_trait]
impl CompletionProvider for RetryingProvider {
    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let mut attempt = 1;

        loop {
            debug!(
                "Calling {} (attempt {}/{})",
                self.inner.provider_name(),
                attempt,
                self.policy.max_attempts
            );

            let error = match self.inner.complete(prompt).await {
                Ok(text) => return Ok(text),
                Err(e) => e,
            };

            if self.policy.classify(&error) == RetryDecision::Fatal {
                return Err(error);
            }

            match self.policy.delay_after(attempt) {
                Some(delay) => {
                    warn!(
                        "{} rate limited (attempt {}/{}), waiting {:?}: {}",
                        self.inner.provider_name(),
                        attempt,
                        self.policy.max_attempts,
                        delay,
                        error
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    info!(
                        "{} still rate limited after {} attempts, giving up",
                        self.inner.provider_name(),
                        attempt
                    );
                    return Err(ProviderError::RateLimitExhausted { attempts: attempt });
                }
            }
        }
    }
}
