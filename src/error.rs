use thiserror::Error;

/// Errors raised while talking to a text-completion provider
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Transport-level failure reaching the provider
    #[error("Request to provider failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Provider returned {status}: {message}")]
    Api { status: u16, message: String },

    /// Provider signaled throttling on a single attempt
    #[error("Provider is rate limiting requests: {0}")]
    RateLimited(String),

    /// Throttling persisted through every attempt of the retry budget
    #[error("Rate limited by provider after {attempts} attempts, please try again later")]
    RateLimitExhausted { attempts: u32 },

    /// Response did not contain the expected completion text
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Provider could not be constructed from configuration
    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether this error stems from provider throttling, either a single
    /// throttled attempt or an exhausted retry budget.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            ProviderError::RateLimited(_) | ProviderError::RateLimitExhausted { .. } => true,
            ProviderError::Api { status, message } => {
                *status == 429 || has_rate_limit_signal(message)
            }
            _ => false,
        }
    }
}

/// Check provider error text for a throttling signal.
///
/// Providers disagree on how they report throttling (Gemini says
/// `RESOURCE_EXHAUSTED`, OpenAI says `rate_limit_exceeded`), so this matches
/// on the common phrases rather than one provider's error code.
pub fn has_rate_limit_signal(text: &str) -> bool {
    let lowered = text.to_lowercase();
    ["rate limit", "rate_limit", "quota", "resource_exhausted", "resource exhausted", "429"]
        .iter()
        .any(|signal| lowered.contains(signal))
}

/// Errors raised by the pantry store
#[derive(Error, Debug)]
pub enum PantryError {
    /// Reading or writing the pantry file failed
    #[error("Pantry storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Pantry contents could not be serialized
    #[error("Failed to serialize pantry: {0}")]
    Serialize(#[from] serde_json::Error),

    /// No saved recipe carries the requested title
    #[error("Recipe not found: {0}")]
    NotFound(String),
}

/// Top-level errors surfaced while starting the service
#[derive(Error, Debug)]
pub enum ChefError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Provider setup error
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Failed to bind or run the HTTP server
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}
