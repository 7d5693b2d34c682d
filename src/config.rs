use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

/// Main service configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Provider used for generation
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default = "default_providers")]
    pub providers: HashMap<String, ProviderConfig>,
    /// Rate-limit retry behavior
    #[serde(default)]
    pub retry: RetryConfig,
    /// Where saved recipes live
    #[serde(default)]
    pub pantry: PantryConfig,
    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for a specific provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-1.5-flash", "gpt-4o-mini"); empty
    /// means the provider's own default model
    #[serde(default)]
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    /// Configured model, or `default` when none was given
    pub fn model_or(&self, default: &str) -> String {
        if self.model.trim().is_empty() {
            default.to_string()
        } else {
            self.model.clone()
        }
    }
}

/// Configuration for rate-limit retries
#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    /// Total attempts per provider call, including the first one
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Pause after a rate-limited attempt, in seconds
    #[serde(default = "default_rate_limit_delay_secs")]
    pub rate_limit_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            rate_limit_delay_secs: default_rate_limit_delay_secs(),
        }
    }
}

/// Persistence variant for the pantry
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// JSON file rewritten on every mutation
    #[default]
    File,
    /// Process memory only, lost on restart
    Memory,
}

/// Configuration for the pantry store
#[derive(Debug, Deserialize, Clone)]
pub struct PantryConfig {
    #[serde(default)]
    pub storage: StorageKind,
    /// Pantry file, used when `storage` is `file`
    #[serde(default = "default_pantry_path")]
    pub path: PathBuf,
}

impl Default for PantryConfig {
    fn default() -> Self {
        Self {
            storage: StorageKind::default(),
            path: default_pantry_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

fn default_providers() -> HashMap<String, ProviderConfig> {
    let mut providers = HashMap::new();
    providers.insert(
        "google".to_string(),
        ProviderConfig {
            enabled: true,
            model: "gemini-1.5-flash".to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        },
    );
    providers
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_max_attempts() -> u32 {
    3
}

fn default_rate_limit_delay_secs() -> u64 {
    60
}

fn default_pantry_path() -> PathBuf {
    PathBuf::from("grandmas_pantry.json")
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_timeout() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with PANTRY__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: PANTRY__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: default_providers(),
            retry: RetryConfig::default(),
            pantry: PantryConfig::default(),
            server: ServerConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Load configuration from file and environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: PANTRY__PANTRY__STORAGE=memory
        .add_source(
            Environment::with_prefix("PANTRY")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
