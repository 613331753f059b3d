//! Layered configuration for the backend adapters.
//!
//! Configuration merges three TOML sources, later sources winning:
//! - Bundled defaults (include_str! from scrivano.toml)
//! - User config in the home directory (~/.config/scrivano/scrivano.toml)
//! - User config in the current directory (./scrivano.toml)
//!
//! Credentials never live in these files; keys are injected explicitly or
//! read from the environment at the composition root.

use config::{Config, File, FileFormat};
use scrivano_error::{ConfigError, ScrivanoError, ScrivanoResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Retry schedule for transient backend failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Retry attempts after the first failure (0 disables retrying)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First backoff delay in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Backoff ceiling in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Settings for the OpenAI completion adapter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OpenAiConfig {
    /// Completions endpoint URL
    #[serde(default = "default_openai_url")]
    pub api_url: String,

    /// Model identifier used when a request carries no override
    #[serde(default = "default_openai_model")]
    pub model: String,

    /// Token limit applied when a request carries no override
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Whole-request deadline in seconds
    #[serde(default = "default_openai_timeout_secs")]
    pub timeout_secs: u64,

    /// Requests-per-minute throttle shared across executions
    /// (absent means unthrottled)
    #[serde(default)]
    pub requests_per_minute: Option<u32>,

    /// Retry schedule for transient failures
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_openai_url() -> String {
    "https://api.openai.com/v1/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo-instruct".to_string()
}

fn default_max_tokens() -> u32 {
    800
}

fn default_openai_timeout_secs() -> u64 {
    60
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_url: default_openai_url(),
            model: default_openai_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_openai_timeout_secs(),
            requests_per_minute: None,
            retry: RetryConfig::default(),
        }
    }
}

/// Settings for the Wikipedia research adapter.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WikipediaConfig {
    /// MediaWiki API endpoint URL
    #[serde(default = "default_wikipedia_url")]
    pub api_url: String,

    /// Whole-request deadline in seconds
    #[serde(default = "default_wikipedia_timeout_secs")]
    pub timeout_secs: u64,

    /// Sentences requested from the intro extract
    #[serde(default = "default_sentences")]
    pub sentences: u32,
}

fn default_wikipedia_url() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_wikipedia_timeout_secs() -> u64 {
    10
}

fn default_sentences() -> u32 {
    3
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_url: default_wikipedia_url(),
            timeout_secs: default_wikipedia_timeout_secs(),
            sentences: default_sentences(),
        }
    }
}

/// Top-level backend configuration.
///
/// # Example
///
/// ```no_run
/// use scrivano_models::BackendConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Bundled defaults merged with any user overrides
/// let config = BackendConfig::load()?;
/// println!("completion model: {}", config.openai.model);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// OpenAI completion adapter settings
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Wikipedia research adapter settings
    #[serde(default)]
    pub wikipedia: WikipediaConfig,
}

impl BackendConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ScrivanoResult<Self> {
        debug!("Loading backend configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ScrivanoError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScrivanoError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override
    /// earlier):
    /// 1. Bundled defaults (scrivano.toml shipped with the library)
    /// 2. User config in the home directory (~/.config/scrivano/scrivano.toml)
    /// 3. User config in the current directory (./scrivano.toml)
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> ScrivanoResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../scrivano.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/scrivano/scrivano.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("scrivano").required(false));

        builder
            .build()
            .map_err(|e| {
                ScrivanoError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ScrivanoError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
