use serde::Deserialize;
use std::env;
use thiserror::Error;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the videobrief pipeline.
///
/// Loaded once at process start and handed to the components that need it.
/// There is intentionally no process-global cache: each `Summarizer` or
/// `VoiceGenerator` receives its settings explicitly, so independent pipeline
/// instances (and test doubles) can coexist in one process.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// API key for the OpenAI chat-completions endpoint; the CLI flag can
    /// supply it instead.
    pub openai_api_key: Option<String>,
    /// Chat model identifier used for every summarization request.
    pub openai_model: String,
    /// Optional override for the speaking-rate constant (words per minute).
    pub words_per_minute: Option<usize>,
    /// Optional override for the maximum chunk size in characters.
    pub max_chunk_chars: Option<usize>,
    /// Bearer token for the VBee TTS API, required only for voice output.
    pub vbee_token: Option<String>,
    /// Application identifier for the VBee TTS API.
    pub vbee_app_id: Option<String>,
}

const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";

impl Config {
    /// Load configuration from environment variables, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Ok(Self {
            openai_api_key: load_env_optional("OPENAI_API_KEY"),
            openai_model: load_env_optional("OPENAI_MODEL")
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string()),
            words_per_minute: parse_optional("WORDS_PER_MINUTE")?,
            max_chunk_chars: parse_optional("MAX_CHUNK_CHARS")?,
            vbee_token: load_env_optional("VBEE_TOKEN"),
            vbee_app_id: load_env_optional("VBEE_APP_ID"),
        })
    }
}

fn load_env_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_optional(key: &str) -> Result<Option<usize>, ConfigError> {
    load_env_optional(key)
        .map(|value| {
            value
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key.to_string()))
        })
        .transpose()
}
