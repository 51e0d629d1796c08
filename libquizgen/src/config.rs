//! Configuration management for Quizgen

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::{ContentSource, ContentType, Language, MAX_CARDS, MAX_QUESTIONS};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub llm: LlmConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    pub timeout_secs: u64,
}

/// Completion endpoint settings
///
/// A configured `api_key` is used with `model`, or with the default model
/// when `model` is unset. Without a key both come from the backend's
/// `/api/config` endpoint, and a configured `model` still wins.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub endpoint: String,
    /// Never written back out on serialization
    #[serde(skip_serializing, deserialize_with = "deserialize_api_key")]
    pub api_key: Option<SecretString>,
    pub model: Option<String>,
    /// Sent as `HTTP-Referer`; OpenRouter uses it for attribution
    pub referer: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub source: ContentSource,
    pub content_type: ContentType,
    pub language: Language,
    pub num_questions: u32,
    pub num_cards: u32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COMPLETION_ENDPOINT.to_string(),
            api_key: None,
            model: None,
            referer: None,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("referer", &self.referer)
            .finish()
    }
}

fn deserialize_api_key<'de, D>(deserializer: D) -> std::result::Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let key = Option::<String>::deserialize(deserializer)?;
    Ok(key.filter(|k| !k.trim().is_empty()).map(SecretString::from))
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            source: ContentSource::Document,
            content_type: ContentType::Quiz,
            language: Language::English,
            num_questions: 5,
            num_cards: 10,
        }
    }
}

impl DefaultsConfig {
    /// Default count for the given content type
    pub fn count_for(&self, content_type: ContentType) -> u32 {
        match content_type {
            ContentType::Quiz => self.num_questions,
            ContentType::Flashcards => self.num_cards,
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error; defaults are used instead.
    /// `QUIZGEN_BACKEND_URL` overrides `backend.url` either way.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        let mut config = if config_path.exists() {
            Self::load_from_path(&config_path)?
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Self::default()
        };

        if let Ok(url) = std::env::var("QUIZGEN_BACKEND_URL") {
            if !url.trim().is_empty() {
                config.backend.url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every generation attempt fail
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.backend.url).map_err(|e| ConfigError::InvalidValue {
            field: "backend.url".to_string(),
            reason: e.to_string(),
        })?;

        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backend.timeout_secs".to_string(),
                reason: "must be at least 1 second".to_string(),
            }
            .into());
        }

        reqwest::Url::parse(&self.llm.endpoint).map_err(|e| ConfigError::InvalidValue {
            field: "llm.endpoint".to_string(),
            reason: e.to_string(),
        })?;

        check_count("defaults.num_questions", self.defaults.num_questions, MAX_QUESTIONS)?;
        check_count("defaults.num_cards", self.defaults.num_cards, MAX_CARDS)?;

        Ok(())
    }
}

fn check_count(field: &str, value: u32, max: u32) -> Result<()> {
    if (1..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            reason: format!("must be between 1 and {}, got {}", max, value),
        }
        .into())
    }
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("QUIZGEN_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("quizgen").join("config.toml"))
}

/// Resolve the data directory path following XDG Base Directory spec
pub fn resolve_data_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| ConfigError::MissingField("data directory".to_string()))?;

    Ok(data_dir.join("quizgen"))
}
