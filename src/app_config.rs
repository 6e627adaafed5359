use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::client::Endpoint;
use crate::errors::ConfigError;
use crate::language_utils;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Authentication key for the translation service
    #[serde(default)]
    pub token: String,

    /// Target language code (DeepL form, e.g. "DE", "EN-GB")
    pub target_language: String,

    /// Tone of the translation
    #[serde(default)]
    pub formality: Formality,

    /// Transport used to reach the service
    #[serde(default)]
    pub proxy: ProxyType,

    /// Proxy URL, only used with `proxy: "own"`
    #[serde(default)]
    pub own_proxy_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Delays and retry policy
    #[serde(default)]
    pub pacing: PacingConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Service-side tone of the translation
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    #[default]
    Default,
    More,
    Less,
    PreferMore,
    PreferLess,
}

impl Formality {
    // @returns: Value sent in the `formality` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::More => "more",
            Self::Less => "less",
            Self::PreferMore => "prefer_more",
            Self::PreferLess => "prefer_less",
        }
    }
}

impl fmt::Display for Formality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transport selection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProxyType {
    // @proxy: Straight to the service
    #[default]
    Direct,
    // @proxy: corsproxy.io relay
    CorsProxy,
    // @proxy: deepl-api-proxy.stbaf.de relay
    #[serde(rename = "deepl_api_proxy_stb")]
    DeepLApiProxyStb,
    // @proxy: User-supplied URL
    Own,
}

/// Delays and retry policy of the orchestrators
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PacingConfig {
    /// Pause after every successfully translated unit
    #[serde(default = "default_unit_cooldown_ms")]
    pub unit_cooldown_ms: u64,

    /// Pause after every translated page of a multi-page document
    #[serde(default = "default_page_cooldown_ms")]
    pub page_cooldown_ms: u64,

    /// Backoff time unit; the n-th retry waits `backoff_unit_ms * initial_wait_factor * 2^(n-1)`
    #[serde(default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Wait factor of the first retry
    #[serde(default = "default_initial_wait_factor")]
    pub initial_wait_factor: u64,

    /// Give up after this many rate-limited retries of one unit.
    ///
    /// Unset by default: a rate-limited unit is retried until it succeeds.
    #[serde(default)]
    pub max_rate_limit_retries: Option<u32>,
}

impl PacingConfig {
    /// Pacing without any real waiting, for tests and dry runs
    pub fn immediate() -> Self {
        Self {
            unit_cooldown_ms: 0,
            page_cooldown_ms: 0,
            backoff_unit_ms: 0,
            ..Self::default()
        }
    }

    pub fn unit_cooldown(&self) -> Duration {
        Duration::from_millis(self.unit_cooldown_ms)
    }

    pub fn page_cooldown(&self) -> Duration {
        Duration::from_millis(self.page_cooldown_ms)
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            unit_cooldown_ms: default_unit_cooldown_ms(),
            page_cooldown_ms: default_page_cooldown_ms(),
            backoff_unit_ms: default_backoff_unit_ms(),
            initial_wait_factor: default_initial_wait_factor(),
            max_rate_limit_retries: None,
        }
    }
}

/// Read-only settings for one translation operation
#[derive(Clone, PartialEq, Eq)]
pub struct TranslationSettings {
    /// Authentication key
    pub token: String,
    /// Target language code
    pub target_language: String,
    /// Tone of the translation
    pub formality: Formality,
    /// Resolved transport endpoint
    pub endpoint: Endpoint,
}

impl TranslationSettings {
    pub fn new(
        token: impl Into<String>,
        target_language: impl Into<String>,
        formality: Formality,
        endpoint: Endpoint,
    ) -> Self {
        Self {
            token: token.into(),
            target_language: target_language.into(),
            formality,
            endpoint,
        }
    }
}

// The token never shows up in logs
impl fmt::Debug for TranslationSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationSettings")
            .field("token", &"<redacted>")
            .field("target_language", &self.target_language)
            .field("formality", &self.formality)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_unit_cooldown_ms() -> u64 {
    500 // breathing room between units to stay clear of HTTP 429
}

fn default_page_cooldown_ms() -> u64 {
    5000
}

fn default_backoff_unit_ms() -> u64 {
    100
}

fn default_initial_wait_factor() -> u64 {
    2
}

impl Config {
    /// Load a configuration file, writing a default one when it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        language_utils::normalize_target_language(&self.target_language)
            .map_err(|_| ConfigError::InvalidLanguage(self.target_language.clone()))?;

        Endpoint::resolve(&self.proxy, &self.own_proxy_url, &self.token)?;

        Ok(())
    }

    /// Resolve the read-only settings for one operation
    pub fn translation_settings(&self) -> Result<TranslationSettings, ConfigError> {
        self.validate()?;

        let target_language = language_utils::normalize_target_language(&self.target_language)
            .map_err(|_| ConfigError::InvalidLanguage(self.target_language.clone()))?;
        let endpoint = Endpoint::resolve(&self.proxy, &self.own_proxy_url, &self.token)?;

        Ok(TranslationSettings::new(
            self.token.trim(),
            target_language,
            self.formality,
            endpoint,
        ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            token: String::new(),
            target_language: "DE".to_string(),
            formality: Formality::default(),
            proxy: ProxyType::default(),
            own_proxy_url: String::new(),
            timeout_secs: default_timeout_secs(),
            pacing: PacingConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
