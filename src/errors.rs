/*!
 * Error types for the comprehend application.
 *
 * This module contains custom error types for the translation core and the
 * application around it, using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Terminal failures of a translation operation.
///
/// Rate limiting is not represented here: it is retried inside the
/// orchestrator and never reaches the caller, unless an explicit retry
/// ceiling was configured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The account's monthly character quota is used up (HTTP 456)
    #[error("You have exceeded your monthly DeepL API quota. You will be able to continue translating next month. For more information, check your account on the DeepL website.")]
    QuotaExceeded,

    /// The token was rejected (HTTP 401 or 403)
    #[error("Your token is invalid. Please check your DeepL Token.")]
    Unauthorized,

    /// Any other status, transport failure or unreadable response
    #[error("Unknown error: {0}")]
    UnknownFailure(String),

    /// The optional rate-limit retry ceiling was reached
    #[error("Still rate limited after {attempts} retries")]
    RateLimitRetriesExhausted {
        /// Number of backoff sleeps performed before giving up
        attempts: u32,
    },
}

/// Errors raised while loading or validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No authentication token was configured
    #[error("No DeepL token found. Please add a DeepL token to your settings")]
    MissingToken,

    /// The target language is not a known language code
    #[error("Invalid target language: {0}")]
    InvalidLanguage(String),

    /// The own-proxy URL is missing or cannot be parsed
    #[error("Invalid proxy URL '{url}': {reason}")]
    InvalidProxyUrl {
        /// The offending URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration handling
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
