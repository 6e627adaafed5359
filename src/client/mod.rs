/*!
 * Translation client implementations.
 *
 * A client performs exactly one remote call per invocation and reports what
 * happened as a `TranslationOutcome`. Retrying is the orchestrator's job.
 * - `deepl`: HTTP client for the DeepL translate endpoint
 * - `endpoint`: direct / relay / own-proxy URL resolution
 * - `mock`: scripted client for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;
use url::form_urlencoded;

use crate::app_config::{Formality, TranslationSettings};

/// Source language of every request
pub const SOURCE_LANGUAGE: &str = "EN";

/// Tag handling mode of every request
pub const TAG_HANDLING: &str = "html";

/// Result of a single translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationOutcome {
    /// The translated text
    Success(String),
    /// Throttled by the service; the same request may be retried
    RateLimited,
    /// Monthly quota used up
    QuotaExceeded,
    /// Token rejected
    Unauthorized,
    /// Anything else, with a description
    UnknownFailure(String),
}

impl TranslationOutcome {
    /// Whether the outcome must abort the enclosing operation
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Success(_) | Self::RateLimited)
    }
}

/// One request to the translation service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    /// Markup to translate
    pub text: String,
    /// Target language code
    pub target_language: String,
    /// Always `EN`
    pub source_language: &'static str,
    /// Tone of the translation
    pub formality: Formality,
    /// Always `html`
    pub tag_handling: &'static str,
}

impl TranslationRequest {
    /// Create a new request with the fixed source language and tag handling
    pub fn new(text: impl Into<String>, target_language: impl Into<String>, formality: Formality) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            source_language: SOURCE_LANGUAGE,
            formality,
            tag_handling: TAG_HANDLING,
        }
    }

    /// Form-url-encode the request together with the authentication key
    pub fn to_query(&self, token: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair("auth_key", token)
            .append_pair("text", &self.text)
            .append_pair("target_lang", &self.target_language)
            .append_pair("source_lang", self.source_language)
            .append_pair("tag_handling", self.tag_handling)
            .append_pair("formality", self.formality.as_str())
            .finish()
    }
}

/// Common trait for translation clients
///
/// Implementations must perform at most one remote call per invocation and
/// never retry on their own.
#[async_trait]
pub trait Translate: Send + Sync + Debug {
    /// Translate one unit of text
    ///
    /// # Arguments
    /// * `text` - The markup to translate
    /// * `settings` - Read-only settings resolved for the current operation
    async fn translate(&self, text: &str, settings: &TranslationSettings) -> TranslationOutcome;
}

pub mod deepl;
pub mod endpoint;
pub mod mock;

pub use deepl::DeepLClient;
pub use endpoint::Endpoint;
pub use mock::MockClient;
