use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use super::{Translate, TranslationOutcome, TranslationRequest};
use crate::app_config::TranslationSettings;
use crate::references::rewrite_references;

/// Longest response excerpt carried in an error message
const ERROR_BODY_EXCERPT: usize = 200;

/// DeepL client issuing one GET request per translation
#[derive(Debug, Clone)]
pub struct DeepLClient {
    /// HTTP client for API requests
    client: Client,
}

/// Body of a successful translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    /// One entry per submitted text
    pub translations: Vec<DeepLTranslation>,
}

/// A single translated text
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    /// Language the service detected in the source
    #[serde(default)]
    pub detected_source_language: Option<String>,
    /// The translated text
    pub text: String,
}

impl DeepLClient {
    /// Create a new client with the given request timeout
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for DeepLClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl Translate for DeepLClient {
    async fn translate(&self, text: &str, settings: &TranslationSettings) -> TranslationOutcome {
        let request = TranslationRequest::new(
            rewrite_references(text).into_owned(),
            settings.target_language.as_str(),
            settings.formality,
        );
        let url = settings.endpoint.request_url(&request.to_query(&settings.token));

        debug!(
            "Sending {} chars to {} (target {})",
            request.text.len(),
            settings.endpoint.base(),
            request.target_language
        );

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                // reqwest errors carry the URL, which contains the token
                let e = e.without_url();
                error!("Failed to send request to DeepL API: {}", e);
                return TranslationOutcome::UnknownFailure(format!("Failed to send request to DeepL API: {}", e));
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let e = e.without_url();
                return TranslationOutcome::UnknownFailure(format!("Failed to read DeepL API response: {}", e));
            }
        };

        outcome_from_response(status, &body)
    }
}

/// Map an HTTP status and body to a translation outcome
pub fn outcome_from_response(status: u16, body: &str) -> TranslationOutcome {
    match status {
        200 => match serde_json::from_str::<DeepLResponse>(body) {
            Ok(parsed) => match parsed.translations.into_iter().next() {
                Some(translation) => TranslationOutcome::Success(translation.text),
                None => TranslationOutcome::UnknownFailure("DeepL API returned no translations".to_string()),
            },
            Err(e) => TranslationOutcome::UnknownFailure(format!("Failed to parse DeepL API response: {}", e)),
        },
        429 => TranslationOutcome::RateLimited,
        456 => TranslationOutcome::QuotaExceeded,
        401 | 403 => TranslationOutcome::Unauthorized,
        other => {
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            error!("DeepL API error ({}): {}", other, excerpt);
            TranslationOutcome::UnknownFailure(format!("DeepL API error ({}): {}", other, excerpt))
        }
    }
}
