/*!
 * Mock client implementation for testing.
 *
 * `MockClient` replays a script of outcomes, one per call, and falls back to
 * a successful echo translation once the script is exhausted. Clones share
 * the script and the request log.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use super::{Translate, TranslationOutcome};
use crate::app_config::TranslationSettings;

/// Scripted stand-in for a remote translation client
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    /// Outcomes to return, front first
    script: Arc<Mutex<VecDeque<TranslationOutcome>>>,
    /// Every text received, in call order
    requests: Arc<Mutex<Vec<String>>>,
    /// Custom response generator for the fallback success (optional)
    custom_response: Option<fn(&str) -> String>,
    /// Inclusive bounds of a random per-call delay in milliseconds
    latency_ms: Option<(u64, u64)>,
}

impl MockClient {
    /// Create a mock that always succeeds
    pub fn working() -> Self {
        Self::default()
    }

    /// Create a mock that returns the given outcomes in order, then succeeds
    pub fn scripted(outcomes: impl IntoIterator<Item = TranslationOutcome>) -> Self {
        let client = Self::default();
        client.script.lock().extend(outcomes);
        client
    }

    /// Append outcomes to the script
    pub fn push_outcomes(&self, outcomes: impl IntoIterator<Item = TranslationOutcome>) {
        self.script.lock().extend(outcomes);
    }

    /// Set a custom response generator
    pub fn with_custom_response(mut self, generator: fn(&str) -> String) -> Self {
        self.custom_response = Some(generator);
        self
    }

    /// Delay every call by a random duration within the bounds
    pub fn with_random_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.latency_ms = Some((min_ms.min(max_ms), max_ms.max(min_ms)));
        self
    }

    /// Texts received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Number of calls so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Translate for MockClient {
    async fn translate(&self, text: &str, settings: &TranslationSettings) -> TranslationOutcome {
        self.requests.lock().push(text.to_string());

        if let Some((min_ms, max_ms)) = self.latency_ms {
            let delay = rand::rng().random_range(min_ms..=max_ms);
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| {
            let text = match self.custom_response {
                Some(generator) => generator(text),
                None => format!("[{}] {}", settings.target_language, text),
            };
            TranslationOutcome::Success(text)
        })
    }
}
