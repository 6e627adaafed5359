/*!
 * Translation of multi-page documents.
 *
 * Pages are translated strictly one after another, each through the
 * rate-limited document path, with a long fixed pause after every page.
 */

use log::info;

use crate::app_config::TranslationSettings;
use crate::client::Translate;
use crate::errors::TranslationError;

use super::orchestrator::DocumentTranslator;
use super::pacing::{PauseReason, Sleeper};

/// One page of a multi-page document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Display name of the page
    pub name: String,
    /// Stored markup, if the page has any text
    pub content: Option<String>,
}

impl Page {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Some(content.into()),
        }
    }

    /// A page without any text
    pub fn empty(name: impl Into<String>) -> Self {
        Self { name: name.into(), content: None }
    }

    /// Markup handed to the translator.
    ///
    /// The first `#` is removed; pages without text yield an empty string.
    pub fn prepared_text(&self) -> String {
        match self.content.as_deref() {
            Some(content) if !content.is_empty() => content.replacen('#', "", 1),
            _ => String::new(),
        }
    }
}

/// A page after translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPage {
    /// Name of the source page
    pub name: String,
    /// Translated markup
    pub content: String,
}

impl<C: Translate, S: Sleeper> DocumentTranslator<C, S> {
    /// Translate every page in order.
    ///
    /// # Arguments
    /// * `pages` - Pages in document order
    /// * `settings` - Read-only settings for the whole operation
    /// * `progress_callback` - Called with `(done, total)` after every page
    ///
    /// # Returns
    /// The translated pages in input order, or the first terminal failure.
    pub async fn translate_pages(
        &self,
        pages: &[Page],
        settings: &TranslationSettings,
        progress_callback: impl Fn(usize, usize),
    ) -> Result<Vec<TranslatedPage>, TranslationError> {
        let total = pages.len();
        let mut translated = Vec::with_capacity(total);

        for (index, page) in pages.iter().enumerate() {
            info!("Translating page {}/{}: {}", index + 1, total, page.name);

            let text = page.prepared_text();
            let content = if text.is_empty() {
                String::new()
            } else {
                self.translate_document(&text, settings).await?
            };

            translated.push(TranslatedPage {
                name: page.name.clone(),
                content,
            });
            progress_callback(index + 1, total);

            self.sleeper.pause(PauseReason::PageCooldown, self.pacing.page_cooldown()).await;
        }

        Ok(translated)
    }
}
