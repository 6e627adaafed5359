/*!
 * Rate-limited document translation.
 *
 * A document is split into paragraph units which are pushed through the
 * client one at a time. Rate-limited units are retried with exponential
 * backoff for as long as it takes; any other failure aborts the whole
 * document. Every successful unit is followed by a fixed cooldown.
 */

use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, error, info, warn};

use crate::app_config::{PacingConfig, TranslationSettings};
use crate::client::{Translate, TranslationOutcome};
use crate::errors::TranslationError;
use crate::html::{join_units, split_paragraphs, DocumentUnit};
use crate::references::rewrite_references;

use super::pacing::{Backoff, PauseReason, Sleeper, TokioSleeper};

/// Units of one document in flight at once.
///
/// The service throttles hard enough that parallel requests only earn more
/// 429 responses.
pub const UNIT_CONCURRENCY: usize = 1;

/// Drives documents through a translation client
#[derive(Debug, Clone)]
pub struct DocumentTranslator<C, S = TokioSleeper> {
    /// Client performing the remote calls
    pub(crate) client: C,
    /// Timer used for backoff and cooldowns
    pub(crate) sleeper: S,
    /// Delays and retry policy
    pub(crate) pacing: PacingConfig,
}

impl<C: Translate> DocumentTranslator<C, TokioSleeper> {
    /// Create a translator that waits on the tokio timer
    pub fn new(client: C, pacing: PacingConfig) -> Self {
        Self::with_sleeper(client, TokioSleeper, pacing)
    }
}

impl<C: Translate, S: Sleeper> DocumentTranslator<C, S> {
    /// Create a translator with a custom sleeper
    pub fn with_sleeper(client: C, sleeper: S, pacing: PacingConfig) -> Self {
        Self { client, sleeper, pacing }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn pacing(&self) -> &PacingConfig {
        &self.pacing
    }

    /// Translate a whole markup document.
    ///
    /// Units are translated in order and joined without a separator. On a
    /// terminal failure nothing is returned and no later unit is requested.
    pub async fn translate_document(
        &self,
        markup: &str,
        settings: &TranslationSettings,
    ) -> Result<String, TranslationError> {
        let units = split_paragraphs(&rewrite_references(markup));
        let total = units.len();
        debug!("Translating document of {} chars in {} units", markup.len(), total);

        let translated: Vec<DocumentUnit> = stream::iter(units)
            .map(|unit| self.translate_paced_unit(unit, total, settings))
            .buffer_unordered(UNIT_CONCURRENCY)
            .try_collect()
            .await?;

        info!("Translated {} units to {}", total, settings.target_language);
        // Completion order may differ from document order
        Ok(join_units(&translated))
    }

    /// Translate one string as a single request, retrying while rate limited.
    ///
    /// No paragraph splitting and no cooldown; meant for short strings such
    /// as names.
    pub async fn translate_unit(&self, text: &str, settings: &TranslationSettings) -> Result<String, TranslationError> {
        let mut backoff = Backoff::new(&self.pacing);

        loop {
            match self.client.translate(text, settings).await {
                TranslationOutcome::Success(translated) => return Ok(translated),
                TranslationOutcome::RateLimited => {
                    let Some(wait) = backoff.next_wait() else {
                        error!("Giving up after {} rate-limited retries", backoff.retries());
                        return Err(TranslationError::RateLimitRetriesExhausted { attempts: backoff.retries() });
                    };
                    warn!("Rate limited, retrying in {:?} (retry {})", wait, backoff.retries());
                    self.sleeper.pause(PauseReason::Backoff, wait).await;
                }
                TranslationOutcome::QuotaExceeded => {
                    error!("Translation aborted: monthly quota exceeded");
                    return Err(TranslationError::QuotaExceeded);
                }
                TranslationOutcome::Unauthorized => {
                    error!("Translation aborted: token rejected");
                    return Err(TranslationError::Unauthorized);
                }
                TranslationOutcome::UnknownFailure(message) => {
                    error!("Translation aborted: {}", message);
                    return Err(TranslationError::UnknownFailure(message));
                }
            }
        }
    }

    async fn translate_paced_unit(
        &self,
        unit: DocumentUnit,
        total: usize,
        settings: &TranslationSettings,
    ) -> Result<DocumentUnit, TranslationError> {
        debug!("Unit {}/{} ({} chars)", unit.ordinal + 1, total, unit.content.len());
        let content = self.translate_unit(&unit.content, settings).await?;
        self.sleeper.pause(PauseReason::UnitCooldown, self.pacing.unit_cooldown()).await;
        Ok(DocumentUnit { ordinal: unit.ordinal, content })
    }
}
