/*!
 * Translation pipeline for rich-text documents.
 *
 * - `pacing`: sleepers, pause reasons and per-unit backoff state
 * - `orchestrator`: unit-by-unit document translation with retry and cooldown
 * - `pages`: sequential translation of multi-page documents
 */

// Re-export main types for easier usage
pub use self::orchestrator::{DocumentTranslator, UNIT_CONCURRENCY};
pub use self::pacing::{Backoff, PauseReason, RecordingSleeper, Sleeper, TokioSleeper};
pub use self::pages::{Page, TranslatedPage};

// Submodules
pub mod orchestrator;
pub mod pacing;
pub mod pages;
