/*!
 * Timed suspensions of the translation pipeline.
 *
 * Every wait goes through a `Sleeper` so the orchestrators can be driven
 * without real time passing. `Backoff` holds the per-unit retry state.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use crate::app_config::PacingConfig;

/// Why the pipeline is pausing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// Waiting before retrying a rate-limited unit
    Backoff,
    /// Fixed pause after a translated unit
    UnitCooldown,
    /// Fixed pause after a translated page
    PageCooldown,
}

/// Suspends the current task for a while
#[async_trait]
pub trait Sleeper: Send + Sync + Debug {
    async fn pause(&self, reason: PauseReason, duration: Duration);
}

/// Sleeps on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn pause(&self, _reason: PauseReason, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Records every pause and returns immediately. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    pauses: Arc<Mutex<Vec<(PauseReason, Duration)>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// All pauses in the order they were requested
    pub fn pauses(&self) -> Vec<(PauseReason, Duration)> {
        self.pauses.lock().clone()
    }

    /// Durations of the pauses with the given reason
    pub fn durations(&self, reason: PauseReason) -> Vec<Duration> {
        self.pauses
            .lock()
            .iter()
            .filter(|(r, _)| *r == reason)
            .map(|(_, d)| *d)
            .collect()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn pause(&self, reason: PauseReason, duration: Duration) {
        self.pauses.lock().push((reason, duration));
    }
}

/// Exponential backoff state of one unit
///
/// The wait factor starts at `initial_wait_factor` and doubles after every
/// rate-limited attempt; the wait is `factor * backoff_unit_ms`.
#[derive(Debug, Clone)]
pub struct Backoff {
    wait_factor: u64,
    unit_ms: u64,
    retries: u32,
    max_retries: Option<u32>,
}

impl Backoff {
    pub fn new(pacing: &PacingConfig) -> Self {
        Self {
            wait_factor: pacing.initial_wait_factor,
            unit_ms: pacing.backoff_unit_ms,
            retries: 0,
            max_retries: pacing.max_rate_limit_retries,
        }
    }

    /// Take the next wait and advance the state.
    ///
    /// Returns `None` once the optional retry ceiling has been reached.
    pub fn next_wait(&mut self) -> Option<Duration> {
        if self.max_retries.is_some_and(|max| self.retries >= max) {
            return None;
        }

        let wait = Duration::from_millis(self.wait_factor.saturating_mul(self.unit_ms));
        self.wait_factor = self.wait_factor.saturating_mul(2);
        self.retries += 1;
        Some(wait)
    }

    /// Number of waits handed out so far
    pub fn retries(&self) -> u32 {
        self.retries
    }
}
