//! Kana writing drill

use super::summary::{SessionKind, SessionSummary};
use super::Phase;
use crate::config::{Config, KanaConfig};
use crate::error::Result;
use crate::kana::KanaMask;
use crate::matcher::{classify, Match};
use crate::queue::{build_queue, make_rng, DEFAULT_QUEUE_LENGTH};
use crate::timer::{Clock, SessionTimer, TimeDisplay};
use crate::types::{KanaItem, Prompt};
use chrono::{DateTime, Utc};
use rand::rngs::SmallRng;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tolerance settings of a kana drill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KanaRules {
    /// Items per drill
    pub queue_length: usize,
    /// Wrong attempts on one item before it is revealed and skipped
    pub retry_cap: u32,
    /// Mistakes after which the time display is frozen
    pub failure_threshold: u32,
}

impl Default for KanaRules {
    fn default() -> Self {
        Self {
            queue_length: DEFAULT_QUEUE_LENGTH,
            retry_cap: 2,
            failure_threshold: 3,
        }
    }
}

impl From<&KanaConfig> for KanaRules {
    fn from(config: &KanaConfig) -> Self {
        Self {
            queue_length: config.queue_length,
            retry_cap: config.retry_cap,
            failure_threshold: config.failure_threshold,
        }
    }
}

/// Result of submitting one kana unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanaFeedback {
    /// No item is being asked; the unit was dropped
    Ignored,
    /// Correct so far, more units expected
    Partial { entered: String },
    /// Wrong entry below the retry cap; the same item must be entered again
    TryAgain { entered: String },
    /// The item was answered; the session moved on
    Correct { answer: String },
    /// Retry cap reached; the answer is revealed and the session moved on
    Mistake { answer: String },
}

impl KanaFeedback {
    /// Whether this feedback moved the session past the item
    pub fn advanced(&self) -> bool {
        matches!(self, KanaFeedback::Correct { .. } | KanaFeedback::Mistake { .. })
    }
}

/// State machine of one kana writing drill
#[derive(Debug)]
pub struct KanaSession {
    mask: KanaMask,
    rules: KanaRules,
    rng: SmallRng,
    timer: SessionTimer,
    queue: Vec<KanaItem>,
    position: Option<usize>,
    expected: Vec<char>,
    entered: Vec<char>,
    retry_count: u32,
    mistake_total: u32,
    phase: Phase,
    started_at: DateTime<Utc>,
}

impl KanaSession {
    /// Create an idle session. Call [`reset`](Self::reset) to start it.
    pub fn new(mask: KanaMask, rules: KanaRules, timer: SessionTimer, rng: SmallRng) -> Self {
        Self {
            mask,
            rules,
            rng,
            timer,
            queue: Vec::new(),
            position: None,
            expected: Vec::new(),
            entered: Vec::new(),
            retry_count: 0,
            mistake_total: 0,
            phase: Phase::Idle,
            started_at: Utc::now(),
        }
    }

    /// Create an idle session from configuration
    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let mask = config.kana.mask()?;
        let timer = SessionTimer::new(clock, config.timer.timeout());
        Ok(Self::new(
            mask,
            KanaRules::from(&config.kana),
            timer,
            make_rng(config.rng.seed),
        ))
    }

    /// Start over with a fresh queue. Also used for "restart".
    ///
    /// Fails with [`DrillError::EmptyPool`](crate::DrillError::EmptyPool)
    /// when the mask enables nothing; the session is left untouched then.
    pub fn reset(&mut self) -> Result<()> {
        let pool = self.mask.items();
        let queue = build_queue(&pool, self.rules.queue_length, &mut self.rng).map_err(|e| {
            warn!("Cannot start kana drill: {}", e);
            e
        })?;

        self.queue = queue;
        self.position = None;
        self.mistake_total = 0;
        self.started_at = Utc::now();
        self.timer.start();
        self.phase = Phase::AwaitingInput;
        info!(
            "Kana drill started: {} items from a pool of {}",
            self.queue.len(),
            pool.len()
        );

        self.advance();
        Ok(())
    }

    fn advance(&mut self) {
        let next = self.position.map_or(0, |p| p + 1);
        self.position = Some(next);
        self.entered.clear();
        self.retry_count = 0;

        if next >= self.queue.len() {
            self.timer.stop();
            self.expected.clear();
            self.phase = Phase::Finished { completed: true };
            info!("Kana drill finished with {} mistakes", self.mistake_total);
            return;
        }

        let item = self.queue[next];
        self.expected = item.expected_answer().chars().collect();
        debug!("Asking item {} of {}: {}", next + 1, self.queue.len(), item);
    }

    /// Submit one answer unit, e.g. a clicked recognition candidate
    pub fn submit(&mut self, unit: char) -> KanaFeedback {
        if self.phase != Phase::AwaitingInput {
            debug!("Ignoring unit {:?} outside of an item", unit);
            return KanaFeedback::Ignored;
        }

        self.entered.push(unit);
        match classify(&self.expected, &self.entered) {
            Match::Extending => KanaFeedback::Partial {
                entered: self.entered(),
            },
            Match::Complete => {
                let answer = self.expected_text();
                self.advance();
                KanaFeedback::Correct { answer }
            }
            Match::WrongPrefix => self.on_incorrect(),
        }
    }

    /// Submit units in order until one of them resolves the attempt.
    /// Units after that point are dropped.
    pub fn submit_all(&mut self, units: &str) -> KanaFeedback {
        let mut feedback = KanaFeedback::Ignored;
        for unit in units.chars() {
            feedback = self.submit(unit);
            if !matches!(feedback, KanaFeedback::Partial { .. }) {
                break;
            }
        }
        feedback
    }

    fn on_incorrect(&mut self) -> KanaFeedback {
        self.retry_count += 1;
        let entered = self.entered();

        if self.retry_count < self.rules.retry_cap {
            debug!("Wrong entry {:?}, try {} of {}", entered, self.retry_count, self.rules.retry_cap);
            self.entered.clear();
            return KanaFeedback::TryAgain { entered };
        }

        self.mistake_total += 1;
        if self.mistake_total == self.rules.failure_threshold {
            info!("Mistake threshold reached, time display frozen");
            self.timer.hide();
        }

        let answer = self.expected_text();
        debug!("Retry cap reached, revealing {:?}", answer);
        self.advance();
        KanaFeedback::Mistake { answer }
    }

    /// Abandon the drill. No completion statistics are produced.
    pub fn abort(&mut self) {
        if self.phase.is_finished() {
            return;
        }
        self.timer.stop();
        self.phase = Phase::Finished { completed: false };
        info!("Kana drill aborted");
    }

    /// Once-per-second poll; freezes the time display at the timeout
    pub fn tick(&mut self) {
        if self.phase == Phase::AwaitingInput && self.timer.tick() {
            info!("Kana drill time limit reached");
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn queue(&self) -> &[KanaItem] {
        &self.queue
    }

    /// Index of the current item; `None` before the first draw and equal to
    /// the queue length once finished
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current_item(&self) -> Option<KanaItem> {
        if self.phase != Phase::AwaitingInput {
            return None;
        }
        self.position.and_then(|p| self.queue.get(p).copied())
    }

    pub fn current_prompt(&self) -> Option<Prompt> {
        self.current_item().map(|item| item.prompt())
    }

    /// Answer of the current item, in the item's script
    pub fn expected_answer(&self) -> Option<String> {
        self.current_item().map(|_| self.expected_text())
    }

    fn expected_text(&self) -> String {
        self.expected.iter().collect()
    }

    /// Units entered for the current item so far
    pub fn entered(&self) -> String {
        self.entered.iter().collect()
    }

    /// Items left including the current one
    pub fn remaining(&self) -> usize {
        match (self.phase, self.position) {
            (Phase::AwaitingInput, Some(p)) => self.queue.len().saturating_sub(p),
            (Phase::Idle, _) => self.rules.queue_length,
            _ => 0,
        }
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn mistake_total(&self) -> u32 {
        self.mistake_total
    }

    pub fn time_display(&self) -> TimeDisplay {
        self.timer.display()
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed()
    }

    /// Statistics of a finished drill
    pub fn summary(&self) -> Option<SessionSummary> {
        let Phase::Finished { completed } = self.phase else {
            return None;
        };
        let answered = self.position.unwrap_or(0).min(self.queue.len());
        Some(SessionSummary::new(
            SessionKind::KanaWriting,
            self.started_at,
            self.timer.display(),
            self.timer.elapsed().as_secs(),
            answered,
            self.mistake_total,
            completed,
        ))
    }
}
