//! Practice session state machines
//!
//! Two independent sessions share the same shape: draw an item, take the
//! learner's input, judge it, apply the retry cap, then either retry the
//! item or advance, until the queue runs out.
//!
//! - `kana.rs`: kana writing drill, answered one kana unit at a time
//! - `kanji.rs`: kanji reading drill, answered with a whole reading and
//!   driven by a [`ReadingDeck`](crate::deck::ReadingDeck)
//! - `summary.rs`: end-of-session statistics
//!
//! # Example
//!
//! ```ignore
//! use kd_core::config::Config;
//! use kd_core::session::KanaSession;
//! use kd_core::timer::SystemClock;
//!
//! let mut session = KanaSession::from_config(&Config::default(), Arc::new(SystemClock))?;
//! session.reset()?;
//! let feedback = session.submit('か');
//! ```

mod kana;
mod kanji;
mod summary;

pub use kana::{KanaFeedback, KanaRules, KanaSession};
pub use kanji::{
    Judgement, KanjiFeedback, KanjiPhase, KanjiSession, KanjiStep, Verdict, DEFAULT_KANJI_RETRY_CAP,
};
pub use summary::{SessionKind, SessionSummary};

/// Lifecycle of a kana session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, not reset yet
    Idle,
    /// An item is shown and input is accepted
    AwaitingInput,
    /// Queue exhausted (`completed`) or aborted by the learner
    Finished { completed: bool },
}

impl Phase {
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished { .. })
    }
}
