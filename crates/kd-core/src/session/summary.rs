//! End-of-session statistics

use crate::timer::TimeDisplay;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which drill produced a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionKind {
    KanaWriting,
    KanjiReading,
}

/// Statistics reported when a session ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub kind: SessionKind,
    /// When the session was (re)started
    pub started_at: DateTime<Utc>,
    /// Counted seconds, frozen at stop or timeout
    pub elapsed_secs: u64,
    /// Time as displayed, `-` when the display was frozen
    pub time: String,
    /// Items answered (correctly or revealed)
    pub answered: usize,
    /// Items the learner failed to answer within the retry cap
    pub mistakes: u32,
    /// True when the queue ran out, false when aborted
    pub completed: bool,
}

impl SessionSummary {
    pub(crate) fn new(
        kind: SessionKind,
        started_at: DateTime<Utc>,
        display: TimeDisplay,
        elapsed_secs: u64,
        answered: usize,
        mistakes: u32,
        completed: bool,
    ) -> Self {
        Self {
            kind,
            started_at,
            elapsed_secs,
            time: display.to_string(),
            answered,
            mistakes,
            completed,
        }
    }
}
