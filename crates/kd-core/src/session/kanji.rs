//! Kanji reading drill

use super::summary::{SessionKind, SessionSummary};
use crate::config::Config;
use crate::deck::{ReadingDeck, ReadingItem};
use crate::error::{DrillError, Result};
use crate::timer::{Clock, SessionTimer, TimeDisplay};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

/// Default wrong attempts on one reading before it is revealed
pub const DEFAULT_KANJI_RETRY_CAP: u32 = 5;

/// How a submitted reading was judged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The reading matched
    Correct,
    /// Wrong, below the retry cap; the learner may try again
    Incorrect,
    /// Empty submission; the answer is shown without counting a mistake
    Revealed,
    /// Wrong and the retry cap was reached; the answer is shown
    RevealedAfterCap,
}

/// Details of a judged submission for the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    pub verdict: Verdict,
    /// Correct reading, shown unless the verdict is `Incorrect`
    pub answer: Option<String>,
    /// Whether another item follows ("Continue") or not ("Finish")
    pub has_next: bool,
}

/// Result of a text submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanjiFeedback {
    /// No item is waiting for input
    Ignored,
    Judged(Judgement),
}

/// Result of the explicit "next" action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanjiStep {
    /// No result was being shown
    Ignored,
    /// Same item asked again after a wrong answer
    Retry,
    /// Moved on to the next item
    NextItem,
    /// The deck ran out; the session is over
    Finished,
}

/// Lifecycle of a kanji reading session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KanjiPhase {
    Idle,
    AwaitingInput,
    ShowingResult { verdict: Verdict, has_next: bool },
    Finished { completed: bool },
}

impl KanjiPhase {
    pub fn is_finished(&self) -> bool {
        matches!(self, KanjiPhase::Finished { .. })
    }
}

/// State machine of one kanji reading drill over a [`ReadingDeck`]
#[derive(Debug)]
pub struct KanjiSession<D: ReadingDeck> {
    deck: D,
    retry_cap: u32,
    timer: SessionTimer,
    item: Option<ReadingItem>,
    attempts: Vec<String>,
    retry_count: u32,
    mistake_total: u32,
    answered: usize,
    phase: KanjiPhase,
    started_at: DateTime<Utc>,
}

impl<D: ReadingDeck> KanjiSession<D> {
    /// Create an idle session. Call [`start`](Self::start) to draw the
    /// first item.
    pub fn new(deck: D, retry_cap: u32, timer: SessionTimer) -> Self {
        Self {
            deck,
            retry_cap,
            timer,
            item: None,
            attempts: Vec::new(),
            retry_count: 0,
            mistake_total: 0,
            answered: 0,
            phase: KanjiPhase::Idle,
            started_at: Utc::now(),
        }
    }

    /// Create an idle session from configuration
    pub fn from_config(deck: D, config: &Config, clock: Arc<dyn Clock>) -> Self {
        let timer = SessionTimer::new(clock, config.timer.timeout());
        Self::new(deck, config.kanji.retry_cap, timer)
    }

    /// Start the drill with the deck's first item
    pub fn start(&mut self) -> Result<()> {
        if !self.deck.queue_non_empty() {
            return Err(DrillError::EmptyPool);
        }

        self.mistake_total = 0;
        self.answered = 0;
        self.started_at = Utc::now();
        self.timer.start();
        info!("Kanji reading drill started");

        if !self.next_round() {
            self.finish(true);
        }
        Ok(())
    }

    fn next_round(&mut self) -> bool {
        let Some(item) = self.deck.next_item() else {
            return false;
        };
        debug!(
            "Asking reading #{} of {} with {} example words",
            item.reading_slot,
            item.kanji,
            item.words.len()
        );

        self.item = Some(item);
        self.retry_count = 0;
        self.attempts.clear();
        self.phase = KanjiPhase::AwaitingInput;
        true
    }

    fn finish(&mut self, completed: bool) {
        self.timer.stop();
        self.item = None;
        self.phase = KanjiPhase::Finished { completed };
        info!(
            "Kanji reading drill finished: {} answered, {} mistakes",
            self.answered, self.mistake_total
        );
    }

    /// Submit a typed reading. An empty (or blank) submission asks for the
    /// answer to be revealed.
    pub fn submit(&mut self, text: &str) -> KanjiFeedback {
        if self.phase != KanjiPhase::AwaitingInput {
            debug!("Ignoring submission outside of an item");
            return KanjiFeedback::Ignored;
        }

        let text = text.trim();
        let verdict = if text.is_empty() {
            Verdict::Revealed
        } else if self.deck.reading_matches(text) {
            Verdict::Correct
        } else {
            self.retry_count += 1;
            if self.retry_count >= self.retry_cap {
                self.mistake_total += 1;
                Verdict::RevealedAfterCap
            } else {
                self.attempts.push(text.to_string());
                Verdict::Incorrect
            }
        };
        debug!("Submission {:?} judged {:?}", text, verdict);

        let has_next = self.deck.queue_non_empty();
        let answer = match verdict {
            Verdict::Incorrect => None,
            _ => Some(self.deck.correct_answer_text()),
        };
        self.phase = KanjiPhase::ShowingResult { verdict, has_next };

        KanjiFeedback::Judged(Judgement {
            verdict,
            answer,
            has_next,
        })
    }

    /// The "next" action pressed while a result is shown
    pub fn advance_explicitly(&mut self) -> KanjiStep {
        let KanjiPhase::ShowingResult { verdict, .. } = self.phase else {
            return KanjiStep::Ignored;
        };

        if verdict == Verdict::Incorrect {
            self.phase = KanjiPhase::AwaitingInput;
            return KanjiStep::Retry;
        }

        self.deck.record_answer(verdict == Verdict::Correct);
        self.answered += 1;
        self.retry_count = 0;
        self.attempts.clear();

        if self.deck.queue_non_empty() && self.next_round() {
            KanjiStep::NextItem
        } else {
            self.finish(true);
            KanjiStep::Finished
        }
    }

    /// Abandon the drill. No completion statistics are produced.
    pub fn abort(&mut self) {
        if !self.phase.is_finished() {
            self.finish(false);
        }
    }

    /// Once-per-second poll; freezes the time display at the timeout
    pub fn tick(&mut self) {
        if !self.phase.is_finished() && self.timer.tick() {
            info!("Kanji reading drill time limit reached");
        }
    }

    pub fn phase(&self) -> KanjiPhase {
        self.phase
    }

    pub fn current_item(&self) -> Option<&ReadingItem> {
        self.item.as_ref()
    }

    /// Wrong readings tried on the current item, in order
    pub fn attempts(&self) -> &[String] {
        &self.attempts
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn mistake_total(&self) -> u32 {
        self.mistake_total
    }

    /// Items answered correctly or revealed so far
    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn deck(&self) -> &D {
        &self.deck
    }

    pub fn time_display(&self) -> TimeDisplay {
        self.timer.display()
    }

    /// Statistics of a finished drill
    pub fn summary(&self) -> Option<SessionSummary> {
        let KanjiPhase::Finished { completed } = self.phase else {
            return None;
        };
        Some(SessionSummary::new(
            SessionKind::KanjiReading,
            self.started_at,
            self.timer.display(),
            self.timer.elapsed().as_secs(),
            self.answered,
            self.mistake_total,
            completed,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{ManualClock, DEFAULT_TIMEOUT};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    /// Deck of fixed readings that records outcomes
    #[derive(Debug, Default)]
    struct ScriptedDeck {
        readings: Vec<(char, &'static str)>,
        next: usize,
        current: Option<usize>,
        recorded: Vec<bool>,
    }

    impl ScriptedDeck {
        fn new(readings: &[(char, &'static str)]) -> Self {
            Self {
                readings: readings.to_vec(),
                ..Default::default()
            }
        }
    }

    impl ReadingDeck for ScriptedDeck {
        fn next_item(&mut self) -> Option<ReadingItem> {
            let (kanji, reading) = *self.readings.get(self.next)?;
            self.current = Some(self.next);
            self.next += 1;
            Some(ReadingItem {
                kanji_index: self.next - 1,
                reading_slot: 0,
                kanji,
                reading: reading.to_string(),
                words: Vec::new(),
            })
        }

        fn record_answer(&mut self, correct: bool) {
            self.current = None;
            self.recorded.push(correct);
        }

        fn queue_non_empty(&self) -> bool {
            self.next < self.readings.len()
        }

        fn correct_answer_text(&self) -> String {
            self.current
                .map(|i| self.readings[i].1.to_string())
                .unwrap_or_default()
        }

        fn reading_matches(&self, answer: &str) -> bool {
            self.current.map(|i| self.readings[i].1) == Some(answer)
        }
    }

    fn session(readings: &[(char, &'static str)]) -> (ManualClock, KanjiSession<ScriptedDeck>) {
        let clock = ManualClock::new();
        let timer = SessionTimer::new(Arc::new(clock.clone()), DEFAULT_TIMEOUT);
        let session = KanjiSession::new(
            ScriptedDeck::new(readings),
            DEFAULT_KANJI_RETRY_CAP,
            timer,
        );
        (clock, session)
    }

    fn judged(feedback: KanjiFeedback) -> Judgement {
        match feedback {
            KanjiFeedback::Judged(j) => j,
            KanjiFeedback::Ignored => panic!("submission was ignored"),
        }
    }

    #[test]
    fn test_empty_deck() {
        let (_clock, mut session) = session(&[]);
        assert!(matches!(session.start(), Err(DrillError::EmptyPool)));
        assert_eq!(session.phase(), KanjiPhase::Idle);
    }

    #[test]
    fn test_correct_answer_then_next() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();
        assert_eq!(session.current_item().unwrap().kanji, '水');

        let j = judged(session.submit(" みず "));
        assert_eq!(j.verdict, Verdict::Correct);
        assert_eq!(j.answer.as_deref(), Some("みず"));
        assert!(j.has_next);
        assert_eq!(session.submit("みず"), KanjiFeedback::Ignored);

        assert_eq!(session.advance_explicitly(), KanjiStep::NextItem);
        assert_eq!(session.current_item().unwrap().kanji, '火');
        assert_eq!(session.phase(), KanjiPhase::AwaitingInput);
        assert_eq!(session.deck().recorded, vec![true]);
    }

    #[test]
    fn test_last_item_offers_finish() {
        let (_clock, mut session) = session(&[('水', "みず")]);
        session.start().unwrap();

        let j = judged(session.submit("みず"));
        assert!(!j.has_next);
        assert_eq!(session.advance_explicitly(), KanjiStep::Finished);
        assert_eq!(session.phase(), KanjiPhase::Finished { completed: true });

        let summary = session.summary().unwrap();
        assert_eq!(summary.answered, 1);
        assert_eq!(summary.mistakes, 0);
        assert!(summary.completed);
    }

    #[test]
    fn test_incorrect_then_retry_same_item() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();

        let j = judged(session.submit("すい"));
        assert_eq!(j.verdict, Verdict::Incorrect);
        assert_eq!(j.answer, None);
        assert_eq!(session.retry_count(), 1);

        assert_eq!(session.advance_explicitly(), KanjiStep::Retry);
        assert_eq!(session.phase(), KanjiPhase::AwaitingInput);
        assert_eq!(session.current_item().unwrap().kanji, '水');

        judged(session.submit("みづ"));
        assert_eq!(session.attempts(), &["すい".to_string(), "みづ".to_string()]);
        session.advance_explicitly();

        let j = judged(session.submit("みず"));
        assert_eq!(j.verdict, Verdict::Correct);
        assert_eq!(session.mistake_total(), 0);
        assert_eq!(session.advance_explicitly(), KanjiStep::NextItem);
        assert_eq!(session.retry_count(), 0);
        assert!(session.attempts().is_empty());
    }

    #[test]
    fn test_empty_submission_reveals_without_mistake() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();

        let j = judged(session.submit("   "));
        assert_eq!(j.verdict, Verdict::Revealed);
        assert_eq!(j.answer.as_deref(), Some("みず"));
        assert_eq!(session.retry_count(), 0);
        assert_eq!(session.mistake_total(), 0);

        assert_eq!(session.advance_explicitly(), KanjiStep::NextItem);
        assert_eq!(session.deck().recorded, vec![false]);
    }

    #[test]
    fn test_retry_cap_reveals() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();

        for _ in 0..DEFAULT_KANJI_RETRY_CAP - 1 {
            assert_eq!(judged(session.submit("すい")).verdict, Verdict::Incorrect);
            assert_eq!(session.advance_explicitly(), KanjiStep::Retry);
        }

        let j = judged(session.submit("すい"));
        assert_eq!(j.verdict, Verdict::RevealedAfterCap);
        assert_eq!(j.answer.as_deref(), Some("みず"));
        assert_eq!(session.mistake_total(), 1);

        assert_eq!(session.advance_explicitly(), KanjiStep::NextItem);
        assert_eq!(session.current_item().unwrap().kanji, '火');
        assert_eq!(session.deck().recorded, vec![false]);
    }

    #[test]
    fn test_retry_count_resets_when_last_item_finishes() {
        let (_clock, mut session) = session(&[('水', "みず")]);
        session.start().unwrap();

        for _ in 0..DEFAULT_KANJI_RETRY_CAP - 1 {
            judged(session.submit("すい"));
            assert_eq!(session.advance_explicitly(), KanjiStep::Retry);
        }
        assert_eq!(
            judged(session.submit("すい")).verdict,
            Verdict::RevealedAfterCap
        );
        assert_eq!(session.retry_count(), DEFAULT_KANJI_RETRY_CAP);

        assert_eq!(session.advance_explicitly(), KanjiStep::Finished);
        assert_eq!(session.phase(), KanjiPhase::Finished { completed: true });
        assert_eq!(session.retry_count(), 0);
        assert!(session.attempts().is_empty());
        assert_eq!(session.mistake_total(), 1);
    }

    #[test]
    fn test_correct_just_below_cap_counts_no_mistake() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();

        for _ in 0..DEFAULT_KANJI_RETRY_CAP - 1 {
            assert_eq!(judged(session.submit("すい")).verdict, Verdict::Incorrect);
            assert_eq!(session.advance_explicitly(), KanjiStep::Retry);
        }
        assert_eq!(session.retry_count(), DEFAULT_KANJI_RETRY_CAP - 1);

        let j = judged(session.submit("みず"));
        assert_eq!(j.verdict, Verdict::Correct);
        assert_eq!(session.mistake_total(), 0);

        assert_eq!(session.advance_explicitly(), KanjiStep::NextItem);
        assert_eq!(session.current_item().unwrap().kanji, '火');
        assert_eq!(session.retry_count(), 0);
        assert_eq!(session.deck().recorded, vec![true]);
    }

    #[test]
    fn test_next_ignored_while_awaiting_input() {
        let (_clock, mut session) = session(&[('水', "みず")]);
        session.start().unwrap();
        assert_eq!(session.advance_explicitly(), KanjiStep::Ignored);
    }

    #[test]
    fn test_abort() {
        let (_clock, mut session) = session(&[('水', "みず"), ('火', "ひ")]);
        session.start().unwrap();
        session.abort();

        assert_eq!(session.phase(), KanjiPhase::Finished { completed: false });
        assert_eq!(session.submit("みず"), KanjiFeedback::Ignored);
        assert!(!session.summary().unwrap().completed);
        assert!(session.deck().recorded.is_empty());
    }

    #[test]
    fn test_timeout_freezes_display_only() {
        let (clock, mut session) = session(&[('水', "みず")]);
        session.start().unwrap();
        clock.advance(Duration::from_secs(3700));
        session.tick();

        assert_eq!(session.time_display(), TimeDisplay::Hidden);
        assert_eq!(session.phase(), KanjiPhase::AwaitingInput);
        assert_eq!(judged(session.submit("みず")).verdict, Verdict::Correct);
    }

    #[test]
    fn test_with_memory_deck() {
        use crate::deck::{DeckFile, MemoryDeck};

        let file = DeckFile::from_toml_str(
            r#"
            [[kanji]]
            character = "食"
            readings = ["ショク", "た.べる"]

            [[words]]
            segments = [{ text = "和", reading = "わ" }, { text = "食", reading = "しょく" }]

            [[drills]]
            kanji = "食"
            reading = 0
            "#,
        )
        .unwrap();
        let deck = MemoryDeck::new(file).unwrap();
        let mut session = KanjiSession::from_config(
            deck,
            &Config::default(),
            Arc::new(ManualClock::new()),
        );
        session.start().unwrap();

        let item = session.current_item().unwrap();
        assert_eq!(item.words[0].highlights, vec![1]);

        let j = judged(session.submit("しょく"));
        assert_eq!(j.verdict, Verdict::Correct);
        assert_eq!(j.answer.as_deref(), Some("ショク"));
        assert_eq!(session.advance_explicitly(), KanjiStep::Finished);
        assert!(session.deck().answered()[0].correct);
    }
}
