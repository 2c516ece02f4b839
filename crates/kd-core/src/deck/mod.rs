//! Reading deck collaborator
//!
//! The kanji reading session does not choose what to ask. A deck hands out
//! one `(kanji, reading)` item at a time, judges answers and records the
//! outcome, so a spaced-repetition backend can decide ordering.

mod memory;

pub use memory::{AnsweredReading, DeckFile, DrillEntry, KanjiEntry, MemoryDeck, WordEntry};

use crate::kana::to_hiragana_from_katakana;
use serde::{Deserialize, Serialize};

/// Source of kanji reading drill items
pub trait ReadingDeck {
    /// Draw the next item, making it the current one
    fn next_item(&mut self) -> Option<ReadingItem>;

    /// Record the outcome of the current item and release it
    fn record_answer(&mut self, correct: bool);

    /// Whether items remain that have not been drawn yet
    fn queue_non_empty(&self) -> bool;

    /// Answer text shown when the current item is revealed
    fn correct_answer_text(&self) -> String;

    /// Whether a submitted reading answers the current item. The deck
    /// defines its own equivalence; it may be looser than exact text
    /// comparison, e.g. ignoring the kana script or okurigana.
    fn reading_matches(&self, answer: &str) -> bool;
}

/// One kanji reading drill item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingItem {
    /// Index of the kanji in the deck's kanji list
    pub kanji_index: usize,
    /// Index of the drilled reading among the kanji's readings
    pub reading_slot: usize,
    /// The kanji character
    pub kanji: char,
    /// The drilled reading as registered
    pub reading: String,
    /// Example words using the kanji with this reading
    pub words: Vec<ExampleWord>,
}

/// Part of a written word with its phonetic reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuriganaSegment {
    /// Written text of the segment
    pub text: String,
    /// Kana reading of the segment
    pub reading: String,
}

impl FuriganaSegment {
    pub fn new(text: impl Into<String>, reading: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reading: reading.into(),
        }
    }
}

/// Example word shown under the drilled kanji
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleWord {
    /// The word split into furigana segments
    pub segments: Vec<FuriganaSegment>,
    /// Character positions in the written form where the drilled kanji is
    /// read with the drilled reading
    pub highlights: Vec<usize>,
}

impl ExampleWord {
    /// Build an example word, locating the positions of `kanji` read as
    /// `reading`
    pub fn for_reading(segments: Vec<FuriganaSegment>, kanji: char, reading: &str) -> Self {
        let realized = realized_reading(reading);
        let mut highlights = Vec::new();
        let mut pos = 0;

        for segment in &segments {
            let mut chars = segment.text.chars();
            if let (Some(ch), None) = (chars.next(), chars.next()) {
                let spoken = to_hiragana_from_katakana(&segment.reading);
                if ch == kanji && sounds_as(&realized, &spoken) {
                    highlights.push(pos);
                }
            }
            pos += segment.text.chars().count();
        }

        Self {
            segments,
            highlights,
        }
    }

    /// Written form of the word
    pub fn written(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }

    /// Kana form of the word
    pub fn kana(&self) -> String {
        self.segments.iter().map(|s| s.reading.as_str()).collect()
    }
}

/// The part of a registered reading that a kanji stands for inside a word,
/// in hiragana: okurigana after `.` and affix dashes are dropped.
pub fn realized_reading(reading: &str) -> String {
    let stem = reading.split('.').next().unwrap_or_default();
    to_hiragana_from_katakana(&stem.replace('-', ""))
}

/// Whether `actual` is the hiragana `realized` reading as pronounced inside
/// a compound. The first kana may be voiced (本棚 ほん・だな) and a final
/// く, き, ち or つ may turn into っ (学校 がっ・こう). Irregular readings
/// such as 日 in 三日月 are not recognized.
fn sounds_as(realized: &str, actual: &str) -> bool {
    if realized == actual {
        return true;
    }

    let expected: Vec<char> = realized.chars().collect();
    let actual: Vec<char> = actual.chars().collect();
    if expected.is_empty() || expected.len() != actual.len() {
        return false;
    }

    let last = expected.len() - 1;
    expected.iter().zip(&actual).enumerate().all(|(i, (&e, &a))| {
        e == a
            || (i == 0 && voiced_forms(e).contains(&a))
            || (i == last && last > 0 && a == 'っ' && matches!(e, 'く' | 'き' | 'ち' | 'つ'))
    })
}

/// Voiced and half-voiced variants of a hiragana character
fn voiced_forms(c: char) -> &'static [char] {
    match c {
        'か' => &['が'],
        'き' => &['ぎ'],
        'く' => &['ぐ'],
        'け' => &['げ'],
        'こ' => &['ご'],
        'さ' => &['ざ'],
        'し' => &['じ'],
        'す' => &['ず'],
        'せ' => &['ぜ'],
        'そ' => &['ぞ'],
        'た' => &['だ'],
        'ち' => &['ぢ'],
        'つ' => &['づ'],
        'て' => &['で'],
        'と' => &['ど'],
        'は' => &['ば', 'ぱ'],
        'ひ' => &['び', 'ぴ'],
        'ふ' => &['ぶ', 'ぷ'],
        'へ' => &['べ', 'ぺ'],
        'ほ' => &['ぼ', 'ぽ'],
        _ => &[],
    }
}

/// A registered reading with its markers removed, in hiragana
pub fn full_reading(reading: &str) -> String {
    to_hiragana_from_katakana(&reading.replace(&['.', '-'][..], ""))
}
