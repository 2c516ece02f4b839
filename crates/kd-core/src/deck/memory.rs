//! In-memory reading deck loaded from a TOML deck file

use super::{full_reading, realized_reading, ExampleWord, FuriganaSegment, ReadingDeck, ReadingItem};
use crate::error::{DrillError, Result};
use crate::kana::to_hiragana_from_katakana;
use crate::matcher::matches_exact;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use tracing::debug;

/// A kanji with its registered readings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub character: char,
    pub readings: Vec<String>,
}

/// A dictionary word available as an example
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub segments: Vec<FuriganaSegment>,
}

/// One queued drill: a kanji and the index of one of its readings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillEntry {
    pub kanji: char,
    pub reading: usize,
}

/// On-disk deck format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckFile {
    pub kanji: Vec<KanjiEntry>,
    pub words: Vec<WordEntry>,
    pub drills: Vec<DrillEntry>,
}

impl DeckFile {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(DrillError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| e.with_context(format!("Failed to parse deck {}", path.display())))
    }
}

/// Outcome recorded for one drilled reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnsweredReading {
    pub kanji_index: usize,
    pub reading_slot: usize,
    pub correct: bool,
}

/// Deck that serves its drills in file order and keeps outcomes in memory
#[derive(Debug, Clone)]
pub struct MemoryDeck {
    kanji: Vec<KanjiEntry>,
    words: Vec<WordEntry>,
    queue: VecDeque<(usize, usize)>,
    current: Option<(usize, usize)>,
    answered: Vec<AnsweredReading>,
}

impl MemoryDeck {
    /// Build a deck, checking that every drill names a known kanji reading
    pub fn new(file: DeckFile) -> Result<Self> {
        let mut queue = VecDeque::with_capacity(file.drills.len());

        for drill in &file.drills {
            let kanji_index = file
                .kanji
                .iter()
                .position(|k| k.character == drill.kanji)
                .ok_or_else(|| DrillError::Deck(format!("Unknown kanji in drill: {}", drill.kanji)))?;

            if drill.reading >= file.kanji[kanji_index].readings.len() {
                return Err(DrillError::Deck(format!(
                    "Kanji {} has no reading #{}",
                    drill.kanji, drill.reading
                )));
            }
            queue.push_back((kanji_index, drill.reading));
        }

        debug!("Built deck with {} drills", queue.len());
        Ok(Self {
            kanji: file.kanji,
            words: file.words,
            queue,
            current: None,
            answered: Vec::new(),
        })
    }

    /// Load and build a deck from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        Self::new(DeckFile::load(path)?)
    }

    /// Outcomes recorded so far, in answer order
    pub fn answered(&self) -> &[AnsweredReading] {
        &self.answered
    }

    /// Drills not drawn yet
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn current_reading(&self) -> Option<&str> {
        let (kanji_index, slot) = self.current?;
        self.kanji[kanji_index].readings.get(slot).map(String::as_str)
    }

    fn example_words(&self, kanji: char, reading: &str) -> Vec<ExampleWord> {
        self.words
            .iter()
            .map(|w| ExampleWord::for_reading(w.segments.clone(), kanji, reading))
            .filter(|w| !w.highlights.is_empty())
            .collect()
    }
}

impl ReadingDeck for MemoryDeck {
    fn next_item(&mut self) -> Option<ReadingItem> {
        let (kanji_index, reading_slot) = self.queue.pop_front()?;
        self.current = Some((kanji_index, reading_slot));

        let entry = &self.kanji[kanji_index];
        let reading = entry.readings[reading_slot].clone();
        Some(ReadingItem {
            kanji_index,
            reading_slot,
            kanji: entry.character,
            words: self.example_words(entry.character, &reading),
            reading,
        })
    }

    fn record_answer(&mut self, correct: bool) {
        if let Some((kanji_index, reading_slot)) = self.current.take() {
            self.answered.push(AnsweredReading {
                kanji_index,
                reading_slot,
                correct,
            });
        }
    }

    fn queue_non_empty(&self) -> bool {
        !self.queue.is_empty()
    }

    fn correct_answer_text(&self) -> String {
        self.current_reading().unwrap_or_default().to_string()
    }

    /// Accepts the whole reading or the part the kanji itself stands for,
    /// in either kana script.
    fn reading_matches(&self, answer: &str) -> bool {
        let Some(reading) = self.current_reading() else {
            return false;
        };
        let answer = to_hiragana_from_katakana(answer.trim());
        if answer.is_empty() {
            return false;
        }
        matches_exact(&full_reading(reading), &answer)
            || matches_exact(&realized_reading(reading), &answer)
    }
}
