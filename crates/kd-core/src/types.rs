//! Core type definitions for kanadrill

use crate::kana::{self, Syllable, SYLLABLE_COUNT};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Writing script of a kana drill item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Hiragana,
    Katakana,
}

impl Script {
    /// Both scripts, hiragana first
    pub const ALL: [Script; 2] = [Script::Hiragana, Script::Katakana];

    /// Human-readable name shown above the prompt
    pub fn label(&self) -> &'static str {
        match self {
            Script::Hiragana => "Hiragana",
            Script::Katakana => "Katakana",
        }
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One kana drill item.
///
/// Encoded as a single code in `[0, 2 * SYLLABLE_COUNT)`: codes below
/// `SYLLABLE_COUNT` are hiragana syllables, the rest are katakana syllables
/// offset by `SYLLABLE_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KanaItem(u16);

impl KanaItem {
    /// Create an item from a script and syllable index
    pub fn new(script: Script, syllable: usize) -> Option<Self> {
        if syllable >= SYLLABLE_COUNT {
            return None;
        }
        let code = match script {
            Script::Hiragana => syllable,
            Script::Katakana => syllable + SYLLABLE_COUNT,
        };
        Some(KanaItem(code as u16))
    }

    /// Create an item from its raw code
    pub fn from_code(code: usize) -> Option<Self> {
        if code < SYLLABLE_COUNT * 2 {
            Some(KanaItem(code as u16))
        } else {
            None
        }
    }

    /// Raw code of the item
    pub fn code(&self) -> usize {
        self.0 as usize
    }

    /// Script the answer must be written in
    pub fn script(&self) -> Script {
        if self.code() < SYLLABLE_COUNT {
            Script::Hiragana
        } else {
            Script::Katakana
        }
    }

    /// Index into the syllable table
    pub fn syllable_index(&self) -> usize {
        self.code() % SYLLABLE_COUNT
    }

    /// Syllable table entry for this item
    pub fn syllable(&self) -> &'static Syllable {
        &kana::SYLLABLES[self.syllable_index()]
    }

    /// The question shown to the learner
    pub fn prompt(&self) -> Prompt {
        let romaji = self.syllable().romaji;
        let text = match self.script() {
            Script::Hiragana => romaji.to_string(),
            Script::Katakana => romaji.to_uppercase(),
        };
        Prompt {
            heading: self.script().label().to_string(),
            text,
        }
    }

    /// The kana the learner is expected to enter, in this item's script
    pub fn expected_answer(&self) -> String {
        kana::to_script(self.syllable().romaji, self.script())
    }
}

impl fmt::Display for KanaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.script().label(), self.syllable().romaji)
    }
}

/// Question text exposed to presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    /// Small heading above the question, e.g. the script name
    pub heading: String,
    /// The question itself
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_encoding() {
        let ka = kana::syllable_index("ka").unwrap();

        let hira = KanaItem::new(Script::Hiragana, ka).unwrap();
        assert_eq!(hira.code(), ka);
        assert_eq!(hira.script(), Script::Hiragana);

        let kata = KanaItem::new(Script::Katakana, ka).unwrap();
        assert_eq!(kata.code(), ka + SYLLABLE_COUNT);
        assert_eq!(kata.script(), Script::Katakana);
        assert_eq!(kata.syllable_index(), ka);
    }

    #[test]
    fn test_first_katakana_code() {
        // The first katakana code must not be mistaken for hiragana.
        let item = KanaItem::from_code(SYLLABLE_COUNT).unwrap();
        assert_eq!(item.script(), Script::Katakana);
        assert_eq!(item.syllable_index(), 0);
        assert_eq!(item.expected_answer(), "ア");
    }

    #[test]
    fn test_out_of_range() {
        assert!(KanaItem::new(Script::Hiragana, SYLLABLE_COUNT).is_none());
        assert!(KanaItem::from_code(SYLLABLE_COUNT * 2).is_none());
    }

    #[test]
    fn test_prompt() {
        let shi = kana::syllable_index("shi").unwrap();

        let prompt = KanaItem::new(Script::Hiragana, shi).unwrap().prompt();
        assert_eq!(prompt.heading, "Hiragana");
        assert_eq!(prompt.text, "shi");

        let prompt = KanaItem::new(Script::Katakana, shi).unwrap().prompt();
        assert_eq!(prompt.heading, "Katakana");
        assert_eq!(prompt.text, "SHI");
    }

    #[test]
    fn test_expected_answer() {
        let kyo = kana::syllable_index("kyo").unwrap();
        assert_eq!(
            KanaItem::new(Script::Hiragana, kyo).unwrap().expected_answer(),
            "きょ"
        );
        assert_eq!(
            KanaItem::new(Script::Katakana, kyo).unwrap().expected_answer(),
            "キョ"
        );
    }
}
