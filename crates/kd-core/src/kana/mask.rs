//! Per-script enable masks for kana drills

use super::syllables::{syllable_index, SYLLABLES, SYLLABLE_COUNT};
use crate::error::{DrillError, Result};
use crate::types::{KanaItem, Script};

/// Which syllables of each script may be drilled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KanaMask {
    hiragana: Vec<bool>,
    katakana: Vec<bool>,
}

impl KanaMask {
    /// A mask with nothing enabled
    pub fn none() -> Self {
        Self {
            hiragana: vec![false; SYLLABLE_COUNT],
            katakana: vec![false; SYLLABLE_COUNT],
        }
    }

    /// A mask with every syllable of both scripts enabled
    pub fn all() -> Self {
        Self {
            hiragana: vec![true; SYLLABLE_COUNT],
            katakana: vec![true; SYLLABLE_COUNT],
        }
    }

    /// Build a mask from romaji spellings per script
    pub fn from_romaji<S: AsRef<str>>(hiragana: &[S], katakana: &[S]) -> Result<Self> {
        let mut mask = Self::none();
        for (script, list) in [(Script::Hiragana, hiragana), (Script::Katakana, katakana)] {
            for romaji in list {
                let romaji = romaji.as_ref();
                let index = syllable_index(romaji).ok_or_else(|| {
                    DrillError::Config(format!("Unknown {} syllable: {}", script.label(), romaji))
                })?;
                mask.set(script, index, true);
            }
        }
        Ok(mask)
    }

    fn bits(&self, script: Script) -> &[bool] {
        match script {
            Script::Hiragana => &self.hiragana,
            Script::Katakana => &self.katakana,
        }
    }

    /// Enable or disable one syllable. Out-of-range indexes are ignored.
    pub fn set(&mut self, script: Script, syllable: usize, enabled: bool) {
        let bits = match script {
            Script::Hiragana => &mut self.hiragana,
            Script::Katakana => &mut self.katakana,
        };
        if let Some(bit) = bits.get_mut(syllable) {
            *bit = enabled;
        }
    }

    /// Enable or disable a whole script
    pub fn set_script(&mut self, script: Script, enabled: bool) {
        for syllable in 0..SYLLABLE_COUNT {
            self.set(script, syllable, enabled);
        }
    }

    pub fn is_enabled(&self, script: Script, syllable: usize) -> bool {
        self.bits(script).get(syllable).copied().unwrap_or(false)
    }

    /// Number of enabled items over both scripts
    pub fn enabled_count(&self) -> usize {
        self.hiragana.iter().chain(&self.katakana).filter(|b| **b).count()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }

    /// All enabled items, hiragana first, in table order
    pub fn items(&self) -> Vec<KanaItem> {
        Script::ALL
            .iter()
            .flat_map(|&script| {
                (0..SYLLABLE_COUNT)
                    .filter(move |&i| self.is_enabled(script, i))
                    .filter_map(move |i| KanaItem::new(script, i))
            })
            .collect()
    }

    /// Enabled romaji spellings of one script
    pub fn romaji(&self, script: Script) -> Vec<String> {
        SYLLABLES
            .iter()
            .zip(self.bits(script))
            .filter(|(_, enabled)| **enabled)
            .map(|(s, _)| s.romaji.to_string())
            .collect()
    }
}

impl Default for KanaMask {
    fn default() -> Self {
        Self::all()
    }
}
