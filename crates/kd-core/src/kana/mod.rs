//! Kana tables and phonetic conversion
//!
//! The syllable table defines the set of drillable kana syllables by their
//! canonical romaji spelling. Conversion turns romaji into hiragana and
//! shifts hiragana into katakana.

mod convert;
mod mask;
mod syllables;

pub use convert::{to_hiragana, to_hiragana_from_katakana, to_katakana, to_script};
pub use mask::KanaMask;
pub use syllables::{syllable_index, Syllable, SYLLABLES, SYLLABLE_COUNT};
