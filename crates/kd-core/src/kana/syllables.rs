//! The drillable syllable table

/// A kana syllable identified by its romaji spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    /// Canonical romaji spelling
    pub romaji: &'static str,
    /// Hiragana spelling
    pub hiragana: &'static str,
}

const fn s(romaji: &'static str, hiragana: &'static str) -> Syllable {
    Syllable { romaji, hiragana }
}

/// All drillable syllables. The order is part of the item encoding.
#[rustfmt::skip]
pub const SYLLABLES: &[Syllable] = &[
    s("a", "あ"), s("i", "い"), s("u", "う"), s("e", "え"), s("o", "お"),
    s("ka", "か"), s("ki", "き"), s("ku", "く"), s("ke", "け"), s("ko", "こ"),
    s("sa", "さ"), s("shi", "し"), s("su", "す"), s("se", "せ"), s("so", "そ"),
    s("ta", "た"), s("chi", "ち"), s("tsu", "つ"), s("te", "て"), s("to", "と"),
    s("na", "な"), s("ni", "に"), s("nu", "ぬ"), s("ne", "ね"), s("no", "の"),
    s("ha", "は"), s("hi", "ひ"), s("fu", "ふ"), s("he", "へ"), s("ho", "ほ"),
    s("ma", "ま"), s("mi", "み"), s("mu", "む"), s("me", "め"), s("mo", "も"),
    s("ya", "や"), s("yu", "ゆ"), s("yo", "よ"),
    s("ra", "ら"), s("ri", "り"), s("ru", "る"), s("re", "れ"), s("ro", "ろ"),
    s("wa", "わ"), s("wo", "を"), s("n", "ん"),
    s("ga", "が"), s("gi", "ぎ"), s("gu", "ぐ"), s("ge", "げ"), s("go", "ご"),
    s("za", "ざ"), s("ji", "じ"), s("zu", "ず"), s("ze", "ぜ"), s("zo", "ぞ"),
    s("da", "だ"), s("dji", "ぢ"), s("dzu", "づ"), s("de", "で"), s("do", "ど"),
    s("ba", "ば"), s("bi", "び"), s("bu", "ぶ"), s("be", "べ"), s("bo", "ぼ"),
    s("pa", "ぱ"), s("pi", "ぴ"), s("pu", "ぷ"), s("pe", "ぺ"), s("po", "ぽ"),
    s("kya", "きゃ"), s("kyu", "きゅ"), s("kyo", "きょ"),
    s("sha", "しゃ"), s("shu", "しゅ"), s("sho", "しょ"),
    s("cha", "ちゃ"), s("chu", "ちゅ"), s("cho", "ちょ"),
    s("nya", "にゃ"), s("nyu", "にゅ"), s("nyo", "にょ"),
    s("hya", "ひゃ"), s("hyu", "ひゅ"), s("hyo", "ひょ"),
    s("mya", "みゃ"), s("myu", "みゅ"), s("myo", "みょ"),
    s("rya", "りゃ"), s("ryu", "りゅ"), s("ryo", "りょ"),
    s("gya", "ぎゃ"), s("gyu", "ぎゅ"), s("gyo", "ぎょ"),
    s("ja", "じゃ"), s("ju", "じゅ"), s("jo", "じょ"),
    s("bya", "びゃ"), s("byu", "びゅ"), s("byo", "びょ"),
    s("pya", "ぴゃ"), s("pyu", "ぴゅ"), s("pyo", "ぴょ"),
];

/// Number of distinct drillable syllables
pub const SYLLABLE_COUNT: usize = SYLLABLES.len();

/// Find a syllable by its romaji spelling
pub fn syllable_index(romaji: &str) -> Option<usize> {
    SYLLABLES.iter().position(|s| s.romaji == romaji)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_size() {
        assert_eq!(SYLLABLE_COUNT, 104);
    }

    #[test]
    fn test_spellings_are_unique() {
        let romaji: HashSet<_> = SYLLABLES.iter().map(|s| s.romaji).collect();
        let kana: HashSet<_> = SYLLABLES.iter().map(|s| s.hiragana).collect();
        assert_eq!(romaji.len(), SYLLABLE_COUNT);
        assert_eq!(kana.len(), SYLLABLE_COUNT);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(syllable_index("a"), Some(0));
        assert_eq!(syllable_index("n"), Some(45));
        assert_eq!(syllable_index("pyo"), Some(SYLLABLE_COUNT - 1));
        assert_eq!(syllable_index("si"), None);
    }
}
