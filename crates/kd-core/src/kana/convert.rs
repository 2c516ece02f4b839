//! Romaji to kana conversion

use super::syllables::SYLLABLES;
use crate::types::Script;

/// Spellings accepted on top of the syllable table
#[rustfmt::skip]
const ALTERNATES: &[(&str, &str)] = &[
    ("si", "し"), ("ti", "ち"), ("tu", "つ"), ("hu", "ふ"), ("zi", "じ"),
    ("di", "ぢ"), ("du", "づ"), ("jya", "じゃ"), ("jyu", "じゅ"), ("jyo", "じょ"),
    ("sya", "しゃ"), ("syu", "しゅ"), ("syo", "しょ"),
    ("tya", "ちゃ"), ("tyu", "ちゅ"), ("tyo", "ちょ"),
    ("xa", "ぁ"), ("xi", "ぃ"), ("xu", "ぅ"), ("xe", "ぇ"), ("xo", "ぉ"),
    ("xya", "ゃ"), ("xyu", "ゅ"), ("xyo", "ょ"), ("xtu", "っ"), ("xtsu", "っ"),
    ("-", "ー"),
];

const LONGEST_SPELLING: usize = 4;

const KANA_OFFSET: u32 = 'ァ' as u32 - 'ぁ' as u32;

fn lookup(romaji: &str) -> Option<&'static str> {
    SYLLABLES
        .iter()
        .filter(|s| s.romaji != "n")
        .map(|s| (s.romaji, s.hiragana))
        .chain(ALTERNATES.iter().copied())
        .find(|(r, _)| *r == romaji)
        .map(|(_, kana)| kana)
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Convert a romaji string to hiragana.
///
/// Conversion is greedy, longest spelling first. A doubled consonant becomes
/// a small `っ`, and `n` not followed by a vowel or `y` becomes `ん` (`n'`
/// forces it). Characters that do not convert are kept as they are.
pub fn to_hiragana(romaji: &str) -> String {
    let chars: Vec<char> = romaji.to_lowercase().chars().collect();
    let mut out = String::with_capacity(chars.len() * 3);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        if c == 'n' {
            match next {
                Some('\'') => {
                    out.push('ん');
                    i += 2;
                    continue;
                }
                Some(n) if is_vowel(n) || n == 'y' => {}
                _ => {
                    out.push('ん');
                    i += 1;
                    continue;
                }
            }
        }

        let doubled = next == Some(c) || (c == 't' && next == Some('c'));
        if doubled && c.is_ascii_alphabetic() && !is_vowel(c) {
            out.push('っ');
            i += 1;
            continue;
        }

        let mut matched = false;
        for len in (1..=LONGEST_SPELLING.min(chars.len() - i)).rev() {
            let candidate: String = chars[i..i + len].iter().collect();
            if let Some(kana) = lookup(&candidate) {
                out.push_str(kana);
                i += len;
                matched = true;
                break;
            }
        }

        if !matched {
            out.push(c);
            i += 1;
        }
    }

    out
}

/// Shift hiragana characters into the katakana block
pub fn to_katakana(hiragana: &str) -> String {
    hiragana
        .chars()
        .map(|c| match c {
            'ぁ'..='ゖ' | 'ゝ' | 'ゞ' => char::from_u32(c as u32 + KANA_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Shift katakana characters into the hiragana block
pub fn to_hiragana_from_katakana(katakana: &str) -> String {
    katakana
        .chars()
        .map(|c| match c {
            'ァ'..='ヶ' | 'ヽ' | 'ヾ' => char::from_u32(c as u32 - KANA_OFFSET).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// Convert a romaji string to kana in the given script
pub fn to_script(romaji: &str, script: Script) -> String {
    let hiragana = to_hiragana(romaji);
    match script {
        Script::Hiragana => hiragana,
        Script::Katakana => to_katakana(&hiragana),
    }
}
