//! Answer matching
//!
//! Answers are compared unit by unit (one `char` per kana), exactly and
//! script-sensitively.

use serde::{Deserialize, Serialize};

/// Classification of a submitted prefix against the expected answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Match {
    /// The entry is a strict prefix of the answer; more input is expected
    Extending,
    /// The entry diverges from the answer
    WrongPrefix,
    /// The entry equals the answer
    Complete,
}

/// Classify `entered` against `expected`
pub fn classify(expected: &[char], entered: &[char]) -> Match {
    if entered == expected {
        Match::Complete
    } else if expected.starts_with(entered) {
        Match::Extending
    } else {
        Match::WrongPrefix
    }
}

/// String convenience wrapper around [`classify`]
pub fn classify_str(expected: &str, entered: &str) -> Match {
    let expected: Vec<char> = expected.chars().collect();
    let entered: Vec<char> = entered.chars().collect();
    classify(&expected, &entered)
}

/// Whole-answer comparison with no partial credit
pub fn matches_exact(expected: &str, submitted: &str) -> bool {
    classify_str(expected, submitted) == Match::Complete
}
