//! Splitting free text into lowercase word tokens.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of Unicode word characters: letters (accented ones included), digits, marks, underscore.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Lowercase word tokens of `text`, in order.
/// Non-word characters (spaces, apostrophes, guillemets, punctuation) delimit tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Does `s` consist of exactly one token?
pub fn is_single_token(s: &str) -> bool {
    WORD.find(s).is_some_and(|m| m.start() == 0 && m.end() == s.len())
}
