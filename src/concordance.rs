//! Keyword in context.
//!
//! Widths are measured in characters. A line of width `w` shows the match
//! with at most `(w - len(query) - 2) / 2` characters on each side, taken
//! from at most `w / 4` neighbouring tokens joined by single spaces.

use crate::errors::Result;
use crate::input::IRecord;
use crate::questions::QuestionSelector;
use crate::store::Dataset;
use crate::tokenizer;
use log::{debug, warn};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Default line width.
pub const DEFAULT_WIDTH: usize = 70;

/// Default number of lines.
pub const DEFAULT_LINES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConcordanceHit {
    /// Index of the match in the token stream.
    pub position: usize,
    pub left: String,
    pub term: String,
    pub right: String,
}

impl ConcordanceHit {
    /// Context and match joined by single spaces.
    pub fn line(&self) -> String {
        [self.left.as_str(), self.term.as_str(), self.right.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Like [ConcordanceHit::line], with the left context right-aligned so that matches line up.
    pub fn aligned(&self, half_width: usize) -> String {
        format!("{:>half_width$} {} {}", self.left, self.term, self.right)
            .trim_end()
            .to_owned()
    }

    /// [ConcordanceHit::line] with the matched term marked.
    ///
    /// Only the hit itself is marked. The context may end in a cut word,
    /// so it is never searched for further matches.
    pub fn highlighted(&self, marker: &Marker) -> String {
        [self.left.as_str(), &marker.wrap(&self.term), self.right.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// [ConcordanceHit::aligned] with the matched term marked.
    pub fn aligned_highlighted(&self, half_width: usize, marker: &Marker) -> String {
        format!(
            "{:>half_width$} {} {}",
            self.left,
            marker.wrap(&self.term),
            self.right
        )
        .trim_end()
        .to_owned()
    }
}

/// Strings placed around highlighted words.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub open: String,
    pub close: String,
}

impl Marker {
    pub fn wrap(&self, word: &str) -> String {
        format!("{}{word}{}", self.open, self.close)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Marker {
            open: "**".to_owned(),
            close: "**".to_owned(),
        }
    }
}

/// Characters of context on each side of a match.
pub fn half_width(width: usize, query: &str) -> usize {
    width.saturating_sub(query.chars().count() + 2) / 2
}

fn tail_chars(s: &str, n: usize) -> &str {
    let count = s.chars().count();
    if count <= n {
        return s;
    }
    match s.char_indices().nth(count - n) {
        Some((i, _)) => &s[i..],
        None => s,
    }
}

fn head_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Up to `max_hits` matches of `query` in `tokens`, in order.
///
/// A token matches if it equals the lowercased query exactly.
pub fn concordance(
    tokens: &[String],
    query: &str,
    width: usize,
    max_hits: usize,
) -> Vec<ConcordanceHit> {
    let query = query.trim().to_lowercase();
    let half = half_width(width, &query);
    let context = width / 4;
    tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| **t == query)
        .take(max_hits)
        .map(|(i, t)| {
            let left = tokens[i.saturating_sub(context)..i].join(" ");
            let right = tokens[i + 1..(i + 1 + context).min(tokens.len())].join(" ");
            ConcordanceHit {
                position: i,
                left: tail_chars(&left, half).trim_start().to_owned(),
                term: t.clone(),
                right: head_chars(&right, half).trim_end().to_owned(),
            }
        })
        .collect()
}

/// Wrap whole-word, case-insensitive occurrences of `word` in `text` with `marker`.
/// Occurrences inside longer words are left alone.
pub fn highlight(text: &str, word: &str, marker: &Marker) -> Result<String> {
    if word.is_empty() {
        return Ok(text.to_owned());
    }
    let rx = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word)))?;
    let out = rx.replace_all(text, |caps: &Captures| marker.wrap(&caps[0]));
    Ok(out.into_owned())
}

/// Token stream of the free-text answers to `question`, record by record.
pub fn token_stream(
    dataset: &Dataset,
    records: &[&IRecord],
    question: &QuestionSelector,
) -> Result<Vec<String>> {
    let keys = dataset.question_keys(question)?;
    let mut tokens = vec![];
    for r in records {
        for key in &keys {
            if let Some(text) = r.answers.get(*key) {
                tokens.extend(tokenizer::tokenize(text));
            }
        }
    }
    Ok(tokens)
}

/// Concordance lines for `query` in the answers of `records`.
pub fn find_concordances(
    dataset: &Dataset,
    records: &[&IRecord],
    question: &QuestionSelector,
    query: &str,
    width: usize,
    max_hits: usize,
) -> Result<Vec<ConcordanceHit>> {
    if !tokenizer::is_single_token(&query.trim().to_lowercase()) {
        warn!(target: "survey", "'{query}' is not a single word, it cannot match any token");
    }
    let tokens = token_stream(dataset, records, question)?;
    let hits = concordance(&tokens, query, width, max_hits);
    debug!(
        target: "survey",
        "'{query}' in {question}: {} tokens, {} hits",
        tokens.len(),
        hits.len()
    );
    Ok(hits)
}
