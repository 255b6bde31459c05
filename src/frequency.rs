//! Word frequency rankings.
//!
//! Raw mode counts lemmas (or tokens) in the filtered records.
//! Weighted mode sums the precomputed TF-IDF weights per lemma.
//! Ties are broken by first occurrence, so the output never depends on hash order.

use crate::errors::{invalid_argument, Result};
use crate::input::IRecord;
use crate::questions::QuestionSelector;
use crate::stopwords::Stopwords;
use crate::store::Dataset;
use crate::tokenizer;
use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Default table length in raw mode.
pub const RAW_TOP_N: usize = 50;

/// Default table length in weighted mode.
pub const WEIGHTED_TOP_N: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Occurrence counts in the filtered records.
    Raw,
    /// Sums of precomputed TF-IDF weights.
    Weighted,
}

impl Mode {
    pub fn default_top_n(&self) -> usize {
        match self {
            Mode::Raw => RAW_TOP_N,
            Mode::Weighted => WEIGHTED_TOP_N,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mode::Raw => write!(f, "raw counts"),
            Mode::Weighted => write!(f, "TF-IDF weights"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TermScore {
    pub term: String,
    pub score: f64,
}

/// A non-empty ranking, highest score first.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FrequencyTable {
    pub mode: Mode,
    pub entries: Vec<TermScore>,
    /// Number of distinct terms before truncation.
    pub distinct: usize,
    /// Sum of all scores before truncation.
    pub total: f64,
}

/// Scores in order of first occurrence.
struct Tally {
    index: HashMap<String, usize>,
    scores: Vec<(String, f64)>,
}

impl Tally {
    fn new() -> Tally {
        Tally {
            index: HashMap::new(),
            scores: Vec::new(),
        }
    }

    fn add(&mut self, term: &str, score: f64) {
        match self.index.get(term) {
            Some(&i) => self.scores[i].1 += score,
            None => {
                self.index.insert(term.to_owned(), self.scores.len());
                self.scores.push((term.to_owned(), score));
            }
        }
    }

    fn into_table(self, mode: Mode, top_n: usize) -> Option<FrequencyTable> {
        let distinct = self.scores.len();
        let total: f64 = self.scores.iter().map(|(_, s)| s).sum();
        let mut scores = self.scores;
        // Stable, so equal scores keep their first-occurrence order.
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores.truncate(top_n);
        if scores.is_empty() {
            return None;
        }
        Some(FrequencyTable {
            mode,
            entries: scores
                .into_iter()
                .map(|(term, score)| TermScore { term, score })
                .collect(),
            distinct,
            total,
        })
    }
}

fn is_stopword(stopwords: Option<&Stopwords>, term: &str) -> bool {
    stopwords.is_some_and(|sw| sw.contains(term))
}

/// Tokens of one answer: the lemma list if there is one, otherwise the tokenized free text.
fn answer_tokens(record: &IRecord, key: &str) -> Vec<String> {
    match record.lemmas.get(key) {
        Some(lemmas) => lemmas.iter().map(|l| l.to_lowercase()).collect(),
        None => match record.answers.get(key) {
            Some(text) => tokenizer::tokenize(text),
            None => vec![],
        },
    }
}

fn raw_frequencies(
    records: &[&IRecord],
    keys: &[&str],
    top_n: usize,
    stopwords: Option<&Stopwords>,
) -> Option<FrequencyTable> {
    let mut tally = Tally::new();
    for r in records {
        for key in keys {
            for token in answer_tokens(r, key) {
                if !is_stopword(stopwords, &token) {
                    tally.add(&token, 1.0);
                }
            }
        }
    }
    tally.into_table(Mode::Raw, top_n)
}

fn weighted_frequencies(
    dataset: &Dataset,
    records: &[&IRecord],
    keys: &[&str],
    top_n: usize,
    stopwords: Option<&Stopwords>,
) -> Option<FrequencyTable> {
    // The weights describe the whole corpus; with no respondents left there is nothing to show.
    if records.is_empty() {
        return None;
    }
    let keys: HashSet<&str> = keys.iter().copied().collect();
    let mut tally = Tally::new();
    for w in dataset.weights() {
        if !keys.contains(w.question.as_str()) {
            continue;
        }
        let lemma = w.lemma.to_lowercase();
        if !is_stopword(stopwords, &lemma) {
            tally.add(&lemma, w.weight);
        }
    }
    tally.into_table(Mode::Weighted, top_n)
}

/// Rank terms for `question` among `records`.
///
/// Returns `Ok(None)` if there is nothing to rank.
/// A zero `top_n` is an invalid argument.
/// Stopwords are excluded if a set is given.
pub fn word_frequencies(
    dataset: &Dataset,
    records: &[&IRecord],
    question: &QuestionSelector,
    mode: Mode,
    top_n: usize,
    stopwords: Option<&Stopwords>,
) -> Result<Option<FrequencyTable>> {
    if top_n == 0 {
        return Err(invalid_argument("table length must be at least 1".to_owned()));
    }
    let keys = dataset.question_keys(question)?;
    let table = match mode {
        Mode::Raw => raw_frequencies(records, &keys, top_n, stopwords),
        Mode::Weighted => weighted_frequencies(dataset, records, &keys, top_n, stopwords),
    };
    match &table {
        None => debug!(target: "survey", "{mode}, {question}: no data"),
        Some(t) => debug!(
            target: "survey",
            "{mode}, {question}: {} distinct terms, showing {}",
            t.distinct,
            t.entries.len()
        ),
    }
    Ok(table)
}
