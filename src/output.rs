//! Data structures for representing the output.

use crate::cascade::{Cascade, Filters};
use crate::categories::{Field, Selection};
use crate::concordance::ConcordanceHit;
use crate::frequency::{FrequencyTable, Mode};
use crate::palette::Palette;
use crate::questions::QuestionSelector;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One filter stage: what it offered, what was selected, and how many records it kept.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct OStage {
    pub field: Field,
    pub selection: Selection,
    pub options: Vec<String>,
    pub rows_in: usize,
    pub rows_out: usize,
}

pub fn stages(cascade: &Cascade, filters: &Filters) -> Vec<OStage> {
    cascade
        .stages
        .iter()
        .map(|s| OStage {
            field: s.field,
            selection: filters.get(s.field).clone(),
            options: s.options.iter().map(|x| x.to_string()).collect_vec(),
            rows_in: s.rows_in,
            rows_out: s.rows_out,
        })
        .collect_vec()
}

/// A ranked term, ready for a chart.
#[derive(Clone, PartialEq, Debug, Deserialize, Serialize)]
pub struct OTerm {
    pub term: String,
    pub score: f64,
    pub category: Option<String>,
    pub color: String,
}

pub fn terms(table: &FrequencyTable, palette: &Palette) -> Vec<OTerm> {
    table
        .entries
        .iter()
        .map(|e| OTerm {
            term: e.term.clone(),
            score: e.score,
            category: palette.category(&e.term).map(|c| c.to_owned()),
            color: palette.color(&e.term).to_owned(),
        })
        .collect_vec()
}

#[derive(PartialEq, Debug, Deserialize, Serialize)]
pub struct OFrequencies {
    pub stages: Vec<OStage>,
    pub records: usize,
    pub question: QuestionSelector,
    pub mode: Mode,
    pub top_n: usize,
    pub stopwords: bool,
    /// `None` if there was nothing to rank.
    pub terms: Option<Vec<OTerm>>,
    pub distinct: usize,
    pub total: f64,
}

#[derive(PartialEq, Eq, Debug, Deserialize, Serialize)]
pub struct OConcordance {
    pub stages: Vec<OStage>,
    pub records: usize,
    pub question: QuestionSelector,
    pub query: String,
    pub width: usize,
    pub lines: usize,
    pub hits: Vec<ConcordanceHit>,
}

#[derive(Serialize)]
pub struct OError {
    pub error: String,
}

pub fn score_string(mode: Mode, score: f64) -> String {
    match mode {
        Mode::Raw => format!("{score:.0}"),
        Mode::Weighted => format!("{score:.4}"),
    }
}

/// Two aligned columns, one term per line.
pub fn pretty_terms(mode: Mode, terms: &[OTerm]) -> String {
    let w = terms
        .iter()
        .map(|t| t.term.chars().count())
        .max()
        .unwrap_or(0);
    terms
        .iter()
        .map(|t| format!("{:<w$}  {}", t.term, score_string(mode, t.score)))
        .join("\n")
}
