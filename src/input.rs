//! Data structures for representing the input.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key that identifies one survey question.
pub type QuestionKey = String;

/// One survey question.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IQuestion {
    /// Short identifier used by answers, lemma lists, and weights.
    pub key: QuestionKey,
    /// The question as it was shown to respondents.
    #[serde(default)]
    pub text: String,
}

/// One respondent's answers.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct IRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub institution_type: Option<String>,
    #[serde(default)]
    pub institution: Option<String>,
    /// Free-text answer per question.
    /// A question without an entry was left unanswered.
    #[serde(default)]
    pub answers: BTreeMap<QuestionKey, String>,
    /// Pre-lemmatized tokens per question.
    /// If a question has no entry here, its free text is tokenized instead.
    #[serde(default)]
    pub lemmas: BTreeMap<QuestionKey, Vec<String>>,
}

/// One row of the precomputed weighting table.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct IWeight {
    pub question: QuestionKey,
    pub lemma: String,
    pub weight: f64,
}

/// Everything we read from the input file.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Input {
    pub questions: Vec<IQuestion>,
    pub records: Vec<IRecord>,
    #[serde(default)]
    pub weights: Vec<IWeight>,
}
