//! The dataset store: loading, validation and the process-wide cache.

use crate::errors::{self, Result};
use crate::input::{IQuestion, IRecord, IWeight, Input};
use crate::questions::QuestionSelector;
use itertools::Itertools;
use log::{debug, info};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

/// A validated, read-only dataset.
#[derive(Debug)]
pub struct Dataset {
    input: Input,
}

impl Dataset {
    /// Validate the input and wrap it.
    pub fn new(input: Input) -> Result<Dataset> {
        if input.questions.is_empty() {
            return Err(errors::load_error_ref("no questions declared"));
        }
        let mut keys = HashSet::new();
        for q in &input.questions {
            if q.key.is_empty() {
                return Err(errors::load_error_ref("empty question key"));
            }
            if !keys.insert(q.key.as_str()) {
                return Err(errors::load_error(format!(
                    "duplicate question key '{}'",
                    q.key
                )));
            }
        }
        for (i, r) in input.records.iter().enumerate() {
            for key in r.answers.keys().chain(r.lemmas.keys()) {
                if !keys.contains(key.as_str()) {
                    return Err(errors::load_error(format!(
                        "record {i} refers to unknown question '{key}'"
                    )));
                }
            }
        }
        for w in &input.weights {
            if !keys.contains(w.question.as_str()) {
                return Err(errors::load_error(format!(
                    "weight for '{}' refers to unknown question '{}'",
                    w.lemma, w.question
                )));
            }
            if !w.weight.is_finite() {
                return Err(errors::load_error(format!(
                    "weight for '{}' in '{}' is not a finite number",
                    w.lemma, w.question
                )));
            }
        }
        Ok(Dataset { input })
    }

    pub fn questions(&self) -> &[IQuestion] {
        &self.input.questions
    }

    pub fn records(&self) -> &[IRecord] {
        &self.input.records
    }

    pub fn weights(&self) -> &[IWeight] {
        &self.input.weights
    }

    /// All records, as a view that filters can narrow down.
    pub fn view(&self) -> Vec<&IRecord> {
        self.input.records.iter().collect_vec()
    }

    /// Resolve a selector to question keys, in declaration order.
    /// Fails with a schema error if a single selected question does not exist.
    pub fn question_keys(&self, selector: &QuestionSelector) -> Result<Vec<&str>> {
        match selector {
            QuestionSelector::All => Ok(self
                .input
                .questions
                .iter()
                .map(|q| q.key.as_str())
                .collect_vec()),
            QuestionSelector::One(key) => match self.input.questions.iter().find(|q| &q.key == key)
            {
                Some(q) => Ok(vec![q.key.as_str()]),
                None => Err(errors::schema_error(format!("question '{key}'"))),
            },
        }
    }
}

/// Parse a dataset from a JSON string.
pub fn load_str(data: &str) -> Result<Dataset> {
    let input: Input =
        serde_json::from_str(data).map_err(|e| errors::load_error(format!("{e}")))?;
    Dataset::new(input)
}

/// Read and parse a dataset from a JSON file.
pub fn load(path: &Path) -> Result<Dataset> {
    info!(target: "survey", "read: {}", path.display());
    let data = fs::read_to_string(path)
        .map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
    let dataset = load_str(&data).map_err(|e| match e.downcast::<errors::LoadError>() {
        Ok(e) => errors::load_error(format!("{}: {}", path.display(), e.0)),
        Err(e) => e,
    })?;
    info!(
        target: "survey",
        "loaded {} records, {} questions, {} weights",
        dataset.records().len(),
        dataset.questions().len(),
        dataset.weights().len()
    );
    Ok(dataset)
}

/// Identity of a data source: where it is and what it looked like when we read it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SourceKey {
    path: PathBuf,
    len: u64,
    modified: Option<SystemTime>,
}

fn source_key(path: &Path) -> Result<SourceKey> {
    let full = fs::canonicalize(path)
        .map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
    let meta =
        fs::metadata(&full).map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
    Ok(SourceKey {
        path: full,
        len: meta.len(),
        modified: meta.modified().ok(),
    })
}

type Slot = Option<(SourceKey, Arc<Dataset>)>;

static CACHE: Mutex<Slot> = Mutex::new(None);

/// Load a dataset, reusing the previously loaded one if the source has not changed.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>> {
    let key = source_key(path)?;
    let mut slot = CACHE
        .lock()
        .map_err(|_| errors::load_error_ref("dataset cache is poisoned"))?;
    if let Some((cached, dataset)) = slot.as_ref() {
        if *cached == key {
            debug!(target: "survey", "cache hit: {}", path.display());
            return Ok(Arc::clone(dataset));
        }
    }
    let dataset = Arc::new(load(path)?);
    *slot = Some((key, Arc::clone(&dataset)));
    Ok(dataset)
}

/// Forget the cached dataset.
pub fn invalidate() {
    if let Ok(mut slot) = CACHE.lock() {
        *slot = None;
    }
}
