use crate::categories::Field;
use crate::input::IRecord;
use crate::store::Dataset;
use crate::tokenizer;
use itertools::Itertools;
use log::info;
use std::collections::HashSet;

fn explain_field(field: Field, records: &[&IRecord]) -> String {
    let vals = records
        .iter()
        .filter_map(|r| field.value(r))
        .unique()
        .count();
    let missing = records.iter().filter(|r| field.value(r).is_none()).count();
    format!("{field}: {vals} values, {missing} missing")
}

fn summary(records: &[&IRecord]) -> (usize, usize, usize) {
    let mut lemmas = HashSet::new();
    let mut tokencount = 0;
    let mut answers = 0;
    for r in records {
        answers += r.answers.len();
        for lemma in r.lemmas.values().flatten() {
            tokencount += 1;
            lemmas.insert(lemma.as_str());
        }
    }
    (answers, tokencount, lemmas.len())
}

pub fn statistics(dataset: &Dataset) {
    let records = dataset.view();
    let (answers, tokens, lemmas) = summary(&records);
    info!(target: "survey", "before filtering: records: {}", records.len());
    info!(target: "survey", "before filtering: answers: {answers}");
    info!(target: "survey", "before filtering: lemma tokens: {tokens}");
    info!(target: "survey", "before filtering: distinct lemmas: {lemmas}");
    info!(
        target: "survey",
        "categories: {}",
        Field::ALL
            .iter()
            .map(|f| explain_field(*f, &records))
            .join("; ")
    );
}

pub fn post_statistics(records: &[&IRecord]) {
    let (answers, tokens, lemmas) = summary(records);
    let words: usize = records
        .iter()
        .flat_map(|r| r.answers.values())
        .map(|a| tokenizer::tokenize(a).len())
        .sum();
    info!(target: "survey", "after filtering: records: {}", records.len());
    info!(target: "survey", "after filtering: answers: {answers}");
    info!(target: "survey", "after filtering: words: {words}");
    info!(target: "survey", "after filtering: lemma tokens: {tokens}");
    info!(target: "survey", "after filtering: distinct lemmas: {lemmas}");
}
