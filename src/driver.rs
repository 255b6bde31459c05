//! Main entry points: filter, then rank or search.

use crate::cascade::{self, Filters};
use crate::concordance;
use crate::errors::Result;
use crate::frequency::{self, Mode};
use crate::information;
use crate::output::{self, OConcordance, OFrequencies};
use crate::palette::Palette;
use crate::questions::QuestionSelector;
use crate::stopwords::Stopwords;
use crate::store::Dataset;
use log::info;

/// What to rank?
pub struct DriverArgs<'a> {
    /// One selection per cascade stage.
    pub filters: Filters,

    /// Which question, or all of them.
    pub question: QuestionSelector,

    /// Raw counts or precomputed weights.
    pub mode: Mode,

    /// Table length.
    /// If not specified, the default of the mode is used.
    pub top_n: Option<usize>,

    /// Stopwords to exclude, if any.
    pub stopwords: Option<&'a Stopwords>,

    /// Colors attached to the ranked terms.
    pub palette: &'a Palette,
}

/// What to search for?
pub struct ConcordanceArgs<'a> {
    pub filters: Filters,
    pub question: QuestionSelector,
    pub query: &'a str,
    /// Line width in characters.
    pub width: usize,
    /// Maximum number of lines.
    pub lines: usize,
}

/// Filter the records and rank the terms.
pub fn calc(args: &DriverArgs, dataset: &Dataset) -> Result<OFrequencies> {
    information::statistics(dataset);
    let view = dataset.view();
    let cascade = cascade::run(&view, &args.filters);
    information::post_statistics(&cascade.records);
    let top_n = args.top_n.unwrap_or(args.mode.default_top_n());
    let table = frequency::word_frequencies(
        dataset,
        &cascade.records,
        &args.question,
        args.mode,
        top_n,
        args.stopwords,
    )?;
    match &table {
        None => info!(target: "survey", "{}, {}: no data", args.mode, args.question),
        Some(t) => info!(
            target: "survey",
            "{}, {}: top {} of {} terms",
            args.mode,
            args.question,
            t.entries.len(),
            t.distinct
        ),
    }
    Ok(OFrequencies {
        stages: output::stages(&cascade, &args.filters),
        records: cascade.records.len(),
        question: args.question.clone(),
        mode: args.mode,
        top_n,
        stopwords: args.stopwords.is_some(),
        distinct: table.as_ref().map_or(0, |t| t.distinct),
        total: table.as_ref().map_or(0.0, |t| t.total),
        terms: table.map(|t| output::terms(&t, args.palette)),
    })
}

/// Filter the records and collect concordance lines.
pub fn concordances(args: &ConcordanceArgs, dataset: &Dataset) -> Result<OConcordance> {
    information::statistics(dataset);
    let view = dataset.view();
    let cascade = cascade::run(&view, &args.filters);
    information::post_statistics(&cascade.records);
    let hits = concordance::find_concordances(
        dataset,
        &cascade.records,
        &args.question,
        args.query,
        args.width,
        args.lines,
    )?;
    info!(
        target: "survey",
        "'{}' in {}: {} lines",
        args.query,
        args.question,
        hits.len()
    );
    Ok(OConcordance {
        stages: output::stages(&cascade, &args.filters),
        records: cascade.records.len(),
        question: args.question.clone(),
        query: args.query.to_owned(),
        width: args.width,
        lines: args.lines,
        hits,
    })
}
