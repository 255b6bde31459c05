use anyhow::{Context, Result, anyhow};
use clap::Parser;
use cliclack::log;
use itertools::Itertools;
use std::path::PathBuf;
use survey_text::cascade::{self, Filters};
use survey_text::categories::{Field, Selection};
use survey_text::concordance::{self, DEFAULT_LINES, DEFAULT_WIDTH, Marker};
use survey_text::frequency::{self, Mode};
use survey_text::input::IRecord;
use survey_text::output;
use survey_text::palette::Palette;
use survey_text::questions::QuestionSelector;
use survey_text::stopwords::Stopwords;
use survey_text::store::{self, Dataset};
use survey_text::{errors, spreadsheet};

/// Explore survey answers interactively
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Input file (JSON)
    infile: PathBuf,
    /// Stopword list (one per line); the built-in Italian list is used otherwise
    #[arg(long)]
    stopwords: Option<PathBuf>,
    /// Color scheme (JSON)
    #[arg(long)]
    palette: Option<PathBuf>,
}

#[derive(Clone, PartialEq, Eq)]
enum Action {
    Restrict(Field),
    Reset,
    Question,
    Frequencies(Mode),
    Concordance,
    Export(Mode),
    Reload,
    Quit,
}

struct State {
    filters: Filters,
    question: QuestionSelector,
    exclude_stopwords: bool,
}

fn lib<T>(r: errors::Result<T>) -> Result<T> {
    r.map_err(|e| anyhow!("{e}"))
}

fn summarize(records: &[&IRecord]) -> String {
    let nanswers: usize = records.iter().map(|r| r.answers.len()).sum();
    format!("{} records, {nanswers} answers", records.len())
}

fn describe(dataset: &Dataset, state: &State) -> String {
    let options = textwrap::Options::new(70).subsequent_indent(" ");
    let view = dataset.view();
    let result = cascade::run(&view, &state.filters);
    let mut stack = vec![format!("{} ← input", summarize(&view))];
    for stage in &result.stages {
        let line = format!(
            "{} records ← {} is {} ({} available)",
            stage.rows_out,
            stage.field,
            state.filters.get(stage.field),
            stage.options.len(),
        );
        stack.push(textwrap::fill(&line, &options));
    }
    stack.push(format!("{}", state.question));
    stack.push(format!(
        "stopwords: {}",
        if state.exclude_stopwords {
            "excluded"
        } else {
            "kept"
        }
    ));
    stack.join("\n")
}

fn select_values(dataset: &Dataset, field: Field, filters: &Filters) -> Result<Option<Selection>> {
    let view = dataset.view();
    let available = cascade::list_options(&view, field, filters);
    if available.is_empty() {
        log::warning(format!("No {field} values left to choose from"))?;
        return Ok(None);
    }
    let items = available
        .iter()
        .map(|&v| (v.to_owned(), v.to_owned(), ""))
        .collect_vec();
    let initial = match filters.get(field) {
        Selection::Values(vv) if !vv.is_empty() => vv.clone(),
        _ => available.iter().map(|&v| v.to_owned()).collect_vec(),
    };
    let choices = cliclack::multiselect(format!("Select {field} (none selects all)"))
        .items(&items)
        .initial_values(initial)
        .required(false)
        .interact()?;
    if choices.is_empty() || choices.len() == available.len() {
        Ok(Some(Selection::All))
    } else {
        Ok(Some(Selection::Values(choices)))
    }
}

fn select_question(dataset: &Dataset, current: &QuestionSelector) -> Result<QuestionSelector> {
    let mut items = vec![(QuestionSelector::All, "All questions".to_owned(), "")];
    for q in dataset.questions() {
        let label = if q.text.is_empty() {
            q.key.clone()
        } else {
            format!("{}: {}", q.key, q.text)
        };
        items.push((QuestionSelector::One(q.key.clone()), label, ""));
    }
    let choice = cliclack::select("Which question?")
        .items(&items)
        .initial_value(current.clone())
        .interact()?;
    Ok(choice)
}

fn show_frequencies(
    dataset: &Dataset,
    state: &State,
    mode: Mode,
    stopwords: &Stopwords,
    palette: &Palette,
) -> Result<()> {
    let view = dataset.view();
    let records = cascade::run(&view, &state.filters).records;
    let sw = state.exclude_stopwords.then_some(stopwords);
    let table = lib(frequency::word_frequencies(
        dataset,
        &records,
        &state.question,
        mode,
        mode.default_top_n(),
        sw,
    ))?;
    match table {
        None => log::warning("No data for this selection")?,
        Some(t) => {
            let terms = output::terms(&t, palette);
            cliclack::note(
                format!("Top {} of {} terms ({mode})", terms.len(), t.distinct),
                output::pretty_terms(mode, &terms),
            )?;
        }
    }
    Ok(())
}

fn show_concordance(dataset: &Dataset, state: &State) -> Result<()> {
    let query: String = cliclack::input("Word to search for")
        .placeholder("scuola")
        .interact()?;
    let view = dataset.view();
    let records = cascade::run(&view, &state.filters).records;
    let hits = lib(concordance::find_concordances(
        dataset,
        &records,
        &state.question,
        &query,
        DEFAULT_WIDTH,
        DEFAULT_LINES,
    ))?;
    if hits.is_empty() {
        log::warning("No occurrences found")?;
        return Ok(());
    }
    let half = concordance::half_width(DEFAULT_WIDTH, query.trim());
    let marker = Marker::default();
    let lines = hits
        .iter()
        .map(|h| h.aligned_highlighted(half, &marker))
        .collect_vec();
    cliclack::note(
        format!("Contexts found (max {DEFAULT_LINES})"),
        lines.iter().map(|l| format!("... {l} ...")).join("\n"),
    )?;
    Ok(())
}

fn export(
    dataset: &Dataset,
    state: &State,
    mode: Mode,
    stopwords: &Stopwords,
    palette: &Palette,
) -> Result<()> {
    let filename: String = cliclack::input("file name")
        .default_input("frequencies.xlsx")
        .interact()?;
    let sw = state.exclude_stopwords.then_some(stopwords);
    let args = survey_text::driver::DriverArgs {
        filters: state.filters.clone(),
        question: state.question.clone(),
        mode,
        top_n: None,
        stopwords: sw,
        palette,
    };
    let result = lib(survey_text::driver::calc(&args, dataset))?;
    lib(spreadsheet::write_frequencies(
        &PathBuf::from(&filename),
        &result,
    ))?;
    log::info(format!("Wrote to {filename}"))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    cliclack::intro("survey-explore")?;
    log::info(format!("Reading {}...", args.infile.display()))?;
    let stopwords = match &args.stopwords {
        Some(path) => lib(Stopwords::load(path))
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => Stopwords::italian(),
    };
    let palette = match &args.palette {
        Some(path) => {
            lib(Palette::load(path)).with_context(|| format!("cannot read {}", path.display()))?
        }
        None => Palette::default(),
    };
    let mut dataset = lib(store::load_cached(&args.infile))
        .with_context(|| format!("cannot load {}", args.infile.display()))?;
    let mut state = State {
        filters: Filters::default(),
        question: QuestionSelector::All,
        exclude_stopwords: false,
    };
    loop {
        let view = dataset.view();
        state.filters = cascade::retain_available(&view, &state.filters);
        cliclack::note("Current selection", describe(&dataset, &state))?;

        let items = vec![
            (Action::Restrict(Field::Country), "Select countries", ""),
            (
                Action::Restrict(Field::InstitutionType),
                "Select institution types",
                "",
            ),
            (Action::Restrict(Field::Institution), "Select institutions", ""),
            (Action::Reset, "Clear all filters", ""),
            (Action::Question, "Select a question", ""),
            (Action::Frequencies(Mode::Raw), "Word frequencies (raw)", ""),
            (
                Action::Frequencies(Mode::Weighted),
                "Word weights (TF-IDF)",
                "",
            ),
            (Action::Concordance, "Concordance", ""),
            (Action::Export(Mode::Raw), "Export raw frequencies", "xlsx"),
            (
                Action::Export(Mode::Weighted),
                "Export TF-IDF weights",
                "xlsx",
            ),
            (Action::Reload, "Reload the input file if it changed", ""),
            (Action::Quit, "Quit", ""),
        ];
        let choice = cliclack::select("Action?").items(&items).interact()?;
        match choice {
            Action::Quit => break,
            Action::Reset => state.filters = Filters::default(),
            Action::Restrict(field) => {
                if let Some(selection) = select_values(&dataset, field, &state.filters)? {
                    state.filters.set(field, selection);
                }
            }
            Action::Question => {
                state.question = select_question(&dataset, &state.question)?;
                state.exclude_stopwords = cliclack::confirm("Exclude stopwords?")
                    .initial_value(state.exclude_stopwords)
                    .interact()?;
            }
            Action::Frequencies(mode) => {
                show_frequencies(&dataset, &state, mode, &stopwords, &palette)?
            }
            Action::Concordance => show_concordance(&dataset, &state)?,
            Action::Export(mode) => export(&dataset, &state, mode, &stopwords, &palette)?,
            Action::Reload => {
                dataset = lib(store::load_cached(&args.infile))?;
                log::info(format!("{} records", dataset.records().len()))?;
            }
        }
    }
    cliclack::outro("Bye!")?;
    Ok(())
}
