use itertools::Itertools;
use std::path::PathBuf;
use survey_text::cascade::{self, Filters};
use survey_text::categories::{Field, Selection};
use survey_text::concordance::{self, Marker};
use survey_text::driver::{self, ConcordanceArgs, DriverArgs};
use survey_text::errors::{LoadError, SchemaError};
use survey_text::frequency::{self, Mode};
use survey_text::palette::Palette;
use survey_text::questions::QuestionSelector;
use survey_text::stopwords::Stopwords;
use survey_text::store::{self, Dataset};

fn init() {
    let _ = pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

fn sample_path(filename: &str) -> PathBuf {
    let dir = env!("CARGO_MANIFEST_DIR");
    let mut path = PathBuf::from(dir);
    path.push(filename);
    path
}

fn load() -> Dataset {
    store::load(&sample_path("sample-data/survey.json")).unwrap()
}

fn only(field: Field, values: &[&str]) -> Filters {
    let mut filters = Filters::default();
    filters.set(
        field,
        Selection::Values(values.iter().map(|v| v.to_string()).collect_vec()),
    );
    filters
}

fn one(key: &str) -> QuestionSelector {
    QuestionSelector::One(key.to_owned())
}

#[test]
fn test_cascade() {
    init();
    let dataset = load();
    let view = dataset.view();
    assert_eq!(
        cascade::list_options(&view, Field::Country, &Filters::default()),
        ["Argentina", "Brasile", "Francia", "Germania"]
    );
    let mut filters = only(Field::Country, &["Francia"]);
    assert_eq!(
        cascade::list_options(&view, Field::InstitutionType, &filters),
        ["Scuola statale", "Sezione italiana"]
    );
    filters.institution_type = Selection::Values(vec!["Scuola statale".to_owned()]);
    let result = cascade::run(&view, &filters);
    assert_eq!(result.records.len(), 1);
    assert_eq!(result.stages[2].options, ["Liceo Leonardo da Vinci"]);
    // Germania has a statale school but no institution name; it must not leak into the options.
    let statali = only(Field::InstitutionType, &["Scuola statale"]);
    assert_eq!(
        cascade::list_options(&view, Field::Institution, &statali),
        ["Liceo Leonardo da Vinci", "Scuola italiana di San Paolo"]
    );
}

#[test]
fn test_select_all_equivalence() {
    init();
    let dataset = load();
    let view = dataset.view();
    let palette = Palette::default();
    let mut explicit = Filters::default();
    for field in Field::ALL {
        let values = cascade::list_options(&view, field, &explicit)
            .into_iter()
            .map(|v| v.to_owned())
            .collect_vec();
        explicit.set(field, Selection::Values(values));
    }
    let empty = Filters {
        country: Selection::Values(vec![]),
        institution_type: Selection::Values(vec![]),
        institution: Selection::Values(vec![]),
    };
    let run = |filters: Filters| {
        let args = DriverArgs {
            filters,
            question: QuestionSelector::All,
            mode: Mode::Raw,
            top_n: None,
            stopwords: None,
            palette: &palette,
        };
        driver::calc(&args, &dataset).unwrap()
    };
    let all = run(Filters::default());
    let explicit = run(explicit);
    let empty = run(empty);
    // Argentina (no type) and Germania (no institution) drop out.
    assert_eq!(all.records, 4);
    assert_eq!(explicit.records, all.records);
    assert_eq!(explicit.terms, all.terms);
    assert_eq!(empty.records, all.records);
    assert_eq!(empty.terms, all.terms);
}

#[test]
fn test_raw_frequencies() {
    init();
    let dataset = load();
    let view = dataset.view();
    let table =
        frequency::word_frequencies(&dataset, &view, &one("significato"), Mode::Raw, 3, None)
            .unwrap()
            .unwrap();
    let terms = table
        .entries
        .iter()
        .map(|e| (e.term.as_str(), e.score))
        .collect_vec();
    assert_eq!(terms, [("lingua", 5.0), ("cultura", 3.0), ("scuola", 3.0)]);
    assert_eq!(table.distinct, 12);
    assert_eq!(table.total, 21.0);
}

#[test]
fn test_weighted_frequencies() {
    init();
    let dataset = load();
    let view = dataset.view();
    let sw = Stopwords::italian();
    let table = frequency::word_frequencies(
        &dataset,
        &view,
        &QuestionSelector::All,
        Mode::Weighted,
        frequency::WEIGHTED_TOP_N,
        Some(&sw),
    )
    .unwrap()
    .unwrap();
    let terms = table.entries.iter().map(|e| e.term.as_str()).collect_vec();
    assert_eq!(
        terms,
        ["arte", "didattica", "lingua", "scuola", "cultura", "teatro", "italiano"]
    );
    assert!((table.entries[0].score - 0.65).abs() < 1e-9);
    assert!(table.entries.is_sorted_by(|a, b| a.score >= b.score));
}

#[test]
fn test_frequencies_deterministic() {
    init();
    let dataset = load();
    let view = dataset.view();
    for mode in [Mode::Raw, Mode::Weighted] {
        let a =
            frequency::word_frequencies(&dataset, &view, &QuestionSelector::All, mode, 5, None)
                .unwrap();
        let b =
            frequency::word_frequencies(&dataset, &view, &QuestionSelector::All, mode, 5, None)
                .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.unwrap().entries.len(), 5);
    }
}

#[test]
fn test_empty_country() {
    init();
    let dataset = load();
    let palette = Palette::default();
    for mode in [Mode::Raw, Mode::Weighted] {
        let args = DriverArgs {
            filters: only(Field::Country, &["Giappone"]),
            question: QuestionSelector::All,
            mode,
            top_n: None,
            stopwords: None,
            palette: &palette,
        };
        let out = driver::calc(&args, &dataset).unwrap();
        assert_eq!(out.records, 0);
        assert_eq!(out.terms, None);
    }
    let args = ConcordanceArgs {
        filters: only(Field::Country, &["Giappone"]),
        question: QuestionSelector::All,
        query: "scuola",
        width: concordance::DEFAULT_WIDTH,
        lines: concordance::DEFAULT_LINES,
    };
    let out = driver::concordances(&args, &dataset).unwrap();
    assert!(out.hits.is_empty());
}

#[test]
fn test_concordance() {
    init();
    let dataset = load();
    let args = ConcordanceArgs {
        filters: Filters::default(),
        question: QuestionSelector::All,
        query: "Scuola",
        width: concordance::DEFAULT_WIDTH,
        lines: concordance::DEFAULT_LINES,
    };
    let out = driver::concordances(&args, &dataset).unwrap();
    // Select-all drops Argentina and Germania, and with them the last occurrence.
    assert_eq!(out.records, 4);
    let positions = out.hits.iter().map(|h| h.position).collect_vec();
    assert_eq!(positions, [9, 30, 38]);

    let view = dataset.view();
    let hits = concordance::find_concordances(
        &dataset,
        &view,
        &QuestionSelector::All,
        "scuola",
        concordance::DEFAULT_WIDTH,
        concordance::DEFAULT_LINES,
    )
    .unwrap();
    assert_eq!(hits.len(), 4);
    assert_eq!(hits[0].left, "tura italiana e la lingua nella");
    assert_eq!(hits[0].right, "una didattica attiva con l arte");
    assert_eq!(hits[2].right, "aperta didattica laboratoriale");
    assert_eq!(hits[3].right, "è una comunità cultura e lingua");
}

#[test]
fn test_concordance_highlight() {
    init();
    let dataset = load();
    let view = dataset.view();
    let hits =
        concordance::find_concordances(&dataset, &view, &QuestionSelector::All, "arte", 70, 10)
            .unwrap();
    // "architetture" is not a match.
    assert_eq!(hits.len(), 2);
    assert_eq!(
        hits[1].highlighted(&Marker::default()),
        "la lingua è identità progetti di **arte** e teatro con la scuola insegnare"
    );
}

#[test]
fn test_errors() {
    init();
    let dataset = load();
    let view = dataset.view();
    let e = frequency::word_frequencies(&dataset, &view, &one("opinioni"), Mode::Raw, 50, None)
        .unwrap_err();
    assert!(e.is::<SchemaError>());
    let e = concordance::find_concordances(&dataset, &view, &one("opinioni"), "scuola", 70, 10)
        .unwrap_err();
    assert!(e.is::<SchemaError>());
    let e = store::load(&sample_path("sample-data/missing.json")).unwrap_err();
    assert!(e.is::<LoadError>());
}
