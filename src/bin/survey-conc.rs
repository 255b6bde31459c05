use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use survey_text::cli::{self, SelectionArgs};
use survey_text::concordance::{self, Marker, DEFAULT_LINES, DEFAULT_WIDTH};
use survey_text::driver::{self, ConcordanceArgs};
use survey_text::errors::Result;
use survey_text::spreadsheet;
use survey_text::store;

/// Concordance lines (keyword in context) from survey answers
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (JSON)
    infile: PathBuf,
    /// Word to search for
    query: String,
    #[command(flatten)]
    selection: SelectionArgs,
    /// Line width (characters)
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    width: usize,
    /// Maximum number of lines
    #[arg(short, long, default_value_t = DEFAULT_LINES)]
    lines: usize,
    /// Mark every occurrence of the word with this string, e.g. '**'
    #[arg(long)]
    mark: Option<String>,
    /// Output file (JSON)
    #[arg(short, long)]
    outfile: Option<String>,
    /// Also write a spreadsheet
    #[arg(long)]
    xlsx: Option<PathBuf>,
    /// Report errors as a JSON file
    #[arg(long)]
    error_file: Option<String>,
    /// Produce compact JSON files
    #[arg(long)]
    compact: bool,
    /// Verbosity
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

fn process(args: &Args) -> Result<()> {
    let dataset = store::load(&args.infile)?;
    let conc_args = ConcordanceArgs {
        filters: args.selection.filters()?,
        question: args.selection.question(),
        query: &args.query,
        width: args.width,
        lines: args.lines,
    };
    let result = driver::concordances(&conc_args, &dataset)?;
    if let Some(path) = &args.xlsx {
        info!(target: "survey", "write: {}", path.display());
        spreadsheet::write_concordance(path, &result)?;
    }
    if let Some(filename) = &args.outfile {
        info!(target: "survey", "write: {}", filename);
        cli::write_json(filename, &result, args.compact)?;
    }
    if result.hits.is_empty() {
        println!("no occurrences found");
        return Ok(());
    }
    let half = concordance::half_width(args.width, args.query.trim());
    for hit in &result.hits {
        let line = match &args.mark {
            None => hit.aligned(half),
            Some(m) => {
                let marker = Marker {
                    open: m.clone(),
                    close: m.clone(),
                };
                hit.aligned_highlighted(half, &marker)
            }
        };
        println!("... {line} ...");
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    cli::init_logger(args.verbose.log_level_filter());
    match process(&args) {
        Ok(()) => (),
        Err(e) => {
            match &args.error_file {
                Some(filename) => match cli::store_error(filename, &*e) {
                    Ok(()) => {
                        info!(target: "survey", "error reported: {e}");
                    }
                    Err(e2) => {
                        error!(target: "survey", "{e}");
                        error!(target: "survey", "{e2}");
                    }
                },
                None => error!(target: "survey", "{e}"),
            }
            process::exit(1);
        }
    }
}
