use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{error, info};
use std::path::PathBuf;
use std::process;
use survey_text::cli::{self, ConfigArgs, SelectionArgs};
use survey_text::driver::{self, DriverArgs};
use survey_text::errors::Result;
use survey_text::frequency::Mode;
use survey_text::output;
use survey_text::spreadsheet;
use survey_text::store;

/// Word frequencies of survey answers
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Input file (JSON)
    infile: PathBuf,
    /// Output file (JSON); if omitted, the table is printed
    outfile: Option<String>,
    #[command(flatten)]
    selection: SelectionArgs,
    #[command(flatten)]
    config: ConfigArgs,
    /// Raw counts or precomputed TF-IDF weights
    #[arg(short, long, value_enum, default_value_t = Mode::Raw)]
    mode: Mode,
    /// Number of terms (default: 50 raw, 100 weighted)
    #[arg(short, long)]
    top: Option<usize>,
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
    let stopwords = args.config.stopwords()?;
    let palette = args.config.palette()?;
    let driver_args = DriverArgs {
        filters: args.selection.filters()?,
        question: args.selection.question(),
        mode: args.mode,
        top_n: args.top,
        stopwords: stopwords.as_ref(),
        palette: &palette,
    };
    let result = driver::calc(&driver_args, &dataset)?;
    if let Some(path) = &args.xlsx {
        info!(target: "survey", "write: {}", path.display());
        spreadsheet::write_frequencies(path, &result)?;
    }
    match &args.outfile {
        Some(filename) => {
            info!(target: "survey", "write: {}", filename);
            cli::write_json(filename, &result, args.compact)?;
        }
        None => match &result.terms {
            None => println!("no data"),
            Some(terms) => println!("{}", output::pretty_terms(result.mode, terms)),
        },
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
