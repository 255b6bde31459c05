//! Command-line plumbing shared by the binaries.

use crate::cascade::Filters;
use crate::errors::Result;
use crate::output::OError;
use crate::palette::Palette;
use crate::questions::QuestionSelector;
use crate::stopwords::Stopwords;
use clap::Args;
use log::LevelFilter;
use serde::Serialize;
use std::path::PathBuf;
use std::{error, fs, io};

/// Which records and which question.
#[derive(Args)]
pub struct SelectionArgs {
    /// Keep only some records: 'country=A,B', 'type=A', 'institution=A' or 'field=*' (repeatable)
    #[arg(short, long = "restrict")]
    pub restrict: Vec<String>,
    /// Question key, or 'all'
    #[arg(long)]
    pub question: Option<String>,
}

impl SelectionArgs {
    pub fn filters(&self) -> Result<Filters> {
        Filters::from_restrictions(&self.restrict)
    }

    pub fn question(&self) -> QuestionSelector {
        QuestionSelector::parse(self.question.as_deref())
    }
}

/// Swappable configuration data.
#[derive(Args)]
pub struct ConfigArgs {
    /// Exclude the built-in Italian stopwords
    #[arg(long)]
    pub exclude_stopwords: bool,
    /// Exclude stopwords listed in this file instead (one per line)
    #[arg(long)]
    pub stopwords: Option<PathBuf>,
    /// Color scheme (JSON)
    #[arg(long)]
    pub palette: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn stopwords(&self) -> Result<Option<Stopwords>> {
        match &self.stopwords {
            Some(path) => Ok(Some(Stopwords::load(path)?)),
            None if self.exclude_stopwords => Ok(Some(Stopwords::italian())),
            None => Ok(None),
        }
    }

    pub fn palette(&self) -> Result<Palette> {
        match &self.palette {
            Some(path) => Palette::load(path),
            None => Ok(Palette::default()),
        }
    }
}

pub fn init_logger(level: LevelFilter) {
    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .init();
}

/// Write `value` as JSON, pretty unless `compact` is set.
pub fn write_json<T: Serialize>(filename: &str, value: &T, compact: bool) -> Result<()> {
    let file = fs::File::create(filename)?;
    let writer = io::BufWriter::new(file);
    if compact {
        serde_json::to_writer(writer, value)?;
    } else {
        serde_json::to_writer_pretty(writer, value)?;
    }
    Ok(())
}

pub fn store_error(error_file: &str, e: &dyn error::Error) -> Result<()> {
    let error = OError {
        error: format!("{e}"),
    };
    write_json(error_file, &error, true)
}
