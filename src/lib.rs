pub mod cascade;
pub mod categories;
pub mod cli;
pub mod concordance;
pub mod driver;
pub mod errors;
pub mod frequency;
mod information;
pub mod input;
pub mod output;
pub mod palette;
pub mod questions;
pub mod spreadsheet;
pub mod stopwords;
pub mod store;
pub mod tokenizer;
