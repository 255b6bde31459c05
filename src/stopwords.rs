//! Stopword sets.

use crate::errors::{self, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Common Italian function words.
const ITALIAN: &[&str] = &[
    "a", "ad", "agli", "ai", "al", "alla", "alle", "allo", "anche", "che", "chi", "ci", "come",
    "con", "cui", "da", "dagli", "dai", "dal", "dalla", "dalle", "dallo", "degli", "dei", "del",
    "della", "delle", "dello", "di", "e", "ed", "essere", "gli", "ha", "hanno", "ho", "i", "il",
    "in", "io", "la", "le", "lei", "li", "lo", "loro", "lui", "ma", "mi", "mia", "mio", "ne",
    "negli", "nei", "nel", "nella", "nelle", "nello", "noi", "non", "o", "per", "più", "quale",
    "quando", "quella", "quelle", "quelli", "quello", "questa", "queste", "questi", "questo",
    "se", "si", "sia", "sono", "su", "sua", "sue", "sugli", "sui", "sul", "sulla", "sulle",
    "suo", "suoi", "ti", "tra", "fra", "tu", "tutto", "tutti", "un", "una", "uno", "vi", "voi",
    "è", "avere", "fare", "molto", "così",
];

/// A set of words excluded from frequency tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Stopwords::italian()
    }
}

impl Stopwords {
    /// The built-in Italian list.
    pub fn italian() -> Stopwords {
        Stopwords {
            words: ITALIAN.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// One word per line; blank lines and lines starting with `#` are ignored.
    pub fn parse(data: &str) -> Stopwords {
        let words = data
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(|l| l.to_lowercase())
            .collect();
        Stopwords { words }
    }

    pub fn load(path: &Path) -> Result<Stopwords> {
        let data = fs::read_to_string(path)
            .map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
        Ok(Stopwords::parse(&data))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn italian_basic() {
        let sw = Stopwords::italian();
        assert!(sw.contains("della"));
        assert!(sw.contains("è"));
        assert!(!sw.contains("scuola"));
    }

    #[test]
    fn parse_basic() {
        let sw = Stopwords::parse("# custom list\nScuola\n\n  lingua  \n");
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("scuola"));
        assert!(sw.contains("lingua"));
        assert!(!sw.contains("# custom list"));
    }
}
