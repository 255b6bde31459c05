//! Colors for rendering terms: term → category → color.

use crate::errors::{self, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const DEFAULT_COLOR: &str = "#4c72b0";

/// A color scheme, read from JSON:
///
/// ```json
/// {"default": "#999999", "categories": {"scuola": "#1f77b4"}, "terms": {"liceo": "scuola"}}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Palette {
    #[serde(default = "default_color")]
    pub default: String,
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
    #[serde(default)]
    pub terms: BTreeMap<String, String>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_owned()
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            default: default_color(),
            categories: BTreeMap::new(),
            terms: BTreeMap::new(),
        }
    }
}

impl Palette {
    pub fn parse(data: &str) -> Result<Palette> {
        let palette: Palette =
            serde_json::from_str(data).map_err(|e| errors::load_error(format!("palette: {e}")))?;
        for (term, category) in &palette.terms {
            if !palette.categories.contains_key(category) {
                return Err(errors::load_error(format!(
                    "palette: term '{term}' has unknown category '{category}'"
                )));
            }
        }
        Ok(palette)
    }

    pub fn load(path: &Path) -> Result<Palette> {
        let data = fs::read_to_string(path)
            .map_err(|e| errors::load_error(format!("{}: {e}", path.display())))?;
        Palette::parse(&data)
    }

    pub fn category(&self, term: &str) -> Option<&str> {
        self.terms.get(term).map(|c| c.as_str())
    }

    pub fn color(&self, term: &str) -> &str {
        self.category(term)
            .and_then(|c| self.categories.get(c))
            .map_or(self.default.as_str(), |c| c.as_str())
    }
}
