//! Choosing which survey questions a query looks at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Either every question or a single one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSelector {
    All,
    One(String),
}

impl QuestionSelector {
    /// `None`, `"all"` and `"*"` select every question; anything else is a question key.
    pub fn parse(arg: Option<&str>) -> QuestionSelector {
        match arg {
            None | Some("all") | Some("*") => QuestionSelector::All,
            Some(key) => QuestionSelector::One(key.to_owned()),
        }
    }
}

impl fmt::Display for QuestionSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QuestionSelector::All => write!(f, "all questions"),
            QuestionSelector::One(key) => write!(f, "question '{key}'"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_basic() {
        assert_eq!(QuestionSelector::parse(None), QuestionSelector::All);
        assert_eq!(QuestionSelector::parse(Some("all")), QuestionSelector::All);
        assert_eq!(QuestionSelector::parse(Some("*")), QuestionSelector::All);
        assert_eq!(
            QuestionSelector::parse(Some("significato")),
            QuestionSelector::One("significato".to_owned())
        );
    }
}
