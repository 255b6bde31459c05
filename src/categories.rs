//! Categorical fields and single-stage filtering.

use crate::errors::{invalid_argument, Result};
use crate::input::IRecord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical fields that records can be filtered by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Country,
    InstitutionType,
    Institution,
}

impl Field {
    /// The cascade order.
    pub const ALL: [Field; 3] = [Field::Country, Field::InstitutionType, Field::Institution];

    pub fn value<'a>(&self, record: &'a IRecord) -> Option<&'a str> {
        let v = match self {
            Field::Country => &record.country,
            Field::InstitutionType => &record.institution_type,
            Field::Institution => &record.institution,
        };
        v.as_deref()
    }

    pub fn parse(s: &str) -> Result<Field> {
        match s {
            "country" => Ok(Field::Country),
            "institution_type" | "type" => Ok(Field::InstitutionType),
            "institution" => Ok(Field::Institution),
            _ => Err(invalid_argument(format!("unknown field '{s}'"))),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Country => write!(f, "country"),
            Field::InstitutionType => write!(f, "institution type"),
            Field::Institution => write!(f, "institution"),
        }
    }
}

/// Which values of a field to keep.
///
/// [Selection::All] keeps every record that has some value for the field.
/// An empty [Selection::Values] is treated the same way,
/// so that clearing a selection never hides everything.
/// Records with a missing value are dropped in both cases,
/// exactly as if every available option had been selected one by one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Selection {
    All,
    Values(Vec<String>),
}

impl Selection {
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Selection::All, Some(_)) => true,
            (Selection::Values(vv), Some(_)) if vv.is_empty() => true,
            (Selection::Values(vv), Some(v)) => vv.iter().any(|x| x == v),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Selection::Values(vv) if !vv.is_empty() => {
                write!(f, "{}", vv.iter().map(|x| format!("'{x}'")).join(" or "))
            }
            _ => write!(f, "all"),
        }
    }
}

/// Distinct non-missing values of `field` among `records`, sorted.
pub fn options_for<'a>(field: Field, records: &[&'a IRecord]) -> Vec<&'a str> {
    records
        .iter()
        .copied()
        .filter_map(|r| field.value(r))
        .sorted()
        .dedup()
        .collect_vec()
}

/// Keep the records whose `field` value is selected.
pub fn apply<'a>(records: &[&'a IRecord], field: Field, selection: &Selection) -> Vec<&'a IRecord> {
    records
        .iter()
        .copied()
        .filter(|r| selection.matches(field.value(r)))
        .collect_vec()
}

/// Parse a restriction of the form `field=value1,value2` or `field=*`.
pub fn parse_restriction(arg: &str) -> Result<(Field, Selection)> {
    let parts = arg.splitn(2, '=').collect_vec();
    if parts.len() != 2 {
        return Err(invalid_argument(format!(
            "restriction should be of the form 'field=value,...', got '{arg}'"
        )));
    }
    let field = Field::parse(parts[0])?;
    let selection = if parts[1] == "*" {
        Selection::All
    } else {
        Selection::Values(
            parts[1]
                .split(',')
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_owned())
                .collect_vec(),
        )
    };
    Ok((field, selection))
}

#[cfg(test)]
mod test {
    use super::*;

    fn record(country: Option<&str>, institution_type: Option<&str>) -> IRecord {
        IRecord {
            country: country.map(|x| x.to_owned()),
            institution_type: institution_type.map(|x| x.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn options_sorted_distinct() {
        let data = [
            record(Some("Francia"), None),
            record(Some("Brasile"), None),
            record(None, None),
            record(Some("Francia"), None),
        ];
        let view = data.iter().collect_vec();
        assert_eq!(options_for(Field::Country, &view), ["Brasile", "Francia"]);
        assert!(options_for(Field::InstitutionType, &view).is_empty());
    }

    #[test]
    fn apply_values() {
        let data = [
            record(Some("Francia"), None),
            record(Some("Brasile"), None),
            record(None, None),
        ];
        let view = data.iter().collect_vec();
        let sel = Selection::Values(vec!["Brasile".to_owned()]);
        let out = apply(&view, Field::Country, &sel);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].country.as_deref(), Some("Brasile"));
    }

    #[test]
    fn select_all_equivalence() {
        let data = [
            record(Some("Francia"), None),
            record(None, None),
            record(Some("Brasile"), None),
            record(Some("Argentina"), None),
        ];
        let view = data.iter().collect_vec();
        let every = options_for(Field::Country, &view)
            .into_iter()
            .map(|x| x.to_owned())
            .collect_vec();
        let explicit = apply(&view, Field::Country, &Selection::Values(every));
        let all = apply(&view, Field::Country, &Selection::All);
        let empty = apply(&view, Field::Country, &Selection::Values(vec![]));
        assert_eq!(explicit, all);
        assert_eq!(empty, all);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn apply_unknown_value() {
        let data = [record(Some("Francia"), None)];
        let view = data.iter().collect_vec();
        let sel = Selection::Values(vec!["Giappone".to_owned()]);
        assert!(apply(&view, Field::Country, &sel).is_empty());
    }

    #[test]
    fn parse_restriction_basic() {
        assert_eq!(
            parse_restriction("country=Francia, Brasile").unwrap(),
            (
                Field::Country,
                Selection::Values(vec!["Francia".to_owned(), "Brasile".to_owned()])
            )
        );
        assert_eq!(
            parse_restriction("type=*").unwrap(),
            (Field::InstitutionType, Selection::All)
        );
        assert!(parse_restriction("country").is_err());
        assert!(parse_restriction("region=Lazio").is_err());
    }

    #[test]
    fn selection_display() {
        assert_eq!(Selection::All.to_string(), "all");
        assert_eq!(Selection::Values(vec![]).to_string(), "all");
        assert_eq!(
            Selection::Values(vec!["a".to_owned(), "b".to_owned()]).to_string(),
            "'a' or 'b'"
        );
    }
}
