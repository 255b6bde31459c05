//! Cascading filters: country, then institution type, then institution.
//!
//! Each stage only sees the records that survived the stages before it,
//! and only offers the values present among those records.

use crate::categories::{self, Field, Selection};
use crate::errors::Result;
use crate::input::IRecord;
use log::debug;
use serde::{Deserialize, Serialize};

/// One selection per cascade stage.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Filters {
    pub country: Selection,
    pub institution_type: Selection,
    pub institution: Selection,
}

impl Default for Filters {
    fn default() -> Self {
        Filters {
            country: Selection::All,
            institution_type: Selection::All,
            institution: Selection::All,
        }
    }
}

impl Filters {
    pub fn get(&self, field: Field) -> &Selection {
        match field {
            Field::Country => &self.country,
            Field::InstitutionType => &self.institution_type,
            Field::Institution => &self.institution,
        }
    }

    pub fn set(&mut self, field: Field, selection: Selection) {
        match field {
            Field::Country => self.country = selection,
            Field::InstitutionType => self.institution_type = selection,
            Field::Institution => self.institution = selection,
        }
    }

    /// Build filters from restrictions such as `country=Francia,Brasile`.
    /// Later restrictions on the same field replace earlier ones.
    pub fn from_restrictions(args: &[String]) -> Result<Filters> {
        let mut filters = Filters::default();
        for arg in args {
            let (field, selection) = categories::parse_restriction(arg)?;
            filters.set(field, selection);
        }
        Ok(filters)
    }
}

/// Drop selected values that the earlier stages no longer let through.
///
/// A stage whose selection ends up empty this way falls back to [Selection::All].
pub fn retain_available(records: &[&IRecord], filters: &Filters) -> Filters {
    let mut out = filters.clone();
    let mut current = records.to_vec();
    for field in Field::ALL {
        if let Selection::Values(vv) = filters.get(field) {
            let options = categories::options_for(field, &current);
            let kept: Vec<String> = vv
                .iter()
                .filter(|v| options.contains(&v.as_str()))
                .cloned()
                .collect();
            if kept.len() != vv.len() {
                debug!(
                    target: "survey",
                    "{field}: {} selected values no longer available",
                    vv.len() - kept.len()
                );
                let selection = if kept.is_empty() {
                    Selection::All
                } else {
                    Selection::Values(kept)
                };
                out.set(field, selection);
            }
        }
        current = categories::apply(&current, field, out.get(field));
    }
    out
}

/// What one stage offered and kept.
#[derive(Debug, PartialEq, Eq)]
pub struct Stage<'a> {
    pub field: Field,
    /// Values available at this stage, computed from the stage's input.
    pub options: Vec<&'a str>,
    pub rows_in: usize,
    pub rows_out: usize,
}

/// Result of running every stage.
#[derive(Debug)]
pub struct Cascade<'a> {
    pub stages: Vec<Stage<'a>>,
    pub records: Vec<&'a IRecord>,
}

/// Run the whole cascade over `records`.
pub fn run<'a>(records: &[&'a IRecord], filters: &Filters) -> Cascade<'a> {
    let mut current = records.to_vec();
    let mut stages = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let options = categories::options_for(field, &current);
        let selection = filters.get(field);
        let next = categories::apply(&current, field, selection);
        debug!(
            target: "survey",
            "{field} = {selection}: {} options, {} -> {} records",
            options.len(),
            current.len(),
            next.len()
        );
        stages.push(Stage {
            field,
            options,
            rows_in: current.len(),
            rows_out: next.len(),
        });
        current = next;
    }
    Cascade {
        stages,
        records: current,
    }
}

/// Options for `field`, given the selections of every stage before it.
pub fn list_options<'a>(records: &[&'a IRecord], field: Field, filters: &Filters) -> Vec<&'a str> {
    let mut current = records.to_vec();
    for stage in Field::ALL {
        if stage == field {
            break;
        }
        current = categories::apply(&current, stage, filters.get(stage));
    }
    categories::options_for(field, &current)
}

#[cfg(test)]
mod test {
    use super::*;
    use itertools::Itertools;

    fn record(country: &str, institution_type: &str, institution: &str) -> IRecord {
        IRecord {
            country: Some(country.to_owned()),
            institution_type: Some(institution_type.to_owned()),
            institution: Some(institution.to_owned()),
            ..Default::default()
        }
    }

    fn data() -> Vec<IRecord> {
        vec![
            record("Francia", "Scuola statale", "Liceo Parigi"),
            record("Francia", "Sezione italiana", "Lycée Lyon"),
            record("Brasile", "Scuola paritaria", "Colégio Dante"),
            record("Brasile", "Scuola statale", "Scuola San Paolo"),
            IRecord {
                country: Some("Argentina".to_owned()),
                institution_type: None,
                institution: Some("Istituto Buenos Aires".to_owned()),
                ..Default::default()
            },
        ]
    }

    fn sel(values: &[&str]) -> Selection {
        Selection::Values(values.iter().map(|x| x.to_string()).collect_vec())
    }

    #[test]
    fn options_follow_previous_stage() {
        let data = data();
        let view = data.iter().collect_vec();
        let mut filters = Filters::default();
        filters.country = sel(&["Francia"]);
        assert_eq!(
            list_options(&view, Field::InstitutionType, &filters),
            ["Scuola statale", "Sezione italiana"]
        );
        filters.institution_type = sel(&["Scuola statale"]);
        assert_eq!(
            list_options(&view, Field::Institution, &filters),
            ["Liceo Parigi"]
        );
        assert_eq!(
            list_options(&view, Field::Country, &filters),
            ["Argentina", "Brasile", "Francia"]
        );
    }

    #[test]
    fn stage_options_match_surviving_rows() {
        let data = data();
        let view = data.iter().collect_vec();
        let mut filters = Filters::default();
        filters.country = sel(&["Brasile", "Argentina"]);
        let cascade = run(&view, &filters);
        assert_eq!(cascade.stages.len(), 3);
        for (k, stage) in cascade.stages.iter().enumerate().skip(1) {
            let survivors = Field::ALL[..k].iter().fold(view.clone(), |acc, f| {
                categories::apply(&acc, *f, filters.get(*f))
            });
            assert_eq!(stage.options, categories::options_for(stage.field, &survivors));
            assert_eq!(stage.rows_in, survivors.len());
        }
        assert_eq!(
            cascade.stages[1].options,
            ["Scuola paritaria", "Scuola statale"]
        );
        // Argentina has no institution type, so it drops out at the second stage.
        assert_eq!(cascade.stages[1].rows_out, 2);
        assert_eq!(cascade.records.len(), 2);
        assert!(!cascade.stages[2].options.contains(&"Istituto Buenos Aires"));
    }

    #[test]
    fn select_all_everywhere() {
        let data = data();
        let view = data.iter().collect_vec();
        let all = run(&view, &Filters::default());
        let mut explicit = Filters::default();
        for field in Field::ALL {
            let options = list_options(&view, field, &explicit)
                .into_iter()
                .map(|x| x.to_owned())
                .collect_vec();
            explicit.set(field, Selection::Values(options));
        }
        let explicit = run(&view, &explicit);
        assert_eq!(all.records, explicit.records);
        assert_eq!(all.stages, explicit.stages);
        assert_eq!(all.records.len(), 4);
    }

    #[test]
    fn empty_country() {
        let data = data();
        let view = data.iter().collect_vec();
        let filters = Filters {
            country: sel(&["Giappone"]),
            ..Default::default()
        };
        let cascade = run(&view, &filters);
        assert!(cascade.records.is_empty());
        assert!(cascade.stages[1].options.is_empty());
        assert!(cascade.stages[2].options.is_empty());
    }

    #[test]
    fn retain_after_narrowing() {
        let data = data();
        let view = data.iter().collect_vec();
        let mut filters = Filters {
            country: sel(&["Francia", "Brasile"]),
            institution_type: sel(&["Scuola statale", "Sezione italiana"]),
            institution: sel(&["Liceo Parigi", "Scuola San Paolo"]),
        };
        assert_eq!(retain_available(&view, &filters), filters);
        filters.country = sel(&["Brasile"]);
        let kept = retain_available(&view, &filters);
        assert_eq!(kept.institution_type, sel(&["Scuola statale"]));
        assert_eq!(kept.institution, sel(&["Scuola San Paolo"]));
        filters.country = sel(&["Argentina"]);
        let kept = retain_available(&view, &filters);
        assert_eq!(kept.institution_type, Selection::All);
        assert_eq!(kept.institution, Selection::All);
    }

    #[test]
    fn from_restrictions_basic() {
        let args = vec![
            "country=Francia".to_owned(),
            "type=Scuola statale".to_owned(),
        ];
        let filters = Filters::from_restrictions(&args).unwrap();
        assert_eq!(filters.country, sel(&["Francia"]));
        assert_eq!(filters.institution_type, sel(&["Scuola statale"]));
        assert_eq!(filters.institution, Selection::All);
        assert!(Filters::from_restrictions(&["x=y".to_owned()]).is_err());
    }
}
