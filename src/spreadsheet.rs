//! Spreadsheet export.

use crate::errors::Result;
use crate::frequency::Mode;
use crate::output::{OConcordance, OFrequencies, OStage};
use itertools::Itertools;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn write_stages(sheet: &mut Worksheet, stages: &[OStage], bold: &Format) -> Result<()> {
    sheet.set_name("Filters")?;
    let headers = ["Field", "Selection", "Available", "Records in", "Records out"];
    for (col, h) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, bold)?;
    }
    for (i, s) in stages.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, s.field.to_string())?;
        sheet.write_string(row, 1, s.selection.to_string())?;
        sheet.write_string(row, 2, s.options.iter().join(", "))?;
        sheet.write_number(row, 3, s.rows_in as f64)?;
        sheet.write_number(row, 4, s.rows_out as f64)?;
    }
    sheet.set_column_width(0, 18)?;
    sheet.set_column_width(1, 30)?;
    sheet.set_column_width(2, 60)?;
    Ok(())
}

/// One sheet with the ranking, one with the filters that produced it.
pub fn write_frequencies(path: &Path, output: &OFrequencies) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Frequencies")?;
        let score = match output.mode {
            Mode::Raw => "Count",
            Mode::Weighted => "TF-IDF",
        };
        for (col, h) in ["Lemma", score, "Category", "Color"].iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *h, &bold)?;
        }
        match &output.terms {
            None => {
                sheet.write_string(1, 0, "no data")?;
            }
            Some(terms) => {
                for (i, t) in terms.iter().enumerate() {
                    let row = i as u32 + 1;
                    sheet.write_string(row, 0, &t.term)?;
                    sheet.write_number(row, 1, t.score)?;
                    if let Some(c) = &t.category {
                        sheet.write_string(row, 2, c)?;
                    }
                    sheet.write_string(row, 3, &t.color)?;
                }
            }
        }
        sheet.set_column_width(0, 24)?;
    }
    write_stages(workbook.add_worksheet(), &output.stages, &bold)?;
    workbook.save(path)?;
    Ok(())
}

/// One row per concordance line.
pub fn write_concordance(path: &Path, output: &OConcordance) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Concordance")?;
        for (col, h) in ["Left", "Term", "Right"].iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *h, &bold)?;
        }
        for (i, hit) in output.hits.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &hit.left)?;
            sheet.write_string_with_format(row, 1, &hit.term, &bold)?;
            sheet.write_string(row, 2, &hit.right)?;
        }
        sheet.set_column_width(0, 40)?;
        sheet.set_column_width(2, 40)?;
    }
    write_stages(workbook.add_worksheet(), &output.stages, &bold)?;
    workbook.save(path)?;
    Ok(())
}
