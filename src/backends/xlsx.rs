//! XLSX table writer
//!
//! Bold header with numeric columns right-aligned, row numbers grouped in
//! thousands, percentages without decimals, frozen header and an autofilter.

use rust_xlsxwriter::{Format, FormatAlign, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::backends::writer::TableWriter;
use crate::core::error::ScanError;
use crate::flows::report::{Cell, Table};

pub const PERCENT_FORMAT: &str = "##0 %";
pub const ROW_NUMBER_FORMAT: &str = "### ### ##0";

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWriter;

impl TableWriter for XlsxWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<(), ScanError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        fill_worksheet(worksheet, table).map_err(|e| ScanError::write(path, e))?;
        workbook.save(path).map_err(|e| ScanError::write(path, e))
    }
}

fn fill_worksheet(worksheet: &mut Worksheet, table: &Table) -> Result<(), XlsxError> {
    let header_bold = Format::new().set_bold();
    let header_bold_right = Format::new().set_bold().set_align(FormatAlign::Right);
    let percent = Format::new().set_num_format(PERCENT_FORMAT);
    let row_number = Format::new().set_num_format(ROW_NUMBER_FORMAT);

    for (col, title) in table.header.iter().enumerate() {
        let numeric = table.kinds.get(col).map(|k| k.is_numeric()).unwrap_or(false);
        let format = if numeric {
            &header_bold_right
        } else {
            &header_bold
        };
        worksheet.write_string_with_format(0, col as u16, title, format)?;
    }

    worksheet.set_freeze_panes(1, 0)?;

    let last_col = table.column_count().saturating_sub(1) as u16;
    worksheet.autofilter(0, 0, table.rows.len() as u32, last_col)?;

    for (index, row) in table.rows.iter().enumerate() {
        let sheet_row = index as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::RowNumber(n) => {
                    worksheet.write_number_with_format(sheet_row, col, *n as f64, &row_number)?;
                }
                Cell::Percent(fraction) => {
                    worksheet.write_number_with_format(sheet_row, col, *fraction, &percent)?;
                }
                Cell::Text(text) => {
                    worksheet.write_string(sheet_row, col, text)?;
                }
                Cell::Blank => {}
            }
        }
    }

    for (col, width) in table.widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width as f64)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{DocumentResult, Tag, TagValue};
    use crate::flows::report::assemble;

    #[test]
    fn test_write_xlsx() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("results.xlsx");
        let tags = vec![Tag::from("Tumorfläche"), Tag::from("Grading")];
        let docs = vec![DocumentResult::new(
            "a.pdf",
            vec![
                (tags[0].clone(), TagValue::Found("8500".into())),
                (tags[1].clone(), TagValue::Found("G2".into())),
            ],
        )];

        XlsxWriter.write(&assemble(&docs, &tags), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_write_xlsx_no_documents() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("empty.xlsx");

        XlsxWriter
            .write(&assemble(&[], &[Tag::from("Grading")]), &path)
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_xlsx_to_missing_dir_fails() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("missing").join("results.xlsx");

        let err = XlsxWriter.write(&assemble(&[], &[]), &path).unwrap_err();
        assert!(matches!(err, ScanError::Write { .. }));
    }
}
