//! CSV table writer

use std::path::Path;

use crate::backends::writer::{percent_text, TableWriter};
use crate::core::error::ScanError;
use crate::flows::report::{Cell, Table};

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

fn cell_text(cell: &Cell) -> String {
    match cell {
        Cell::RowNumber(n) => n.to_string(),
        Cell::Percent(fraction) => percent_text(*fraction),
        Cell::Text(text) => text.clone(),
        Cell::Blank => String::new(),
    }
}

impl TableWriter for CsvWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<(), ScanError> {
        let mut writer = ::csv::Writer::from_path(path).map_err(|e| ScanError::write(path, e))?;

        writer
            .write_record(&table.header)
            .map_err(|e| ScanError::write(path, e))?;
        for row in &table.rows {
            writer
                .write_record(row.iter().map(cell_text))
                .map_err(|e| ScanError::write(path, e))?;
        }

        writer.flush().map_err(|e| ScanError::write(path, e))
    }
}
