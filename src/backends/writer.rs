//! Table output
//!
//! A writer receives a finished [`Table`] and owns everything about the file
//! format. The writer is chosen from the output file's extension.

use std::path::Path;

use crate::backends::csv::CsvWriter;
use crate::backends::xlsx::XlsxWriter;
use crate::core::error::ScanError;
use crate::core::paths::has_extension;
use crate::flows::report::Table;

/// Serializes a finished table to a file
pub trait TableWriter {
    fn write(&self, table: &Table, path: &Path) -> Result<(), ScanError>;
}

/// `.csv` gets CSV, everything else a workbook
pub fn writer_for(path: &Path) -> Box<dyn TableWriter> {
    if has_extension(path, "csv") {
        Box::new(CsvWriter)
    } else {
        Box::new(XlsxWriter)
    }
}

/// Text shown for a percentage in plain-text outputs
pub fn percent_text(fraction: f64) -> String {
    format!("{:.0} %", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_text() {
        assert_eq!(percent_text(85.0), "8500 %");
        assert_eq!(percent_text(0.85), "85 %");
        assert_eq!(percent_text(0.02), "2 %");
    }

    #[test]
    fn test_writer_for_csv() {
        let temp = tempfile::tempdir().unwrap();
        let table = crate::flows::report::assemble(&[], &[]);

        let csv_path = temp.path().join("out.CSV");
        writer_for(&csv_path).write(&table, &csv_path).unwrap();
        let written = std::fs::read_to_string(&csv_path).unwrap();
        assert!(written.starts_with("#,source"));
    }
}
