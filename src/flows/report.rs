//! Report assembly
//!
//! Turns the scanned documents into a rectangular table: a header row, one
//! row per document in scan order, a cell type per value, and a width hint
//! per column. Writers only lay the table out; they never look at cell text
//! to decide how to format it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::{DocumentResult, Tag, TagValue};

pub const ROW_NUMBER_HEADER: &str = "#";
pub const SOURCE_HEADER: &str = "source";
pub const NO_FILES_FOUND: &str = "no files found";

/// Added to the widest entry of the source and tag columns
pub const COLUMN_PADDING: usize = 2;

/// Added to the row number column on top of digits and group separators
pub const ROW_NUMBER_PADDING: usize = 3;

/// Values starting with ASCII digits are read as percentages in hundredths
static LEADING_DIGITS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+").expect("Invalid LEADING_DIGITS_RE regex"));

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// 1-based sequential row number
    RowNumber(u64),
    /// Fraction shown as a percentage (0.85 is shown as 85 %)
    Percent(f64),
    Text(String),
    Blank,
}

/// Display class of a whole column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    RowNumber,
    Percent,
    Text,
}

impl ColumnKind {
    /// Numeric columns get right-aligned headers
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::RowNumber | ColumnKind::Percent)
    }
}

/// Finished report, ready for a writer
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub kinds: Vec<ColumnKind>,
    /// Column widths in characters, padding included
    pub widths: Vec<usize>,
}

impl Table {
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Classify one extracted value
///
/// Applies to any leading digit run, so `"2"` becomes 0.02 just like
/// `"8500"` becomes 85.00. Text after the digits is ignored. A digit run too
/// long to fit a finite number stays text.
pub fn format_value(value: &TagValue) -> Cell {
    match value {
        TagValue::Found(text) => match LEADING_DIGITS_RE.find(text) {
            Some(m) => match m.as_str().parse::<f64>() {
                Ok(number) if number.is_finite() => Cell::Percent(number / 100.0),
                _ => Cell::Text(text.clone()),
            },
            None => Cell::Text(text.clone()),
        },
        TagValue::NotFound => Cell::Text(value.as_str().to_string()),
    }
}

/// Width of the row number column for `rows` data rows
///
/// Leaves room for a thousands separator per group of three digits.
pub fn row_number_width(rows: usize) -> usize {
    // Sized for the next free row, like the sheet's own row counter
    let digits = (rows + 1).to_string().len();
    digits + (digits - 1) / 3 + ROW_NUMBER_PADDING
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Build the table for the scanned documents
///
/// `documents` carry one value per tag, parallel to `tags`.
pub fn assemble(documents: &[DocumentResult], tags: &[Tag]) -> Table {
    let mut header = vec![ROW_NUMBER_HEADER.to_string(), SOURCE_HEADER.to_string()];
    header.extend(tags.iter().map(|t| t.as_str().to_string()));

    let mut widths: Vec<usize> = header.iter().map(|h| text_width(h)).collect();
    let mut kinds = vec![ColumnKind::RowNumber, ColumnKind::Text];
    kinds.extend(std::iter::repeat(ColumnKind::Text).take(tags.len()));

    let mut rows = Vec::with_capacity(documents.len().max(1));
    for (index, doc) in documents.iter().enumerate() {
        let mut row = Vec::with_capacity(header.len());
        row.push(Cell::RowNumber(index as u64 + 1));
        row.push(Cell::Text(doc.path.clone()));
        widths[1] = widths[1].max(text_width(&doc.path));

        for (offset, (_, value)) in doc.values.iter().take(tags.len()).enumerate() {
            let column = offset + 2;
            let cell = format_value(value);
            if matches!(cell, Cell::Percent(_)) {
                kinds[column] = ColumnKind::Percent;
            }
            widths[column] = widths[column].max(text_width(value.as_str()));
            row.push(cell);
        }
        row.resize(header.len(), Cell::Blank);
        rows.push(row);
    }

    if rows.is_empty() {
        let mut row = vec![Cell::Text(NO_FILES_FOUND.to_string())];
        row.resize(header.len(), Cell::Blank);
        rows.push(row);
    }

    widths[0] = row_number_width(documents.len());
    for width in widths.iter_mut().skip(1) {
        *width += COLUMN_PADDING;
    }

    Table {
        header,
        rows,
        kinds,
        widths,
    }
}
