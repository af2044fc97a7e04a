//! Backends module - Document access and file output
//!
//! Provides:
//! - walk: Report discovery with walkdir
//! - pdf: Page text rendering with lopdf
//! - writer: Table writer selection
//! - xlsx: Workbook output
//! - csv: CSV output

pub mod csv;
pub mod pdf;
pub mod walk;
pub mod writer;
pub mod xlsx;
