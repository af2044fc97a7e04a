//! Flows module - Operations combining extraction and output
//!
//! Provides:
//! - scan: Run the extractor and resolver over every page of every document
//! - report: Assemble the scanned documents into a table
//! - stats: Summary statistics of a run

pub mod report;
pub mod scan;
pub mod stats;
