//! Document discovery
//!
//! Uses walkdir to collect every report under a folder before scanning
//! starts. Output is sorted so repeated runs number rows identically.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::core::paths::has_extension;

/// Default extension of scanned reports
pub const DEFAULT_EXTENSION: &str = "pdf";

/// Collect files under `root` (recursively) with the given extension
pub fn collect_documents(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut documents: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                log::debug!("skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| has_extension(entry.path(), extension))
        .map(|entry| entry.into_path())
        .collect();

    documents.sort();
    documents
}
