//! Error taxonomy
//!
//! Only structural failures are errors. A missing tag or an unrecognised
//! content line is data, not an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// The input folder yielded no documents
    #[error("no PDF files found in folder '{}'", path.display())]
    NoDocumentsFound { path: PathBuf },

    /// A document could not be opened or its page tree could not be read
    #[error("cannot read document '{}': {reason}", path.display())]
    DocumentUnreadable { path: PathBuf, reason: String },

    /// The finished table could not be written
    #[error("cannot write report '{}': {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl ScanError {
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ScanError::DocumentUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        ScanError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
