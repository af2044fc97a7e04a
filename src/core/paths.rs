//! Path normalization utilities
//!
//! Document paths end up as cells in the report, so they are rendered with '/'
//! as separator regardless of platform.

use std::path::Path;

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Whether the path's extension equals `ext`, ignoring ASCII case
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("documents/2020/report.pdf");
        assert_eq!(normalize_path(path), "documents/2020/report.pdf");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/report.pdf"), "pdf"));
        assert!(has_extension(Path::new("a/REPORT.PDF"), "pdf"));
        assert!(!has_extension(Path::new("a/report.pdf.txt"), "pdf"));
        assert!(!has_extension(Path::new("a/pdf"), "pdf"));
    }
}
