//! Document scanning flow
//!
//! Every page of a document is tokenized, the page tokens are concatenated in
//! page order, and the tags are resolved once against the merged sequence. A
//! label on the last line of one page therefore still finds its value at the
//! top of the next.

use std::path::{Path, PathBuf};

use crate::backends::pdf::{DocumentLoader, PageSource};
use crate::core::error::ScanError;
use crate::core::model::{Counters, DocumentResult, Tag};
use crate::core::paths::normalize_path;
use crate::extract::resolve::resolve_tags;
use crate::extract::tokens::extract_tokens;

/// Scan behavior switches
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    /// Log and skip unreadable documents instead of aborting the run
    pub skip_unreadable: bool,

    /// Worker threads; values above 1 need the `parallel` feature
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skip_unreadable: false,
            jobs: 1,
        }
    }
}

/// Results of a batch, in scan order
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub documents: Vec<DocumentResult>,
    pub counters: Counters,

    /// Documents dropped with `skip_unreadable`
    pub skipped: Vec<PathBuf>,
}

/// Concatenated tokens of all pages, in page order
pub fn document_tokens<D: PageSource>(doc: &D) -> Result<Vec<String>, ScanError> {
    let mut tokens = Vec::new();
    for page in 1..=doc.page_count() {
        let text = doc.page_text(page)?;
        let page_tokens = extract_tokens(&text);
        log::debug!("page {}: {} tokens", page, page_tokens.len());
        tokens.extend(page_tokens);
    }
    Ok(tokens)
}

/// Scan a single document
pub fn scan_document<L: DocumentLoader>(
    loader: &L,
    path: &Path,
    tags: &[Tag],
) -> Result<DocumentResult, ScanError> {
    let doc = loader.load(path)?;
    let tokens = document_tokens(&doc)?;
    let values = resolve_tags(&tokens, tags);
    Ok(DocumentResult::new(normalize_path(path), values))
}

/// Scan a batch of documents and aggregate the counters
pub fn scan_documents<L: DocumentLoader>(
    loader: &L,
    paths: &[PathBuf],
    tags: &[Tag],
    options: ScanOptions,
) -> Result<ScanOutcome, ScanError> {
    let scanned = scan_all(loader, paths, tags, options);

    let mut documents = Vec::with_capacity(scanned.len());
    let mut skipped = Vec::new();
    for (path, result) in scanned {
        match result {
            Ok(doc) => documents.push(doc),
            Err(err) if options.skip_unreadable => {
                log::warn!("skipping {}: {}", path.display(), err);
                skipped.push(path.to_path_buf());
            }
            Err(err) => return Err(err),
        }
    }

    let mut counters = Counters::new(tags);
    for doc in &documents {
        counters.record(doc);
    }

    Ok(ScanOutcome {
        documents,
        counters,
        skipped,
    })
}

fn scan_sequential<'p, L: DocumentLoader>(
    loader: &L,
    paths: &'p [PathBuf],
    tags: &[Tag],
    options: ScanOptions,
) -> Vec<(&'p Path, Result<DocumentResult, ScanError>)> {
    let mut scanned = Vec::with_capacity(paths.len());
    for path in paths {
        log::info!("scanning {}", path.display());
        let result = scan_document(loader, path, tags);
        let failed = result.is_err();
        scanned.push((path.as_path(), result));
        // Nothing after a fatal failure would be used
        if failed && !options.skip_unreadable {
            break;
        }
    }
    scanned
}

#[cfg(not(feature = "parallel"))]
fn scan_all<'p, L: DocumentLoader>(
    loader: &L,
    paths: &'p [PathBuf],
    tags: &[Tag],
    options: ScanOptions,
) -> Vec<(&'p Path, Result<DocumentResult, ScanError>)> {
    if options.jobs > 1 {
        log::warn!("built without the `parallel` feature, scanning sequentially");
    }
    scan_sequential(loader, paths, tags, options)
}

#[cfg(feature = "parallel")]
fn scan_all<'p, L: DocumentLoader>(
    loader: &L,
    paths: &'p [PathBuf],
    tags: &[Tag],
    options: ScanOptions,
) -> Vec<(&'p Path, Result<DocumentResult, ScanError>)> {
    use rayon::prelude::*;

    if options.jobs <= 1 {
        return scan_sequential(loader, paths, tags, options);
    }

    let pool = match rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()
    {
        Ok(pool) => pool,
        Err(err) => {
            log::warn!("cannot start {} workers ({}), scanning sequentially", options.jobs, err);
            return scan_sequential(loader, paths, tags, options);
        }
    };

    // collect keeps input order
    pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                log::info!("scanning {}", path.display());
                (path.as_path(), scan_document(loader, path, tags))
            })
            .collect()
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::model::{Completeness, TagValue};
    use std::collections::HashMap;

    /// In-memory documents: path -> rendered page texts
    #[derive(Default)]
    pub struct MemoryLoader {
        pub documents: HashMap<PathBuf, Vec<String>>,
    }

    pub struct MemoryDocument {
        pages: Vec<String>,
    }

    impl MemoryLoader {
        pub fn with(mut self, path: &str, pages: &[&str]) -> Self {
            self.documents.insert(
                PathBuf::from(path),
                pages.iter().map(|p| p.to_string()).collect(),
            );
            self
        }
    }

    impl PageSource for MemoryDocument {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn page_text(&self, page_number: usize) -> Result<String, ScanError> {
            Ok(self.pages[page_number - 1].clone())
        }
    }

    impl DocumentLoader for MemoryLoader {
        type Document = MemoryDocument;

        fn load(&self, path: &Path) -> Result<MemoryDocument, ScanError> {
            self.documents
                .get(path)
                .map(|pages| MemoryDocument {
                    pages: pages.clone(),
                })
                .ok_or_else(|| ScanError::unreadable(path, "no such document"))
        }
    }

    fn tags(names: &[&str]) -> Vec<Tag> {
        names.iter().map(|n| Tag::from(*n)).collect()
    }

    fn paths(items: &[&str]) -> Vec<PathBuf> {
        items.iter().map(|s| PathBuf::from(*s)).collect()
    }

    const FULL: &str = "BT\n(Tumorfläche: ) Tj\n(8500 ) Tj\n[(Grading: ) -250.0 (2 )] TJ\nET";

    #[test]
    fn test_scan_complete_document() {
        let loader = MemoryLoader::default().with("a.pdf", &[FULL]);
        let doc = scan_document(&loader, Path::new("a.pdf"), &tags(&["Tumorfläche", "Grading"]))
            .unwrap();

        assert_eq!(doc.path, "a.pdf");
        assert_eq!(doc.get("Tumorfläche"), Some(&TagValue::Found("8500".into())));
        assert_eq!(doc.get("Grading"), Some(&TagValue::Found("2".into())));
        assert_eq!(doc.completeness(), Completeness::Complete);
    }

    #[test]
    fn test_label_and_value_on_different_pages() {
        let loader = MemoryLoader::default().with(
            "a.pdf",
            &["(Befund ) Tj\n(Tumorfläche: ) Tj", "(8500 ) Tj"],
        );
        let doc = scan_document(&loader, Path::new("a.pdf"), &tags(&["Tumorfläche"])).unwrap();

        assert_eq!(doc.get("Tumorfläche"), Some(&TagValue::Found("8500".into())));
    }

    #[test]
    fn test_document_without_pages() {
        let loader = MemoryLoader::default().with("blank.pdf", &[]);
        let doc = scan_document(&loader, Path::new("blank.pdf"), &tags(&["Grading"])).unwrap();

        assert_eq!(doc.values.len(), 1);
        assert_eq!(doc.completeness(), Completeness::Empty);
    }

    #[test]
    fn test_scan_batch_counters() {
        let loader = MemoryLoader::default()
            .with("a.pdf", &[FULL])
            .with("b.pdf", &["(Grading: ) Tj\n(3 ) Tj"])
            .with("c.pdf", &["(Befund ) Tj"]);
        let tag_list = tags(&["Tumorfläche", "Grading"]);

        let outcome = scan_documents(
            &loader,
            &paths(&["a.pdf", "b.pdf", "c.pdf"]),
            &tag_list,
            ScanOptions::default(),
        )
        .unwrap();

        assert_eq!(outcome.documents.len(), 3);
        assert!(outcome
            .documents
            .iter()
            .all(|d| d.values.len() == tag_list.len()));

        let c = &outcome.counters;
        assert_eq!(c.all, 3);
        assert_eq!(c.tags, 3);
        assert_eq!(c.hits("Tumorfläche"), Some(1));
        assert_eq!(c.hits("Grading"), Some(2));
        assert_eq!(c.incomplete, 2);
        assert_eq!(c.nothing, 1);
    }

    #[test]
    fn test_scan_order_preserved() {
        let loader = MemoryLoader::default()
            .with("z.pdf", &[FULL])
            .with("a.pdf", &[FULL]);

        let outcome = scan_documents(
            &loader,
            &paths(&["z.pdf", "a.pdf"]),
            &tags(&["Grading"]),
            ScanOptions::default(),
        )
        .unwrap();

        let order: Vec<&str> = outcome.documents.iter().map(|d| d.path.as_str()).collect();
        assert_eq!(order, vec!["z.pdf", "a.pdf"]);
    }

    #[test]
    fn test_unreadable_document_aborts() {
        let loader = MemoryLoader::default().with("a.pdf", &[FULL]);

        let result = scan_documents(
            &loader,
            &paths(&["a.pdf", "missing.pdf"]),
            &tags(&["Grading"]),
            ScanOptions::default(),
        );

        assert!(matches!(result, Err(ScanError::DocumentUnreadable { .. })));
    }

    #[test]
    fn test_unreadable_document_skipped() {
        let loader = MemoryLoader::default().with("a.pdf", &[FULL]);
        let options = ScanOptions {
            skip_unreadable: true,
            ..Default::default()
        };

        let outcome = scan_documents(
            &loader,
            &paths(&["missing.pdf", "a.pdf"]),
            &tags(&["Grading"]),
            options,
        )
        .unwrap();

        assert_eq!(outcome.documents.len(), 1);
        assert_eq!(outcome.skipped, vec![PathBuf::from("missing.pdf")]);
        assert_eq!(outcome.counters.all, 1);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_pooled_scan_matches_sequential() {
        let loader = MemoryLoader::default()
            .with("a.pdf", &[FULL])
            .with("b.pdf", &["(Befund ) Tj"])
            .with("c.pdf", &["(Grading: ) Tj\n(1 ) Tj"]);
        let batch = paths(&["a.pdf", "b.pdf", "c.pdf"]);
        let tag_list = tags(&["Tumorfläche", "Grading"]);

        let sequential =
            scan_documents(&loader, &batch, &tag_list, ScanOptions::default()).unwrap();
        let pooled = scan_documents(
            &loader,
            &batch,
            &tag_list,
            ScanOptions {
                jobs: 4,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(sequential.documents, pooled.documents);
        assert_eq!(sequential.counters, pooled.counters);
    }
}
