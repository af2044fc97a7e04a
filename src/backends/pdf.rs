//! PDF page source
//!
//! Uses lopdf to walk the page tree and render each page's content stream as
//! one instruction per line, with string operands decoded to text. The
//! extractor only ever sees these lines.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

use crate::core::error::ScanError;

/// Per-page access to a document's rendered text
pub trait PageSource {
    /// Number of pages declared by the page tree
    fn page_count(&self) -> usize;

    /// Rendered content-stream lines of a 1-based page
    fn page_text(&self, page_number: usize) -> Result<String, ScanError>;
}

/// Opens documents for scanning
pub trait DocumentLoader: Sync {
    type Document: PageSource;

    fn load(&self, path: &Path) -> Result<Self::Document, ScanError>;
}

/// Loader backed by lopdf
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfLoader;

impl DocumentLoader for PdfLoader {
    type Document = PdfDocument;

    fn load(&self, path: &Path) -> Result<PdfDocument, ScanError> {
        PdfDocument::open(path)
    }
}

/// A loaded PDF with its pages resolved in page order
pub struct PdfDocument {
    path: std::path::PathBuf,
    inner: Document,
    page_ids: Vec<ObjectId>,
}

impl PdfDocument {
    pub fn open(path: &Path) -> Result<Self, ScanError> {
        let inner = Document::load(path).map_err(|e| ScanError::unreadable(path, e))?;
        Self::from_document(path, inner)
    }

    fn from_document(path: &Path, inner: Document) -> Result<Self, ScanError> {
        let count = declared_page_count(&inner).map_err(|e| ScanError::unreadable(path, e))?;

        // get_pages is keyed by 1-based page number
        let pages = inner.get_pages();
        let page_ids = (1..=count)
            .map(|n| {
                pages.get(&n).copied().ok_or_else(|| {
                    ScanError::unreadable(path, format!("page {} missing from page tree", n))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_path_buf(),
            inner,
            page_ids,
        })
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    fn page_text(&self, page_number: usize) -> Result<String, ScanError> {
        let page_id = page_number
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i))
            .ok_or_else(|| {
                ScanError::unreadable(&self.path, format!("no page {}", page_number))
            })?;

        let bytes = self
            .inner
            .get_page_content(*page_id)
            .map_err(|e| ScanError::unreadable(&self.path, e))?;
        let content = Content::decode(&bytes).map_err(|e| {
            ScanError::unreadable(
                &self.path,
                format!("page {} content stream: {}", page_number, e),
            )
        })?;

        Ok(render_operations(&content.operations))
    }
}

/// Read `/Root -> /Pages -> /Count`
fn declared_page_count(doc: &Document) -> Result<u32, String> {
    let root_id = doc
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|e| format!("missing /Root: {}", e))?;
    let pages_id = doc
        .get_dictionary(root_id)
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| format!("missing /Pages: {}", e))?;
    let count = doc
        .get_dictionary(pages_id)
        .and_then(|pages| pages.get(b"Count"))
        .and_then(Object::as_i64)
        .map_err(|e| format!("missing /Count: {}", e))?;

    u32::try_from(count).map_err(|_| format!("invalid /Count {}", count))
}

/// Render operations one per line
pub fn render_operations(operations: &[Operation]) -> String {
    operations
        .iter()
        .map(render_operation)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_operation(op: &Operation) -> String {
    match op.operator.as_str() {
        "Tj" | "'" | "\"" => match op.operands.last() {
            Some(Object::String(bytes, _)) => format!("({}) Tj", decode_text(bytes)),
            _ => render_generic(op),
        },
        "TJ" => match op.operands.first() {
            Some(Object::Array(items)) => {
                let parts: Vec<String> = items.iter().map(render_operand).collect();
                format!("[{}] TJ", parts.join(" "))
            }
            _ => render_generic(op),
        },
        _ => render_generic(op),
    }
}

fn render_generic(op: &Operation) -> String {
    let mut parts: Vec<String> = op.operands.iter().map(render_operand).collect();
    parts.push(op.operator.clone());
    parts.join(" ")
}

fn render_operand(obj: &Object) -> String {
    match obj {
        Object::Null => "null".to_string(),
        Object::Boolean(b) => b.to_string(),
        Object::Integer(i) => i.to_string(),
        Object::Real(r) => render_real(*r as f64),
        Object::Name(name) => format!("/{}", String::from_utf8_lossy(name)),
        Object::String(bytes, _) => format!("({})", decode_text(bytes)),
        Object::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_operand).collect();
            format!("[{}]", parts.join(" "))
        }
        Object::Dictionary(_) => "<<>>".to_string(),
        Object::Stream(_) => "stream".to_string(),
        Object::Reference((id, generation)) => format!("{} {} R", id, generation),
    }
}

/// Reals always carry a fraction so kerning reads as `-250.0`
fn render_real(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Decode a PDF string operand
///
/// UTF-16BE when it starts with a byte order mark, otherwise one byte per
/// character (Latin-1, which agrees with WinAnsi for umlauts).
pub fn decode_text(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| b as char).collect()
}
