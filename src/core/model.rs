//! Extraction Result Model
//!
//! Every scanned document is reduced to a [`DocumentResult`] before it reaches
//! the report assembler. Run-wide aggregates live in [`Counters`].

use serde::Serialize;

/// Text used in place of a value when a tag's label never occurs in a document
pub const NOT_FOUND: &str = "not found";

/// A field label to search for, e.g. `Tumorfläche`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The token that introduces this tag's value in rendered text (`<tag>:`)
    pub fn label(&self) -> String {
        format!("{}:", self.0)
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value resolved for one tag in one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Found(String),
    NotFound,
}

impl TagValue {
    pub fn is_found(&self) -> bool {
        matches!(self, TagValue::Found(_))
    }

    /// Text shown for this value; the sentinel for missing tags
    pub fn as_str(&self) -> &str {
        match self {
            TagValue::Found(value) => value,
            TagValue::NotFound => NOT_FOUND,
        }
    }
}

/// How many of the requested tags a document yielded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    /// Every tag was found
    Complete,
    /// At least one tag, but not all, was found
    Incomplete,
    /// No tag was found
    Empty,
}

/// Extraction outcome of one document
///
/// Holds exactly one entry per requested tag, in request order. Duplicate
/// tags are kept as independent entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentResult {
    /// Document path as it was handed to the scanner
    pub path: String,

    /// Resolved values, parallel to the requested tag list
    pub values: Vec<(Tag, TagValue)>,
}

impl DocumentResult {
    pub fn new(path: impl Into<String>, values: Vec<(Tag, TagValue)>) -> Self {
        Self {
            path: path.into(),
            values,
        }
    }

    /// Number of tags that resolved to a value
    pub fn found_count(&self) -> usize {
        self.values.iter().filter(|(_, v)| v.is_found()).count()
    }

    /// Look up the first entry for a tag name
    #[allow(dead_code)]
    pub fn get(&self, tag: &str) -> Option<&TagValue> {
        self.values
            .iter()
            .find(|(t, _)| t.as_str() == tag)
            .map(|(_, v)| v)
    }

    pub fn completeness(&self) -> Completeness {
        let found = self.found_count();
        if found == 0 {
            Completeness::Empty
        } else if found < self.values.len() {
            Completeness::Incomplete
        } else {
            Completeness::Complete
        }
    }
}

/// Hits for a single tag across the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: Tag,
    pub count: usize,
}

/// Run-wide aggregate counters
///
/// `nothing` is a subset of `incomplete`: an empty document is counted in
/// both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// Documents scanned
    pub all: usize,

    /// Tag hits over all documents
    pub tags: usize,

    /// Hits per requested tag, in request order
    pub per_tag: Vec<TagCount>,

    /// Documents missing at least one tag
    pub incomplete: usize,

    /// Documents without any tag
    pub nothing: usize,
}

impl Counters {
    /// Zeroed counters for the given tag list
    pub fn new(tags: &[Tag]) -> Self {
        Self {
            per_tag: tags
                .iter()
                .map(|tag| TagCount {
                    tag: tag.clone(),
                    count: 0,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// Account for one finished document
    pub fn record(&mut self, result: &DocumentResult) {
        for (slot, (_, value)) in self.per_tag.iter_mut().zip(&result.values) {
            if value.is_found() {
                slot.count += 1;
                self.tags += 1;
            }
        }

        match result.completeness() {
            Completeness::Empty => {
                self.nothing += 1;
                self.incomplete += 1;
            }
            Completeness::Incomplete => self.incomplete += 1,
            Completeness::Complete => {}
        }

        self.all += 1;
    }

    /// Hits recorded for the first tag with this name
    #[allow(dead_code)]
    pub fn hits(&self, tag: &str) -> Option<usize> {
        self.per_tag
            .iter()
            .find(|c| c.tag.as_str() == tag)
            .map(|c| c.count)
    }
}
