//! Tag resolution
//!
//! A tag's value is the token right after the first occurrence of its label
//! token (`<tag>:`) in the document's merged token sequence.

use std::collections::HashMap;

use crate::core::model::{Tag, TagValue};

/// Index from label token to the token following its first occurrence
///
/// A label that is the last token has no successor and maps to `None`.
pub struct LabelIndex<'a> {
    successors: HashMap<&'a str, Option<&'a str>>,
}

impl<'a> LabelIndex<'a> {
    /// Build the index in a single pass over the tokens
    pub fn build(tokens: &'a [String]) -> Self {
        let mut successors = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            successors
                .entry(token.as_str())
                .or_insert_with(|| tokens.get(i + 1).map(String::as_str));
        }
        Self { successors }
    }

    pub fn value_for(&self, tag: &Tag) -> TagValue {
        match self.successors.get(tag.label().as_str()) {
            Some(Some(value)) => TagValue::Found((*value).to_string()),
            // Label missing, or last token without a successor
            _ => TagValue::NotFound,
        }
    }
}

/// Resolve every tag against a document's tokens, in tag order
pub fn resolve_tags(tokens: &[String], tags: &[Tag]) -> Vec<(Tag, TagValue)> {
    let index = LabelIndex::build(tokens);
    tags.iter()
        .map(|tag| (tag.clone(), index.value_for(tag)))
        .collect()
}
