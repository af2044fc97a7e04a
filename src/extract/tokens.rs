//! Token extraction
//!
//! Rendered page text arrives as one content-stream instruction per line.
//! Two text-show shapes are recognised:
//!
//! ```text
//! (Tumorfläche: ) Tj
//! [(Tumor ) -250.0 (fläche: )] TJ
//! ```
//!
//! The first yields one token, the second yields the two runs around the
//! kerning adjustment. Every other line is positioning or graphics and is
//! dropped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Simple text show: `(<payload> )`
pub static SIMPLE_SHOW_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\((.*) \)").expect("Invalid SIMPLE_SHOW_RE regex"));

/// Kerned text show: `[(<payload1> ) -<number> (<payload2> )]`
pub static KERNED_SHOW_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\((.*) \) -\d+(?:\.\d+)? \((.*) \)\]").expect("Invalid KERNED_SHOW_RE regex")
});

/// Tokens shown by a single instruction line
pub fn line_tokens(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();

    if let Some(caps) = SIMPLE_SHOW_RE.captures(line) {
        if let Some(m) = caps.get(1) {
            tokens.push(m.as_str().to_string());
        }
    }

    if let Some(caps) = KERNED_SHOW_RE.captures(line) {
        for group in 1..=2 {
            if let Some(m) = caps.get(group) {
                tokens.push(m.as_str().to_string());
            }
        }
    }

    tokens
}

/// Extract the shown text tokens of one page, in reading order
pub fn extract_tokens(page_text: &str) -> Vec<String> {
    page_text.lines().flat_map(line_tokens).collect()
}
