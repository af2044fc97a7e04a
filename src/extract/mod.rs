//! Extract module - Turning rendered page text into tag values
//!
//! Provides:
//! - tokens: Reconstruct shown text tokens from content-stream lines
//! - resolve: Associate each tag with the token that follows its label

pub mod resolve;
pub mod tokens;
