//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Extraction result model (DocumentResult, Counters)
//! - Error taxonomy for structural failures
//! - Path normalization utilities

pub mod error;
pub mod model;
pub mod paths;
