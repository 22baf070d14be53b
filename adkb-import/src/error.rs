//! Error types for adkb-import
//!
//! The import has a single failure domain: any of these aborts the run.
//! Unknown enumeration codes are not errors (they fall back to defaults).

use std::path::PathBuf;
use thiserror::Error;

/// Import error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// Source document could not be read from disk
    #[error("Failed to read {path}: {source}")]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source document is not a knowledge-base JSON document
    #[error("Failed to parse knowledge base document: {0}")]
    ParseDocument(#[source] serde_json::Error),

    /// One research entry does not have the expected shape
    #[error("Research entry #{index} is malformed: {source}")]
    MalformedEntry {
        /// 1-based position in the document
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A date field could not be parsed (no default date is substituted)
    #[error("Research entry '{title}' has an unparseable {field}: '{value}'")]
    MalformedDate {
        title: String,
        field: &'static str,
        value: String,
    },

    /// Store write, lookup or count failed
    #[error("Store error: {0}")]
    Store(#[from] adkb_common::Error),
}

/// Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;
