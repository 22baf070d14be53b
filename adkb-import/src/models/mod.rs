//! Data models for adkb-import
//!
//! - Source document shapes (what the curated JSON looks like)
//! - Assembled entries and run summaries (what the import produces)

pub mod import_summary;
pub mod research_entry;
pub mod source;

pub use import_summary::{CatalogCounts, ImportSummary, RunStatistics};
pub use research_entry::ResearchEntry;
pub use source::{DocumentMetadata, KnowledgeBaseDocument, SourceEntry};
