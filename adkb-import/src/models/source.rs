//! Source knowledge-base document
//!
//! Research entries are kept as raw JSON values until the pipeline reaches
//! them, so a malformed entry fails at its own position in the run instead
//! of rejecting the whole document up front.

use adkb_common::db::{
    ClinicalApplications, KeyFindings, Methodology, QualityAssessment, TargetPopulation,
    WorkplaceRelevance,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ImportError, ImportResult};

/// Top-level knowledge-base document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeBaseDocument {
    #[serde(default)]
    pub metadata: Option<DocumentMetadata>,
    /// Undecoded research entries, in document order
    pub research_entries: Vec<serde_json::Value>,
}

/// Curator bookkeeping carried by the document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub version: Option<String>,
    pub last_updated: Option<String>,
}

impl KnowledgeBaseDocument {
    /// Read and parse the document at `path`
    pub fn load(path: &Path) -> ImportResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ImportError::ReadDocument {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> ImportResult<Self> {
        serde_json::from_str(content).map_err(ImportError::ParseDocument)
    }

    /// Decode the entry at `index` (0-based)
    ///
    /// Errors report the 1-based position.
    pub fn decode_entry(&self, index: usize) -> ImportResult<SourceEntry> {
        let value = self.research_entries.get(index).cloned().unwrap_or_default();
        serde_json::from_value(value).map_err(|source| ImportError::MalformedEntry {
            index: index + 1,
            source,
        })
    }
}

/// One research entry as curated in the source document
///
/// Enumeration codes and dates stay raw here; canonicalization and date
/// parsing happen during assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceEntry {
    /// Curator-assigned identifier, e.g. "lancet_2025_ostinelli_network_meta"
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub publication_date: String,
    #[serde(default)]
    pub doi: Option<String>,
    pub study_type: String,
    pub evidence_level: String,
    #[serde(default)]
    pub sample_size: Option<i64>,
    pub target_population: TargetPopulation,
    pub methodology: Methodology,
    pub key_findings: KeyFindings,
    pub workplace_relevance: WorkplaceRelevance,
    pub quality_assessment: QualityAssessment,
    pub clinical_applications: ClinicalApplications,
    #[serde(default)]
    pub tags: Vec<String>,
    pub added_date: String,
    pub last_reviewed: String,
}
