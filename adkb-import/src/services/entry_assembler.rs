//! Research entry assembly
//!
//! **Algorithm** (per source entry, strictly sequential):
//! 1. Persist the six owned children, collecting their keys
//! 2. Resolve tag names in order, collapsing repeated names to one link
//! 3. Canonicalize study type and evidence level
//! 4. Parse the publication, added and last-reviewed dates
//! 5. Persist the entry row with its foreign keys and tag links
//!
//! Nothing is rolled back when a later step fails: children written in step 1
//! (and tags created in step 2) stay in the store.

use adkb_common::db::{EvidenceLevel, NewRecord, NewResearchEntry, Store, StudyType, Tag};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult};
use crate::models::{ResearchEntry, SourceEntry};
use crate::services::child_builder::ChildEntityBuilder;
use crate::services::enum_canonicalizer::canonicalize;
use crate::services::tag_resolver::TagResolver;

pub struct EntryAssembler {
    store: Arc<dyn Store>,
    children: ChildEntityBuilder,
    tags: TagResolver,
    enum_fallbacks: usize,
    tag_references: usize,
}

impl EntryAssembler {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            children: ChildEntityBuilder::new(store.clone()),
            tags: TagResolver::new(store.clone()),
            store,
            enum_fallbacks: 0,
            tag_references: 0,
        }
    }

    /// Persist one source entry with its children and tag links
    pub async fn assemble(&mut self, source: &SourceEntry) -> ImportResult<ResearchEntry> {
        let children = self.children.build_all(source).await?;

        let tags = self.resolve_tags(&source.tags).await?;

        let study_type = canonicalize::<StudyType>(&source.study_type);
        let evidence_level = canonicalize::<EvidenceLevel>(&source.evidence_level);
        self.enum_fallbacks += usize::from(study_type.defaulted) + usize::from(evidence_level.defaulted);

        let publication_date = parse_date_field(source, "publication_date", &source.publication_date)?;
        let added_date = parse_date_field(source, "added_date", &source.added_date)?;
        let last_reviewed = parse_date_field(source, "last_reviewed", &source.last_reviewed)?;

        let record = NewResearchEntry {
            source_key: source.id.clone(),
            title: source.title.clone(),
            authors: source.authors.clone(),
            journal: source.journal.clone(),
            publication_date,
            doi: source.doi.clone(),
            study_type: study_type.value,
            evidence_level: evidence_level.value,
            sample_size: source.sample_size,
            added_date,
            last_reviewed,
            children,
            tag_ids: tags.iter().map(|t| t.id).collect(),
        };

        let id = self.store.create(NewRecord::ResearchEntry(record.clone())).await?;

        Ok(ResearchEntry { id, record, tags })
    }

    /// Resolve names in order; a name repeated within one entry links once
    async fn resolve_tags(&mut self, names: &[String]) -> ImportResult<Vec<Tag>> {
        let mut seen = HashSet::new();
        let mut tags = Vec::with_capacity(names.len());

        for name in names {
            self.tag_references += 1;
            if !seen.insert(name.as_str()) {
                continue;
            }
            tags.push(self.tags.resolve(name).await?);
        }

        Ok(tags)
    }

    /// Tags created so far this run
    pub fn tags_created(&self) -> usize {
        self.tags.created_count()
    }

    /// Tag names processed so far, counting repeats
    pub fn tag_references(&self) -> usize {
        self.tag_references
    }

    /// Enumeration codes that fell back to their default so far
    pub fn enum_fallbacks(&self) -> usize {
        self.enum_fallbacks
    }
}

fn parse_date_field(source: &SourceEntry, field: &'static str, raw: &str) -> ImportResult<NaiveDate> {
    parse_source_date(raw).ok_or_else(|| ImportError::MalformedDate {
        title: source.title.clone(),
        field,
        value: raw.to_string(),
    })
}

/// Parse a curated date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (reduced to their UTC date) and
/// zone-less `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_source_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.naive_utc().date());
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}
