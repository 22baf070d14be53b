//! Shared test helpers: document fixtures and a fault-injecting store

#![allow(dead_code)]

use adkb_common::db::{
    EntityKind, GroupedColumn, NewRecord, RecentEntry, SqliteStore, Store, Tag,
};
use adkb_common::{Error, Result};
use adkb_import::models::KnowledgeBaseDocument;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// Research entry JSON in the curated document's shape
pub fn entry_json(title: &str, tags: &[&str]) -> Value {
    json!({
        "id": title.to_lowercase().replace(' ', "_"),
        "title": title,
        "authors": ["Edoardo G Ostinelli", "Marcel Schulze"],
        "journal": "The Lancet Psychiatry",
        "publication_date": "2025-01-01",
        "doi": "10.1016/S2215-0366(24)00360-2",
        "study_type": "systematic_review",
        "evidence_level": "1a",
        "sample_size": 14887,
        "target_population": {
            "age_range": "≥18 years",
            "gender": "51.3% male, 45.6% female",
            "occupation": "Mixed adult population",
            "adhd_subtype": "All subtypes"
        },
        "methodology": {
            "design": "Systematic review and component network meta-analysis",
            "duration": "≥1 week for medications",
            "primary_outcomes": ["ADHD core symptom severity"],
            "secondary_outcomes": ["Quality of life measures"]
        },
        "key_findings": {
            "primary_results": "Stimulants and atomoxetine showed beneficial effects",
            "effect_sizes": { "stimulants_self_reported": -0.39 },
            "clinical_significance": "First-line pharmacological treatments",
            "limitations": ["Short-term focus"]
        },
        "workplace_relevance": {
            "productivity_impact": "Short-term efficacy applicable to working adults",
            "accommodation_needs": ["Medication adherence support"],
            "career_implications": "Adherence concerns"
        },
        "quality_assessment": {
            "risk_of_bias": "low",
            "grade_rating": "moderate",
            "reviewer_notes": "Comprehensive methodology"
        },
        "clinical_applications": {
            "diagnostic_utility": "Supports treatment selection",
            "treatment_recommendations": ["Stimulants as first-line"],
            "monitoring_parameters": ["Symptom severity scales"]
        },
        "tags": tags,
        "added_date": "2025-09-15",
        "last_reviewed": "2025-09-15"
    })
}

pub fn document(entries: Vec<Value>) -> KnowledgeBaseDocument {
    KnowledgeBaseDocument {
        metadata: None,
        research_entries: entries,
    }
}

/// Store that delegates to SQLite but fails the N-th `create` (1-based)
pub struct FailingStore {
    inner: SqliteStore,
    fail_on_create: usize,
    creates: AtomicUsize,
}

impl FailingStore {
    pub fn new(inner: SqliteStore, fail_on_create: usize) -> Self {
        Self {
            inner,
            fail_on_create,
            creates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Store for FailingStore {
    async fn create(&self, record: NewRecord) -> Result<Uuid> {
        let n = self.creates.fetch_add(1, Ordering::SeqCst) + 1;
        if n == self.fail_on_create {
            return Err(Error::Internal(format!(
                "injected failure on create #{} ({})",
                n,
                record.kind().table_name()
            )));
        }
        self.inner.create(record).await
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        self.inner.find_tag_by_name(name).await
    }

    async fn count(&self, kind: EntityKind) -> Result<i64> {
        self.inner.count(kind).await
    }

    async fn count_grouped(&self, column: GroupedColumn) -> Result<Vec<(String, i64)>> {
        self.inner.count_grouped(column).await
    }

    async fn recent_entries(&self, limit: i64) -> Result<Vec<RecentEntry>> {
        self.inner.recent_entries(limit).await
    }

    async fn close(&self) {
        self.inner.close().await
    }
}
