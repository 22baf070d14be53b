//! Post-load verification
//!
//! Read-only: counts what the store holds at the moment of the query,
//! including rows left behind by earlier failed runs.

use adkb_common::db::{EntityKind, GroupedColumn, Store};
use std::sync::Arc;

use crate::error::ImportResult;
use crate::models::ImportSummary;

/// Entries listed under "Recent additions"
pub const RECENT_ADDITIONS_LIMIT: i64 = 5;

pub struct ImportReporter {
    store: Arc<dyn Store>,
}

impl ImportReporter {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn report(&self) -> ImportResult<ImportSummary> {
        let mut child_records = 0;
        for kind in EntityKind::CHILDREN {
            child_records += self.store.count(kind).await?;
        }

        Ok(ImportSummary {
            research_entries: self.store.count(EntityKind::ResearchEntry).await?,
            tags: self.store.count(EntityKind::Tag).await?,
            assessment_tools: self.store.count(EntityKind::AssessmentTool).await?,
            treatment_recommendations: self
                .store
                .count(EntityKind::TreatmentRecommendation)
                .await?,
            child_records,
            evidence_levels: self.store.count_grouped(GroupedColumn::EvidenceLevel).await?,
            study_types: self.store.count_grouped(GroupedColumn::StudyType).await?,
            recent_additions: self.store.recent_entries(RECENT_ADDITIONS_LIMIT).await?,
        })
    }
}
