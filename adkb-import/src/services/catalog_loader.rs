//! Standalone catalog loading
//!
//! Writes the seed catalogs unconditionally, without checking for rows from
//! earlier runs.

use adkb_common::db::{NewRecord, Store};
use std::sync::Arc;
use tracing::info;

use crate::catalog;
use crate::error::ImportResult;
use crate::models::CatalogCounts;

pub struct CatalogLoader {
    store: Arc<dyn Store>,
}

impl CatalogLoader {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn load_catalogs(&self) -> ImportResult<CatalogCounts> {
        let mut counts = CatalogCounts::default();

        for tool in catalog::assessment_tools() {
            self.store.create(NewRecord::AssessmentTool(tool)).await?;
            counts.assessment_tools += 1;
        }

        for recommendation in catalog::treatment_recommendations() {
            self.store
                .create(NewRecord::TreatmentRecommendation(recommendation))
                .await?;
            counts.treatment_recommendations += 1;
        }

        info!(
            "Loaded {} assessment tools and {} treatment recommendations",
            counts.assessment_tools, counts.treatment_recommendations
        );

        Ok(counts)
    }
}
