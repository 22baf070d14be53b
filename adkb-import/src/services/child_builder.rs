//! Owned child records of a research entry
//!
//! Each of the six sub-objects becomes exactly one new row. Children are
//! never looked up or shared; a failed insert propagates as a store error.

use adkb_common::db::{
    ChildKeys, ClinicalApplications, KeyFindings, Methodology, NewRecord, QualityAssessment, Store,
    TargetPopulation, WorkplaceRelevance,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ImportResult;
use crate::models::SourceEntry;
use crate::services::enum_canonicalizer::case_fold;

pub struct ChildEntityBuilder {
    store: Arc<dyn Store>,
}

impl ChildEntityBuilder {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Persist all six children of `entry`
    ///
    /// Runs sequentially; a failure leaves the children created so far in
    /// the store.
    pub async fn build_all(&self, entry: &SourceEntry) -> ImportResult<ChildKeys> {
        Ok(ChildKeys {
            target_population_id: self
                .build_target_population(&entry.target_population)
                .await?,
            methodology_id: self.build_methodology(&entry.methodology).await?,
            key_findings_id: self.build_key_findings(&entry.key_findings).await?,
            workplace_relevance_id: self
                .build_workplace_relevance(&entry.workplace_relevance)
                .await?,
            quality_assessment_id: self
                .build_quality_assessment(&entry.quality_assessment)
                .await?,
            clinical_applications_id: self
                .build_clinical_applications(&entry.clinical_applications)
                .await?,
        })
    }

    pub async fn build_target_population(&self, source: &TargetPopulation) -> ImportResult<Uuid> {
        self.create(NewRecord::TargetPopulation(source.clone())).await
    }

    pub async fn build_methodology(&self, source: &Methodology) -> ImportResult<Uuid> {
        self.create(NewRecord::Methodology(source.clone())).await
    }

    pub async fn build_key_findings(&self, source: &KeyFindings) -> ImportResult<Uuid> {
        self.create(NewRecord::KeyFindings(source.clone())).await
    }

    pub async fn build_workplace_relevance(
        &self,
        source: &WorkplaceRelevance,
    ) -> ImportResult<Uuid> {
        self.create(NewRecord::WorkplaceRelevance(source.clone())).await
    }

    /// Risk of bias and GRADE rating are stored upper-cased
    pub async fn build_quality_assessment(&self, source: &QualityAssessment) -> ImportResult<Uuid> {
        let record = QualityAssessment {
            risk_of_bias: case_fold(&source.risk_of_bias),
            grade_rating: case_fold(&source.grade_rating),
            reviewer_notes: source.reviewer_notes.clone(),
        };
        self.create(NewRecord::QualityAssessment(record)).await
    }

    pub async fn build_clinical_applications(
        &self,
        source: &ClinicalApplications,
    ) -> ImportResult<Uuid> {
        self.create(NewRecord::ClinicalApplications(source.clone())).await
    }

    async fn create(&self, record: NewRecord) -> ImportResult<Uuid> {
        Ok(self.store.create(record).await?)
    }
}
