//! Database models
//!
//! Record payloads written through [`crate::db::Store`] and the canonical
//! enumerations stored in constrained columns. The child record types double
//! as the source document's sub-object shapes, so they derive `Deserialize`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Study design of a research entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudyType {
    SystematicReview,
    MetaAnalysis,
    Rct,
    Cohort,
    CaseControl,
}

impl StudyType {
    pub const ALL: [StudyType; 5] = [
        StudyType::SystematicReview,
        StudyType::MetaAnalysis,
        StudyType::Rct,
        StudyType::Cohort,
        StudyType::CaseControl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyType::SystematicReview => "SYSTEMATIC_REVIEW",
            StudyType::MetaAnalysis => "META_ANALYSIS",
            StudyType::Rct => "RCT",
            StudyType::Cohort => "COHORT",
            StudyType::CaseControl => "CASE_CONTROL",
        }
    }
}

/// Oxford CEBM level of evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceLevel {
    #[serde(rename = "LEVEL_1A")]
    Level1A,
    #[serde(rename = "LEVEL_1B")]
    Level1B,
    #[serde(rename = "LEVEL_2A")]
    Level2A,
    #[serde(rename = "LEVEL_2B")]
    Level2B,
    #[serde(rename = "LEVEL_3A")]
    Level3A,
    #[serde(rename = "LEVEL_3B")]
    Level3B,
    #[serde(rename = "LEVEL_4")]
    Level4,
    #[serde(rename = "LEVEL_5")]
    Level5,
}

impl EvidenceLevel {
    pub const ALL: [EvidenceLevel; 8] = [
        EvidenceLevel::Level1A,
        EvidenceLevel::Level1B,
        EvidenceLevel::Level2A,
        EvidenceLevel::Level2B,
        EvidenceLevel::Level3A,
        EvidenceLevel::Level3B,
        EvidenceLevel::Level4,
        EvidenceLevel::Level5,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceLevel::Level1A => "LEVEL_1A",
            EvidenceLevel::Level1B => "LEVEL_1B",
            EvidenceLevel::Level2A => "LEVEL_2A",
            EvidenceLevel::Level2B => "LEVEL_2B",
            EvidenceLevel::Level3A => "LEVEL_3A",
            EvidenceLevel::Level3B => "LEVEL_3B",
            EvidenceLevel::Level4 => "LEVEL_4",
            EvidenceLevel::Level5 => "LEVEL_5",
        }
    }
}

/// Treatment modality of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TreatmentType {
    Pharmacological,
    Psychological,
    Neurostimulatory,
    Combined,
}

impl TreatmentType {
    pub const ALL: [TreatmentType; 4] = [
        TreatmentType::Pharmacological,
        TreatmentType::Psychological,
        TreatmentType::Neurostimulatory,
        TreatmentType::Combined,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TreatmentType::Pharmacological => "PHARMACOLOGICAL",
            TreatmentType::Psychological => "PSYCHOLOGICAL",
            TreatmentType::Neurostimulatory => "NEUROSTIMULATORY",
            TreatmentType::Combined => "COMBINED",
        }
    }
}

/// GRADE recommendation strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationStrength {
    StrongFor,
    WeakFor,
    WeakAgainst,
    StrongAgainst,
}

impl RecommendationStrength {
    pub const ALL: [RecommendationStrength; 4] = [
        RecommendationStrength::StrongFor,
        RecommendationStrength::WeakFor,
        RecommendationStrength::WeakAgainst,
        RecommendationStrength::StrongAgainst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationStrength::StrongFor => "STRONG_FOR",
            RecommendationStrength::WeakFor => "WEAK_FOR",
            RecommendationStrength::WeakAgainst => "WEAK_AGAINST",
            RecommendationStrength::StrongAgainst => "STRONG_AGAINST",
        }
    }
}

/// Displays the symbol exactly as stored in the database
macro_rules! stored_symbol {
    ($ty:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

stored_symbol!(StudyType);
stored_symbol!(EvidenceLevel);
stored_symbol!(TreatmentType);
stored_symbol!(RecommendationStrength);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPopulation {
    pub age_range: String,
    pub gender: String,
    pub occupation: String,
    pub adhd_subtype: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Methodology {
    pub design: String,
    pub duration: String,
    pub primary_outcomes: Vec<String>,
    pub secondary_outcomes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFindings {
    pub primary_results: String,
    /// Named effect estimates, e.g. `{"cbt_clinician_reported": -0.76}`
    pub effect_sizes: serde_json::Value,
    pub clinical_significance: String,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkplaceRelevance {
    pub productivity_impact: String,
    pub accommodation_needs: Vec<String>,
    pub career_implications: String,
}

/// Quality appraisal; `risk_of_bias` and `grade_rating` are stored upper-cased
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityAssessment {
    pub risk_of_bias: String,
    pub grade_rating: String,
    pub reviewer_notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalApplications {
    pub diagnostic_utility: String,
    pub treatment_recommendations: Vec<String>,
    pub monitoring_parameters: Vec<String>,
}

/// Shared tag, identified by its exact name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
}

/// Keys of the six owned child rows of one research entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildKeys {
    pub target_population_id: Uuid,
    pub methodology_id: Uuid,
    pub key_findings_id: Uuid,
    pub workplace_relevance_id: Uuid,
    pub quality_assessment_id: Uuid,
    pub clinical_applications_id: Uuid,
}

/// Research entry row with its canonicalized fields, foreign keys and tag links
#[derive(Debug, Clone, PartialEq)]
pub struct NewResearchEntry {
    /// Curator-assigned identifier from the source document, if any
    pub source_key: Option<String>,
    pub title: String,
    pub authors: Vec<String>,
    pub journal: String,
    pub publication_date: NaiveDate,
    pub doi: Option<String>,
    pub study_type: StudyType,
    pub evidence_level: EvidenceLevel,
    pub sample_size: Option<i64>,
    pub added_date: NaiveDate,
    pub last_reviewed: NaiveDate,
    pub children: ChildKeys,
    /// Linked tags, already free of duplicates
    pub tag_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PsychometricProperties {
    pub reliability: String,
    pub validity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentTool {
    pub name: String,
    pub acronym: String,
    pub purpose: String,
    pub target_population: String,
    /// Minutes
    pub administration_time: i64,
    pub domains: Vec<String>,
    pub psychometric_properties: PsychometricProperties,
    pub clinical_utility: String,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreatmentRecommendation {
    pub condition: String,
    pub treatment_type: TreatmentType,
    pub intervention_name: String,
    pub evidence_level: EvidenceLevel,
    pub effect_size: f64,
    pub recommendation_strength: RecommendationStrength,
    pub target_population: String,
    pub contraindications: Vec<String>,
    pub side_effects: Vec<String>,
    pub monitoring_requirements: Vec<String>,
}

/// Entity kinds known to the store, one table each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    TargetPopulation,
    Methodology,
    KeyFindings,
    WorkplaceRelevance,
    QualityAssessment,
    ClinicalApplications,
    Tag,
    ResearchEntry,
    AssessmentTool,
    TreatmentRecommendation,
}

impl EntityKind {
    /// The six kinds owned 1:1 by a research entry
    pub const CHILDREN: [EntityKind; 6] = [
        EntityKind::TargetPopulation,
        EntityKind::Methodology,
        EntityKind::KeyFindings,
        EntityKind::WorkplaceRelevance,
        EntityKind::QualityAssessment,
        EntityKind::ClinicalApplications,
    ];

    pub fn table_name(&self) -> &'static str {
        match self {
            EntityKind::TargetPopulation => "target_populations",
            EntityKind::Methodology => "methodologies",
            EntityKind::KeyFindings => "key_findings",
            EntityKind::WorkplaceRelevance => "workplace_relevance",
            EntityKind::QualityAssessment => "quality_assessments",
            EntityKind::ClinicalApplications => "clinical_applications",
            EntityKind::Tag => "tags",
            EntityKind::ResearchEntry => "research_entries",
            EntityKind::AssessmentTool => "assessment_tools",
            EntityKind::TreatmentRecommendation => "treatment_recommendations",
        }
    }
}

/// Payload for [`crate::db::Store::create`]
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecord {
    TargetPopulation(TargetPopulation),
    Methodology(Methodology),
    KeyFindings(KeyFindings),
    WorkplaceRelevance(WorkplaceRelevance),
    QualityAssessment(QualityAssessment),
    ClinicalApplications(ClinicalApplications),
    Tag { name: String },
    ResearchEntry(NewResearchEntry),
    AssessmentTool(AssessmentTool),
    TreatmentRecommendation(TreatmentRecommendation),
}

impl NewRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::TargetPopulation(_) => EntityKind::TargetPopulation,
            NewRecord::Methodology(_) => EntityKind::Methodology,
            NewRecord::KeyFindings(_) => EntityKind::KeyFindings,
            NewRecord::WorkplaceRelevance(_) => EntityKind::WorkplaceRelevance,
            NewRecord::QualityAssessment(_) => EntityKind::QualityAssessment,
            NewRecord::ClinicalApplications(_) => EntityKind::ClinicalApplications,
            NewRecord::Tag { .. } => EntityKind::Tag,
            NewRecord::ResearchEntry(_) => EntityKind::ResearchEntry,
            NewRecord::AssessmentTool(_) => EntityKind::AssessmentTool,
            NewRecord::TreatmentRecommendation(_) => EntityKind::TreatmentRecommendation,
        }
    }
}

/// Research entry columns that can be tallied with `GROUP BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupedColumn {
    StudyType,
    EvidenceLevel,
}

impl GroupedColumn {
    pub fn column_name(&self) -> &'static str {
        match self {
            GroupedColumn::StudyType => "study_type",
            GroupedColumn::EvidenceLevel => "evidence_level",
        }
    }

    /// `ORDER BY` clause for the tally
    ///
    /// Evidence levels read best in level order; study types most frequent
    /// first, ties broken by value.
    pub fn order_by(&self) -> &'static str {
        match self {
            GroupedColumn::StudyType => "COUNT(*) DESC, study_type",
            GroupedColumn::EvidenceLevel => "evidence_level",
        }
    }
}

/// Title and added date of a recently added research entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntry {
    pub title: String,
    pub added_date: NaiveDate,
}
