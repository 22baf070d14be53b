//! Store capability and its SQLite implementation
//!
//! The importer only ever creates rows, looks tags up by name and counts
//! rows. Everything it needs from persistence goes through [`Store`], so the
//! pipeline can be driven against any backend (tests wrap the SQLite store to
//! inject failures).

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::debug;
use uuid::Uuid;

use crate::db::init::{init_database, init_memory_database};
use crate::db::models::{
    AssessmentTool, ClinicalApplications, EntityKind, GroupedColumn, KeyFindings, Methodology,
    NewRecord, NewResearchEntry, QualityAssessment, RecentEntry, Tag, TargetPopulation,
    TreatmentRecommendation, WorkplaceRelevance,
};
use crate::{Error, Result};

/// Persistence capability consumed by the importer
#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a new row and return its generated key
    ///
    /// For [`NewRecord::ResearchEntry`] the tag links are attached in the
    /// same call.
    async fn create(&self, record: NewRecord) -> Result<Uuid>;

    /// Look up a tag by exact (case-sensitive) name
    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>>;

    /// Number of rows of one kind
    async fn count(&self, kind: EntityKind) -> Result<i64>;

    /// Research entry counts per distinct value of `column`, in the
    /// column's [`GroupedColumn::order_by`] order
    async fn count_grouped(&self, column: GroupedColumn) -> Result<Vec<(String, i64)>>;

    /// The `limit` research entries with the latest added date, newest first
    async fn recent_entries(&self, limit: i64) -> Result<Vec<RecentEntry>>;

    /// Release the underlying connection(s)
    async fn close(&self);
}

/// SQLite-backed [`Store`]
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an already initialized pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (or create) the database file and its schema
    pub async fn open(db_path: &Path) -> Result<Self> {
        Ok(Self::new(init_database(db_path).await?))
    }

    /// Private in-memory store with the full schema
    pub async fn open_in_memory() -> Result<Self> {
        Ok(Self::new(init_memory_database().await?))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn insert_target_population(&self, guid: &str, r: &TargetPopulation) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO target_populations (guid, age_range, gender, occupation, adhd_subtype)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.age_range)
        .bind(&r.gender)
        .bind(&r.occupation)
        .bind(&r.adhd_subtype)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_methodology(&self, guid: &str, r: &Methodology) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO methodologies (guid, design, duration, primary_outcomes, secondary_outcomes)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.design)
        .bind(&r.duration)
        .bind(to_json(&r.primary_outcomes)?)
        .bind(to_json(&r.secondary_outcomes)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_key_findings(&self, guid: &str, r: &KeyFindings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO key_findings (guid, primary_results, effect_sizes, clinical_significance, limitations)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.primary_results)
        .bind(to_json(&r.effect_sizes)?)
        .bind(&r.clinical_significance)
        .bind(to_json(&r.limitations)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_workplace_relevance(&self, guid: &str, r: &WorkplaceRelevance) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO workplace_relevance (guid, productivity_impact, accommodation_needs, career_implications)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.productivity_impact)
        .bind(to_json(&r.accommodation_needs)?)
        .bind(&r.career_implications)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_quality_assessment(&self, guid: &str, r: &QualityAssessment) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO quality_assessments (guid, risk_of_bias, grade_rating, reviewer_notes)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.risk_of_bias)
        .bind(&r.grade_rating)
        .bind(&r.reviewer_notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_clinical_applications(
        &self,
        guid: &str,
        r: &ClinicalApplications,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO clinical_applications (guid, diagnostic_utility, treatment_recommendations, monitoring_parameters)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.diagnostic_utility)
        .bind(to_json(&r.treatment_recommendations)?)
        .bind(to_json(&r.monitoring_parameters)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_tag(&self, guid: &str, name: &str) -> Result<()> {
        sqlx::query("INSERT INTO tags (guid, name) VALUES (?, ?)")
            .bind(guid)
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert the entry row and its tag links in one transaction
    async fn insert_research_entry(&self, guid: &str, r: &NewResearchEntry) -> Result<()> {
        let authors = to_json(&r.authors)?;
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO research_entries (
                guid, source_key, title, authors, journal, publication_date, doi,
                study_type, evidence_level, sample_size, added_date, last_reviewed,
                target_population_id, methodology_id, key_findings_id,
                workplace_relevance_id, quality_assessment_id, clinical_applications_id
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.source_key)
        .bind(&r.title)
        .bind(&authors)
        .bind(&r.journal)
        .bind(r.publication_date)
        .bind(&r.doi)
        .bind(r.study_type.as_str())
        .bind(r.evidence_level.as_str())
        .bind(r.sample_size)
        .bind(r.added_date)
        .bind(r.last_reviewed)
        .bind(r.children.target_population_id.to_string())
        .bind(r.children.methodology_id.to_string())
        .bind(r.children.key_findings_id.to_string())
        .bind(r.children.workplace_relevance_id.to_string())
        .bind(r.children.quality_assessment_id.to_string())
        .bind(r.children.clinical_applications_id.to_string())
        .execute(&mut *tx)
        .await?;

        for tag_id in &r.tag_ids {
            sqlx::query("INSERT INTO research_entry_tags (entry_id, tag_id) VALUES (?, ?)")
                .bind(guid)
                .bind(tag_id.to_string())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn insert_assessment_tool(&self, guid: &str, r: &AssessmentTool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO assessment_tools (
                guid, name, acronym, purpose, target_population, administration_time,
                domains, psychometric_properties, clinical_utility, limitations
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.name)
        .bind(&r.acronym)
        .bind(&r.purpose)
        .bind(&r.target_population)
        .bind(r.administration_time)
        .bind(to_json(&r.domains)?)
        .bind(to_json(&r.psychometric_properties)?)
        .bind(&r.clinical_utility)
        .bind(to_json(&r.limitations)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn insert_treatment_recommendation(
        &self,
        guid: &str,
        r: &TreatmentRecommendation,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO treatment_recommendations (
                guid, condition, treatment_type, intervention_name, evidence_level,
                effect_size, recommendation_strength, target_population,
                contraindications, side_effects, monitoring_requirements
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(guid)
        .bind(&r.condition)
        .bind(r.treatment_type.as_str())
        .bind(&r.intervention_name)
        .bind(r.evidence_level.as_str())
        .bind(r.effect_size)
        .bind(r.recommendation_strength.as_str())
        .bind(&r.target_population)
        .bind(to_json(&r.contraindications)?)
        .bind(to_json(&r.side_effects)?)
        .bind(to_json(&r.monitoring_requirements)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn create(&self, record: NewRecord) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let guid = id.to_string();

        match &record {
            NewRecord::TargetPopulation(r) => self.insert_target_population(&guid, r).await?,
            NewRecord::Methodology(r) => self.insert_methodology(&guid, r).await?,
            NewRecord::KeyFindings(r) => self.insert_key_findings(&guid, r).await?,
            NewRecord::WorkplaceRelevance(r) => self.insert_workplace_relevance(&guid, r).await?,
            NewRecord::QualityAssessment(r) => self.insert_quality_assessment(&guid, r).await?,
            NewRecord::ClinicalApplications(r) => {
                self.insert_clinical_applications(&guid, r).await?
            }
            NewRecord::Tag { name } => self.insert_tag(&guid, name).await?,
            NewRecord::ResearchEntry(r) => self.insert_research_entry(&guid, r).await?,
            NewRecord::AssessmentTool(r) => self.insert_assessment_tool(&guid, r).await?,
            NewRecord::TreatmentRecommendation(r) => {
                self.insert_treatment_recommendation(&guid, r).await?
            }
        }

        debug!("Created {} row {}", record.kind().table_name(), id);

        Ok(id)
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let row = sqlx::query("SELECT guid, name FROM tags WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let guid_str: String = row.get("guid");
                Ok(Some(Tag {
                    id: parse_guid(&guid_str)?,
                    name: row.get("name"),
                }))
            }
            None => Ok(None),
        }
    }

    async fn count(&self, kind: EntityKind) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table_name());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn count_grouped(&self, column: GroupedColumn) -> Result<Vec<(String, i64)>> {
        let sql = format!(
            "SELECT {col}, COUNT(*) FROM research_entries GROUP BY {col} ORDER BY {order}",
            col = column.column_name(),
            order = column.order_by()
        );
        let rows: Vec<(String, i64)> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }

    async fn recent_entries(&self, limit: i64) -> Result<Vec<RecentEntry>> {
        // rowid breaks ties so the latest insert wins
        let rows: Vec<(String, NaiveDate)> = sqlx::query_as(
            "SELECT title, added_date FROM research_entries \
             ORDER BY added_date DESC, rowid DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(title, added_date)| RecentEntry { title, added_date })
            .collect())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

/// Serialize a list/object attribute to its JSON text column
fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value)
        .map_err(|e| Error::Internal(format!("Failed to serialize column value: {}", e)))
}

fn parse_guid(guid: &str) -> Result<Uuid> {
    Uuid::parse_str(guid).map_err(|e| Error::Internal(format!("Corrupt guid '{}': {}", guid, e)))
}
