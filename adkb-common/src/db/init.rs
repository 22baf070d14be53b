//! Database initialization
//!
//! Opens (or creates) the SQLite file and makes sure every table the importer
//! writes to exists. Tables are created with `CREATE TABLE IF NOT EXISTS`;
//! there is no versioned migration path.

use crate::db::models::{EvidenceLevel, RecommendationStrength, StudyType, TreatmentType};
use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // The importer is a single writer; one connection keeps every write on
    // the same session
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;

    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// Limited to a single connection: every SQLite `:memory:` connection is a
/// separate database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Enable foreign keys and create all tables (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(pool)
        .await?;

    // Owned child tables first: research_entries references them
    create_target_populations_table(pool).await?;
    create_methodologies_table(pool).await?;
    create_key_findings_table(pool).await?;
    create_workplace_relevance_table(pool).await?;
    create_quality_assessments_table(pool).await?;
    create_clinical_applications_table(pool).await?;

    create_tags_table(pool).await?;
    create_research_entries_table(pool).await?;
    create_research_entry_tags_table(pool).await?;

    // Standalone catalogs
    create_assessment_tools_table(pool).await?;
    create_treatment_recommendations_table(pool).await?;

    Ok(())
}

/// `CHECK (column IN (...))` clause built from an enum's stored symbols
fn check_in(column: &str, symbols: &[&str]) -> String {
    let quoted: Vec<String> = symbols.iter().map(|s| format!("'{}'", s)).collect();
    format!("CHECK ({} IN ({}))", column, quoted.join(", "))
}

async fn create_target_populations_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS target_populations (
            guid TEXT PRIMARY KEY,
            age_range TEXT NOT NULL,
            gender TEXT NOT NULL,
            occupation TEXT NOT NULL,
            adhd_subtype TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_methodologies_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS methodologies (
            guid TEXT PRIMARY KEY,
            design TEXT NOT NULL,
            duration TEXT NOT NULL,
            primary_outcomes TEXT NOT NULL DEFAULT '[]',
            secondary_outcomes TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_key_findings_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS key_findings (
            guid TEXT PRIMARY KEY,
            primary_results TEXT NOT NULL,
            effect_sizes TEXT NOT NULL DEFAULT '{}',
            clinical_significance TEXT NOT NULL,
            limitations TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_workplace_relevance_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS workplace_relevance (
            guid TEXT PRIMARY KEY,
            productivity_impact TEXT NOT NULL,
            accommodation_needs TEXT NOT NULL DEFAULT '[]',
            career_implications TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_quality_assessments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS quality_assessments (
            guid TEXT PRIMARY KEY,
            risk_of_bias TEXT NOT NULL,
            grade_rating TEXT NOT NULL,
            reviewer_notes TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_clinical_applications_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clinical_applications (
            guid TEXT PRIMARY KEY,
            diagnostic_utility TEXT NOT NULL,
            treatment_recommendations TEXT NOT NULL DEFAULT '[]',
            monitoring_parameters TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the tags table
///
/// The UNIQUE constraint backs up the importer's find-before-create; it is
/// not what keeps a normal run free of duplicates.
pub async fn create_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_research_entries_table(pool: &SqlitePool) -> Result<()> {
    let study_types: Vec<&str> = StudyType::ALL.iter().map(|v| v.as_str()).collect();
    let evidence_levels: Vec<&str> = EvidenceLevel::ALL.iter().map(|v| v.as_str()).collect();

    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS research_entries (
            guid TEXT PRIMARY KEY,
            source_key TEXT,
            title TEXT NOT NULL,
            authors TEXT NOT NULL DEFAULT '[]',
            journal TEXT NOT NULL,
            publication_date TEXT NOT NULL,
            doi TEXT,
            study_type TEXT NOT NULL {study_check},
            evidence_level TEXT NOT NULL {evidence_check},
            sample_size INTEGER,
            added_date TEXT NOT NULL,
            last_reviewed TEXT NOT NULL,
            target_population_id TEXT NOT NULL REFERENCES target_populations(guid),
            methodology_id TEXT NOT NULL REFERENCES methodologies(guid),
            key_findings_id TEXT NOT NULL REFERENCES key_findings(guid),
            workplace_relevance_id TEXT NOT NULL REFERENCES workplace_relevance(guid),
            quality_assessment_id TEXT NOT NULL REFERENCES quality_assessments(guid),
            clinical_applications_id TEXT NOT NULL REFERENCES clinical_applications(guid),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        study_check = check_in("study_type", &study_types),
        evidence_check = check_in("evidence_level", &evidence_levels),
    );

    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}

async fn create_research_entry_tags_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS research_entry_tags (
            entry_id TEXT NOT NULL REFERENCES research_entries(guid) ON DELETE CASCADE,
            tag_id TEXT NOT NULL REFERENCES tags(guid),
            PRIMARY KEY (entry_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_research_entry_tags_tag ON research_entry_tags(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}

async fn create_assessment_tools_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS assessment_tools (
            guid TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            acronym TEXT NOT NULL,
            purpose TEXT NOT NULL,
            target_population TEXT NOT NULL,
            administration_time INTEGER NOT NULL,
            domains TEXT NOT NULL DEFAULT '[]',
            psychometric_properties TEXT NOT NULL DEFAULT '{}',
            clinical_utility TEXT NOT NULL,
            limitations TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_treatment_recommendations_table(pool: &SqlitePool) -> Result<()> {
    let treatment_types: Vec<&str> = TreatmentType::ALL.iter().map(|v| v.as_str()).collect();
    let evidence_levels: Vec<&str> = EvidenceLevel::ALL.iter().map(|v| v.as_str()).collect();
    let strengths: Vec<&str> = RecommendationStrength::ALL
        .iter()
        .map(|v| v.as_str())
        .collect();

    let sql = format!(
        r#"
        CREATE TABLE IF NOT EXISTS treatment_recommendations (
            guid TEXT PRIMARY KEY,
            condition TEXT NOT NULL,
            treatment_type TEXT NOT NULL {type_check},
            intervention_name TEXT NOT NULL,
            evidence_level TEXT NOT NULL {evidence_check},
            effect_size REAL NOT NULL,
            recommendation_strength TEXT NOT NULL {strength_check},
            target_population TEXT NOT NULL,
            contraindications TEXT NOT NULL DEFAULT '[]',
            side_effects TEXT NOT NULL DEFAULT '[]',
            monitoring_requirements TEXT NOT NULL DEFAULT '[]',
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
        type_check = check_in("treatment_type", &treatment_types),
        evidence_check = check_in("evidence_level", &evidence_levels),
        strength_check = check_in("recommendation_strength", &strengths),
    );

    sqlx::query(&sql).execute(pool).await?;

    Ok(())
}
