//! End-to-end import tests against in-memory SQLite
//!
//! - Row counts for N entries (entries, children, distinct tags)
//! - Tag sharing across entries
//! - Catalogs loaded with zero entries
//! - Abort semantics: earlier rows persist, no summary

mod helpers;

use std::collections::HashSet;
use std::sync::Arc;

use adkb_common::db::{EntityKind, SqliteStore, Store};
use adkb_import::models::KnowledgeBaseDocument;
use adkb_import::{ImportError, ImportPipeline};
use helpers::{document, entry_json, FailingStore};

async fn sqlite() -> SqliteStore {
    SqliteStore::open_in_memory().await.unwrap()
}

#[tokio::test]
async fn test_n_entries_produce_n_roots_and_6n_children() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let doc = document(vec![
        entry_json("Entry One", &["adhd", "cbt"]),
        entry_json("Entry Two", &["adhd", "stimulants"]),
        entry_json("Entry Three", &["cbt"]),
        entry_json("Entry Four", &[]),
    ]);

    let outcome = ImportPipeline::new(store.clone()).run(&doc).await.unwrap();

    assert_eq!(outcome.summary.research_entries, 4);
    assert_eq!(outcome.summary.child_records, 24);
    for kind in EntityKind::CHILDREN {
        assert_eq!(store.count(kind).await.unwrap(), 4, "{:?}", kind);
    }

    // Distinct names, not occurrences
    assert_eq!(outcome.summary.tags, 3);
    assert_eq!(outcome.statistics.tags_created, 3);
    assert_eq!(outcome.statistics.tag_references, 5);
    assert_eq!(outcome.statistics.entries_imported, 4);
}

#[tokio::test]
async fn test_shared_tag_row_across_entries() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let doc = document(vec![
        entry_json("Entry A", &["adhd", "workplace"]),
        entry_json("Entry B", &["workplace", "anxiety"]),
    ]);

    ImportPipeline::new(store.clone()).run(&doc).await.unwrap();

    let names: Vec<String> = sqlx::query_scalar("SELECT name FROM tags ORDER BY name")
        .fetch_all(sqlite.pool())
        .await
        .unwrap();
    assert_eq!(names, vec!["adhd", "anxiety", "workplace"]);

    let per_entry: Vec<(String, i64)> = sqlx::query_as(
        "SELECT e.title, COUNT(*) FROM research_entries e \
         JOIN research_entry_tags l ON l.entry_id = e.guid \
         GROUP BY e.title ORDER BY e.title",
    )
    .fetch_all(sqlite.pool())
    .await
    .unwrap();
    assert_eq!(
        per_entry,
        vec![("Entry A".to_string(), 2), ("Entry B".to_string(), 2)]
    );

    let workplace_links: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM research_entry_tags l JOIN tags t ON t.guid = l.tag_id \
         WHERE t.name = 'workplace'",
    )
    .fetch_one(sqlite.pool())
    .await
    .unwrap();
    assert_eq!(workplace_links, 2);
}

#[tokio::test]
async fn test_tag_count_equals_distinct_names() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let tag_lists: Vec<Vec<&str>> = vec![
        vec!["a", "b", "c"],
        vec!["c", "d"],
        vec!["a", "a", "e"],
        vec!["E", "e"],
    ];
    let distinct: HashSet<&str> = tag_lists.iter().flatten().copied().collect();

    let entries = tag_lists
        .iter()
        .enumerate()
        .map(|(i, tags)| entry_json(&format!("Entry {}", i), tags))
        .collect();

    let outcome = ImportPipeline::new(store.clone())
        .run(&document(entries))
        .await
        .unwrap();

    assert_eq!(outcome.summary.tags, distinct.len() as i64);
    assert_eq!(outcome.statistics.tags_created, distinct.len());
}

#[tokio::test]
async fn test_zero_entries_still_loads_catalogs() {
    let store: Arc<dyn Store> = Arc::new(sqlite().await);

    let doc = KnowledgeBaseDocument::from_json_str(
        r#"{"metadata": {"version": "1.1"}, "research_entries": []}"#,
    )
    .unwrap();

    let outcome = ImportPipeline::new(store).run(&doc).await.unwrap();

    assert_eq!(outcome.summary.research_entries, 0);
    assert_eq!(outcome.summary.tags, 0);
    assert_eq!(outcome.summary.assessment_tools, 2);
    assert_eq!(outcome.summary.treatment_recommendations, 2);
    assert_eq!(outcome.catalogs.assessment_tools, 2);
}

#[tokio::test]
async fn test_canonicalized_columns_persisted() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let mut rct = entry_json("Randomized", &[]);
    rct["study_type"] = "rct".into();
    rct["evidence_level"] = "1b".into();
    rct["quality_assessment"]["risk_of_bias"] = "Some Concerns".into();
    rct["quality_assessment"]["grade_rating"] = "hIgH".into();

    let mut unknown = entry_json("Unknown", &[]);
    unknown["study_type"] = "unknown_type".into();
    unknown["evidence_level"] = "level one".into();

    let outcome = ImportPipeline::new(store)
        .run(&document(vec![rct, unknown]))
        .await
        .unwrap();
    assert_eq!(outcome.statistics.enum_fallbacks, 2);

    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT title, study_type, evidence_level FROM research_entries ORDER BY title",
    )
    .fetch_all(sqlite.pool())
    .await
    .unwrap();
    assert_eq!(
        rows,
        vec![
            ("Randomized".to_string(), "RCT".to_string(), "LEVEL_1B".to_string()),
            ("Unknown".to_string(), "RCT".to_string(), "LEVEL_2B".to_string()),
        ]
    );

    let codes: Vec<(String, String)> =
        sqlx::query_as("SELECT risk_of_bias, grade_rating FROM quality_assessments")
            .fetch_all(sqlite.pool())
            .await
            .unwrap();
    assert!(codes.contains(&("SOME CONCERNS".to_string(), "HIGH".to_string())));
    for (risk, grade) in codes {
        assert_eq!(risk, risk.to_uppercase());
        assert_eq!(grade, grade.to_uppercase());
    }
}

#[tokio::test]
async fn test_malformed_date_aborts_run_keeping_earlier_entries() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let mut entries: Vec<_> = (1..=5)
        .map(|i| entry_json(&format!("Entry {}", i), &["adhd"]))
        .collect();
    entries[2]["last_reviewed"] = "not-a-date".into();

    let result = ImportPipeline::new(store.clone())
        .run(&document(entries))
        .await;

    match result {
        Err(ImportError::MalformedDate { title, field, .. }) => {
            assert_eq!(title, "Entry 3");
            assert_eq!(field, "last_reviewed");
        }
        other => panic!("expected MalformedDate, got {:?}", other.map(|o| o.summary)),
    }

    let titles: Vec<String> = sqlx::query_scalar("SELECT title FROM research_entries ORDER BY title")
        .fetch_all(sqlite.pool())
        .await
        .unwrap();
    assert_eq!(titles, vec!["Entry 1", "Entry 2"]);

    // Entry 3's children were written before its dates were parsed
    assert_eq!(store.count(EntityKind::Methodology).await.unwrap(), 3);

    // The run stopped before the catalogs
    assert_eq!(store.count(EntityKind::AssessmentTool).await.unwrap(), 0);
    assert_eq!(store.count(EntityKind::TreatmentRecommendation).await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_entry_shape_aborts_at_its_position() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());

    let mut bad = entry_json("Bad", &[]);
    bad.as_object_mut().unwrap().remove("methodology");

    let result = ImportPipeline::new(store.clone())
        .run(&document(vec![entry_json("Good", &["adhd"]), bad]))
        .await;

    assert!(matches!(result, Err(ImportError::MalformedEntry { index: 2, .. })));
    assert_eq!(store.count(EntityKind::ResearchEntry).await.unwrap(), 1);
}

#[tokio::test]
async fn test_store_failure_leaves_partial_entry() {
    let sqlite = sqlite().await;

    // Entry 1 writes 6 children + 1 tag + entry = 8 creates; fail entry 2's
    // third child
    let store: Arc<dyn Store> = Arc::new(FailingStore::new(sqlite.clone(), 11));

    let result = ImportPipeline::new(store.clone())
        .run(&document(vec![
            entry_json("First", &["adhd"]),
            entry_json("Second", &["adhd"]),
        ]))
        .await;

    assert!(matches!(result, Err(ImportError::Store(_))));

    assert_eq!(sqlite_count(&sqlite, "research_entries").await, 1);
    assert_eq!(sqlite_count(&sqlite, "target_populations").await, 2);
    assert_eq!(sqlite_count(&sqlite, "methodologies").await, 2);
    assert_eq!(sqlite_count(&sqlite, "key_findings").await, 1);
}

#[tokio::test]
async fn test_rerun_duplicates_entries_but_not_tags() {
    let sqlite = sqlite().await;
    let store: Arc<dyn Store> = Arc::new(sqlite.clone());
    let doc = document(vec![entry_json("Only", &["adhd", "cbt"])]);

    ImportPipeline::new(store.clone()).run(&doc).await.unwrap();
    let second = ImportPipeline::new(store.clone()).run(&doc).await.unwrap();

    assert_eq!(second.summary.research_entries, 2);
    assert_eq!(second.summary.tags, 2);
    assert_eq!(second.statistics.tags_created, 0);
    assert_eq!(second.summary.assessment_tools, 4);
}

async fn sqlite_count(sqlite: &SqliteStore, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(sqlite.pool())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_summary_orders_distributions_and_lists_recent_additions() {
    let store: Arc<dyn Store> = Arc::new(sqlite().await);

    let study_types = ["cohort", "rct", "rct", "case_control", "rct", "cohort"];
    let entries = study_types
        .iter()
        .enumerate()
        .map(|(i, study_type)| {
            let mut entry = entry_json(&format!("Entry {}", i + 1), &[]);
            entry["study_type"] = (*study_type).into();
            entry["added_date"] = format!("2025-09-{:02}", i + 10).into();
            entry
        })
        .collect();

    let outcome = ImportPipeline::new(store).run(&document(entries)).await.unwrap();

    assert_eq!(
        outcome.summary.study_types,
        vec![
            ("RCT".to_string(), 3),
            ("COHORT".to_string(), 2),
            ("CASE_CONTROL".to_string(), 1),
        ]
    );

    let recent: Vec<&str> = outcome
        .summary
        .recent_additions
        .iter()
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(recent, vec!["Entry 6", "Entry 5", "Entry 4", "Entry 3", "Entry 2"]);
    assert!(outcome.summary.to_string().contains("Recent additions:"));
}
