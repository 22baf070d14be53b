//! Document loading from disk and a full run against an on-disk database

mod helpers;

use std::sync::Arc;

use adkb_common::db::{SqliteStore, Store};
use adkb_import::models::KnowledgeBaseDocument;
use adkb_import::{ImportError, ImportPipeline};
use helpers::entry_json;
use tempfile::TempDir;

#[test]
fn test_missing_document_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.json");

    match KnowledgeBaseDocument::load(&path) {
        Err(ImportError::ReadDocument { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ReadDocument, got {:?}", other.map(|d| d.research_entries.len())),
    }
}

#[test]
fn test_invalid_json_is_parse_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("kb.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        KnowledgeBaseDocument::load(&path),
        Err(ImportError::ParseDocument(_))
    ));
}

#[tokio::test]
async fn test_import_from_file_into_file_database() {
    let temp_dir = TempDir::new().unwrap();
    let doc_path = temp_dir.path().join("knowledge_base.json");
    let db_path = temp_dir.path().join("data").join("kb.db");

    let contents = serde_json::json!({
        "metadata": { "version": "1.1", "last_updated": "2025-09-15" },
        "research_entries": [
            entry_json("Network meta-analysis", &["systematic_review", "adult_adhd"]),
            entry_json("Pilot study", &["pilot_study", "adult_adhd"]),
        ]
    });
    std::fs::write(&doc_path, serde_json::to_string_pretty(&contents).unwrap()).unwrap();

    let document = KnowledgeBaseDocument::load(&doc_path).unwrap();
    assert_eq!(document.research_entries.len(), 2);

    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&db_path).await.unwrap());
    let outcome = ImportPipeline::new(store.clone()).run(&document).await.unwrap();
    store.close().await;

    assert_eq!(outcome.summary.research_entries, 2);
    assert_eq!(outcome.summary.tags, 3);
    assert_eq!(
        outcome.summary.study_types,
        vec![("SYSTEMATIC_REVIEW".to_string(), 2)]
    );
    assert_eq!(
        outcome.summary.evidence_levels,
        vec![("LEVEL_1A".to_string(), 2)]
    );

    let text = outcome.summary.to_string();
    assert!(text.contains("- Research Entries: 2"));
    assert!(text.contains("- Assessment Tools: 2"));
}
