//! Import run driver
//!
//! One document, one store, one pass:
//! 1. Every research entry, in document order, through the assembler
//! 2. The seed catalogs
//! 3. The summary, read back from the store
//!
//! The first error stops the run. Rows written before it stay in the store
//! and no summary is produced.

use adkb_common::db::Store;
use std::sync::Arc;
use tracing::info;

use crate::error::ImportResult;
use crate::models::{CatalogCounts, ImportSummary, KnowledgeBaseDocument, RunStatistics};
use crate::services::catalog_loader::CatalogLoader;
use crate::services::entry_assembler::EntryAssembler;
use crate::services::import_reporter::ImportReporter;

/// Everything a successful run produced
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub statistics: RunStatistics,
    pub catalogs: CatalogCounts,
    pub summary: ImportSummary,
}

pub struct ImportPipeline {
    store: Arc<dyn Store>,
}

impl ImportPipeline {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn run(&self, document: &KnowledgeBaseDocument) -> ImportResult<ImportOutcome> {
        if let Some(metadata) = &document.metadata {
            info!(
                "Knowledge base version {} (last updated {})",
                metadata.version.as_deref().unwrap_or("unknown"),
                metadata.last_updated.as_deref().unwrap_or("unknown")
            );
        }

        let total = document.research_entries.len();
        info!("Starting import of {} research entries", total);

        // Entries must go one at a time: later entries reuse tags created by
        // earlier ones through the assembler's resolver
        let mut assembler = EntryAssembler::new(self.store.clone());
        let mut entries_imported = 0;

        for index in 0..total {
            let source = document.decode_entry(index)?;
            info!("Importing [{}/{}]: {}", index + 1, total, source.title);

            let entry = assembler.assemble(&source).await?;
            entries_imported += 1;

            info!(
                "✓ Imported: {} ({} tags, {})",
                source.title,
                entry.tags.len(),
                entry.record.evidence_level
            );
        }

        let statistics = RunStatistics {
            entries_imported,
            tags_created: assembler.tags_created(),
            tag_references: assembler.tag_references(),
            enum_fallbacks: assembler.enum_fallbacks(),
        };
        info!(
            "Research entries done: {} imported, {} new tags from {} references, {} enum fallbacks",
            statistics.entries_imported,
            statistics.tags_created,
            statistics.tag_references,
            statistics.enum_fallbacks
        );

        let catalogs = CatalogLoader::new(self.store.clone()).load_catalogs().await?;

        let summary = ImportReporter::new(self.store.clone()).report().await?;

        Ok(ImportOutcome {
            statistics,
            catalogs,
            summary,
        })
    }
}
