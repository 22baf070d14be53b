//! adkb-import - Knowledge base importer
//!
//! One-shot batch load of the curated research knowledge base into the
//! SQLite store. Prints per-entry progress and a final summary; exits
//! non-zero if any entry fails.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adkb_common::config::{self, TomlConfig};
use adkb_common::db::{SqliteStore, Store};
use adkb_import::models::KnowledgeBaseDocument;
use adkb_import::ImportPipeline;

/// Command-line arguments for adkb-import
#[derive(Parser, Debug)]
#[command(name = "adkb-import")]
#[command(about = "Import the ADHD research knowledge base into the relational store")]
#[command(version)]
struct Args {
    /// Knowledge base JSON document
    #[arg(short, long, env = "ADKB_INPUT")]
    input: Option<PathBuf>,

    /// SQLite database file (overrides ADKB_DATABASE and the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = TomlConfig::load_default().context("Failed to load configuration")?;

    // RUST_LOG wins, then the config file's level
    let default_filter = toml_config
        .logging
        .level
        .clone()
        .unwrap_or_else(|| "adkb_import=info,adkb_common=info".to_string());
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let input_path = args
        .input
        .or_else(|| toml_config.input_path.clone())
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_INPUT_PATH));
    let db_path = config::resolve_database_path(
        args.database.as_deref(),
        config::DATABASE_ENV_VAR,
        &toml_config,
    );

    info!("Starting knowledge base import");
    info!("Input: {}", input_path.display());
    info!("Database: {}", db_path.display());

    let document = KnowledgeBaseDocument::load(&input_path)
        .with_context(|| format!("Failed to load {}", input_path.display()))?;

    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::open(&db_path)
            .await
            .with_context(|| format!("Failed to open database {}", db_path.display()))?,
    );

    let result = ImportPipeline::new(store.clone()).run(&document).await;

    // Released on both paths
    store.close().await;

    match result {
        Ok(outcome) => {
            info!("✓ Knowledge base import completed successfully");
            println!("\n{}", outcome.summary);
            Ok(())
        }
        Err(e) => {
            error!("Import failed: {}", e);
            Err(e).context("Knowledge base import failed")
        }
    }
}
