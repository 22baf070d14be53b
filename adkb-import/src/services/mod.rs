//! Import pipeline components, leaf-first

pub mod catalog_loader;
pub mod child_builder;
pub mod entry_assembler;
pub mod enum_canonicalizer;
pub mod import_pipeline;
pub mod import_reporter;
pub mod tag_resolver;

pub use catalog_loader::CatalogLoader;
pub use child_builder::ChildEntityBuilder;
pub use entry_assembler::{parse_source_date, EntryAssembler};
pub use enum_canonicalizer::{canonicalize, case_fold, Canonical, CanonicalEnum};
pub use import_pipeline::{ImportOutcome, ImportPipeline};
pub use import_reporter::ImportReporter;
pub use tag_resolver::TagResolver;
