//! adkb-import library interface
//!
//! Loads the curated ADHD research knowledge base (a nested JSON document)
//! into the normalized relational store defined in `adkb-common`.
//! Exposes the pipeline components for integration testing.

pub mod catalog;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::{ImportError, ImportResult};
pub use crate::services::{ImportOutcome, ImportPipeline};
