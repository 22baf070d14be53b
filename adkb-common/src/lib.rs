//! # ADKB Common Library
//!
//! Shared code for the knowledge-base tooling:
//! - Database schema, record types and the `Store` capability
//! - Canonical enumerations (study type, evidence level, ...)
//! - Configuration loading
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
