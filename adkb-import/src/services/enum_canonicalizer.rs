//! Raw source codes → canonical enumeration symbols
//!
//! Two strategies:
//! - **Table lookup with default**: study type and evidence level. The raw
//!   code is matched exactly against a fixed table; a code missing from the
//!   table yields the enumeration's default instead of an error.
//! - **Case fold**: risk-of-bias and grade rating are free codes that only
//!   vary in casing, so they are upper-cased.

use adkb_common::db::{EvidenceLevel, StudyType};
use tracing::debug;

/// Enumeration with a fixed raw-code table and a default for unknown codes
pub trait CanonicalEnum: Copy + Sized {
    /// Used when the raw code is not in the table
    const DEFAULT: Self;
    /// Field name for log messages
    const FIELD: &'static str;

    /// Exact table lookup
    fn lookup(raw: &str) -> Option<Self>;
}

impl CanonicalEnum for StudyType {
    const DEFAULT: Self = StudyType::Rct;
    const FIELD: &'static str = "study_type";

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "systematic_review" => Some(StudyType::SystematicReview),
            "meta_analysis" => Some(StudyType::MetaAnalysis),
            "rct" => Some(StudyType::Rct),
            "cohort" => Some(StudyType::Cohort),
            "case_control" => Some(StudyType::CaseControl),
            _ => None,
        }
    }
}

impl CanonicalEnum for EvidenceLevel {
    const DEFAULT: Self = EvidenceLevel::Level2B;
    const FIELD: &'static str = "evidence_level";

    fn lookup(raw: &str) -> Option<Self> {
        match raw {
            "1a" => Some(EvidenceLevel::Level1A),
            "1b" => Some(EvidenceLevel::Level1B),
            "2a" => Some(EvidenceLevel::Level2A),
            "2b" => Some(EvidenceLevel::Level2B),
            "3a" => Some(EvidenceLevel::Level3A),
            "3b" => Some(EvidenceLevel::Level3B),
            "4" => Some(EvidenceLevel::Level4),
            "5" => Some(EvidenceLevel::Level5),
            _ => None,
        }
    }
}

/// Canonicalization outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canonical<T> {
    pub value: T,
    /// True when `value` is the default because the raw code was unknown
    pub defaulted: bool,
}

/// Map a raw code to its enumeration member; never fails
pub fn canonicalize<T: CanonicalEnum>(raw: &str) -> Canonical<T> {
    match T::lookup(raw) {
        Some(value) => Canonical { value, defaulted: false },
        None => {
            debug!("Unmapped {} code '{}', using default", T::FIELD, raw);
            Canonical {
                value: T::DEFAULT,
                defaulted: true,
            }
        }
    }
}

/// Upper-case a free-form code (risk of bias, GRADE rating)
///
/// Uses Unicode upper-casing, so only cased letters change. Lowercase
/// characters with no uppercase form (`'ª'`, modifier letters such as
/// `'ᵃ'`) pass through unchanged.
pub fn case_fold(raw: &str) -> String {
    raw.to_uppercase()
}
