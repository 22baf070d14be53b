//! Import run statistics and the post-load summary

use adkb_common::db::RecentEntry;
use std::fmt;

/// Counters gathered by the pipeline while it runs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStatistics {
    /// Research entries fully written this run
    pub entries_imported: usize,
    /// Tag rows created this run (existing tags reused are not counted)
    pub tags_created: usize,
    /// Tag references resolved, including repeats
    pub tag_references: usize,
    /// Study-type / evidence-level codes that fell back to a default
    pub enum_fallbacks: usize,
}

/// Rows written by the standalone catalog loader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub assessment_tools: usize,
    pub treatment_recommendations: usize,
}

/// Store contents read back after the load
///
/// Counts reflect the whole store at query time, not just this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub research_entries: i64,
    pub tags: i64,
    pub assessment_tools: i64,
    pub treatment_recommendations: i64,
    /// Sum over the six owned child tables
    pub child_records: i64,
    pub evidence_levels: Vec<(String, i64)>,
    /// Most frequent first
    pub study_types: Vec<(String, i64)>,
    /// Latest added entries, newest first
    pub recent_additions: Vec<RecentEntry>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import Summary:")?;
        writeln!(f, "- Research Entries: {}", self.research_entries)?;
        writeln!(f, "- Tags: {}", self.tags)?;
        writeln!(f, "- Assessment Tools: {}", self.assessment_tools)?;
        writeln!(f, "- Treatment Recommendations: {}", self.treatment_recommendations)?;
        writeln!(f, "- Child Records: {}", self.child_records)?;

        if !self.evidence_levels.is_empty() {
            writeln!(f, "Evidence levels:")?;
            for (level, count) in &self.evidence_levels {
                writeln!(f, "  {}: {}", level, count)?;
            }
        }

        if !self.study_types.is_empty() {
            writeln!(f, "Study types:")?;
            for (study_type, count) in &self.study_types {
                writeln!(f, "  {}: {}", study_type, count)?;
            }
        }

        if !self.recent_additions.is_empty() {
            writeln!(f, "Recent additions:")?;
            for entry in &self.recent_additions {
                writeln!(f, "  {} ({})", entry.title, entry.added_date)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lists_counts() {
        let summary = ImportSummary {
            research_entries: 2,
            tags: 3,
            assessment_tools: 2,
            treatment_recommendations: 2,
            child_records: 12,
            evidence_levels: vec![("LEVEL_1A".to_string(), 2)],
            study_types: vec![],
            recent_additions: vec![RecentEntry {
                title: "Network meta-analysis".to_string(),
                added_date: chrono::NaiveDate::from_ymd_opt(2025, 9, 15).unwrap(),
            }],
        };

        let text = summary.to_string();
        assert!(text.contains("- Research Entries: 2"));
        assert!(text.contains("- Tags: 3"));
        assert!(text.contains("LEVEL_1A: 2"));
        assert!(!text.contains("Study types:"));
        assert!(text.contains("  Network meta-analysis (2025-09-15)"));
    }
}
