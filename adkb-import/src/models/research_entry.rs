//! Assembled research entry

use adkb_common::db::{NewResearchEntry, Tag};
use uuid::Uuid;

/// A research entry as persisted by the assembler
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchEntry {
    /// Generated key of the research_entries row
    pub id: Uuid,
    /// Row contents, including child keys and tag links
    pub record: NewResearchEntry,
    /// Linked tags in first-occurrence order
    pub tags: Vec<Tag>,
}
