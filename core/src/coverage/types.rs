use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::status::LineStatus;
use super::table::LineStatuses;

/// Identifier coverage files and method owners are keyed by, as reported by
/// the coverage tool (usually a source path or fully qualified type name).
pub type FileId = String;

/// Span of one named method or constructor inside its owner file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRange {
    /// File the range belongs to; a range only scores against tables of its
    /// owner.
    pub owner: FileId,
    pub name: String,
    pub begin_line: u32,
    pub end_line: u32,
}

/// Raw per-file coverage input: the measured line bounds plus the three
/// disjoint line-number sets reported by the instrumentation tool. Ordered
/// sets keep classification deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    pub begin_line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub not_covered: BTreeSet<u32>,
    #[serde(default)]
    pub partly_covered: BTreeSet<u32>,
    #[serde(default)]
    pub fully_covered: BTreeSet<u32>,
}

impl FileCoverage {
    /// Builds the status table, painting the sets in the fixed
    /// not → partly → fully order so a line listed in several sets resolves
    /// to the higher status.
    ///
    /// # Panics
    ///
    /// Panics on malformed bounds (see [`LineStatuses::new`]).
    pub fn statuses(&self) -> LineStatuses {
        let mut table = LineStatuses::new(self.begin_line, self.end_line);
        table.paint(&self.not_covered, LineStatus::NotCovered);
        table.paint(&self.partly_covered, LineStatus::PartlyCovered);
        table.paint(&self.fully_covered, LineStatus::FullyCovered);
        table
    }
}
