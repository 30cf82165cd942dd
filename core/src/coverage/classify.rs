use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::table::LineStatuses;
use super::types::{FileCoverage, FileId, MethodRange};

/// Fixed slack, in percentage points, absorbing the independent rounding of
/// required and achieved percentages before they are compared.
pub const COVERAGE_TOLERANCE_PCT: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Covered,
    NotCovered,
}

/// Aggregate coverage outcome for one snippet evaluation. Created once,
/// never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageVerdict {
    /// Count of measurable (non-empty) lines across all scanned ranges.
    pub lines_to_cover: u32,
    /// Count of scanned lines that were at least partly covered.
    pub lines_covered: u32,
    pub percentage: f64,
    pub classification: Classification,
}

/// Scores the primary range plus any auxiliary ranges against the per-file
/// coverage tables and classifies the aggregate percentage against
/// `required_percent`.
///
/// A file that does not own the primary range contributes nothing for it,
/// and likewise per auxiliary range. That is the expected shape of coverage
/// data spanning a snippet's dependency closure, not an error.
///
/// # Panics
///
/// Panics when the scanned ranges contain no measurable line
/// (`lines_to_cover == 0`): an empty measurable range means the upstream
/// line-range extraction is defective, and a silent 0% or 100% would corrupt
/// the evaluation statistics. Also panics on malformed per-file bounds (see
/// [`LineStatuses::new`]).
pub fn classify(
    per_file: &BTreeMap<FileId, FileCoverage>,
    primary: &MethodRange,
    auxiliary: &[MethodRange],
    required_percent: f64,
) -> CoverageVerdict {
    let mut lines_to_cover = 0u32;
    let mut lines_covered = 0u32;

    for (file_id, coverage) in per_file {
        let table = coverage.statuses();

        if primary.owner == *file_id {
            accumulate(&table, primary, &mut lines_to_cover, &mut lines_covered);
        }
        for range in auxiliary {
            if range.owner == *file_id {
                accumulate(&table, range, &mut lines_to_cover, &mut lines_covered);
            }
        }
    }

    assert!(
        lines_to_cover > 0,
        "no measurable lines in the scanned ranges (primary {}#{} [{}, {}])",
        primary.owner,
        primary.name,
        primary.begin_line,
        primary.end_line
    );

    let percentage = 100.0 * f64::from(lines_covered) / f64::from(lines_to_cover);
    let classification = if required_percent <= percentage + COVERAGE_TOLERANCE_PCT {
        Classification::Covered
    } else {
        Classification::NotCovered
    };

    CoverageVerdict {
        lines_to_cover,
        lines_covered,
        percentage,
        classification,
    }
}

fn accumulate(
    table: &LineStatuses,
    range: &MethodRange,
    lines_to_cover: &mut u32,
    lines_covered: &mut u32,
) {
    for line in range.begin_line..=range.end_line {
        let status = table.status_at(line);
        if !status.is_measurable() {
            continue;
        }
        *lines_to_cover += 1;
        if status.is_covered() {
            *lines_covered += 1;
        }
    }
}
