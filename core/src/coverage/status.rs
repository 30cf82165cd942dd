use serde::{Deserialize, Serialize};

/// Per-line coverage status, ordered from least to most covered.
///
/// `Empty` marks lines outside any measured range (blank or non-executable);
/// they never count toward coverage totals. The ordering matters: raw input
/// sets are painted in ascending status order, so a line listed in more than
/// one set resolves to the higher status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Empty,
    NotCovered,
    PartlyCovered,
    FullyCovered,
}

impl LineStatus {
    /// True when the line was executed at least partly.
    pub fn is_covered(self) -> bool {
        matches!(self, LineStatus::PartlyCovered | LineStatus::FullyCovered)
    }

    /// True when the line counts toward the measurable total.
    pub fn is_measurable(self) -> bool {
        self != LineStatus::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_are_ordered_by_coverage_strength() {
        assert!(LineStatus::Empty < LineStatus::NotCovered);
        assert!(LineStatus::NotCovered < LineStatus::PartlyCovered);
        assert!(LineStatus::PartlyCovered < LineStatus::FullyCovered);
    }

    #[test]
    fn only_partly_and_fully_count_as_covered() {
        assert!(!LineStatus::Empty.is_covered());
        assert!(!LineStatus::NotCovered.is_covered());
        assert!(LineStatus::PartlyCovered.is_covered());
        assert!(LineStatus::FullyCovered.is_covered());
    }

    #[test]
    fn empty_is_the_only_unmeasurable_status() {
        assert!(!LineStatus::Empty.is_measurable());
        assert!(LineStatus::NotCovered.is_measurable());
        assert!(LineStatus::PartlyCovered.is_measurable());
        assert!(LineStatus::FullyCovered.is_measurable());
    }
}
