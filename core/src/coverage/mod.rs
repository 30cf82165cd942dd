//! Line-status coverage model and the pure classifier that turns raw
//! per-file coverage sets into a verdict against a required threshold.

mod classify;
mod status;
mod table;
pub mod types;

pub use classify::{classify, Classification, CoverageVerdict, COVERAGE_TOLERANCE_PCT};
pub use status::LineStatus;
pub use table::LineStatuses;
pub use types::{FileCoverage, FileId, MethodRange};
