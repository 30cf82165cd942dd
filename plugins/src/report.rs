//! On-disk coverage report format shared by command tools.
//!
//! A tool run is expected to leave one JSON file in its snippet out_dir:
//! `{"files": [{"path", "begin_line", "end_line", "not_covered",
//! "partly_covered", "fully_covered"}]}` with line arrays in any order.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use covbench_core::api::{FileCoverage, FileId, ToolError};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverageReport {
    #[serde(default)]
    pub files: Vec<ReportFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportFile {
    /// File identifier exactly as the catalogue names owners.
    pub path: String,
    pub begin_line: u32,
    pub end_line: u32,
    #[serde(default)]
    pub not_covered: Vec<u32>,
    #[serde(default)]
    pub partly_covered: Vec<u32>,
    #[serde(default)]
    pub fully_covered: Vec<u32>,
}

impl From<ReportFile> for FileCoverage {
    fn from(file: ReportFile) -> Self {
        FileCoverage {
            begin_line: file.begin_line,
            end_line: file.end_line,
            not_covered: file.not_covered.into_iter().collect(),
            partly_covered: file.partly_covered.into_iter().collect(),
            fully_covered: file.fully_covered.into_iter().collect(),
        }
    }
}

/// Reads one report into the per-file map the classifier consumes.
///
/// Tool output is external input, so everything wrong with it is a
/// recoverable `ToolError`: a missing file and an unreadable one stay
/// distinguishable for diagnostics. A file listed twice keeps its last
/// entry.
pub async fn load_report(path: &Path) -> Result<BTreeMap<FileId, FileCoverage>, ToolError> {
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ToolError::ReportMissing(path.to_path_buf()));
        }
        Err(e) => {
            return Err(ToolError::ReportMalformed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }
    };

    let report: CoverageReport =
        serde_json::from_str(&raw).map_err(|e| ToolError::ReportMalformed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    let mut per_file = BTreeMap::new();
    for file in report.files {
        if file.begin_line < 1 || file.end_line <= file.begin_line {
            return Err(ToolError::ReportMalformed {
                path: path.to_path_buf(),
                reason: format!(
                    "bad line bounds for {}: [{}, {}]",
                    file.path, file.begin_line, file.end_line
                ),
            });
        }
        per_file.insert(file.path.clone(), FileCoverage::from(file));
    }
    Ok(per_file)
}
