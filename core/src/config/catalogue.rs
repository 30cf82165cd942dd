//! Snippet catalogue: the TOML file naming the code ranges a benchmark
//! run evaluates.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::coverage::MethodRange;
use crate::error::CliError;

/// One benchmark entry: the method under test plus the helper ranges
/// whose coverage counts toward it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snippet {
    /// Unique id within the catalogue.
    pub id: String,

    /// The method under test.
    pub primary: MethodRange,

    /// Helper ranges (constructors, private callees) scanned together
    /// with the primary.
    #[serde(default)]
    pub auxiliary: Vec<MethodRange>,

    /// Required statement coverage percent; falls back to the
    /// evaluation default when unset.
    #[serde(default)]
    pub required_percent: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalogue {
    #[serde(default)]
    pub snippets: Vec<Snippet>,
}

impl Catalogue {
    /// Loads and validates a catalogue file. Duplicate ids, degenerate
    /// ranges and out-of-range thresholds are load errors, not panics:
    /// the file is user input.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CliError::Catalogue(format!("read {}: {e}", path.display())))?;
        let catalogue: Catalogue = toml::from_str(&raw)
            .map_err(|e| CliError::Catalogue(format!("parse {}: {e}", path.display())))?;
        catalogue.validate().map_err(CliError::Catalogue)?;
        Ok(catalogue)
    }

    pub fn get(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for snippet in &self.snippets {
            if snippet.id.trim().is_empty() {
                return Err("snippet with empty id".to_string());
            }
            if !seen.insert(snippet.id.as_str()) {
                return Err(format!("duplicate snippet id: {}", snippet.id));
            }
            validate_range(&snippet.id, &snippet.primary)?;
            for range in &snippet.auxiliary {
                validate_range(&snippet.id, range)?;
            }
            if let Some(pct) = snippet.required_percent {
                if !(0.0..=100.0).contains(&pct) {
                    return Err(format!(
                        "snippet {}: required_percent out of range: {pct}",
                        snippet.id
                    ));
                }
            }
        }
        Ok(())
    }
}

fn validate_range(id: &str, range: &MethodRange) -> Result<(), String> {
    if range.begin_line < 1 || range.end_line <= range.begin_line {
        return Err(format!(
            "snippet {id}: bad range for {}#{}: [{}, {}]",
            range.owner, range.name, range.begin_line, range.end_line
        ));
    }
    Ok(())
}
