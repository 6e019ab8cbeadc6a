//! Report data model shared by the builder, the differ, and the formatters.
//! Everything here is recomputed per run; nothing is persisted.

use serde::Serialize;

/// Compute a coverage percentage, returning 0.0 when the total is zero.
#[must_use]
pub fn percent(covered: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * covered as f64 / total as f64
    }
}

/// Statement coverage of a single function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCoverage {
    pub name: String,
    pub covered: u64,
    pub total: u64,
    pub coverage: f64,
}

impl FunctionCoverage {
    pub fn new(name: impl Into<String>, covered: u64, total: u64) -> Self {
        Self {
            name: name.into(),
            covered,
            total,
            coverage: percent(covered, total),
        }
    }
}

/// Statement coverage of a source file, with its functions in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileCoverage {
    /// File identifier as it appears in the profile.
    pub name: String,
    /// Location of the file relative to the source root, `/`-separated.
    pub path: String,
    pub covered: u64,
    pub total: u64,
    pub coverage: f64,
    pub functions: Vec<FunctionCoverage>,
}

impl FileCoverage {
    /// Aggregate a file from its functions' statement counts.
    pub fn new(name: String, path: String, functions: Vec<FunctionCoverage>) -> Self {
        let covered = functions.iter().map(|f| f.covered).sum();
        let total = functions.iter().map(|f| f.total).sum();
        Self {
            name,
            path,
            covered,
            total,
            coverage: percent(covered, total),
            functions,
        }
    }
}

/// The aggregated report for one profile, files in profile order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub covered: u64,
    pub total: u64,
    pub coverage: f64,
    pub files: Vec<FileCoverage>,
}

impl Overview {
    /// Aggregate over all files' statement counts (not a mean of file percentages).
    pub fn new(files: Vec<FileCoverage>) -> Self {
        let covered = files.iter().map(|f| f.covered).sum();
        let total = files.iter().map(|f| f.total).sum();
        Self {
            covered,
            total,
            coverage: percent(covered, total),
            files,
        }
    }
}

/// A percentage before and after.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Change {
    pub baseline: f64,
    pub current: f64,
}

impl Change {
    pub fn new(baseline: f64, current: f64) -> Self {
        Self { baseline, current }
    }

    #[must_use]
    pub fn delta(&self) -> f64 {
        self.current - self.baseline
    }

    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.baseline != self.current
    }
}

/// A function whose coverage differs between baseline and current.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub name: String,
    pub change: Change,
}

/// A file with at least one changed function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffFile {
    pub name: String,
    pub path: String,
    pub change: Change,
    /// The file is absent from the baseline report.
    pub added: bool,
    pub entries: Vec<DiffEntry>,
}

/// Change-only comparison of two overviews.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Diff {
    /// Present only when the total percentage moved.
    pub total: Option<Change>,
    pub files: Vec<DiffFile>,
}

impl Diff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total.is_none() && self.files.is_empty()
    }
}
