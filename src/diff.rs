//! Change-only comparison of two overviews built from the same source tree.
//!
//! Output order always follows the current overview: files in its order and
//! functions in declaration order. Files that only exist in the baseline are
//! not reported. A file or function missing from the baseline compares
//! against 0%.

use std::collections::HashMap;

use crate::model::{Change, Diff, DiffEntry, DiffFile, FileCoverage, FunctionCoverage, Overview};

/// Compare `baseline` against `current`.
#[must_use]
pub fn compare(baseline: &Overview, current: &Overview) -> Diff {
    let total = Change::new(baseline.coverage, current.coverage);

    let baseline_files: HashMap<&str, &FileCoverage> = baseline
        .files
        .iter()
        .map(|f| (f.name.as_str(), f))
        .collect();

    let mut files = Vec::new();
    for file in &current.files {
        let old = baseline_files.get(file.name.as_str()).copied();
        if let Some(diff_file) = compare_file(old, file) {
            files.push(diff_file);
        }
    }

    tracing::debug!(changed_files = files.len(), "compared overviews");

    Diff {
        total: total.is_changed().then_some(total),
        files,
    }
}

/// Diff one file, or `None` when none of its functions changed.
fn compare_file(baseline: Option<&FileCoverage>, current: &FileCoverage) -> Option<DiffFile> {
    let baseline_funcs: HashMap<&str, &FunctionCoverage> = baseline
        .map(|f| f.functions.iter().map(|func| (func.name.as_str(), func)).collect())
        .unwrap_or_default();

    let entries: Vec<DiffEntry> = current
        .functions
        .iter()
        .filter_map(|func| {
            let old = baseline_funcs
                .get(func.name.as_str())
                .map_or(0.0, |f| f.coverage);
            let change = Change::new(old, func.coverage);
            change.is_changed().then(|| DiffEntry {
                name: func.name.clone(),
                change,
            })
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    Some(DiffFile {
        name: current.name.clone(),
        path: current.path.clone(),
        change: Change::new(baseline.map_or(0.0, |f| f.coverage), current.coverage),
        added: baseline.is_none(),
        entries,
    })
}
