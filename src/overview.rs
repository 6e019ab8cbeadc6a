//! Build an [`Overview`] from a profile and a source tree.

use std::path::Path;

use crate::coverage::function_coverage;
use crate::error::Result;
use crate::funcs::find_funcs;
use crate::locate::SourceIndex;
use crate::model::{FileCoverage, FunctionCoverage, Overview};
use crate::profile::Profile;

/// Whether `name` starts with any of the exclude strings. This is a plain
/// string prefix test, not a path match.
#[must_use]
pub fn is_excluded(name: &str, exclude: &[String]) -> bool {
    exclude.iter().any(|prefix| name.starts_with(prefix.as_str()))
}

/// Aggregate `profile` over the files in `index`.
///
/// Files are processed in profile order and functions in declaration order.
/// Any file that cannot be resolved or parsed aborts the whole build.
pub fn build(profile: &Profile, index: &SourceIndex, exclude: &[String]) -> Result<Overview> {
    let mut files = Vec::with_capacity(profile.files.len());

    for entry in &profile.files {
        if is_excluded(&entry.name, exclude) {
            tracing::debug!(file = %entry.name, "excluded");
            continue;
        }

        let source = index.resolve(&entry.name)?;
        let funcs = find_funcs(&source.path, &source.contents)?;

        let functions: Vec<FunctionCoverage> = funcs
            .iter()
            .map(|func| {
                let (covered, total) = function_coverage(func, &entry.blocks);
                FunctionCoverage::new(func.name.clone(), covered, total)
            })
            .collect();

        let file = FileCoverage::new(entry.name.clone(), source.relative, functions);
        tracing::debug!(
            file = %file.name,
            functions = file.functions.len(),
            covered = file.covered,
            total = file.total,
            "processed"
        );
        files.push(file);
    }

    Ok(Overview::new(files))
}

/// Read the profile at `profile_path`, index `src_root`, and build the overview.
pub fn report(profile_path: &Path, src_root: &Path, exclude: &[String]) -> Result<Overview> {
    let profile = Profile::from_path(profile_path)?;
    let index = SourceIndex::build(src_root)?;
    let overview = build(&profile, &index, exclude)?;

    tracing::info!(
        profile = %profile_path.display(),
        files = overview.files.len(),
        coverage = overview.coverage,
        "built coverage overview"
    );
    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_excluded() {
        let exclude = vec!["example.com/demo/internal".to_string(), "gen_".to_string()];
        assert!(is_excluded("example.com/demo/internal/x.go", &exclude));
        assert!(is_excluded("example.com/demo/internalize/y.go", &exclude));
        assert!(is_excluded("gen_foo.go", &exclude));
        assert!(!is_excluded("example.com/demo/main.go", &exclude));
        assert!(!is_excluded("example.com/demo/main.go", &[]));
    }

    #[test]
    fn test_build_skips_excluded_without_lookup() {
        // The index is empty, so any lookup would fail.
        let dir = tempfile::tempdir().unwrap();
        let index = SourceIndex::build(dir.path()).unwrap();
        let profile = Profile::parse("mode: set\nexample.com/gone/a.go:1.1,2.2 1 1\n").unwrap();

        let overview = build(&profile, &index, &["example.com/gone".to_string()]).unwrap();
        assert!(overview.files.is_empty());
        assert_eq!(overview.coverage, 0.0);

        assert!(build(&profile, &index, &[]).is_err());
    }
}
