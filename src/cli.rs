//! Command handler functions for the goatcov CLI.
//!
//! Each `cmd_*` function returns its output as a `String`, making them easy
//! to test without capturing stdout.

use std::ffi::OsString;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::{diff, overview};

/// Long flags that may also be spelled with a single dash, as Go's `flag`
/// package allows (`-profile x`, `-exclude=a,b`).
const LONG_FLAGS: &[&str] = &[
    "profile", "diff", "src", "exclude", "html", "json", "link", "verbose",
];

/// Rewrite single-dash long flags to their double-dash form. Arguments after
/// a bare `--` are left alone, as are short flags such as `-v`.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut literal = false;
    for arg in args {
        let arg: OsString = arg.into();
        if literal {
            out.push(arg);
            continue;
        }
        let rewritten = arg.to_str().and_then(|s| {
            let flag = s.strip_prefix('-').filter(|f| !f.starts_with('-'))?;
            let name = flag.split('=').next().unwrap_or(flag);
            LONG_FLAGS.contains(&name).then(|| OsString::from(format!("-{s}")))
        });
        if arg == "--" {
            literal = true;
        }
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

/// Dispatch on the configuration: a diff when a baseline is given, a report otherwise.
pub fn run(config: &Config) -> Result<String> {
    match &config.diff {
        Some(baseline) => cmd_diff(config, baseline),
        None => cmd_report(config),
    }
}

/// Render the coverage overview for `config.profile`.
pub fn cmd_report(config: &Config) -> Result<String> {
    let overview = overview::report(&config.profile, &config.src, &config.exclude)
        .with_context(|| format!("Failed to build report for {}", config.profile.display()))?;
    Ok(config.formatter().overview(&overview)?)
}

/// Render the changes between `baseline` and `config.profile`.
pub fn cmd_diff(config: &Config, baseline: &Path) -> Result<String> {
    let old = overview::report(baseline, &config.src, &config.exclude)
        .with_context(|| format!("Failed to build report for {}", baseline.display()))?;
    let new = overview::report(&config.profile, &config.src, &config.exclude)
        .with_context(|| format!("Failed to build report for {}", config.profile.display()))?;

    let changes = diff::compare(&old, &new);
    Ok(config.formatter().diff(&changes)?)
}
