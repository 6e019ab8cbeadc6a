//! Run configuration, built once at startup and passed down by reference.

use std::path::PathBuf;

use crate::report::{HtmlFormatter, JsonFormatter, LinkTemplate, ReportFormatter, TextFormatter};

/// Output style for reports and diffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Html,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Coverage profile for the current run.
    pub profile: PathBuf,
    /// Baseline profile; when set, a diff is produced instead of a report.
    pub diff: Option<PathBuf>,
    /// Source root the profile's file identifiers are resolved against.
    pub src: PathBuf,
    /// File identifier prefixes to leave out of the report.
    pub exclude: Vec<String>,
    pub output: OutputMode,
    pub link: Option<LinkTemplate>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: PathBuf::from("coverage"),
            diff: None,
            src: PathBuf::from("."),
            exclude: Vec::new(),
            output: OutputMode::Text,
            link: None,
        }
    }
}

impl Config {
    pub fn formatter(&self) -> Box<dyn ReportFormatter> {
        match self.output {
            OutputMode::Text => Box::new(TextFormatter),
            OutputMode::Html => Box::new(HtmlFormatter::new(self.link.clone())),
            OutputMode::Json => Box::new(JsonFormatter),
        }
    }
}

/// Normalize exclude entries. Empty entries are dropped: as a prefix they
/// would match every file.
pub fn parse_exclude<S: AsRef<str>>(entries: &[S]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.as_ref().trim())
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}
