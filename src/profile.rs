/// Reader for Go's `-coverprofile` format.
///
/// Reference: https://go.dev/blog/cover
///
/// Format:
///   mode: set|count|atomic
///   <file>:<startLine>.<startCol>,<endLine>.<endCol> <numStatements> <count>
///
/// Each line describes a basic block with the number of statements in the
/// block and how many times it was executed. Unlike a line-oriented report we
/// keep blocks intact: statement counts are what the per-function percentages
/// are computed from.
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{GoatcovError, Result};

static BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+):([0-9]+)\.([0-9]+),([0-9]+)\.([0-9]+) ([0-9]+) ([0-9]+)$").unwrap()
});

/// How hit counts were recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Set,
    Count,
    Atomic,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Set => "set",
            Mode::Count => "count",
            Mode::Atomic => "atomic",
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "set" => Ok(Mode::Set),
            "count" => Ok(Mode::Count),
            "atomic" => Ok(Mode::Atomic),
            _ => Err(format!("unknown mode {s:?}; expected set, count or atomic")),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A line/column position in a source file, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

/// One block of the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageBlock {
    pub start: Position,
    pub end: Position,
    pub statements: u32,
    pub hits: u64,
}

/// All blocks recorded for one file identifier, sorted by start position.
#[derive(Debug, Clone, PartialEq)]
pub struct FileProfile {
    /// Import path qualified file name, e.g. `example.com/pkg/file.go`.
    pub name: String,
    pub blocks: Vec<CoverageBlock>,
}

/// A parsed coverage profile. Files keep their first-appearance order.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub mode: Mode,
    pub files: Vec<FileProfile>,
}

impl Profile {
    /// Read and parse a profile from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let input = std::fs::read_to_string(path).map_err(|e| GoatcovError::io(path, e))?;
        Self::parse(&input)
    }

    /// Parse profile text. Any malformed line fails the whole profile.
    pub fn parse(input: &str) -> Result<Self> {
        let mut mode: Option<Mode> = None;

        // Blocks grouped by file, preserving insertion order. Each block keeps
        // the line it came from for error reporting while folding.
        let mut file_order: Vec<String> = Vec::new();
        let mut file_blocks: HashMap<String, Vec<(usize, CoverageBlock)>> = HashMap::new();

        for (idx, raw_line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(rest) = line.strip_prefix("mode:") {
                let parsed: Mode = rest
                    .trim()
                    .parse()
                    .map_err(|e: String| GoatcovError::profile(line_no, e))?;
                match mode {
                    None => mode = Some(parsed),
                    // Concatenated profiles repeat the header.
                    Some(existing) if existing == parsed => {}
                    Some(existing) => {
                        return Err(GoatcovError::profile(
                            line_no,
                            format!("mode {parsed} conflicts with earlier mode {existing}"),
                        ));
                    }
                }
                continue;
            }

            if mode.is_none() {
                return Err(GoatcovError::profile(
                    line_no,
                    format!("expected a \"mode:\" header, found {line:?}"),
                ));
            }

            let (file, block) = parse_block_line(line).ok_or_else(|| {
                GoatcovError::profile(line_no, format!("malformed block {line:?}"))
            })?;
            if !file_blocks.contains_key(file) {
                file_order.push(file.to_string());
            }
            file_blocks
                .entry(file.to_string())
                .or_default()
                .push((line_no, block));
        }

        let Some(mode) = mode else {
            return Err(GoatcovError::profile(1, "missing \"mode:\" header"));
        };

        let mut files = Vec::with_capacity(file_order.len());
        for name in file_order {
            if let Some(blocks) = file_blocks.remove(&name) {
                files.push(FileProfile {
                    name,
                    blocks: fold_blocks(mode, blocks)?,
                });
            }
        }

        Ok(Profile { mode, files })
    }
}

/// Parse a single block line, returning (file_name, block).
///
/// Format: `<file>:<startLine>.<startCol>,<endLine>.<endCol> <numStmt> <count>`
fn parse_block_line(line: &str) -> Option<(&str, CoverageBlock)> {
    let caps = BLOCK_RE.captures(line)?;
    let num = |i: usize| caps.get(i).map(|m| m.as_str());

    let file = caps.get(1)?.as_str();
    let block = CoverageBlock {
        start: Position {
            line: num(2)?.parse().ok()?,
            column: num(3)?.parse().ok()?,
        },
        end: Position {
            line: num(4)?.parse().ok()?,
            column: num(5)?.parse().ok()?,
        },
        statements: num(6)?.parse().ok()?,
        hits: num(7)?.parse().ok()?,
    };
    Some((file, block))
}

/// Sort a file's blocks by position and fold blocks recorded more than once
/// for the same range (as happens when several test binaries instrument the
/// same package).
fn fold_blocks(mode: Mode, mut blocks: Vec<(usize, CoverageBlock)>) -> Result<Vec<CoverageBlock>> {
    blocks.sort_by_key(|(_, b)| (b.start, b.end));

    let mut folded: Vec<CoverageBlock> = Vec::with_capacity(blocks.len());
    for (line_no, block) in blocks {
        match folded.last_mut() {
            Some(last) if last.start == block.start && last.end == block.end => {
                if last.statements != block.statements {
                    return Err(GoatcovError::profile(
                        line_no,
                        format!(
                            "inconsistent statement count for block {}.{},{}.{}: {} vs {}",
                            block.start.line,
                            block.start.column,
                            block.end.line,
                            block.end.column,
                            last.statements,
                            block.statements
                        ),
                    ));
                }
                last.hits = match mode {
                    Mode::Set => u64::from(last.hits > 0 || block.hits > 0),
                    Mode::Count | Mode::Atomic => last.hits.saturating_add(block.hits),
                };
            }
            _ => folded.push(block),
        }
    }
    Ok(folded)
}
