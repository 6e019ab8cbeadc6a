use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GoatcovError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Coverage profile line {line}: {message}")]
    ProfileParse { line: usize, message: String },

    #[error("Unable to find file {0:?} under the source root")]
    FileResolution(String),

    #[error("{}:{line}:{column}: syntax error", .path.display())]
    SourceParse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to load Go grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
}

impl GoatcovError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GoatcovError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn profile(line: usize, message: impl Into<String>) -> Self {
        GoatcovError::ProfileParse {
            line,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GoatcovError>;
