use std::path::PathBuf;
use thiserror::Error;

/// Failures turning an input file into plain text.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("{path}: not a regular file")]
    InvalidFileType { path: PathBuf },

    #[error("{path}: file is {size} bytes, limit is {limit}")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{path}: could not parse contents: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("{path}: {format} documents are not supported; convert to plain text first")]
    UnsupportedFormat { path: PathBuf, format: &'static str },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reading or writing the history file.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history directory is unavailable")]
    NoDataDir,

    #[error("failed to access history file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode history")]
    Encode(#[from] serde_json::Error),

    #[error("no history entry with id {0}")]
    NotFound(String),
}
