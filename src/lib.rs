pub mod analysis;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod parser;
pub mod render;

pub use analysis::{analyze, summarize};
pub use checker::{apply_corrections, find_errors, Checker, PositionMode};
pub use config::Config;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Aggregate statistics for a piece of text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub word_count: usize,
    pub character_count: usize,
    pub sentence_count: usize,
    pub average_word_length: f64,
    pub long_words: Vec<String>,
    pub common_words: Vec<WordCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Spelling,
    Grammar,
    Style,
    Punctuation,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Spelling => write!(f, "spelling"),
            ErrorKind::Grammar => write!(f, "grammar"),
            ErrorKind::Style => write!(f, "style"),
            ErrorKind::Punctuation => write!(f, "punctuation"),
            ErrorKind::Other => write!(f, "other"),
        }
    }
}

/// A detected issue. `start..end` is a half-open char span into the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextError {
    pub start: usize,
    pub end: usize,
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub suggestions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}
