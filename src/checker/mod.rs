pub mod suggestions;
pub mod tokenizer;
pub mod vocabulary;

use crate::{ErrorKind, TextError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use suggestions::{collapse_repeats, has_repeated_run, Corrector, IdentityCorrector};
use tokenizer::Token;
use vocabulary::Vocabulary;

pub const SPELLING_MESSAGE: &str = "Incorrect spelling: possible typo";
pub const REPETITION_MESSAGE: &str = "Possible punctuation error: repeated characters";

const CONTEXT_RADIUS: usize = 20;

/// How error spans are positioned in the checked text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionMode {
    /// Every word is assumed to be followed by exactly one separator.
    #[default]
    Approximate,
    /// Spans are the true char offsets of each word.
    Exact,
}

impl FromStr for PositionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approximate" => Ok(PositionMode::Approximate),
            "exact" => Ok(PositionMode::Exact),
            _ => Err(format!("Unknown position mode: {}", s)),
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionMode::Approximate => write!(f, "approximate"),
            PositionMode::Exact => write!(f, "exact"),
        }
    }
}

/// Word-by-word scanner for vocabulary misspellings and repeated characters.
pub struct Checker {
    vocabulary: &'static Vocabulary,
    corrector: Box<dyn Corrector>,
    positions: PositionMode,
}

impl Default for Checker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker {
    pub fn new() -> Self {
        Self {
            vocabulary: Vocabulary::builtin(),
            corrector: Box::new(IdentityCorrector),
            positions: PositionMode::default(),
        }
    }

    pub fn with_positions(mut self, positions: PositionMode) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_corrector(mut self, corrector: impl Corrector + 'static) -> Self {
        self.corrector = Box::new(corrector);
        self
    }

    pub fn check(&self, text: &str) -> Vec<TextError> {
        let tokens = match self.positions {
            PositionMode::Approximate => tokenizer::approximate(text),
            PositionMode::Exact => tokenizer::exact(text),
        };

        let mut errors = Vec::new();
        for token in &tokens {
            let context = match self.positions {
                PositionMode::Approximate => None,
                PositionMode::Exact => Some(get_context(text, token)),
            };

            if self.vocabulary.contains(token.text) {
                errors.push(TextError {
                    start: token.start,
                    end: token.end(),
                    kind: ErrorKind::Spelling,
                    message: SPELLING_MESSAGE.to_string(),
                    suggestions: self.corrector.suggest(token.text),
                    context: context.clone(),
                });
            }

            if has_repeated_run(token.text) {
                errors.push(TextError {
                    start: token.start,
                    end: token.end(),
                    kind: ErrorKind::Punctuation,
                    message: REPETITION_MESSAGE.to_string(),
                    suggestions: vec![collapse_repeats(token.text)],
                    context,
                });
            }
        }

        tracing::debug!(
            words = tokens.len(),
            errors = errors.len(),
            positions = %self.positions,
            "checked text"
        );

        errors
    }
}

/// Detect errors using approximate positioning and identity suggestions.
pub fn find_errors(text: &str) -> Vec<TextError> {
    Checker::new().check(text)
}

/// Rewrite `text`, replacing each error span with its first suggestion.
///
/// Spans are applied from the rightmost `start` leftwards so earlier offsets
/// stay valid. Errors sharing a `start` are applied in the order given. An
/// error without a usable suggestion is replaced by its own original text.
/// Offsets past the end of the text are clamped.
pub fn apply_corrections(text: &str, errors: &[TextError]) -> String {
    if errors.is_empty() {
        return text.to_string();
    }

    let original: Vec<char> = text.chars().collect();
    let mut result = original.clone();

    let mut ordered: Vec<&TextError> = errors.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    for error in ordered {
        let replacement: Vec<char> = match error.suggestions.first() {
            Some(suggestion) if !suggestion.is_empty() => suggestion.chars().collect(),
            _ => clamped(&original, error.start, error.end).to_vec(),
        };

        let start = error.start.min(result.len());
        let end = error.end.min(result.len());

        let mut next = Vec::with_capacity(result.len() + replacement.len());
        next.extend_from_slice(&result[..start]);
        next.extend(replacement);
        next.extend_from_slice(&result[end..]);
        result = next;
    }

    result.into_iter().collect()
}

fn clamped(chars: &[char], start: usize, end: usize) -> &[char] {
    let start = start.min(chars.len());
    let end = end.min(chars.len());
    if start >= end {
        &[]
    } else {
        &chars[start..end]
    }
}

fn get_context(text: &str, token: &Token<'_>) -> String {
    let total = text.chars().count();
    let start = token.start.saturating_sub(CONTEXT_RADIUS);
    let end = (token.end() + CONTEXT_RADIUS).min(total);
    let context: String = text.chars().skip(start).take(end - start).collect();
    let context = context.replace(['\n', '\r', '\t'], " ");

    if start > 0 && end < total {
        format!("...{}...", context)
    } else if start > 0 {
        format!("...{}", context)
    } else if end < total {
        format!("{}...", context)
    } else {
        context
    }
}
