use std::collections::HashMap;

/// Number of identical consecutive chars that counts as a repetition error.
const REPEAT_THRESHOLD: usize = 3;
/// Length a flagged run is collapsed to.
const COLLAPSED_RUN: usize = 2;

/// Supplies replacement candidates for a word found in the vocabulary.
pub trait Corrector: Send + Sync {
    fn suggest(&self, word: &str) -> Vec<String>;
}

/// Suggests the word itself. No correction table exists for the built-in
/// vocabulary, so this is what the detector uses unless told otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityCorrector;

impl Corrector for IdentityCorrector {
    fn suggest(&self, word: &str) -> Vec<String> {
        vec![word.to_string()]
    }
}

/// Case-insensitive `{word -> candidates}` lookup; unknown words fall back to
/// identity.
#[derive(Debug, Clone, Default)]
pub struct MapCorrector {
    table: HashMap<String, Vec<String>>,
}

impl MapCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, word: &str, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.table.insert(
            word.to_lowercase(),
            candidates.into_iter().map(Into::into).collect(),
        );
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for MapCorrector {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut corrector = Self::new();
        for (word, candidate) in iter {
            corrector
                .table
                .entry(word.as_ref().to_lowercase())
                .or_default()
                .push(candidate.as_ref().to_string());
        }
        corrector
    }
}

impl Corrector for MapCorrector {
    fn suggest(&self, word: &str) -> Vec<String> {
        match self.table.get(&word.to_lowercase()) {
            Some(candidates) if !candidates.is_empty() => candidates.clone(),
            _ => IdentityCorrector.suggest(word),
        }
    }
}

/// True when some char appears `REPEAT_THRESHOLD` or more times in a row.
pub fn has_repeated_run(word: &str) -> bool {
    let mut prev = None;
    let mut run = 0;

    for ch in word.chars() {
        if Some(ch) == prev {
            run += 1;
            if run >= REPEAT_THRESHOLD {
                return true;
            }
        } else {
            prev = Some(ch);
            run = 1;
        }
    }

    false
}

/// Collapse every run of `REPEAT_THRESHOLD`+ identical chars to exactly two.
/// Shorter runs are left alone.
pub fn collapse_repeats(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut result = String::with_capacity(word.len());
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let mut run_end = i + 1;
        while run_end < chars.len() && chars[run_end] == ch {
            run_end += 1;
        }

        let run = run_end - i;
        let keep = if run >= REPEAT_THRESHOLD { COLLAPSED_RUN } else { run };
        result.extend(std::iter::repeat(ch).take(keep));

        i = run_end;
    }

    result
}
