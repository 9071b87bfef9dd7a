use anyhow::{Context, Result};
use fst::{IntoStreamer, Set, Streamer};
use lazy_static::lazy_static;

/// Known-misspelled word forms, stored lowercase.
const MISSPELLINGS: &[&str] = &[
    "вечерррм", "домй", "вдргг", "ттень", "спросла", "бьло", "птшла",
    "бысрее", "ногг", "споткнлась", "кррень", "кошкаа", "засмеялсь", "серце",
    "стукло", "вдрууг", "тмны", "старичк", "фонарм", "бйсь", "футбоо",
    "дворц", "полетнл", "подуумал", "назд", "выбежла", "мячм", "вздхнул",
    "угрдел", "тепеерь", "грязныйыы", "кррррч", "экрне", "птгас", "пробрррбррмутал",
    "клавыатуру", "млькнул", "привт", "пркхожу", "раздлся", "колонк", "вырррвал", "сдааам",
];

lazy_static! {
    static ref BUILTIN: Vocabulary = Vocabulary::from_words(MISSPELLINGS).unwrap();
}

/// Immutable set of misspelled word forms, matched case-insensitively.
pub struct Vocabulary {
    set: Set<Vec<u8>>,
}

impl Vocabulary {
    /// The built-in vocabulary, built on first use and shared read-only.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Result<Self> {
        let mut sorted: Vec<String> = words.iter().map(|w| w.as_ref().to_lowercase()).collect();
        sorted.sort();
        sorted.dedup();

        let set = Set::from_iter(sorted).context("Failed to build vocabulary")?;
        Ok(Self { set })
    }

    pub fn contains(&self, word: &str) -> bool {
        self.set.contains(word.to_lowercase().as_bytes())
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.set.len());
        let mut stream = self.set.into_stream();

        while let Some(key) = stream.next() {
            if let Ok(word) = String::from_utf8(key.to_vec()) {
                words.push(word);
            }
        }

        words
    }
}
