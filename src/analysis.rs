use crate::{AnalysisResult, WordCount};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

const LONG_WORD_MIN_CHARS: usize = 9;
const TOP_N: usize = 5;

lazy_static! {
    pub(crate) static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref SENTENCE_TERMINATORS: Regex = Regex::new(r"[.!?]+").unwrap();
}

/// Compute word, character and sentence statistics for `text`.
///
/// Whitespace-only input yields the zero-valued result. Lengths are counted in
/// chars, and `character_count` includes every whitespace character of the
/// untrimmed input.
pub fn analyze(text: &str) -> AnalysisResult {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AnalysisResult::default();
    }

    let words: Vec<&str> = WHITESPACE.split(trimmed).collect();

    let sentence_count = SENTENCE_TERMINATORS
        .split(text)
        .filter(|segment| !segment.is_empty())
        .count();

    let total_chars: usize = words.iter().map(|w| w.chars().count()).sum();
    let average_word_length = round1(total_chars as f64 / words.len() as f64);

    AnalysisResult {
        word_count: words.len(),
        character_count: text.chars().count(),
        sentence_count,
        average_word_length,
        long_words: long_words(&words),
        common_words: common_words(&words),
    }
}

/// Shortened rendition of `text`: every other whitespace-delimited token,
/// starting with the first.
pub fn summarize(text: &str) -> String {
    WHITESPACE
        .split(text)
        .step_by(2)
        .collect::<Vec<_>>()
        .join(" ")
}

fn long_words(words: &[&str]) -> Vec<String> {
    let mut seen = HashSet::new();
    words
        .iter()
        .filter(|w| w.chars().count() >= LONG_WORD_MIN_CHARS)
        .filter(|w| seen.insert(**w))
        .take(TOP_N)
        .map(|w| w.to_string())
        .collect()
}

fn common_words(words: &[&str]) -> Vec<WordCount> {
    // Vec keeps first-seen order so the stable sort below breaks ties by it
    let mut table: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for word in words {
        let normalized = word.to_lowercase();
        match index.get(&normalized) {
            Some(&i) => table[i].count += 1,
            None => {
                index.insert(normalized.clone(), table.len());
                table.push(WordCount {
                    word: normalized,
                    count: 1,
                });
            }
        }
    }

    table.sort_by(|a, b| b.count.cmp(&a.count));
    table.truncate(TOP_N);
    table
}

/// One decimal place, rounding the exact binary value the way `toFixed(1)`
/// does: 1.45 is stored just below the tie and goes down, while the exact
/// ties (quarters) go up.
fn round1(v: f64) -> f64 {
    let quarters = v * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
        return (v * 10.0 + 0.5).floor() / 10.0;
    }
    format!("{:.1}", v).parse().unwrap_or(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(analyze(""), AnalysisResult::default());
        assert_eq!(analyze("   \n\t "), AnalysisResult::default());
    }

    #[test]
    fn test_simple_sentences() {
        let result = analyze("The cat sat on the mat. The dog ran.");
        assert_eq!(result.word_count, 9);
        assert_eq!(result.sentence_count, 2);
        assert_eq!(result.character_count, 36);
        assert_eq!(
            result.common_words[0],
            WordCount {
                word: "the".to_string(),
                count: 3
            }
        );
        assert_eq!(result.common_words.len(), 5);
        assert!(result.long_words.is_empty());
    }

    #[test]
    fn test_character_count_keeps_untrimmed_whitespace() {
        let result = analyze("  hi there  ");
        assert_eq!(result.word_count, 2);
        assert_eq!(result.character_count, 12);
    }

    #[test]
    fn test_character_count_is_in_chars() {
        let result = analyze("привет мир");
        assert_eq!(result.character_count, 10);
        assert_eq!(result.average_word_length, 4.5);
    }

    #[test]
    fn test_sentence_count_ignores_terminator_runs() {
        assert_eq!(analyze("Wait... what?! Yes.").sentence_count, 3);
        assert_eq!(analyze("no terminator").sentence_count, 1);
        // Whitespace between terminators still forms a segment
        assert_eq!(analyze("One. Two. ").sentence_count, 3);
    }

    #[test]
    fn test_average_word_length_rounds_to_one_decimal() {
        // (1 + 2 + 2) / 3 = 1.666...
        assert_eq!(analyze("a bb cc").average_word_length, 1.7);
    }

    #[test]
    fn test_average_word_length_halves_follow_stored_value() {
        // 29 chars over 20 words: 1.45 is stored as 1.4499...
        let text = format!("{} {}", vec!["bb"; 9].join(" "), vec!["a"; 11].join(" "));
        assert_eq!(analyze(&text).average_word_length, 1.4);

        assert_eq!(round1(23.0 / 20.0), 1.1);
        assert_eq!(round1(29.0 / 20.0), 1.4);
        assert_eq!(round1(5.0 / 4.0), 1.3);
        assert_eq!(round1(7.0 / 4.0), 1.8);
        assert_eq!(round1(3.0), 3.0);
    }

    #[test]
    fn test_long_words_are_distinct_and_capped() {
        let text = "extraordinary Extraordinary extraordinary wonderful \
                    magnificent incredible remarkable spectacular phenomenal";
        let result = analyze(text);
        assert_eq!(
            result.long_words,
            vec![
                "extraordinary",
                "Extraordinary",
                "wonderful",
                "magnificent",
                "incredible"
            ]
        );
    }

    #[test]
    fn test_eight_char_words_are_not_long() {
        assert!(analyze("absolute").long_words.is_empty());
        assert_eq!(analyze("absolutes").long_words, vec!["absolutes"]);
    }

    #[test]
    fn test_common_words_ties_keep_first_seen_order() {
        let result = analyze("b a B c a d e f");
        let words: Vec<_> = result
            .common_words
            .iter()
            .map(|wc| (wc.word.as_str(), wc.count))
            .collect();
        assert_eq!(
            words,
            vec![("b", 2), ("a", 2), ("c", 1), ("d", 1), ("e", 1)]
        );
    }

    #[test]
    fn test_summarize_keeps_even_tokens() {
        assert_eq!(summarize("one two three four five"), "one three five");
        assert_eq!(summarize("one   two\nthree"), "one three");
        assert_eq!(summarize(""), "");
    }
}
