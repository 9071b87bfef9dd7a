use crate::config::Language;
use crate::history::HistoryEntry;
use crate::render::Segment;
use crate::{AnalysisResult, TextError};
use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use colored::*;
use dialoguer::Select;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Translated labels for human-readable output.
pub struct Labels {
    pub word_stats: &'static str,
    pub words: &'static str,
    pub characters: &'static str,
    pub sentences: &'static str,
    pub average_word_length: &'static str,
    pub long_words: &'static str,
    pub no_long_words: &'static str,
    pub common_words: &'static str,
    pub no_common_words: &'static str,
    pub shortened_text: &'static str,
    pub corrected_text: &'static str,
    pub issues_found: &'static str,
    pub no_issues: &'static str,
    pub history: &'static str,
    pub no_history: &'static str,
}

static EN: Labels = Labels {
    word_stats: "Word Stats",
    words: "Words",
    characters: "Characters",
    sentences: "Sentences",
    average_word_length: "Average Word Length",
    long_words: "Long Words",
    no_long_words: "No long words found.",
    common_words: "Common Words",
    no_common_words: "No common words found.",
    shortened_text: "Shortened Text",
    corrected_text: "Corrected Text",
    issues_found: "Potential issues found",
    no_issues: "No issues found!",
    history: "History",
    no_history: "No history available",
};

static RU: Labels = Labels {
    word_stats: "Статистика слов",
    words: "Слов",
    characters: "Символов",
    sentences: "Предложений",
    average_word_length: "Средняя длина слова",
    long_words: "Длинные слова",
    no_long_words: "Длинные слова не найдены.",
    common_words: "Частые слова",
    no_common_words: "Частые слова не найдены.",
    shortened_text: "Сокращенный текст",
    corrected_text: "Исправленный текст",
    issues_found: "Потенциальных проблем найдено",
    no_issues: "Проблем не найдено!",
    history: "История",
    no_history: "История отсутствует",
};

impl Labels {
    pub fn for_language(language: Language) -> &'static Labels {
        match language {
            Language::En => &EN,
            Language::Ru => &RU,
        }
    }
}

/// 1-indexed line and column of a char offset, clamped to the text.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for ch in text.chars().take(offset) {
        if ch == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

fn span_text(text: &str, error: &TextError) -> String {
    text.chars()
        .skip(error.start)
        .take(error.end.saturating_sub(error.start))
        .collect()
}

fn print_heading(source: &str, colored_output: bool) {
    if colored_output {
        println!("\n{}", source.bold().underline());
    } else {
        println!("\n{}", source);
    }
}

pub fn print_errors(source: &str, text: &str, errors: &[TextError], colored_output: bool) {
    if errors.is_empty() {
        return;
    }

    print_heading(source, colored_output);

    for error in errors {
        let (line, column) = line_col(text, error.start);
        let line_info = format!("{}:{}", line, column);
        let word = span_text(text, error);
        let kind = error.kind.to_string();

        if colored_output {
            println!(
                "  {} {} {} {}",
                line_info.blue().bold(),
                kind.yellow(),
                word.red().bold(),
                error.message.dimmed()
            );
        } else {
            println!("  {} {} {} {}", line_info, kind, word, error.message);
        }

        if let Some(context) = &error.context {
            println!("    {}", format_context(context, &word, colored_output));
        }

        if !error.suggestions.is_empty() {
            let suggestions = if colored_output {
                error
                    .suggestions
                    .iter()
                    .take(5)
                    .map(|s| s.green().to_string())
                    .collect::<Vec<_>>()
                    .join(&", ".dimmed().to_string())
            } else {
                error
                    .suggestions
                    .iter()
                    .take(5)
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let arrow = if colored_output {
                "→".dimmed().to_string()
            } else {
                "→".to_string()
            };
            println!("    {} {}", arrow, suggestions);
        }
    }
}

fn format_context(context: &str, word: &str, colored: bool) -> String {
    if colored && !word.is_empty() {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

pub fn print_analysis(
    source: &str,
    analysis: &AnalysisResult,
    summary: &str,
    labels: &Labels,
    colored_output: bool,
) {
    print_heading(source, colored_output);

    let section = |title: &str| {
        if colored_output {
            println!("  {}", title.cyan().bold());
        } else {
            println!("  {}", title);
        }
    };

    section(labels.word_stats);
    println!("    {}: {}", labels.words, analysis.word_count);
    println!("    {}: {}", labels.characters, analysis.character_count);
    println!("    {}: {}", labels.sentences, analysis.sentence_count);
    if analysis.average_word_length > 0.0 {
        println!(
            "    {}: {:.1}",
            labels.average_word_length, analysis.average_word_length
        );
    }

    section(labels.long_words);
    if analysis.long_words.is_empty() {
        println!("    {}", labels.no_long_words);
    }
    for word in &analysis.long_words {
        println!("    {}", word);
    }

    section(labels.common_words);
    if analysis.common_words.is_empty() {
        println!("    {}", labels.no_common_words);
    }
    for wc in &analysis.common_words {
        println!("    {} ({})", wc.word, wc.count);
    }

    if !summary.is_empty() {
        section(labels.shortened_text);
        println!("    {}", summary);
    }
}

/// Print the corrected rendition, highlighting every replaced span.
pub fn print_corrected(segments: &[Segment], colored_output: bool) {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(text) => out.push_str(text),
            Segment::Corrected { replacement, .. } if colored_output => {
                out.push_str(&replacement.green().underline().to_string());
            }
            Segment::Corrected { replacement, .. } => out.push_str(replacement),
        }
    }
    println!("{}", out);
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to encode JSON output")?;
    println!("{}", json);
    Ok(())
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

pub fn print_check_summary(total_errors: usize, sources: usize, labels: &Labels, colored: bool) {
    println!();
    if total_errors == 0 {
        let line = format!("✓ {}", labels.no_issues);
        if colored {
            println!("{}", line.green().bold());
        } else {
            println!("{}", line);
        }
    } else if colored {
        println!(
            "{} {}: {} ({} {})",
            "✗".red().bold(),
            labels.issues_found,
            total_errors.to_string().red().bold(),
            sources,
            plural(sources, "input", "inputs")
        );
    } else {
        println!(
            "✗ {}: {} ({} {})",
            labels.issues_found,
            total_errors,
            sources,
            plural(sources, "input", "inputs")
        );
    }
}

pub fn print_fix_summary(total_fixed: usize, sources: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = plural(total_fixed, "correction", "corrections");
        let source_word = plural(sources, "file", "files");
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                sources,
                source_word
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed, fix_word, sources, source_word
            );
        }
    }
}

fn format_timestamp(millis: i64) -> String {
    match Local.timestamp_millis_opt(millis).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => millis.to_string(),
    }
}

pub fn print_history(entries: &[HistoryEntry], labels: &Labels, colored: bool) {
    if colored {
        println!("{}", labels.history.bold());
    } else {
        println!("{}", labels.history);
    }

    if entries.is_empty() {
        println!("  {}", labels.no_history);
        return;
    }

    for entry in entries {
        let preview = entry.preview.replace('\n', " ");
        if colored {
            println!(
                "  {} {} {} {}",
                entry.id.cyan(),
                format_timestamp(entry.timestamp).dimmed(),
                format!("[{} errors]", entry.errors.len()).yellow(),
                preview
            );
        } else {
            println!(
                "  {} {} [{} errors] {}",
                entry.id,
                format_timestamp(entry.timestamp),
                entry.errors.len(),
                preview
            );
        }
    }
}

pub fn print_history_entry(entry: &HistoryEntry, labels: &Labels, colored: bool) {
    let source = format!("{} ({})", entry.id, format_timestamp(entry.timestamp));
    print_analysis(&source, &entry.analysis, "", labels, colored);
    print_errors(&entry.id, &entry.original_text, &entry.errors, colored);

    println!();
    if colored {
        println!("  {}", labels.corrected_text.cyan().bold());
    } else {
        println!("  {}", labels.corrected_text);
    }
    println!("{}", entry.corrected_text);
}

/// What the user picked for one error in interactive fix mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Replace(String),
    Keep,
    Quit,
}

pub fn prompt_correction(text: &str, error: &TextError, colored: bool) -> Result<Choice> {
    let (line, column) = line_col(text, error.start);
    let word = span_text(text, error);

    if colored {
        println!(
            "\n{} {}:{}",
            error.message.yellow().bold(),
            line.to_string().blue(),
            column.to_string().blue()
        );
        println!("  {}", word.red().bold());
    } else {
        println!("\n{} {}:{}", error.message, line, column);
        println!("  {}", word);
    }

    let mut options: Vec<String> = error.suggestions.iter().take(9).cloned().collect();
    let keep = options.len();
    options.push("Keep original".to_string());
    options.push("Quit".to_string());

    let picked = Select::new()
        .with_prompt("Replace with")
        .items(&options)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    Ok(match picked {
        i if i < keep => Choice::Replace(options[i].clone()),
        i if i == keep => Choice::Keep,
        _ => Choice::Quit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let text = "first line\nsecond домй";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 6), (1, 7));
        assert_eq!(line_col(text, 18), (2, 8));
        assert_eq!(line_col(text, 1000), (2, 12));
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_labels_follow_language() {
        assert_eq!(Labels::for_language(Language::En).words, "Words");
        assert_eq!(Labels::for_language(Language::Ru).words, "Слов");
    }
}
