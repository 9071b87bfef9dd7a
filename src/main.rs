use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use grammarguard::checker::{Checker, PositionMode};
use grammarguard::cli::output::{self, Choice, Labels, OutputFormat};
use grammarguard::config::{ConfigLayer, Language};
use grammarguard::history::{HistoryEntry, HistoryStore};
use grammarguard::parser::{self, FileType};
use grammarguard::render::{self, Segment};
use grammarguard::{analyze, apply_corrections, summarize, AnalysisResult, Config, TextError};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const STDIN_NAME: &str = "<stdin>";
const PROGRESS_THRESHOLD: usize = 8;

#[derive(Parser, Debug)]
#[command(name = "grammarguard")]
#[command(version, about = "Text statistics plus a simple spelling and punctuation critique", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Output format (text, json)
    #[arg(short = 'o', long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Language for labels and messages (en, ru)
    #[arg(short, long, global = true)]
    language: Option<Language>,

    /// Report true word offsets instead of one-space-per-word positions
    #[arg(long, global = true)]
    exact_positions: bool,

    /// Substitute suggestions into the text stored in history
    #[arg(long, global = true)]
    auto_apply: bool,

    /// Do not record this run in history
    #[arg(long, global = true)]
    no_history: bool,

    /// History file to use instead of the one in the data directory
    #[arg(long, global = true, env = "GRAMMARGUARD_HISTORY_FILE", value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report spelling and punctuation issues
    Check {
        /// Files or directories to check; reads stdin when empty or "-"
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Exit with code 0 even if issues are found
        #[arg(long)]
        no_fail: bool,
    },
    /// Show word statistics and a shortened rendition
    Analyze {
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,
    },
    /// Apply the top suggestion for every issue
    Fix {
        #[arg(value_name = "FILES")]
        files: Vec<PathBuf>,

        /// Write corrections back to plain-text files instead of printing
        #[arg(short, long)]
        write: bool,

        /// Choose a replacement for each issue
        #[arg(short, long)]
        interactive: bool,
    },
    /// Recent sessions
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryCommands {
    /// List recorded sessions, newest first
    List,
    /// Show one session in full
    Show { id: String },
    /// Delete one session
    Delete { id: String },
    /// Delete every session
    Clear,
}

struct Input {
    name: String,
    path: Option<PathBuf>,
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    source: String,
    analysis: AnalysisResult,
    summary: String,
    errors: Vec<TextError>,
    corrected_text: String,
    #[serde(skip)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    inputs_checked: usize,
    total_errors: usize,
    reports: &'a [Report],
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "grammarguard", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(ConfigLayer {
        language: cli.language,
        position_mode: cli.exact_positions.then_some(PositionMode::Exact),
        auto_apply_corrections: cli.auto_apply.then_some(true),
        history_enabled: cli.no_history.then_some(false),
        ..Default::default()
    })?;
    let colored = !cli.no_color && cli.format == OutputFormat::Text;
    if !colored {
        colored::control::set_override(false);
    }

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Check { files, no_fail } => {
            let reports = run_reports(&cli, &config, files)?;
            let total_errors: usize = reports.iter().map(|r| r.errors.len()).sum();

            if cli.format == OutputFormat::Json {
                print_json_reports(&reports)?;
            } else {
                for report in &reports {
                    output::print_errors(&report.source, &report.text, &report.errors, colored);
                }
                let labels = Labels::for_language(config.language);
                output::print_check_summary(total_errors, reports.len(), labels, colored);
            }

            if total_errors > 0 && !no_fail {
                std::process::exit(1);
            }
        }
        Commands::Analyze { files } => {
            let reports = run_reports(&cli, &config, files)?;

            if cli.format == OutputFormat::Json {
                print_json_reports(&reports)?;
            } else {
                let labels = Labels::for_language(config.language);
                for report in &reports {
                    output::print_analysis(
                        &report.source,
                        &report.analysis,
                        &report.summary,
                        labels,
                        colored,
                    );
                }
            }
        }
        Commands::Fix {
            files,
            write,
            interactive,
        } => run_fix(&cli, &config, files, *write, *interactive, colored)?,
        Commands::History { action } => run_history(&cli, &config, action, colored)?,
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("GRAMMARGUARD_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn checker_for(config: &Config) -> Checker {
    Checker::new().with_positions(config.position_mode)
}

/// Read every input. Unreadable files are reported and skipped; it is an
/// error only when nothing could be read.
fn load_inputs(files: &[PathBuf], config: &Config) -> Result<Vec<Input>> {
    let wants_stdin = files.is_empty() || files.iter().any(|f| f.as_os_str() == "-");
    let mut inputs = Vec::new();

    if wants_stdin {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        inputs.push(Input {
            name: STDIN_NAME.to_string(),
            path: None,
            text,
        });
    }

    let paths: Vec<PathBuf> = files
        .iter()
        .filter(|f| f.as_os_str() != "-")
        .cloned()
        .collect();

    for path in parser::collect_inputs(&paths) {
        match parser::read_file(&path, config.max_file_size) {
            Ok(text) => inputs.push(Input {
                name: path.display().to_string(),
                path: Some(path),
                text,
            }),
            Err(e) => {
                tracing::warn!("{:#}", anyhow::Error::from(e));
            }
        }
    }

    if inputs.is_empty() {
        anyhow::bail!("No readable input. Use --help for usage information.");
    }

    Ok(inputs)
}

fn build_report(input: &Input, checker: &Checker, config: &Config) -> Report {
    let analysis = analyze(&input.text);
    let errors = checker.check(&input.text);
    let corrected_text = apply_corrections(&input.text, &errors);
    tracing::info!(source = %input.name, errors = errors.len(), "analysed input");

    Report {
        source: input.name.clone(),
        summary: summarize(&input.text),
        analysis,
        corrected_text: if config.auto_apply_corrections {
            corrected_text
        } else {
            input.text.clone()
        },
        errors,
        text: input.text.clone(),
    }
}

fn run_reports(cli: &Cli, config: &Config, files: &[PathBuf]) -> Result<Vec<Report>> {
    let inputs = load_inputs(files, config)?;
    let checker = checker_for(config);

    let progress = if inputs.len() >= PROGRESS_THRESHOLD && cli.format == OutputFormat::Text {
        let pb = ProgressBar::new(inputs.len() as u64);
        pb.set_style(ProgressStyle::default_bar().template("{bar:30.cyan} {pos}/{len} {msg}")?);
        Some(pb)
    } else {
        None
    };

    let reports: Vec<Report> = inputs
        .par_iter()
        .map(|input| {
            let report = build_report(input, &checker, config);
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            report
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    record_history(cli, config, &reports);
    Ok(reports)
}

fn open_history(cli: &Cli, config: &Config) -> Result<HistoryStore> {
    let store = match &cli.history_file {
        Some(path) => HistoryStore::open_at(path.clone(), config.max_history_entries)?,
        None => HistoryStore::open(config)?,
    };
    Ok(store)
}

fn record_history(cli: &Cli, config: &Config, reports: &[Report]) {
    if !config.history_enabled {
        return;
    }

    let result = open_history(cli, config).and_then(|mut store| {
        for report in reports {
            store.record(HistoryEntry::new(
                &report.text,
                report.corrected_text.clone(),
                report.analysis.clone(),
                report.errors.clone(),
                config.language,
            ))?;
        }
        Ok(())
    });

    if let Err(e) = result {
        tracing::warn!("failed to record history: {:#}", e);
    }
}

fn print_json_reports(reports: &[Report]) -> Result<()> {
    output::print_json(&JsonOutput {
        inputs_checked: reports.len(),
        total_errors: reports.iter().map(|r| r.errors.len()).sum(),
        reports,
    })
}

/// Number of corrected spans whose replacement differs from the original.
fn count_changes(text: &str, errors: &[TextError]) -> usize {
    render::segments(text, errors)
        .iter()
        .filter(|s| matches!(s, Segment::Corrected { original, replacement, .. } if original != replacement))
        .count()
}

fn interactive_choices(input: &Input, errors: &[TextError], colored: bool) -> Result<Option<Vec<TextError>>> {
    let mut ordered = errors.to_vec();
    ordered.sort_by_key(|e| e.start);

    let mut chosen = Vec::new();
    for error in ordered {
        match output::prompt_correction(&input.text, &error, colored)? {
            Choice::Replace(replacement) => chosen.push(TextError {
                suggestions: vec![replacement],
                ..error
            }),
            Choice::Keep => {}
            Choice::Quit => return Ok(None),
        }
    }

    Ok(Some(chosen))
}

fn run_fix(
    cli: &Cli,
    config: &Config,
    files: &[PathBuf],
    write: bool,
    interactive: bool,
    colored: bool,
) -> Result<()> {
    let inputs = load_inputs(files, config)?;
    let checker = checker_for(config);
    let labels = Labels::for_language(config.language);

    let mut total_fixed = 0;
    let mut written = 0;
    let mut reports = Vec::new();

    for input in &inputs {
        let mut errors = checker.check(&input.text);
        if interactive {
            match interactive_choices(input, &errors, colored)? {
                Some(chosen) => errors = chosen,
                None => break,
            }
        }

        let corrected = apply_corrections(&input.text, &errors);
        let fixed = count_changes(&input.text, &errors);
        total_fixed += fixed;

        let writable = input
            .path
            .as_ref()
            .filter(|p| FileType::from_path(p) == FileType::PlainText);

        match writable {
            Some(path) if write => {
                if fixed > 0 {
                    fs::write(path, &corrected)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                    written += 1;
                }
            }
            _ => {
                if write {
                    tracing::warn!(source = %input.name, "not a plain-text file, printing instead of writing");
                }
                if cli.format == OutputFormat::Text {
                    if inputs.len() > 1 {
                        println!("\n{}", labels.corrected_text);
                        println!("{}", input.name);
                    }
                    if colored {
                        output::print_corrected(&render::segments(&input.text, &errors), true);
                    } else {
                        println!("{}", corrected);
                    }
                }
            }
        }

        reports.push(Report {
            source: input.name.clone(),
            analysis: analyze(&input.text),
            summary: summarize(&input.text),
            errors,
            corrected_text: corrected,
            text: input.text.clone(),
        });
    }

    if cli.format == OutputFormat::Json {
        print_json_reports(&reports)?;
    } else if write {
        output::print_fix_summary(total_fixed, written, colored);
    }

    record_history(cli, config, &reports);
    Ok(())
}

fn run_history(cli: &Cli, config: &Config, action: &HistoryCommands, colored: bool) -> Result<()> {
    let mut store = open_history(cli, config)?;
    let labels = Labels::for_language(config.language);

    match action {
        HistoryCommands::List => {
            if cli.format == OutputFormat::Json {
                output::print_json(&store.entries())?;
            } else {
                output::print_history(store.entries(), labels, colored);
            }
        }
        HistoryCommands::Show { id } => {
            let entry = store
                .get(id)
                .with_context(|| format!("No history entry with id {}", id))?;
            if cli.format == OutputFormat::Json {
                output::print_json(entry)?;
            } else {
                output::print_history_entry(entry, labels, colored);
            }
        }
        HistoryCommands::Delete { id } => {
            store.delete(id)?;
            println!("Deleted {}", id);
        }
        HistoryCommands::Clear => {
            store.clear()?;
            println!("History cleared");
        }
    }

    Ok(())
}
