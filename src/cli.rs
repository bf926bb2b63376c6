//! Command-line interface for codecoach.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use directories::ProjectDirs;
use globset::GlobSet;
use rayon::prelude::*;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{self, Config};
use crate::error::InputError;
use crate::feedback::RandomPraise;
use crate::history::{ExportFormat, HistoryStore, JsonHistoryStore};
use crate::language::Language;
use crate::pipeline::{Evaluation, Evaluator};
use crate::report::{self, FileResult, Outcome};
use crate::score::SkillLevel;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules", "venv", "__pycache__"];

/// Path argument that reads the snippet from standard input.
const STDIN_PATH: &str = "-";

/// Heuristic feedback for beginner Python, C and C++ code.
///
/// Codecoach measures loop structure and complexity, flags common beginner
/// mistakes, estimates skill level and whether the code looks AI-generated,
/// and suggests what to learn next.
#[derive(Parser)]
#[command(name = "codecoach")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze source files and print feedback
    #[command(visible_alias = "check")]
    Analyze(AnalyzeArgs),
    /// List saved analyses, show one, or clear them
    History(HistoryArgs),
    /// Show statistics over saved analyses
    Stats(StatsArgs),
    /// Export saved analyses to a JSON or CSV file
    Export(ExportArgs),
    /// Write a default configuration file
    Init(InitArgs),
}

/// Configuration and history location shared by several commands.
#[derive(Args)]
pub struct StoreArgs {
    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding history.json
    #[arg(long)]
    pub history_dir: Option<PathBuf>,
}

/// Arguments for the analyze command.
#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Files or directories to analyze ("-" reads standard input)
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Language override: python, c or cpp (default: from file extension)
    #[arg(short, long)]
    pub language: Option<String>,

    /// Your skill level, used as the baseline for AI-authorship checks
    #[arg(short, long)]
    pub skill: Option<String>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Minimum acceptable score (exit non-zero if any file scores lower)
    #[arg(long)]
    pub min_score: Option<i32>,

    /// Do not save results to history
    #[arg(long)]
    pub no_history: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the history command.
#[derive(Parser)]
pub struct HistoryArgs {
    /// Show a single analysis
    #[arg(long)]
    pub id: Option<u64>,

    /// Only list the most recent N analyses
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Delete all saved analyses
    #[arg(long, conflicts_with_all = ["id", "limit"])]
    pub clear: bool,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the stats command.
#[derive(Parser)]
pub struct StatsArgs {
    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the export command.
#[derive(Parser)]
pub struct ExportArgs {
    /// Export format: json or csv
    #[arg(short, long, default_value = "json")]
    pub format: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "codecoach.yaml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

fn check_output_format(format: &str) -> bool {
    if format != "pretty" && format != "json" {
        eprintln!("Error: invalid format {:?}, must be 'pretty' or 'json'", format);
        return false;
    }
    true
}

/// Resolve the history directory: flag, then config, then the platform data dir.
fn history_dir(store: &StoreArgs, config: &Config) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &store.history_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = &config.history.dir {
        return Ok(dir.clone());
    }
    ProjectDirs::from("", "", "codecoach")
        .map(|dirs| dirs.data_dir().join("history"))
        .ok_or_else(|| anyhow::anyhow!("cannot determine a history directory, use --history-dir"))
}

fn open_store(store: &StoreArgs) -> anyhow::Result<JsonHistoryStore> {
    let (config, _) = Config::load(store.config.as_deref())?;
    let dir = history_dir(store, &config)?;
    Ok(JsonHistoryStore::open(dir)?)
}

/// Collect analyzable files under `root`.
fn collect_files(root: &Path, exclusions: &GlobSet) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && !SKIPPED_DIRS.contains(&name.as_ref())
        })
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if !has_source_extension(path) {
            continue;
        }
        let relative = path.strip_prefix(root).unwrap_or(path);
        if exclusions.is_match(path) || exclusions.is_match(relative) {
            debug!(path = %path.display(), "excluded by configuration");
            continue;
        }
        files.push(path.to_path_buf());
    }

    Ok(files)
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| Language::extensions().iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

fn language_for(path: &Path) -> Option<Language> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

/// Everything a worker needs to evaluate one file.
struct Job<'a> {
    evaluator: &'a Evaluator,
    store: Option<&'a JsonHistoryStore>,
    language: Option<Language>,
    skill: Option<SkillLevel>,
}

impl Job<'_> {
    fn run(&self, path: &Path, stdin: Option<&str>) -> FileResult {
        let display = path.to_string_lossy().to_string();
        let language = self.language.or_else(|| language_for(path));

        let Some(language) = language else {
            return FileResult {
                path: display,
                language: None,
                outcome: Outcome::Unreadable(
                    "cannot determine language from file extension, use --language".to_string(),
                ),
            };
        };

        let source = match stdin {
            Some(s) => s.to_string(),
            None => match std::fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    return FileResult {
                        path: display,
                        language: Some(language),
                        outcome: Outcome::Unreadable(e.to_string()),
                    }
                }
            },
        };

        let evaluated: Result<Evaluation, InputError> = match self.store {
            Some(store) => self.evaluator.evaluate_and_record(
                &source,
                language,
                self.skill,
                &RandomPraise,
                store as &dyn HistoryStore,
                &display,
            ),
            None => self
                .evaluator
                .evaluate(&source, language, self.skill, &RandomPraise)
                .map(|report| Evaluation {
                    report,
                    recorded: false,
                }),
        };

        FileResult {
            path: display,
            language: Some(language),
            outcome: match evaluated {
                Ok(e) => Outcome::Evaluated(e),
                Err(e) => Outcome::Rejected(e),
            },
        }
    }
}

/// Run the analyze command.
pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<i32> {
    if !check_output_format(&args.format) {
        return Ok(EXIT_ERROR);
    }

    let (config, config_path) = match Config::load(args.store.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: invalid configuration: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    if let Some(p) = &config_path {
        debug!(path = %p.display(), "loaded configuration");
    }

    let language = match args.language.as_deref().map(str::parse::<Language>).transpose() {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let skill = match args.skill.as_deref().map(str::parse::<SkillLevel>).transpose() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let exclusions = config.exclusions()?;
    let mut files = Vec::new();
    let mut stdin_source = None;
    for path in &args.paths {
        if path.as_os_str() == STDIN_PATH {
            if language.is_none() {
                eprintln!("Error: --language is required when reading standard input");
                return Ok(EXIT_ERROR);
            }
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            stdin_source = Some(buf);
            files.push(path.clone());
            continue;
        }
        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Error: cannot access path {:?}: {}", path, e);
                return Ok(EXIT_ERROR);
            }
        };
        if metadata.is_dir() {
            files.extend(collect_files(path, &exclusions)?);
        } else {
            files.push(path.clone());
        }
    }

    if files.is_empty() {
        eprintln!("Warning: no files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let store = if args.no_history || !config.history.enabled {
        None
    } else {
        match history_dir(&args.store, &config)
            .and_then(|d| JsonHistoryStore::open(d).map_err(Into::into))
        {
            Ok(s) => Some(s),
            Err(e) => {
                warn!(error = %e, "history unavailable, results will not be saved");
                None
            }
        }
    };

    let evaluator = Evaluator::from_config(&config);
    let job = Job {
        evaluator: &evaluator,
        store: store.as_ref(),
        language,
        skill,
    };

    let results: Vec<FileResult> = files
        .par_iter()
        .map(|path| {
            let stdin = (path.as_os_str() == STDIN_PATH)
                .then_some(stdin_source.as_deref())
                .flatten();
            job.run(path, stdin)
        })
        .collect();

    match args.format.as_str() {
        "json" => report::write_json(&results, args.min_score)?,
        _ => report::write_pretty(&results, args.min_score),
    }

    if results.iter().all(|r| r.report().is_none()) {
        return Ok(EXIT_ERROR);
    }
    if report::gate_passed(&results, args.min_score) {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the history command.
pub fn run_history(args: &HistoryArgs) -> anyhow::Result<i32> {
    if !check_output_format(&args.format) {
        return Ok(EXIT_ERROR);
    }
    let store = open_store(&args.store)?;

    if args.clear {
        store.clear()?;
        println!("History cleared: {}", store.path().display());
        return Ok(EXIT_SUCCESS);
    }

    if let Some(id) = args.id {
        let Some(entry) = store.get(id)? else {
            eprintln!("Error: no analysis with id {}", id);
            return Ok(EXIT_ERROR);
        };
        match args.format.as_str() {
            "json" => println!("{}", serde_json::to_string_pretty(&entry)?),
            _ => report::write_history_entry(&entry),
        }
        return Ok(EXIT_SUCCESS);
    }

    let mut entries = store.all()?;
    if let Some(limit) = args.limit {
        let skip = entries.len().saturating_sub(limit);
        entries.drain(..skip);
    }
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        _ => report::write_history(&entries),
    }
    Ok(EXIT_SUCCESS)
}

/// Run the stats command.
pub fn run_stats(args: &StatsArgs) -> anyhow::Result<i32> {
    if !check_output_format(&args.format) {
        return Ok(EXIT_ERROR);
    }
    let stats = open_store(&args.store)?.statistics()?;
    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&stats)?),
        _ => report::write_statistics(stats.as_ref()),
    }
    Ok(EXIT_SUCCESS)
}

/// Run the export command.
pub fn run_export(args: &ExportArgs) -> anyhow::Result<i32> {
    let format: ExportFormat = match args.format.parse() {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };
    let path = open_store(&args.store)?.export(format)?;
    println!("History exported to: {}", path.display());
    Ok(EXIT_SUCCESS)
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() && !args.force {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or pass --force to overwrite");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, config::DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write configuration: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!("  1. Edit {} to adjust thresholds", args.output.display());
    println!("  2. Run: codecoach analyze <file> --config {}", args.output.display());

    Ok(EXIT_SUCCESS)
}
