//! Output formatting for codecoach results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for learners
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::authorship::AuthorshipAssessment;
use crate::error::InputError;
use crate::feedback::FeedbackReport;
use crate::history::{HistoryEntry, HistoryStatistics};
use crate::language::Language;
use crate::pipeline::Evaluation;

/// What happened to one input file.
#[derive(Debug)]
pub enum Outcome {
    Evaluated(Evaluation),
    Rejected(InputError),
    /// The file could not be read or its language could not be determined.
    Unreadable(String),
}

/// Result for one input file, in input order.
#[derive(Debug)]
pub struct FileResult {
    pub path: String,
    pub language: Option<Language>,
    pub outcome: Outcome,
}

impl FileResult {
    pub fn report(&self) -> Option<&FeedbackReport> {
        match &self.outcome {
            Outcome::Evaluated(e) => Some(&e.report),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<i32> {
        self.report().map(|r| r.score.score)
    }
}

/// True when every evaluated file reaches `min_score`. Rejected files do
/// not count against the gate.
pub fn gate_passed(results: &[FileResult], min_score: Option<i32>) -> bool {
    match min_score {
        Some(min) => results.iter().filter_map(FileResult::score).all(|s| s >= min),
        None => true,
    }
}

// =============================================================================
// JSON Format
// =============================================================================

#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files_analyzed: usize,
    pub files_rejected: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<i32>,
    pub passed: bool,
    pub results: Vec<JsonFileResult>,
}

#[derive(Serialize, Deserialize)]
pub struct JsonFileResult {
    pub path: String,
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<FeedbackReport>,
    pub recorded: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonError>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    pub kind: String,
    pub message: String,
}

pub fn build_json(results: &[FileResult], min_score: Option<i32>) -> JsonReport {
    let passed = gate_passed(results, min_score);
    let results: Vec<JsonFileResult> = results.iter().map(file_to_json).collect();
    let files_analyzed = results.iter().filter(|r| r.report.is_some()).count();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_analyzed,
        files_rejected: results.len() - files_analyzed,
        min_score,
        passed,
        results,
    }
}

fn file_to_json(result: &FileResult) -> JsonFileResult {
    let (report, recorded, error) = match &result.outcome {
        Outcome::Evaluated(e) => (Some(e.report.clone()), e.recorded, None),
        Outcome::Rejected(e) => (
            None,
            false,
            Some(JsonError {
                kind: e.kind().to_string(),
                message: e.to_string(),
            }),
        ),
        Outcome::Unreadable(msg) => (
            None,
            false,
            Some(JsonError {
                kind: "unreadable".to_string(),
                message: msg.clone(),
            }),
        ),
    };
    JsonFileResult {
        path: result.path.clone(),
        language: result.language,
        report,
        recorded,
        error,
    }
}

/// Write results in JSON format.
pub fn write_json(results: &[FileResult], min_score: Option<i32>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&build_json(results, min_score))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in colored terminal format.
pub fn write_pretty(results: &[FileResult], min_score: Option<i32>) {
    println!();
    print!("  ");
    print!("{}", "codecoach".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    for result in results {
        match &result.outcome {
            Outcome::Evaluated(e) => write_report(&result.path, &e.report, e.recorded),
            Outcome::Rejected(e) => write_rejection(&result.path, &e.to_string()),
            Outcome::Unreadable(msg) => write_rejection(&result.path, msg),
        }
    }

    write_final_status(results, min_score);
    println!();
}

fn write_rejection(path: &str, message: &str) {
    print!("  {}", "✗ SKIPPED".red());
    println!("  {}", path.blue());
    println!("            {}", message);
    println!();
}

fn write_report(path: &str, report: &FeedbackReport, recorded: bool) {
    print!("  {}", "File:     ".dimmed());
    println!("{}", path.blue());
    print!("  {}", "Language: ".dimmed());
    print!("{}", report.language.display_name());
    print!("  {}", "Skill: ".dimmed());
    print!("{}", report.skill_level.as_str());
    print!("  {}", "Score: ".dimmed());
    write_colored_score(report.score.score);
    print!("/100  Grade: ");
    write_colored_grade(&report.score.grade);
    if recorded {
        print!("  {}", "(saved)".dimmed());
    }
    println!();
    println!();

    write_section("Summary");
    for line in report.summary.lines() {
        println!("    {}", line);
    }
    println!();

    if !report.positive_points.is_empty() {
        write_section("Strengths");
        for point in &report.positive_points {
            println!("    {} {}", "•".green(), point);
        }
        println!();
    }

    write_section("Detailed feedback");
    for point in &report.detailed_feedback {
        println!("    {}", point);
    }
    println!();

    if !report.mistakes.is_empty() {
        println!("  {} ({}):", "Mistakes".bold(), report.mistakes.len());
        println!();
        for m in &report.mistakes {
            print!("    {} ", "WARN ".yellow());
            println!("{}", m.kind.as_str().dimmed());
            println!("            {}", m.problem);
            println!("            {} {}", "why:".dimmed(), m.why_bad);
            println!("            {} {}", "fix:".dimmed(), m.solution);
            println!("            {} {}", "learn:".dimmed(), m.learn_next);
            println!();
        }
    }

    let c = &report.complexity_analysis;
    write_section("Complexity");
    println!("    {}  {}", c.current_complexity.label().bold(), c.explanation);
    if !c.improvement_tip.is_empty() {
        println!("    {} {}", "tip:".dimmed(), c.improvement_tip);
    }
    println!();

    write_section("Recommended learning");
    for (i, topic) in report.learning_path.iter().enumerate() {
        println!(
            "    {}. {} {}",
            i + 1,
            topic.topic,
            format!("[{} Priority]", topic.priority).dimmed()
        );
        for resource in &topic.resources {
            println!("       {}", resource);
        }
    }
    println!();

    write_section("Next steps");
    for step in &report.next_steps {
        println!("    {}", step);
    }
    println!();

    write_authorship(&report.ai_detection);
    println!();
}

fn write_section(title: &str) {
    println!("  {}", format!("{}:", title).bold());
}

fn write_authorship(a: &AuthorshipAssessment) {
    print!("  {}", "AI authorship: ".bold());
    let confidence = format!("{:.0}%", a.confidence * 100.0);
    if a.is_suspicious {
        println!("{} (confidence {})", "SUSPICIOUS".yellow().bold(), confidence);
        for explanation in &a.explanations {
            println!("    - {}", explanation);
        }
        for rec in &a.recommendations {
            println!("    {} {}", "→".dimmed(), rec);
        }
    } else {
        println!("{} (confidence {})", "not suspicious".green(), confidence);
    }
}

fn write_colored_score(s: i32) {
    match s {
        s if s >= 90 => print!("{}", s.to_string().green().bold()),
        s if s >= 70 => print!("{}", s.to_string().green()),
        s if s >= 50 => print!("{}", s.to_string().yellow()),
        _ => print!("{}", s.to_string().red()),
    }
}

fn write_colored_grade(grade: &str) {
    match grade {
        "A+" | "A" => print!("{}", grade.green().bold()),
        "B" => print!("{}", grade.green()),
        "C" => print!("{}", grade.yellow()),
        "D" => print!("{}", grade.yellow().bold()),
        _ => print!("{}", grade.red()),
    }
}

fn write_final_status(results: &[FileResult], min_score: Option<i32>) {
    let analyzed = results.iter().filter(|r| r.report().is_some()).count();
    print!(
        "  {}",
        format!("Analyzed: {}  Skipped: {}", analyzed, results.len() - analyzed).dimmed()
    );
    if let Some(min) = min_score {
        print!("  {}", format!("Min score: {}", min).dimmed());
        print!("  ");
        if gate_passed(results, min_score) {
            print!("{}", "PASSED".green());
        } else {
            print!("{}", "FAILED".red());
        }
    }
    println!();
}

// =============================================================================
// History
// =============================================================================

pub fn write_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("  {}", "No history found. Analyze some code first!".dimmed());
        return;
    }
    println!(
        "  {}",
        format!(
            "{:>4}  {:<20}  {:<8}  {:<12}  {:>5}  {:<5}  {:>8}  Origin",
            "ID", "Date", "Language", "Skill", "Score", "Grade", "Mistakes"
        )
        .bold()
    );
    for e in entries {
        print!(
            "  {:>4}  {:<20}  {:<8}  {:<12}  ",
            e.id,
            e.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.language.as_str(),
            e.skill_level.as_str()
        );
        print!("{:>5}  ", e.score);
        write_colored_grade(&e.grade);
        print!("{}", " ".repeat(5usize.saturating_sub(e.grade.len())));
        println!("  {:>8}  {}", e.mistakes_count, e.origin.blue());
    }
}

/// Full detail for a single saved analysis.
pub fn write_history_entry(e: &HistoryEntry) {
    println!("  {} #{}", "Analysis".bold(), e.id);
    println!("  {}{}", "Date:       ".dimmed(), e.timestamp.to_rfc3339());
    println!("  {}{}", "Origin:     ".dimmed(), e.origin);
    println!("  {}{}", "Language:   ".dimmed(), e.language.display_name());
    println!("  {}{}", "Skill:      ".dimmed(), e.skill_level);
    print!("  {}", "Score:      ".dimmed());
    write_colored_score(e.score);
    print!(" (");
    write_colored_grade(&e.grade);
    println!(")");
    println!("  {}{} ({} lines)", "Complexity: ".dimmed(), e.complexity, e.total_lines);
    if !e.mistake_types.is_empty() {
        let kinds: Vec<&str> = e.mistake_types.iter().map(|k| k.as_str()).collect();
        println!("  {}{}", "Mistakes:   ".dimmed(), kinds.join(", "));
    }
    println!();
    for line in e.summary.lines() {
        println!("  {}", line);
    }
    println!();
    for line in e.source_preview.lines() {
        println!("    {}", line.dimmed());
    }
}

pub fn write_statistics(stats: Option<&HistoryStatistics>) {
    let Some(s) = stats else {
        println!("  {}", "No analyses yet".dimmed());
        return;
    };

    println!("  {}", "Statistics:".bold());
    println!("    {:<18} {}", "Total analyses", s.total_analyses);
    print!("    {:<18} {:.1}  (best ", "Average score", s.average_score);
    write_colored_score(s.best_score);
    print!(", worst ");
    write_colored_score(s.worst_score);
    println!(")");
    println!(
        "    {:<18} {} ({:.1} per analysis)",
        "Mistakes", s.total_mistakes, s.average_mistakes
    );
    println!();

    println!("  {}", "Languages:".bold());
    for (lang, count) in &s.languages {
        println!("    {:<18} {}", lang, count);
    }
    println!("  {}", "Skill levels:".bold());
    for (level, count) in &s.skill_levels {
        println!("    {:<18} {}", level, count);
    }

    if !s.common_mistakes.is_empty() {
        println!("  {}", "Common mistakes:".bold());
        for m in &s.common_mistakes {
            println!("    {:<22} {}", m.kind.as_str(), m.count);
        }
    }

    if !s.progress_over_time.is_empty() {
        println!("  {}", "Progress:".bold());
        for step in &s.progress_over_time {
            let change = format!("{:+}", step.score_change);
            let change = if step.improvement {
                change.green()
            } else if step.score_change < 0 {
                change.red()
            } else {
                change.dimmed()
            };
            println!("    #{} → #{}  {}", step.from_id, step.to_id, change);
        }
    }
}
