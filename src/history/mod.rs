//! Analysis history.
//!
//! The pipeline only depends on the narrow [`HistoryStore`] trait. The
//! file-backed [`JsonHistoryStore`] keeps every saved analysis in a single
//! JSON document and derives statistics and exports from it.

mod stats;
mod store;

pub use stats::{HistoryStatistics, MistakeCount, ProgressStep};
pub use store::{JsonHistoryStore, HISTORY_FILE};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::Complexity;
use crate::detect::FindingKind;
use crate::feedback::FeedbackReport;
use crate::language::Language;
use crate::score::SkillLevel;

/// Source previews longer than this many characters are truncated.
pub const PREVIEW_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Schema version written into new documents.
pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("history CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Persistence collaborator for finished reports.
pub trait HistoryStore: Send + Sync {
    /// Record a report and return its id.
    fn save(&self, report: &FeedbackReport, source: &str, origin: &str)
        -> Result<u64, HistoryError>;
}

/// One saved analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub language: Language,
    /// Where the source came from, usually a file path.
    pub origin: String,
    pub skill_level: SkillLevel,
    pub score: i32,
    pub grade: String,
    pub total_lines: usize,
    pub complexity: Complexity,
    pub mistakes_count: usize,
    pub summary: String,
    pub source_preview: String,
    pub mistake_types: Vec<FindingKind>,
}

impl HistoryEntry {
    pub fn from_report(id: u64, report: &FeedbackReport, source: &str, origin: &str) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            language: report.language,
            origin: origin.to_string(),
            skill_level: report.skill_level,
            score: report.score.score,
            grade: report.score.grade.clone(),
            total_lines: report.metrics.total_lines,
            complexity: report.metrics.complexity,
            mistakes_count: report.mistakes.len(),
            summary: report.summary.clone(),
            source_preview: preview(source),
            mistake_types: report.mistakes.iter().map(|m| m.kind).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryMetadata {
    pub created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub version: String,
    pub total_analyses: usize,
}

/// The on-disk document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    pub metadata: HistoryMetadata,
    pub analyses: Vec<HistoryEntry>,
}

impl HistoryDocument {
    pub fn empty() -> Self {
        let now = Utc::now();
        Self {
            metadata: HistoryMetadata {
                created: now,
                last_updated: now,
                version: FORMAT_VERSION.to_string(),
                total_analyses: 0,
            },
            analyses: Vec::new(),
        }
    }

    pub fn next_id(&self) -> u64 {
        self.analyses.iter().map(|a| a.id).max().unwrap_or(0) + 1
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        self.analyses.push(entry);
        self.metadata.last_updated = Utc::now();
        self.metadata.total_analyses = self.analyses.len();
    }
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(format!("unsupported export format: {}", s)),
        }
    }
}

/// Truncate source text to [`PREVIEW_CHARS`] characters.
pub fn preview(source: &str) -> String {
    match source.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{}", &source[..cut], TRUNCATION_MARKER),
        None => source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short"), "short");
        let exact = "a".repeat(PREVIEW_CHARS);
        assert_eq!(preview(&exact), exact);

        let long = "é".repeat(PREVIEW_CHARS + 1);
        let p = preview(&long);
        assert!(p.ends_with(TRUNCATION_MARKER));
        assert_eq!(p.chars().count(), PREVIEW_CHARS + TRUNCATION_MARKER.len());
    }

    #[test]
    fn test_next_id_follows_highest() {
        let doc = HistoryDocument::empty();
        assert_eq!(doc.next_id(), 1);
        assert_eq!(doc.metadata.version, FORMAT_VERSION);
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Json.extension(), "json");
    }
}
