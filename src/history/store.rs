//! JSON-file history store.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tempfile::NamedTempFile;
use tracing::{info, warn};

use super::stats::{self, HistoryStatistics};
use super::{ExportFormat, HistoryDocument, HistoryEntry, HistoryError, HistoryStore};
use crate::feedback::FeedbackReport;

pub const HISTORY_FILE: &str = "history.json";

const CSV_HEADERS: [&str; 11] = [
    "ID",
    "Timestamp",
    "Language",
    "Origin",
    "Skill Level",
    "Score",
    "Grade",
    "Total Lines",
    "Complexity",
    "Mistakes Count",
    "Mistake Types",
];

/// History kept in `<dir>/history.json`.
///
/// Writes are serialized through a lock so parallel evaluations in one
/// process never lose entries.
pub struct JsonHistoryStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl JsonHistoryStore {
    /// Open the store, creating the directory and an empty document if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let store = Self {
            dir,
            lock: Mutex::new(()),
        };
        if !store.path().exists() {
            store.write(&HistoryDocument::empty())?;
        }
        Ok(store)
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    /// Load the document.
    ///
    /// A missing file reads as empty. A file that does not decode is replaced
    /// by a fresh document; any other I/O error is returned untouched.
    pub fn load(&self) -> Result<HistoryDocument, HistoryError> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HistoryDocument::empty()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&content) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history corrupt, starting fresh");
                let doc = HistoryDocument::empty();
                self.write(&doc)?;
                Ok(doc)
            }
        }
    }

    /// Replace the history file through a temp file in the same directory.
    fn write(&self, doc: &HistoryDocument) -> Result<(), HistoryError> {
        let json = serde_json::to_string_pretty(doc)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(self.path()).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn all(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.load()?.analyses)
    }

    pub fn get(&self, id: u64) -> Result<Option<HistoryEntry>, HistoryError> {
        Ok(self.load()?.analyses.into_iter().find(|a| a.id == id))
    }

    /// Aggregate statistics, or `None` when nothing has been saved yet.
    pub fn statistics(&self) -> Result<Option<HistoryStatistics>, HistoryError> {
        Ok(stats::compute(&self.load()?.analyses))
    }

    pub fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write(&HistoryDocument::empty())?;
        info!(path = %self.path().display(), "cleared history");
        Ok(())
    }

    /// Write a timestamped export next to the history file and return its path.
    pub fn export(&self, format: ExportFormat) -> Result<PathBuf, HistoryError> {
        let doc = self.load()?;
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        let path = self
            .dir
            .join(format!("history_export_{}.{}", stamp, format.extension()));

        match format {
            ExportFormat::Json => fs::write(&path, serde_json::to_string_pretty(&doc)?)?,
            ExportFormat::Csv => write_csv(&doc.analyses, &path)?,
        }
        info!(path = %path.display(), entries = doc.analyses.len(), "exported history");
        Ok(path)
    }
}

impl HistoryStore for JsonHistoryStore {
    fn save(
        &self,
        report: &FeedbackReport,
        source: &str,
        origin: &str,
    ) -> Result<u64, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut doc = self.load()?;
        let id = doc.next_id();
        doc.push(HistoryEntry::from_report(id, report, source, origin));
        self.write(&doc)?;
        info!(id, origin, score = report.score.score, "saved analysis");
        Ok(id)
    }
}

fn write_csv(entries: &[HistoryEntry], path: &Path) -> Result<(), HistoryError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for entry in entries {
        let mistake_types: Vec<&str> = entry.mistake_types.iter().map(|k| k.as_str()).collect();
        writer.write_record([
            entry.id.to_string(),
            entry.timestamp.to_rfc3339(),
            entry.language.to_string(),
            entry.origin.clone(),
            entry.skill_level.to_string(),
            entry.score.to_string(),
            entry.grade.clone(),
            entry.total_lines.to_string(),
            entry.complexity.to_string(),
            entry.mistakes_count.to_string(),
            mistake_types.join(";"),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
