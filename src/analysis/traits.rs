//! Core trait for structural analysis.

use crate::language::Language;
use crate::normalize::CleanedLine;

use super::Metrics;

/// Language-family specific structure counter.
///
/// Implementations walk cleaned lines and fill in the raw counts of a
/// [`Metrics`] record. The complexity class is derived afterwards by
/// [`super::analyze`], so implementations leave it at its default.
pub trait StructureAnalyzer: Send + Sync {
    /// Returns the analyzer identifier (e.g., "python", "c_family").
    fn language_id(&self) -> &'static str;

    /// Languages this analyzer handles.
    fn languages(&self) -> &'static [Language];

    /// Count structure in a non-empty sequence of cleaned lines.
    fn measure(&self, lines: &[CleanedLine]) -> Metrics;

    fn handles(&self, language: Language) -> bool {
        self.languages().contains(&language)
    }
}
