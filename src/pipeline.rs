//! End-to-end evaluation of one snippet.
//!
//! ```text
//! raw text ──► normalize::clean ──► analysis::analyze ──► detect::detect_mistakes
//!                                                                 │
//!                       HistoryStore ◄── feedback::synthesize ◄───┘
//! ```
//!
//! Every call builds fresh values; an `Evaluator` holds only settings and is
//! safe to share across threads.

use tracing::{debug, warn};

use crate::analysis;
use crate::authorship::AuthorshipThresholds;
use crate::config::Config;
use crate::detect::{self, MistakeThresholds};
use crate::error::InputError;
use crate::feedback::{self, FeedbackReport, PraiseSampler};
use crate::history::HistoryStore;
use crate::language::Language;
use crate::normalize::{self, DEFAULT_DENYLIST};
use crate::score::SkillLevel;

/// A report plus whether it reached the history store.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub report: FeedbackReport,
    pub recorded: bool,
}

/// Runs the analysis pipeline with a fixed set of thresholds.
#[derive(Debug, Clone)]
pub struct Evaluator {
    thresholds: MistakeThresholds,
    authorship: AuthorshipThresholds,
    denylist: Vec<String>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self {
            thresholds: MistakeThresholds::default(),
            authorship: AuthorshipThresholds::default(),
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            thresholds: config.thresholds.clone(),
            authorship: config.authorship.clone(),
            denylist: config.denylist.clone(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: MistakeThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_authorship(mut self, authorship: AuthorshipThresholds) -> Self {
        self.authorship = authorship;
        self
    }

    pub fn with_denylist(mut self, denylist: Vec<String>) -> Self {
        self.denylist = denylist;
        self
    }

    pub fn thresholds(&self) -> &MistakeThresholds {
        &self.thresholds
    }

    /// Analyze `source` and build its report.
    pub fn evaluate(
        &self,
        source: &str,
        language: Language,
        skill_hint: Option<SkillLevel>,
        sampler: &dyn PraiseSampler,
    ) -> Result<FeedbackReport, InputError> {
        let lines = normalize::clean_with(source, language, &self.denylist)?;
        let metrics = analysis::analyze(&lines, language);
        let findings = detect::detect_mistakes(&lines, language, &metrics, &self.thresholds);
        debug!(
            language = %language,
            lines = lines.len(),
            findings = findings.len(),
            "evaluated snippet"
        );
        Ok(feedback::synthesize(
            &metrics,
            findings,
            &lines,
            language,
            skill_hint,
            &self.authorship,
            sampler,
        ))
    }

    /// Like [`Evaluator::evaluate`], then hand the report to `store`.
    ///
    /// A store failure never fails the evaluation; it only clears `recorded`.
    pub fn evaluate_and_record(
        &self,
        source: &str,
        language: Language,
        skill_hint: Option<SkillLevel>,
        sampler: &dyn PraiseSampler,
        store: &dyn HistoryStore,
        origin: &str,
    ) -> Result<Evaluation, InputError> {
        let report = self.evaluate(source, language, skill_hint, sampler)?;
        let recorded = match store.save(&report, source, origin) {
            Ok(_) => true,
            Err(e) => {
                warn!(origin, error = %e, "failed to record analysis");
                false
            }
        };
        Ok(Evaluation { report, recorded })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Complexity;
    use crate::feedback::DeterministicPraise;
    use crate::history::HistoryError;
    use std::sync::Mutex;

    struct FailingStore;

    impl HistoryStore for FailingStore {
        fn save(&self, _: &FeedbackReport, _: &str, _: &str) -> Result<u64, HistoryError> {
            Err(HistoryError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        origins: Mutex<Vec<String>>,
    }

    impl HistoryStore for MemoryStore {
        fn save(&self, _: &FeedbackReport, _: &str, origin: &str) -> Result<u64, HistoryError> {
            let mut origins = self.origins.lock().unwrap();
            origins.push(origin.to_string());
            Ok(origins.len() as u64)
        }
    }

    const SUM: &str = "x=[1,2,3]\ns=0\nfor n in x:\n    s=s+n\nprint(s)";

    #[test]
    fn test_evaluate_python_scenario() {
        let report = Evaluator::new()
            .evaluate(SUM, Language::Python, None, &DeterministicPraise::default())
            .unwrap();
        assert_eq!(report.metrics.complexity, Complexity::Linear);
        assert_eq!(report.metrics.loops, 1);
        assert_eq!(report.metrics.total_lines, 5);
        assert!(report.mistakes.is_empty());
    }

    #[test]
    fn test_rejections_surface_as_input_errors() {
        let e = Evaluator::new();
        let s = DeterministicPraise::default();
        assert_eq!(e.evaluate("", Language::C, None, &s).unwrap_err(), InputError::Empty);
        assert_eq!(
            e.evaluate("// only a comment\n", Language::C, None, &s).unwrap_err(),
            InputError::NoCode
        );
        assert!(matches!(
            e.evaluate("import os\nos.listdir()\n", Language::Python, None, &s),
            Err(InputError::ContentRejected { .. })
        ));
    }

    #[test]
    fn test_custom_denylist() {
        let e = Evaluator::new().with_denylist(vec!["printf".to_string()]);
        let s = DeterministicPraise::default();
        assert!(e.evaluate("import os\nx = 1\n", Language::Python, None, &s).is_ok());
        assert!(e
            .evaluate("int main() { printf(\"hi\"); }", Language::C, None, &s)
            .is_err());
    }

    #[test]
    fn test_store_failure_does_not_fail_evaluation() {
        let outcome = Evaluator::new()
            .evaluate_and_record(
                SUM,
                Language::Python,
                None,
                &DeterministicPraise::default(),
                &FailingStore,
                "sum.py",
            )
            .unwrap();
        assert!(!outcome.recorded);
        assert_eq!(outcome.report.metrics.loops, 1);
    }

    #[test]
    fn test_rejected_input_is_not_recorded() {
        let store = MemoryStore::default();
        let e = Evaluator::new();
        let s = DeterministicPraise::default();
        assert!(e
            .evaluate_and_record("", Language::Python, None, &s, &store, "empty.py")
            .is_err());
        let ok = e
            .evaluate_and_record(SUM, Language::Python, None, &s, &store, "sum.py")
            .unwrap();
        assert!(ok.recorded);
        assert_eq!(*store.origins.lock().unwrap(), vec!["sum.py".to_string()]);
    }
}
