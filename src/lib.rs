//! Codecoach - heuristic feedback for beginner code.
//!
//! Codecoach reads a Python, C or C++ snippet and tells a learner how it is
//! structured, which common beginner mistakes it contains, what skill level
//! it suggests, whether it looks AI-generated, and what to study next.
//! Everything is heuristic: lines and tokens are scanned, nothing is parsed
//! into a full syntax tree and nothing is executed.
//!
//! # Architecture
//!
//! - `normalize`: input validation, content screen and comment stripping
//! - `analysis`: tokenizer and per-language structure analyzers
//! - `detect`: mistake detection rules
//! - `authorship`: AI-authorship signals and verdict
//! - `score`: skill score and report grade
//! - `feedback`: report assembly
//! - `pipeline`: the `Evaluator` that runs all of the above
//! - `history`: saved analyses, statistics and export
//! - `config`: YAML configuration schema
//! - `report`: output formatting (text, JSON)
//!
//! # Example
//!
//! ```
//! use codecoach::{DeterministicPraise, Evaluator, Language};
//!
//! let report = Evaluator::new()
//!     .evaluate("for x in items:\n    print(x)\n", Language::Python, None, &DeterministicPraise::default())
//!     .unwrap();
//! assert_eq!(report.metrics.loops, 1);
//! ```

pub mod analysis;
pub mod authorship;
pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod feedback;
pub mod history;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod score;

pub use analysis::{analyze, tokenize, Complexity, Metrics, StructureAnalyzer, Token};
pub use authorship::{AuthorshipAssessment, AuthorshipPattern, AuthorshipThresholds};
pub use config::Config;
pub use detect::{detect_mistakes, Finding, FindingKind, MistakeThresholds};
pub use error::InputError;
pub use feedback::{
    synthesize, DeterministicPraise, FeedbackReport, PraiseSampler, RandomPraise,
};
pub use history::{HistoryError, HistoryStore, JsonHistoryStore};
pub use language::Language;
pub use normalize::{clean, CleanedLine};
pub use pipeline::{Evaluation, Evaluator};
pub use score::{CodeScore, SkillLevel};
