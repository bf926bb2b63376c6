//! Heuristic AI-authorship scoring.
//!
//! Four independent signals are computed from the cleaned lines and the
//! metrics record:
//!
//! | Signal | Suspicious above | Weight |
//! |---|---|---|
//! | comment ratio | 0.3 | 0.30 |
//! | perfection (naming, function shape, indentation) | 0.8 | 0.30 |
//! | complexity vs. skill mismatch | 0.7 | 0.25 |
//! | construct repetition | 0.6 | 0.15 |
//!
//! Any signal over its threshold marks the code as suspicious. Scoring is
//! fail-open: if the signals cannot be combined, a non-suspicious
//! zero-confidence assessment is returned so a report is never blocked.

mod signals;

use anyhow::ensure;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::Metrics;
use crate::language::Language;
use crate::normalize::CleanedLine;
use crate::score::SkillLevel;

/// Signal weights for the overall confidence.
pub mod weights {
    pub const COMMENT_RATIO: f64 = 0.30;
    pub const PERFECTION: f64 = 0.30;
    pub const COMPLEXITY_MISMATCH: f64 = 0.25;
    pub const PATTERN_REPETITION: f64 = 0.15;
}

const RECOMMENDATIONS: [&str; 4] = [
    "Write code in your own style, not perfect textbook style",
    "Add personal comments explaining YOUR thought process",
    "Make small human-like variations in your code",
    "Don't copy patterns exactly - add your own twist",
];

/// Labels for signals that crossed their threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorshipPattern {
    HighCommentRatio,
    TooPerfect,
    ComplexityMismatch,
    RepetitivePatterns,
}

impl AuthorshipPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorshipPattern::HighCommentRatio => "HIGH_COMMENT_RATIO",
            AuthorshipPattern::TooPerfect => "TOO_PERFECT",
            AuthorshipPattern::ComplexityMismatch => "COMPLEXITY_MISMATCH",
            AuthorshipPattern::RepetitivePatterns => "REPETITIVE_PATTERNS",
        }
    }
}

impl std::fmt::Display for AuthorshipPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-signal suspicion thresholds. A signal must be strictly above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorshipThresholds {
    pub comment_ratio: f64,
    pub perfection: f64,
    pub complexity_mismatch: f64,
    pub pattern_repetition: f64,
}

impl Default for AuthorshipThresholds {
    fn default() -> Self {
        Self {
            comment_ratio: 0.3,
            perfection: 0.8,
            complexity_mismatch: 0.7,
            pattern_repetition: 0.6,
        }
    }
}

/// Raw signal values, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorshipSignals {
    pub comment_ratio: f64,
    pub perfection: f64,
    pub complexity_mismatch: f64,
    pub pattern_repetition: f64,
}

impl AuthorshipSignals {
    /// Compute all four signals.
    pub fn measure(
        lines: &[CleanedLine],
        language: Language,
        metrics: &Metrics,
        skill: SkillLevel,
    ) -> Self {
        Self {
            comment_ratio: signals::comment_ratio(lines, language),
            perfection: signals::perfection(lines, language),
            complexity_mismatch: signals::complexity_mismatch(metrics, skill),
            pattern_repetition: signals::pattern_repetition(lines),
        }
    }

    fn values(&self) -> [f64; 4] {
        [
            self.comment_ratio,
            self.perfection,
            self.complexity_mismatch,
            self.pattern_repetition,
        ]
    }

    /// Weighted sum of the signals, clamped to [0, 1].
    pub fn confidence(&self) -> f64 {
        let sum = weights::COMMENT_RATIO * self.comment_ratio.clamp(0.0, 1.0)
            + weights::PERFECTION * self.perfection.clamp(0.0, 1.0)
            + weights::COMPLEXITY_MISMATCH * self.complexity_mismatch.clamp(0.0, 1.0)
            + weights::PATTERN_REPETITION * self.pattern_repetition.clamp(0.0, 1.0);
        sum.clamp(0.0, 1.0)
    }
}

/// The authorship verdict.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthorshipAssessment {
    /// True iff `detected_patterns` is non-empty.
    pub is_suspicious: bool,
    pub confidence: f64,
    pub detected_patterns: Vec<AuthorshipPattern>,
    pub explanations: Vec<String>,
    pub recommendations: Vec<String>,
    pub signals: AuthorshipSignals,
}

/// Score how likely the code is to be AI-generated.
pub fn score(
    lines: &[CleanedLine],
    language: Language,
    metrics: &Metrics,
    skill: SkillLevel,
    thresholds: &AuthorshipThresholds,
) -> AuthorshipAssessment {
    let signals = AuthorshipSignals::measure(lines, language, metrics, skill);
    from_signals(signals, skill, thresholds)
}

/// Build an assessment from precomputed signals, falling back to the
/// default assessment if they are unusable.
pub fn from_signals(
    signals: AuthorshipSignals,
    skill: SkillLevel,
    thresholds: &AuthorshipThresholds,
) -> AuthorshipAssessment {
    match assess(signals, skill, thresholds) {
        Ok(assessment) => {
            debug!(
                suspicious = assessment.is_suspicious,
                confidence = assessment.confidence,
                patterns = assessment.detected_patterns.len(),
                "scored authorship"
            );
            assessment
        }
        Err(e) => {
            warn!(error = %e, "authorship scoring failed, using default assessment");
            AuthorshipAssessment::default()
        }
    }
}

fn assess(
    signals: AuthorshipSignals,
    skill: SkillLevel,
    thresholds: &AuthorshipThresholds,
) -> anyhow::Result<AuthorshipAssessment> {
    ensure!(
        signals.values().iter().all(|v| v.is_finite()),
        "non-finite authorship signal: {:?}",
        signals
    );

    let mut patterns = Vec::new();
    let mut explanations = Vec::new();

    if signals.comment_ratio > thresholds.comment_ratio {
        patterns.push(AuthorshipPattern::HighCommentRatio);
        explanations.push(format!(
            "Code has {:.1}% comments. AI often adds excessive comments.",
            signals.comment_ratio * 100.0
        ));
    }
    if signals.perfection > thresholds.perfection {
        patterns.push(AuthorshipPattern::TooPerfect);
        explanations.push(format!(
            "Code structure is very perfect (score: {:.2}). AI generates flawlessly formatted code.",
            signals.perfection
        ));
    }
    if signals.complexity_mismatch > thresholds.complexity_mismatch {
        patterns.push(AuthorshipPattern::ComplexityMismatch);
        explanations.push(format!(
            "Code complexity doesn't match {} skill level. AI can write advanced code easily.",
            skill
        ));
    }
    if signals.pattern_repetition > thresholds.pattern_repetition {
        patterns.push(AuthorshipPattern::RepetitivePatterns);
        explanations.push("Code shows repetitive AI-like patterns.".to_string());
    }

    let is_suspicious = !patterns.is_empty();
    let recommendations = if is_suspicious {
        RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        Vec::new()
    };

    Ok(AuthorshipAssessment {
        is_suspicious,
        confidence: signals.confidence(),
        detected_patterns: patterns,
        explanations,
        recommendations,
        signals,
    })
}
