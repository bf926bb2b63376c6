//! Feedback synthesis: turns metrics, findings and the authorship verdict
//! into the learner-facing report.

mod catalog;
mod sampler;

pub use catalog::PRAISE;
pub use sampler::{DeterministicPraise, PraiseSampler, RandomPraise};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{Complexity, Metrics};
use crate::authorship::{self, AuthorshipAssessment, AuthorshipThresholds};
use crate::detect::{Finding, FindingKind};
use crate::language::Language;
use crate::normalize::CleanedLine;
use crate::score::{self, CodeScore, SkillLevel};

/// Confidence above which a suspicious verdict is called out in the summary.
pub const AI_NOTE_CONFIDENCE: f64 = 0.6;

/// Genuine positives below this count get padded with praise.
const MIN_POSITIVES: usize = 3;
const PRAISE_PADDING: usize = 2;

/// Study priority for a learning topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the learning path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningTopic {
    pub topic: String,
    pub resources: Vec<String>,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityAnalysis {
    pub current_complexity: Complexity,
    pub explanation: String,
    /// Empty when there is nothing to improve.
    pub improvement_tip: String,
}

/// The complete report for one snippet. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackReport {
    pub timestamp: DateTime<Utc>,
    pub language: Language,
    pub skill_level: SkillLevel,
    pub summary: String,
    pub detailed_feedback: Vec<String>,
    pub positive_points: Vec<String>,
    pub mistakes: Vec<Finding>,
    pub learning_path: Vec<LearningTopic>,
    pub complexity_analysis: ComplexityAnalysis,
    pub next_steps: Vec<String>,
    pub score: CodeScore,
    pub ai_detection: AuthorshipAssessment,
    pub metrics: Metrics,
}

/// Assemble the report.
///
/// The reported skill level is always derived from the metrics and findings.
/// `skill_hint`, when given, only replaces it as the baseline the authorship
/// scorer compares complexity against.
pub fn synthesize(
    metrics: &Metrics,
    findings: Vec<Finding>,
    lines: &[CleanedLine],
    language: Language,
    skill_hint: Option<SkillLevel>,
    thresholds: &AuthorshipThresholds,
    sampler: &dyn PraiseSampler,
) -> FeedbackReport {
    let skill_level = score::derive_skill_level(metrics, findings.len());
    let ai_detection = authorship::score(
        lines,
        language,
        metrics,
        skill_hint.unwrap_or(skill_level),
        thresholds,
    );

    let mut summary = summarize(metrics, findings.len());
    if ai_detection.is_suspicious && ai_detection.confidence > AI_NOTE_CONFIDENCE {
        summary.push('\n');
        summary.push_str(catalog::AI_NOTE);
    }

    let report = FeedbackReport {
        timestamp: Utc::now(),
        language,
        skill_level,
        summary,
        detailed_feedback: detailed_feedback(metrics, &findings),
        positive_points: positive_points(metrics, sampler),
        learning_path: learning_path(&findings),
        complexity_analysis: complexity_analysis(metrics),
        next_steps: next_steps(skill_level, &findings),
        score: score::calculate(metrics, findings.len()),
        ai_detection,
        metrics: metrics.clone(),
        mistakes: findings,
    };

    debug!(
        skill = %report.skill_level,
        score = report.score.score,
        grade = %report.score.grade,
        findings = report.mistakes.len(),
        "synthesized feedback"
    );
    report
}

fn summarize(metrics: &Metrics, finding_count: usize) -> String {
    let lines = metrics.total_lines;
    let complexity = metrics.complexity;
    match finding_count {
        0 => format!(
            "Excellent code! Your {} lines of code are well-structured with {} complexity. \
             Keep up the good work!",
            lines, complexity
        ),
        1..=2 => format!(
            "Good effort! Found {} minor issues in {} lines of code. Complexity is {}. \
             Some improvements needed.",
            finding_count, lines, complexity
        ),
        n => format!(
            "Needs attention! Found {} issues in {} lines of code with {} complexity. \
             Focus on the suggestions below.",
            n, lines, complexity
        ),
    }
}

fn detailed_feedback(metrics: &Metrics, findings: &[Finding]) -> Vec<String> {
    let mut points = vec![format!(
        "Time Complexity: {}",
        catalog::complexity_explanation(metrics.complexity)
    )];

    points.push(match metrics.loops {
        0 => "Loop Usage: No loops found - simple and direct logic.".to_string(),
        1 => "Loop Usage: Single loop - efficient linear processing.".to_string(),
        n => format!(
            "Loop Usage: {} loops found. Watch for nested loops that increase complexity.",
            n
        ),
    });

    points.push(match metrics.functions {
        0 => "Function Structure: Consider breaking code into functions for better organization."
            .to_string(),
        1 => "Function Structure: Good single function structure.".to_string(),
        n => format!(
            "Function Structure: Great! {} functions show good modular design.",
            n
        ),
    });

    for finding in findings {
        points.push(format!("Issue: {}", finding.problem));
        points.push(format!("   Suggestion: {}", finding.solution));
    }
    points
}

fn positive_points(metrics: &Metrics, sampler: &dyn PraiseSampler) -> Vec<String> {
    let mut positives = Vec::new();
    if metrics.total_lines < 100 {
        positives.push("Concise Code: Your code is reasonably short and focused.".to_string());
    }
    if metrics.nested_loops == 0 {
        positives.push("Flat Structure: No deeply nested loops - good for readability.".to_string());
    }
    if metrics.conditionals < 3 {
        positives.push(
            "Simple Logic: Minimal conditional branching makes code easier to follow.".to_string(),
        );
    }

    if positives.len() < MIN_POSITIVES {
        positives.extend(
            sampler
                .sample(catalog::PRAISE, PRAISE_PADDING)
                .into_iter()
                .map(str::to_string),
        );
    }
    positives
}

/// One topic per distinct finding kind, in first-appearance order.
fn learning_path(findings: &[Finding]) -> Vec<LearningTopic> {
    let mut kinds: Vec<(FindingKind, usize)> = Vec::new();
    for finding in findings {
        match kinds.iter_mut().find(|(kind, _)| *kind == finding.kind) {
            Some((_, count)) => *count += 1,
            None => kinds.push((finding.kind, 1)),
        }
    }

    if kinds.is_empty() {
        return vec![LearningTopic {
            topic: catalog::GENERAL_TOPIC.to_string(),
            resources: to_strings(catalog::GENERAL_RESOURCES),
            priority: Priority::Low,
        }];
    }

    kinds
        .into_iter()
        .map(|(kind, count)| {
            let (topic, resources) = catalog::learning_resources(kind);
            LearningTopic {
                topic: topic.to_string(),
                resources: to_strings(resources),
                priority: if count > 1 {
                    Priority::High
                } else {
                    Priority::Medium
                },
            }
        })
        .collect()
}

fn complexity_analysis(metrics: &Metrics) -> ComplexityAnalysis {
    ComplexityAnalysis {
        current_complexity: metrics.complexity,
        explanation: catalog::complexity_explanation(metrics.complexity).to_string(),
        improvement_tip: catalog::improvement_tip(metrics.complexity, metrics.nested_loops)
            .to_string(),
    }
}

fn next_steps(level: SkillLevel, findings: &[Finding]) -> Vec<String> {
    let mut steps = to_strings(&catalog::next_steps(level));
    let has = |kind| findings.iter().any(|f| f.kind == kind);
    if has(FindingKind::NestedLoops) {
        steps.push(catalog::NESTED_LOOPS_FOCUS.to_string());
    }
    if has(FindingKind::LongFunction) {
        steps.push(catalog::LONG_FUNCTION_FOCUS.to_string());
    }
    steps
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::detect::{detect_mistakes, MistakeThresholds};
    use crate::normalize;

    fn build(src: &str, language: Language, hint: Option<SkillLevel>) -> FeedbackReport {
        let lines = normalize::strip(src, language);
        let metrics = analyze(&lines, language);
        let findings = detect_mistakes(&lines, language, &metrics, &MistakeThresholds::default());
        synthesize(
            &metrics,
            findings,
            &lines,
            language,
            hint,
            &AuthorshipThresholds::default(),
            &DeterministicPraise::default(),
        )
    }

    fn finding(kind: FindingKind) -> Finding {
        Finding::new(kind, "p", "w", "s", "l")
    }

    #[test]
    fn test_clean_snippet_report() {
        let report = build("x=[1,2,3]\ns=0\nfor n in x:\n    s=s+n\nprint(s)", Language::Python, None);
        assert!(report.mistakes.is_empty());
        assert!(report.summary.starts_with("Excellent code! Your 5 lines"));
        assert!(report.summary.contains("O(n) complexity"));
        assert_eq!(report.skill_level, SkillLevel::Advanced);
        assert_eq!(report.score.score, 100);
        assert_eq!(report.score.grade, "A+");
        assert_eq!(report.positive_points.len(), 3);
        assert_eq!(report.learning_path.len(), 1);
        assert_eq!(report.learning_path[0].priority, Priority::Low);
        assert_eq!(report.complexity_analysis.improvement_tip, "");
        assert_eq!(report.next_steps.len(), 3);
    }

    #[test]
    fn test_summary_branches() {
        let m = Metrics {
            total_lines: 12,
            complexity: Complexity::Quadratic,
            ..Metrics::default()
        };
        assert!(summarize(&m, 0).starts_with("Excellent code!"));
        assert_eq!(
            summarize(&m, 2),
            "Good effort! Found 2 minor issues in 12 lines of code. Complexity is O(n²). \
             Some improvements needed."
        );
        assert!(summarize(&m, 3).starts_with("Needs attention! Found 3 issues"));
    }

    #[test]
    fn test_detailed_feedback_pairs_issue_and_suggestion() {
        let m = Metrics {
            loops: 3,
            functions: 2,
            ..Metrics::default()
        };
        let points = detailed_feedback(&m, &[finding(FindingKind::MagicNumbers)]);
        assert_eq!(points.len(), 5);
        assert!(points[1].contains("3 loops found"));
        assert!(points[2].contains("2 functions"));
        assert_eq!(points[3], "Issue: p");
        assert_eq!(points[4], "   Suggestion: s");
    }

    #[test]
    fn test_positive_points_padding() {
        let busy = Metrics {
            total_lines: 150,
            nested_loops: 1,
            conditionals: 4,
            ..Metrics::default()
        };
        let sampler = DeterministicPraise::new(3);
        assert_eq!(
            positive_points(&busy, &sampler),
            vec![PRAISE[3].to_string(), PRAISE[4].to_string()]
        );

        let tidy = Metrics::default();
        let points = positive_points(&tidy, &sampler);
        assert_eq!(points.len(), 3);
        assert!(!points.iter().any(|p| PRAISE.contains(&p.as_str())));
    }

    #[test]
    fn test_learning_path_dedups_in_order() {
        let path = learning_path(&[
            finding(FindingKind::MagicNumbers),
            finding(FindingKind::NestedLoops),
            finding(FindingKind::MagicNumbers),
        ]);
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].topic, "Code Constants");
        assert_eq!(path[0].priority, Priority::High);
        assert_eq!(path[1].topic, "Algorithm Optimization");
        assert_eq!(path[1].priority, Priority::Medium);
        assert_eq!(path[1].resources.len(), 4);
    }

    #[test]
    fn test_improvement_tips() {
        let mut m = Metrics {
            complexity: Complexity::Quadratic,
            ..Metrics::default()
        };
        assert_eq!(complexity_analysis(&m).improvement_tip, "");
        m.nested_loops = 1;
        assert!(complexity_analysis(&m).improvement_tip.contains("hash tables"));
        m.complexity = Complexity::Exponential;
        assert!(complexity_analysis(&m).improvement_tip.contains("dynamic programming"));
    }

    #[test]
    fn test_next_steps_focus_lines() {
        let steps = next_steps(
            SkillLevel::Beginner,
            &[finding(FindingKind::LongFunction), finding(FindingKind::NestedLoops)],
        );
        assert_eq!(steps.len(), 5);
        assert!(steps[0].starts_with("1. Practice"));
        assert_eq!(steps[3], catalog::NESTED_LOOPS_FOCUS);
        assert_eq!(steps[4], catalog::LONG_FUNCTION_FOCUS);
    }

    #[test]
    fn test_skill_hint_only_feeds_authorship() {
        let src = "for i in a:\n    for j in b:\n        for k in c:\n            f(i, j, k)\n";
        let derived = build(src, Language::Python, None);
        let hinted = build(src, Language::Python, Some(SkillLevel::Beginner));
        assert_eq!(derived.skill_level, hinted.skill_level);
        assert!(hinted.ai_detection.signals.complexity_mismatch > 0.0);
    }

    #[test]
    fn test_ai_note_requires_confidence() {
        let m = Metrics::default();
        let sampler = DeterministicPraise::default();
        // Suspicious on comment ratio alone stays under the note threshold.
        let lines = vec![
            CleanedLine::new(1, 0, "# a"),
            CleanedLine::new(2, 0, "x = 1"),
        ];
        let report = synthesize(
            &m,
            Vec::new(),
            &lines,
            Language::Python,
            None,
            &AuthorshipThresholds::default(),
            &sampler,
        );
        assert!(report.ai_detection.is_suspicious);
        assert!(!report.summary.contains(catalog::AI_NOTE));

        // 0.30 * 1.0 + 0.30 * (1/3) + 0.25 * 1.0
        let heavy = Metrics {
            complexity: Complexity::Exponential,
            nested_loops: 3,
            ..Metrics::default()
        };
        let comments = vec![
            CleanedLine::new(1, 0, "# a"),
            CleanedLine::new(2, 0, "# b"),
            CleanedLine::new(3, 0, "# c"),
        ];
        let report = synthesize(
            &heavy,
            Vec::new(),
            &comments,
            Language::Python,
            Some(SkillLevel::Beginner),
            &AuthorshipThresholds::default(),
            &sampler,
        );
        assert!((report.ai_detection.confidence - 0.65).abs() < 1e-9);
        assert!(report.summary.ends_with(catalog::AI_NOTE));
    }
}
