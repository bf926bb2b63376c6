//! Detection runner that applies every rule.

use tracing::debug;

use crate::analysis::Metrics;
use crate::language::Language;
use crate::normalize::CleanedLine;

use super::indentation::check_deep_indentation;
use super::magic_numbers::check_magic_numbers;
use super::structure::{check_long_function, check_nested_loops, check_too_many_conditions};
use super::unused::check_unused_variables;
use super::{Finding, MistakeThresholds};

/// Run all mistake rules against one piece of code.
///
/// Every call starts from an empty list and each rule contributes at most
/// one finding, in a fixed rule order.
pub fn detect_mistakes(
    lines: &[CleanedLine],
    language: Language,
    metrics: &Metrics,
    thresholds: &MistakeThresholds,
) -> Vec<Finding> {
    if lines.is_empty() {
        return Vec::new();
    }

    let findings: Vec<Finding> = [
        check_nested_loops(metrics, thresholds),
        check_too_many_conditions(metrics, thresholds),
        check_long_function(metrics, thresholds),
        check_unused_variables(lines, language),
        check_deep_indentation(lines, language, thresholds),
        check_magic_numbers(lines, thresholds),
    ]
    .into_iter()
    .flatten()
    .collect();

    debug!(
        language = language.as_str(),
        findings = findings.len(),
        "detected mistakes"
    );
    findings
}
