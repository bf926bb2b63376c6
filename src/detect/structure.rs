//! Rules that read only the metrics record.

use crate::analysis::Metrics;

use super::{Finding, FindingKind, MistakeThresholds};

pub(super) fn check_nested_loops(metrics: &Metrics, t: &MistakeThresholds) -> Option<Finding> {
    let depth = metrics.max_nesting_depth;
    if metrics.nested_loops == 0 || depth <= t.max_nested_loops {
        return None;
    }

    Some(Finding::new(
        FindingKind::NestedLoops,
        format!("Code has {} levels of nested loops", depth),
        "Deep nesting makes code hard to read and maintain. \
         It increases complexity and reduces performance.",
        "Try to flatten your logic or break into functions. \
         Consider using built-in functions like map() or list comprehensions.",
        "Learn about algorithmic optimization and refactoring techniques.",
    ))
}

pub(super) fn check_too_many_conditions(
    metrics: &Metrics,
    t: &MistakeThresholds,
) -> Option<Finding> {
    let conditions = metrics.conditionals;
    if conditions <= t.max_conditions {
        return None;
    }

    Some(Finding::new(
        FindingKind::TooManyConditions,
        format!("Function has {} if/else statements", conditions),
        "Too many conditions make code hard to follow and test. \
         It indicates complex business logic that should be simplified.",
        "Use switch/case statements, lookup tables, or strategy pattern. \
         Consider breaking into smaller functions.",
        "Learn about design patterns and refactoring techniques.",
    ))
}

/// A long script with at most one function stands in for "one giant function".
pub(super) fn check_long_function(metrics: &Metrics, t: &MistakeThresholds) -> Option<Finding> {
    let lines = metrics.total_lines;
    if lines <= t.max_function_lines || metrics.functions > 1 {
        return None;
    }

    Some(Finding::new(
        FindingKind::LongFunction,
        format!("Code has {} lines in main function/script", lines),
        "Long functions are hard to read, test, and maintain. \
         They often do too many things.",
        "Break the function into smaller, focused functions. \
         Each function should do one thing well.",
        "Learn about Single Responsibility Principle and function decomposition.",
    ))
}
