//! Pyramid-code rule for Python.

use crate::language::Language;
use crate::normalize::CleanedLine;

use super::{Finding, FindingKind, MistakeThresholds};

pub(super) fn check_deep_indentation(
    lines: &[CleanedLine],
    language: Language,
    t: &MistakeThresholds,
) -> Option<Finding> {
    if language != Language::Python {
        return None;
    }

    // First line reaching the deepest level wins.
    let mut deepest: Option<&CleanedLine> = None;
    for line in lines {
        if deepest.map_or(true, |d| line.indent_level() > d.indent_level()) {
            deepest = Some(line);
        }
    }
    let deepest = deepest?;
    let level = deepest.indent_level();
    if level <= t.max_indentation_level {
        return None;
    }

    Some(Finding::new(
        FindingKind::DeepIndentation,
        format!(
            "Code has {} levels of indentation (line {})",
            level, deepest.line
        ),
        "Deep indentation (pyramid code) is hard to read and maintain. \
         It often indicates too much nesting.",
        "Flatten your code by using early returns, breaking into functions, \
         or using guard clauses.",
        "Learn about code flattening techniques and clean code principles.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staircase(levels: usize) -> Vec<CleanedLine> {
        (0..=levels)
            .map(|l| CleanedLine::new(l + 1, l * 4, "if x:"))
            .collect()
    }

    #[test]
    fn test_five_levels_fire() {
        let t = MistakeThresholds::default();
        let f = check_deep_indentation(&staircase(5), Language::Python, &t).unwrap();
        assert_eq!(f.problem, "Code has 5 levels of indentation (line 6)");
    }

    #[test]
    fn test_four_levels_do_not_fire() {
        let t = MistakeThresholds::default();
        assert!(check_deep_indentation(&staircase(4), Language::Python, &t).is_none());
    }

    #[test]
    fn test_partial_indent_rounds_down() {
        let t = MistakeThresholds::default();
        let lines = vec![CleanedLine::new(1, 23, "x = 1")];
        assert!(check_deep_indentation(&lines, Language::Python, &t).is_some());
        let lines = vec![CleanedLine::new(1, 19, "x = 1")];
        assert!(check_deep_indentation(&lines, Language::Python, &t).is_none());
    }

    #[test]
    fn test_c_is_never_checked() {
        let t = MistakeThresholds::default();
        assert!(check_deep_indentation(&staircase(8), Language::C, &t).is_none());
    }
}
