//! Declared-but-unused variable rule.
//!
//! Matching is by substring: a later line "uses" a variable if it contains
//! the name anywhere and is not itself declaration-shaped. Names that are
//! substrings of other identifiers can therefore hide or cause findings.

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{has_keyword, is_identifier, split_assignment};
use crate::language::Language;
use crate::normalize::CleanedLine;

use super::{Finding, FindingKind};

const PYTHON_SKIP_KEYWORDS: &[&str] = &["def", "for", "while", "if", "elif", "else"];
const C_SKIP_KEYWORDS: &[&str] = &["for", "while", "if"];

lazy_static! {
    static ref C_DECLARATION_TYPE: Regex = Regex::new(r"\b(?:int|float|double|char)\b").unwrap();
}

pub(super) fn check_unused_variables(
    lines: &[CleanedLine],
    language: Language,
) -> Option<Finding> {
    let unused = match language {
        Language::Python => find_unused(lines, &python_candidates(lines), &python_patterns, 1),
        Language::C | Language::Cpp => find_unused(lines, &c_candidates(lines), &c_patterns, 2),
    };
    if unused.is_empty() {
        return None;
    }

    let quoted = unused
        .iter()
        .map(|v| format!("\"{}\"", v))
        .collect::<Vec<_>>()
        .join(", ");
    let (problem, subject) = if unused.len() == 1 {
        (format!("Variable {} is declared but never used", quoted), "it")
    } else {
        (format!("Variables {} are declared but never used", quoted), "them")
    };

    let finding = match language {
        Language::Python => Finding::new(
            FindingKind::UnusedVariable,
            problem,
            "Unused variables waste memory and make code confusing. \
             They indicate incomplete refactoring or dead code.",
            format!("Remove {} or use {} in your logic.", quoted, subject),
            "Learn about code cleanup and the DRY (Don't Repeat Yourself) principle.",
        ),
        Language::C | Language::Cpp => Finding::new(
            FindingKind::UnusedVariable,
            problem,
            "Unused variables indicate dead code and waste resources.",
            format!("Remove {} or implement {} usage.", quoted, if unused.len() == 1 { "its" } else { "their" }),
            "Learn about memory management and code optimization.",
        ),
    };
    Some(finding)
}

/// Single-name assignment targets, first appearance order, no duplicates.
fn python_candidates(lines: &[CleanedLine]) -> Vec<String> {
    let mut names = Vec::new();
    for line in lines {
        let text = line.text.trim();
        if has_keyword(text, PYTHON_SKIP_KEYWORDS) {
            continue;
        }
        if let Some((target, _)) = split_assignment(text) {
            push_unique(&mut names, target);
        }
    }
    names
}

/// Declarator names from `type a, *b = 1, c[4];` style lines.
fn c_candidates(lines: &[CleanedLine]) -> Vec<String> {
    let mut names = Vec::new();
    for line in lines {
        let text = line.text.trim();
        if !text.contains(';') || has_keyword(text, C_SKIP_KEYWORDS) {
            continue;
        }
        let Some(m) = C_DECLARATION_TYPE.find(text) else {
            continue;
        };
        let rest = &text[m.end()..];
        let rest = rest.split(';').next().unwrap_or(rest);

        for declarator in rest.split(',') {
            let target = declarator.split('=').next().unwrap_or(declarator);
            if target.contains('(') {
                continue;
            }
            let target = target.trim().trim_start_matches('*').trim();
            let name: String = target
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            if is_identifier(&name) {
                push_unique(&mut names, &name);
            }
        }
    }
    names
}

fn python_patterns(var: &str) -> Vec<String> {
    vec![format!("{} =", var), format!("{}=", var)]
}

fn c_patterns(var: &str) -> Vec<String> {
    vec![format!("{};", var), format!("{} =", var), format!("{}=", var)]
}

/// Names whose first declaration-shaped line is followed by no usage line.
fn find_unused(
    lines: &[CleanedLine],
    candidates: &[String],
    patterns: &dyn Fn(&str) -> Vec<String>,
    min_len: usize,
) -> Vec<String> {
    candidates
        .iter()
        .filter(|var| var.chars().count() >= min_len)
        .filter(|var| {
            let shapes = patterns(var);
            let is_declaration = |text: &str| shapes.iter().any(|p| text.contains(p.as_str()));

            let mut declared = false;
            let mut uses = 0usize;
            for line in lines {
                let text = line.text.as_str();
                if !declared {
                    declared = is_declaration(text);
                } else if text.contains(var.as_str()) && !is_declaration(text) {
                    uses += 1;
                }
            }
            declared && uses == 0
        })
        .cloned()
        .collect()
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    fn check(src: &str, language: Language) -> Option<Finding> {
        check_unused_variables(&normalize::strip(src, language), language)
    }

    #[test]
    fn test_python_unused_variable() {
        let f = check("x = 10\nresult = 0\nprint(result)\n", Language::Python).unwrap();
        assert_eq!(f.kind, FindingKind::UnusedVariable);
        assert_eq!(f.problem, "Variable \"x\" is declared but never used");
        assert!(f.solution.contains("\"x\""));
    }

    #[test]
    fn test_python_augmented_assignment_counts_as_use() {
        let src = "def calculate_sum(numbers):\n    total = 0\n    for num in numbers:\n        total += num\n    return total\n";
        assert!(check(src, Language::Python).is_none());
    }

    #[test]
    fn test_multiple_unused_collapse_into_one_finding() {
        let f = check("a = 1\nb = 2\nc = 3\nprint(c)\n", Language::Python).unwrap();
        assert_eq!(f.problem, "Variables \"a\", \"b\" are declared but never used");
    }

    #[test]
    fn test_python_skips_unpacking_and_attributes() {
        assert!(check("a, b = pair\nself.x = 1\n", Language::Python).is_none());
    }

    #[test]
    fn test_c_unused_declarator() {
        let src = "int main() {\n    int count = 0;\n    int total = 5;\n    printf(\"%d\", total);\n    return 0;\n}\n";
        let f = check(src, Language::C).unwrap();
        assert_eq!(f.problem, "Variable \"count\" is declared but never used");
    }

    #[test]
    fn test_c_single_letter_names_are_ignored() {
        let src = "int i, j;\nint main() { return 0; }\n";
        assert!(check(src, Language::C).is_none());
    }

    #[test]
    fn test_c_declarator_list() {
        let names = c_candidates(&normalize::strip(
            "double *ptr = 0, width, grid[4];\nfor (int k = 0; k < 2; k++) {}\n",
            Language::C,
        ));
        assert_eq!(names, vec!["ptr", "width", "grid"]);
    }

    #[test]
    fn test_substring_usage_hides_finding() {
        // "cnt" appears inside "cnt2", which counts as a use.
        assert!(check("cnt = 1\nprint(cnt2)\n", Language::Python).is_none());
    }
}
