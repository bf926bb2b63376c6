//! Unnamed numeric constants.
//!
//! Only whitespace-separated words that parse as a number on their own are
//! considered, so `x = 42` counts `42` but `f(42)` and `42;` do not.

use crate::normalize::CleanedLine;

use super::{Finding, FindingKind, MistakeThresholds};

/// How many distinct values the problem text lists.
const MAX_LISTED: usize = 5;

pub(super) fn check_magic_numbers(
    lines: &[CleanedLine],
    t: &MistakeThresholds,
) -> Option<Finding> {
    let magic: Vec<&str> = lines
        .iter()
        .flat_map(|l| l.text.split_whitespace())
        .filter(|word| is_number(word))
        .filter(|word| !t.allowed_numbers.iter().any(|a| a == word))
        .collect();

    if magic.len() <= t.max_magic_numbers {
        return None;
    }

    let mut listed: Vec<&str> = Vec::new();
    for &value in &magic {
        if listed.len() == MAX_LISTED {
            break;
        }
        if !listed.contains(&value) {
            listed.push(value);
        }
    }

    Some(Finding::new(
        FindingKind::MagicNumbers,
        format!(
            "Found {} magic numbers: {}...",
            magic.len(),
            listed.join(", ")
        ),
        "Magic numbers make code hard to understand and maintain. \
         Their meaning is not clear without context.",
        "Replace magic numbers with named constants or variables \
         with descriptive names.",
        "Learn about constants and configuration management.",
    ))
}

/// A float-parseable word containing at least one digit, which rules out
/// `inf` and `nan`.
fn is_number(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit()) && word.parse::<f64>().is_ok()
}
