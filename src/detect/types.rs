//! Core types for mistake detection.

use serde::{Deserialize, Serialize};

/// Kinds of beginner mistakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FindingKind {
    NestedLoops,
    TooManyConditions,
    LongFunction,
    UnusedVariable,
    DeepIndentation,
    MagicNumbers,
}

impl FindingKind {
    pub const ALL: [FindingKind; 6] = [
        FindingKind::NestedLoops,
        FindingKind::TooManyConditions,
        FindingKind::LongFunction,
        FindingKind::UnusedVariable,
        FindingKind::DeepIndentation,
        FindingKind::MagicNumbers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FindingKind::NestedLoops => "NESTED_LOOPS",
            FindingKind::TooManyConditions => "TOO_MANY_CONDITIONS",
            FindingKind::LongFunction => "LONG_FUNCTION",
            FindingKind::UnusedVariable => "UNUSED_VARIABLE",
            FindingKind::DeepIndentation => "DEEP_INDENTATION",
            FindingKind::MagicNumbers => "MAGIC_NUMBERS",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected mistake with its advice text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    #[serde(rename = "type")]
    pub kind: FindingKind,
    pub problem: String,
    pub why_bad: String,
    pub solution: String,
    pub learn_next: String,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        problem: impl Into<String>,
        why_bad: impl Into<String>,
        solution: impl Into<String>,
        learn_next: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            problem: problem.into(),
            why_bad: why_bad.into(),
            solution: solution.into(),
            learn_next: learn_next.into(),
        }
    }
}

/// Limits above which each rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MistakeThresholds {
    /// Maximum loop nesting depth.
    pub max_nested_loops: usize,
    /// Maximum if/else count.
    pub max_conditions: usize,
    /// Maximum line count for a script with at most one function.
    pub max_function_lines: usize,
    /// Maximum Python indentation level.
    pub max_indentation_level: usize,
    /// Maximum count of numeric literals outside `allowed_numbers`.
    pub max_magic_numbers: usize,
    /// Numeric tokens that never count as magic.
    pub allowed_numbers: Vec<String>,
}

impl Default for MistakeThresholds {
    fn default() -> Self {
        Self {
            max_nested_loops: 2,
            max_conditions: 5,
            max_function_lines: 50,
            max_indentation_level: 4,
            max_magic_numbers: 3,
            allowed_numbers: ["0", "1", "2", "10", "100", "1000"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_screaming_snake() {
        let json = serde_json::to_string(&FindingKind::TooManyConditions).unwrap();
        assert_eq!(json, "\"TOO_MANY_CONDITIONS\"");
        assert_eq!(FindingKind::parse("MAGIC_NUMBERS"), Some(FindingKind::MagicNumbers));
        assert_eq!(FindingKind::parse("magic_numbers"), None);
    }

    #[test]
    fn test_finding_uses_type_field() {
        let f = Finding::new(FindingKind::LongFunction, "p", "w", "s", "l");
        let value = serde_json::to_value(&f).unwrap();
        assert_eq!(value["type"], "LONG_FUNCTION");
        assert_eq!(value["learn_next"], "l");
    }

    #[test]
    fn test_partial_thresholds_fill_defaults() {
        let t: MistakeThresholds = serde_yaml::from_str("max_conditions: 8").unwrap();
        assert_eq!(t.max_conditions, 8);
        assert_eq!(t.max_nested_loops, 2);
        assert_eq!(t.allowed_numbers.len(), 6);
    }
}
