//! Structural metrics and the complexity classification derived from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Coarse complexity class derived from loop nesting.
///
/// This is a heuristic keyed purely on loop counts, not an asymptotic
/// analysis of the code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Complexity {
    #[default]
    Constant,
    Linear,
    Quadratic,
    Cubic,
    Exponential,
}

impl Complexity {
    pub const ALL: [Complexity; 5] = [
        Complexity::Constant,
        Complexity::Linear,
        Complexity::Quadratic,
        Complexity::Cubic,
        Complexity::Exponential,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Constant => "O(1)",
            Complexity::Linear => "O(n)",
            Complexity::Quadratic => "O(n²)",
            Complexity::Cubic => "O(n³)",
            Complexity::Exponential => "O(2ⁿ)",
        }
    }

    /// Ordinal position on the 1..=5 scale.
    pub fn rank(&self) -> u8 {
        match self {
            Complexity::Constant => 1,
            Complexity::Linear => 2,
            Complexity::Quadratic => 3,
            Complexity::Cubic => 4,
            Complexity::Exponential => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Classify from loop counts.
    ///
    /// No loops is constant, loops without nesting is linear, and nesting
    /// depth 2, 3 and 4+ map to quadratic, cubic and exponential.
    pub fn classify(loops: usize, nested_loops: usize, max_nesting_depth: usize) -> Self {
        if loops == 0 {
            Complexity::Constant
        } else if nested_loops == 0 {
            Complexity::Linear
        } else {
            match max_nesting_depth {
                0..=2 => Complexity::Quadratic,
                3 => Complexity::Cubic,
                _ => Complexity::Exponential,
            }
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Complexity> for &'static str {
    fn from(c: Complexity) -> Self {
        c.label()
    }
}

impl TryFrom<String> for Complexity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Complexity::from_label(&value).ok_or_else(|| format!("unknown complexity label {value:?}"))
    }
}

/// Structural counts for one piece of code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Metrics {
    pub total_lines: usize,
    pub loops: usize,
    /// Loops found while already inside at least one loop.
    pub nested_loops: usize,
    pub conditionals: usize,
    pub conditions_in_loops: usize,
    pub functions: usize,
    pub variables: usize,
    /// Semicolon count. Always zero for Python.
    pub total_statements: usize,
    pub max_nesting_depth: usize,
    pub complexity: Complexity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Metrics {
    /// The all-zero record returned when there is nothing to analyze.
    pub fn empty() -> Self {
        Self {
            error: Some("no code to analyze".to_string()),
            ..Self::default()
        }
    }

    /// Recompute `complexity` from the loop counts.
    pub(crate) fn classify(&mut self) {
        self.complexity = Complexity::classify(self.loops, self.nested_loops, self.max_nesting_depth);
    }

    /// Record a loop entered at `depth` (1 for a top-level loop).
    pub(crate) fn enter_loop(&mut self, depth: usize) {
        self.loops += 1;
        if depth > 1 {
            self.nested_loops += 1;
            self.max_nesting_depth = self.max_nesting_depth.max(depth);
        }
    }

    pub(crate) fn count_conditional(&mut self, in_loop: bool) {
        self.conditionals += 1;
        if in_loop {
            self.conditions_in_loops += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_thresholds() {
        assert_eq!(Complexity::classify(0, 0, 0), Complexity::Constant);
        assert_eq!(Complexity::classify(3, 0, 0), Complexity::Linear);
        assert_eq!(Complexity::classify(2, 1, 2), Complexity::Quadratic);
        assert_eq!(Complexity::classify(3, 2, 3), Complexity::Cubic);
        assert_eq!(Complexity::classify(4, 3, 4), Complexity::Exponential);
        assert_eq!(Complexity::classify(9, 8, 9), Complexity::Exponential);
    }

    #[test]
    fn test_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&Complexity::Quadratic).unwrap();
        assert_eq!(json, "\"O(n²)\"");
        let back: Complexity = serde_json::from_str("\"O(2ⁿ)\"").unwrap();
        assert_eq!(back, Complexity::Exponential);
        assert!(serde_json::from_str::<Complexity>("\"O(n log n)\"").is_err());
    }

    #[test]
    fn test_rank_is_ordered() {
        let ranks: Vec<u8> = Complexity::ALL.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(Complexity::Linear < Complexity::Cubic);
    }

    #[test]
    fn test_enter_loop_tracks_nesting() {
        let mut m = Metrics::default();
        m.enter_loop(1);
        m.enter_loop(2);
        m.enter_loop(3);
        m.enter_loop(2);
        assert_eq!(m.loops, 4);
        assert_eq!(m.nested_loops, 3);
        assert_eq!(m.max_nesting_depth, 3);
    }

    #[test]
    fn test_empty_metrics_flag_error() {
        let m = Metrics::empty();
        assert_eq!(m.complexity, Complexity::Constant);
        assert_eq!(m.total_lines, 0);
        assert!(m.error.is_some());
    }
}
