//! The four authorship signals, each in [0, 1].

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::Metrics;
use crate::language::Language;
use crate::normalize::CleanedLine;
use crate::score::SkillLevel;

lazy_static! {
    /// Variable names that read like textbook placeholders.
    static ref GENERIC_NAME: Regex =
        Regex::new(r"(?i)\b(?:index|counter|result|temp|value|data|input|output)\b").unwrap();

    static ref PYTHON_FUNCTION: Regex = Regex::new(r"def\s+\w+\(.*\):").unwrap();
    static ref C_FUNCTION: Regex = Regex::new(r"\w+\s+\w+\(.*\)\s*\{").unwrap();

    /// Function shapes lifted straight from tutorials.
    static ref TEXTBOOK_FUNCTIONS: Vec<Regex> = vec![
        Regex::new(r"(?i)def\s+main\(\):").unwrap(),
        Regex::new(r"(?i)int\s+main\(\)").unwrap(),
        Regex::new(r"(?i)void\s+setup\(\)").unwrap(),
        Regex::new(r"(?i)def\s+calculate_").unwrap(),
        Regex::new(r"(?i)def\s+process_").unwrap(),
    ];

    /// Idiomatic constructs that generated code tends to repeat verbatim.
    static ref REPEATED_CONSTRUCTS: Vec<Regex> = vec![
        Regex::new(r"for.*in range\(.*\):").unwrap(),
        Regex::new(r"for\s*\(.*;.*;.*\)\s*\{").unwrap(),
        Regex::new(r"if.*:\s*$").unwrap(),
        Regex::new(r"def\s+\w+\(self\b.*\):").unwrap(),
        Regex::new(r#"print\(f["'].*["']\)"#).unwrap(),
        Regex::new(r"return\s+\w+").unwrap(),
        Regex::new(r"int\s+\w+\s*=\s*\d+;").unwrap(),
    ];
}

/// Penalty per repeat of the same construct.
const REPETITION_STEP: f64 = 0.2;

/// Fraction of lines that still look like comments.
pub(super) fn comment_ratio(lines: &[CleanedLine], language: Language) -> f64 {
    if lines.is_empty() {
        return 0.0;
    }
    let comments = lines
        .iter()
        .filter(|l| {
            let text = l.text.trim();
            match language {
                Language::Python => text.starts_with('#'),
                Language::C | Language::Cpp => text.starts_with("//") || text.contains("/*"),
            }
        })
        .count();
    comments as f64 / lines.len() as f64
}

/// Mean of naming, function-shape and formatting regularity.
pub(super) fn perfection(lines: &[CleanedLine], language: Language) -> f64 {
    (generic_naming(lines) + textbook_functions(lines, language) + formatting_consistency(lines))
        / 3.0
}

fn generic_naming(lines: &[CleanedLine]) -> f64 {
    let names: Vec<&str> = lines
        .iter()
        .map(|l| l.text.as_str())
        .filter(|text| text.contains('=') && !text.contains("=="))
        .filter_map(|text| text.split('=').next()?.split_whitespace().last())
        .collect();

    if names.is_empty() {
        return 0.0;
    }
    let generic = names.iter().filter(|n| GENERIC_NAME.is_match(n)).count();
    generic as f64 / names.len() as f64
}

fn textbook_functions(lines: &[CleanedLine], language: Language) -> f64 {
    let shape: &Regex = match language {
        Language::Python => &PYTHON_FUNCTION,
        Language::C | Language::Cpp => &C_FUNCTION,
    };
    let functions: Vec<&str> = lines
        .iter()
        .map(|l| l.text.as_str())
        .filter(|text| shape.is_match(text))
        .collect();

    if functions.is_empty() {
        return 0.0;
    }
    let textbook = functions
        .iter()
        .filter(|text| TEXTBOOK_FUNCTIONS.iter().any(|re| re.is_match(text)))
        .count();
    textbook as f64 / functions.len() as f64
}

/// `1 - min(variance / 4, 1)` over leading indentation. Uniform indentation
/// scores 1.0.
fn formatting_consistency(lines: &[CleanedLine]) -> f64 {
    if lines.len() < 3 {
        return 0.0;
    }
    let n = lines.len() as f64;
    let mean = lines.iter().map(|l| l.indent as f64).sum::<f64>() / n;
    let variance = lines
        .iter()
        .map(|l| (l.indent as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    1.0 - (variance / 4.0).min(1.0)
}

/// How far the code's complexity outruns what the skill level would write.
pub(super) fn complexity_mismatch(metrics: &Metrics, skill: SkillLevel) -> f64 {
    let actual = f64::from(metrics.complexity.rank());
    let expected = f64::from(skill.expected_complexity().rank());

    let mut mismatch = if actual > expected + 1.0 {
        ((actual - expected) / 3.0).min(1.0)
    } else {
        0.0
    };

    if skill == SkillLevel::Beginner {
        if metrics.nested_loops > 1 {
            mismatch += 0.3;
        }
        if metrics.functions > 2 {
            mismatch += 0.2;
        }
    }
    mismatch.min(1.0)
}

/// Sum of `(count - 1) * 0.2` over the repeated construct patterns.
pub(super) fn pattern_repetition(lines: &[CleanedLine]) -> f64 {
    if lines.len() < 5 {
        return 0.0;
    }
    let score: f64 = REPEATED_CONSTRUCTS
        .iter()
        .map(|re| lines.iter().filter(|l| re.is_match(&l.text)).count())
        .filter(|&count| count > 0)
        .map(|count| (count - 1) as f64 * REPETITION_STEP)
        .sum();
    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Complexity;
    use crate::normalize;

    fn py(src: &str) -> Vec<CleanedLine> {
        normalize::strip(src, Language::Python)
    }

    #[test]
    fn test_comment_ratio_counts_residual_comment_lines() {
        let lines = vec![
            CleanedLine::new(1, 0, "# note"),
            CleanedLine::new(2, 0, "x = 1"),
        ];
        assert_eq!(comment_ratio(&lines, Language::Python), 0.5);
        let c = vec![
            CleanedLine::new(1, 0, "// a"),
            CleanedLine::new(2, 0, "int x; /* b"),
            CleanedLine::new(3, 0, "x++;"),
            CleanedLine::new(4, 0, "return x;"),
        ];
        assert_eq!(comment_ratio(&c, Language::C), 0.5);
        assert_eq!(comment_ratio(&[], Language::C), 0.0);
    }

    #[test]
    fn test_generic_naming() {
        let lines = py("result = 1\ncount = 2\nmy_data = 3\nif a == b:\n    pass\n");
        // "my_data" does not match \bdata\b
        assert!((generic_naming(&lines) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_textbook_functions() {
        let lines = py("def main():\n    pass\ndef calculate_total(x):\n    pass\ndef helper(y):\n    pass\n");
        assert!((textbook_functions(&lines, Language::Python) - 2.0 / 3.0).abs() < 1e-9);

        let c = normalize::strip("int main() {\n}\nvoid go(int a) {\n}\n", Language::C);
        assert_eq!(textbook_functions(&c, Language::C), 0.5);
    }

    #[test]
    fn test_formatting_consistency() {
        let flat = py("a = 1\nb = 2\nc = 3\n");
        assert_eq!(formatting_consistency(&flat), 1.0);
        let short = py("a = 1\nb = 2\n");
        assert_eq!(formatting_consistency(&short), 0.0);
        let ragged = py("a\n        b\nc\n        d\n");
        assert_eq!(formatting_consistency(&ragged), 0.0);
    }

    #[test]
    fn test_complexity_mismatch() {
        let mut m = Metrics {
            complexity: Complexity::Cubic,
            ..Metrics::default()
        };
        // rank 4 vs expected 2
        assert!((complexity_mismatch(&m, SkillLevel::Beginner) - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(complexity_mismatch(&m, SkillLevel::Intermediate), 0.0);

        m.nested_loops = 2;
        m.functions = 3;
        assert_eq!(complexity_mismatch(&m, SkillLevel::Beginner), 1.0);
        assert_eq!(complexity_mismatch(&m, SkillLevel::Advanced), 0.0);
    }

    #[test]
    fn test_pattern_repetition() {
        let lines = py(
            "for i in range(3):\n    a()\nfor j in range(4):\n    b()\nfor k in range(5):\n    c()\n",
        );
        // three range loops: (3 - 1) * 0.2
        assert!((pattern_repetition(&lines) - 0.4).abs() < 1e-9);
        assert_eq!(pattern_repetition(&py("a\nb\nc\nd\n")), 0.0);
    }
}
