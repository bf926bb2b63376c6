//! Structural code analysis.
//!
//! Turns cleaned lines into a [`Metrics`] record: line, function, loop,
//! conditional and variable counts plus loop nesting and a coarse
//! [`Complexity`] class.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────┐     ┌──────────────────┐     ┌───────────┐
//! │ CleanedLines  │────▶│ StructureAnalyzer│────▶│ Metrics   │
//! └───────────────┘     │ (Python: indent, │     │ + class   │
//!                       │  C/C++: tokens)  │     └───────────┘
//!                       └──────────────────┘
//! ```
//!
//! Python nesting is tracked with an indentation stack. C and C++ go
//! through [`tokenize`] first and track nesting by brace depth.

mod languages;
mod metrics;
mod tokenizer;
mod traits;

use tracing::debug;

use crate::language::Language;
use crate::normalize::CleanedLine;

pub use languages::{get_analyzer, CFamilyAnalyzer, PythonAnalyzer};
pub use metrics::{Complexity, Metrics};
pub use tokenizer::{tokenize, tokenize_str, Token, SYMBOLS};
pub use traits::StructureAnalyzer;

/// Analyze cleaned lines. Empty input yields [`Metrics::empty`].
pub fn analyze(lines: &[CleanedLine], language: Language) -> Metrics {
    if lines.is_empty() {
        return Metrics::empty();
    }

    let analyzer = get_analyzer(language);
    let mut metrics = analyzer.measure(lines);
    metrics.classify();

    debug!(
        analyzer = analyzer.language_id(),
        lines = metrics.total_lines,
        loops = metrics.loops,
        nested_loops = metrics.nested_loops,
        conditionals = metrics.conditionals,
        functions = metrics.functions,
        complexity = metrics.complexity.label(),
        "analyzed structure"
    );
    metrics
}

/// Identifier-like words of `text`, skipping anything inside quotes.
///
/// Used for keyword checks so that `for` matches `for(` and `while(x):`
/// but not `format` or `"for each"`.
pub(crate) fn code_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }

        if ch.is_alphanumeric() || ch == '_' {
            start.get_or_insert(i);
            continue;
        }

        if let Some(s) = start.take() {
            words.push(&text[s..i]);
        }
        if ch == '"' || ch == '\'' {
            quote = Some(ch);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }

    words
}

/// Whether any of `keywords` appears in `text` as a whole word outside quotes.
pub(crate) fn has_keyword(text: &str, keywords: &[&str]) -> bool {
    code_words(text).iter().any(|w| keywords.contains(w))
}

/// Split a plain `target = value` assignment into its trimmed sides.
///
/// Returns `None` when the first `=` belongs to a comparison (`==`, `!=`,
/// `<=`, `>=`), an augmented assignment (`+=` and friends) or a walrus, or
/// when the target is not a single name (`a[i]`, `self.x`, `a, b`).
pub(crate) fn split_assignment(text: &str) -> Option<(&str, &str)> {
    let pos = text.find('=')?;
    let bytes = text.as_bytes();

    if bytes.get(pos + 1) == Some(&b'=') {
        return None;
    }
    if let Some(prev) = pos.checked_sub(1).map(|p| bytes[p]) {
        if b"=!<>+-*/%&|^:@".contains(&prev) {
            return None;
        }
    }

    let target = text[..pos].trim();
    if !is_identifier(target) {
        return None;
    }
    Some((target, text[pos + 1..].trim()))
}

pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => chars.all(|c| c.is_alphanumeric() || c == '_'),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;

    fn analyze_src(src: &str, language: Language) -> Metrics {
        analyze(&normalize::strip(src, language), language)
    }

    #[test]
    fn test_empty_lines_give_empty_metrics() {
        let m = analyze(&[], Language::Python);
        assert_eq!(m, Metrics::empty());
    }

    #[test]
    fn test_single_python_loop_is_linear() {
        let m = analyze_src(
            "x=[1,2,3]\ns=0\nfor n in x:\n    s=s+n\nprint(s)",
            Language::Python,
        );
        assert_eq!(m.loops, 1);
        assert_eq!(m.nested_loops, 0);
        assert_eq!(m.complexity, Complexity::Linear);
        assert_eq!(m.complexity.label(), "O(n)");
        assert_eq!(m.total_lines, 5);
    }

    #[test]
    fn test_c_triple_nested_loop_is_cubic() {
        let src = r#"
int main() {
    int count = 0;
    for (int i = 0; i < 10; i++) {
        for (int j = 0; j < 10; j++) {
            for (int k = 0; k < 10; k++) {
                if (i + j + k > 15) {
                    count++;
                }
            }
        }
    }
    return count;
}
"#;
        let m = analyze_src(src, Language::C);
        assert_eq!(m.loops, 3);
        assert_eq!(m.nested_loops, 2);
        assert_eq!(m.max_nesting_depth, 3);
        assert_eq!(m.complexity.label(), "O(n³)");
        assert_eq!(m.functions, 1);
        assert_eq!(m.conditions_in_loops, 1);
    }

    #[test]
    fn test_code_words_skip_strings() {
        assert_eq!(code_words("while(x):"), vec!["while", "x"]);
        assert_eq!(code_words("print(\"for each\", y)"), vec!["print", "y"]);
        assert_eq!(code_words("s = 'it\\'s' + for_x"), vec!["s", "for_x"]);
        assert!(!has_keyword("format = 1", &["for"]));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(split_assignment("total = 0"), Some(("total", "0")));
        assert_eq!(split_assignment("count=b"), Some(("count", "b")));
        assert_eq!(split_assignment("a[i]=b"), None);
        assert_eq!(split_assignment("self.x = 1"), None);
        assert_eq!(split_assignment("a, b = pair"), None);
        assert_eq!(split_assignment("x == 1"), None);
        assert_eq!(split_assignment("x += 1"), None);
        assert_eq!(split_assignment("y >= 2"), None);
        assert_eq!(split_assignment("f(x=1)"), None);
        assert_eq!(split_assignment("return x"), None);
    }
}
