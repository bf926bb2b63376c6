//! Comment stripping and input validation.
//!
//! Turns raw submitted text into an ordered list of [`CleanedLine`]s:
//! comments and blank lines are removed, string literals are kept verbatim,
//! and the leading indentation of every surviving line is preserved because
//! the Python analyzer derives nesting from it.
//!
//! The stripping is line-oriented and lexical. It is not a parser:
//! unterminated string literals are copied as-is and can throw off later
//! stages, and an unterminated C block comment swallows the rest of the input.

mod c_family;
mod python;
mod safety;

use std::fmt;

use tracing::debug;

use crate::error::InputError;
use crate::language::Language;

pub use safety::{check_content, DEFAULT_DENYLIST};

/// Maximum accepted input size, in characters.
pub const MAX_INPUT_CHARS: usize = 1024 * 1024;

/// A source line with comments removed and indentation preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedLine {
    /// 1-based line number in the raw input.
    pub line: usize,
    /// Number of leading whitespace characters in the raw line.
    pub indent: usize,
    /// Line content without leading whitespace, comments or trailing whitespace.
    pub text: String,
}

impl CleanedLine {
    pub fn new(line: usize, indent: usize, text: impl Into<String>) -> Self {
        Self {
            line,
            indent,
            text: text.into(),
        }
    }

    /// Indentation in 4-space units. Any remainder is dropped.
    pub fn indent_level(&self) -> usize {
        self.indent / 4
    }
}

impl fmt::Display for CleanedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:width$}{}", "", self.text, width = self.indent)
    }
}

/// Render cleaned lines back into source text, one line per entry.
pub fn render(lines: &[CleanedLine]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validate and clean raw source text using the default denylist.
pub fn clean(raw: &str, language: Language) -> Result<Vec<CleanedLine>, InputError> {
    clean_with(raw, language, DEFAULT_DENYLIST)
}

/// Validate and clean raw source text.
///
/// Checks run in order: empty input, size limit, content safety, then
/// stripping. Input that strips down to nothing is rejected as
/// [`InputError::NoCode`].
pub fn clean_with<S: AsRef<str>>(
    raw: &str,
    language: Language,
    denylist: &[S],
) -> Result<Vec<CleanedLine>, InputError> {
    if raw.is_empty() {
        return Err(InputError::Empty);
    }

    // Byte length bounds the char count from above, so only count when needed.
    if raw.len() > MAX_INPUT_CHARS {
        let chars = raw.chars().count();
        if chars > MAX_INPUT_CHARS {
            return Err(InputError::TooLarge {
                chars,
                limit: MAX_INPUT_CHARS,
            });
        }
    }

    check_content(raw, language, denylist)?;

    let lines = strip(raw, language);
    if lines.is_empty() {
        return Err(InputError::NoCode);
    }

    debug!(
        language = language.as_str(),
        raw_lines = raw.lines().count(),
        cleaned_lines = lines.len(),
        "normalized source"
    );
    Ok(lines)
}

/// Strip comments and blank lines without any validation.
pub fn strip(raw: &str, language: Language) -> Vec<CleanedLine> {
    match language {
        Language::Python => python::strip(raw),
        Language::C | Language::Cpp => c_family::strip(raw),
    }
}

/// Split a trimmed-right line into its indentation width and content.
fn split_indent(line: &str) -> (usize, &str) {
    let content = line.trim_start();
    let indent = line[..line.len() - content.len()].chars().count();
    (indent, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_rejects_empty_input() {
        assert_eq!(clean("", Language::Python), Err(InputError::Empty));
    }

    #[test]
    fn test_whitespace_only_input_has_no_code() {
        assert_eq!(clean("   \n\t\n", Language::C), Err(InputError::NoCode));
    }

    #[test]
    fn test_clean_rejects_oversized_input() {
        let raw = "x".repeat(MAX_INPUT_CHARS + 1);
        match clean(&raw, Language::Python) {
            Err(InputError::TooLarge { chars, limit }) => {
                assert_eq!(chars, MAX_INPUT_CHARS + 1);
                assert_eq!(limit, MAX_INPUT_CHARS);
            }
            other => panic!("expected TooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_clean_accepts_input_at_the_limit() {
        let raw = "x".repeat(MAX_INPUT_CHARS);
        let lines = clean(&raw, Language::Python).unwrap();
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_oversized_input_rejected_before_content_check() {
        let mut raw = "import os\n".to_string();
        raw.push_str(&"y".repeat(MAX_INPUT_CHARS));
        assert!(matches!(
            clean(&raw, Language::Python),
            Err(InputError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_clean_rejects_comment_only_input() {
        assert_eq!(
            clean("# just a note\n   # another\n", Language::Python),
            Err(InputError::NoCode)
        );
        assert_eq!(
            clean("/* nothing\n here */\n// at all", Language::Cpp),
            Err(InputError::NoCode)
        );
    }

    #[test]
    fn test_python_strip_is_idempotent() {
        let raw = "def f(x):  # doc\n    s = \"#not\"  # yes\n\n        return s\n";
        let once = strip(raw, Language::Python);
        let twice = strip(&render(&once), Language::Python);
        let texts = |v: &[CleanedLine]| {
            v.iter()
                .map(|l| (l.indent, l.text.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(texts(&once), texts(&twice));
    }

    #[test]
    fn test_c_strip_is_idempotent() {
        let raw = "int main() { /* open\n still */ int x = 1; // tail\n  printf(\"// %d\", x);\n}\n";
        let once = strip(raw, Language::C);
        let twice = strip(&render(&once), Language::C);
        assert_eq!(render(&once), render(&twice));
    }

    #[test]
    fn test_render_restores_indentation() {
        let line = CleanedLine::new(3, 8, "return x");
        assert_eq!(line.to_string(), "        return x");
        assert_eq!(line.indent_level(), 2);
    }
}
