//! C/C++ comment stripping.
//!
//! Block comments carry over between lines. String and char literals are
//! copied through untouched, delimiters included, so `//` inside `"..."`
//! survives.

use super::{split_indent, CleanedLine};

pub(super) fn strip(raw: &str) -> Vec<CleanedLine> {
    let mut cleaned = Vec::new();
    let mut in_block_comment = false;

    for (idx, raw_line) in raw.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        let (indent, _) = split_indent(line);
        let chars: Vec<char> = line.chars().collect();
        let mut kept = String::with_capacity(line.len());
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            let next = chars.get(i + 1).copied();

            if in_block_comment {
                if ch == '*' && next == Some('/') {
                    in_block_comment = false;
                    i += 2;
                } else {
                    i += 1;
                }
                continue;
            }

            match (ch, next) {
                ('"', _) | ('\'', _) => i = copy_literal(&chars, i, &mut kept),
                ('/', Some('/')) => break,
                ('/', Some('*')) => {
                    in_block_comment = true;
                    i += 2;
                }
                _ => {
                    kept.push(ch);
                    i += 1;
                }
            }
        }

        let text = kept.trim();
        if !text.is_empty() {
            cleaned.push(CleanedLine::new(idx + 1, indent, text));
        }
    }

    cleaned
}

/// Copy a quoted literal starting at `start` into `out`.
///
/// Returns the index just past the closing delimiter, or the end of the line
/// when the literal is unterminated.
fn copy_literal(chars: &[char], start: usize, out: &mut String) -> usize {
    let quote = chars[start];
    out.push(quote);

    let mut escaped = false;
    let mut i = start + 1;
    while i < chars.len() {
        let ch = chars[i];
        out.push(ch);
        i += 1;

        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            break;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[CleanedLine]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_strips_line_and_block_comments() {
        let raw = "#include <stdio.h>\n// banner\nint main() { /* inline */ return 0; } // done\n";
        let lines = strip(raw);
        assert_eq!(
            texts(&lines),
            vec!["#include <stdio.h>", "int main() {  return 0; }"]
        );
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let raw = "int a = 1; /* start\n   middle\n   end */ int b = 2;\nint c = 3;\n";
        let lines = strip(raw);
        assert_eq!(texts(&lines), vec!["int a = 1;", "   int b = 2;", "int c = 3;"]);
        assert_eq!(lines[1].line, 3);
    }

    #[test]
    fn test_unterminated_block_comment_discards_rest() {
        let raw = "int a = 1;\n/* never closed\nint b = 2;\nint c = 3;\n";
        let lines = strip(raw);
        assert_eq!(texts(&lines), vec!["int a = 1;"]);
    }

    #[test]
    fn test_literals_are_preserved() {
        let raw = "printf(\"// not a comment /* nor this */\\n\"); // real\nchar q = '\\'';\n";
        let lines = strip(raw);
        assert_eq!(
            texts(&lines),
            vec![
                "printf(\"// not a comment /* nor this */\\n\");",
                "char q = '\\'';"
            ]
        );
    }

    #[test]
    fn test_unterminated_literal_copied_as_is() {
        let lines = strip("puts(\"oops // still literal\n");
        assert_eq!(texts(&lines), vec!["puts(\"oops // still literal"]);
    }

    #[test]
    fn test_indentation_preserved() {
        let lines = strip("    for (;;) { /* c */\n        x++;\n");
        assert_eq!(lines[0].indent, 4);
        assert_eq!(lines[1].indent, 8);
        assert_eq!(lines[0].text, "for (;;) {");
    }
}
