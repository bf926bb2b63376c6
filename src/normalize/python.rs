//! Python comment stripping.

use super::{split_indent, CleanedLine};

pub(super) fn strip(raw: &str) -> Vec<CleanedLine> {
    let mut cleaned = Vec::new();

    for (idx, raw_line) in raw.lines().enumerate() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }

        let (indent, content) = split_indent(line);
        let code = match comment_start(content) {
            Some(pos) => content[..pos].trim_end(),
            None => content,
        };

        if !code.is_empty() {
            cleaned.push(CleanedLine::new(idx + 1, indent, code));
        }
    }

    cleaned
}

/// Byte offset of the first `#` that is not inside a quoted string.
///
/// A quote preceded by a backslash does not open or close a string.
fn comment_start(text: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut prev: Option<char> = None;

    for (i, ch) in text.char_indices() {
        if (ch == '"' || ch == '\'') && prev != Some('\\') {
            match quote {
                None => quote = Some(ch),
                Some(q) if q == ch => quote = None,
                Some(_) => {}
            }
        } else if ch == '#' && quote.is_none() {
            return Some(i);
        }
        prev = Some(ch);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[CleanedLine]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_strips_comments_and_blank_lines() {
        let raw = "# header\n\nx = 1  # set x\n\n    y = 2\n";
        let lines = strip(raw);
        assert_eq!(texts(&lines), vec!["x = 1", "    y = 2"]);
        assert_eq!(lines[0].line, 3);
        assert_eq!(lines[1].line, 5);
        assert_eq!(lines[1].indent, 4);
    }

    #[test]
    fn test_hash_inside_string_is_kept() {
        let lines = strip("print(\"#1 item\")  # trailing\nc = '#'\n");
        assert_eq!(texts(&lines), vec!["print(\"#1 item\")", "c = '#'"]);
    }

    #[test]
    fn test_escaped_quote_does_not_close_string() {
        let lines = strip("s = \"say \\\" # still string\" # comment\n");
        assert_eq!(texts(&lines), vec!["s = \"say \\\" # still string\""]);
    }

    #[test]
    fn test_mixed_quotes() {
        assert_eq!(comment_start("x = \"it's\" # c"), Some(11));
        assert_eq!(comment_start("x = 'say \"hi\"'"), None);
    }

    #[test]
    fn test_indentation_is_not_doubled() {
        let lines = strip("for i in x:\n        deep()\n");
        assert_eq!(lines[1].indent, 8);
        assert_eq!(lines[1].text, "deep()");
    }

    #[test]
    fn test_crlf_input() {
        let lines = strip("a = 1\r\n  b = 2 # c\r\n");
        assert_eq!(texts(&lines), vec!["a = 1", "  b = 2"]);
    }
}
