//! Python structure analyzer driven by indentation.

use crate::analysis::{has_keyword, split_assignment, Metrics, StructureAnalyzer};
use crate::language::Language;
use crate::normalize::CleanedLine;

const LOOP_KEYWORDS: &[&str] = &["for", "while"];
const CONDITIONAL_KEYWORDS: &[&str] = &["if", "elif", "else"];
/// Lines mentioning any of these are never counted as variable declarations.
const BLOCK_KEYWORDS: &[&str] = &["if", "elif", "else", "for", "while", "def"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Function,
    Loop,
    Conditional,
}

/// An open block and the indentation level of the line that opened it.
#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: FrameKind,
    level: usize,
}

/// Counts Python structure from indentation.
///
/// A block stays open until a line at the same or a shallower level appears.
/// Indentation is measured in whole units of `indent_width` spaces; any
/// remainder is dropped.
pub struct PythonAnalyzer {
    indent_width: usize,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self { indent_width: 4 }
    }

    fn level(&self, line: &CleanedLine) -> usize {
        line.indent / self.indent_width
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureAnalyzer for PythonAnalyzer {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::Python]
    }

    fn measure(&self, lines: &[CleanedLine]) -> Metrics {
        let mut metrics = Metrics::default();
        let mut stack: Vec<Frame> = Vec::new();
        let mut loop_depth = 0usize;

        for line in lines {
            let text = line.text.trim();
            if text.is_empty() {
                continue;
            }
            metrics.total_lines += 1;

            let level = self.level(line);
            while matches!(stack.last(), Some(top) if top.level >= level) {
                if let Some(Frame {
                    kind: FrameKind::Loop,
                    ..
                }) = stack.pop()
                {
                    loop_depth = loop_depth.saturating_sub(1);
                }
            }

            if text.starts_with("def ") || text.starts_with("async def ") {
                metrics.functions += 1;
                stack.push(Frame {
                    kind: FrameKind::Function,
                    level,
                });
                continue;
            }

            if has_keyword(text, LOOP_KEYWORDS) {
                loop_depth += 1;
                metrics.enter_loop(loop_depth);
                stack.push(Frame {
                    kind: FrameKind::Loop,
                    level,
                });
            }

            if has_keyword(text, CONDITIONAL_KEYWORDS) {
                metrics.count_conditional(loop_depth > 0);
                stack.push(Frame {
                    kind: FrameKind::Conditional,
                    level,
                });
            }

            if split_assignment(text).is_some() && !has_keyword(text, BLOCK_KEYWORDS) {
                metrics.variables += 1;
            }
        }

        metrics
    }
}
