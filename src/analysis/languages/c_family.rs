//! C/C++ structure analyzer driven by brace depth.
//!
//! Loops are tracked as a stack of frames. A frame opens on a `for`/`while`
//! token, waits for its parenthesized header to close, and then either
//! owns a braced body (closed by the matching `}`) or a single statement
//! (closed by the next top-level `;` not followed by `else`, or by a
//! braced statement finishing at the loop's own depth).

use lazy_static::lazy_static;
use regex::Regex;

use crate::analysis::{has_keyword, tokenize, Metrics, StructureAnalyzer, Token};
use crate::language::Language;
use crate::normalize::CleanedLine;

/// Return types that can start a function definition.
const TYPE_KEYWORDS: &[&str] = &["void", "int", "float", "double", "char", "bool"];
/// Lines mentioning any of these are never counted as variable declarations.
const BLOCK_KEYWORDS: &[&str] = &["for", "while", "if"];

lazy_static! {
    /// `[qualifiers] type [*] name [[n]] = value`, with a plain `=`.
    static ref DECLARATION: Regex = Regex::new(
        r"^(?:(?:const|static|unsigned|signed|long)\s+)*(?:int|float|double|char|bool|long|short|unsigned|auto)\b[\s*&]*[A-Za-z_]\w*\s*(?:\[[^\]]*\]\s*)?=(?:[^=]|$)"
    )
    .unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// Keyword seen, waiting for `(`.
    AwaitHeader,
    /// Inside the header; closes when parens return to `paren_base`.
    Header { paren_base: usize },
    /// Header closed, next token decides the body shape.
    AwaitBody,
    /// Body is a block whose contents sit at `body_depth`.
    Braced { body_depth: usize },
    /// Body is a single statement.
    Single,
}

#[derive(Debug, Clone, Copy)]
struct LoopFrame {
    /// Brace depth at the loop keyword.
    opened_at: usize,
    state: LoopState,
}

#[derive(Default)]
struct Walker {
    metrics: Metrics,
    frames: Vec<LoopFrame>,
    brace_depth: usize,
    paren_depth: usize,
}

impl Walker {
    fn step(&mut self, tokens: &[Token], i: usize) {
        let token = &tokens[i];

        if let Some(frame) = self.frames.last_mut() {
            if frame.state == LoopState::AwaitBody && !token.is_symbol('{') {
                frame.state = LoopState::Single;
            }
        }

        match token {
            Token::Symbol('{') => {
                self.brace_depth += 1;
                if let Some(frame) = self.frames.last_mut() {
                    if frame.state == LoopState::AwaitBody {
                        frame.state = LoopState::Braced {
                            body_depth: self.brace_depth,
                        };
                    }
                }
            }
            Token::Symbol('}') => {
                self.brace_depth = self.brace_depth.saturating_sub(1);
                let before_else = tokens.get(i + 1).is_some_and(|t| t.is_ident("else"));
                self.close_blocks(before_else);
            }
            Token::Symbol('(') => {
                if let Some(frame) = self.frames.last_mut() {
                    if frame.state == LoopState::AwaitHeader {
                        frame.state = LoopState::Header {
                            paren_base: self.paren_depth,
                        };
                    }
                }
                self.paren_depth += 1;
            }
            Token::Symbol(')') => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
                if let Some(frame) = self.frames.last_mut() {
                    if frame.state == (LoopState::Header {
                        paren_base: self.paren_depth,
                    }) {
                        frame.state = LoopState::AwaitBody;
                    }
                }
            }
            Token::Symbol(';') => {
                self.metrics.total_statements += 1;
                if self.paren_depth == 0 {
                    let before_else = tokens.get(i + 1).is_some_and(|t| t.is_ident("else"));
                    self.end_statement(before_else);
                }
            }
            Token::Ident(word) => match word.as_str() {
                "for" | "while" => {
                    self.frames.push(LoopFrame {
                        opened_at: self.brace_depth,
                        state: LoopState::AwaitHeader,
                    });
                    self.metrics.enter_loop(self.frames.len());
                }
                "if" | "else" => self.metrics.count_conditional(!self.frames.is_empty()),
                w if TYPE_KEYWORDS.contains(&w) => {
                    if is_function_definition(tokens, i) {
                        self.metrics.functions += 1;
                    }
                }
                _ => {}
            },
            _ => {}
        }
    }

    /// A top-level `;` finishes single-statement loop bodies at this depth,
    /// unless an `else` continues the statement.
    fn end_statement(&mut self, before_else: bool) {
        if before_else {
            return;
        }
        while matches!(
            self.frames.last(),
            Some(f) if f.state == LoopState::Single && f.opened_at >= self.brace_depth
        ) {
            self.frames.pop();
        }
    }

    /// Pop frames whose body ended with the `}` just consumed.
    fn close_blocks(&mut self, before_else: bool) {
        while let Some(frame) = self.frames.last() {
            let closed = match frame.state {
                LoopState::Braced { body_depth } => self.brace_depth < body_depth,
                LoopState::Single => {
                    frame.opened_at > self.brace_depth
                        || (frame.opened_at == self.brace_depth && !before_else)
                }
                _ => frame.opened_at > self.brace_depth,
            };
            if !closed {
                break;
            }
            self.frames.pop();
        }
    }
}

/// `type [*...] name ( ... ) {` starting at `start`.
fn is_function_definition(tokens: &[Token], start: usize) -> bool {
    let mut j = start + 1;
    while matches!(tokens.get(j), Some(t) if t.is_symbol('*')) {
        j += 1;
    }
    if !matches!(tokens.get(j), Some(Token::Ident(_))) {
        return false;
    }
    j += 1;
    if !matches!(tokens.get(j), Some(t) if t.is_symbol('(')) {
        return false;
    }

    let mut depth = 0usize;
    while let Some(t) = tokens.get(j) {
        if t.is_symbol('(') {
            depth += 1;
        } else if t.is_symbol(')') {
            depth -= 1;
        }
        j += 1;
        if depth == 0 {
            break;
        }
    }

    depth == 0 && matches!(tokens.get(j), Some(t) if t.is_symbol('{'))
}

/// Counts C and C++ structure from a token stream.
pub struct CFamilyAnalyzer;

impl CFamilyAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CFamilyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureAnalyzer for CFamilyAnalyzer {
    fn language_id(&self) -> &'static str {
        "c_family"
    }

    fn languages(&self) -> &'static [Language] {
        &[Language::C, Language::Cpp]
    }

    fn measure(&self, lines: &[CleanedLine]) -> Metrics {
        let tokens = tokenize(lines);
        let mut walker = Walker::default();
        for i in 0..tokens.len() {
            walker.step(&tokens, i);
        }

        let mut metrics = walker.metrics;
        metrics.total_lines = lines.len();
        metrics.variables = lines
            .iter()
            .map(|l| l.text.trim())
            .filter(|text| {
                text.contains(';') && !has_keyword(text, BLOCK_KEYWORDS) && DECLARATION.is_match(text)
            })
            .count();
        metrics
    }
}
