//! Flat tokenizer for C-family code.
//!
//! Words are maximal runs of characters that are neither whitespace nor one
//! of the structural symbols, so `arr[i]` or `std::cout` come out as single
//! words. Comments are skipped again even though the normalizer has already
//! removed them.

use crate::normalize::CleanedLine;

/// Characters emitted as standalone [`Token::Symbol`]s.
pub const SYMBOLS: &str = "{}();=<>!&|+-*/%";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(String),
    /// A quoted string or char literal, delimiters included.
    Literal(String),
    Symbol(char),
}

impl Token {
    pub fn is_symbol(&self, c: char) -> bool {
        matches!(self, Token::Symbol(s) if *s == c)
    }

    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Token::Ident(s) if s == name)
    }
}

/// Tokenize cleaned lines, joined with newlines.
pub fn tokenize(lines: &[CleanedLine]) -> Vec<Token> {
    let source = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    tokenize_str(&source)
}

/// Tokenize a source string. Never fails; malformed input yields a
/// best-effort stream.
pub fn tokenize_str(source: &str) -> Vec<Token> {
    let chars: Vec<char> = source.chars().collect();
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match ch {
            '"' | '\'' => {
                flush_word(&mut word, &mut tokens);
                let end = literal_end(&chars, i);
                tokens.push(Token::Literal(chars[i..end].iter().collect()));
                i = end;
            }
            '/' if next == Some('/') => {
                flush_word(&mut word, &mut tokens);
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if next == Some('*') => {
                flush_word(&mut word, &mut tokens);
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            c if c.is_whitespace() => {
                flush_word(&mut word, &mut tokens);
                i += 1;
            }
            c if SYMBOLS.contains(c) => {
                flush_word(&mut word, &mut tokens);
                tokens.push(Token::Symbol(c));
                i += 1;
            }
            c => {
                word.push(c);
                i += 1;
            }
        }
    }
    flush_word(&mut word, &mut tokens);

    tokens
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    let text = std::mem::take(word);
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        tokens.push(Token::Number(text));
    } else {
        tokens.push(Token::Ident(text));
    }
}

/// Index just past the literal opening at `start`. Literals do not span
/// lines, so an unterminated one ends at the newline.
fn literal_end(chars: &[char], start: usize) -> usize {
    let quote = chars[start];
    let mut escaped = false;
    let mut i = start + 1;
    while i < chars.len() {
        let ch = chars[i];
        if ch == '\n' {
            return i;
        }
        i += 1;
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return i;
        }
    }
    i
}
