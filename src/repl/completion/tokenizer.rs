//! Tokenizer adapter
//!
//! Runs the lexer over the buffered lines plus the current line up to the
//! cursor and classifies how it ended. A lexer error is not always a dead end:
//! an unterminated string that opens on the current line means the cursor is
//! inside a string literal, and that is reported as [`Tokenized::InString`].

use super::token_stream::TokenStream;
use crate::parser::{GroovyLexer, LexError, Token, TokenKind, TokenSource};

/// Why tokenizing produced nothing usable
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexFailure {
    /// The cursor sits on a line with no tokens after earlier lines that had
    /// some
    #[error("trailing blank line")]
    TrailingBlankLine,
    /// Nothing but whitespace and comments
    #[error("no tokens")]
    NoTokens,
    /// The lexer gave up somewhere other than an opening quote on the
    /// current line
    #[error(transparent)]
    Lexer(LexError),
}

/// Outcome of tokenizing the buffer up to the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tokenized {
    Tokens(TokenStream),
    /// The cursor is inside an unterminated string literal whose opening
    /// quote is at this 0-based character column of the current line
    InString { column: usize },
    Failed(LexFailure),
}

/// Tokenize `current_line` (already cut at the cursor) after `prior_lines`.
pub fn tokenize(current_line: &str, prior_lines: &[String]) -> Tokenized {
    let mut source = String::new();
    for line in prior_lines {
        source.push_str(line);
        source.push('\n');
    }
    source.push_str(current_line);

    tokenize_with(GroovyLexer::new(&source), current_line, prior_lines.len())
}

/// Drain `tokens` and classify the result. `current_line` must be the last
/// line fed to the source, preceded by `prior_count` lines.
pub fn tokenize_with<S: TokenSource>(
    mut tokens: S,
    current_line: &str,
    prior_count: usize,
) -> Tokenized {
    let mut collected: Vec<Token> = Vec::new();
    let mut open_strings = 0i64;

    loop {
        match tokens.next_token() {
            Ok(token) if token.kind == TokenKind::Eof => {
                if collected.last().is_some_and(|last| token.line > last.line) {
                    return Tokenized::Failed(LexFailure::TrailingBlankLine);
                }
                break;
            }
            Ok(token) => {
                match token.kind {
                    TokenKind::StringCtorStart => open_strings += 1,
                    TokenKind::StringCtorEnd => open_strings -= 1,
                    _ => {}
                }
                collected.push(token);
            }
            Err(e) => return recover(e, open_strings, current_line, prior_count),
        }
    }

    match TokenStream::new(collected) {
        Some(stream) => Tokenized::Tokens(stream),
        None => Tokenized::Failed(LexFailure::NoTokens),
    }
}

/// Turn a lexer error into `InString` when it points at an opening quote on
/// the current line outside any interpolated string.
fn recover(error: LexError, open_strings: i64, current_line: &str, prior_count: usize) -> Tokenized {
    if open_strings > 0 {
        return Tokenized::Failed(LexFailure::Lexer(error));
    }

    let Some(position) = error.position else {
        return Tokenized::Failed(LexFailure::Lexer(error));
    };

    let at_quote = position
        .column
        .checked_sub(1)
        .and_then(|i| current_line.chars().nth(i))
        .is_some_and(|c| c == '\'' || c == '"');

    if at_quote && position.line == prior_count + 1 {
        Tokenized::InString {
            column: position.column - 1,
        }
    } else {
        Tokenized::Failed(LexFailure::Lexer(error))
    }
}
