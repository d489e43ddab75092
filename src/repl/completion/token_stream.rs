//! Token stream up to the cursor
//!
//! The last token is the one the cursor is at or just after. Everything the
//! completers need is read off the end of the stream.

use crate::parser::{Keyword, Token, TokenKind};

/// Non-empty, ordered tokens of the buffer up to the cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Wrap `tokens`; `None` when there are none.
    pub fn new(tokens: Vec<Token>) -> Option<Self> {
        if tokens.is_empty() {
            None
        } else {
            Some(Self { tokens })
        }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the stream has no tokens; never true for a constructed stream
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// The token at or just before the cursor
    pub fn last(&self) -> &Token {
        &self.tokens[self.tokens.len() - 1]
    }

    /// The token before [`last`](Self::last)
    pub fn previous(&self) -> Option<&Token> {
        self.tokens.len().checked_sub(2).map(|i| &self.tokens[i])
    }

    /// Partial word being completed: the last token's text if it is an
    /// identifier, otherwise empty.
    pub fn prefix(&self) -> &str {
        let last = self.last();
        if last.is_ident() { &last.text } else { "" }
    }

    /// Index of the member-access dot closest to the end: the last token or
    /// the one before it.
    pub fn dot_index(&self) -> Option<usize> {
        let len = self.tokens.len();
        if self.last().is_dot() {
            Some(len - 1)
        } else if self.last().is_ident() && self.previous().is_some_and(Token::is_dot) {
            Some(len - 2)
        } else {
            None
        }
    }

    /// Tokens of the expression a member is being selected from.
    ///
    /// Walks back from the dot over identifiers, literals, further dots,
    /// bracketed groups and calls. Empty when there is no dot or nothing
    /// usable before it.
    pub fn receiver_tokens(&self) -> &[Token] {
        let Some(end) = self.dot_index() else {
            return &[];
        };

        let tokens = &self.tokens[..end];
        let mut start = end;

        loop {
            let Some(token) = start.checked_sub(1).map(|i| &tokens[i]) else {
                break;
            };

            let group = match token.kind {
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    match matching_open(tokens, start - 1) {
                        Some(open) => {
                            start = open;
                            true
                        }
                        None => break,
                    }
                }
                TokenKind::StringCtorEnd => match matching_string_start(tokens, start - 1) {
                    Some(open) => {
                        start = open;
                        false
                    }
                    None => break,
                },
                TokenKind::Ident | TokenKind::Number | TokenKind::StringLiteral => {
                    start -= 1;
                    false
                }
                TokenKind::Keyword(Keyword::This | Keyword::Super | Keyword::Null) => {
                    start -= 1;
                    false
                }
                _ => break,
            };

            let Some(before) = start.checked_sub(1).map(|i| &tokens[i]) else {
                break;
            };

            if before.is_dot() {
                start -= 1;
                continue;
            }

            // calls, indexing and trailing closures: f(..), a[..], xs.each { .. }
            let applied = match tokens[start].kind {
                TokenKind::LBrace => matches!(before.kind, TokenKind::Ident | TokenKind::RParen),
                _ => matches!(
                    before.kind,
                    TokenKind::Ident | TokenKind::RParen | TokenKind::RBracket
                ),
            };
            if !(group && applied) {
                break;
            }
        }

        &tokens[start..]
    }

    /// Source-like text of the receiver, for logging.
    pub fn receiver_text(&self) -> String {
        self.receiver_tokens()
            .iter()
            .map(|t| t.text.as_str())
            .collect()
    }
}

/// Index of the opener matching the closer at `close`
fn matching_open(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=close).rev() {
        match tokens[i].kind {
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => depth += 1,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Index of the `StringCtorStart` matching the `StringCtorEnd` at `end`
fn matching_string_start(tokens: &[Token], end: usize) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..=end).rev() {
        match tokens[i].kind {
            TokenKind::StringCtorEnd => depth += 1,
            TokenKind::StringCtorStart => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
