//! Completion context classification
//!
//! Decides from the last one or two tokens what kind of completion applies.
//! There is no parse tree; the table below is the whole heuristic.
//!
//! | Last token | Condition | Case |
//! |---|---|---|
//! | identifier | only token | `NoDotPrefix` |
//! | identifier | after a dot, fewer than 3 tokens | `NoCompletion` |
//! | identifier | after a dot | `PrefixAfterDot` |
//! | identifier | after a declaration keyword | `NoCompletion` |
//! | identifier | after an identifier | `NoCompletion` |
//! | identifier | otherwise | `NoDotPrefix` |
//! | dot | only token | `NoCompletion` |
//! | dot | otherwise | `DotLast` |
//! | anything else | | `NoCompletion` |
//!
//! An identifier after another identifier (`foo bar`) is never completed, even
//! where Groovy's command syntax would make it an argument.

use tracing::trace;

use super::token_stream::TokenStream;
use crate::parser::TokenKind;

/// What kind of completion the token stream calls for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionCase {
    /// Nothing sensible to offer
    NoCompletion,
    /// The stream ends with a dot: `foo.`
    DotLast,
    /// The stream ends with a partial member name: `foo.ba`
    PrefixAfterDot,
    /// The stream ends with a bare identifier: `pri`
    NoDotPrefix,
}

impl CompletionCase {
    /// Classify a token stream. Pure and total.
    pub fn classify(tokens: &TokenStream) -> Self {
        let last = tokens.last();
        let len = tokens.len();

        let case = match last.kind {
            TokenKind::Ident => match tokens.previous() {
                None => Self::NoDotPrefix,
                Some(prev) if prev.is_dot() => {
                    if len < 3 {
                        Self::NoCompletion
                    } else {
                        Self::PrefixAfterDot
                    }
                }
                Some(prev) => match prev.kind {
                    TokenKind::Keyword(kw) if kw.suppresses_completion() => Self::NoCompletion,
                    TokenKind::Ident => Self::NoCompletion,
                    _ => Self::NoDotPrefix,
                },
            },
            kind if kind.is_dot() => {
                if len == 1 {
                    Self::NoCompletion
                } else {
                    Self::DotLast
                }
            }
            _ => Self::NoCompletion,
        };

        trace!(last = %last, len, ?case, "Classified completion context");
        case
    }
}
