//! Completion system for the groovysh REPL
//!
//! Completion works on an incomplete program: the statement lines buffered so
//! far plus the current line up to the cursor. Instead of parsing, it looks at
//! the last one or two tokens to decide what the user is typing, and recovers
//! from lexer failures that carry meaning (an unterminated string literal means
//! "complete a file name").
//!
//! # Architecture
//!
//! The completion system consists of several components:
//!
//! - **Tokenizer**: Feeds buffered lines and the cursor prefix to the lexer and
//!   turns the outcome into [`Tokenized`]
//! - **TokenStream**: The tokens up to the cursor, never empty
//! - **Context**: [`CompletionCase`], a fixed decision table over the last tokens
//! - **Provider**: Identifier completers and their aggregator
//! - **Members**: Member completion after a dot
//! - **Filename**: Path completion inside string literals
//! - **Engine**: Routes each case to its strategy and computes the offset
//!
//! # Examples
//!
//! ```
//! use groovysh_complete::repl::completion::{CompletionCase, Tokenized, tokenize};
//!
//! let Tokenized::Tokens(stream) = tokenize("foo.b", &[]) else {
//!     panic!("expected tokens");
//! };
//! assert_eq!(CompletionCase::classify(&stream), CompletionCase::PrefixAfterDot);
//! ```

mod context;
mod engine;
mod filename;
mod members;
mod provider;
mod token_stream;
mod tokenizer;

pub use context::CompletionCase;
pub use engine::CompletionEngine;
pub use filename::PathCompleter;
pub use members::CatalogMemberCompleter;
pub(crate) use members::number_type;
pub use provider::{
    CustomClassCompleter, IdentifierCompletion, ImportedClassCompleter, KeywordCompleter,
    VariableCompleter,
};
pub use token_stream::TokenStream;
pub use tokenizer::{LexFailure, Tokenized, tokenize, tokenize_with};

/// Completes a bare identifier.
///
/// Implementations append candidates for the last token of `tokens` and
/// return whether they appended anything.
pub trait IdentifierCompleter: Send + Sync {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool;
}

/// Completes the member after a dot.
///
/// The stream ends either with the dot or with the partial member name after
/// it. Returns the character offset in the current line where candidates are
/// inserted.
pub trait MemberCompleter: Send + Sync {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> Option<usize>;
}

/// Completes a file name.
///
/// `cursor` is a character offset into `text`; the returned offset is too.
pub trait FilenameCompleter: Send + Sync {
    fn complete(&self, text: &str, cursor: usize, candidates: &mut Vec<String>) -> Option<usize>;
}

/// The lines of the statement being typed, before the current line.
pub trait BufferedLines: Send + Sync {
    fn buffered_lines(&self) -> Vec<String>;
}
