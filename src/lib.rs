//! Groovy Shell completion library
//!
//! This library provides the completion engine of an interactive Groovy shell
//! together with the shell around it. The engine can be used on its own by
//! any line editor that asks "what can follow the text before the cursor?".
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Groovy lexer and colon-command parsing
//! - `repl`: Interactive REPL and the completion engine
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use groovysh_complete::parser::BuiltinCommands;
//! use groovysh_complete::repl::SessionState;
//! use groovysh_complete::repl::completion::{
//!     CompletionEngine, IdentifierCompletion, KeywordCompleter,
//! };
//!
//! let session = SessionState::new();
//! let mut identifiers = IdentifierCompletion::default();
//! identifiers.push(Arc::new(KeywordCompleter::new()));
//!
//! let engine = CompletionEngine::new(
//!     Arc::new(BuiltinCommands::new()),
//!     Arc::new(session),
//!     identifiers,
//! );
//!
//! let mut candidates = Vec::new();
//! assert_eq!(engine.complete("x = whi", 7, &mut candidates), Some(4));
//! assert_eq!(candidates, vec!["while"]);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use config::Config;
pub use error::{GroovyshError, Result};
pub use repl::completion::{CompletionCase, CompletionEngine};
pub use repl::{GroovyCompleter, ReplEngine, SessionState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
