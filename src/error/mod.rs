//! Error handling for groovysh-complete.
//!
//! Completion itself never fails with an error: lexer failures, ambiguous
//! contexts and missing candidates are all expressed as values (see
//! [`crate::repl::completion`]). The types here cover everything around the
//! engine: configuration loading, shell command parsing, terminal I/O.
//!
//! # Example
//!
//! ```rust,no_run
//! use groovysh_complete::error::{ConfigError, GroovyshError, Result};
//!
//! fn check_history(max_size: usize) -> Result<()> {
//!     if max_size == 0 {
//!         return Err(ConfigError::InvalidValue {
//!             field: "history.max_size".into(),
//!             value: max_size.to_string(),
//!         }
//!         .into());
//!     }
//!     Ok(())
//! }
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{ConfigError, GroovyshError, ParseError, Result};
