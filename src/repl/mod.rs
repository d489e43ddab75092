//! REPL (Read-Eval-Print Loop) for groovysh
//!
//! This module provides the interactive shell:
//! - Line editing, history and hints with reedline
//! - Syntax-aware completion of Groovy code (see [`completion`])
//! - Multi-line statements, buffered until they are complete
//! - Colon commands such as `:show`, `:purge` and `:import`
//! - A prompt counting the buffered lines
//!
//! Statements are not evaluated. A finished statement is scanned for the
//! imports, variables, methods and classes it declares, and those feed the
//! completers.

pub mod completion;
mod completer;
mod declarations;
mod engine;
mod hinter;
mod prompt;
mod session;
mod statement;

pub use completer::GroovyCompleter;
pub use declarations::{Declarations, scan};
pub use engine::{ReplAction, ReplEngine};
pub use hinter::GroovyHinter;
pub use prompt::GroovyPrompt;
pub use session::SessionState;
pub use statement::{Completeness, check};
