//! Lexing and shell-command parsing for groovysh
//!
//! Groovy source is never parsed into a tree here. Completion only needs a
//! token stream with positions, and the shell only needs to know whether a
//! statement is finished and what it declares.
//!
//! # Architecture
//!
//! - `token`: Token model (`Token`, `TokenKind`, `Keyword`)
//! - `lexer`: `GroovyLexer`, the `TokenSource` implementation
//! - `shell_commands`: Colon commands (`:help`, `:show`, ...) and the
//!   registry completion consults
//!
//! # Examples
//!
//! ```
//! use groovysh_complete::parser::{GroovyLexer, TokenKind};
//!
//! let tokens = GroovyLexer::tokenize("foo.b").unwrap();
//! assert_eq!(tokens[1].kind, TokenKind::Dot);
//! ```

mod lexer;
mod shell_commands;
mod token;

pub use lexer::{GroovyLexer, LexError, LexErrorKind, Position, TokenSource};
pub use shell_commands::{
    BuiltinCommands, CommandInfo, CommandRegistry, ShellCommand, ShellCommandParser, ShowTarget,
};
pub use token::{Keyword, Token, TokenKind};
