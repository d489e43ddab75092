//! Completion engine - routes a completion request to its strategy
//!
//! This module ties the completion components together: the command
//! short-circuit, tokenizing, classification and dispatch to identifier,
//! member or file name completion.

use std::sync::Arc;

use tracing::{debug, trace};

use super::context::CompletionCase;
use super::provider::IdentifierCompletion;
use super::tokenizer::{Tokenized, tokenize};
use super::{BufferedLines, FilenameCompleter, MemberCompleter};
use crate::parser::CommandRegistry;

/// Main completion engine
///
/// All offsets and cursors are character positions in the current line.
pub struct CompletionEngine {
    /// Commands whose lines are never completed as Groovy
    commands: Arc<dyn CommandRegistry + Send + Sync>,
    /// Earlier lines of the statement being typed
    buffer: Arc<dyn BufferedLines>,
    identifiers: IdentifierCompletion,
    members: Option<Arc<dyn MemberCompleter>>,
    filenames: Option<Arc<dyn FilenameCompleter>>,
}

impl CompletionEngine {
    /// Create a new completion engine
    ///
    /// # Arguments
    /// * `commands` - Registry consulted for command lines
    /// * `buffer` - Source of the buffered statement lines
    /// * `identifiers` - Providers for bare identifiers
    pub fn new(
        commands: Arc<dyn CommandRegistry + Send + Sync>,
        buffer: Arc<dyn BufferedLines>,
        identifiers: IdentifierCompletion,
    ) -> Self {
        Self {
            commands,
            buffer,
            identifiers,
            members: None,
            filenames: None,
        }
    }

    /// Complete members after a dot with `members`.
    pub fn with_members(mut self, members: Arc<dyn MemberCompleter>) -> Self {
        self.members = Some(members);
        self
    }

    /// Complete file names inside string literals with `filenames`.
    pub fn with_filenames(mut self, filenames: Arc<dyn FilenameCompleter>) -> Self {
        self.filenames = Some(filenames);
        self
    }

    /// Complete `buffer_line` at `cursor`
    ///
    /// # Arguments
    /// * `buffer_line` - The current input line
    /// * `cursor` - Cursor position (character index)
    /// * `candidates` - Receives the candidates, in provider order
    ///
    /// # Returns
    /// * `Option<usize>` - Where the candidates are inserted, or `None` when
    ///   there is nothing to complete
    pub fn complete(
        &self,
        buffer_line: &str,
        cursor: usize,
        candidates: &mut Vec<String>,
    ) -> Option<usize> {
        if buffer_line.is_empty() {
            return None;
        }

        if self.is_command_line(buffer_line) {
            debug!("Command line, not completing");
            return None;
        }

        let cursor = cursor.min(buffer_line.chars().count());
        let before_cursor: String = buffer_line.chars().take(cursor).collect();
        let prior = self.buffer.buffered_lines();

        let stream = match tokenize(&before_cursor, &prior) {
            Tokenized::Tokens(stream) => stream,
            Tokenized::InString { column } => {
                return self.complete_filename(buffer_line, column, cursor, candidates);
            }
            Tokenized::Failed(reason) => {
                debug!(%reason, "No completion");
                return None;
            }
        };

        trace!(tokens = ?stream.tokens(), "Token stream");

        let case = CompletionCase::classify(&stream);
        debug!(?case, last = %stream.last(), "Dispatching completion");

        match case {
            CompletionCase::NoCompletion => None,
            CompletionCase::NoDotPrefix => {
                if self.identifiers.complete(&stream, candidates) {
                    Some(stream.last().column - 1)
                } else {
                    None
                }
            }
            CompletionCase::DotLast | CompletionCase::PrefixAfterDot => match &self.members {
                Some(members) => members.complete(&stream, candidates),
                None => None,
            },
        }
    }

    /// The text up to the first space names a command or an alias
    fn is_command_line(&self, buffer_line: &str) -> bool {
        let Some((word, _)) = buffer_line.split_once(' ') else {
            return false;
        };
        self.commands
            .commands()
            .iter()
            .any(|command| command.matches(word))
    }

    /// Complete the text after the opening quote at `quote`. The completer
    /// gets the rest of the line and a cursor relative to it.
    fn complete_filename(
        &self,
        buffer_line: &str,
        quote: usize,
        cursor: usize,
        candidates: &mut Vec<String>,
    ) -> Option<usize> {
        let filenames = self.filenames.as_ref()?;
        let start = quote + 1;
        let text: String = buffer_line.chars().skip(start).collect();

        debug!(text = %text, start, "Completing file name in string literal");
        filenames
            .complete(&text, cursor.saturating_sub(start), candidates)
            .map(|local| start + local)
    }
}
