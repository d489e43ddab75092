//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion::{
    CatalogMemberCompleter, CompletionEngine, CustomClassCompleter, IdentifierCompleter,
    IdentifierCompletion, ImportedClassCompleter, KeywordCompleter, PathCompleter,
    VariableCompleter,
};
use super::session::SessionState;
use crate::config::CompletionConfig;
use crate::parser::BuiltinCommands;

/// Groovy completer for reedline
pub struct GroovyCompleter {
    /// Completion engine for syntax-aware suggestions
    completion_engine: CompletionEngine,
}

impl GroovyCompleter {
    /// Wrap an already assembled engine
    pub fn new(completion_engine: CompletionEngine) -> Self {
        Self { completion_engine }
    }

    /// Build the engine with the sources enabled in `config`
    ///
    /// Identifier providers run in a fixed order: keywords, session
    /// variables, imported classes, session classes.
    pub fn from_config(config: &CompletionConfig, session: SessionState) -> Self {
        let mut providers: Vec<Arc<dyn IdentifierCompleter>> = Vec::new();
        if config.keywords {
            providers.push(Arc::new(KeywordCompleter::new()));
        }
        if config.variables {
            providers.push(Arc::new(VariableCompleter::new(session.clone())));
        }
        if config.imports {
            providers.push(Arc::new(ImportedClassCompleter::new(session.clone())));
        }
        if config.custom_classes {
            providers.push(Arc::new(CustomClassCompleter::new(session.clone())));
        }

        let mut engine = CompletionEngine::new(
            Arc::new(BuiltinCommands::new()),
            Arc::new(session.clone()),
            IdentifierCompletion::new(providers),
        );
        if config.members {
            engine = engine.with_members(Arc::new(CatalogMemberCompleter::new(session)));
        }
        if config.filenames {
            engine = engine.with_filenames(Arc::new(PathCompleter::new(config.show_hidden_files)));
        }

        Self::new(engine)
    }
}

impl Completer for GroovyCompleter {
    /// Complete the input at the given cursor position
    ///
    /// reedline speaks byte offsets, the engine speaks characters.
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let pos = pos.min(line.len());
        let cursor = line
            .char_indices()
            .take_while(|(idx, _)| *idx < pos)
            .count();

        let mut candidates = Vec::new();
        let Some(start) = self.completion_engine.complete(line, cursor, &mut candidates) else {
            return Vec::new();
        };

        let start = line
            .char_indices()
            .nth(start)
            .map(|(idx, _)| idx)
            .unwrap_or(line.len())
            .min(pos);

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                span: Span::new(start, pos),
                append_whitespace: false,
                ..Suggestion::default()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_completer() -> (GroovyCompleter, SessionState) {
        let session = SessionState::new();
        let completer = GroovyCompleter::from_config(&CompletionConfig::default(), session.clone());
        (completer, session)
    }

    fn values(suggestions: &[Suggestion]) -> Vec<&str> {
        suggestions.iter().map(|s| s.value.as_str()).collect()
    }

    #[test]
    fn test_complete_keyword() {
        let (mut completer, _) = create_test_completer();
        let suggestions = completer.complete("whi", 3);

        assert_eq!(values(&suggestions), vec!["while"]);
        assert_eq!(suggestions[0].span, Span::new(0, 3));
        assert!(!suggestions[0].append_whitespace);
    }

    #[test]
    fn test_complete_member_span() {
        let (mut completer, session) = create_test_completer();
        session.record_statement("def name = 'groovy'");

        let suggestions = completer.complete("name.toUpp", 10);
        assert_eq!(values(&suggestions), vec!["toUpperCase()"]);
        assert_eq!(suggestions[0].span, Span::new(5, 10));
    }

    #[test]
    fn test_complete_after_multibyte_text() {
        let (mut completer, _) = create_test_completer();
        let line = "'é'.len";
        let suggestions = completer.complete(line, line.len());

        assert_eq!(values(&suggestions), vec!["length()"]);
        assert_eq!(suggestions[0].span, Span::new(5, line.len()));
    }

    #[test]
    fn test_command_line_not_completed() {
        let (mut completer, _) = create_test_completer();
        assert!(completer.complete(":show va", 8).is_empty());
    }

    #[test]
    fn test_disabled_sources() {
        let config = CompletionConfig {
            keywords: false,
            members: false,
            ..CompletionConfig::default()
        };
        let mut completer = GroovyCompleter::from_config(&config, SessionState::new());

        assert!(completer.complete("whi", 3).is_empty());
        assert!(completer.complete("'abc'.toU", 9).is_empty());
    }

    #[test]
    fn test_session_sources_are_live() {
        let (mut completer, session) = create_test_completer();
        assert!(completer.complete("coun", 4).is_empty());

        session.record_statement("counter = 1");
        assert_eq!(values(&completer.complete("coun", 4)), vec!["counter"]);
    }

    #[test]
    fn test_keywords_come_before_variables() {
        let (mut completer, session) = create_test_completer();
        session.record_statement("fox = 1");

        let suggestions = completer.complete("fo", 2);
        let found = values(&suggestions);
        let keyword = found.iter().position(|v| *v == "for");
        let variable = found.iter().position(|v| *v == "fox");
        assert!(keyword.is_some() && variable.is_some());
        assert!(keyword < variable);
    }
}
