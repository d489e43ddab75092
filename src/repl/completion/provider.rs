//! Identifier completion providers
//!
//! Each provider completes the bare identifier at the end of the token stream
//! from one source of names. [`IdentifierCompletion`] runs all of them in order
//! and merges what they find.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use super::IdentifierCompleter;
use super::token_stream::TokenStream;
use crate::parser::Keyword;
use crate::repl::session::SessionState;

/// Script methods every Groovy script can call
const DEFAULT_METHODS: &[&str] = &["print(", "printf(", "println(", "sleep("];

/// Classes Groovy imports automatically from `java.lang`, `java.util`,
/// `java.io`, `java.math` and friends
const DEFAULT_CLASSES: &[&str] = &[
    "ArrayList",
    "Arrays",
    "BigDecimal",
    "BigInteger",
    "Boolean",
    "Byte",
    "Calendar",
    "Character",
    "Collections",
    "Date",
    "Double",
    "Exception",
    "File",
    "Float",
    "HashMap",
    "HashSet",
    "IllegalArgumentException",
    "IllegalStateException",
    "Integer",
    "LinkedHashMap",
    "LinkedList",
    "List",
    "Long",
    "Map",
    "Math",
    "Object",
    "Random",
    "Runnable",
    "RuntimeException",
    "Set",
    "Short",
    "String",
    "StringBuilder",
    "System",
    "Thread",
    "TreeMap",
    "TreeSet",
    "URL",
    "UUID",
];

/// Append the names in `names` that start with `prefix`, sorted and
/// deduplicated. Returns whether any were appended.
fn append_matching<I>(names: I, prefix: &str, candidates: &mut Vec<String>) -> bool
where
    I: IntoIterator<Item = String>,
{
    let matching: BTreeSet<String> = names
        .into_iter()
        .filter(|name| name.starts_with(prefix))
        .collect();

    let found = !matching.is_empty();
    candidates.extend(matching);
    found
}

/// Ordered set of identifier completers
#[derive(Clone, Default)]
pub struct IdentifierCompletion {
    providers: Vec<Arc<dyn IdentifierCompleter>>,
}

impl IdentifierCompletion {
    pub fn new(providers: Vec<Arc<dyn IdentifierCompleter>>) -> Self {
        Self { providers }
    }

    /// Register another provider after the existing ones.
    pub fn push(&mut self, provider: Arc<dyn IdentifierCompleter>) {
        self.providers.push(provider);
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Run every provider in registration order, even after one matched.
    pub fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        let mut matched = false;
        for provider in &self.providers {
            matched |= provider.complete(tokens, candidates);
        }
        debug!(
            prefix = tokens.prefix(),
            providers = self.providers.len(),
            matched,
            "Identifier completion"
        );
        matched
    }
}

impl IdentifierCompleter for IdentifierCompletion {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        IdentifierCompletion::complete(self, tokens, candidates)
    }
}

/// Language keywords and default script methods
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordCompleter;

impl KeywordCompleter {
    pub fn new() -> Self {
        Self
    }
}

impl IdentifierCompleter for KeywordCompleter {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        let names = Keyword::ALL
            .iter()
            .map(|kw| kw.as_str())
            .chain(DEFAULT_METHODS.iter().copied())
            .map(String::from);
        append_matching(names, tokens.prefix(), candidates)
    }
}

/// Variables and methods defined in the session. Methods complete with an
/// opening parenthesis.
#[derive(Debug, Clone)]
pub struct VariableCompleter {
    session: SessionState,
}

impl VariableCompleter {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }
}

impl IdentifierCompleter for VariableCompleter {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        let names = self
            .session
            .variables()
            .into_iter()
            .map(|(name, _)| name)
            .chain(
                self.session
                    .methods()
                    .into_iter()
                    .map(|name| format!("{}(", name)),
            );
        append_matching(names, tokens.prefix(), candidates)
    }
}

/// Simple names of imported classes plus the default imports
#[derive(Debug, Clone)]
pub struct ImportedClassCompleter {
    session: SessionState,
}

impl ImportedClassCompleter {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    /// Name an import clause makes available: the alias, or the last part of
    /// the path. Wildcard imports name nothing in particular.
    fn simple_name(import: &str) -> Option<&str> {
        if let Some((_, alias)) = import.split_once(" as ") {
            return Some(alias.trim());
        }
        match import.rsplit('.').next() {
            Some("*") | None => None,
            Some(name) => Some(name),
        }
    }
}

impl IdentifierCompleter for ImportedClassCompleter {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        let imports = self.session.imports();
        let names = imports
            .iter()
            .filter_map(|import| Self::simple_name(import))
            .chain(DEFAULT_CLASSES.iter().copied())
            .map(String::from)
            .collect::<Vec<_>>();
        append_matching(names, tokens.prefix(), candidates)
    }
}

/// Classes declared in the session
#[derive(Debug, Clone)]
pub struct CustomClassCompleter {
    session: SessionState,
}

impl CustomClassCompleter {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }
}

impl IdentifierCompleter for CustomClassCompleter {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
        append_matching(self.session.classes(), tokens.prefix(), candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::GroovyLexer;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn stream(input: &str) -> TokenStream {
        let mut tokens = GroovyLexer::tokenize(input).unwrap();
        tokens.pop();
        TokenStream::new(tokens).unwrap()
    }

    /// Appends fixed candidates and counts calls
    struct Fixed {
        names: Vec<&'static str>,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(names: Vec<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                names,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl IdentifierCompleter for Fixed {
        fn complete(&self, _tokens: &TokenStream, candidates: &mut Vec<String>) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            candidates.extend(self.names.iter().map(|n| n.to_string()));
            !self.names.is_empty()
        }
    }

    #[test]
    fn test_aggregator_runs_every_provider_in_order() {
        let first = Fixed::new(vec!["alpha"]);
        let second = Fixed::new(vec![]);
        let third = Fixed::new(vec!["beta", "alpha"]);
        let mut completion = IdentifierCompletion::default();
        completion.push(first.clone());
        completion.push(second.clone());
        completion.push(third.clone());

        let mut candidates = Vec::new();
        assert!(completion.complete(&stream("a"), &mut candidates));
        assert_eq!(candidates, vec!["alpha", "beta", "alpha"]);
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(second.calls.load(Ordering::SeqCst), 1);
        assert_eq!(third.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_aggregator_reports_no_match() {
        let mut completion = IdentifierCompletion::default();
        assert!(completion.is_empty());
        completion.push(Fixed::new(vec![]));
        assert_eq!(completion.len(), 1);

        let mut candidates = Vec::new();
        assert!(!completion.complete(&stream("zz"), &mut candidates));
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_keyword_completer() {
        let mut candidates = Vec::new();
        assert!(KeywordCompleter::new().complete(&stream("impor"), &mut candidates));
        assert_eq!(candidates, vec!["import"]);

        let mut candidates = Vec::new();
        assert!(KeywordCompleter::new().complete(&stream("print"), &mut candidates));
        assert_eq!(candidates, vec!["print(", "printf(", "println("]);

        let mut candidates = Vec::new();
        assert!(!KeywordCompleter::new().complete(&stream("xyz"), &mut candidates));
    }

    #[test]
    fn test_variable_completer() {
        let session = SessionState::new();
        session.record_statement("counter = 0\ndef count(xs) { xs.size() }\ndef other = 1");

        let mut candidates = Vec::new();
        let completer = VariableCompleter::new(session);
        assert!(completer.complete(&stream("x = cou"), &mut candidates));
        assert_eq!(candidates, vec!["count(", "counter"]);
    }

    #[test]
    fn test_imported_class_completer() {
        let session = SessionState::new();
        session.add_import("java.time.LocalDate");
        session.add_import("java.util.concurrent.*");
        session.add_import("java.time.LocalDateTime as LDT");

        let completer = ImportedClassCompleter::new(session);
        let mut candidates = Vec::new();
        assert!(completer.complete(&stream("Loc"), &mut candidates));
        assert_eq!(candidates, vec!["LocalDate"]);

        let mut candidates = Vec::new();
        assert!(completer.complete(&stream("LD"), &mut candidates));
        assert_eq!(candidates, vec!["LDT"]);

        let mut candidates = Vec::new();
        assert!(completer.complete(&stream("new Has"), &mut candidates));
        assert_eq!(candidates, vec!["HashMap", "HashSet"]);
    }

    #[test]
    fn test_simple_name() {
        assert_eq!(ImportedClassCompleter::simple_name("a.b.C"), Some("C"));
        assert_eq!(ImportedClassCompleter::simple_name("a.b.C as D"), Some("D"));
        assert_eq!(ImportedClassCompleter::simple_name("a.b.*"), None);
    }

    #[test]
    fn test_custom_class_completer() {
        let session = SessionState::new();
        session.record_statement("class Point {}\nenum Planet { EARTH }");

        let completer = CustomClassCompleter::new(session);
        let mut candidates = Vec::new();
        assert!(completer.complete(&stream("P"), &mut candidates));
        assert_eq!(candidates, vec!["Planet", "Point"]);
    }

    #[test]
    fn test_candidates_are_appended_not_replaced() {
        let mut candidates = vec!["existing".to_string()];
        KeywordCompleter::new().complete(&stream("whil"), &mut candidates);
        assert_eq!(candidates, vec!["existing", "while"]);
    }
}
