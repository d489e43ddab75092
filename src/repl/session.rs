use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;

use super::completion::BufferedLines;
use super::declarations;
use crate::parser::ShowTarget;

/// Shared state between the REPL loop and the completers.
///
/// The loop writes to it between reads; completion only reads.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// Lines of the statement being typed, before the current one
    buffer: Arc<RwLock<Vec<String>>>,

    /// Import clauses, e.g. `java.util.concurrent.*`
    imports: Arc<RwLock<BTreeSet<String>>>,

    /// Variable names and their known type
    variables: Arc<RwLock<BTreeMap<String, Option<String>>>>,

    /// Script method names
    methods: Arc<RwLock<BTreeSet<String>>>,

    /// Classes, interfaces, enums and traits declared in the session
    classes: Arc<RwLock<BTreeSet<String>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line to the pending statement.
    pub fn push_line(&self, line: &str) {
        self.buffer.write().push(line.to_string());
    }

    /// Number of buffered lines.
    pub fn buffer_len(&self) -> usize {
        self.buffer.read().len()
    }

    pub fn clear_buffer(&self) {
        self.buffer.write().clear();
    }

    /// Join the buffered lines and the current line into one statement.
    pub fn statement_with(&self, current: &str) -> String {
        let buffer = self.buffer.read();
        let mut statement = String::new();
        for line in buffer.iter() {
            statement.push_str(line);
            statement.push('\n');
        }
        statement.push_str(current);
        statement
    }

    /// Record what a finished statement declares.
    pub fn record_statement(&self, source: &str) {
        let found = declarations::scan(source);
        if found.is_empty() {
            return;
        }

        tracing::debug!(
            imports = found.imports.len(),
            variables = found.variables.len(),
            methods = found.methods.len(),
            classes = found.classes.len(),
            "Recorded declarations"
        );

        self.imports.write().extend(found.imports);

        {
            let mut variables = self.variables.write();
            for (name, ty) in found.variables {
                match ty {
                    Some(ty) => {
                        variables.insert(name, Some(ty));
                    }
                    None => {
                        variables.entry(name).or_insert(None);
                    }
                }
            }
        }

        self.methods.write().extend(found.methods);
        self.classes.write().extend(found.classes);
    }

    /// Add an import clause directly, as `:import` does.
    pub fn add_import(&self, import: &str) {
        self.imports.write().insert(import.trim().to_string());
    }

    pub fn imports(&self) -> Vec<String> {
        self.imports.read().iter().cloned().collect()
    }

    /// Variables with their known types, sorted by name.
    pub fn variables(&self) -> Vec<(String, Option<String>)> {
        self.variables
            .read()
            .iter()
            .map(|(name, ty)| (name.clone(), ty.clone()))
            .collect()
    }

    /// Declared or inferred type of a variable.
    pub fn variable_type(&self, name: &str) -> Option<String> {
        self.variables.read().get(name).cloned().flatten()
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.variables.read().contains_key(name)
    }

    pub fn methods(&self) -> Vec<String> {
        self.methods.read().iter().cloned().collect()
    }

    pub fn classes(&self) -> Vec<String> {
        self.classes.read().iter().cloned().collect()
    }

    /// Forget what `target` names.
    pub fn purge(&self, target: ShowTarget) {
        match target {
            ShowTarget::Variables => self.variables.write().clear(),
            ShowTarget::Methods => self.methods.write().clear(),
            ShowTarget::Classes => self.classes.write().clear(),
            ShowTarget::Imports => self.imports.write().clear(),
            ShowTarget::Preferences => {}
            ShowTarget::All => {
                self.variables.write().clear();
                self.methods.write().clear();
                self.classes.write().clear();
                self.imports.write().clear();
            }
        }
    }
}

impl BufferedLines for SessionState {
    fn buffered_lines(&self) -> Vec<String> {
        self.buffer.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_lines() {
        let session = SessionState::new();
        assert_eq!(session.buffer_len(), 0);

        session.push_line("def f() {");
        session.push_line("  1");
        assert_eq!(session.buffered_lines(), vec!["def f() {", "  1"]);
        assert_eq!(session.statement_with("}"), "def f() {\n  1\n}");

        session.clear_buffer();
        assert!(session.buffered_lines().is_empty());
        assert_eq!(session.statement_with("x"), "x");
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionState::new();
        let view = session.clone();
        session.push_line("[1,");
        assert_eq!(view.buffer_len(), 1);
    }

    #[test]
    fn test_record_statement() {
        let session = SessionState::new();
        session.record_statement("import java.time.LocalDate\ndef today = new LocalDate()");
        session.record_statement("def greet(n) { n }\nclass Point {}");

        assert_eq!(session.imports(), vec!["java.time.LocalDate"]);
        assert_eq!(session.variable_type("today"), Some("LocalDate".to_string()));
        assert_eq!(session.methods(), vec!["greet"]);
        assert_eq!(session.classes(), vec!["Point"]);
    }

    #[test]
    fn test_untyped_reassignment_keeps_type() {
        let session = SessionState::new();
        session.record_statement("s = 'abc'");
        session.record_statement("s = foo()");
        assert_eq!(session.variable_type("s"), Some("String".to_string()));

        session.record_statement("s = [1]");
        assert_eq!(session.variable_type("s"), Some("List".to_string()));
    }

    #[test]
    fn test_purge() {
        let session = SessionState::new();
        session.record_statement("x = 1; def f() {}");
        session.add_import("java.util.regex.*");

        session.purge(ShowTarget::Variables);
        assert!(!session.has_variable("x"));
        assert_eq!(session.methods(), vec!["f"]);

        session.purge(ShowTarget::All);
        assert!(session.methods().is_empty());
        assert!(session.imports().is_empty());
    }
}
