//! Declaration scanner for completed statements
//!
//! The shell does not evaluate Groovy, but completion still wants to know what
//! a session has declared. Each finished statement is tokenized and scanned
//! for top-level imports, variables, methods and type declarations.

use super::completion::number_type;
use crate::parser::{GroovyLexer, Keyword, Token, TokenKind};

/// Names a statement introduces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declarations {
    /// Import clauses as written, e.g. `java.time.LocalDate as LD`
    pub imports: Vec<String>,
    /// Variable names with their declared or inferred type
    pub variables: Vec<(String, Option<String>)>,
    pub methods: Vec<String>,
    pub classes: Vec<String>,
}

impl Declarations {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
            && self.variables.is_empty()
            && self.methods.is_empty()
            && self.classes.is_empty()
    }
}

/// Scan a complete statement. Input that does not tokenize declares nothing.
pub fn scan(source: &str) -> Declarations {
    let mut tokens = match GroovyLexer::tokenize(source) {
        Ok(tokens) => tokens,
        Err(e) => {
            tracing::debug!("Skipping declaration scan: {}", e);
            return Declarations::default();
        }
    };
    tokens.pop(); // EOF

    Scanner {
        tokens: &tokens,
        found: Declarations::default(),
    }
    .run()
}

struct Scanner<'a> {
    tokens: &'a [Token],
    found: Declarations,
}

impl Scanner<'_> {
    fn run(mut self) -> Declarations {
        let mut depth = 0usize;

        for i in 0..self.tokens.len() {
            match self.tokens[i].kind {
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }

            if depth == 0 && self.starts_statement(i) {
                self.statement_at(i);
            }
        }

        self.found
    }

    /// A statement starts at the beginning of input, after `;` or a closing
    /// brace, or on a new line.
    fn starts_statement(&self, i: usize) -> bool {
        if i == 0 {
            return true;
        }
        let prev = &self.tokens[i - 1];
        matches!(prev.kind, TokenKind::Semicolon | TokenKind::RBrace)
            || prev.line < self.tokens[i].line
    }

    fn kind(&self, i: usize) -> Option<TokenKind> {
        self.tokens.get(i).map(|t| t.kind)
    }

    fn statement_at(&mut self, mut i: usize) {
        while let Some(TokenKind::Keyword(kw)) = self.kind(i) {
            if is_modifier(kw) {
                i += 1;
            } else {
                break;
            }
        }

        let Some(kind) = self.kind(i) else {
            return;
        };

        match kind {
            TokenKind::Keyword(Keyword::Import) => self.import_at(i + 1),
            TokenKind::Keyword(
                Keyword::Class | Keyword::Interface | Keyword::Enum | Keyword::Trait,
            ) => {
                if let Some(name) = self.tokens.get(i + 1).filter(|t| t.is_ident()) {
                    self.found.classes.push(name.text.clone());
                }
            }
            TokenKind::Keyword(Keyword::Def) => self.declaration_at(i + 1, None),
            TokenKind::Keyword(kw) if kw.is_primitive_type() => {
                self.declaration_at(i + 1, Some(kw.as_str().to_string()))
            }
            TokenKind::Ident => {
                if let Some((ty, next)) = self.type_at(i) {
                    if self.kind(next) == Some(TokenKind::Ident) {
                        self.declaration_at(next, Some(ty));
                        return;
                    }
                }
                if self.is_assignment(i + 1) {
                    let ty = self.infer_type(i + 2);
                    self.found.variables.push((self.tokens[i].text.clone(), ty));
                }
            }
            _ => {}
        }
    }

    /// `import [static] a.b.C [.*] [as D]`
    fn import_at(&mut self, mut i: usize) {
        if self.kind(i) == Some(TokenKind::Keyword(Keyword::Static)) {
            i += 1;
        }

        let mut path = String::new();
        while let Some(token) = self.tokens.get(i) {
            let part = match token.kind {
                TokenKind::Ident | TokenKind::Dot => true,
                TokenKind::Operator => token.text == "*",
                _ => false,
            };
            if !part {
                break;
            }
            path.push_str(&token.text);
            i += 1;
        }

        if path.is_empty() || path.ends_with('.') {
            return;
        }

        if self.kind(i) == Some(TokenKind::Keyword(Keyword::As)) {
            if let Some(alias) = self.tokens.get(i + 1).filter(|t| t.is_ident()) {
                path = format!("{} as {}", path, alias.text);
            }
        }

        self.found.imports.push(path);
    }

    /// `name (` declares a method, `name [= value]` a variable.
    fn declaration_at(&mut self, i: usize, declared: Option<String>) {
        let Some(name) = self.tokens.get(i).filter(|t| t.is_ident()) else {
            return;
        };

        match self.kind(i + 1) {
            Some(TokenKind::LParen) => self.found.methods.push(name.text.clone()),
            _ => {
                let ty = declared.or_else(|| {
                    if self.is_assignment(i + 1) {
                        self.infer_type(i + 2)
                    } else {
                        None
                    }
                });
                self.found.variables.push((name.text.clone(), ty));
            }
        }
    }

    /// A type reference: a possibly qualified name whose last part is capitalized,
    /// with optional generic arguments and array brackets. Returns the type text
    /// and the index after it.
    fn type_at(&self, mut i: usize) -> Option<(String, usize)> {
        let mut text = self.tokens.get(i)?.text.clone();
        i += 1;

        while self.kind(i) == Some(TokenKind::Dot) && self.kind(i + 1) == Some(TokenKind::Ident) {
            text.push('.');
            text.push_str(&self.tokens[i + 1].text);
            i += 2;
        }

        let simple = text.rsplit('.').next().unwrap_or(&text);
        if !simple.starts_with(char::is_uppercase) {
            return None;
        }

        if self.tokens.get(i).is_some_and(|t| t.text == "<") {
            let mut open = 0i32;
            while let Some(token) = self.tokens.get(i) {
                match token.text.as_str() {
                    "<" => open += 1,
                    ">" => open -= 1,
                    ">>" => open -= 2,
                    ">>>" => open -= 3,
                    _ => {}
                }
                i += 1;
                if open <= 0 {
                    break;
                }
            }
        }

        while self.kind(i) == Some(TokenKind::LBracket)
            && self.kind(i + 1) == Some(TokenKind::RBracket)
        {
            text.push_str("[]");
            i += 2;
        }

        Some((text, i))
    }

    fn is_assignment(&self, i: usize) -> bool {
        self.tokens
            .get(i)
            .is_some_and(|t| t.kind == TokenKind::Operator && t.text == "=")
    }

    /// Type of a literal or constructor call on the right of `=`
    fn infer_type(&self, i: usize) -> Option<String> {
        let token = self.tokens.get(i)?;
        let ty = match token.kind {
            TokenKind::StringLiteral | TokenKind::StringCtorStart => "String",
            TokenKind::Number => number_type(&token.text),
            TokenKind::Keyword(Keyword::True | Keyword::False) => "Boolean",
            TokenKind::LBracket => {
                let map = self.kind(i + 1) == Some(TokenKind::Colon)
                    || self.kind(i + 2) == Some(TokenKind::Colon);
                if map { "Map" } else { "List" }
            }
            TokenKind::Keyword(Keyword::New) => {
                let (ty, _) = self.type_at(i + 1)?;
                return Some(ty);
            }
            _ => return None,
        };
        Some(ty.to_string())
    }
}

fn is_modifier(kw: Keyword) -> bool {
    matches!(
        kw,
        Keyword::Public
            | Keyword::Private
            | Keyword::Protected
            | Keyword::Static
            | Keyword::Final
            | Keyword::Abstract
            | Keyword::Synchronized
    )
}
