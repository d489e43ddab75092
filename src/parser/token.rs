//! Token model shared by the lexer, the tokenizer adapter and the completers.

use std::fmt;

/// Groovy reserved words the lexer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Abstract,
    As,
    Assert,
    Boolean,
    Break,
    Byte,
    Case,
    Catch,
    Char,
    Class,
    Continue,
    Def,
    Default,
    Do,
    Double,
    Else,
    Enum,
    Extends,
    False,
    Final,
    Finally,
    Float,
    For,
    If,
    Implements,
    Import,
    In,
    Instanceof,
    Int,
    Interface,
    Long,
    New,
    Null,
    Package,
    Private,
    Protected,
    Public,
    Return,
    Short,
    Static,
    Super,
    Switch,
    Synchronized,
    This,
    Throw,
    Throws,
    Trait,
    True,
    Try,
    Void,
    While,
}

impl Keyword {
    /// Every keyword, in alphabetical order of its source text.
    pub const ALL: &'static [Keyword] = &[
        Keyword::Abstract,
        Keyword::As,
        Keyword::Assert,
        Keyword::Boolean,
        Keyword::Break,
        Keyword::Byte,
        Keyword::Case,
        Keyword::Catch,
        Keyword::Char,
        Keyword::Class,
        Keyword::Continue,
        Keyword::Def,
        Keyword::Default,
        Keyword::Do,
        Keyword::Double,
        Keyword::Else,
        Keyword::Enum,
        Keyword::Extends,
        Keyword::False,
        Keyword::Final,
        Keyword::Finally,
        Keyword::Float,
        Keyword::For,
        Keyword::If,
        Keyword::Implements,
        Keyword::Import,
        Keyword::In,
        Keyword::Instanceof,
        Keyword::Int,
        Keyword::Interface,
        Keyword::Long,
        Keyword::New,
        Keyword::Null,
        Keyword::Package,
        Keyword::Private,
        Keyword::Protected,
        Keyword::Public,
        Keyword::Return,
        Keyword::Short,
        Keyword::Static,
        Keyword::Super,
        Keyword::Switch,
        Keyword::Synchronized,
        Keyword::This,
        Keyword::Throw,
        Keyword::Throws,
        Keyword::Trait,
        Keyword::True,
        Keyword::Try,
        Keyword::Void,
        Keyword::While,
    ];

    /// Look up the keyword spelled by `word`, if any.
    pub fn lookup(word: &str) -> Option<Keyword> {
        Self::ALL.iter().copied().find(|kw| kw.as_str() == word)
    }

    /// Source text of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Abstract => "abstract",
            Keyword::As => "as",
            Keyword::Assert => "assert",
            Keyword::Boolean => "boolean",
            Keyword::Break => "break",
            Keyword::Byte => "byte",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Char => "char",
            Keyword::Class => "class",
            Keyword::Continue => "continue",
            Keyword::Def => "def",
            Keyword::Default => "default",
            Keyword::Do => "do",
            Keyword::Double => "double",
            Keyword::Else => "else",
            Keyword::Enum => "enum",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Final => "final",
            Keyword::Finally => "finally",
            Keyword::Float => "float",
            Keyword::For => "for",
            Keyword::If => "if",
            Keyword::Implements => "implements",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::Int => "int",
            Keyword::Interface => "interface",
            Keyword::Long => "long",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Package => "package",
            Keyword::Private => "private",
            Keyword::Protected => "protected",
            Keyword::Public => "public",
            Keyword::Return => "return",
            Keyword::Short => "short",
            Keyword::Static => "static",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::Synchronized => "synchronized",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::Throws => "throws",
            Keyword::Trait => "trait",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Void => "void",
            Keyword::While => "while",
        }
    }

    /// Whether an identifier following this keyword is a name being declared
    /// (or otherwise not a reference worth completing).
    pub fn suppresses_completion(self) -> bool {
        matches!(
            self,
            Keyword::Import
                | Keyword::Class
                | Keyword::Interface
                | Keyword::Enum
                | Keyword::Def
                | Keyword::Void
                | Keyword::Boolean
                | Keyword::Byte
                | Keyword::Char
                | Keyword::Short
                | Keyword::Int
                | Keyword::Float
                | Keyword::Long
                | Keyword::Double
                | Keyword::Package
                | Keyword::True
                | Keyword::False
                | Keyword::As
                | Keyword::This
                | Keyword::Try
                | Keyword::Finally
                | Keyword::Catch
        )
    }

    /// Primitive type names, usable as declaration types.
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Keyword::Void
                | Keyword::Boolean
                | Keyword::Byte
                | Keyword::Char
                | Keyword::Short
                | Keyword::Int
                | Keyword::Float
                | Keyword::Long
                | Keyword::Double
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types for Groovy source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier (variable, method, class name, ...)
    Ident,
    /// Reserved word
    Keyword(Keyword),
    /// `.`
    Dot,
    /// `?.`
    SafeDot,
    /// `*.`
    SpreadDot,
    /// Number literal
    Number,
    /// Complete string literal without interpolation
    StringLiteral,
    /// Opening part of an interpolated string, up to the first `${`
    StringCtorStart,
    /// Part of an interpolated string between two interpolations
    StringCtorMiddle,
    /// Closing part of an interpolated string
    StringCtorEnd,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// Any other operator; the token text holds the spelling
    Operator,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Whether this is one of the member-access dots.
    pub fn is_dot(self) -> bool {
        matches!(self, TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot)
    }
}

/// Token with position information.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// Check if this token is an identifier
    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }

    /// Check if this token is a member-access dot
    pub fn is_dot(&self) -> bool {
        self.kind.is_dot()
    }

    /// Get the keyword if this token is one
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} '{}' @{}:{}", self.kind, self.text, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_roundtrips_all() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(*kw));
        }
        assert_eq!(Keyword::lookup("foo"), None);
        assert_eq!(Keyword::lookup("Class"), None);
    }

    #[test]
    fn test_keyword_list_sorted() {
        let words: Vec<&str> = Keyword::ALL.iter().map(|k| k.as_str()).collect();
        let mut sorted = words.clone();
        sorted.sort();
        assert_eq!(words, sorted);
    }

    #[test]
    fn test_declaration_keywords_suppress() {
        for word in ["import", "class", "def", "int", "package", "catch", "this"] {
            let kw = Keyword::lookup(word).unwrap();
            assert!(kw.suppresses_completion(), "{word} should suppress");
        }
        for word in ["return", "new", "if", "in"] {
            let kw = Keyword::lookup(word).unwrap();
            assert!(!kw.suppresses_completion(), "{word} should not suppress");
        }
    }

    #[test]
    fn test_dot_kinds() {
        assert!(TokenKind::Dot.is_dot());
        assert!(TokenKind::SafeDot.is_dot());
        assert!(TokenKind::SpreadDot.is_dot());
        assert!(!TokenKind::Operator.is_dot());
    }
}
