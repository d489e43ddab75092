//! Groovy lexer for completion-time tokenization
//!
//! This lexer is fed the statement buffer up to the cursor, which is almost
//! always an incomplete program. It therefore distinguishes between input that
//! is merely unfinished (an open bracket, an open `${` interpolation) and
//! input it cannot tokenize (an unterminated string or comment, a stray
//! character). The latter are reported as positioned [`LexError`]s so callers
//! can tell "the cursor is inside a string literal" apart from real garbage.
//!
//! # Design Principles
//!
//! - **Never panic** - every failure is a `LexError` value
//! - **Positions are 1-based** - lines and columns count characters
//! - **Single pass** - tokens are produced on demand through [`TokenSource`]

use super::token::{Keyword, Token, TokenKind};

/// Operators recognized by longest match, grouped by length.
const OPERATORS_3: &[&str] = &[">>>", "<=>", "==~", "..<", "**=", "<<=", ">>=", "===", "!=="];
const OPERATORS_2: &[&str] = &[
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "->", "<<", ">>", "=~", "**", "?:", "..", ".&", ".@", "::",
];
const OPERATORS_1: &[&str] = &[
    "=", "+", "-", "*", "/", "%", "<", ">", "!", "&", "|", "^", "~", "?", "@",
];

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Why tokenization stopped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexErrorKind {
    /// A string literal reached a newline or the end of input before its
    /// closing quote
    #[error("unterminated string literal")]
    UnterminatedString,
    /// A `/* ... */` comment reached the end of input
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A character that cannot start any token
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    /// Failure inside a token source that could not locate itself
    #[error("lexer failure: {0}")]
    Internal(String),
}

/// Tokenization failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{}", position_suffix(.position))]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Where the offending token starts; `None` when the source cannot tell
    pub position: Option<Position>,
}

impl LexError {
    fn at(kind: LexErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            position: Some(Position { line, column }),
        }
    }

    /// An error that carries no position.
    pub fn unpositioned(message: impl Into<String>) -> Self {
        Self {
            kind: LexErrorKind::Internal(message.into()),
            position: None,
        }
    }
}

fn position_suffix(position: &Option<Position>) -> String {
    position
        .map(|pos| format!(" at {}:{}", pos.line, pos.column))
        .unwrap_or_default()
}

/// Anything that hands out tokens one at a time.
///
/// The end of input is a token of kind [`TokenKind::Eof`]; sources may keep
/// returning it once reached.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

/// An open `${ ... }` inside a double-quoted string
#[derive(Debug, Clone, Copy)]
struct Interpolation {
    /// Whether the surrounding string is `"""` delimited
    triple: bool,
    /// Unmatched `{` seen inside the interpolation
    depth: usize,
}

/// Groovy lexer
pub struct GroovyLexer {
    input: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
    interpolations: Vec<Interpolation>,
}

impl GroovyLexer {
    /// Create a new lexer from input string
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            interpolations: Vec::new(),
        }
    }

    /// Tokenize the entire input, EOF token included.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(input);
        let mut tokens = Vec::new();

        loop {
            let token = lexer.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Number of `${` interpolations currently open.
    pub fn open_interpolations(&self) -> usize {
        self.interpolations.len()
    }

    fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;

        let (line, column) = (self.line, self.column);
        let start = self.pos;

        if self.is_at_end() {
            return Ok(Token::new(TokenKind::Eof, "", line, column));
        }

        let ch = self.current_char();
        let simple = |lexer: &mut Self, kind: TokenKind, len: usize| {
            for _ in 0..len {
                lexer.advance();
            }
            Ok(Token::new(kind, lexer.text_from(start), line, column))
        };

        match ch {
            '.' if !matches!(self.peek_char(), '.' | '&' | '@') => simple(self, TokenKind::Dot, 1),
            '?' if self.peek_char() == '.' => simple(self, TokenKind::SafeDot, 2),
            '*' if self.peek_char() == '.' => simple(self, TokenKind::SpreadDot, 2),
            '(' => simple(self, TokenKind::LParen, 1),
            ')' => simple(self, TokenKind::RParen, 1),
            '[' => simple(self, TokenKind::LBracket, 1),
            ']' => simple(self, TokenKind::RBracket, 1),
            ',' => simple(self, TokenKind::Comma, 1),
            ';' => simple(self, TokenKind::Semicolon, 1),
            ':' if self.peek_char() != ':' => simple(self, TokenKind::Colon, 1),
            '{' => {
                if let Some(open) = self.interpolations.last_mut() {
                    open.depth += 1;
                }
                simple(self, TokenKind::LBrace, 1)
            }
            '}' => match self.interpolations.last().copied() {
                Some(open) if open.depth == 0 => {
                    self.interpolations.pop();
                    self.advance();
                    self.scan_string_body(open.triple, start, line, column, true)
                }
                Some(_) => {
                    if let Some(open) = self.interpolations.last_mut() {
                        open.depth -= 1;
                    }
                    simple(self, TokenKind::RBrace, 1)
                }
                None => simple(self, TokenKind::RBrace, 1),
            },
            '\'' => self.scan_single_quoted(start, line, column),
            '"' => self.scan_double_quoted(start, line, column),
            '0'..='9' => Ok(self.scan_number(start, line, column)),
            c if c.is_alphabetic() || c == '_' || c == '$' => {
                Ok(self.scan_identifier(start, line, column))
            }
            _ => self.scan_operator(start, line, column),
        }
    }

    /// Skip whitespace, comments and a leading shebang line
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_whitespace() {
                self.advance();
            } else if ch == '/' && self.peek_char() == '/' {
                self.skip_line();
            } else if ch == '#' && self.peek_char() == '!' && self.pos == 0 {
                self.skip_line();
            } else if ch == '/' && self.peek_char() == '*' {
                let (line, column) = (self.line, self.column);
                self.advance();
                self.advance();
                loop {
                    if self.is_at_end() {
                        return Err(LexError::at(LexErrorKind::UnterminatedComment, line, column));
                    }
                    if self.current_char() == '*' && self.peek_char() == '/' {
                        self.advance();
                        self.advance();
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    fn skip_line(&mut self) {
        while !self.is_at_end() && self.current_char() != '\n' {
            self.advance();
        }
    }

    /// Scan `'...'` or `'''...'''`
    fn scan_single_quoted(
        &mut self,
        start: usize,
        line: usize,
        column: usize,
    ) -> Result<Token, LexError> {
        let triple = self.starts_with("'''");
        let delimiter = if triple { "'''" } else { "'" };
        for _ in 0..delimiter.len() {
            self.advance();
        }

        loop {
            if self.is_at_end() || (!triple && self.current_char() == '\n') {
                return Err(LexError::at(LexErrorKind::UnterminatedString, line, column));
            }
            if self.current_char() == '\\' {
                self.advance();
                if !self.is_at_end() {
                    self.advance();
                }
                continue;
            }
            if self.starts_with(delimiter) {
                for _ in 0..delimiter.len() {
                    self.advance();
                }
                return Ok(Token::new(
                    TokenKind::StringLiteral,
                    self.text_from(start),
                    line,
                    column,
                ));
            }
            self.advance();
        }
    }

    /// Scan `"..."` or `"""..."""`, possibly interpolated
    fn scan_double_quoted(
        &mut self,
        start: usize,
        line: usize,
        column: usize,
    ) -> Result<Token, LexError> {
        let triple = self.starts_with("\"\"\"");
        let len = if triple { 3 } else { 1 };
        for _ in 0..len {
            self.advance();
        }
        self.scan_string_body(triple, start, line, column, false)
    }

    /// Scan the body of a double-quoted string up to its end or the next
    /// `${`. `resumed` is set when continuing after an interpolation.
    fn scan_string_body(
        &mut self,
        triple: bool,
        start: usize,
        line: usize,
        column: usize,
        resumed: bool,
    ) -> Result<Token, LexError> {
        let delimiter = if triple { "\"\"\"" } else { "\"" };

        loop {
            if self.is_at_end() || (!triple && self.current_char() == '\n') {
                return Err(LexError::at(LexErrorKind::UnterminatedString, line, column));
            }
            let ch = self.current_char();
            if ch == '\\' {
                self.advance();
                if !self.is_at_end() {
                    self.advance();
                }
                continue;
            }
            if ch == '$' && self.peek_char() == '{' {
                self.advance();
                self.advance();
                self.interpolations.push(Interpolation { triple, depth: 0 });
                let kind = if resumed {
                    TokenKind::StringCtorMiddle
                } else {
                    TokenKind::StringCtorStart
                };
                return Ok(Token::new(kind, self.text_from(start), line, column));
            }
            if self.starts_with(delimiter) {
                for _ in 0..delimiter.len() {
                    self.advance();
                }
                let kind = if resumed {
                    TokenKind::StringCtorEnd
                } else {
                    TokenKind::StringLiteral
                };
                return Ok(Token::new(kind, self.text_from(start), line, column));
            }
            self.advance();
        }
    }

    /// Scan a number: decimal, hex, fractional, exponent, type suffix
    fn scan_number(&mut self, start: usize, line: usize, column: usize) -> Token {
        if self.current_char() == '0' && matches!(self.peek_char(), 'x' | 'X') {
            self.advance();
            self.advance();
            while !self.is_at_end()
                && (self.current_char().is_ascii_hexdigit() || self.current_char() == '_')
            {
                self.advance();
            }
        } else {
            self.skip_digits();

            if self.current_char() == '.' && self.peek_char().is_ascii_digit() {
                self.advance();
                self.skip_digits();
            }

            if matches!(self.current_char(), 'e' | 'E') {
                let sign = matches!(self.peek_char(), '+' | '-');
                let digit_at = if sign { self.pos + 2 } else { self.pos + 1 };
                if self.char_at(digit_at).is_ascii_digit() {
                    self.advance();
                    if sign {
                        self.advance();
                    }
                    self.skip_digits();
                }
            }
        }

        if matches!(
            self.current_char(),
            'g' | 'G' | 'l' | 'L' | 'i' | 'I' | 'd' | 'D' | 'f' | 'F'
        ) {
            self.advance();
        }

        Token::new(TokenKind::Number, self.text_from(start), line, column)
    }

    fn skip_digits(&mut self) {
        while !self.is_at_end()
            && (self.current_char().is_ascii_digit() || self.current_char() == '_')
        {
            self.advance();
        }
    }

    /// Scan an identifier or keyword
    fn scan_identifier(&mut self, start: usize, line: usize, column: usize) -> Token {
        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' || ch == '$' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.text_from(start);
        let kind = match Keyword::lookup(&text) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident,
        };
        Token::new(kind, text, line, column)
    }

    /// Scan an operator by longest match
    fn scan_operator(&mut self, start: usize, line: usize, column: usize) -> Result<Token, LexError> {
        for table in [OPERATORS_3, OPERATORS_2, OPERATORS_1] {
            if let Some(op) = table.iter().find(|op| self.starts_with(op)) {
                for _ in 0..op.len() {
                    self.advance();
                }
                return Ok(Token::new(TokenKind::Operator, *op, line, column));
            }
        }

        Err(LexError::at(
            LexErrorKind::UnexpectedChar(self.current_char()),
            line,
            column,
        ))
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.char_at(self.pos + i) == c)
    }

    fn text_from(&self, start: usize) -> String {
        self.input[start..self.pos].iter().collect()
    }

    /// Get current character
    fn current_char(&self) -> char {
        self.char_at(self.pos)
    }

    /// Peek at next character
    fn peek_char(&self) -> char {
        self.char_at(self.pos + 1)
    }

    fn char_at(&self, index: usize) -> char {
        self.input.get(index).copied().unwrap_or('\0')
    }

    /// Advance position, tracking line and column
    fn advance(&mut self) {
        if self.is_at_end() {
            return;
        }
        if self.input[self.pos] == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }
}

impl TokenSource for GroovyLexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.scan()
    }
}
