//! Statement completeness
//!
//! The shell reads Groovy one line at a time and buffers lines until the
//! statement they form is finished. A statement is unfinished while a block
//! comment, a triple-quoted string or a `${` interpolation is still open, while
//! brackets are unbalanced, or while it ends in something that needs a
//! right-hand side.

use crate::parser::{GroovyLexer, LexError, LexErrorKind, TokenKind, TokenSource};

/// Whether `source` is a finished statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completeness {
    Complete,
    Incomplete,
}

/// Check whether `source` can be run as is.
///
/// Input the lexer rejects for other reasons counts as complete, so the
/// error surfaces instead of the shell waiting for more lines.
pub fn check(source: &str) -> Completeness {
    if source.trim().is_empty() {
        return Completeness::Complete;
    }

    let mut lexer = GroovyLexer::new(source);
    let mut open = 0i64;
    let mut last = None;

    loop {
        let token = match lexer.next_token() {
            Ok(token) => token,
            Err(e) if can_continue(source, &e) => return Completeness::Incomplete,
            Err(_) => return Completeness::Complete,
        };

        match token.kind {
            TokenKind::Eof => break,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => open += 1,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => open -= 1,
            _ => {}
        }
        last = Some(token);
    }

    if lexer.open_interpolations() > 0 || open > 0 {
        return Completeness::Incomplete;
    }

    let dangling = last.is_some_and(|token| match token.kind {
        TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot | TokenKind::Comma => true,
        TokenKind::Operator => !matches!(token.text.as_str(), "++" | "--"),
        _ => false,
    });

    if dangling {
        Completeness::Incomplete
    } else {
        Completeness::Complete
    }
}

/// Only block comments and triple-quoted strings may span lines; any other
/// lexer error is final.
fn can_continue(source: &str, error: &LexError) -> bool {
    match error.kind {
        LexErrorKind::UnterminatedComment => true,
        LexErrorKind::UnterminatedString => error.position.is_some_and(|pos| {
            source
                .lines()
                .nth(pos.line - 1)
                .map(|line| line.chars().skip(pos.column - 1).collect::<String>())
                .is_some_and(|rest| rest.starts_with("'''") || rest.starts_with("\"\"\""))
        }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(check(""), Completeness::Complete);
        assert_eq!(check("   "), Completeness::Complete);
    }

    #[test]
    fn test_simple_statements() {
        assert_eq!(check("println 'hi'"), Completeness::Complete);
        assert_eq!(check("x = [1, 2].collect { it * 2 }"), Completeness::Complete);
        assert_eq!(check("i++"), Completeness::Complete);
    }

    #[test]
    fn test_unbalanced_brackets() {
        assert_eq!(check("def f() {"), Completeness::Incomplete);
        assert_eq!(check("foo(1,\n2"), Completeness::Incomplete);
        assert_eq!(check("def f() {\n  1\n}"), Completeness::Complete);
    }

    #[test]
    fn test_brackets_inside_strings_ignored() {
        assert_eq!(check("println '{'"), Completeness::Complete);
        assert_eq!(check("println \"(${x})\""), Completeness::Complete);
    }

    #[test]
    fn test_open_strings_and_comments() {
        assert_eq!(check("x = '''abc"), Completeness::Incomplete);
        assert_eq!(check("/* note"), Completeness::Incomplete);
        assert_eq!(check("\"${ foo"), Completeness::Incomplete);
        assert_eq!(check("s = \"\"\"multi\nline"), Completeness::Incomplete);
    }

    #[test]
    fn test_single_line_string_cannot_continue() {
        assert_eq!(check("x = 'abc"), Completeness::Complete);
        assert_eq!(check("x = \"abc"), Completeness::Complete);
    }

    #[test]
    fn test_dangling_tokens() {
        assert_eq!(check("x = "), Completeness::Incomplete);
        assert_eq!(check("list."), Completeness::Incomplete);
        assert_eq!(check("[1,"), Completeness::Incomplete);
    }

    #[test]
    fn test_invalid_input_is_complete() {
        assert_eq!(check("a ` b"), Completeness::Complete);
    }
}
