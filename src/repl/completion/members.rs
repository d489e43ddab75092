//! Member completion after a dot
//!
//! There is no running Groovy runtime to reflect on, so members come from a
//! fixed catalog of the JDK and GDK methods people reach for most. The
//! receiver's type is taken from its literal form or from what the session
//! recorded about the variable.

use std::collections::BTreeSet;

use tracing::debug;

use super::MemberCompleter;
use super::token_stream::TokenStream;
use crate::parser::{Token, TokenKind};
use crate::repl::session::SessionState;

/// Methods every object has, including the GDK additions
const OBJECT_MEMBERS: &[&str] = &[
    "asType(",
    "dump()",
    "equals(",
    "getClass()",
    "getProperties()",
    "hasProperty(",
    "hashCode()",
    "identity(",
    "inspect()",
    "invokeMethod(",
    "is(",
    "respondsTo(",
    "tap(",
    "toString()",
    "with(",
];

const STRING_MEMBERS: &[&str] = &[
    "capitalize()",
    "center(",
    "charAt(",
    "contains(",
    "eachLine(",
    "endsWith(",
    "equalsIgnoreCase(",
    "find(",
    "findAll(",
    "indexOf(",
    "isBlank()",
    "isEmpty()",
    "isNumber()",
    "lastIndexOf(",
    "length()",
    "matches(",
    "minus(",
    "multiply(",
    "padLeft(",
    "padRight(",
    "plus(",
    "readLines()",
    "replace(",
    "replaceAll(",
    "reverse()",
    "size()",
    "split(",
    "startsWith(",
    "strip()",
    "substring(",
    "toBigDecimal()",
    "toCharArray()",
    "toInteger()",
    "toList()",
    "toLong()",
    "toLowerCase()",
    "toUpperCase()",
    "tokenize(",
    "trim()",
    "uncapitalize()",
];

const LIST_MEMBERS: &[&str] = &[
    "add(",
    "addAll(",
    "any(",
    "clear()",
    "collect(",
    "contains(",
    "count(",
    "drop(",
    "each(",
    "eachWithIndex(",
    "every(",
    "find(",
    "findAll(",
    "first()",
    "flatten()",
    "get(",
    "groupBy(",
    "indexOf(",
    "inject(",
    "isEmpty()",
    "join(",
    "last()",
    "max()",
    "min()",
    "plus(",
    "remove(",
    "reverse()",
    "size()",
    "sort()",
    "sum()",
    "take(",
    "unique()",
    "withIndex()",
];

const MAP_MEMBERS: &[&str] = &[
    "any(",
    "clear()",
    "collect(",
    "containsKey(",
    "containsValue(",
    "each(",
    "entrySet()",
    "every(",
    "find(",
    "findAll(",
    "get(",
    "getOrDefault(",
    "groupBy(",
    "isEmpty()",
    "keySet()",
    "put(",
    "putAll(",
    "remove(",
    "size()",
    "sort(",
    "subMap(",
    "values()",
];

const NUMBER_MEMBERS: &[&str] = &[
    "abs()",
    "compareTo(",
    "doubleValue()",
    "downto(",
    "intValue()",
    "longValue()",
    "plus(",
    "power(",
    "step(",
    "times(",
    "toBigDecimal()",
    "toInteger()",
    "upto(",
];

/// Member completer backed by a built-in catalog
#[derive(Debug, Clone)]
pub struct CatalogMemberCompleter {
    session: SessionState,
}

impl CatalogMemberCompleter {
    pub fn new(session: SessionState) -> Self {
        Self { session }
    }

    /// Best guess at the type of the receiver expression
    fn resolve_type(&self, receiver: &[Token]) -> Option<String> {
        let first = receiver.first()?;
        let last = receiver.last()?;

        if receiver.len() == 1 {
            return match first.kind {
                TokenKind::StringLiteral => Some("String".to_string()),
                TokenKind::Number => Some(number_type(&first.text).to_string()),
                TokenKind::Ident if self.session.has_variable(&first.text) => Some(
                    self.session
                        .variable_type(&first.text)
                        .unwrap_or_else(|| "Object".to_string()),
                ),
                TokenKind::Ident if first.text.starts_with(char::is_uppercase) => {
                    Some("Class".to_string())
                }
                _ => None,
            };
        }

        match (first.kind, last.kind) {
            (TokenKind::StringCtorStart, TokenKind::StringCtorEnd) => Some("GString".to_string()),
            (TokenKind::LBracket, TokenKind::RBracket) => {
                if is_map_literal(receiver) {
                    Some("Map".to_string())
                } else {
                    Some("List".to_string())
                }
            }
            _ => None,
        }
    }

    fn members_of(ty: &str) -> impl Iterator<Item = &'static str> {
        let simple = ty.rsplit('.').next().unwrap_or(ty);
        let specific: &[&str] = if simple.ends_with("[]") {
            LIST_MEMBERS
        } else {
            match simple {
                "String" | "GString" | "CharSequence" => STRING_MEMBERS,
                "List" | "ArrayList" | "LinkedList" | "Collection" | "Set" | "HashSet"
                | "TreeSet" | "Iterable" => LIST_MEMBERS,
                "Map" | "HashMap" | "LinkedHashMap" | "TreeMap" => MAP_MEMBERS,
                "Integer" | "int" | "Long" | "long" | "Short" | "short" | "Byte" | "byte"
                | "BigInteger" | "BigDecimal" | "Double" | "double" | "Float" | "float"
                | "Number" => NUMBER_MEMBERS,
                _ => &[],
            }
        };
        specific.iter().chain(OBJECT_MEMBERS.iter()).copied()
    }
}

impl MemberCompleter for CatalogMemberCompleter {
    fn complete(&self, tokens: &TokenStream, candidates: &mut Vec<String>) -> Option<usize> {
        let last = tokens.last();
        let (prefix, offset) = if last.is_dot() {
            ("", last.column - 1 + last.text.chars().count())
        } else {
            (last.text.as_str(), last.column - 1)
        };

        let receiver = tokens.receiver_tokens();
        let Some(ty) = self.resolve_type(receiver) else {
            debug!(receiver = %tokens.receiver_text(), "Unknown receiver type");
            return None;
        };

        let matching: BTreeSet<&str> = Self::members_of(&ty)
            .filter(|member| member.starts_with(prefix))
            .collect();

        debug!(
            receiver = %tokens.receiver_text(),
            ty = %ty,
            prefix,
            matches = matching.len(),
            "Member completion"
        );

        if matching.is_empty() {
            return None;
        }

        candidates.extend(matching.into_iter().map(String::from));
        Some(offset)
    }
}

/// `Integer` or `BigDecimal` for a number literal; hex is always integral
pub(crate) fn number_type(text: &str) -> &'static str {
    let lower = text.to_ascii_lowercase();
    if !lower.starts_with("0x") && lower.contains(['.', 'e']) {
        "BigDecimal"
    } else {
        "Integer"
    }
}

/// `[:]` or a literal whose top-level elements are `key: value` pairs
fn is_map_literal(tokens: &[Token]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match token.kind {
            TokenKind::LBracket | TokenKind::LParen | TokenKind::LBrace => depth += 1,
            TokenKind::RBracket | TokenKind::RParen | TokenKind::RBrace => {
                depth = depth.saturating_sub(1)
            }
            TokenKind::Colon if depth == 1 => return true,
            _ => {}
        }
    }
    false
}
