//! Shell command parser
//!
//! This module handles parsing of groovysh colon commands like:
//! - :help [command], :exit
//! - :show variables, :purge all
//! - :import java.util.concurrent.*
//!
//! These commands aren't Groovy, so they're parsed with simple string matching.
//! The same table backs [`BuiltinCommands`], which completion consults to stay
//! out of command lines.

use std::collections::BTreeSet;

use crate::error::{ParseError, Result};

/// A command name and its aliases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub aliases: BTreeSet<String>,
}

impl CommandInfo {
    /// Whether `word` is this command's name or one of its aliases.
    pub fn matches(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(word)
    }
}

/// Source of the commands the shell understands.
pub trait CommandRegistry {
    fn commands(&self) -> Vec<CommandInfo>;
}

/// What `:show` and `:purge` operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTarget {
    Variables,
    Methods,
    Classes,
    Imports,
    Preferences,
    All,
}

impl ShowTarget {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "variables" | "vars" => Some(Self::Variables),
            "methods" => Some(Self::Methods),
            "classes" => Some(Self::Classes),
            "imports" => Some(Self::Imports),
            "preferences" | "prefs" => Some(Self::Preferences),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// A parsed colon command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Help(Option<String>),
    Exit,
    Display,
    Clear,
    Show(ShowTarget),
    Purge(ShowTarget),
    Import(String),
}

struct Builtin {
    name: &'static str,
    aliases: &'static [&'static str],
    usage: &'static str,
    description: &'static str,
}

const BUILTINS: &[Builtin] = &[
    Builtin {
        name: ":help",
        aliases: &[":h", ":?"],
        usage: ":help [command]",
        description: "Display this help message",
    },
    Builtin {
        name: ":exit",
        aliases: &[":x", ":q"],
        usage: ":exit",
        description: "Exit the shell",
    },
    Builtin {
        name: ":display",
        aliases: &[":d"],
        usage: ":display",
        description: "Display the current buffer",
    },
    Builtin {
        name: ":clear",
        aliases: &[":c"],
        usage: ":clear",
        description: "Clear the buffer",
    },
    Builtin {
        name: ":show",
        aliases: &[":S"],
        usage: ":show [variables|methods|classes|imports|preferences|all]",
        description: "Show variables, methods, classes or imports",
    },
    Builtin {
        name: ":purge",
        aliases: &[":p"],
        usage: ":purge [variables|methods|classes|imports|preferences|all]",
        description: "Purge variables, methods, classes or imports",
    },
    Builtin {
        name: ":import",
        aliases: &[":i"],
        usage: ":import <name>",
        description: "Import a class into the namespace",
    },
];

/// The built-in command table
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCommands;

impl BuiltinCommands {
    pub fn new() -> Self {
        Self
    }

    /// Render help for every command, or usage for one.
    pub fn help_text(topic: Option<&str>) -> String {
        if let Some(topic) = topic {
            return match Self::find(topic) {
                Some(cmd) => format!("usage: {}\n\n{}", cmd.usage, cmd.description),
                None => format!("No such command: {}", topic),
            };
        }

        let mut text = String::from("Available commands:\n");
        for cmd in BUILTINS {
            let aliases = cmd.aliases.join(", ");
            text.push_str(&format!(
                "  {:<10} ({:<8})  {}\n",
                cmd.name, aliases, cmd.description
            ));
        }
        text.push_str("\nFor help on a specific command type:\n    :help <command>");
        text
    }

    fn find(word: &str) -> Option<&'static Builtin> {
        let word = if word.starts_with(':') {
            word.to_string()
        } else {
            format!(":{}", word)
        };
        BUILTINS
            .iter()
            .find(|cmd| cmd.name == word || cmd.aliases.contains(&word.as_str()))
    }
}

impl CommandRegistry for BuiltinCommands {
    fn commands(&self) -> Vec<CommandInfo> {
        BUILTINS
            .iter()
            .map(|cmd| CommandInfo {
                name: cmd.name.to_string(),
                aliases: cmd.aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect()
    }
}

/// Parser for shell-specific commands
pub struct ShellCommandParser;

impl ShellCommandParser {
    /// Check if input is a shell command
    pub fn is_shell_command(input: &str) -> bool {
        input.trim_start().starts_with(':')
    }

    /// Parse a shell command
    pub fn parse(input: &str) -> Result<ShellCommand> {
        let trimmed = input.trim();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };

        let cmd = BUILTINS
            .iter()
            .find(|cmd| cmd.name == word || cmd.aliases.contains(&word))
            .ok_or_else(|| ParseError::UnknownCommand(word.to_string()))?;

        match cmd.name {
            ":help" => Ok(ShellCommand::Help(
                Some(rest).filter(|s| !s.is_empty()).map(String::from),
            )),
            ":exit" => Ok(ShellCommand::Exit),
            ":display" => Ok(ShellCommand::Display),
            ":clear" => Ok(ShellCommand::Clear),
            ":show" => Self::parse_target(cmd.name, rest).map(ShellCommand::Show),
            ":purge" => Self::parse_target(cmd.name, rest).map(ShellCommand::Purge),
            ":import" => Self::parse_import(rest),
            other => Err(ParseError::UnknownCommand(other.to_string()).into()),
        }
    }

    fn parse_target(command: &str, rest: &str) -> Result<ShowTarget> {
        if rest.is_empty() {
            return Err(ParseError::MissingArgument {
                command: command.to_string(),
                argument: "variables|methods|classes|imports|preferences|all".to_string(),
            }
            .into());
        }

        ShowTarget::parse(rest).ok_or_else(|| {
            ParseError::InvalidCommand(format!("Unknown target for {}: {}", command, rest)).into()
        })
    }

    /// Parse the argument of `:import`
    fn parse_import(rest: &str) -> Result<ShellCommand> {
        let name = rest.strip_prefix("static ").map(str::trim).unwrap_or(rest);

        if name.is_empty() {
            return Err(ParseError::MissingArgument {
                command: ":import".to_string(),
                argument: "name".to_string(),
            }
            .into());
        }

        if !Self::is_valid_import(name) {
            return Err(
                ParseError::InvalidCommand(format!("Invalid import: {}", name)).into(),
            );
        }

        Ok(ShellCommand::Import(rest.to_string()))
    }

    /// Validate a dotted import name, optionally ending in `.*` or `as Alias`
    fn is_valid_import(name: &str) -> bool {
        let path = match name.split_once(" as ") {
            Some((path, alias)) => {
                if !Self::is_java_identifier(alias.trim()) {
                    return false;
                }
                path.trim()
            }
            None => name,
        };

        let path = path.strip_suffix(".*").unwrap_or(path);
        !path.is_empty() && path.split('.').all(Self::is_java_identifier)
    }

    fn is_java_identifier(part: &str) -> bool {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {
                chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroovyshError;

    #[test]
    fn test_is_shell_command() {
        assert!(ShellCommandParser::is_shell_command(":help"));
        assert!(ShellCommandParser::is_shell_command("  :show all"));
        assert!(!ShellCommandParser::is_shell_command("println 'hi'"));
        assert!(!ShellCommandParser::is_shell_command("[a: 1]"));
    }

    #[test]
    fn test_parse_exit() {
        for input in [":exit", ":x", ":q"] {
            assert_eq!(ShellCommandParser::parse(input).unwrap(), ShellCommand::Exit);
        }
    }

    #[test]
    fn test_parse_help() {
        let result = ShellCommandParser::parse(":help").unwrap();
        assert_eq!(result, ShellCommand::Help(None));

        let result = ShellCommandParser::parse(":? import").unwrap();
        assert_eq!(result, ShellCommand::Help(Some("import".to_string())));
    }

    #[test]
    fn test_parse_show_and_purge() {
        assert_eq!(
            ShellCommandParser::parse(":show variables").unwrap(),
            ShellCommand::Show(ShowTarget::Variables)
        );
        assert_eq!(
            ShellCommandParser::parse(":S imports").unwrap(),
            ShellCommand::Show(ShowTarget::Imports)
        );
        assert_eq!(
            ShellCommandParser::parse(":p all").unwrap(),
            ShellCommand::Purge(ShowTarget::All)
        );
    }

    #[test]
    fn test_show_requires_target() {
        let err = ShellCommandParser::parse(":show").unwrap_err();
        assert!(matches!(
            err,
            GroovyshError::Parse(ParseError::MissingArgument { .. })
        ));

        let err = ShellCommandParser::parse(":show things").unwrap_err();
        assert!(matches!(
            err,
            GroovyshError::Parse(ParseError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_parse_import() {
        assert_eq!(
            ShellCommandParser::parse(":import java.util.concurrent.*").unwrap(),
            ShellCommand::Import("java.util.concurrent.*".to_string())
        );
        assert_eq!(
            ShellCommandParser::parse(":i java.time.LocalDate as LD").unwrap(),
            ShellCommand::Import("java.time.LocalDate as LD".to_string())
        );
        assert!(ShellCommandParser::parse(":import").is_err());
        assert!(ShellCommandParser::parse(":import java..util").is_err());
        assert!(ShellCommandParser::parse(":import 1abc").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = ShellCommandParser::parse(":frobnicate now").unwrap_err();
        assert!(matches!(
            err,
            GroovyshError::Parse(ParseError::UnknownCommand(ref w)) if w == ":frobnicate"
        ));
    }

    #[test]
    fn test_registry_lists_aliases() {
        let commands = BuiltinCommands::new().commands();
        let help = commands.iter().find(|c| c.name == ":help").unwrap();
        assert!(help.matches(":h"));
        assert!(help.matches(":?"));
        assert!(!help.matches(":x"));
        assert_eq!(commands.len(), BUILTINS.len());
    }

    #[test]
    fn test_help_text() {
        let all = BuiltinCommands::help_text(None);
        assert!(all.contains(":display"));
        assert!(all.contains(":import"));

        let one = BuiltinCommands::help_text(Some("show"));
        assert!(one.starts_with("usage: :show"));

        let missing = BuiltinCommands::help_text(Some(":nope"));
        assert_eq!(missing, "No such command: :nope");
    }
}
