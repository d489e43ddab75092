use std::io;

use thiserror::Error;

/// Crate-wide `Result` type using [`GroovyshError`] as the error.
pub type Result<T> = std::result::Result<T, GroovyshError>;

/// Top-level error type for groovysh operations.
#[derive(Debug, Error)]
pub enum GroovyshError {
    /// Configuration errors.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shell command parsing errors.
    #[error("{0}")]
    Parse(#[from] ParseError),

    /// I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Line editor errors.
    #[error("Line editor error: {0}")]
    Readline(String),

    /// Generic error with a free-form message.
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config file {path}: {reason}")]
    Unreadable { path: String, reason: String },

    /// Invalid config format.
    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    /// Invalid field value.
    #[error("Invalid value '{value}' for field '{field}'")]
    InvalidValue { field: String, value: String },

    /// Anything else worth reporting about configuration.
    #[error("{0}")]
    Generic(String),
}

/// Shell command parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Line starts with `:` but names no registered command.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Command is known but its arguments are not.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A required argument is absent.
    #[error("Missing argument for {command}: {argument}")]
    MissingArgument { command: String, argument: String },
}

impl From<String> for GroovyshError {
    fn from(msg: String) -> Self {
        GroovyshError::Generic(msg)
    }
}

impl From<&str> for GroovyshError {
    fn from(msg: &str) -> Self {
        GroovyshError::Generic(msg.to_owned())
    }
}

impl From<reedline::ReedlineError> for GroovyshError {
    fn from(err: reedline::ReedlineError) -> Self {
        GroovyshError::Readline(err.to_string())
    }
}

impl From<toml::de::Error> for GroovyshError {
    fn from(err: toml::de::Error) -> Self {
        GroovyshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}

impl From<toml::ser::Error> for GroovyshError {
    fn from(err: toml::ser::Error) -> Self {
        GroovyshError::Config(ConfigError::InvalidFormat(err.to_string()))
    }
}
