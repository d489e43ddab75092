//! Configuration management for groovysh
//!
//! Settings live in a TOML file, by default `~/.groovysh/config.toml`. Every
//! field has a default, so a partial file (or none at all) is fine.
//! Command-line flags are applied on top by the CLI layer.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// History configuration
    #[serde(default)]
    pub history: HistoryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Completion configuration
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Command history configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Maximum number of history entries
    #[serde(default = "default_max_history_size")]
    pub max_size: usize,

    /// Path to history file
    #[serde(default = "default_history_file")]
    pub file_path: PathBuf,

    /// Enable history persistence
    #[serde(default = "default_persist_history")]
    pub persist: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: LogLevel,

    /// Path to log file (None for stderr)
    #[serde(default)]
    pub file_path: Option<PathBuf>,

    /// Enable timestamps in logs
    #[serde(default = "default_log_timestamps")]
    pub timestamps: bool,
}

/// Log level options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Which completion sources are active
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Keywords and default script methods
    #[serde(default = "default_enabled")]
    pub keywords: bool,

    /// Session variables and methods
    #[serde(default = "default_enabled")]
    pub variables: bool,

    /// Imported and auto-imported class names
    #[serde(default = "default_enabled")]
    pub imports: bool,

    /// Classes declared in the session
    #[serde(default = "default_enabled")]
    pub custom_classes: bool,

    /// Members after a dot
    #[serde(default = "default_enabled")]
    pub members: bool,

    /// File names inside string literals
    #[serde(default = "default_enabled")]
    pub filenames: bool,

    /// List dot files without a leading `.` in the prefix
    #[serde(default)]
    pub show_hidden_files: bool,
}

fn default_max_history_size() -> usize {
    1000
}

fn default_history_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".groovysh")
        .join("history")
}

fn default_persist_history() -> bool {
    true
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

fn default_log_timestamps() -> bool {
    true
}

fn default_enabled() -> bool {
    true
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_history_size(),
            file_path: default_history_file(),
            persist: default_persist_history(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file_path: None,
            timestamps: default_log_timestamps(),
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            keywords: true,
            variables: true,
            imports: true,
            custom_classes: true,
            members: true,
            filenames: true,
            show_hidden_files: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `path`, or from [`Config::default_path`]
    /// when no path is given.
    ///
    /// A missing file yields the defaults. A file that exists but cannot be
    /// read or parsed is an error.
    pub fn load_from_file(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);

        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".groovysh")
            .join("config.toml")
    }

    /// Save configuration to a file, creating parent directories as needed.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.history.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history.max_size".to_string(),
                value: self.history.max_size.to_string(),
            }
            .into());
        }

        if self.history.persist && self.history.file_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "history.file_path".to_string(),
                value: String::new(),
            }
            .into());
        }

        Ok(())
    }
}

impl LogLevel {
    /// Convert to tracing::Level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GroovyshError;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.history.max_size, 1000);
        assert!(config.history.persist);
        assert_eq!(config.logging.level, LogLevel::Warn);
        assert!(config.completion.members);
        assert!(!config.completion.show_hidden_files);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[logging]\nlevel = \"debug\"\n\n[completion]\nfilenames = false\n",
        )
        .unwrap();

        let config = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert!(config.logging.timestamps);
        assert!(!config.completion.filenames);
        assert!(config.completion.keywords);
        assert_eq!(config.history.max_size, 1000);
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[history\nmax_size = ").unwrap();

        let err = Config::load_from_file(Some(&path)).unwrap_err();
        assert!(matches!(
            err,
            GroovyshError::Config(ConfigError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.history.max_size = 42;
        config.completion.show_hidden_files = true;
        config.save(&path).unwrap();

        let loaded = Config::load_from_file(Some(&path)).unwrap();
        assert_eq!(loaded.history.max_size, 42);
        assert!(loaded.completion.show_hidden_files);
    }

    #[test]
    fn test_validate_rejects_empty_history() {
        let mut config = Config::default();
        config.history.max_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("history.max_size"));
    }

    #[test]
    fn test_to_toml_string_has_sections() {
        let rendered = Config::default().to_toml_string().unwrap();
        assert!(rendered.contains("[history]"));
        assert!(rendered.contains("[logging]"));
        assert!(rendered.contains("[completion]"));
        assert!(rendered.contains("level = \"warn\""));
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Trace.to_tracing_level(), tracing::Level::TRACE);
        assert_eq!(LogLevel::Error.to_tracing_level(), tracing::Level::ERROR);
    }
}
