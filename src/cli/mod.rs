//! Command-line interface for groovysh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Command-line overrides of configuration values
//! - The `version`, `completion` and `config` subcommands

mod completion;

use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::Result;

pub use completion::{generate_completion, parse_shell};

/// Groovy Shell with syntax-aware completion
#[derive(Parser, Debug)]
#[command(
    name = "groovysh",
    version,
    about = "Interactive Groovy shell with syntax-aware tab completion",
    long_about = "An interactive Groovy shell. Tab completes keywords, session variables and
methods, imported and declared classes, members after a dot and file names inside
string literals."
)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Do not read or write the history file
    #[arg(long = "no-history")]
    pub no_history: bool,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for groovysh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL")]
        shell: String,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration with overrides applied
    config: Config,
}

impl CliInterface {
    /// Parse the process arguments and load the configuration
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Build the interface from already parsed arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and apply the arguments on top
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {}", e);
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Whether output may use ANSI colors
    pub fn color_enabled(&self) -> bool {
        !self.args.no_color
    }

    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };

        if args.no_history {
            config.history.persist = false;
        }
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand ran, false to start the shell
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                generate_completion(shell, &mut io::stdout())?;
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn show_version(&self) {
        println!("groovysh version {}", env!("CARGO_PKG_VERSION"));
        println!("Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    }

    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            println!("{}", self.validate_config_file());
        }

        if show {
            println!("Configuration file: {}", self.config_path().display());
            println!();
            println!("{}", self.config.to_toml_string()?);
        }

        Ok(())
    }

    /// Check the configuration file and describe the outcome
    fn validate_config_file(&self) -> String {
        let path = self.config_path();
        if !path.exists() {
            return format!("{}: no such file, defaults apply", path.display());
        }

        match Config::load_from_file(Some(&path)).and_then(|config| config.validate()) {
            Ok(()) => format!("{}: configuration is valid", path.display()),
            Err(e) => format!("{}: {}", path.display(), e),
        }
    }

    /// Configuration file path (from args or default)
    pub fn config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_path)
    }

    /// Print the startup banner unless quiet
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("Groovy Shell ({})", env!("CARGO_PKG_VERSION"));
            println!("Type ':help' or ':h' for help.");
        }
    }
}
