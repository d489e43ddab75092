//! Groovy Shell - Rust Edition
//!
//! An interactive Groovy shell with syntax-aware tab completion.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! groovysh
//!
//! # Print the effective configuration
//! groovysh config --show
//! ```

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing::debug;

use groovysh_complete::cli::CliInterface;
use groovysh_complete::error::Result;
use groovysh_complete::repl::{ReplAction, ReplEngine, SessionState};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli)?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    cli.print_banner();

    run_interactive_mode(&cli)
}

/// Run application in interactive REPL mode
fn run_interactive_mode(cli: &CliInterface) -> Result<()> {
    let config = cli.config();
    let mut repl = ReplEngine::new(
        SessionState::new(),
        &config.history,
        config.completion.clone(),
        cli.color_enabled(),
    )?;

    run_repl_loop(&mut repl)
}

/// Main REPL loop
fn run_repl_loop(repl: &mut ReplEngine) -> Result<()> {
    while repl.is_running() {
        let Some(input) = repl.read_line()? else {
            break;
        };

        match repl.process_input(&input) {
            Ok(ReplAction::Output(text)) => println!("{}", text),
            Ok(ReplAction::Exit) => break,
            Ok(ReplAction::Recorded(statement)) => {
                debug!(lines = statement.lines().count(), "Statement complete");
            }
            Ok(ReplAction::Buffered | ReplAction::Nothing) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

/// Initialize logging from the logging configuration
///
/// Command-line verbosity flags have already been applied to the level.
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(logging.level.to_tracing_level())
        .with_target(false);

    match &logging.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let subscriber = subscriber.with_ansi(false).with_writer(Mutex::new(file));
            if logging.timestamps {
                subscriber.init();
            } else {
                subscriber.without_time().init();
            }
        }
        None => {
            let subscriber = subscriber.with_writer(io::stderr);
            if logging.timestamps {
                subscriber.init();
            } else {
                subscriber.without_time().init();
            }
        }
    }

    Ok(())
}
