//! Shell completion script generation for the groovysh binary itself

use clap::CommandFactory;
use clap_complete::{Shell, generate};
use std::io::Write;

use crate::cli::CliArgs;
use crate::error::{ConfigError, GroovyshError, Result};

const BIN_NAME: &str = "groovysh";

/// Write the completion script for `shell_name` to `out`
pub fn generate_completion<W: Write>(shell_name: &str, out: &mut W) -> Result<()> {
    let shell = parse_shell(shell_name)?;
    let mut cmd = CliArgs::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    Ok(())
}

/// Parse shell name string to Shell enum
pub fn parse_shell(shell_name: &str) -> Result<Shell> {
    match shell_name.to_lowercase().as_str() {
        "bash" => Ok(Shell::Bash),
        "zsh" => Ok(Shell::Zsh),
        "fish" => Ok(Shell::Fish),
        "powershell" | "pwsh" => Ok(Shell::PowerShell),
        "elvish" => Ok(Shell::Elvish),
        _ => Err(GroovyshError::Config(ConfigError::Generic(format!(
            "Unsupported shell: {}. Supported shells: bash, zsh, fish, powershell, elvish",
            shell_name
        )))),
    }
}
