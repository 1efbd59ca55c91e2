//! CLI command definitions and handlers

pub mod config;
pub mod files;
pub mod trace;

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use clap::{Args, Parser, Subcommand};
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

const LONG_ABOUT: &str = r#"
Trace keywords through the field names of Java model classes.

For every candidate file under the project directory, fieldtrace extracts the
declared class and its fields. A keyword contained in a field name (ignoring
case) is reported directly; otherwise fieldtrace follows each user-defined
field type to the file that declares it and keeps looking, reporting the chain
of types that led to the match.

EXAMPLES:
    fieldtrace trace ~/code/orders                 Use configured keywords
    fieldtrace trace . -k hierarchy -k parentEci   Explicit keywords
    fieldtrace trace . --json                      JSON output for scripting
    fieldtrace files .                             List candidate files
    fieldtrace config                              Show effective config

LOGGING:
    FIELDTRACE_LOG=debug fieldtrace trace .
"#;

/// Trace keywords through field types
#[derive(Parser, Debug)]
#[command(name = "fieldtrace")]
#[command(author, version)]
#[command(about = "Trace keywords through field names of Java model classes")]
#[command(long_about = LONG_ABOUT)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find keywords in field names, directly or through referenced types
    #[command(visible_alias = "t")]
    Trace(TraceArgs),

    /// List the candidate files a trace would read
    #[command(visible_alias = "f")]
    Files(FilesArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

/// Arguments for the trace command
#[derive(Args, Debug)]
#[command(after_help = "EXAMPLES:
    fieldtrace trace                      Prompt for the project directory
    fieldtrace trace src -k ultimateEci   Single keyword
    fieldtrace trace . --include-tests    Also trace *Test* files")]
pub struct TraceArgs {
    /// Project directory (prompted for on a terminal when omitted)
    pub root: Option<PathBuf>,

    /// Keyword to search for (repeatable; overrides configured keywords)
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Config file (default: $FIELDTRACE_HOME/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Worker threads for file classification
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Trace files whose name contains the test marker too
    #[arg(long)]
    pub include_tests: bool,
}

/// Arguments for the files command
#[derive(Args, Debug)]
pub struct FilesArgs {
    /// Project directory (default: current directory)
    pub root: Option<PathBuf>,

    /// Config file (default: $FIELDTRACE_HOME/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Include files whose name contains the test marker
    #[arg(long)]
    pub include_tests: bool,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Config file (default: $FIELDTRACE_HOME/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Load an explicit config file, or the default one if present
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Use the given root, prompt for one on a terminal, or fall back to the current directory
pub fn resolve_root(root: Option<PathBuf>, prompt: bool) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }

    if prompt && std::io::stdin().is_terminal() {
        let input: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Provide project directory")
            .interact_text()
            .map_err(|e| Error::Prompt {
                message: e.to_string(),
            })?;
        return Ok(PathBuf::from(input.trim()));
    }

    Ok(std::env::current_dir()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_trace_args() {
        let cli = Cli::parse_from([
            "fieldtrace",
            "trace",
            "src",
            "-k",
            "hierarchy",
            "--keyword",
            "parentEci",
            "--json",
            "-w",
            "4",
        ]);
        let Commands::Trace(args) = cli.command else {
            panic!("expected trace command");
        };
        assert_eq!(args.root, Some(PathBuf::from("src")));
        assert_eq!(args.keywords, vec!["hierarchy", "parentEci"]);
        assert!(args.json);
        assert_eq!(args.workers, Some(4));
        assert!(!args.include_tests);
    }

    #[test]
    fn test_explicit_root_is_used_as_is() {
        let root = resolve_root(Some(PathBuf::from("some/dir")), true).unwrap();
        assert_eq!(root, PathBuf::from("some/dir"));
    }
}
