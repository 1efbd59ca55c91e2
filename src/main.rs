//! fieldtrace CLI entry point

use clap::Parser;
use fieldtrace::cli::{Cli, Commands};
use fieldtrace::core::error::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_env("FIELDTRACE_LOG"))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Trace(args) => fieldtrace::cli::trace::run(args),
        Commands::Files(args) => fieldtrace::cli::files::run(args),
        Commands::Config(args) => fieldtrace::cli::config::run(args),
    }
}
