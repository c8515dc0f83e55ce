//! # jref CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use jref_cli::compose::{run_compose, ComposeArgs};
use jref_cli::pointer::{run_resolve, run_tokens, ResolveArgs, TokensArgs};

/// JSON Pointer resolution and `$ref` composition.
#[derive(Parser, Debug)]
#[command(name = "jref", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a composer configuration file (YAML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the decoded reference tokens of a pointer.
    Tokens(TokensArgs),

    /// Resolve a pointer against a JSON or YAML document.
    Resolve(ResolveArgs),

    /// Inline every `$ref` of a schema and print the result.
    Compose(ComposeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Tokens(args) => run_tokens(args),
        Commands::Resolve(args) => run_resolve(args),
        Commands::Compose(args) => run_compose(args, cli.config.as_ref()),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
