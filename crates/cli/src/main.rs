//! Wareguard CLI - Inspect role templates and evaluate warehouse permissions
//!
//! Usage:
//!   wareguard                                   - Start interactive mode
//!   wareguard init [dir]                        - Write a starter configuration
//!   wareguard roles list                        - List role templates
//!   wareguard roles show <id>                   - Show a template's permissions
//!   wareguard check -r <role> <m> <a> <r>       - Evaluate one query
//!   wareguard normalize <legacy...>             - Convert legacy permission strings
//!   wareguard matrix -r <role>                  - Print the permission matrix
//!   wareguard routes -r <role>                  - List reachable routes

use clap::{Parser, Subcommand};
use cli::commands::{
    CheckCommand, Context, InitCommand, MatrixCommand, NormalizeCommand, RolesCommand,
    RoutesCommand,
};
use cli::interactive::InteractiveCli;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "wareguard")]
#[command(about = "Wareguard - Warehouse role and permission checker")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file (.yaml, .yml or .json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter configuration
    Init(InitCommand),
    /// Inspect role templates
    Roles(RolesCommand),
    /// Evaluate a permission query (exit code 1 on deny)
    Check(CheckCommand),
    /// Convert legacy permission strings to tuples
    Normalize(NormalizeCommand),
    /// Print the catalog-wide permission matrix
    Matrix(MatrixCommand),
    /// List routes reachable for a user
    Routes(RoutesCommand),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let ctx = Context {
        config: cli.config,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Init(cmd)) => cmd.run()?,
        Some(Commands::Roles(cmd)) => cmd.run(&ctx)?,
        Some(Commands::Check(cmd)) => {
            if !cmd.run(&ctx)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Some(Commands::Normalize(cmd)) => cmd.run(&ctx)?,
        Some(Commands::Matrix(cmd)) => cmd.run(&ctx)?,
        Some(Commands::Routes(cmd)) => cmd.run(&ctx)?,
        None => {
            // No subcommand - start interactive mode
            let mut interactive = InteractiveCli::new(ctx.access_control()?);
            interactive.run()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
