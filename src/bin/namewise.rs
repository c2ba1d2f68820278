//! Namewise CLI - example-driven batch renaming
//!
//! Teach a naming pattern with a few examples, review the inferred mapping,
//! step through earlier proposals, and apply the chosen one to disk.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands, GlobalOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("namewise={default_level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = GlobalOptions::from(&cli);

    // Execute command
    match cli.command {
        Commands::Examples(command) => {
            cli::examples_command(command, &options).await?;
        }
        Commands::Analyze(args) => {
            cli::analyze_command(args, &options).await?;
        }
        Commands::History(command) => {
            cli::history_command(command, &options).await?;
        }
        Commands::Edit(args) => {
            cli::edit_command(args, &options).await?;
        }
        Commands::Apply(args) => {
            cli::apply_command(args, &options).await?;
        }
        Commands::PrintDefaultConfig => {
            cli::print_default_config().await?;
        }
        Commands::InitConfig(args) => {
            cli::init_config(args).await?;
        }
        Commands::ValidateConfig(args) => {
            cli::validate_config(args).await?;
        }
    }

    Ok(())
}
