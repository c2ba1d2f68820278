//! CLI Argument Structures
//!
//! This module contains all CLI argument definitions and command structures
//! used by the namewise binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Example-driven batch file renaming
#[derive(Parser)]
#[command(name = "namewise")]
#[command(version = VERSION)]
#[command(about = "✏️  Namewise - rename whole folders from a few examples")]
#[command(long_about = "
Show namewise how a few files should be named, let the model infer the
pattern, review the proposal, then apply it. Every proposal is kept in an
undoable history stored in the session file.

Common Usage:

  # Teach the pattern with one or two examples
  namewise examples add IMG_0001.jpg 2024-beach-001.jpg

  # Ask for a mapping covering a whole folder
  namewise analyze ./photos

  # Tweak a single proposal, or step back to an earlier one
  namewise edit IMG_0042.jpg 2024-beach-sunset.jpg
  namewise history previous

  # Preview, then rename
  namewise apply --dry-run ./photos
  namewise apply ./photos
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to .namewise.yml in the working directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Session file holding examples and history
    #[arg(long, global = true, env = "NAMEWISE_SESSION")]
    pub session: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage naming examples
    #[command(subcommand)]
    Examples(ExamplesCommand),

    /// Infer new names for the given files and directories
    Analyze(AnalyzeArgs),

    /// Browse the history of proposed mappings
    #[command(subcommand)]
    History(HistoryCommand),

    /// Override one proposed name in the current mapping
    Edit(EditArgs),

    /// Rename files on disk according to the current mapping
    Apply(ApplyArgs),

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a namewise configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

#[derive(Subcommand)]
pub enum ExamplesCommand {
    /// Add or replace an example
    Add {
        /// Current file name
        original: String,
        /// Desired file name
        new: String,
    },
    /// Register a file as an example that keeps its name, to edit later
    Prepare {
        /// File name
        name: String,
    },
    /// Remove an example
    Remove {
        /// Current file name of the example
        original: String,
    },
    /// List examples
    List,
    /// Remove all examples
    Clear,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List stored mappings and show the current one
    Show,
    /// Step back to the previous mapping
    Previous,
    /// Step forward to the next mapping
    Next,
    /// Drop every stored mapping
    Clear,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Files or directories to rename; directories are walked recursively
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Print the resulting mapping as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Override the model from configuration
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Current file name
    pub original: String,

    /// Name to use instead of the proposal
    pub new: String,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Files or directories the current mapping refers to
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Show what would happen without touching the disk
    #[arg(long)]
    pub dry_run: bool,

    /// Copy originals into a backup directory before renaming
    #[arg(long)]
    pub backup: bool,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".namewise.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    #[arg(value_name = "FILE")]
    pub config: PathBuf,

    /// Show detailed configuration breakdown
    #[arg(long)]
    pub detailed: bool,
}
