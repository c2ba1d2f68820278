//! CLI Module Organization
//!
//! - args: CLI argument structures
//! - commands: command implementations
//! - context: configuration and session loading
//! - output: tables, spinners and summaries

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

// Re-export commonly used items for convenience
pub use args::*;
pub use commands::*;
pub use context::GlobalOptions;
