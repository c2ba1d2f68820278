//! CLI Command Implementations
//!
//! - examples: example registry management
//! - analyze: pattern inference over a set of files
//! - history: browsing, editing and clearing proposed mappings
//! - apply: renaming files on disk
//! - config: configuration management commands

pub mod analyze;
pub mod apply;
pub mod config;
pub mod examples;
pub mod history;

pub use analyze::analyze_command;
pub use apply::apply_command;
pub use config::{init_config, print_default_config, validate_config};
pub use examples::examples_command;
pub use history::{edit_command, history_command};
