//! Example registry, rename history and the on-disk rename executor.

pub mod examples;
pub mod executor;
pub mod history;
pub mod names;
pub mod types;

pub use examples::ExampleRegistry;
pub use executor::{
    PlannedRename, RenameExecutor, RenameFailure, RenameSummary, RenamedFile, SkipReason,
};
pub use history::RenameHistory;
pub use names::{is_valid_filename, sanitize_filename, split_extension};
pub use types::{AnalysisResult, Example, RenameMap};
