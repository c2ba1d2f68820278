//! # Namewise: Example-Driven Batch Renaming
//!
//! Namewise renames whole folders of files after seeing a handful of
//! examples. The user shows how a few files should be named, an LLM infers
//! the pattern, and the proposed mapping can be browsed, edited, undone and
//! finally applied to disk.
//!
//! - **Example Registry**: ordered original-to-new name pairs supplied by the user
//! - **Pattern Oracle**: prompt building, the chat-completions client and lenient
//!   response parsing
//! - **Rename History**: linear undo/redo over analysis results, persisted as JSON
//! - **Rename Executor**: best-effort renames that never overwrite existing files
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                    RenameSession                         │
//! ├──────────────────────────────────────────────────────────┤
//! │  Oracle          │  Rename           │  I/O              │
//! │ • Prompt         │ • Examples        │ • Persistence     │
//! │ • Backend        │ • History         │                   │
//! │ • Parse          │ • Executor        │                   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use namewise::core::files::FileRegistry;
//! use namewise::{NamewiseConfig, RenameSession};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = NamewiseConfig::load_layered(None)?;
//!     let mut session = RenameSession::from_config(&config)?;
//!
//!     let mut files = FileRegistry::new();
//!     files.add_paths(&["./photos"]);
//!     session.add_example("IMG_0001.jpg", "2024-beach-001.jpg");
//!
//!     let result = session.analyze(&files.list()).await?;
//!     println!("{} files get new names", result.changed_count());
//!
//!     let summary = session.apply(&files)?;
//!     println!("renamed {} files", summary.success_count);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Configuration, errors and shared plumbing
pub mod core {
    //! Configuration, error types, events and file bookkeeping.

    pub mod config;
    pub mod errors;
    pub mod events;
    pub mod files;
}

// Examples, history and the executor
pub mod rename;

// LLM pattern inference
pub mod oracle;

// Session persistence
pub mod io {
    //! Reading and writing session files.

    pub mod persistence;

    pub use persistence::{load_snapshot, save_snapshot, SessionSnapshot};
}

pub mod session;

// Re-export primary types for convenience
pub use core::config::NamewiseConfig;
pub use core::errors::{NamewiseError, NamewiseResultExt, Result};
pub use core::events::{EventSink, SessionEvent};
pub use core::files::{FileRecord, FileRegistry, PathResolver};
pub use oracle::PatternOracle;
pub use rename::{AnalysisResult, Example, ExampleRegistry, RenameHistory, RenameMap, RenameSummary};
pub use session::RenameSession;

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
