//! Session persistence.
//!
//! History, cursor and examples are written together as one JSON document:
//!
//! ```json
//! {
//!   "history": [{"rename_map": {...}, "timestamp": "...", "raw_response": "..."}],
//!   "current_index": 0,
//!   "examples": {"old.txt": "new.txt"}
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::errors::{NamewiseError, NamewiseResultExt, Result};
use crate::rename::examples::ExampleRegistry;
use crate::rename::history::RenameHistory;
use crate::rename::types::AnalysisResult;

/// On-disk shape of a saved session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Accepted results, oldest first
    #[serde(default)]
    pub history: Vec<AnalysisResult>,
    /// Cursor position as stored; untrusted until restored
    #[serde(default = "SessionSnapshot::empty_index")]
    pub current_index: i64,
    /// Examples keyed by original name
    #[serde(default)]
    pub examples: IndexMap<String, String>,
}

impl SessionSnapshot {
    const fn empty_index() -> i64 {
        -1
    }

    /// Take a snapshot of a live history and registry
    pub fn capture(history: &RenameHistory, examples: &ExampleRegistry) -> Self {
        Self {
            history: history.entries().to_vec(),
            current_index: history.current_index(),
            examples: examples.as_map().clone(),
        }
    }

    /// Rebuild live state, repairing an out-of-range cursor
    pub fn restore(self) -> (RenameHistory, ExampleRegistry) {
        let history = RenameHistory::from_parts(self.history, self.current_index);
        let examples = self.examples.into_iter().collect();
        (history, examples)
    }
}

/// Write a snapshot atomically: a sibling temp file is written, then renamed
/// over the target.
pub fn save_snapshot(path: &Path, snapshot: &SessionSnapshot) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            NamewiseError::io(
                format!("Failed to create session directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let content = serde_json::to_string_pretty(snapshot).map_json_err("session snapshot")?;
    let tmp = temp_path_for(path);
    fs::write(&tmp, content).map_err(|e| {
        NamewiseError::io(format!("Failed to write session file: {}", tmp.display()), e)
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        NamewiseError::io(format!("Failed to replace session file: {}", path.display()), e)
    })?;

    info!(
        "saved session with {} results to {}",
        snapshot.history.len(),
        path.display()
    );
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`]
pub fn load_snapshot(path: &Path) -> Result<SessionSnapshot> {
    let content = fs::read_to_string(path).map_err(|e| {
        NamewiseError::io(format!("Failed to read session file: {}", path.display()), e)
    })?;
    let snapshot: SessionSnapshot = serde_json::from_str(&content).map_json_err("session file")?;
    debug!(
        "loaded session with {} results and {} examples from {}",
        snapshot.history.len(),
        snapshot.examples.len(),
        path.display()
    );
    Ok(snapshot)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "session".into());
    name.push(".tmp");
    path.with_file_name(name)
}
