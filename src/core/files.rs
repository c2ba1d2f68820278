//! File collection and name resolution.
//!
//! Files are keyed by basename. Adding a second file with a basename that is
//! already registered keeps the first one and drops the newcomer, so names
//! stay unique across the whole session.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A file handed to the rename core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Basename; the key used everywhere in the core
    pub name: String,
    /// Absolute (or caller-relative) location on disk
    pub path: PathBuf,
    /// Whether the record points at a directory
    #[serde(default)]
    pub is_folder: bool,
}

impl FileRecord {
    /// Build a record from a path, taking its basename as the name.
    ///
    /// Returns `None` for paths without a UTF-8 file name component.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let name = path.file_name()?.to_str()?.to_string();
        let is_folder = path.is_dir();
        Some(Self {
            name,
            path,
            is_folder,
        })
    }
}

/// Maps a current file name to the path it lives at.
///
/// This is the seam between the rename executor and whoever owns the file
/// list. Closures of type `Fn(&str) -> Option<PathBuf>` implement it.
pub trait PathResolver {
    /// Resolve `name` to a path, or `None` if it is unknown.
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

impl<F> PathResolver for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self(name)
    }
}

/// Ordered, basename-keyed collection of files awaiting renaming.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    files: IndexMap<String, FileRecord>,
}

impl FileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single record. Returns `false` when the name is already taken.
    pub fn add(&mut self, record: FileRecord) -> bool {
        if self.files.contains_key(&record.name) {
            warn!(
                "skipping {}: a file named '{}' is already registered",
                record.path.display(),
                record.name
            );
            return false;
        }
        self.files.insert(record.name.clone(), record);
        true
    }

    /// Add files and directories. Directories are walked recursively and every
    /// regular file inside is added; the directories themselves are not.
    ///
    /// Returns the records that were actually added.
    pub fn add_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Vec<FileRecord> {
        let mut added = Vec::new();
        for path in paths {
            let path = path.as_ref();
            if path.is_file() {
                self.push_path(path, &mut added);
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                {
                    self.push_path(entry.path(), &mut added);
                }
            } else {
                warn!("ignoring missing path {}", path.display());
            }
        }
        debug!("registered {} new files ({} total)", added.len(), self.len());
        added
    }

    fn push_path(&mut self, path: &Path, added: &mut Vec<FileRecord>) {
        if let Some(record) = FileRecord::from_path(path) {
            if self.add(record.clone()) {
                added.push(record);
            }
        }
    }

    /// Remove a file by name
    pub fn remove(&mut self, name: &str) -> bool {
        self.files.shift_remove(name).is_some()
    }

    /// Forget every file
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Look up a file by name
    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.files.get(name)
    }

    /// Snapshot of all files in insertion order
    pub fn list(&self) -> Vec<FileRecord> {
        self.files.values().cloned().collect()
    }

    /// Number of registered files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are registered
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl PathResolver for FileRegistry {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.get(name).map(|record| record.path.clone())
    }
}
