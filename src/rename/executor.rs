//! Applies a rename map to the file system.
//!
//! The executor is best-effort: each entry succeeds, fails or is skipped on
//! its own, and nothing already renamed is undone when a later entry fails.
//! Existing files are never overwritten; a clashing target gets a numeric
//! suffix (`b.txt` becomes `b_1.txt`, `b_2.txt`, ...).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::names::{is_valid_filename, suffixed_name};
use super::types::RenameMap;
use crate::core::config::RenameConfig;
use crate::core::errors::NamewiseError;
use crate::core::files::PathResolver;

/// A rename that went through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenamedFile {
    /// Name before the rename
    pub original_name: String,
    /// Where the file was
    pub from: PathBuf,
    /// Where the file is now; its name may carry a collision suffix
    pub to: PathBuf,
}

/// A rename that failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameFailure {
    /// Name of the entry that failed
    pub original_name: String,
    /// What went wrong
    pub message: String,
}

impl From<RenameFailure> for NamewiseError {
    fn from(failure: RenameFailure) -> Self {
        NamewiseError::file_system(failure.original_name, failure.message)
    }
}

/// Why an entry was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The resolver did not know the name
    Unresolved,
    /// The resolved path no longer exists
    Missing,
    /// The proposed name equals the current one
    Unchanged,
}

/// Outcome of one [`RenameExecutor::apply`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameSummary {
    /// Number of entries renamed on disk
    pub success_count: usize,
    /// Entries that failed, in processing order
    pub errors: Vec<RenameFailure>,
    /// Entries that were renamed
    pub renamed: Vec<RenamedFile>,
    /// Entries that were skipped, with the reason
    pub skipped: Vec<(String, SkipReason)>,
}

impl RenameSummary {
    /// True when no entry failed
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Destination chosen for one entry, before anything is moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedRename {
    /// Current name
    pub original_name: String,
    /// Resolved source path
    pub source: PathBuf,
    /// Destination after collision avoidance
    pub destination: PathBuf,
    /// Whether a suffix had to be added
    pub suffixed: bool,
}

enum Step {
    Skip(SkipReason),
    Fail(String),
    Move(PlannedRename),
}

/// Performs renames with collision avoidance and optional backups.
#[derive(Debug, Clone, Default)]
pub struct RenameExecutor {
    backup_dir: Option<PathBuf>,
}

impl RenameExecutor {
    /// Executor without backups
    pub fn new() -> Self {
        Self::default()
    }

    /// Executor configured from the `rename` config section
    pub fn from_config(config: &RenameConfig) -> Self {
        Self {
            backup_dir: config
                .backup_originals
                .then(|| config.backup_directory.clone()),
        }
    }

    /// Copy each source into `dir` before moving it. Relative directories
    /// resolve against the source file's parent.
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    /// Work out destinations without touching the disk.
    ///
    /// Collisions are checked against the disk as it is now; entries that
    /// would be skipped or would fail are left out of the plan.
    pub fn plan<R>(&self, rename_map: &RenameMap, resolver: &R) -> Vec<PlannedRename>
    where
        R: PathResolver + ?Sized,
    {
        rename_map
            .iter()
            .filter_map(|(original, new)| match prepare(original, new, resolver) {
                Step::Move(planned) => Some(planned),
                _ => None,
            })
            .collect()
    }

    /// Rename every entry of `rename_map`, in map order.
    pub fn apply<R>(&self, rename_map: &RenameMap, resolver: &R) -> RenameSummary
    where
        R: PathResolver + ?Sized,
    {
        let mut summary = RenameSummary::default();

        for (original, new) in rename_map {
            // destinations are computed per entry so earlier moves are visible
            let planned = match prepare(original, new, resolver) {
                Step::Skip(reason) => {
                    debug!("skipping '{}': {:?}", original, reason);
                    summary.skipped.push((original.clone(), reason));
                    continue;
                }
                Step::Fail(message) => {
                    warn!("cannot rename '{}': {}", original, message);
                    summary.errors.push(RenameFailure {
                        original_name: original.clone(),
                        message,
                    });
                    continue;
                }
                Step::Move(planned) => planned,
            };

            match self.execute(&planned) {
                Ok(()) => {
                    debug!(
                        "renamed {} -> {}",
                        planned.source.display(),
                        planned.destination.display()
                    );
                    summary.success_count += 1;
                    summary.renamed.push(RenamedFile {
                        original_name: planned.original_name,
                        from: planned.source,
                        to: planned.destination,
                    });
                }
                Err(message) => {
                    warn!("rename of '{}' failed: {}", original, message);
                    summary.errors.push(RenameFailure {
                        original_name: original.clone(),
                        message,
                    });
                }
            }
        }

        info!(
            "rename finished: {} renamed, {} failed, {} skipped",
            summary.success_count,
            summary.errors.len(),
            summary.skipped.len()
        );
        summary
    }

    fn execute(&self, planned: &PlannedRename) -> Result<(), String> {
        if let Some(dir) = &self.backup_dir {
            backup(&planned.source, dir)?;
        }
        fs::rename(&planned.source, &planned.destination).map_err(|e| {
            format!(
                "failed to rename {} to {}: {}",
                planned.source.display(),
                planned.destination.display(),
                e
            )
        })
    }
}

fn prepare<R>(original: &str, new_name: &str, resolver: &R) -> Step
where
    R: PathResolver + ?Sized,
{
    let Some(source) = resolver.resolve(original) else {
        return Step::Skip(SkipReason::Unresolved);
    };
    if !occupied(&source) {
        return Step::Skip(SkipReason::Missing);
    }
    if !is_valid_filename(new_name) {
        return Step::Fail(format!("invalid target name '{new_name}'"));
    }

    let parent = source.parent().unwrap_or_else(|| Path::new(""));
    let mut destination = parent.join(new_name);
    if destination == source {
        return Step::Skip(SkipReason::Unchanged);
    }

    let mut suffixed = false;
    if occupied(&destination) && !same_file(&source, &destination) {
        let mut counter = 1;
        while occupied(&destination) {
            destination = parent.join(suffixed_name(new_name, counter));
            counter += 1;
        }
        suffixed = true;
    }

    Step::Move(PlannedRename {
        original_name: original.to_string(),
        source,
        destination,
        suffixed,
    })
}

/// Anything at the path, including a dangling symlink, counts as taken.
fn occupied(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Case-only renames on case-insensitive file systems point at the source itself.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn backup(source: &Path, dir: &Path) -> Result<PathBuf, String> {
    if source.is_dir() {
        warn!("not backing up directory {}", source.display());
        return Ok(source.to_path_buf());
    }
    let dir = if dir.is_absolute() {
        dir.to_path_buf()
    } else {
        source.parent().unwrap_or_else(|| Path::new("")).join(dir)
    };
    fs::create_dir_all(&dir)
        .map_err(|e| format!("failed to create backup directory {}: {}", dir.display(), e))?;

    let file_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let target = dir.join(format!("{file_name}.{stamp}.bak"));
    fs::copy(source, &target)
        .map_err(|e| format!("failed to back up {}: {}", source.display(), e))?;
    debug!("backed up {} to {}", source.display(), target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::files::FileRegistry;
    use tempfile::tempdir;

    fn map(pairs: &[(&str, &str)]) -> RenameMap {
        pairs
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    fn registry_for(dir: &Path) -> FileRegistry {
        let mut registry = FileRegistry::new();
        registry.add_paths(&[dir]);
        registry
    }

    #[test]
    fn collision_gets_numeric_suffix() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "from a").unwrap();
        fs::write(dir.path().join("b.txt"), "original b").unwrap();
        let registry = registry_for(dir.path());

        let summary = RenameExecutor::new().apply(&map(&[("a.txt", "b.txt")]), &registry);

        assert_eq!(summary.success_count, 1);
        assert!(summary.errors.is_empty());
        assert_eq!(
            fs::read_to_string(dir.path().join("b.txt")).unwrap(),
            "original b"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("b_1.txt")).unwrap(),
            "from a"
        );
        assert!(!dir.path().join("a.txt").exists());
    }

    #[test]
    fn probing_continues_past_taken_suffixes() {
        let dir = tempdir().unwrap();
        for name in ["a.txt", "b.txt", "b_1.txt", "b_2.txt"] {
            fs::write(dir.path().join(name), name).unwrap();
        }
        let registry = registry_for(dir.path());

        let summary = RenameExecutor::new().apply(&map(&[("a.txt", "b.txt")]), &registry);

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.renamed[0].to, dir.path().join("b_3.txt"));
    }

    #[test]
    fn unresolved_and_missing_entries_are_skipped() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("gone.txt");
        fs::write(&gone, "x").unwrap();
        let registry = registry_for(dir.path());
        fs::remove_file(&gone).unwrap();

        let summary = RenameExecutor::new().apply(
            &map(&[("gone.txt", "new.txt"), ("unknown.txt", "other.txt")]),
            &registry,
        );

        assert_eq!(summary.success_count, 0);
        assert!(summary.errors.is_empty());
        assert_eq!(
            summary.skipped,
            vec![
                ("gone.txt".to_string(), SkipReason::Missing),
                ("unknown.txt".to_string(), SkipReason::Unresolved),
            ]
        );
    }

    #[test]
    fn identity_entries_are_left_alone() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.txt"), "c").unwrap();
        let registry = registry_for(dir.path());

        let summary = RenameExecutor::new().apply(&map(&[("c.txt", "c.txt")]), &registry);

        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.skipped[0].1, SkipReason::Unchanged);
        assert!(dir.path().join("c.txt").exists());
        assert!(!dir.path().join("c_1.txt").exists());
    }

    #[test]
    fn invalid_target_is_recorded_and_batch_continues() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        let registry = registry_for(dir.path());

        let summary = RenameExecutor::new().apply(
            &map(&[("a.txt", "sub/evil.txt"), ("b.txt", "renamed_b.txt")]),
            &registry,
        );

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.errors.len(), 1);
        assert_eq!(summary.errors[0].original_name, "a.txt");
        assert!(dir.path().join("a.txt").exists());
        assert!(dir.path().join("renamed_b.txt").exists());
    }

    #[test]
    fn closure_resolver_is_accepted() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("x.log");
        fs::write(&source, "x").unwrap();
        let resolver = |name: &str| (name == "x.log").then(|| source.clone());

        let summary = RenameExecutor::new().apply(&map(&[("x.log", "y.log")]), &resolver);

        assert_eq!(summary.success_count, 1);
        assert!(dir.path().join("y.log").exists());
    }

    #[test]
    fn plan_does_not_touch_disk() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        let registry = registry_for(dir.path());

        let plan = RenameExecutor::new().plan(&map(&[("a.txt", "b.txt")]), &registry);

        assert_eq!(plan.len(), 1);
        assert!(plan[0].suffixed);
        assert_eq!(plan[0].destination, dir.path().join("b_1.txt"));
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("b_1.txt").exists());
    }

    #[test]
    fn backups_are_written_before_rename() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "keep me").unwrap();
        let registry = registry_for(dir.path());

        let executor = RenameExecutor::new().with_backup_dir("backup");
        let summary = executor.apply(&map(&[("a.txt", "z.txt")]), &registry);

        assert_eq!(summary.success_count, 1);
        let backups: Vec<_> = fs::read_dir(dir.path().join("backup"))
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(backups.len(), 1);
        let name = backups[0].file_name().to_string_lossy().into_owned();
        assert!(name.starts_with("a.txt.") && name.ends_with(".bak"));
        assert_eq!(fs::read_to_string(backups[0].path()).unwrap(), "keep me");
    }

    #[test]
    fn from_config_respects_backup_flag() {
        let config = RenameConfig::default();
        assert!(RenameExecutor::from_config(&config).backup_dir.is_none());

        let config = RenameConfig {
            backup_originals: true,
            backup_directory: PathBuf::from("bk"),
        };
        assert_eq!(
            RenameExecutor::from_config(&config).backup_dir,
            Some(PathBuf::from("bk"))
        );
    }
}
