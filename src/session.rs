//! Rename session - the controller front ends drive.
//!
//! A session owns the example registry and the rename history, runs the
//! oracle, and commits the current mapping through the executor. Every state
//! change that a front end would render is published as a [`SessionEvent`].

use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::core::config::NamewiseConfig;
use crate::core::errors::{NamewiseError, Result};
use crate::core::events::{EventSink, NullSink, SessionEvent};
use crate::core::files::{FileRecord, PathResolver};
use crate::oracle::PatternOracle;
use crate::rename::executor::{PlannedRename, RenameExecutor, RenameSummary};
use crate::rename::types::{AnalysisResult, Example, RenameMap};
use crate::rename::{ExampleRegistry, RenameHistory};

/// Working state of one rename session.
pub struct RenameSession {
    examples: ExampleRegistry,
    history: RenameHistory,
    oracle: PatternOracle,
    executor: RenameExecutor,
    events: Arc<dyn EventSink>,
}

impl RenameSession {
    /// Build a session from configuration, talking HTTP to the inference service
    pub fn from_config(config: &NamewiseConfig) -> Result<Self> {
        let oracle = PatternOracle::new(config.inference.clone())?;
        let mut session = Self::with_oracle(oracle);
        session.executor = RenameExecutor::from_config(&config.rename);
        session.history.set_limit(config.session.max_history);
        Ok(session)
    }

    /// Build a session around an existing oracle
    pub fn with_oracle(oracle: PatternOracle) -> Self {
        Self {
            examples: ExampleRegistry::new(),
            history: RenameHistory::new(),
            oracle,
            executor: RenameExecutor::new(),
            events: Arc::new(NullSink),
        }
    }

    /// Publish events to `events`; the oracle shares the same sink
    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.oracle = self.oracle.with_events(events.clone());
        self.events = events;
        self
    }

    /// Replace the executor, e.g. to enable backups
    pub fn with_executor(mut self, executor: RenameExecutor) -> Self {
        self.executor = executor;
        self
    }

    // ----- examples -----

    /// Add or overwrite an example
    pub fn add_example(&mut self, original_name: &str, new_name: &str) -> bool {
        let added = self.examples.add_example(original_name, new_name);
        if added {
            self.events.emit(SessionEvent::ExampleUpdated {
                name: original_name.to_string(),
                new_name: Some(new_name.to_string()),
            });
        }
        added
    }

    /// Register a file as an example that still keeps its own name, ready to
    /// be edited by the user.
    pub fn prepare_example(&mut self, file_name: &str) -> Result<Example> {
        if self.add_example(file_name, file_name) {
            Ok(Example::new(file_name, file_name))
        } else {
            Err(NamewiseError::validation_field(
                "cannot prepare an example for an empty file name",
                "file_name",
            ))
        }
    }

    /// Remove an example
    pub fn remove_example(&mut self, original_name: &str) -> bool {
        let removed = self.examples.remove_example(original_name);
        if removed {
            self.events.emit(SessionEvent::ExampleUpdated {
                name: original_name.to_string(),
                new_name: None,
            });
        }
        removed
    }

    /// Remove all examples; the history is untouched
    pub fn clear_examples(&mut self) {
        self.examples.clear();
    }

    /// Current examples
    pub fn examples(&self) -> Vec<Example> {
        self.examples.list()
    }

    // ----- inference -----

    /// Infer a mapping for `files` from the registered examples and make it
    /// the current history entry.
    pub async fn analyze(&mut self, files: &[FileRecord]) -> Result<&AnalysisResult> {
        self.analyze_with_cancel(files, &CancellationToken::new())
            .await
    }

    /// Cancellable [`analyze`](Self::analyze)
    pub async fn analyze_with_cancel(
        &mut self,
        files: &[FileRecord],
        cancel: &CancellationToken,
    ) -> Result<&AnalysisResult> {
        let examples = self.examples.list();
        let result = self
            .oracle
            .analyze_with_cancel(files, &examples, cancel)
            .await?;
        self.commit(result);
        self.history
            .current()
            .ok_or_else(|| NamewiseError::internal("history empty after push"))
    }

    /// Push an externally produced result into history
    pub fn commit(&mut self, result: AnalysisResult) {
        self.history.push(result);
        self.announce_current();
    }

    // ----- history -----

    /// Move back one result
    pub fn previous(&mut self) -> Option<&AnalysisResult> {
        let moved = self.history.previous().is_some();
        if moved {
            self.announce_current();
        }
        self.moved_to_current(moved)
    }

    /// Move forward one result
    pub fn next(&mut self) -> Option<&AnalysisResult> {
        let moved = self.history.next().is_some();
        if moved {
            self.announce_current();
        }
        self.moved_to_current(moved)
    }

    fn moved_to_current(&self, moved: bool) -> Option<&AnalysisResult> {
        if moved {
            self.history.current()
        } else {
            None
        }
    }

    /// Result under the history cursor
    pub fn current(&self) -> Option<&AnalysisResult> {
        self.history.current()
    }

    /// Map under the history cursor
    pub fn current_rename_map(&self) -> Option<&RenameMap> {
        self.history.current().map(AnalysisResult::rename_map)
    }

    /// Read-only view of the history
    pub fn history(&self) -> &RenameHistory {
        &self.history
    }

    /// Drop all results
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.announce_current();
    }

    /// Override the proposed name of one file in the current mapping.
    ///
    /// The edit becomes a new history entry, so `previous()` undoes it.
    pub fn edit_current(&mut self, original_name: &str, new_name: &str) -> Result<&AnalysisResult> {
        if new_name.is_empty() {
            return Err(NamewiseError::validation_field(
                "new name must not be empty",
                "new_name",
            ));
        }
        let current = self
            .history
            .current()
            .ok_or_else(|| NamewiseError::validation("no analysis result to edit"))?;
        if current.new_name_for(original_name).is_none() {
            return Err(NamewiseError::validation_field(
                format!("'{original_name}' is not part of the current mapping"),
                "original_name",
            ));
        }

        let edited = current.with_override(original_name, new_name);
        debug!("edited mapping: {original_name} -> {new_name}");
        self.commit(edited);
        self.history
            .current()
            .ok_or_else(|| NamewiseError::internal("history empty after edit"))
    }

    fn announce_current(&self) {
        self.events.emit(SessionEvent::CurrentResultChanged(
            self.current_rename_map().cloned(),
        ));
    }

    // ----- execution -----

    /// Apply the current mapping to disk using `resolver` to find files.
    pub fn apply<R>(&self, resolver: &R) -> Result<RenameSummary>
    where
        R: PathResolver + ?Sized,
    {
        self.events.emit(SessionEvent::RenameStarted);
        let Some(rename_map) = self.current_rename_map() else {
            let err = NamewiseError::validation("no rename mapping available");
            self.events.emit(SessionEvent::RenameFailed(err.to_string()));
            return Err(err);
        };

        let summary = self.executor.apply(rename_map, resolver);
        info!(
            "applied mapping: {} renamed, {} errors",
            summary.success_count,
            summary.errors.len()
        );
        self.events
            .emit(SessionEvent::RenameCompleted(summary.clone()));
        Ok(summary)
    }

    /// Destinations [`apply`](Self::apply) would use right now, without
    /// touching the disk.
    pub fn plan<R>(&self, resolver: &R) -> Result<Vec<PlannedRename>>
    where
        R: PathResolver + ?Sized,
    {
        let rename_map = self
            .current_rename_map()
            .ok_or_else(|| NamewiseError::validation("no rename mapping available"))?;
        Ok(self.executor.plan(rename_map, resolver))
    }

    // ----- persistence -----

    /// Save history and examples to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        self.history.save(path, &self.examples)
    }

    /// Replace history and examples with the contents of `path`
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let (mut history, examples) = RenameHistory::load(path)?;
        history.set_limit(self.history_limit());
        self.history = history;
        self.examples = examples;
        self.announce_current();
        Ok(())
    }

    fn history_limit(&self) -> usize {
        self.history.limit()
    }
}
