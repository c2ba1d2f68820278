//! Undo-style history of accepted analysis results.
//!
//! The history is a list plus a cursor. Pushing while the cursor sits before
//! the end discards everything after it first, exactly like an editor's undo
//! stack after a new edit.

use std::path::Path;

use tracing::debug;

use super::examples::ExampleRegistry;
use super::types::AnalysisResult;
use crate::core::errors::Result;
use crate::io::persistence::{self, SessionSnapshot};

/// Sequence of analysis results with a movable cursor.
///
/// Invariant: the cursor is `None` exactly when the list is empty, and
/// otherwise indexes a valid entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenameHistory {
    entries: Vec<AnalysisResult>,
    cursor: Option<usize>,
    max_entries: usize,
}

impl RenameHistory {
    /// Create an unbounded, empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `max_entries` results (0 = unbounded)
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Rebuild a history from stored parts, clamping the cursor into range.
    pub fn from_parts(entries: Vec<AnalysisResult>, stored_index: i64) -> Self {
        let cursor = if entries.is_empty() {
            None
        } else if stored_index < 0 {
            // an empty cursor over a non-empty list would break the invariant
            Some(0)
        } else {
            Some((stored_index as usize).min(entries.len() - 1))
        };
        if cursor.map(|c| c as i64) != Some(stored_index) && !entries.is_empty() {
            debug!(
                "clamped stored history index {} into 0..{}",
                stored_index,
                entries.len()
            );
        }
        Self {
            entries,
            cursor,
            max_entries: 0,
        }
    }

    /// Change the retention limit, trimming the oldest entries if needed
    pub fn set_limit(&mut self, max_entries: usize) {
        self.max_entries = max_entries;
        self.enforce_limit();
    }

    /// Retention limit (0 = unbounded)
    pub fn limit(&self) -> usize {
        self.max_entries
    }

    /// Append a result after the cursor, discarding any forward entries
    pub fn push(&mut self, result: AnalysisResult) {
        if let Some(cursor) = self.cursor {
            if cursor + 1 < self.entries.len() {
                debug!(
                    "discarding {} forward history entries",
                    self.entries.len() - cursor - 1
                );
                self.entries.truncate(cursor + 1);
            }
        }
        self.entries.push(result);
        self.cursor = Some(self.entries.len() - 1);
        self.enforce_limit();
    }

    /// Drop the oldest entries beyond the limit, but never the selected one
    /// or anything after it; the list may stay over the limit until the
    /// cursor moves forward and the next push trims again.
    fn enforce_limit(&mut self) {
        if self.max_entries == 0 || self.entries.len() <= self.max_entries {
            return;
        }
        let Some(cursor) = self.cursor else {
            return;
        };
        let excess = (self.entries.len() - self.max_entries).min(cursor);
        if excess == 0 {
            return;
        }
        self.entries.drain(..excess);
        self.cursor = Some(cursor - excess);
    }

    /// Step back one entry; `None` (and no movement) at the start
    pub fn previous(&mut self) -> Option<&AnalysisResult> {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                self.entries.get(cursor - 1)
            }
            _ => None,
        }
    }

    /// Step forward one entry; `None` (and no movement) at the end
    pub fn next(&mut self) -> Option<&AnalysisResult> {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.entries.len() => {
                self.cursor = Some(cursor + 1);
                self.entries.get(cursor + 1)
            }
            _ => None,
        }
    }

    /// The result under the cursor
    pub fn current(&self) -> Option<&AnalysisResult> {
        self.cursor.and_then(|c| self.entries.get(c))
    }

    /// Cursor position, `-1` when empty
    pub fn current_index(&self) -> i64 {
        self.cursor.map_or(-1, |c| c as i64)
    }

    /// Whether `previous()` would move
    pub fn can_go_back(&self) -> bool {
        matches!(self.cursor, Some(c) if c > 0)
    }

    /// Whether `next()` would move
    pub fn can_go_forward(&self) -> bool {
        matches!(self.cursor, Some(c) if c + 1 < self.entries.len())
    }

    /// Drop every entry and reset the cursor
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// All entries, oldest first
    pub fn entries(&self) -> &[AnalysisResult] {
        &self.entries
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist this history together with the example registry
    pub fn save(&self, path: &Path, examples: &ExampleRegistry) -> Result<()> {
        persistence::save_snapshot(path, &SessionSnapshot::capture(self, examples))
    }

    /// Load a history and its example registry from `path`
    pub fn load(path: &Path) -> Result<(Self, ExampleRegistry)> {
        Ok(persistence::load_snapshot(path)?.restore())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::types::RenameMap;

    fn result(tag: &str) -> AnalysisResult {
        let mut map = RenameMap::new();
        map.insert("file.txt".to_string(), format!("{tag}.txt"));
        AnalysisResult::new(map, tag)
    }

    fn tag(result: Option<&AnalysisResult>) -> Option<String> {
        result.map(|r| r.raw_response().to_string())
    }

    #[test]
    fn push_moves_cursor_to_newest() {
        let mut history = RenameHistory::new();
        assert_eq!(history.current_index(), -1);
        history.push(result("r1"));
        history.push(result("r2"));
        assert_eq!(history.current_index(), 1);
        assert_eq!(tag(history.current()), Some("r2".into()));
    }

    #[test]
    fn push_after_previous_truncates_branch() {
        let mut history = RenameHistory::new();
        history.push(result("r1"));
        history.push(result("r2"));
        history.push(result("r3"));

        assert_eq!(tag(history.previous()), Some("r2".into()));
        history.push(result("r4"));

        assert!(history.next().is_none());
        assert_eq!(tag(history.current()), Some("r4".into()));
        assert_eq!(history.len(), 3);
        let tags: Vec<_> = history.entries().iter().map(|r| r.raw_response()).collect();
        assert_eq!(tags, vec!["r1", "r2", "r4"]);
    }

    #[test]
    fn previous_at_start_is_noop() {
        let mut history = RenameHistory::new();
        assert!(history.previous().is_none());
        assert_eq!(history.current_index(), -1);

        history.push(result("only"));
        assert!(history.previous().is_none());
        assert_eq!(history.current_index(), 0);
        assert!(!history.can_go_back());
    }

    #[test]
    fn next_at_end_is_noop() {
        let mut history = RenameHistory::new();
        history.push(result("r1"));
        history.push(result("r2"));
        assert!(history.next().is_none());
        assert_eq!(history.current_index(), 1);

        history.previous();
        assert!(history.can_go_forward());
        assert_eq!(tag(history.next()), Some("r2".into()));
    }

    #[test]
    fn clear_resets_cursor() {
        let mut history = RenameHistory::new();
        history.push(result("r1"));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.current_index(), -1);
        assert!(history.current().is_none());
        assert!(history.previous().is_none());
    }

    #[test]
    fn limit_drops_oldest_entries() {
        let mut history = RenameHistory::with_limit(2);
        history.push(result("r1"));
        history.push(result("r2"));
        history.push(result("r3"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.current_index(), 1);
        assert_eq!(tag(history.previous()), Some("r2".into()));
        assert!(history.previous().is_none());
    }

    #[test]
    fn lowering_limit_keeps_selected_entry() {
        let mut history =
            RenameHistory::from_parts(vec![result("r1"), result("r2"), result("r3")], 0);
        history.set_limit(2);
        assert_eq!(tag(history.current()), Some("r1".into()));
        assert_eq!(history.len(), 3);

        let mut history =
            RenameHistory::from_parts(vec![result("r1"), result("r2"), result("r3")], 1);
        history.set_limit(1);
        assert_eq!(tag(history.current()), Some("r2".into()));
        assert_eq!(history.current_index(), 0);
        let tags: Vec<_> = history.entries().iter().map(|r| r.raw_response()).collect();
        assert_eq!(tags, vec!["r2", "r3"]);
    }

    #[test]
    fn from_parts_clamps_out_of_range_index() {
        let history = RenameHistory::from_parts(vec![result("a"), result("b")], 7);
        assert_eq!(history.current_index(), 1);

        let history = RenameHistory::from_parts(vec![result("a")], -1);
        assert_eq!(history.current_index(), 0);

        let history = RenameHistory::from_parts(Vec::new(), 3);
        assert_eq!(history.current_index(), -1);
        assert!(history.current().is_none());
    }
}
