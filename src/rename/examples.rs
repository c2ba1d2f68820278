//! Registry of user-authored rename examples.

use indexmap::IndexMap;

use super::types::Example;

/// Examples keyed by original name; the last write for a name wins.
///
/// Iteration follows insertion order, so listings are stable for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleRegistry {
    entries: IndexMap<String, String>,
}

impl ExampleRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `original_name -> new_name`. Fails only when either side is empty.
    pub fn add_example(&mut self, original_name: &str, new_name: &str) -> bool {
        if original_name.is_empty() || new_name.is_empty() {
            return false;
        }
        self.entries
            .insert(original_name.to_string(), new_name.to_string());
        true
    }

    /// Drop the example for `original_name`, reporting whether one existed
    pub fn remove_example(&mut self, original_name: &str) -> bool {
        self.entries.shift_remove(original_name).is_some()
    }

    /// Remove every example
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Snapshot for display and inference
    pub fn list(&self) -> Vec<Example> {
        self.entries
            .iter()
            .map(|(original, new)| Example::new(original.clone(), new.clone()))
            .collect()
    }

    /// Desired name for one original, if an example exists
    pub fn get(&self, original_name: &str) -> Option<&str> {
        self.entries.get(original_name).map(String::as_str)
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no examples
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrowed view used by persistence
    pub(crate) fn as_map(&self) -> &IndexMap<String, String> {
        &self.entries
    }
}

impl FromIterator<(String, String)> for ExampleRegistry {
    /// Entries with an empty side are skipped, matching `add_example`.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (original, new) in iter {
            registry.add_example(&original, &new);
        }
        registry
    }
}
