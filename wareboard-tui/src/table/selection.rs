//! Selection state for the Table widget.
//!
//! Selection uses stable row ids rather than array indices, so it survives
//! re-sorting. Replacing the row set wholesale still clears it.

use std::collections::HashSet;

/// Id-based selection state.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Creates a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected ids (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Check if an id is selected.
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Insert an id without toggling. Used to seed selection mode with the
    /// long-pressed row.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.selected.insert(id.into());
    }

    /// Toggle membership of an id. Returns `true` if the id is selected
    /// afterwards.
    ///
    /// Toggling twice restores the original state.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Select every id in the given list. Returns the count newly selected.
    pub fn select_all(&mut self, all_ids: &[String]) -> usize {
        let mut added = 0;
        for id in all_ids {
            if self.selected.insert(id.clone()) {
                added += 1;
            }
        }
        added
    }

    /// Check whether every id in the given list is selected.
    ///
    /// An empty list is never "all selected".
    pub fn is_all_selected(&self, all_ids: &[String]) -> bool {
        !all_ids.is_empty() && all_ids.iter().all(|id| self.selected.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_toggle_is_identity() {
        let mut selection = Selection::new();
        selection.insert("a");

        assert!(selection.toggle("b"));
        assert!(!selection.toggle("b"));
        assert_eq!(selection.selected(), vec!["a".to_string()]);

        assert!(!selection.toggle("a"));
        assert!(selection.toggle("a"));
        assert_eq!(selection.selected(), vec!["a".to_string()]);
    }

    #[test]
    fn test_select_all_counts_new_only() {
        let mut selection = Selection::new();
        selection.insert("a");
        let all = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(selection.select_all(&all), 2);
        assert!(selection.is_all_selected(&all));
    }

    #[test]
    fn test_toggle_off_after_select_all() {
        let mut selection = Selection::new();
        let all: Vec<String> = (0..10).map(|n| format!("id-{n}")).collect();
        selection.select_all(&all);

        assert!(!selection.toggle("id-4"));
        assert_eq!(selection.len(), 9);
        assert!(!selection.is_all_selected(&all));
    }

    #[test]
    fn test_empty_list_is_never_all_selected() {
        let selection = Selection::new();
        assert!(!selection.is_all_selected(&[]));
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::new();
        selection.insert("a");
        selection.insert("b");
        selection.clear();
        assert!(selection.is_empty());
    }
}
