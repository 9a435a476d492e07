//! # Post Focus Store
//!
//! Tracks keyboard-navigable focus over the ordered list of post ids shown
//! on the dashboard. The id list is replaced wholesale whenever the backing
//! collection changes; the focus index moves by explicit selection (mouse
//! hover, j/k) only.
//!
//! Two quirks are load-bearing and covered by tests:
//!
//! - Replacing the id list does NOT reconcile an existing focus index
//!   against the new length. Readers treat an out-of-range index as
//!   "nothing focused" via [`FocusStore::focused_id`].
//! - Incrementing or decrementing from `None` lands on index 0 rather than
//!   staying unfocused, so the first j or k press always selects the top of
//!   the list.
//!
//! Focus survives restarts: every mutation writes `focus.json` in the data
//! directory (atomic rename, best effort — a failed write logs and moves on).

use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::storage::json::atomic_write_json;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FocusState {
    pub post_ids: Vec<String>,
    pub focus_index: Option<usize>,
}

pub struct FocusStore {
    state: FocusState,
    /// `None` runs purely in memory (tests, `--backend memory`).
    path: Option<PathBuf>,
}

impl FocusStore {
    /// Load persisted focus state from `dir/focus.json`, or start fresh if
    /// the file is missing or unreadable.
    pub fn load(dir: &std::path::Path) -> Self {
        let path = dir.join("focus.json");
        let state = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("Discarding corrupt focus state: {}", e);
                FocusState::default()
            }),
            Err(_) => FocusState::default(),
        };
        Self {
            state,
            path: Some(path),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            state: FocusState::default(),
            path: None,
        }
    }

    pub fn post_ids(&self) -> &[String] {
        &self.state.post_ids
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.state.focus_index
    }

    /// The id under focus, or `None` when unfocused or the index is out of
    /// range (possible right after the list shrinks).
    pub fn focused_id(&self) -> Option<&str> {
        self.state
            .focus_index
            .and_then(|i| self.state.post_ids.get(i))
            .map(String::as_str)
    }

    /// Replace the full id list. Deliberately leaves `focus_index` alone,
    /// even when it now points past the end.
    pub fn set_post_ids(&mut self, post_ids: Vec<String>) {
        self.state.post_ids = post_ids;
        self.persist();
    }

    pub fn set_focus_index(&mut self, focus_index: Option<usize>) {
        self.state.focus_index = focus_index;
        self.persist();
    }

    /// Move focus down: unfocused lands on 0, otherwise advance unless
    /// already on the last id (clamped, no wrap).
    pub fn increment_focus_index(&mut self) {
        match self.state.focus_index {
            None => self.set_focus_index(Some(0)),
            Some(i) if i + 1 < self.state.post_ids.len() => self.set_focus_index(Some(i + 1)),
            Some(_) => {}
        }
    }

    /// Move focus up: unfocused lands on 0 (mirroring increment), otherwise
    /// retreat unless already at 0 or out of range.
    pub fn decrement_focus_index(&mut self) {
        match self.state.focus_index {
            None => self.set_focus_index(Some(0)),
            Some(i) if i > 0 && i < self.state.post_ids.len() => {
                self.set_focus_index(Some(i - 1));
            }
            Some(_) => {}
        }
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        if let Err(e) = atomic_write_json(path, &self.state) {
            warn!("Failed to persist focus state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(ids: &[&str], focus: Option<usize>) -> FocusStore {
        let mut store = FocusStore::in_memory();
        store.set_post_ids(ids.iter().map(|s| s.to_string()).collect());
        store.set_focus_index(focus);
        store
    }

    #[test]
    fn test_increment_from_unfocused_selects_first() {
        let mut store = store_with(&["a", "b", "c"], None);
        store.increment_focus_index();
        assert_eq!(store.focus_index(), Some(0));
    }

    #[test]
    fn test_increment_clamps_at_last_index() {
        let mut store = store_with(&["a", "b", "c"], Some(2));
        store.increment_focus_index();
        assert_eq!(store.focus_index(), Some(2));
    }

    #[test]
    fn test_increment_advances() {
        let mut store = store_with(&["a", "b", "c"], Some(0));
        store.increment_focus_index();
        assert_eq!(store.focus_index(), Some(1));
    }

    #[test]
    fn test_decrement_at_zero_is_noop() {
        let mut store = store_with(&["a", "b", "c"], Some(0));
        store.decrement_focus_index();
        assert_eq!(store.focus_index(), Some(0));
    }

    #[test]
    fn test_decrement_from_unfocused_selects_first() {
        // Asymmetric on purpose: mirrors increment's None handling.
        let mut store = store_with(&["a", "b", "c"], None);
        store.decrement_focus_index();
        assert_eq!(store.focus_index(), Some(0));
    }

    #[test]
    fn test_decrement_retreats() {
        let mut store = store_with(&["a", "b", "c"], Some(2));
        store.decrement_focus_index();
        assert_eq!(store.focus_index(), Some(1));
    }

    #[test]
    fn test_set_post_ids_does_not_clamp_focus() {
        // Current behavior, pinned: shrinking the list leaves a stale index
        // in place. focused_id() is where readers recover.
        let mut store = store_with(&["a", "b", "c"], Some(2));
        store.set_post_ids(vec!["a".to_string()]);
        assert_eq!(store.focus_index(), Some(2));
        assert_eq!(store.focused_id(), None);
    }

    #[test]
    fn test_out_of_range_index_blocks_movement() {
        // A stale index past the end can't decrement either — the range
        // check fails, so the index stays until something sets it again.
        let mut store = store_with(&["a"], Some(2));
        store.decrement_focus_index();
        assert_eq!(store.focus_index(), Some(2));
    }

    #[test]
    fn test_focused_id_in_range() {
        let store = store_with(&["a", "b", "c"], Some(1));
        assert_eq!(store.focused_id(), Some("b"));
    }

    #[test]
    fn test_focus_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut store = FocusStore::load(dir.path());
            store.set_post_ids(vec!["a".to_string(), "b".to_string()]);
            store.set_focus_index(Some(1));
        }
        let reloaded = FocusStore::load(dir.path());
        assert_eq!(reloaded.focus_index(), Some(1));
        assert_eq!(reloaded.post_ids(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_corrupt_focus_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("focus.json"), "{not json").unwrap();
        let store = FocusStore::load(dir.path());
        assert_eq!(store.focus_index(), None);
        assert!(store.post_ids().is_empty());
    }
}
