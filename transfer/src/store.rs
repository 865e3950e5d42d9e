//! Per-pane selection state.
//!
//! The store holds one [`Selection`] per pane and keeps them partitioned by
//! the most recently seen target keys: a key can only be selected in the
//! pane it currently belongs to.
//!
//! Whether the caller or the store owns the selection is decided once, at
//! construction, through [`SelectionMode`]. In controlled mode every external
//! change overwrites the mirrored state; in uncontrolled mode the store keeps
//! its own state and only re-partitions it when the target keys change.

use std::collections::HashSet;
use std::hash::Hash;

use log::debug;

use crate::pane::Pane;
use crate::selection::{SelectAll, Selection};

/// Who owns the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// The store is authoritative.
    #[default]
    Uncontrolled,
    /// The caller supplies the selection on every evaluation.
    Controlled,
}

/// Selection state for both panes.
#[derive(Debug, Clone)]
pub struct SelectionStore<K: Clone + Eq + Hash> {
    mode: SelectionMode,
    source: Selection<K>,
    target: Selection<K>,
    /// Membership of the last seen target keys.
    target_set: HashSet<K>,
    /// Last seen target keys, for change detection.
    last_target_keys: Vec<K>,
    /// Last seen controlled selection, for change detection.
    last_external: Option<Vec<K>>,
    /// Last clicked key per pane, for range selection.
    source_anchor: Option<K>,
    target_anchor: Option<K>,
}

impl<K: Clone + Eq + Hash> Default for SelectionStore<K> {
    fn default() -> Self {
        Self::uncontrolled()
    }
}

impl<K: Clone + Eq + Hash> SelectionStore<K> {
    /// Create a store that owns its selection.
    pub fn uncontrolled() -> Self {
        Self {
            mode: SelectionMode::Uncontrolled,
            source: Selection::new(),
            target: Selection::new(),
            target_set: HashSet::new(),
            last_target_keys: Vec::new(),
            last_external: None,
            source_anchor: None,
            target_anchor: None,
        }
    }

    /// Create a store mirroring a caller-owned selection.
    pub fn controlled(selected_keys: &[K], target_keys: &[K]) -> Self {
        let mut store = Self::uncontrolled();
        store.mode = SelectionMode::Controlled;
        store.initialize(selected_keys, target_keys);
        store
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_controlled(&self) -> bool {
        self.mode == SelectionMode::Controlled
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// Selection of one pane.
    pub fn selection(&self, pane: Pane) -> &Selection<K> {
        match pane {
            Pane::Source => &self.source,
            Pane::Target => &self.target,
        }
    }

    pub fn source_selected(&self) -> &[K] {
        self.source.keys()
    }

    pub fn target_selected(&self) -> &[K] {
        self.target.keys()
    }

    /// Both panes' selections as one list, source first.
    pub fn selected_keys(&self) -> Vec<K> {
        self.source
            .iter()
            .chain(self.target.iter())
            .cloned()
            .collect()
    }

    /// Whether `key` belongs to `pane` under the last seen target keys.
    pub fn belongs_to(&self, pane: Pane, key: &K) -> bool {
        let in_target = self.target_set.contains(key);
        match pane {
            Pane::Target => in_target,
            Pane::Source => !in_target,
        }
    }

    /// Last clicked key in a pane.
    pub fn anchor(&self, pane: Pane) -> Option<&K> {
        match pane {
            Pane::Source => self.source_anchor.as_ref(),
            Pane::Target => self.target_anchor.as_ref(),
        }
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    /// Split a full selection into the two panes by target membership.
    pub fn initialize(&mut self, selected_keys: &[K], target_keys: &[K]) {
        self.remember_target_keys(target_keys);
        self.source = Selection::new();
        self.target = Selection::new();
        for key in selected_keys {
            if self.target_set.contains(key) {
                self.target.insert(key.clone());
            } else {
                self.source.insert(key.clone());
            }
        }
        // Anchors survive as long as their key stays in the same pane.
        for pane in [Pane::Source, Pane::Target] {
            let kept = self
                .anchor(pane)
                .is_some_and(|anchor| self.belongs_to(pane, anchor));
            if !kept {
                self.set_anchor(pane, None);
            }
        }
        if self.is_controlled() {
            self.last_external = Some(selected_keys.to_vec());
        }
    }

    /// Bring the store in line with the caller's latest inputs.
    ///
    /// Controlled stores reset from `external` whenever it or the target
    /// keys differ from what was last seen. Uncontrolled stores ignore
    /// `external` and re-partition their own selection when the target keys
    /// change. Returns true if the selection was rebuilt.
    pub fn sync(&mut self, external: Option<&[K]>, target_keys: &[K]) -> bool {
        let targets_changed = self.last_target_keys.as_slice() != target_keys;
        match self.mode {
            SelectionMode::Controlled => {
                let external = external.unwrap_or(&[]);
                let external_changed = self.last_external.as_deref() != Some(external);
                if !(targets_changed || external_changed) {
                    return false;
                }
                debug!(
                    "Controlled selection reset ({} keys, targets changed: {})",
                    external.len(),
                    targets_changed
                );
                self.initialize(external, target_keys);
                true
            }
            SelectionMode::Uncontrolled => {
                if external.is_some() {
                    debug!("Ignoring external selection on an uncontrolled store");
                }
                if !targets_changed {
                    return false;
                }
                let merged = self.selected_keys();
                self.initialize(&merged, target_keys);
                true
            }
        }
    }

    /// Drop selected keys failing `keep` from both panes.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.source.retain(&mut keep);
        self.target.retain(&mut keep);
    }

    // -------------------------------------------------------------------------
    // Writes
    // -------------------------------------------------------------------------

    /// Replace a pane's selection.
    ///
    /// Keys that do not belong to `pane` are ignored.
    pub fn set_pane_selection(&mut self, pane: Pane, keys: impl IntoIterator<Item = K>) {
        let next: Selection<K> = keys
            .into_iter()
            .filter(|key| self.belongs_to(pane, key))
            .collect();
        *self.selection_mut(pane) = next;
    }

    /// Replace a pane's selection with a function of the previous one.
    pub fn update_pane_selection<F>(&mut self, pane: Pane, update: F)
    where
        F: FnOnce(&Selection<K>) -> Selection<K>,
    {
        let next = update(self.selection(pane));
        self.set_pane_selection(pane, next.keys().iter().cloned());
    }

    /// Apply a batch of keys to a pane.
    pub fn apply(&mut self, pane: Pane, keys: &[K], mode: SelectAll) {
        self.update_pane_selection(pane, |prev| {
            let mut next = prev.clone();
            next.apply(keys, mode);
            next
        });
    }

    /// Select or deselect one key in a pane.
    ///
    /// Returns true if the selection changed.
    pub fn toggle_item(&mut self, pane: Pane, key: K, checked: bool) -> bool {
        if checked && !self.belongs_to(pane, &key) {
            debug!("Ignoring selection of {} key outside the pane", pane);
            return false;
        }
        self.selection_mut(pane).set(key, checked)
    }

    /// Empty a pane's selection and forget its anchor.
    pub fn clear(&mut self, pane: Pane) {
        self.selection_mut(pane).clear();
        self.set_anchor(pane, None);
    }

    pub fn set_anchor(&mut self, pane: Pane, key: Option<K>) {
        match pane {
            Pane::Source => self.source_anchor = key,
            Pane::Target => self.target_anchor = key,
        }
    }

    fn selection_mut(&mut self, pane: Pane) -> &mut Selection<K> {
        match pane {
            Pane::Source => &mut self.source,
            Pane::Target => &mut self.target,
        }
    }

    fn remember_target_keys(&mut self, target_keys: &[K]) {
        if self.last_target_keys.as_slice() != target_keys {
            self.last_target_keys = target_keys.to_vec();
            self.target_set = target_keys.iter().cloned().collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_initialize_splits_by_target_membership() {
        let mut store = SelectionStore::uncontrolled();
        store.initialize(&keys(&["1", "2", "3"]), &keys(&["2"]));
        assert_eq!(store.source_selected(), keys(&["1", "3"]).as_slice());
        assert_eq!(store.target_selected(), keys(&["2"]).as_slice());
    }

    #[test]
    fn test_set_pane_selection_rejects_other_pane_keys() {
        let mut store = SelectionStore::uncontrolled();
        store.sync(None, &keys(&["2"]));
        store.set_pane_selection(Pane::Source, keys(&["1", "2"]));
        assert_eq!(store.source_selected(), keys(&["1"]).as_slice());
        assert!(store.target_selected().is_empty());
    }

    #[test]
    fn test_update_pane_selection_with_updater() {
        let mut store = SelectionStore::uncontrolled();
        store.set_pane_selection(Pane::Source, keys(&["1"]));
        store.update_pane_selection(Pane::Source, |prev| {
            let mut next = prev.clone();
            next.insert("2".to_string());
            next
        });
        assert_eq!(store.source_selected(), keys(&["1", "2"]).as_slice());
    }

    #[test]
    fn test_uncontrolled_repartitions_on_target_change() {
        let mut store = SelectionStore::uncontrolled();
        store.set_pane_selection(Pane::Source, keys(&["1", "2"]));
        assert!(store.sync(None, &keys(&["2"])));
        assert_eq!(store.source_selected(), keys(&["1"]).as_slice());
        assert_eq!(store.target_selected(), keys(&["2"]).as_slice());
        assert!(!store.sync(None, &keys(&["2"])));
    }

    #[test]
    fn test_controlled_transient_write_overwritten_by_external_change() {
        let mut store = SelectionStore::controlled(&keys(&["1"]), &[]);
        store.toggle_item(Pane::Source, "2".to_string(), true);
        assert_eq!(store.source_selected(), keys(&["1", "2"]).as_slice());

        // Same external value: the mirror is left alone.
        assert!(!store.sync(Some(keys(&["1"]).as_slice()), &[]));
        assert_eq!(store.source_selected().len(), 2);

        assert!(store.sync(Some(keys(&["3"]).as_slice()), &[]));
        assert_eq!(store.source_selected(), keys(&["3"]).as_slice());
    }

    #[test]
    fn test_anchor_survives_reset_while_key_stays_in_pane() {
        let mut store = SelectionStore::controlled(&[], &[]);
        store.set_anchor(Pane::Source, Some("1".to_string()));
        store.toggle_item(Pane::Source, "1".to_string(), true);

        assert!(store.sync(Some(keys(&["1"]).as_slice()), &[]));
        assert_eq!(store.anchor(Pane::Source), Some(&"1".to_string()));

        // The anchor key moved to the target pane.
        assert!(store.sync(Some(keys(&["1"]).as_slice()), &keys(&["1"])));
        assert_eq!(store.anchor(Pane::Source), None);
    }

    #[test]
    fn test_toggle_outside_pane_is_ignored() {
        let mut store = SelectionStore::uncontrolled();
        store.sync(None, &keys(&["2"]));
        assert!(!store.toggle_item(Pane::Target, "1".to_string(), true));
        assert!(store.toggle_item(Pane::Target, "2".to_string(), true));
        assert!(store.toggle_item(Pane::Target, "2".to_string(), false));
    }
}
