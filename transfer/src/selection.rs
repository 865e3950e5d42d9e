//! Selected-key sets for a single pane.

use std::collections::HashSet;
use std::hash::Hash;

/// How a batch of keys is applied to an existing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAll {
    /// Union the keys into the selection.
    Check,
    /// Subtract the keys from the selection.
    Uncheck,
    /// Make the selection exactly the given keys.
    Replace,
}

impl From<bool> for SelectAll {
    fn from(check_all: bool) -> Self {
        if check_all {
            SelectAll::Check
        } else {
            SelectAll::Uncheck
        }
    }
}

/// Tracks selected items by their keys.
///
/// Keys keep their insertion order so notifications are deterministic, but
/// equality and every operation treat the selection as a set.
#[derive(Debug, Clone)]
pub struct Selection<K: Clone + Eq + Hash> {
    keys: Vec<K>,
    index: HashSet<K>,
}

impl<K: Clone + Eq + Hash> Default for Selection<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            index: HashSet::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> PartialEq for Selection<K> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<K: Clone + Eq + Hash> Eq for Selection<K> {}

impl<K: Clone + Eq + Hash> FromIterator<K> for Selection<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut selection = Self::new();
        selection.extend(iter);
        selection
    }
}

impl<K: Clone + Eq + Hash> Extend<K> for Selection<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Clone + Eq + Hash> Selection<K> {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected keys in insertion order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Check if a key is selected.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Add a key. Returns true if it was not already selected.
    pub fn insert(&mut self, key: K) -> bool {
        if self.index.insert(key.clone()) {
            self.keys.push(key);
            true
        } else {
            false
        }
    }

    /// Remove a key. Returns true if it was selected.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.index.remove(key) {
            self.keys.retain(|k| k != key);
            true
        } else {
            false
        }
    }

    /// Select or deselect a key. Returns true if the selection changed.
    pub fn set(&mut self, key: K, checked: bool) -> bool {
        if checked {
            self.insert(key)
        } else {
            self.remove(&key)
        }
    }

    /// Flip a key. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.remove(&key) {
            false
        } else {
            self.insert(key);
            true
        }
    }

    /// Keep only keys matching `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let index = &mut self.index;
        self.keys.retain(|key| {
            let kept = keep(key);
            if !kept {
                index.remove(key);
            }
            kept
        });
    }

    /// Clear all selection. Returns the keys that were deselected.
    pub fn clear(&mut self) -> Vec<K> {
        self.index.clear();
        std::mem::take(&mut self.keys)
    }

    /// Apply a batch of keys.
    ///
    /// `Check` and `Uncheck` are set union and difference, so applying the
    /// same batch twice has the same effect as applying it once.
    pub fn apply(&mut self, keys: &[K], mode: SelectAll) {
        match mode {
            SelectAll::Check => self.extend(keys.iter().cloned()),
            SelectAll::Uncheck => {
                let removed: HashSet<&K> = keys.iter().collect();
                self.retain(|key| !removed.contains(key));
            }
            SelectAll::Replace => {
                self.clear();
                self.extend(keys.iter().cloned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(keys: &[&'static str]) -> Selection<&'static str> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_insert_dedupes_and_keeps_order() {
        let mut sel = selection(&["b", "a"]);
        assert!(!sel.insert("b"));
        assert!(sel.insert("c"));
        assert_eq!(sel.keys(), &["b", "a", "c"]);
    }

    #[test]
    fn test_equality_ignores_order() {
        assert_eq!(selection(&["a", "b"]), selection(&["b", "a"]));
    }

    #[test]
    fn test_toggle() {
        let mut sel = selection(&["a"]);
        assert!(!sel.toggle("a"));
        assert!(sel.toggle("b"));
        assert_eq!(sel.keys(), &["b"]);
    }

    #[test]
    fn test_apply_uncheck_subtracts() {
        let mut sel = selection(&["1", "2", "3"]);
        sel.apply(&["1", "3"], SelectAll::Uncheck);
        assert_eq!(sel.keys(), &["2"]);
    }

    #[test]
    fn test_apply_replace() {
        let mut sel = selection(&["1", "2"]);
        sel.apply(&["3"], SelectAll::Replace);
        assert_eq!(sel.keys(), &["3"]);
    }

    #[test]
    fn test_retain_keeps_index_in_sync() {
        let mut sel = selection(&["1", "2", "3"]);
        sel.retain(|k| *k != "2");
        assert!(!sel.contains(&"2"));
        assert_eq!(sel.len(), 2);
        assert!(sel.insert("2"));
    }
}
