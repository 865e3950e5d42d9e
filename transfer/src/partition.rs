//! Splitting a dataset into source and target rows.

use std::collections::HashMap;
use std::fmt;

use log::trace;

use crate::item::{RowKey, TransferItem, derive_key};
use crate::key_map;
use crate::pane::Pane;

/// An item as placed in a pane, with its (possibly derived) key.
pub struct Row<'a, T: TransferItem> {
    pub key: T::Key,
    pub item: &'a T,
}

impl<'a, T: TransferItem> Row<'a, T> {
    pub fn disabled(&self) -> bool {
        self.item.disabled()
    }

    pub fn label(&self) -> String {
        self.item.label()
    }
}

impl<T: TransferItem> Clone for Row<'_, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            item: self.item,
        }
    }
}

impl<T: TransferItem> fmt::Debug for Row<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("key", &self.key)
            .field("disabled", &self.disabled())
            .finish()
    }
}

/// The dataset split into its two panes.
///
/// Source rows are in dataset order, target rows in target-key order.
pub struct Partition<'a, T: TransferItem> {
    pub source: Vec<Row<'a, T>>,
    pub target: Vec<Row<'a, T>>,
}

impl<'a, T: TransferItem> Partition<'a, T> {
    /// Rows of one pane.
    pub fn rows(&self, pane: Pane) -> &[Row<'a, T>] {
        match pane {
            Pane::Source => &self.source,
            Pane::Target => &self.target,
        }
    }

    /// Keys of one pane, in row order.
    pub fn keys(&self, pane: Pane) -> Vec<T::Key> {
        self.rows(pane).iter().map(|row| row.key.clone()).collect()
    }

    /// Total number of rows in both panes.
    pub fn len(&self) -> usize {
        self.source.len() + self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: TransferItem> fmt::Debug for Partition<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Partition")
            .field("source", &self.source)
            .field("target", &self.target)
            .finish()
    }
}

/// Split `dataset` into source and target rows.
///
/// An item goes to the target pane when its key is in `target_keys`. Target
/// rows follow `target_keys` order; keys without a dataset item are skipped.
/// When several items share a target key, the first one in the dataset
/// wins and the rest are dropped. Duplicate source keys are all kept.
pub fn partition<'a, T: TransferItem>(
    dataset: &'a [T],
    target_keys: &[T::Key],
    row_key: Option<&RowKey<T>>,
) -> Partition<'a, T> {
    let positions = key_map::position_map(target_keys);
    let mut source = Vec::with_capacity(dataset.len().saturating_sub(positions.len()));
    let mut found: HashMap<T::Key, Row<'a, T>> = HashMap::with_capacity(positions.len());

    for item in dataset {
        let key = derive_key(item, row_key);
        if positions.contains_key(&key) {
            found.entry(key.clone()).or_insert(Row { key, item });
        } else {
            source.push(Row { key, item });
        }
    }

    // Each key is removed on first use, so repeated target keys yield one row.
    let target: Vec<Row<'a, T>> = target_keys
        .iter()
        .filter_map(|key| found.remove(key))
        .collect();

    if target.len() < positions.len() {
        trace!(
            "{} target key(s) have no matching item",
            positions.len() - target.len()
        );
    }

    Partition { source, target }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Record;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_target_follows_target_key_order() {
        let dataset = vec![
            Record::new("1", "a"),
            Record::new("2", "b"),
            Record::new("3", "c"),
        ];
        let split = partition(&dataset, &keys(&["3", "1"]), None);
        assert_eq!(split.keys(Pane::Target), keys(&["3", "1"]));
        assert_eq!(split.keys(Pane::Source), keys(&["2"]));
    }

    #[test]
    fn test_duplicate_target_item_first_wins() {
        let dataset = vec![
            Record::new("1", "first"),
            Record::new("1", "second"),
            Record::new("2", "other"),
        ];
        let split = partition(&dataset, &keys(&["1"]), None);
        assert_eq!(split.target.len(), 1);
        assert_eq!(split.target[0].item.title, "first");
        assert_eq!(split.keys(Pane::Source), keys(&["2"]));
    }

    #[test]
    fn test_repeated_target_key_yields_one_row() {
        let dataset = vec![Record::new("1", "a"), Record::new("2", "b")];
        let split = partition(&dataset, &keys(&["2", "1", "2"]), None);
        assert_eq!(split.keys(Pane::Target), keys(&["2", "1"]));
    }

    #[test]
    fn test_row_key_does_not_touch_items() {
        let dataset = vec![Record::new("1", "a"), Record::new("2", "b")];
        let row_key: RowKey<Record> = Box::new(|r: &Record| format!("k{}", r.key));
        let split = partition(&dataset, &keys(&["k2"]), Some(&row_key));
        assert_eq!(split.keys(Pane::Target), keys(&["k2"]));
        assert_eq!(split.target[0].item.key, "2");
        assert_eq!(split.keys(Pane::Source), keys(&["k1"]));
    }
}
