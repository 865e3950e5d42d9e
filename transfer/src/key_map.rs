//! Key lookup tables used for O(1) membership and ordering checks.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::item::{RowKey, TransferItem, derive_key};

/// Map each key to the position of its first occurrence in `keys`.
pub fn position_map<K: Clone + Eq + Hash>(keys: &[K]) -> HashMap<K, usize> {
    let mut map = HashMap::with_capacity(keys.len());
    for (index, key) in keys.iter().enumerate() {
        map.entry(key.clone()).or_insert(index);
    }
    map
}

/// Collect keys into a set.
pub fn key_set<'a, K>(keys: impl IntoIterator<Item = &'a K>) -> HashSet<K>
where
    K: Clone + Eq + Hash + 'a,
{
    keys.into_iter().cloned().collect()
}

/// Keys of every disabled item in `dataset`.
pub fn disabled_keys<T: TransferItem>(
    dataset: &[T],
    row_key: Option<&RowKey<T>>,
) -> HashSet<T::Key> {
    dataset
        .iter()
        .filter(|item| item.disabled())
        .map(|item| derive_key(item, row_key))
        .collect()
}

/// Keys of every item in `dataset`.
pub fn dataset_keys<T: TransferItem>(
    dataset: &[T],
    row_key: Option<&RowKey<T>>,
) -> HashSet<T::Key> {
    dataset.iter().map(|item| derive_key(item, row_key)).collect()
}
