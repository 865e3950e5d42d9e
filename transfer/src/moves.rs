//! Computing new target keys for moves and removals.
//!
//! These are pure functions: they never touch selection state or fire
//! notifications. [`Transfer`](crate::Transfer) wires them to the store and
//! the callbacks.

use std::collections::HashSet;
use std::hash::Hash;

use crate::item::{RowKey, TransferItem};
use crate::key_map;
use crate::pane::Direction;

/// Result of a move or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan<K> {
    /// The proposed new target keys.
    pub target_keys: Vec<K>,
    /// Keys that actually changed pane.
    pub moved_keys: Vec<K>,
}

/// Newest-first target ordering.
///
/// Items moved into the target pane are placed ahead of the ones already
/// there, in the order they were moved. A moved key already present in
/// `target_keys` keeps only its new, leading position.
pub fn newest_first<K: Clone + Eq + Hash>(moved: &[K], target_keys: &[K]) -> Vec<K> {
    let moved_set = key_map::key_set(moved);
    moved
        .iter()
        .cloned()
        .chain(target_keys.iter().filter(|k| !moved_set.contains(*k)).cloned())
        .collect()
}

/// Target keys with `removed` taken out, order otherwise preserved.
pub fn without<K: Clone + Eq + Hash>(target_keys: &[K], removed: &[K]) -> Vec<K> {
    let removed = key_map::key_set(removed);
    target_keys
        .iter()
        .filter(|k| !removed.contains(*k))
        .cloned()
        .collect()
}

/// Plan a move of the originating pane's selection.
///
/// Disabled keys are filtered out of the moving set even when selected.
pub fn plan_move<K: Clone + Eq + Hash>(
    direction: Direction,
    source_selected: &[K],
    target_selected: &[K],
    disabled: &HashSet<K>,
    target_keys: &[K],
) -> MovePlan<K> {
    let selected = match direction {
        Direction::Right => source_selected,
        Direction::Left => target_selected,
    };
    let moved_keys: Vec<K> = selected
        .iter()
        .filter(|k| !disabled.contains(*k))
        .cloned()
        .collect();

    let target_keys = match direction {
        Direction::Right => newest_first(&moved_keys, target_keys),
        Direction::Left => without(target_keys, &moved_keys),
    };

    MovePlan {
        target_keys,
        moved_keys,
    }
}

/// Plan a move, reading disabled flags from the dataset.
pub fn move_to<T: TransferItem>(
    direction: Direction,
    source_selected: &[T::Key],
    target_selected: &[T::Key],
    dataset: &[T],
    target_keys: &[T::Key],
    row_key: Option<&RowKey<T>>,
) -> MovePlan<T::Key> {
    let disabled = key_map::disabled_keys(dataset, row_key);
    plan_move(
        direction,
        source_selected,
        target_selected,
        &disabled,
        target_keys,
    )
}

/// Plan a one-way removal from the target pane.
pub fn plan_remove<K: Clone + Eq + Hash>(removed: &[K], target_keys: &[K]) -> MovePlan<K> {
    MovePlan {
        target_keys: without(target_keys, removed),
        moved_keys: removed.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_newest_first_prepends_in_move_order() {
        let result = newest_first(&keys(&["5", "4"]), &keys(&["1", "2"]));
        assert_eq!(result, keys(&["5", "4", "1", "2"]));
    }

    #[test]
    fn test_newest_first_does_not_duplicate() {
        let result = newest_first(&keys(&["2"]), &keys(&["1", "2"]));
        assert_eq!(result, keys(&["2", "1"]));
    }

    #[test]
    fn test_left_move_preserves_remaining_order() {
        let plan = plan_move(
            Direction::Left,
            &[],
            &keys(&["2"]),
            &HashSet::new(),
            &keys(&["3", "2", "1"]),
        );
        assert_eq!(plan.target_keys, keys(&["3", "1"]));
        assert_eq!(plan.moved_keys, keys(&["2"]));
    }

    #[test]
    fn test_disabled_keys_never_move() {
        let disabled: HashSet<String> = keys(&["2"]).into_iter().collect();
        let plan = plan_move(
            Direction::Right,
            &keys(&["2"]),
            &[],
            &disabled,
            &keys(&["9"]),
        );
        assert!(plan.moved_keys.is_empty());
        assert_eq!(plan.target_keys, keys(&["9"]));
    }

    #[test]
    fn test_remove() {
        let plan = plan_remove(&keys(&["1"]), &keys(&["1", "2"]));
        assert_eq!(plan.target_keys, keys(&["2"]));
        assert_eq!(plan.moved_keys, keys(&["1"]));
    }
}
