//! Selection operators over a pane's visible rows.
//!
//! These compute keys; [`Transfer`](crate::Transfer) applies them to the
//! store and fires notifications.

use std::hash::Hash;

use serde::Serialize;

use crate::item::TransferItem;
use crate::partition::Row;
use crate::selection::Selection;

/// State of a pane's "select all" checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    None,
    Part,
    All,
}

/// Keys of the enabled rows, in row order.
pub fn enabled_keys<T: TransferItem>(rows: &[Row<'_, T>]) -> Vec<T::Key> {
    rows.iter()
        .filter(|row| !row.disabled())
        .map(|row| row.key.clone())
        .collect()
}

/// Checkbox state for `rows`, counting enabled rows only.
pub fn check_status<T: TransferItem>(
    rows: &[Row<'_, T>],
    selection: &Selection<T::Key>,
) -> CheckStatus {
    let enabled = enabled_keys(rows);
    let checked = enabled.iter().filter(|k| selection.contains(k)).count();
    if checked == 0 {
        CheckStatus::None
    } else if checked == enabled.len() {
        CheckStatus::All
    } else {
        CheckStatus::Part
    }
}

/// Selection after inverting `visible` keys.
///
/// Selected keys outside `visible` stay selected.
pub fn invert<K: Clone + Eq + Hash>(selection: &Selection<K>, visible: &[K]) -> Vec<K> {
    let mut next = selection.clone();
    for key in visible {
        next.toggle(key.clone());
    }
    next.keys().to_vec()
}

/// Keys between `anchor` and `key` (inclusive) in `ordered`.
///
/// Returns `None` if either end is not in `ordered`.
pub fn range_keys<K: Clone + Eq>(ordered: &[K], anchor: &K, key: &K) -> Option<Vec<K>> {
    let from = ordered.iter().position(|k| k == anchor)?;
    let to = ordered.iter().position(|k| k == key)?;
    let (start, end) = if from <= to { (from, to) } else { (to, from) };
    Some(ordered[start..=end].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Record, partition};

    #[test]
    fn test_check_status_ignores_disabled_rows() {
        let dataset = vec![
            Record::new("1", "a"),
            Record::new("2", "b").with_disabled(true),
        ];
        let split = partition(&dataset, &[], None);

        let none: Selection<String> = Selection::new();
        assert_eq!(check_status(&split.source, &none), CheckStatus::None);

        let all: Selection<String> = ["1".to_string()].into_iter().collect();
        assert_eq!(check_status(&split.source, &all), CheckStatus::All);
    }

    #[test]
    fn test_check_status_part() {
        let dataset = vec![Record::new("1", "a"), Record::new("2", "b")];
        let split = partition(&dataset, &[], None);
        let sel: Selection<String> = ["2".to_string()].into_iter().collect();
        assert_eq!(check_status(&split.source, &sel), CheckStatus::Part);
    }

    #[test]
    fn test_invert_keeps_hidden_selection() {
        let sel: Selection<&str> = ["1", "9"].into_iter().collect();
        let next = invert(&sel, &["1", "2"]);
        assert_eq!(next, vec!["9", "2"]);
    }

    #[test]
    fn test_range_keys_either_direction() {
        let ordered = ["a", "b", "c", "d"];
        assert_eq!(range_keys(&ordered, &"b", &"d"), Some(vec!["b", "c", "d"]));
        assert_eq!(range_keys(&ordered, &"c", &"a"), Some(vec!["a", "b", "c"]));
        assert_eq!(range_keys(&ordered, &"x", &"a"), None);
    }
}
