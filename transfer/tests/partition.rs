//! Partition properties over a spread of datasets and target lists.

use std::collections::HashSet;

use transfer::{Pane, Record, Transfer, partition};

fn keys(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

fn dataset(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record::new(i.to_string(), format!("item {i}")).with_disabled(i % 4 == 3))
        .collect()
}

/// Target lists mixing present keys, stale keys and reversed order.
fn target_lists(n: usize) -> Vec<Vec<String>> {
    let all: Vec<String> = (0..n).map(|i| i.to_string()).collect();
    let evens: Vec<String> = all.iter().step_by(2).cloned().collect();
    let mut reversed = all.clone();
    reversed.reverse();
    let mut with_stale = evens.clone();
    with_stale.insert(0, "stale-a".to_string());
    with_stale.push("stale-b".to_string());
    vec![vec![], all, evens, reversed, with_stale]
}

#[test]
fn test_every_item_lands_in_exactly_one_pane() {
    for n in [0, 1, 2, 7, 16] {
        let data = dataset(n);
        for target_keys in target_lists(n) {
            let split = partition(&data, &target_keys, None);
            assert_eq!(split.len(), data.len(), "n={n} targets={target_keys:?}");

            let source: HashSet<String> = split.keys(Pane::Source).into_iter().collect();
            let target: HashSet<String> = split.keys(Pane::Target).into_iter().collect();
            assert!(source.is_disjoint(&target));
            for item in &data {
                assert!(source.contains(&item.key) || target.contains(&item.key));
            }
        }
    }
}

#[test]
fn test_target_rows_follow_target_keys() {
    for n in [1, 5, 12] {
        let data = dataset(n);
        let present: HashSet<String> = data.iter().map(|r| r.key.clone()).collect();
        for target_keys in target_lists(n) {
            let split = partition(&data, &target_keys, None);
            let expected: Vec<String> = target_keys
                .iter()
                .filter(|k| present.contains(*k))
                .cloned()
                .collect();
            assert_eq!(split.keys(Pane::Target), expected);
        }
    }
}

#[test]
fn test_source_rows_keep_dataset_order() {
    let data = dataset(6);
    let split = partition(&data, &keys(&["4", "1"]), None);
    assert_eq!(split.keys(Pane::Source), keys(&["0", "2", "3", "5"]));
}

#[test]
fn test_stale_target_keys_are_skipped() {
    let data = dataset(3);
    let split = partition(&data, &keys(&["gone", "2"]), None);
    assert_eq!(split.keys(Pane::Target), keys(&["2"]));
    assert_eq!(split.len(), 3);
}

#[test]
fn test_transfer_partition_uses_row_key() {
    let data = dataset(3);
    let transfer = Transfer::<Record>::new().with_row_key(|r: &Record| format!("row-{}", r.key));
    let split = transfer.partition(&data, &keys(&["row-1"]));
    assert_eq!(split.keys(Pane::Target), keys(&["row-1"]));
    assert_eq!(split.keys(Pane::Source), keys(&["row-0", "row-2"]));
    assert_eq!(data[1].key, "1");
}
