//! Value-semantics and merge behavior of the ordered containers.

use gridmeta::container::{Map, Set};

#[test]
fn updates_never_mutate_the_receiver() {
    let original: Map<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    let snapshot = original.clone();

    let _with = original.with("c", 3);
    let _replaced = original.with("a", 100);
    let _without = original.without(&"b");
    let _merged = original.with_entries([("a", 0), ("z", 26)]);
    let _mapped = original.map_values(|v| v + 1);

    assert_eq!(original, snapshot);
    assert_eq!(original.get(&"a"), Some(&1));
    assert_eq!(original.len(), 2);
}

#[test]
fn with_entries_passes_unshared_keys_through() {
    let left: Map<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    let merged = left.with_entries([("c", 3)]);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get(&"a"), Some(&1));
    assert_eq!(merged.get(&"c"), Some(&3));
}

#[test]
fn with_entries_default_merge_prefers_right_hand_value() {
    let left: Map<&str, i64> = [("a", 1), ("b", 2)].into_iter().collect();
    let merged = left.with_entries([("b", 20), ("c", 30)]);

    assert_eq!(merged.get(&"b"), Some(&20));
    assert_eq!(merged.get(&"c"), Some(&30));
}

#[test]
fn with_entries_is_commutative_only_with_commutative_merge() {
    let left: Map<&str, i64> = [("a", 1), ("b", 10)].into_iter().collect();
    let right: Map<&str, i64> = [("a", 5), ("b", 2)].into_iter().collect();

    // The default right-hand-wins rule is not commutative.
    let lr = left.with_entries(right.clone());
    let rl = right.with_entries(left.clone());
    assert_ne!(lr, rl);

    // Addition is, so the merged maps agree.
    let lr = left.with_entries_merged(right.clone(), |a, b| a + b);
    let rl = right.with_entries_merged(left.clone(), |a, b| a + b);
    assert_eq!(lr, rl);
}

#[test]
fn long_update_sequences_leave_every_snapshot_intact() {
    let mut snapshots: Vec<Map<&str, i64>> = vec![Map::new()];
    let keys = ["a", "b", "c", "a", "d", "b"];

    for (i, key) in keys.into_iter().enumerate() {
        let next = snapshots.last().unwrap().with(key, i as i64);
        snapshots.push(next);
    }
    let trimmed = snapshots.last().unwrap().without(&"a");
    snapshots.push(trimmed);

    // Replaying the same operations yields the same intermediate values,
    // so earlier snapshots cannot have been touched.
    assert_eq!(snapshots[0], Map::new());
    assert_eq!(snapshots[1].get(&"a"), Some(&0));
    assert_eq!(snapshots[4].get(&"a"), Some(&3));
    assert_eq!(snapshots[4].keys().count(), 3);
    assert!(!snapshots.last().unwrap().contains_key(&"a"));
    assert_eq!(snapshots[6].get(&"a"), Some(&3));
}

#[test]
fn set_operations_are_value_semantic() {
    let original: Set<i64> = [1, 2].into_iter().collect();
    let grown = original.with(3);
    let shrunk = original.without(&1);

    assert_eq!(original.len(), 2);
    assert!(grown.contains(&3));
    assert!(!shrunk.contains(&1));
    assert!(original.contains(&1));
}
