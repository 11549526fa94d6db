use super::*;

fn record(parent: u32, top: f64) -> ScrollRecord<u32> {
    ScrollRecord {
        scroll_parent: parent,
        last_scroll_top: top,
    }
}

#[test]
fn test_insert_replaces_existing_entry() {
    let mut table = ScrollParentTable::new();
    table.insert(1, record(10, 0.0));
    table.insert(1, record(10, 42.0));
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&1), Some(record(10, 42.0)));
}

#[test]
fn test_inherit_copies_or_clears() {
    let mut table = ScrollParentTable::new();
    table.insert(1, record(10, 5.0));
    table.insert(3, record(30, 0.0));

    table.inherit(&1, &2);
    assert_eq!(table.get(&2), Some(record(10, 5.0)));

    // A source without an association clears the destination.
    table.inherit(&4, &3);
    assert_eq!(table.get(&3), None);
}

#[test]
fn test_oldest_entries_are_evicted() {
    let mut table = ScrollParentTable::new();
    for target in 0..(MAX_ENTRIES as u32 + 3) {
        table.insert(target, record(1000, 0.0));
    }
    assert_eq!(table.len(), MAX_ENTRIES);
    assert!(table.get(&0).is_none());
    assert!(table.get(&2).is_none());
    assert!(table.get(&3).is_some());
}

#[test]
fn test_clear_empties_the_table() {
    let mut table = ScrollParentTable::new();
    table.insert(7, record(8, 1.0));
    table.clear();
    assert!(table.is_empty());
}

#[test]
fn test_offset_snapshot_is_shared_by_targets_of_one_parent() {
    let mut table = ScrollParentTable::new();
    table.insert(1, record(10, 0.0));
    table.insert(2, record(10, 100.0));

    assert_eq!(table.get(&1), Some(record(10, 100.0)));
    assert_eq!(table.last_scroll_top(&10), Some(100.0));

    // Forgetting a target keeps the parent's snapshot for the others.
    table.remove(&2);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(&1), Some(record(10, 100.0)));
}
