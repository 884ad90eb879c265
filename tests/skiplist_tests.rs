// Skip list set: insert, lookup, remove.
//
// Files in tests/ are integration tests: they see the crate as an
// external consumer and only use the public API.

mod common;

use common::assert_structure;
use skiplist_set::{Error, Options, SkipListSet};

// =============================================================================
// Test 1: Empty set behavior
// =============================================================================
#[test]
fn empty_set_behavior() {
    let set: SkipListSet<i32> = SkipListSet::new();
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert!(!set.contains(&1));
    assert_eq!(set.height(), 1);
    assert_eq!(set.iter().next(), None);
    assert_structure(&set);
}

// =============================================================================
// Test 2: first() and last() on an empty set fail
// =============================================================================
#[test]
fn first_and_last_on_empty_set_fail() {
    let set: SkipListSet<i32> = SkipListSet::new();
    assert_eq!(set.first(), Err(Error::Empty));
    assert_eq!(set.last(), Err(Error::Empty));
}

// =============================================================================
// Test 3: Sequential inserts come out ascending
// =============================================================================
#[test]
fn insert_one_through_eight() {
    let mut set = SkipListSet::new();
    for i in 1..=8 {
        assert!(set.insert(i));
    }

    assert_eq!(set.len(), 8);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), (1..=8).collect::<Vec<_>>());
    assert_eq!(set.first(), Ok(&1));
    assert_eq!(set.last(), Ok(&8));
    assert_structure(&set);
}

// =============================================================================
// Test 4: Remove from the middle
// =============================================================================
#[test]
fn remove_middle_element() {
    let mut set = SkipListSet::new();
    for v in [5, 3, 8, 1] {
        set.insert(v);
    }

    assert!(set.remove(&3));
    assert!(!set.contains(&3));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 5, 8]);
    assert_eq!(set.len(), 3);
    assert_structure(&set);
}

// =============================================================================
// Test 5: Duplicate insert is a no-op
// =============================================================================
#[test]
fn duplicate_insert_not_modified() {
    let mut set = SkipListSet::new();
    assert!(set.insert(10));
    assert!(!set.insert(10));
    assert_eq!(set.len(), 1);
    assert_structure(&set);
}

// =============================================================================
// Test 6: Removing an absent value leaves the set unchanged
// =============================================================================
#[test]
fn remove_absent_value_returns_false() {
    let mut set: SkipListSet<i32> = [2, 4, 6].into_iter().collect();
    let before = set.levels().iter().map(|l| l.len()).collect::<Vec<_>>();

    assert!(!set.remove(&5));
    assert!(!set.remove(&0));
    assert!(!set.remove(&100));

    assert_eq!(set.len(), 3);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![2, 4, 6]);
    let after = set.levels().iter().map(|l| l.len()).collect::<Vec<_>>();
    assert_eq!(before, after);
}

// =============================================================================
// Test 7: Remove from an empty set
// =============================================================================
#[test]
fn remove_from_empty_set() {
    let mut set: SkipListSet<i32> = SkipListSet::new();
    assert!(!set.remove(&1));
    assert_eq!(set.len(), 0);
    assert_structure(&set);
}

// =============================================================================
// Test 8: take() hands back the stored value
// =============================================================================
#[test]
fn take_returns_removed_value() {
    let mut set = SkipListSet::new();
    set.insert("bravo".to_string());
    set.insert("alpha".to_string());

    assert_eq!(set.take(&"alpha".to_string()), Some("alpha".to_string()));
    assert_eq!(set.take(&"alpha".to_string()), None);
    assert_eq!(set.len(), 1);
}

// =============================================================================
// Test 9: Smaller than everything, larger than everything
// =============================================================================
#[test]
fn lookups_outside_stored_range() {
    let set: SkipListSet<i32> = (10..20).collect();
    assert!(!set.contains(&i32::MIN));
    assert!(!set.contains(&9));
    assert!(!set.contains(&20));
    assert!(!set.contains(&i32::MAX));
    assert!(set.contains(&10));
    assert!(set.contains(&19));
}

// =============================================================================
// Test 10: Many keys in scrambled order, then remove every other one
// =============================================================================
#[test]
fn insert_1000_scrambled_then_remove_half() {
    let mut set = SkipListSet::with_options(Options::default().with_seed(11)).unwrap();
    // 7919 is prime, so i * 7919 mod 1000 visits every residue once.
    for i in 0..1000u32 {
        assert!(set.insert((i * 7919) % 1000));
    }
    assert_eq!(set.len(), 1000);
    assert_structure(&set);

    for i in (0..1000u32).step_by(2) {
        assert!(set.remove(&i));
    }
    assert_eq!(set.len(), 500);
    for i in 0..1000u32 {
        assert_eq!(set.contains(&i), i % 2 == 1, "contains({i})");
    }
    assert_structure(&set);
}

// =============================================================================
// Test 11: Remove then reinsert
// =============================================================================
#[test]
fn remove_then_reinsert() {
    let mut set: SkipListSet<i32> = (0..64).collect();
    assert!(set.remove(&32));
    assert!(!set.contains(&32));
    assert!(set.insert(32));
    assert!(set.contains(&32));
    assert_eq!(set.len(), 64);
    assert_structure(&set);
}

// =============================================================================
// Test 12: Removing everything collapses to a single level
// =============================================================================
#[test]
fn remove_all_collapses_levels() {
    let mut set: SkipListSet<i32> = (0..256).collect();
    for i in (0..256).rev() {
        assert!(set.remove(&i));
        assert_structure(&set);
    }
    assert!(set.is_empty());
    assert_eq!(set.height(), 1);
    assert_eq!(set.first(), Err(Error::Empty));
}

// =============================================================================
// Test 13: last() agrees with the bottom level after churn
// =============================================================================
#[test]
fn last_tracks_largest_element() {
    let mut set: SkipListSet<i32> = (0..100).collect();
    assert_eq!(set.last(), Ok(&99));
    set.remove(&99);
    set.remove(&98);
    assert_eq!(set.last(), Ok(&97));
    set.insert(500);
    assert_eq!(set.last(), Ok(&500));
    assert_eq!(set.first(), Ok(&0));
}

// =============================================================================
// Test 14: Non-Copy element type
// =============================================================================
#[test]
fn string_elements_sorted_lexicographically() {
    let mut set = SkipListSet::new();
    for word in ["charlie", "alpha", "delta", "bravo"] {
        set.insert(word.to_string());
    }
    let words: Vec<&str> = set.iter().map(String::as_str).collect();
    assert_eq!(words, vec!["alpha", "bravo", "charlie", "delta"]);
    assert_structure(&set);
}

// =============================================================================
// Test 15: Clear resets everything
// =============================================================================
#[test]
fn clear_resets_to_single_empty_level() {
    let mut set: SkipListSet<i32> = (0..100).collect();
    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.height(), 1);
    assert_eq!(set.max_height(), 1);
    assert!(!set.contains(&5));
    assert_structure(&set);

    // Usable again after clear.
    assert!(set.insert(5));
    assert_eq!(set.first(), Ok(&5));
}
