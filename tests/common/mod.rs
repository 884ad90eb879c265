// Shared structural checks for the skip list integration tests.

use skiplist_set::SkipListSet;

/// Walk every level and check the structural invariants:
///   - each level is strictly ascending
///   - level 0 holds exactly `len()` elements
///   - every element on level L is also on level L-1 (vertical contiguity)
///   - an element's recorded height equals the number of levels it is on
///   - the top level (if above level 0) is not empty
///   - `height() <= max_height()`
pub fn assert_structure<T: Ord + std::fmt::Debug>(set: &SkipListSet<T>) {
    let levels = set.levels();

    assert_eq!(levels.len(), set.height());
    assert!(
        set.height() <= set.max_height(),
        "height {} exceeds ceiling {}",
        set.height(),
        set.max_height()
    );
    assert_eq!(levels[0].len(), set.len());

    for (i, level) in levels.iter().enumerate() {
        assert!(
            level.windows(2).all(|w| w[0] < w[1]),
            "level {i} is not strictly ascending: {level:?}"
        );
    }

    for (i, pair) in levels.windows(2).enumerate() {
        let (lower, upper) = (&pair[0], &pair[1]);
        for value in upper {
            assert!(
                lower.binary_search(value).is_ok(),
                "{value:?} is on level {} but not on level {i}",
                i + 1
            );
        }
    }

    if levels.len() > 1 {
        assert!(
            !levels[levels.len() - 1].is_empty(),
            "empty top level was not collapsed"
        );
    }

    for value in &levels[0] {
        let spanned = levels
            .iter()
            .filter(|level| level.binary_search(value).is_ok())
            .count();
        assert_eq!(set.height_of(value), Some(spanned), "height of {value:?}");
    }
}
