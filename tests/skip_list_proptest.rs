//! Property-based tests for the skip list against a sorted-vector model.

use proptest::prelude::*;
use capped_skiplist::SkipList;
use capped_skiplist::height::target_height;

// =============================================================================
// Test helpers
// =============================================================================

/// An operation applied to both the list and the model.
#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Erase(i16),
    Contains(i16),
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    // A narrow value range makes duplicates and hits common.
    prop_oneof![
        3 => (-50..50i16).prop_map(Op::Insert),
        2 => (-50..50i16).prop_map(Op::Erase),
        1 => (-50..50i16).prop_map(Op::Contains),
    ]
}

fn build(init: &[i16], seed: u64) -> (SkipList<i16>, Vec<i16>) {
    let list = SkipList::with_seed(init.to_vec(), seed).unwrap();
    let mut model = init.to_vec();
    model.sort();
    return (list, model);
}

/// Apply an op to both sides and check they agree on the result.
fn apply(list: &mut SkipList<i16>, model: &mut Vec<i16>, op: &Op) -> Result<(), TestCaseError> {
    match op {
        Op::Insert(v) => {
            list.insert(*v);
            let pos = model.partition_point(|x| x < v);
            model.insert(pos, *v);
        }
        Op::Erase(v) => {
            let expected = match model.binary_search(v) {
                Ok(pos) => {
                    model.remove(pos);
                    true
                }
                Err(_) => false,
            };
            prop_assert_eq!(list.erase(v), expected, "erase {}", v);
        }
        Op::Contains(v) => {
            prop_assert_eq!(list.contains(v), model.binary_search(v).is_ok(), "contains {}", v);
        }
    }
    return Ok(());
}

// =============================================================================
// Construction properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After construction every batch element is present and the size matches.
    #[test]
    fn construction_holds_batch(
        init in prop::collection::vec(any::<i16>(), 1..100),
        seed in any::<u64>(),
    ) {
        let (list, model) = build(&init, seed);
        prop_assert_eq!(list.len(), init.len());
        prop_assert_eq!(list.height(), target_height(init.len()));
        for v in &init {
            prop_assert!(list.contains(v));
        }
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
    }

    /// Search finds an equal element exactly when one is present.
    #[test]
    fn search_agrees_with_contains(
        init in prop::collection::vec(-20..20i16, 1..60),
        probe in -25..25i16,
        seed in any::<u64>(),
    ) {
        let (list, _) = build(&init, seed);
        let found = list.search(&probe);
        prop_assert_eq!(found.is_some(), list.contains(&probe));
        if let Some(node) = found {
            prop_assert_eq!(*node.value(), probe);
            prop_assert!(node.level() < list.height());
        }
    }
}

// =============================================================================
// Operation sequences
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Size, order, and membership track the model after every step.
    #[test]
    fn matches_sorted_model(
        init in prop::collection::vec(-50..50i16, 1..30),
        ops in prop::collection::vec(arbitrary_op(), 0..120),
        seed in any::<u64>(),
    ) {
        let (mut list, mut model) = build(&init, seed);
        for op in &ops {
            let len = list.len();
            apply(&mut list, &mut model, op)?;
            if let Op::Insert(_) = op {
                prop_assert_eq!(list.len(), len + 1);
            }
            prop_assert_eq!(list.len(), model.len());
            prop_assert_eq!(list.is_empty(), model.is_empty());
            prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model.clone());
        }
    }

    /// Height never goes down, whatever mix of inserts and erases runs.
    #[test]
    fn height_never_decreases(
        init in prop::collection::vec(-50..50i16, 1..30),
        ops in prop::collection::vec(arbitrary_op(), 0..150),
        seed in any::<u64>(),
    ) {
        let (mut list, mut model) = build(&init, seed);
        let mut height = list.height();
        for op in &ops {
            apply(&mut list, &mut model, op)?;
            prop_assert!(list.height() >= height, "height fell from {} to {}", height, list.height());
            prop_assert!(list.height() >= target_height(list.len()));
            let expected_levels = if list.is_empty() { 0 } else { list.height() };
            prop_assert_eq!(list.levels().count(), expected_levels);
            height = list.height();
        }
    }

    /// Every level is sorted and no upper level is longer than the one below.
    #[test]
    fn levels_are_nested(
        init in prop::collection::vec(-50..50i16, 1..30),
        ops in prop::collection::vec(arbitrary_op(), 0..80),
        seed in any::<u64>(),
    ) {
        let (mut list, mut model) = build(&init, seed);
        for op in &ops {
            apply(&mut list, &mut model, op)?;
        }
        let levels: Vec<Vec<i16>> = list.levels().map(|level| level.copied().collect()).collect();
        for level in &levels {
            prop_assert!(level.windows(2).all(|w| w[0] <= w[1]));
        }
        for pair in levels.windows(2) {
            prop_assert!(pair[0].len() <= pair[1].len());
            prop_assert_eq!(pair[0].first(), pair[1].first());
        }
        if let Some(bottom) = levels.last() {
            prop_assert_eq!(bottom, &model);
        }
    }

    /// Inserting then erasing a value restores the size; membership reflects leftovers.
    #[test]
    fn insert_then_erase_round_trip(
        init in prop::collection::vec(-20..20i16, 1..40),
        v in -25..25i16,
        seed in any::<u64>(),
    ) {
        let (mut list, model) = build(&init, seed);
        let len = list.len();
        list.insert(v);
        prop_assert!(list.erase(&v));
        prop_assert_eq!(list.len(), len);
        prop_assert_eq!(list.contains(&v), model.contains(&v));
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model);
    }

    /// Erasing an absent value changes nothing.
    #[test]
    fn negative_erase_is_a_no_op(
        init in prop::collection::vec(-20..20i16, 1..40),
        v in 100..200i16,
        seed in any::<u64>(),
    ) {
        let (mut list, _) = build(&init, seed);
        let before = list.to_full_string();
        let len = list.len();
        prop_assert!(!list.erase(&v));
        prop_assert!(!list.erase(&-v));
        prop_assert_eq!(list.len(), len);
        prop_assert_eq!(list.to_full_string(), before);
    }

    /// Clear always empties the list and resets the height.
    #[test]
    fn clear_empties(
        init in prop::collection::vec(-50..50i16, 1..30),
        ops in prop::collection::vec(arbitrary_op(), 0..60),
        seed in any::<u64>(),
    ) {
        let (mut list, mut model) = build(&init, seed);
        for op in &ops {
            apply(&mut list, &mut model, op)?;
        }
        list.clear();
        prop_assert!(list.is_empty());
        prop_assert_eq!(list.len(), 0);
        prop_assert_eq!(list.height(), 1);
        prop_assert_eq!(list.to_string(), "");
    }
}
