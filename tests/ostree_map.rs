use std::collections::BTreeMap;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher};

use ordstat_tree::{Avl, AvlTreeMap, Balance, BstMap, Error, NodeRef, OSTreeMap, Rank, Unbalanced, ostree_map};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

/// Hashes with fixed keys, so every derived order is a function of the proptest inputs.
type FixedState = BuildHasherDefault<DefaultHasher>;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates keys from a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn entries_strategy() -> impl Strategy<Value = Vec<(i64, i64)>> {
    proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Replace(i64, i64),
    Remove(i64),
    Get(i64),
    TryGet(i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Replace(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::TryGet),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

/// Replays `ops` on both an `OSTreeMap` and a `BTreeMap`, comparing every result.
fn replay<B: Balance>(ops: &[MapOp]) -> Result<(OSTreeMap<i64, i64, B>, BTreeMap<i64, i64>), TestCaseError> {
    let mut os_map: OSTreeMap<i64, i64, B> = OSTreeMap::with_policy();
    let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

    for op in ops {
        match op {
            MapOp::Insert(k, v) => {
                let expected = if bt_map.contains_key(k) {
                    Err(Error::DuplicateKey)
                } else {
                    bt_map.insert(*k, *v);
                    Ok(())
                };
                prop_assert_eq!(os_map.insert(*k, *v), expected, "insert({}, {})", k, v);
            }
            MapOp::Replace(k, v) => {
                prop_assert_eq!(os_map.replace(*k, *v), bt_map.insert(*k, *v), "replace({}, {})", k, v);
            }
            MapOp::Remove(k) => {
                let expected = bt_map.remove(k).ok_or(Error::KeyNotFound);
                prop_assert_eq!(os_map.remove(k), expected, "remove({})", k);
            }
            MapOp::Get(k) => {
                prop_assert_eq!(os_map.get(k), bt_map.get(k), "get({})", k);
            }
            MapOp::TryGet(k) => {
                let expected = bt_map.get(k).ok_or(Error::KeyNotFound);
                prop_assert_eq!(os_map.try_get(k), expected, "try_get({})", k);
            }
            MapOp::ContainsKey(k) => {
                prop_assert_eq!(os_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
            }
            MapOp::GetKeyValue(k) => {
                prop_assert_eq!(os_map.get_key_value(k), bt_map.get_key_value(k), "get_key_value({})", k);
            }
            MapOp::FirstKeyValue => {
                prop_assert_eq!(os_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
            }
            MapOp::LastKeyValue => {
                prop_assert_eq!(os_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
            }
            MapOp::PopFirst => {
                prop_assert_eq!(os_map.pop_first(), bt_map.pop_first(), "pop_first");
            }
            MapOp::PopLast => {
                prop_assert_eq!(os_map.pop_last(), bt_map.pop_last(), "pop_last");
            }
        }
        prop_assert_eq!(os_map.len(), bt_map.len(), "len mismatch after {:?}", op);
        prop_assert_eq!(os_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
    }
    Ok((os_map, bt_map))
}

/// Walks the subtree checking key order, cached heights and sizes, and (if `balanced`)
/// the AVL balance condition. Returns the subtree height.
fn check_subtree(
    node: Option<NodeRef<'_, i64, i64>>,
    lower: Option<i64>,
    upper: Option<i64>,
    balanced: bool,
) -> usize {
    let Some(node) = node else {
        return 0;
    };
    let key = *node.key();
    assert!(lower.is_none_or(|lower| lower < key), "key {key} not above {lower:?}");
    assert!(upper.is_none_or(|upper| key < upper), "key {key} not below {upper:?}");

    let left = check_subtree(node.left(), lower, Some(key), balanced);
    let right = check_subtree(node.right(), Some(key), upper, balanced);
    let left_size = node.left().map_or(0, |child| child.size());
    let right_size = node.right().map_or(0, |child| child.size());

    assert_eq!(node.height(), 1 + left.max(right), "cached height of {key}");
    assert_eq!(node.size(), 1 + left_size + right_size, "cached size of {key}");
    assert_eq!(node.balance_factor(), right as isize - left as isize, "balance of {key}");
    if balanced {
        assert!(node.balance_factor().abs() <= 1, "node {key} out of balance");
    }
    node.height()
}

/// Shuffles `keys` into an order determined by `seed` alone.
fn removal_order(keys: impl Iterator<Item = i64>, seed: u64) -> Vec<i64> {
    let hasher = FixedState::default();
    let mut order: Vec<i64> = keys.collect();
    order.sort_by_key(|key| hasher.hash_one((key, seed)));
    order
}

fn check_invariants<B>(map: &OSTreeMap<i64, i64, B>, balanced: bool) {
    check_subtree(map.root(), None, None, balanced);
    assert_eq!(map.root().map_or(0, |root| root.size()), map.len());
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on an AVL map and a BTreeMap and asserts
    /// identical results at every step.
    #[test]
    fn avl_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let (os_map, bt_map) = replay::<Avl>(&ops)?;
        check_invariants(&os_map, true);
        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    /// Same as above for the unbalanced tree.
    #[test]
    fn bst_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let (os_map, bt_map) = replay::<Unbalanced>(&ops)?;
        check_invariants(&os_map, false);
        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    /// The AVL height stays below 1.45 * log2(n + 2).
    #[test]
    fn avl_height_is_logarithmic(entries in entries_strategy()) {
        let os_map: AvlTreeMap<i64, i64> = entries.into_iter().collect();
        let height = os_map.root().map_or(0, |root| root.height());
        let bound = 1.45 * ((os_map.len() + 2) as f64).log2();
        prop_assert!((height as f64) < bound, "height {} for {} keys", height, os_map.len());
    }

    /// Inserting distinct keys and then removing all of them leaves an empty tree.
    #[test]
    fn insert_then_remove_all_empties(
        keys in proptest::collection::btree_set(key_strategy(), 1..2_000),
        seed in any::<u64>(),
    ) {
        let mut os_map = AvlTreeMap::new();
        for &key in &keys {
            os_map.insert(key, key)?;
        }
        check_invariants(&os_map, true);

        // Remove in a seed-dependent order so both subtree shapes get hit.
        let order = removal_order(keys.iter().copied(), seed);
        prop_assert_eq!(&order, &removal_order(keys.iter().copied(), seed));
        for key in &order {
            prop_assert_eq!(os_map.remove(key), Ok(*key));
        }
        prop_assert!(os_map.is_empty());
        prop_assert!(os_map.root().is_none());
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in entries_strategy()) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        prop_assert!(os_map.iter().eq(bt_map.iter()));
        prop_assert!(os_map.keys().eq(bt_map.keys()));
        prop_assert!(os_map.values().eq(bt_map.values()));
        prop_assert!(os_map.iter().rev().eq(bt_map.iter().rev()));
        prop_assert!(os_map.keys().rev().eq(bt_map.keys().rev()));
        prop_assert!(os_map.clone().into_iter().eq(bt_map.clone().into_iter()));
        prop_assert_eq!(os_map.iter().len(), bt_map.len());
    }

    /// Alternates between both ends of the iterator.
    #[test]
    fn iter_size_and_double_ended(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut os_iter = os_map.iter();
        let mut bt_iter = bt_map.iter();
        let mut front = true;
        loop {
            prop_assert_eq!(os_iter.len(), bt_iter.len());
            let (os_next, bt_next) = if front {
                (os_iter.next(), bt_iter.next())
            } else {
                (os_iter.next_back(), bt_iter.next_back())
            };
            prop_assert_eq!(os_next, bt_next);
            if os_next.is_none() {
                break;
            }
            front = !front;
        }
        prop_assert_eq!(os_iter.next(), None);
        prop_assert_eq!(os_iter.next_back(), None);
    }

    /// Tests get_mut and iter_mut against BTreeMap.
    #[test]
    fn mutation_through_references_matches_btreemap(entries in entries_strategy(), probes in proptest::collection::vec(key_strategy(), 100)) {
        let mut os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for probe in &probes {
            if let Some(value) = os_map.get_mut(probe) {
                *value = value.wrapping_add(1);
            }
            if let Some(value) = bt_map.get_mut(probe) {
                *value = value.wrapping_add(1);
            }
        }
        for ((os_k, os_v), (bt_k, bt_v)) in os_map.iter_mut().zip(bt_map.iter_mut()) {
            prop_assert_eq!(os_k, bt_k);
            *os_v = os_v.wrapping_mul(3);
            *bt_v = bt_v.wrapping_mul(3);
        }
        for value in os_map.values_mut() {
            *value ^= 1;
        }
        for value in bt_map.values_mut() {
            *value ^= 1;
        }
        prop_assert!(os_map.iter().eq(bt_map.iter()));
    }

    /// Later pairs replace earlier ones, as for a standard map.
    #[test]
    fn from_iter_and_extend_match_btreemap(first in entries_strategy(), second in entries_strategy()) {
        let mut os_map: AvlTreeMap<i64, i64> = first.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = first.iter().copied().collect();
        prop_assert!(os_map.iter().eq(bt_map.iter()));

        os_map.extend(second.iter().copied());
        bt_map.extend(second.iter().copied());
        prop_assert!(os_map.iter().eq(bt_map.iter()));
        check_invariants(&os_map, true);
    }

    /// Equal contents compare and hash equal regardless of tree shape.
    #[test]
    fn eq_and_hash_ignore_shape(entries in entries_strategy()) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let bst_map: BstMap<i64, i64> = entries.iter().copied().collect();
        let mut descending: Vec<(i64, i64)> = bst_map.into_iter().collect();
        descending.reverse();
        let reshaped: AvlTreeMap<i64, i64> = descending.into_iter().collect();

        prop_assert_eq!(&os_map, &reshaped);
        prop_assert_eq!(os_map.clone(), reshaped.clone());
        let hasher = FixedState::default();
        prop_assert_eq!(hasher.hash_one(&os_map), hasher.hash_one(&reshaped));
    }

    /// Tests Index<&Q> against BTreeMap.
    #[test]
    fn index_by_key_matches_btreemap(entries in entries_strategy()) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        for (k, v) in &bt_map {
            prop_assert_eq!(os_map[k], *v);
        }
    }

    /// Clearing releases everything and leaves a usable map.
    #[test]
    fn clear_empties_map(entries in entries_strategy()) {
        let mut os_map: AvlTreeMap<i64, i64> = entries.into_iter().collect();
        os_map.clear();
        prop_assert!(os_map.is_empty());
        prop_assert_eq!(os_map.iter().next(), None);
        os_map.insert(1, 1)?;
        prop_assert_eq!(os_map.len(), 1);
    }
}

// ─── Order-statistic operations ──────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Tests get_by_rank and value_at_rank against a sorted Vec oracle.
    #[test]
    fn get_by_rank_matches_vec(entries in entries_strategy()) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<(i64, i64)> = BTreeMap::from_iter(entries.iter().copied())
            .into_iter()
            .collect();

        prop_assert_eq!(os_map.len(), sorted.len());
        for (rank, (ek, ev)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.get_by_rank(rank), Some((ek, ev)), "get_by_rank({})", rank);
            prop_assert_eq!(os_map.value_at_rank(rank), Ok(ev), "value_at_rank({})", rank);
        }

        let len = sorted.len();
        prop_assert_eq!(os_map.get_by_rank(len), None);
        prop_assert_eq!(
            os_map.value_at_rank(len + 100),
            Err(Error::IndexOutOfRange { start: len + 100, end: len + 100, len })
        );
    }

    /// Tests rank_of against a sorted Vec oracle.
    #[test]
    fn rank_of_matches_vec(entries in entries_strategy()) {
        let os_map: BstMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<i64> = BTreeMap::from_iter(entries.iter().copied()).into_keys().collect();

        for (expected_rank, k) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.rank_of(k), Some(expected_rank), "rank_of({})", k);
        }
        for probe in [i64::MIN, i64::MAX, 99_999, -99_999] {
            prop_assert_eq!(os_map.rank_of(&probe), None, "rank_of({}) should be None", probe);
        }
    }

    /// Tests range_between against slices of a sorted Vec oracle.
    #[test]
    fn range_between_matches_slices(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        bounds in proptest::collection::vec((0usize..520, 0usize..520), 50),
    ) {
        let os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let values: Vec<i64> = BTreeMap::from_iter(entries.iter().copied()).into_values().collect();
        let len = values.len();

        for (start, end) in bounds {
            let result = os_map.range_between(start, end);
            if start <= end && end < len {
                let expected: Vec<&i64> = values[start..=end].iter().collect();
                prop_assert_eq!(result, Ok(expected), "range_between({}, {})", start, end);
            } else {
                prop_assert_eq!(result, Err(Error::IndexOutOfRange { start, end, len }));
            }
        }
    }

    /// Tests Index<Rank> and IndexMut<Rank>, and get_by_rank_mut.
    #[test]
    fn index_by_rank_matches_vec(entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut os_map: AvlTreeMap<i64, i64> = entries.iter().copied().collect();
        let sorted: Vec<(i64, i64)> = BTreeMap::from_iter(entries.iter().copied())
            .into_iter()
            .collect();

        for (rank, (_, expected_v)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map[Rank(rank)], *expected_v, "Index[Rank({})]", rank);
        }

        os_map[Rank(0)] = 42;
        prop_assert_eq!(os_map.get(&sorted[0].0), Some(&42));

        let last = sorted.len() - 1;
        if let Some((key, value)) = os_map.get_by_rank_mut(last) {
            prop_assert_eq!(*key, sorted[last].0);
            *value = -1;
        }
        prop_assert_eq!(os_map.last_key_value(), Some((&sorted[last].0, &-1)));
    }

    /// Tests order-statistic operations after a mix of inserts and removes.
    #[test]
    fn order_stats_after_mutations(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let (os_map, bt_map) = replay::<Avl>(&ops)?;
        let sorted: Vec<(i64, i64)> = bt_map.into_iter().collect();

        for (pos, (k, v)) in sorted.iter().enumerate() {
            prop_assert_eq!(os_map.get_by_rank(pos), Some((k, v)), "get_by_rank({}) after mutations", pos);
            prop_assert_eq!(os_map.rank_of(k), Some(pos), "rank_of after mutations at pos {}", pos);
        }
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

mod scenarios {
    use super::*;
    use pretty_assertions::assert_eq;

    fn five_keys() -> AvlTreeMap<i32, String> {
        let mut map = AvlTreeMap::new();
        for key in [5, 3, 8, 1, 4] {
            map.insert(key, format!("v{key}")).unwrap();
        }
        map
    }

    fn drawing<B>(map: &OSTreeMap<i32, String, B>) -> String {
        let mut out = String::new();
        map.draw(&mut out).unwrap();
        out
    }

    #[test]
    fn in_order_keys_are_sorted() {
        let map = five_keys();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn ascending_inserts_rotate_left_once() {
        let mut map = AvlTreeMap::new();
        for key in [10, 20, 30] {
            map.insert(key, key.to_string()).unwrap();
        }

        let root = map.root().unwrap();
        assert_eq!((*root.key(), root.height()), (20, 2));
        let left = root.left().unwrap();
        let right = root.right().unwrap();
        assert_eq!((*left.key(), left.height()), (10, 1));
        assert_eq!((*right.key(), right.height()), (30, 1));
        assert_eq!(drawing(&map), "20\n╟─10\n╙─30\n");
    }

    #[test]
    fn range_between_returns_values_by_rank() {
        let map = five_keys();
        assert_eq!(map.range_between(1, 3), Ok(vec![&"v3".to_string(), &"v4".to_string(), &"v5".to_string()]));
    }

    #[test]
    fn deleting_two_child_node_moves_successor_up() {
        let mut map = five_keys();
        let root = map.root().unwrap();
        assert_eq!(*root.key(), 5);
        assert_eq!(root.successor().map(|node| *node.key()), Some(8));

        assert_eq!(map.remove(&5), Ok("v5".to_string()));

        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3, 4, 8]);
        assert_eq!(map.len(), 4);
        assert_eq!(map.get(&8), Some(&"v8".to_string()));
        check_shape(&map);
    }

    #[test]
    fn duplicate_insert_leaves_tree_unchanged() {
        let mut map = five_keys();
        let before = map.clone();
        let drawn = drawing(&map);

        assert_eq!(map.insert(5, "other".to_string()), Err(Error::DuplicateKey));

        assert_eq!(map, before);
        assert_eq!(drawing(&map), drawn);
        assert_eq!(map[&5], "v5");
    }

    #[test]
    fn missing_keys_are_reported() {
        let mut map = five_keys();
        assert_eq!(map.remove(&7), Err(Error::KeyNotFound));
        assert_eq!(map.try_get(&7), Err(Error::KeyNotFound));
        assert_eq!(map.remove_entry(&1), Ok((1, "v1".to_string())));
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn rank_queries_on_empty_map_fail() {
        let map: AvlTreeMap<i32, String> = AvlTreeMap::new();
        assert_eq!(map.value_at_rank(0), Err(Error::IndexOutOfRange { start: 0, end: 0, len: 0 }));
        assert_eq!(map.range_between(0, 0), Err(Error::IndexOutOfRange { start: 0, end: 0, len: 0 }));
        assert_eq!(map.get_by_rank(0), None);
        assert_eq!(drawing(&map), "");
    }

    #[test]
    fn reversed_range_is_rejected() {
        let map = five_keys();
        assert_eq!(map.range_between(3, 1), Err(Error::IndexOutOfRange { start: 3, end: 1, len: 5 }));
        assert_eq!(map.range_between(0, 5), Err(Error::IndexOutOfRange { start: 0, end: 5, len: 5 }));
        assert_eq!(map.range_between(0, 4).map(|values| values.len()), Ok(5));
    }

    #[test]
    fn try_from_rejects_duplicates() {
        let map = AvlTreeMap::try_from([(2, "b"), (1, "a"), (3, "c")]).unwrap();
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b", 3: "c"}"#);

        let duplicate = BstMap::try_from([(1, "a"), (2, "b"), (1, "c")]);
        assert_eq!(duplicate, Err(Error::DuplicateKey));
    }

    #[test]
    fn pops_drain_in_order() {
        let mut map = five_keys();
        assert_eq!(map.pop_first().map(|(k, _)| k), Some(1));
        assert_eq!(map.pop_last().map(|(k, _)| k), Some(8));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 4, 5]);
        check_shape(&map);
    }

    #[test]
    fn errors_render_readably() {
        assert_eq!(Error::DuplicateKey.to_string(), "key is already present in the tree");
        assert_eq!(
            Error::IndexOutOfRange { start: 1, end: 7, len: 5 }.to_string(),
            "rank range 1..=7 is out of range for a tree of 5 elements"
        );
    }

    fn check_shape(map: &AvlTreeMap<i32, String>) {
        fn walk(node: Option<NodeRef<'_, i32, String>>) -> usize {
            node.map_or(0, |node| {
                let left = walk(node.left());
                let right = walk(node.right());
                assert!(left.abs_diff(right) <= 1, "node {} out of balance", node.key());
                assert_eq!(node.height(), 1 + left.max(right));
                node.height()
            })
        }
        walk(map.root());
    }
}

// ─── Iterator surface ────────────────────────────────────────────────────────

#[test]
fn iterator_types_are_well_formed() {
    let mut map: AvlTreeMap<i32, i32> = (1..=3).map(|k| (k, k * 10)).collect();

    {
        let iter = map.iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        assert_eq!(format!("{iter:?}"), "[(1, 10), (2, 20), (3, 30)]");

        let keys = map.keys();
        assert_eq!(keys.len(), 3);
        assert_eq!(format!("{keys:?}"), "[1, 2, 3]");

        let values = map.values();
        assert_eq!(values.clone().next_back(), Some(&30));
        assert_eq!(format!("{values:?}"), "[10, 20, 30]");
    }

    {
        let mut iter_mut = map.iter_mut();
        assert_eq!(iter_mut.len(), 3);
        iter_mut.next();
        assert_eq!(iter_mut.len(), 2);
        let _ = format!("{iter_mut:?}");
    }

    {
        let values_mut = map.values_mut();
        assert_eq!(values_mut.size_hint(), (3, Some(3)));
        let _ = format!("{values_mut:?}");
    }

    for (_, value) in &mut map {
        *value += 1;
    }
    assert_eq!((&map).into_iter().map(|(_, v)| *v).sum::<i32>(), 63);

    let mut into_iter = map.clone().into_iter();
    assert_eq!(into_iter.next(), Some((1, 11)));
    assert_eq!(into_iter.len(), 2);
    let _ = format!("{into_iter:?}");

    let empty_iter: ostree_map::Iter<'_, i32, i32> = Default::default();
    assert_eq!(empty_iter.len(), 0);
    let empty_iter_mut: ostree_map::IterMut<'_, i32, i32> = Default::default();
    assert_eq!(empty_iter_mut.len(), 0);
    let mut empty_into_iter: ostree_map::IntoIter<i32, i32> = Default::default();
    assert_eq!(empty_into_iter.next(), None);
    let empty_keys: ostree_map::Keys<'_, i32, i32> = Default::default();
    assert_eq!(empty_keys.len(), 0);
    let empty_values: ostree_map::Values<'_, i32, i32> = Default::default();
    assert_eq!(empty_values.len(), 0);
    let empty_values_mut: ostree_map::ValuesMut<'_, i32, i32> = Default::default();
    assert_eq!(empty_values_mut.len(), 0);
}

#[test]
fn iterators_are_fused() {
    let map: AvlTreeMap<i32, ()> = [(1, ())].into_iter().collect();
    let mut iter = map.iter();
    assert_eq!(iter.next(), Some((&1, &())));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next_back(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn partial_traversals_restart_fresh() {
    let map: AvlTreeMap<i32, ()> = (0..100).map(|k| (k, ())).collect();
    let mut first = map.keys();
    for _ in 0..40 {
        first.next();
    }
    drop(first);
    assert_eq!(map.keys().next(), Some(&0));
    assert_eq!(map.keys().nth(40), Some(&40));
}

#[test]
fn maps_order_lexicographically() {
    let small: AvlTreeMap<i32, i32> = [(1, 1), (2, 2)].into_iter().collect();
    let large: AvlTreeMap<i32, i32> = [(1, 1), (3, 0)].into_iter().collect();
    assert!(small < large);
    assert_eq!(small.cmp(&small.clone()), std::cmp::Ordering::Equal);
}

#[test]
fn lookups_accept_borrowed_keys() {
    let mut map: AvlTreeMap<String, usize> = AvlTreeMap::new();
    map.insert("alpha".to_string(), 1).unwrap();
    map.insert("beta".to_string(), 2).unwrap();

    assert_eq!(map.get("beta"), Some(&2));
    assert!(map.contains_key("alpha"));
    assert_eq!(map.rank_of("beta"), Some(1));
    assert_eq!(map["alpha"], 1);
    assert_eq!(map.remove("alpha"), Ok(1));
}
