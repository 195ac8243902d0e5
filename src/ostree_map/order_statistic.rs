use alloc::vec::Vec;
use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::OSTreeMap;
use crate::Rank;
use crate::error::Result;
use crate::raw::Balance;

impl<K, V, B> OSTreeMap<K, V, B> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// The search starts at the root and compares `rank` with the size of the left
    /// subtree at each node: equal means found, smaller means go left, larger means
    /// skip the left subtree and the node itself and go right.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert("a", 10).unwrap();
    /// map.insert("c", 30).unwrap();
    /// map.insert("b", 20).unwrap();
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank).map(|node| (&node.key, &node.value))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(5, "b").unwrap();
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.select_mut(rank).map(|node| (&node.key, &mut node.value))
    }

    /// Returns the value at position `rank` in sorted order.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if `rank >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::{AvlTreeMap, Error};
    ///
    /// let map = AvlTreeMap::try_from([(30, "c"), (10, "a"), (20, "b")]).unwrap();
    /// assert_eq!(map.value_at_rank(2), Ok(&"c"));
    /// assert!(matches!(map.value_at_rank(3), Err(Error::IndexOutOfRange { .. })));
    /// ```
    pub fn value_at_rank(&self, rank: usize) -> Result<&V> {
        self.raw.value_at_rank(rank)
    }

    /// Returns the values at ranks `start..=end`, in key order.
    ///
    /// Both bounds are inclusive and must satisfy `start <= end < len`; anything else,
    /// including any call on an empty map, is rejected rather than clamped.
    ///
    /// # Errors
    ///
    /// [`Error::IndexOutOfRange`](crate::Error::IndexOutOfRange) if the bounds are
    /// reversed or reach past the last entry.
    ///
    /// # Complexity
    ///
    /// O(k log n) for k = `end - start + 1` values, one rank lookup each.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::{Error, OSTreeMap};
    ///
    /// let mut map = OSTreeMap::new();
    /// for key in [10, 20, 30, 40, 50] {
    ///     map.insert(key, key * 10).unwrap();
    /// }
    ///
    /// assert_eq!(map.range_between(1, 3), Ok(vec![&200, &300, &400]));
    /// assert_eq!(map.range_between(4, 4), Ok(vec![&500]));
    /// assert_eq!(
    ///     map.range_between(3, 5),
    ///     Err(Error::IndexOutOfRange { start: 3, end: 5, len: 5 })
    /// );
    /// ```
    pub fn range_between(&self, start: usize, end: usize) -> Result<Vec<&V>> {
        self.raw.range_between(start, end)
    }
}

impl<K: Ord, V, B: Balance> OSTreeMap<K, V, B> {
    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(20, "b").unwrap();
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ordstat_tree::{AvlTreeMap, Rank};
///
/// let map = AvlTreeMap::try_from([("a", 1), ("b", 2)]).unwrap();
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, B> Index<Rank> for OSTreeMap<K, V, B> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use ordstat_tree::{AvlTreeMap, Rank};
///
/// let mut map = AvlTreeMap::try_from([("a", 1), ("b", 2)]).unwrap();
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, B> IndexMut<Rank> for OSTreeMap<K, V, B> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
