use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::Index;

use tracing::debug;

use crate::error::{Error, Result};
use crate::raw::{Avl, Balance, InOrder, InOrderMut, IntoInOrder, RawTree, Unbalanced};

mod node_ref;
mod order_statistic;

pub use node_ref::NodeRef;

/// An ordered map based on an order-statistic [AVL tree].
///
/// Given a key type with a [total order], the map stores its entries in key order and
/// answers both keyed queries and rank queries ("the 3rd smallest entry") in O(log n).
/// Every node caches the height and the size of the subtree below it; the sizes turn
/// rank lookups into a single root-to-node descent.
///
/// The balancing policy `B` decides what happens on the way back up after a mutation:
///
/// - [`Avl`] (the default, see [`AvlTreeMap`]) rotates nodes so that the two subtrees of
///   every node differ in height by at most one.
/// - [`Unbalanced`] (see [`BstMap`]) never rotates; the tree's shape follows insertion
///   order, as in a textbook binary search tree.
///
/// Unlike the standard library's maps, [`insert`](OSTreeMap::insert) refuses to overwrite
/// an existing key and [`remove`](OSTreeMap::remove) reports a missing key as an
/// [`Error`]. Use [`replace`](OSTreeMap::replace) for insert-or-overwrite.
///
/// It is a logic error for a key to be modified in such a way that the key's ordering relative to
/// any other key, as determined by the [`Ord`] trait, changes while it is in the map.
///
/// # Examples
///
/// ```
/// use ordstat_tree::{Error, OSTreeMap};
///
/// let mut stock = OSTreeMap::new();
/// stock.insert(3, "copper").unwrap();
/// stock.insert(1, "iron").unwrap();
/// stock.insert(2, "gold").unwrap();
///
/// assert_eq!(stock.insert(2, "silver"), Err(Error::DuplicateKey));
/// assert_eq!(stock.get(&2), Some(&"gold"));
///
/// // Ranks are zero-based positions in key order.
/// assert_eq!(stock.get_by_rank(0), Some((&1, &"iron")));
/// assert_eq!(stock.range_between(1, 2), Ok(vec![&"gold", &"copper"]));
///
/// assert_eq!(stock.remove(&1), Ok("iron"));
/// assert_eq!(stock.remove(&1), Err(Error::KeyNotFound));
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
pub struct OSTreeMap<K, V, B = Avl> {
    raw: RawTree<K, V, B>,
}

/// An [`OSTreeMap`] kept height-balanced by AVL rotations.
pub type AvlTreeMap<K, V> = OSTreeMap<K, V, Avl>;

/// An [`OSTreeMap`] that never rebalances: a plain binary search tree.
pub type BstMap<K, V> = OSTreeMap<K, V, Unbalanced>;

/// An iterator over the entries of an `OSTreeMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`OSTreeMap`].
///
/// [`iter`]: OSTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    inner: InOrder<'a, K, V>,
}

/// A mutable iterator over the entries of an `OSTreeMap`, in key order.
///
/// This `struct` is created by the [`iter_mut`] method on [`OSTreeMap`].
///
/// [`iter_mut`]: OSTreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    inner: InOrderMut<'a, K, V>,
}

/// An owning iterator over the entries of an `OSTreeMap`, in key order.
///
/// This `struct` is created by the [`into_iter`] method on [`OSTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: IntoInOrder<K, V>,
}

/// An iterator over the keys of an `OSTreeMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`OSTreeMap`].
///
/// [`keys`]: OSTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `OSTreeMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`OSTreeMap`].
///
/// [`values`]: OSTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of an `OSTreeMap`, in key order.
///
/// This `struct` is created by the [`values_mut`] method on [`OSTreeMap`].
///
/// [`values_mut`]: OSTreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> OSTreeMap<K, V> {
    /// Makes a new, empty AVL-balanced `OSTreeMap`.
    ///
    /// Does not allocate anything on its own. Maps with another policy are made with
    /// [`with_policy`](OSTreeMap::with_policy) or [`Default`].
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_policy()
    }
}

impl<K, V, B> OSTreeMap<K, V, B> {
    /// Makes a new, empty `OSTreeMap` balanced by policy `B`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::BstMap;
    ///
    /// let mut map: BstMap<i32, &str> = BstMap::with_policy();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    #[must_use]
    pub const fn with_policy() -> Self {
        OSTreeMap { raw: RawTree::new() }
    }

    /// Returns the number of elements in the map.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut a = OSTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a").unwrap();
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut a = OSTreeMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a").unwrap();
    /// assert!(!a.is_empty());
    /// ```
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the map, removing all elements.
    ///
    /// Nodes are released with an explicit stack, so clearing never recurses, whatever
    /// the tree's height.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the first key-value pair in the map. The key in this pair is the minimum
    /// key in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::try_from([(2, "b"), (1, "a")]).unwrap();
    /// assert_eq!(map.first_key_value(), Some((&1, &"a")));
    /// ```
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.first().map(|node| (&node.key, &node.value))
    }

    /// Returns the last key-value pair in the map. The key in this pair is the maximum
    /// key in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.last().map(|node| (&node.key, &node.value))
    }

    /// Returns a read-only view of the root node, from which the tree's structure can be
    /// walked. Returns `None` for an empty map.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// for key in [10, 20, 30] {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// // Ascending inserts rotate 20 up to the root.
    /// let root = map.root().unwrap();
    /// assert_eq!((*root.key(), root.height(), root.size()), (20, 2, 3));
    /// assert_eq!(root.left().map(|node| *node.key()), Some(10));
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<NodeRef<'_, K, V>> {
        self.raw.root().map(NodeRef::new)
    }

    /// Writes the shape of the tree to `out`, one node per line in pre-order.
    ///
    /// A child line starts with `╟─` for a left child and `╙─` for a right child,
    /// indented under its ancestors. A node with a single child still gets a line for the
    /// absent one.
    ///
    /// # Errors
    ///
    /// Returns an error if `out` does.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// for key in [10, 20, 30] {
    ///     map.insert(key, ()).unwrap();
    /// }
    ///
    /// let mut drawing = String::new();
    /// map.draw(&mut drawing).unwrap();
    /// assert_eq!(drawing, "20\n╟─10\n╙─30\n");
    /// ```
    pub fn draw<W: fmt::Write>(&self, out: &mut W) -> fmt::Result
    where
        K: fmt::Display,
    {
        self.raw.draw(out)
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// The iterator walks the tree with its own explicit stack. Calling `iter` again
    /// starts a fresh traversal; dropping one part-way needs no cleanup.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(3, "c").unwrap();
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    ///
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.raw.in_order(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::try_from([("a", 1), ("b", 2), ("c", 3)]).unwrap();
    ///
    /// // add 10 to the value if the key isn't "a"
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.raw.in_order_mut(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::OSTreeMap;
    ///
    /// let mut a = OSTreeMap::new();
    /// for key in [5, 3, 8, 1, 4] {
    ///     a.insert(key, ()).unwrap();
    /// }
    ///
    /// let keys: Vec<_> = a.keys().copied().collect();
    /// assert_eq!(keys, [1, 3, 4, 5, 8]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K: Ord, V, B: Balance> OSTreeMap<K, V, B> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
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
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a reference to the value corresponding to the key, failing with
    /// [`Error::KeyNotFound`] if it is absent.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the map does not contain `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::{Error, OSTreeMap};
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert("gold", 7).unwrap();
    /// assert_eq!(map.try_get("gold"), Ok(&7));
    /// assert_eq!(map.try_get("tin"), Err(Error::KeyNotFound));
    /// ```
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).map(|node| (&node.key, &node.value))
    }

    /// Returns a mutable reference to the value corresponding to the key.
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
    /// map.insert(1, "a").unwrap();
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map[&1], "b");
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
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
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.contains_key(&1), true);
    /// assert_eq!(map.contains_key(&2), false);
    /// ```
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// The new entry becomes a leaf; every node on the path back to the root then has
    /// its cached height and size refreshed and is rebalanced by the policy.
    ///
    /// # Errors
    ///
    /// [`Error::DuplicateKey`] if the key is already present. The map, including the
    /// stored value, is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::{Error, OSTreeMap};
    ///
    /// let mut map = OSTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), Ok(()));
    /// assert_eq!(map.insert(37, "b"), Err(Error::DuplicateKey));
    /// assert_eq!(map[&37], "a");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Result<()> {
        self.raw.insert(key, value)
    }

    /// Inserts a key-value pair, overwriting the value of an existing key.
    ///
    /// Returns the previous value if the key was present, like the standard library's
    /// `BTreeMap::insert`.
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
    /// assert_eq!(map.replace(37, "a"), None);
    /// assert_eq!(map.replace(37, "b"), Some("a"));
    /// assert_eq!(map[&37], "b");
    /// ```
    pub fn replace(&mut self, key: K, value: V) -> Option<V> {
        settled(self.raw.replace(key, value))
    }

    /// Removes a key from the map, returning the value at the key.
    ///
    /// A node with two children is not detached itself: its in-order successor's entry
    /// moves into it and the successor's node is removed instead.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent; the map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::{Error, OSTreeMap};
    ///
    /// let mut map = OSTreeMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// # Errors
    ///
    /// [`Error::KeyNotFound`] if the key is absent; the map is left unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key)
    }

    /// Removes and returns the first element in the map. The key of this element is the
    /// minimum key that was in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::AvlTreeMap;
    ///
    /// let mut map = AvlTreeMap::try_from([(1, "a"), (2, "b")]).unwrap();
    /// assert_eq!(map.pop_first(), Some((1, "a")));
    /// assert_eq!(map.pop_first(), Some((2, "b")));
    /// assert_eq!(map.pop_first(), None);
    /// ```
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        settled(self.raw.pop_first())
    }

    /// Removes and returns the last element in the map. The key of this element is the
    /// maximum key that was in the map.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        settled(self.raw.pop_last())
    }
}

/// Unwraps the result of a mutation behind an `Option`-returning method. Only a broken
/// height cache can make a rotation fail.
fn settled<T>(result: Result<Option<T>>) -> Option<T> {
    if let Err(error) = &result {
        debug!(%error, "mutation aborted on a corrupted tree");
    }
    debug_assert!(result.is_ok(), "mutation aborted on a corrupted tree: {:?}", result.as_ref().err());
    result.ok().flatten()
}

impl<K: Clone, V: Clone, B> Clone for OSTreeMap<K, V, B> {
    fn clone(&self) -> Self {
        OSTreeMap { raw: self.raw.clone() }
    }
}

impl<K: Hash, V: Hash, B> Hash for OSTreeMap<K, V, B> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (k, v) in self {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl<K: PartialEq, V: PartialEq, B> PartialEq for OSTreeMap<K, V, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Eq, V: Eq, B> Eq for OSTreeMap<K, V, B> {}

impl<K: PartialOrd, V: PartialOrd, B> PartialOrd for OSTreeMap<K, V, B> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord, V: Ord, B> Ord for OSTreeMap<K, V, B> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B> fmt::Debug for OSTreeMap<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, B> Default for OSTreeMap<K, V, B> {
    fn default() -> Self {
        OSTreeMap::with_policy()
    }
}

/// Builds a map from an iterator; a later pair replaces the value of an earlier pair with
/// the same key.
impl<K: Ord, V, B: Balance> FromIterator<(K, V)> for OSTreeMap<K, V, B> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = OSTreeMap::with_policy();
        map.extend(iter);
        map
    }
}

/// Extends the map; a pair whose key is already present replaces the stored value.
impl<K: Ord, V, B: Balance> Extend<(K, V)> for OSTreeMap<K, V, B> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.replace(k, v);
        }
    }
}

/// Builds a map from an array of distinct keys.
///
/// # Errors
///
/// [`Error::DuplicateKey`] if two pairs share a key.
///
/// # Examples
///
/// ```
/// use ordstat_tree::{AvlTreeMap, Error};
///
/// let map = AvlTreeMap::try_from([(1, "a"), (2, "b")]).unwrap();
/// assert_eq!(map.len(), 2);
///
/// let duplicate = AvlTreeMap::try_from([(1, "a"), (1, "b")]);
/// assert_eq!(duplicate, Err(Error::DuplicateKey));
/// ```
impl<K: Ord, V, B: Balance, const N: usize> TryFrom<[(K, V); N]> for OSTreeMap<K, V, B> {
    type Error = Error;

    fn try_from(arr: [(K, V); N]) -> Result<Self> {
        let mut map = OSTreeMap::with_policy();
        for (k, v) in arr {
            map.insert(k, v)?;
        }
        Ok(map)
    }
}

impl<'a, K, V, B> IntoIterator for &'a OSTreeMap<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, B> IntoIterator for &'a mut OSTreeMap<K, V, B> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, B> IntoIterator for OSTreeMap<K, V, B> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordstat_tree::AvlTreeMap;
    ///
    /// let map = AvlTreeMap::try_from([(2, "b"), (1, "a")]).unwrap();
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next(), Some((2, "b")));
    /// assert_eq!(iter.next(), None);
    /// ```
    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.into_in_order(),
        }
    }
}

impl<K, Q, V, B> Index<&Q> for OSTreeMap<K, V, B>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
    B: Balance,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<'a, K: 'a, V: 'a> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_node().map(|node| (&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.remaining();
        (remaining, Some(remaining))
    }
}

impl<'a, K: 'a, V: 'a> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back_node().map(|node| (&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.remaining()
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Iter<'_, K, V> {
    /// Creates an empty `ostree_map::Iter`.
    ///
    /// ```
    /// # use ordstat_tree::ostree_map;
    /// let iter: ostree_map::Iter<'_, u8, u8> = Default::default();
    /// assert_eq!(iter.len(), 0);
    /// ```
    fn default() -> Self {
        Iter {
            inner: InOrder::default(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.remaining();
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.remaining()
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> Default for IterMut<'_, K, V> {
    fn default() -> Self {
        IterMut {
            inner: InOrderMut::default(),
        }
    }
}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.inner.remaining()).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.inner.remaining();
        (remaining, Some(remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.remaining()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K, V> Default for IntoIter<K, V> {
    fn default() -> Self {
        IntoIter {
            inner: IntoInOrder::default(),
        }
    }
}

impl<K, V> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("remaining", &self.inner.remaining()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Keys<'_, K, V> {
    fn default() -> Self {
        Keys {
            inner: Iter::default(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V> Default for Values<'_, K, V> {
    fn default() -> Self {
        Values {
            inner: Iter::default(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

impl<K, V> Default for ValuesMut<'_, K, V> {
    fn default() -> Self {
        ValuesMut {
            inner: IterMut::default(),
        }
    }
}

impl<K, V> fmt::Debug for ValuesMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValuesMut").field("remaining", &self.inner.len()).finish()
    }
}
