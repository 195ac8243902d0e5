/// A zero-based rank into the sorted order of a map.
///
/// Rank 0 is the entry with the smallest key and rank `len - 1` the one with the
/// largest. Indexing a map with a `Rank` panics when the rank is out of range; use
/// [`get_by_rank`](crate::OSTreeMap::get_by_rank) or
/// [`value_at_rank`](crate::OSTreeMap::value_at_rank) for a fallible lookup.
///
/// # Examples
///
/// ```
/// use ordstat_tree::{OSTreeMap, Rank};
///
/// let mut map = OSTreeMap::new();
/// map.insert("a", 10).unwrap();
/// map.insert("b", 20).unwrap();
///
/// assert_eq!(map[Rank(0)], 10);
/// map[Rank(1)] += 1;
/// assert_eq!(map[&"b"], 21);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
