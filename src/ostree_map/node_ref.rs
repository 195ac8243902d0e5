use core::fmt;

use crate::raw::Node;

/// A read-only view of one node of an [`OSTreeMap`](super::OSTreeMap).
///
/// Obtained from [`OSTreeMap::root`](super::OSTreeMap::root) and then by walking
/// [`left`](NodeRef::left) and [`right`](NodeRef::right). Each node knows the height and
/// the size of the subtree it roots, so structural properties can be inspected without
/// a traversal.
///
/// # Examples
///
/// ```
/// use ordstat_tree::AvlTreeMap;
///
/// let map = AvlTreeMap::try_from([(5, ()), (3, ()), (8, ()), (1, ())]).unwrap();
/// let root = map.root().unwrap();
///
/// assert_eq!(*root.key(), 5);
/// assert_eq!(*root.minimum().key(), 1);
/// assert_eq!(root.successor().map(|node| *node.key()), Some(8));
/// assert_eq!(root.balance_factor(), -1);
/// ```
pub struct NodeRef<'a, K, V> {
    node: &'a Node<K, V>,
}

impl<'a, K, V> NodeRef<'a, K, V> {
    pub(crate) const fn new(node: &'a Node<K, V>) -> Self {
        NodeRef { node }
    }

    #[must_use]
    pub const fn key(&self) -> &'a K {
        &self.node.key
    }

    #[must_use]
    pub const fn value(&self) -> &'a V {
        &self.node.value
    }

    /// The root of the left subtree, holding the smaller keys.
    #[must_use]
    pub fn left(&self) -> Option<NodeRef<'a, K, V>> {
        self.node.left.as_deref().map(NodeRef::new)
    }

    /// The root of the right subtree, holding the larger keys.
    #[must_use]
    pub fn right(&self) -> Option<NodeRef<'a, K, V>> {
        self.node.right.as_deref().map(NodeRef::new)
    }

    /// Number of nodes on the longest downward path from this node, counting itself.
    /// A leaf has height 1.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.node.height()
    }

    /// Number of nodes in the subtree rooted here, counting itself.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.node.size()
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.node.is_leaf()
    }

    /// Height of the right subtree minus height of the left subtree.
    ///
    /// In an AVL-balanced map this is always -1, 0 or 1.
    #[must_use]
    pub fn balance_factor(&self) -> isize {
        self.node.balance_factor()
    }

    /// The node holding the smallest key of this subtree.
    #[must_use]
    pub fn minimum(&self) -> NodeRef<'a, K, V> {
        NodeRef::new(self.node.minimum())
    }

    /// The node holding the largest key of this subtree.
    #[must_use]
    pub fn maximum(&self) -> NodeRef<'a, K, V> {
        NodeRef::new(self.node.maximum())
    }

    /// The minimum of the right subtree: the next larger key *within this subtree*.
    ///
    /// Returns `None` when there is no right subtree, even if an ancestor holds a
    /// larger key.
    #[must_use]
    pub fn successor(&self) -> Option<NodeRef<'a, K, V>> {
        self.node.successor().map(NodeRef::new)
    }
}

impl<K, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeRef<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("value", self.value())
            .field("height", &self.height())
            .field("size", &self.size())
            .finish()
    }
}
