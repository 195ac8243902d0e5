use alloc::boxed::Box;
use core::borrow::Borrow;
use core::cmp::Ordering;

/// An owned child slot. Every node has exactly one owner.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A tree cell augmented with the height and size of the subtree it roots.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    // Nodes on the longest downward path, counting this one.
    height: usize,
    // Nodes in the subtree rooted here.
    size: usize,
}

/// Height of a possibly absent subtree.
#[inline]
pub(crate) fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Size of a possibly absent subtree.
#[inline]
pub(crate) fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.size)
}

impl<K, V> Node<K, V> {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
            size: 1,
        }
    }

    #[inline]
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Recomputes the cached height and size from the children.
    ///
    /// The children's cached fields must already be correct.
    #[inline]
    pub(crate) fn update(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
        self.size = 1 + size(&self.left) + size(&self.right);
    }

    /// Returns `height(right) - height(left)`.
    #[allow(clippy::cast_possible_wrap)]
    pub(crate) fn balance_factor(&self) -> isize {
        height(&self.right) as isize - height(&self.left) as isize
    }

    /// Returns the node holding the smallest key in this subtree.
    pub(crate) fn minimum(&self) -> &Self {
        let mut current = self;
        while let Some(left) = current.left.as_deref() {
            current = left;
        }
        current
    }

    /// Returns the node holding the largest key in this subtree.
    pub(crate) fn maximum(&self) -> &Self {
        let mut current = self;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        current
    }

    /// Returns the node holding the smallest key greater than this node's key within
    /// this subtree, i.e. the minimum of the right subtree.
    pub(crate) fn successor(&self) -> Option<&Self> {
        self.right.as_deref().map(Node::minimum)
    }

    /// Returns the node at zero-based in-order position `index` within this subtree.
    pub(crate) fn select(&self, index: usize) -> Option<&Self> {
        let mut current = self;
        let mut remaining = index;
        loop {
            let left_size = size(&current.left);
            match remaining.cmp(&left_size) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = current.left.as_deref()?,
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = current.right.as_deref()?;
                }
            }
        }
    }

    /// Mutable counterpart of [`select`](Self::select).
    pub(crate) fn select_mut(&mut self, index: usize) -> Option<&mut Self> {
        let mut current = self;
        let mut remaining = index;
        loop {
            let left_size = size(&current.left);
            match remaining.cmp(&left_size) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current = current.left.as_deref_mut()?,
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = current.right.as_deref_mut()?;
                }
            }
        }
    }

    /// Finds the node holding `key` in this subtree.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<&Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self;
        loop {
            current = match key.cmp(current.key.borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current.left.as_deref()?,
                Ordering::Greater => current.right.as_deref()?,
            };
        }
    }

    /// Mutable counterpart of [`search`](Self::search).
    pub(crate) fn search_mut<Q>(&mut self, key: &Q) -> Option<&mut Self>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self;
        loop {
            current = match key.cmp(current.key.borrow()) {
                Ordering::Equal => return Some(current),
                Ordering::Less => current.left.as_deref_mut()?,
                Ordering::Greater => current.right.as_deref_mut()?,
            };
        }
    }

    /// Returns the in-order position of `key` within this subtree.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self;
        let mut rank = 0;
        loop {
            current = match key.cmp(current.key.borrow()) {
                Ordering::Equal => return Some(rank + size(&current.left)),
                Ordering::Less => current.left.as_deref()?,
                Ordering::Greater => {
                    rank += size(&current.left) + 1;
                    current.right.as_deref()?
                }
            };
        }
    }
}
