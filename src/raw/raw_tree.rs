use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt::{self, Display, Write};
use core::marker::PhantomData;
use core::mem;

use tracing::{debug, trace};

use super::balance::Balance;
use super::inorder::{InOrder, InOrderMut, IntoInOrder};
use super::node::{self, Link, Node};
use crate::error::{Error, Result};

/// The core binary search tree backing `OSTreeMap`.
///
/// Mutations descend recursively through owned child slots. On the way back up every
/// slot on the path is handed to the policy `B`, which refreshes the cached height and
/// size and may rotate, writing the new subtree root back into the slot.
pub(crate) struct RawTree<K, V, B> {
    /// Root of the tree; its cached size is the element count.
    root: Link<K, V>,
    policy: PhantomData<B>,
}

impl<K, V, B> RawTree<K, V, B> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            root: None,
            policy: PhantomData,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        node::size(&self.root)
    }

    /// Returns true if the tree contains no elements.
    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the root node, if any.
    pub(crate) fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }

    /// Releases every node without recursing, so arbitrarily deep trees are safe to clear.
    pub(crate) fn clear(&mut self) {
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }

    pub(crate) fn in_order(&self) -> InOrder<'_, K, V> {
        InOrder::new(&self.root, self.len())
    }

    pub(crate) fn in_order_mut(&mut self) -> InOrderMut<'_, K, V> {
        let len = self.len();
        InOrderMut::new(&mut self.root, len)
    }

    pub(crate) fn into_in_order(mut self) -> IntoInOrder<K, V> {
        let len = self.len();
        IntoInOrder::new(self.root.take(), len)
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<&Node<K, V>> {
        self.root().map(Node::minimum)
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<&Node<K, V>> {
        self.root().map(Node::maximum)
    }

    /// Returns the node at zero-based rank `index`.
    pub(crate) fn select(&self, index: usize) -> Option<&Node<K, V>> {
        self.root()?.select(index)
    }

    /// Returns the node at zero-based rank `index`, mutably.
    pub(crate) fn select_mut(&mut self, index: usize) -> Option<&mut Node<K, V>> {
        self.root.as_deref_mut()?.select_mut(index)
    }

    /// Returns the value at zero-based rank `index`.
    pub(crate) fn value_at_rank(&self, index: usize) -> Result<&V> {
        self.select(index).map(|node| &node.value).ok_or_else(|| {
            let len = self.len();
            debug!(index, len, "rank out of range");
            Error::out_of_range(index, index, len)
        })
    }

    /// Returns the values at ranks `start..=end`, in rank order, one rank lookup each.
    pub(crate) fn range_between(&self, start: usize, end: usize) -> Result<Vec<&V>> {
        let len = self.len();
        if start > end || end >= len {
            debug!(start, end, len, "rank range out of range");
            return Err(Error::out_of_range(start, end, len));
        }
        (start..=end).map(|index| self.value_at_rank(index)).collect()
    }

    /// Writes the tree structure to `out`, one node per line in pre-order.
    pub(crate) fn draw<W: Write>(&self, out: &mut W) -> fmt::Result
    where
        K: Display,
    {
        match self.root() {
            Some(root) => draw_subtree(Some(root), &mut String::new(), "", out),
            None => Ok(()),
        }
    }
}

impl<K: Ord, V, B: Balance> RawTree<K, V, B> {
    /// Returns the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root()?.search(key)
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.search(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root.as_deref_mut()?.search_mut(key).map(|node| &mut node.value)
    }

    /// Returns the rank of `key`, if present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.root()?.rank_of(key)
    }

    /// Inserts a new key. Fails with [`Error::DuplicateKey`], leaving the tree untouched,
    /// if the key is already present.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<()> {
        insert_at::<K, V, B>(&mut self.root, key, value).inspect_err(|error| debug!(%error, "insert rejected"))
    }

    /// Inserts a key, or overwrites the value of an existing key and returns the old one.
    pub(crate) fn replace(&mut self, key: K, value: V) -> Result<Option<V>> {
        if let Some(current) = self.get_mut(&key) {
            return Ok(Some(mem::replace(current, value)));
        }
        insert_at::<K, V, B>(&mut self.root, key, value)?;
        Ok(None)
    }

    /// Removes `key`, returning the stored pair. Fails with [`Error::KeyNotFound`],
    /// leaving the tree untouched, if the key is absent.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        remove_at::<K, V, B, Q>(&mut self.root, key).inspect_err(|error| debug!(%error, "remove rejected"))
    }

    /// Removes the entry with the smallest key.
    pub(crate) fn pop_first(&mut self) -> Result<Option<(K, V)>> {
        if self.root.is_none() {
            return Ok(None);
        }
        let node = remove_min::<K, V, B>(&mut self.root)?;
        Ok(Some(into_entry(node)))
    }

    /// Removes the entry with the largest key.
    pub(crate) fn pop_last(&mut self) -> Result<Option<(K, V)>> {
        if self.root.is_none() {
            return Ok(None);
        }
        let node = remove_max::<K, V, B>(&mut self.root)?;
        Ok(Some(into_entry(node)))
    }
}

fn into_entry<K, V>(node: Box<Node<K, V>>) -> (K, V) {
    let Node { key, value, .. } = *node;
    (key, value)
}

fn insert_at<K: Ord, V, B: Balance>(slot: &mut Link<K, V>, key: K, value: V) -> Result<()> {
    let Some(node) = slot.as_deref_mut() else {
        *slot = Some(Box::new(Node::leaf(key, value)));
        return Ok(());
    };
    match key.cmp(&node.key) {
        Ordering::Less => insert_at::<K, V, B>(&mut node.left, key, value)?,
        Ordering::Greater => insert_at::<K, V, B>(&mut node.right, key, value)?,
        Ordering::Equal => return Err(Error::DuplicateKey),
    }
    B::rebalance(slot)
}

fn remove_at<K, V, B, Q>(slot: &mut Link<K, V>, key: &Q) -> Result<(K, V)>
where
    K: Borrow<Q>,
    Q: ?Sized + Ord,
    B: Balance,
{
    let Some(node) = slot.as_deref_mut() else {
        return Err(Error::KeyNotFound);
    };
    let removed = match key.cmp(node.key.borrow()) {
        Ordering::Less => remove_at::<K, V, B, Q>(&mut node.left, key)?,
        Ordering::Greater => remove_at::<K, V, B, Q>(&mut node.right, key)?,
        Ordering::Equal if node.left.is_some() && node.right.is_some() => {
            // Two children: the successor's pair moves up into this node and the
            // successor's own node, which has no left child, is spliced out.
            let successor = remove_min::<K, V, B>(&mut node.right)?;
            trace!(successor_size = successor.size(), "spliced out successor");
            let (next_key, next_value) = into_entry(successor);
            (mem::replace(&mut node.key, next_key), mem::replace(&mut node.value, next_value))
        }
        Ordering::Equal => return Ok(unlink(slot)),
    };
    B::rebalance(slot)?;
    Ok(removed)
}

/// Detaches the node in `slot`, which has at most one child, promoting that child.
///
/// The promoted subtree's cached fields are already correct.
fn unlink<K, V>(slot: &mut Link<K, V>) -> (K, V) {
    match slot.take() {
        Some(mut node) => {
            *slot = node.left.take().or_else(|| node.right.take());
            into_entry(node)
        }
        None => unreachable!("`unlink()` - slot is empty!"),
    }
}

fn remove_min<K, V, B: Balance>(slot: &mut Link<K, V>) -> Result<Box<Node<K, V>>> {
    let Some(node) = slot.as_deref_mut() else {
        return Err(Error::KeyNotFound);
    };
    if node.left.is_some() {
        let min = remove_min::<K, V, B>(&mut node.left)?;
        B::rebalance(slot)?;
        return Ok(min);
    }
    let Some(mut min) = slot.take() else {
        return Err(Error::KeyNotFound);
    };
    *slot = min.right.take();
    Ok(min)
}

fn remove_max<K, V, B: Balance>(slot: &mut Link<K, V>) -> Result<Box<Node<K, V>>> {
    let Some(node) = slot.as_deref_mut() else {
        return Err(Error::KeyNotFound);
    };
    if node.right.is_some() {
        let max = remove_max::<K, V, B>(&mut node.right)?;
        B::rebalance(slot)?;
        return Ok(max);
    }
    let Some(mut max) = slot.take() else {
        return Err(Error::KeyNotFound);
    };
    *slot = max.left.take();
    Ok(max)
}

fn draw_subtree<K: Display, V, W: Write>(
    node: Option<&Node<K, V>>,
    prefix: &mut String,
    connector: &str,
    out: &mut W,
) -> fmt::Result {
    // The last column pair of the prefix is replaced by this line's connector.
    let cut = prefix.char_indices().rev().nth(1).map_or(0, |(index, _)| index);
    let lead = &prefix[..cut];
    let Some(node) = node else {
        return writeln!(out, "{lead}{connector}");
    };
    writeln!(out, "{lead}{connector}{}", node.key)?;
    if node.is_leaf() {
        return Ok(());
    }

    let mark = prefix.len();
    prefix.push_str("║ ");
    draw_subtree(node.left.as_deref(), prefix, "╟─", out)?;
    prefix.truncate(mark);
    prefix.push_str("  ");
    draw_subtree(node.right.as_deref(), prefix, "╙─", out)?;
    prefix.truncate(mark);
    Ok(())
}

impl<K, V, B> Drop for RawTree<K, V, B> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone, V: Clone, B> Clone for RawTree<K, V, B> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            policy: PhantomData,
        }
    }
}
