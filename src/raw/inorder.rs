//! Explicit-stack in-order traversals.
//!
//! Each traversal keeps the nodes whose left subtrees are finished on a stack plus the
//! subtree still to be descended. Advancing pushes that subtree's left spine, pops the
//! top node, yields it, and continues with its right subtree. Nothing is shared between
//! traversals, so several can run over the same tree independently.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use super::node::{Link, Node};

// AVL height is below 1.45 * log2(n + 2), so 64 covers any tree that fits in memory.
// smallvec only implements `Array` for a fixed set of lengths; 64 is one of them.
// Tests keep the inline part tiny to exercise the spilled stack.
#[cfg(test)]
const INLINE_DEPTH: usize = 2;
#[cfg(not(test))]
const INLINE_DEPTH: usize = 64;

/// Shared traversal that can be advanced from both ends.
pub(crate) struct InOrder<'a, K, V> {
    front: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    front_pending: Option<&'a Node<K, V>>,
    back: SmallVec<[&'a Node<K, V>; INLINE_DEPTH]>,
    back_pending: Option<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> InOrder<'a, K, V> {
    pub(crate) fn new(root: &'a Link<K, V>, len: usize) -> Self {
        Self {
            front: SmallVec::new(),
            front_pending: root.as_deref(),
            back: SmallVec::new(),
            back_pending: root.as_deref(),
            remaining: len,
        }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next_node(&mut self) -> Option<&'a Node<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(node) = self.front_pending {
            self.front.push(node);
            self.front_pending = node.left.as_deref();
        }
        let node = self.front.pop()?;
        self.front_pending = node.right.as_deref();
        self.remaining -= 1;
        Some(node)
    }

    pub(crate) fn next_back_node(&mut self) -> Option<&'a Node<K, V>> {
        if self.remaining == 0 {
            return None;
        }
        while let Some(node) = self.back_pending {
            self.back.push(node);
            self.back_pending = node.right.as_deref();
        }
        let node = self.back.pop()?;
        self.back_pending = node.left.as_deref();
        self.remaining -= 1;
        Some(node)
    }
}

impl<K, V> Default for InOrder<'_, K, V> {
    fn default() -> Self {
        Self {
            front: SmallVec::new(),
            front_pending: None,
            back: SmallVec::new(),
            back_pending: None,
            remaining: 0,
        }
    }
}

impl<K, V> Clone for InOrder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            front: self.front.clone(),
            front_pending: self.front_pending,
            back: self.back.clone(),
            back_pending: self.back_pending,
            remaining: self.remaining,
        }
    }
}

impl<K, V> fmt::Debug for InOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InOrder")
            .field("front_depth", &self.front.len())
            .field("back_depth", &self.back.len())
            .field("remaining", &self.remaining)
            .finish()
    }
}

type Frame<'a, K, V> = (&'a K, &'a mut V, Option<&'a mut Node<K, V>>);

/// Forward traversal handing out mutable values.
///
/// A frame holds the split borrows of one node: its key, its value, and its right
/// subtree, which is descended once the frame is popped.
pub(crate) struct InOrderMut<'a, K, V> {
    stack: SmallVec<[Frame<'a, K, V>; INLINE_DEPTH]>,
    pending: Option<&'a mut Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> InOrderMut<'a, K, V> {
    pub(crate) fn new(root: &'a mut Link<K, V>, len: usize) -> Self {
        Self {
            stack: SmallVec::new(),
            pending: root.as_deref_mut(),
            remaining: len,
        }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next_entry(&mut self) -> Option<(&'a K, &'a mut V)> {
        while let Some(node) = self.pending.take() {
            let Node {
                key, value, left, right, ..
            } = node;
            let key: &'a K = key;
            self.stack.push((key, value, right.as_deref_mut()));
            self.pending = left.as_deref_mut();
        }
        let (key, value, right) = self.stack.pop()?;
        self.pending = right;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<K, V> Default for InOrderMut<'_, K, V> {
    fn default() -> Self {
        Self {
            stack: SmallVec::new(),
            pending: None,
            remaining: 0,
        }
    }
}

/// Forward traversal that takes ownership of the nodes, releasing each one as it is
/// yielded.
pub(crate) struct IntoInOrder<K, V> {
    stack: SmallVec<[Box<Node<K, V>>; INLINE_DEPTH]>,
    pending: Link<K, V>,
    remaining: usize,
}

impl<K, V> IntoInOrder<K, V> {
    pub(crate) fn new(root: Link<K, V>, len: usize) -> Self {
        Self {
            stack: SmallVec::new(),
            pending: root,
            remaining: len,
        }
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.remaining
    }

    pub(crate) fn next_entry(&mut self) -> Option<(K, V)> {
        while let Some(mut node) = self.pending.take() {
            self.pending = node.left.take();
            self.stack.push(node);
        }
        let mut node = self.stack.pop()?;
        self.pending = node.right.take();
        self.remaining -= 1;
        let Node { key, value, .. } = *node;
        Some((key, value))
    }
}

impl<K, V> Default for IntoInOrder<K, V> {
    fn default() -> Self {
        Self::new(None, 0)
    }
}

impl<K, V> Drop for IntoInOrder<K, V> {
    fn drop(&mut self) {
        // Drain through the stack so a deep unbalanced remainder is not dropped recursively.
        while self.next_entry().is_some() {}
    }
}
