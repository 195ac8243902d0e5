use tracing::trace;

use super::node::{Link, height};
use crate::error::{Direction, Error, Result};

#[allow(unreachable_pub, private_interfaces)]
pub(crate) mod sealed {
    use super::{Link, Result};

    pub trait Sealed {
        /// Restores the policy's invariant for the subtree in `slot`, whose children are
        /// already valid, writing the (possibly new) subtree root back into `slot`.
        fn rebalance<K, V>(slot: &mut Link<K, V>) -> Result<()>;
    }
}

use sealed::Sealed;

/// The balancing policy a tree runs on every level of a mutation's unwind.
///
/// This trait is sealed; the crate provides [`Avl`] and [`Unbalanced`].
pub trait Balance: Sealed {}

/// Height-balanced (AVL) policy: every node's subtrees differ in height by at most one,
/// which keeps search, mutation and rank queries at O(log n).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Avl;

/// Plain binary search tree policy: nodes are never rotated, so the tree's shape follows
/// insertion order. Cached heights and sizes are still maintained.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Unbalanced;

impl Balance for Avl {}
impl Balance for Unbalanced {}

impl Sealed for Unbalanced {
    #[inline]
    fn rebalance<K, V>(slot: &mut Link<K, V>) -> Result<()> {
        if let Some(node) = slot.as_deref_mut() {
            node.update();
        }
        Ok(())
    }
}

impl Sealed for Avl {
    fn rebalance<K, V>(slot: &mut Link<K, V>) -> Result<()> {
        let Some(node) = slot.as_deref_mut() else {
            return Ok(());
        };
        node.update();

        let balance = node.balance_factor();
        if balance >= 2 {
            // Right-left case: straighten the right child first.
            if let Some(child) = node.right.as_deref()
                && height(&child.left) > height(&child.right)
            {
                rotate_right(&mut node.right)?;
            }
            rotate_left(slot)
        } else if balance <= -2 {
            // Left-right case.
            if let Some(child) = node.left.as_deref()
                && height(&child.right) > height(&child.left)
            {
                rotate_left(&mut node.left)?;
            }
            rotate_right(slot)
        } else {
            Ok(())
        }
    }
}

/// Rotates the subtree in `slot` to the left: its right child becomes the new root and
/// the old root becomes that child's left child.
///
/// ```text
///      node                 child
///     /    \               /     \
///    a     child   ==>   node     c
///         /     \       /    \
///     center     c     a    center
/// ```
///
/// Fails without touching the slot if the subtree or its right child is absent.
pub(crate) fn rotate_left<K, V>(slot: &mut Link<K, V>) -> Result<()> {
    let invalid = Error::InvalidRotation {
        direction: Direction::Left,
    };
    let Some(node) = slot.as_deref_mut() else {
        return Err(invalid);
    };
    let Some(mut child) = node.right.take() else {
        return Err(invalid);
    };

    node.right = child.left.take();
    node.update();
    child.left = slot.take();
    child.update();
    trace!(direction = ?Direction::Left, height = child.height(), size = child.size(), "rotated subtree");
    *slot = Some(child);
    Ok(())
}

/// Mirror image of [`rotate_left`]: the left child becomes the new root.
pub(crate) fn rotate_right<K, V>(slot: &mut Link<K, V>) -> Result<()> {
    let invalid = Error::InvalidRotation {
        direction: Direction::Right,
    };
    let Some(node) = slot.as_deref_mut() else {
        return Err(invalid);
    };
    let Some(mut child) = node.left.take() else {
        return Err(invalid);
    };

    node.left = child.right.take();
    node.update();
    child.right = slot.take();
    child.update();
    trace!(direction = ?Direction::Right, height = child.height(), size = child.size(), "rotated subtree");
    *slot = Some(child);
    Ok(())
}
