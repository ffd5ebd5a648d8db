use alloc::vec::Vec;

use crate::{Handle, RbNode};

/// Caller-owned storage for tree nodes, addressed by [`Handle`].
///
/// The engine reads and relinks nodes through this trait and never inserts or
/// drops anything. Implementations are provided for slices, `Vec<T>` and
/// [`Slab<T>`](crate::Slab); a handle addresses the slot at
/// [`Handle::to_index`].
pub trait NodeStore {
    type Node: RbNode;

    /// Returns the node behind `handle`.
    ///
    /// # Panics
    ///
    /// Implementations panic if `handle` does not address a node.
    fn node(&self, handle: Handle) -> &Self::Node;

    /// Returns the node behind `handle`, or `None` if it addresses no node.
    fn try_node(&self, handle: Handle) -> Option<&Self::Node>;

    /// Returns the node behind `handle` mutably.
    ///
    /// # Panics
    ///
    /// Implementations panic if `handle` does not address a node.
    fn node_mut(&mut self, handle: Handle) -> &mut Self::Node;

    /// Returns `handle` mutably together with shared access to its children.
    ///
    /// `left` and `right` are never equal to `handle`.
    ///
    /// # Panics
    ///
    /// Implementations panic if any handle does not address a node.
    fn node_with_children(
        &mut self,
        handle: Handle,
        left: Option<Handle>,
        right: Option<Handle>,
    ) -> (&mut Self::Node, Option<&Self::Node>, Option<&Self::Node>);
}

/// Splits `slots` into the slot at `index` (mutable) and two other slots (shared).
pub(crate) fn split_slots<T>(
    slots: &mut [T],
    index: usize,
    left: Option<usize>,
    right: Option<usize>,
) -> (&mut T, Option<&T>, Option<&T>) {
    assert!(index < slots.len(), "`split_slots()` - `index` is out of bounds!");
    let (before, rest) = slots.split_at_mut(index);
    let (this, after) = rest.split_at_mut(1);
    let left = pick_slot(before, after, index, left);
    let right = pick_slot(before, after, index, right);
    (&mut this[0], left, right)
}

fn pick_slot<'a, T>(before: &'a [T], after: &'a [T], index: usize, other: Option<usize>) -> Option<&'a T> {
    let other = other?;
    assert!(other != index, "`split_slots()` - a node cannot be its own child!");
    Some(if other < index { &before[other] } else { &after[other - index - 1] })
}

impl<T: RbNode> NodeStore for [T] {
    type Node = T;

    #[inline]
    fn node(&self, handle: Handle) -> &T {
        &self[handle.to_index()]
    }

    #[inline]
    fn try_node(&self, handle: Handle) -> Option<&T> {
        self.get(handle.to_index())
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut T {
        &mut self[handle.to_index()]
    }

    fn node_with_children(
        &mut self,
        handle: Handle,
        left: Option<Handle>,
        right: Option<Handle>,
    ) -> (&mut T, Option<&T>, Option<&T>) {
        split_slots(self, handle.to_index(), left.map(Handle::to_index), right.map(Handle::to_index))
    }
}

impl<T: RbNode> NodeStore for Vec<T> {
    type Node = T;

    #[inline]
    fn node(&self, handle: Handle) -> &T {
        self.as_slice().node(handle)
    }

    #[inline]
    fn try_node(&self, handle: Handle) -> Option<&T> {
        self.as_slice().try_node(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut T {
        self.as_mut_slice().node_mut(handle)
    }

    fn node_with_children(
        &mut self,
        handle: Handle,
        left: Option<Handle>,
        right: Option<Handle>,
    ) -> (&mut T, Option<&T>, Option<&T>) {
        self.as_mut_slice().node_with_children(handle, left, right)
    }
}
