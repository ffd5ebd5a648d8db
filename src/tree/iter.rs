use core::fmt;
use core::iter::FusedIterator;

use crate::engine::{predecessor, successor};
use crate::{Handle, NodeStore};

/// An in-order iterator over the nodes of an [`RbTree`](crate::RbTree).
///
/// This `struct` is created by [`RbTree::iter`](crate::RbTree::iter). It yields
/// each node's handle together with the node itself.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, S: NodeStore + ?Sized> {
    store: &'a S,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

impl<'a, S: NodeStore + ?Sized> Iter<'a, S> {
    pub(super) const fn new(store: &'a S, front: Option<Handle>, back: Option<Handle>, remaining: usize) -> Self {
        Self {
            store,
            front,
            back,
            remaining,
        }
    }
}

impl<'a, S: NodeStore + ?Sized> Iterator for Iter<'a, S> {
    type Item = (Handle, &'a S::Node);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = successor(self.store, handle);
        Some((handle, self.store.node(handle)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<S: NodeStore + ?Sized> DoubleEndedIterator for Iter<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = predecessor(self.store, handle);
        Some((handle, self.store.node(handle)))
    }
}

impl<S: NodeStore + ?Sized> ExactSizeIterator for Iter<'_, S> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<S: NodeStore + ?Sized> FusedIterator for Iter<'_, S> {}

impl<S: NodeStore + ?Sized> Clone for Iter<'_, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<S: NodeStore + ?Sized> fmt::Debug for Iter<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("front", &self.front)
            .field("back", &self.back)
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}
