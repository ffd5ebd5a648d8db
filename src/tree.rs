use core::cmp::Ordering;

use tracing::{debug, trace};

use crate::engine::{self, ValidationError};
use crate::engine::linkage::{clear_child, direction_of};
use crate::{Handle, NodeStore, RbNode};

mod iter;

pub use iter::Iter;

/// A red-black tree over the nodes of a store, tracking its root and length.
///
/// The tree owns the store but not the lifetime of its records: inserting and
/// removing only links and unlinks nodes that are already stored. Records are
/// added to and dropped from the store through [`store_mut`](RbTree::store_mut).
///
/// # Examples
///
/// ```
/// use akakuro::{Links, RbNode, RbTree, Slab};
///
/// #[derive(Debug)]
/// struct Job {
///     deadline: u64,
///     links: Links,
/// }
///
/// impl RbNode for Job {
///     fn links(&self) -> &Links {
///         &self.links
///     }
///
///     fn links_mut(&mut self) -> &mut Links {
///         &mut self.links
///     }
/// }
///
/// let mut tree = RbTree::new(Slab::new());
/// for deadline in [30, 10, 20] {
///     let job = tree.store_mut().insert(Job { deadline, links: Links::new() });
///     tree.insert_by(job, |a, b| a.deadline.cmp(&b.deadline));
/// }
///
/// let next = tree.first().unwrap();
/// assert_eq!(tree.store().get(next).deadline, 10);
///
/// tree.remove(next);
/// let job = tree.store_mut().remove(next);
/// assert_eq!(job.deadline, 10);
///
/// let deadlines: Vec<u64> = tree.iter().map(|(_, job)| job.deadline).collect();
/// assert_eq!(deadlines, [20, 30]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RbTree<S> {
    store: S,
    root: Option<Handle>,
    len: usize,
}

impl<S: NodeStore> RbTree<S> {
    /// Creates an empty tree over `store`.
    ///
    /// Nodes already in the store are not part of the tree until inserted; their
    /// links are overwritten on insertion.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self {
            store,
            root: None,
            len: 0,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the store mutably.
    ///
    /// Adding and removing unlinked records is fine. Changing the ordering key of
    /// a linked node, or dropping one, is a logic error that leaves the tree
    /// unordered or dangling; no memory unsafety results.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the tree and returns the store. Linked nodes keep their links.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the number of linked nodes.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if `handle` is linked into a tree: it is the root or has a parent.
    ///
    /// A handle that addresses no node in the store, such as one to a freed
    /// [`Slab`](crate::Slab) slot, is not contained.
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.root == Some(handle)
            || self
                .store
                .try_node(handle)
                .is_some_and(|node| node.links().parent().is_some())
    }

    /// Links `handle` into the tree using the nodes' [`Ord`] implementation.
    ///
    /// Equal nodes are kept, after the ones already present. Returns false,
    /// changing nothing, if `handle` is already linked.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not address a node in the store.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, handle: Handle) -> bool
    where
        S::Node: Ord,
    {
        self.insert_by(handle, Ord::cmp)
    }

    /// Links `handle` into the tree, ordered by `cmp(new, existing)`.
    ///
    /// Returns false, changing nothing, if `handle` is already linked.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not address a node in the store.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert_by<F>(&mut self, handle: Handle, cmp: F) -> bool
    where
        F: FnMut(&S::Node, &S::Node) -> Ordering,
    {
        if self.contains(handle) {
            return false;
        }
        let root = engine::insert_by(&mut self.store, self.root, handle, cmp);
        self.root = Some(root);
        self.len += 1;
        trace!(?handle, ?root, len = self.len, "linked node");
        true
    }

    /// Unlinks `handle` from the tree, leaving its record in the store.
    ///
    /// Returns false, changing nothing, if `handle` is not linked. A handle that
    /// addresses no node in the store reads as not linked.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove(&mut self, handle: Handle) -> bool {
        if !self.contains(handle) {
            return false;
        }
        self.root = engine::remove(&mut self.store, handle);
        self.len -= 1;
        trace!(?handle, root = ?self.root, len = self.len, "unlinked node");
        true
    }

    /// Finds a node for which `f` returns [`Ordering::Equal`].
    ///
    /// See [`engine::find_by`].
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find_by<F>(&self, f: F) -> Option<Handle>
    where
        F: FnMut(&S::Node) -> Ordering,
    {
        engine::find_by(&self.store, self.root, f)
    }

    /// See [`engine::lower_bound_by`].
    pub fn lower_bound_by<F>(&self, f: F) -> Option<Handle>
    where
        F: FnMut(&S::Node) -> Ordering,
    {
        engine::lower_bound_by(&self.store, self.root, f)
    }

    /// See [`engine::upper_bound_by`].
    pub fn upper_bound_by<F>(&self, f: F) -> Option<Handle>
    where
        F: FnMut(&S::Node) -> Ordering,
    {
        engine::upper_bound_by(&self.store, self.root, f)
    }

    /// Returns the smallest node.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| engine::leftmost_descendant(&self.store, root))
    }

    /// Returns the largest node.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| engine::rightmost_descendant(&self.store, root))
    }

    /// Returns the node after `handle` in order.
    ///
    /// # Complexity
    ///
    /// O(log n) worst case, O(1) amortized over a full traversal.
    #[must_use]
    pub fn next(&self, handle: Handle) -> Option<Handle> {
        engine::successor(&self.store, handle)
    }

    /// Returns the node before `handle` in order.
    #[must_use]
    pub fn prev(&self, handle: Handle) -> Option<Handle> {
        engine::predecessor(&self.store, handle)
    }

    /// Returns an in-order iterator over the linked nodes and their handles.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::{Handle, Links, RbNode, RbTree};
    ///
    /// struct Key(u8, Links);
    ///
    /// impl RbNode for Key {
    ///     fn links(&self) -> &Links {
    ///         &self.1
    ///     }
    ///
    ///     fn links_mut(&mut self) -> &mut Links {
    ///         &mut self.1
    ///     }
    /// }
    ///
    /// let store: Vec<Key> = [3, 1, 2].into_iter().map(|k| Key(k, Links::new())).collect();
    /// let mut tree = RbTree::new(store);
    /// for h in (0..3).map(Handle::from_index) {
    ///     tree.insert_by(h, |a, b| a.0.cmp(&b.0));
    /// }
    ///
    /// let mut iter = tree.iter().map(|(_, key)| key.0);
    /// assert_eq!(iter.next(), Some(1));
    /// assert_eq!(iter.next_back(), Some(3));
    /// assert_eq!(iter.next(), Some(2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, S> {
        Iter::new(&self.store, self.first(), self.last(), self.len)
    }

    /// Unlinks every node, leaving the records in the store.
    ///
    /// # Complexity
    ///
    /// O(n), without allocating.
    pub fn clear(&mut self) {
        let mut current = self.root.take();
        while let Some(node) = current {
            let links = *self.store.node(node).links();
            if let Some(child) = links.left().or(links.right()) {
                current = Some(child);
                continue;
            }

            // `node` is a leaf: detach it and continue from its parent.
            if let Some(parent) = links.parent() {
                let dir = direction_of(&self.store, parent, node);
                clear_child(&mut self.store, parent, dir);
            }
            self.store.node_mut(node).links_mut().reset();
            current = links.parent();
        }
        self.len = 0;
    }

    /// Checks the red-black invariants and that the tree holds [`len`](RbTree::len) nodes.
    ///
    /// Returns the black height, counting absent leaves. See [`engine::validate`].
    ///
    /// # Errors
    ///
    /// Returns the first defect found.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn validate(&self) -> Result<usize, ValidationError> {
        let result = engine::check(&self.store, self.root).and_then(|(height, count)| {
            if count == self.len {
                Ok(height)
            } else {
                Err(ValidationError::CountMismatch {
                    expected: self.len,
                    actual: count,
                })
            }
        });
        if let Err(error) = &result {
            debug!(%error, "tree failed validation");
        }
        result
    }
}

impl<'a, S: NodeStore> IntoIterator for &'a RbTree<S> {
    type Item = (Handle, &'a S::Node);
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Iter<'a, S> {
        self.iter()
    }
}
