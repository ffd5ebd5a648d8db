//! The tree algorithms, as free functions over a [`NodeStore`](crate::NodeStore).
//!
//! The engine keeps no state of its own: a tree is a root handle plus the links
//! embedded in the nodes of a store. Callers track the root themselves (every
//! mutating call returns the new one) or let [`RbTree`](crate::RbTree) do it.

mod insert;
pub(crate) mod linkage;
mod remove;
mod search;
mod validate;

pub use insert::insert_by;
pub use linkage::{leftmost_descendant, predecessor, rightmost_descendant, root_of, successor};
pub use remove::remove;
pub use search::{find_by, lower_bound_by, upper_bound_by};
pub use validate::{ValidationError, validate};

pub(crate) use validate::check;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod test_support {
    use alloc::vec::Vec;

    use crate::{Color, Handle, Links, NodeStore, RbNode};

    /// A node that keeps the size of its subtree.
    #[derive(Debug)]
    pub(crate) struct Counted {
        pub(crate) key: i32,
        pub(crate) size: usize,
        links: Links,
    }

    impl RbNode for Counted {
        fn links(&self) -> &Links {
            &self.links
        }

        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }

        fn structure_fixup(&mut self, left: Option<&Self>, right: Option<&Self>) {
            self.size = 1 + left.map_or(0, |n| n.size) + right.map_or(0, |n| n.size);
        }

        fn structure_validate(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
            self.size == 1 + left.map_or(0, |n| n.size) + right.map_or(0, |n| n.size)
        }
    }

    /// Unlinked nodes holding `keys`, key `i` at index `i`.
    pub(crate) fn store_of(keys: &[i32]) -> Vec<Counted> {
        keys.iter()
            .map(|&key| Counted {
                key,
                size: 1,
                links: Links::new(),
            })
            .collect()
    }

    /// Inserts `keys` in order and returns the store and root. `keys` must not be empty.
    pub(crate) fn build(keys: &[i32]) -> (Vec<Counted>, Handle) {
        let mut store = store_of(keys);
        let mut root = None;
        for i in 0..keys.len() {
            root = Some(super::insert_by(&mut store, root, Handle::from_index(i), |a, b| a.key.cmp(&b.key)));
        }
        (store, root.expect("`build()` - `keys` is empty!"))
    }

    pub(crate) fn key_of(store: &[Counted], handle: Handle) -> i32 {
        store.node(handle).key
    }

    pub(crate) fn in_order(store: &[Counted], root: Handle) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut node = Some(super::leftmost_descendant(store, root));
        while let Some(h) = node {
            keys.push(key_of(store, h));
            node = super::successor(store, h);
        }
        keys
    }

    pub(crate) fn pre_order(store: &[Counted], root: Handle) -> Vec<(i32, Color)> {
        fn walk(store: &[Counted], node: Option<Handle>, out: &mut Vec<(i32, Color)>) {
            if let Some(h) = node {
                let links = store.node(h).links();
                out.push((key_of(store, h), links.color()));
                walk(store, links.left(), out);
                walk(store, links.right(), out);
            }
        }

        let mut out = Vec::new();
        walk(store, Some(root), &mut out);
        out
    }
}
