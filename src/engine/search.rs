use core::cmp::Ordering;

use super::linkage::child_at;
use crate::{Direction, Handle, NodeStore};

/// Finds a node for which `f` returns [`Ordering::Equal`].
///
/// `f(node)` reports how `node` orders against the sought key, as in
/// [`slice::binary_search_by`]: `Less` if the node comes before it, `Greater` if
/// it comes after. With several equal nodes, any one of them may be returned; use
/// [`lower_bound_by`] for the first.
///
/// # Examples
///
/// ```
/// use akakuro::{Handle, Links, RbNode, engine};
///
/// struct Node {
///     key: u32,
///     links: Links,
/// }
///
/// impl RbNode for Node {
///     fn links(&self) -> &Links {
///         &self.links
///     }
///
///     fn links_mut(&mut self) -> &mut Links {
///         &mut self.links
///     }
/// }
///
/// let mut store: Vec<Node> = (0..10).map(|key| Node { key: key * 10, links: Links::new() }).collect();
/// let mut root = None;
/// for i in 0..store.len() {
///     root = Some(engine::insert_by(&mut store, root, Handle::from_index(i), |a, b| a.key.cmp(&b.key)));
/// }
///
/// let found = engine::find_by(&store, root, |n| n.key.cmp(&40)).unwrap();
/// assert_eq!(store[found.to_index()].key, 40);
/// assert_eq!(engine::find_by(&store, root, |n| n.key.cmp(&45)), None);
/// ```
///
/// # Complexity
///
/// O(log n)
pub fn find_by<S, F>(store: &S, root: Option<Handle>, mut f: F) -> Option<Handle>
where
    S: NodeStore + ?Sized,
    F: FnMut(&S::Node) -> Ordering,
{
    let mut current = root;
    while let Some(node) = current {
        current = match f(store.node(node)) {
            Ordering::Less => child_at(store, node, Direction::Right),
            Ordering::Greater => child_at(store, node, Direction::Left),
            Ordering::Equal => return Some(node),
        };
    }
    None
}

/// Returns the first node, in order, that is not less than the sought key.
///
/// `f` follows the convention of [`find_by`].
///
/// # Complexity
///
/// O(log n)
pub fn lower_bound_by<S, F>(store: &S, root: Option<Handle>, mut f: F) -> Option<Handle>
where
    S: NodeStore + ?Sized,
    F: FnMut(&S::Node) -> Ordering,
{
    bound_by(store, root, |node| f(node) != Ordering::Less)
}

/// Returns the first node, in order, that is greater than the sought key.
///
/// `f` follows the convention of [`find_by`].
///
/// # Complexity
///
/// O(log n)
pub fn upper_bound_by<S, F>(store: &S, root: Option<Handle>, mut f: F) -> Option<Handle>
where
    S: NodeStore + ?Sized,
    F: FnMut(&S::Node) -> Ordering,
{
    bound_by(store, root, |node| f(node) == Ordering::Greater)
}

/// The leftmost node satisfying `at_or_after`, which must be monotone in order.
fn bound_by<S, F>(store: &S, root: Option<Handle>, mut at_or_after: F) -> Option<Handle>
where
    S: NodeStore + ?Sized,
    F: FnMut(&S::Node) -> bool,
{
    let mut best = None;
    let mut current = root;
    while let Some(node) = current {
        current = if at_or_after(store.node(node)) {
            best = Some(node);
            child_at(store, node, Direction::Left)
        } else {
            child_at(store, node, Direction::Right)
        };
    }
    best
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::engine::test_support::{build, key_of, store_of};
    use alloc::vec::Vec;
    use proptest::prelude::*;

    #[test]
    fn empty_tree_finds_nothing() {
        let store = store_of(&[]);
        assert_eq!(find_by(&store, None, |n| n.key.cmp(&1)), None);
        assert_eq!(lower_bound_by(&store, None, |n| n.key.cmp(&1)), None);
        assert_eq!(upper_bound_by(&store, None, |n| n.key.cmp(&1)), None);
    }

    #[test]
    fn bounds_around_duplicates() {
        // Indices 1, 2 and 3 all hold the key 20.
        let (store, root) = build(&[10, 20, 20, 20, 30]);
        let root = Some(root);

        assert_eq!(lower_bound_by(&store, root, |n| n.key.cmp(&20)), Some(Handle::from_index(1)));
        assert_eq!(upper_bound_by(&store, root, |n| n.key.cmp(&20)), Some(Handle::from_index(4)));
        assert_eq!(lower_bound_by(&store, root, |n| n.key.cmp(&15)), Some(Handle::from_index(1)));
        assert_eq!(upper_bound_by(&store, root, |n| n.key.cmp(&30)), None);
        assert_eq!(lower_bound_by(&store, root, |n| n.key.cmp(&-5)), Some(Handle::from_index(0)));

        let found = find_by(&store, root, |n| n.key.cmp(&20)).unwrap();
        assert_eq!(key_of(&store, found), 20);
    }

    proptest! {
        #[test]
        fn search_agrees_with_sorted_vec(
            keys in prop::collection::vec(-200i32..200, 1..200),
            probes in prop::collection::vec(-250i32..250, 1..50),
        ) {
            let (store, root) = build(&keys);
            let root = Some(root);
            let mut sorted = keys.clone();
            sorted.sort_unstable();

            for probe in probes {
                let found = find_by(&store, root, |n| n.key.cmp(&probe));
                prop_assert_eq!(found.map(|h| key_of(&store, h)), sorted.binary_search(&probe).ok().map(|_| probe));

                let lower = lower_bound_by(&store, root, |n| n.key.cmp(&probe)).map(|h| key_of(&store, h));
                let expected: Option<i32> = sorted.iter().copied().find(|&k| k >= probe);
                prop_assert_eq!(lower, expected);

                let upper = upper_bound_by(&store, root, |n| n.key.cmp(&probe)).map(|h| key_of(&store, h));
                let expected: Option<i32> = sorted.iter().copied().find(|&k| k > probe);
                prop_assert_eq!(upper, expected);
            }

            // The lower bound of a duplicated key is the earliest inserted copy.
            let first_copy: Vec<usize> = (0..keys.len())
                .filter(|&i| keys[..i].iter().all(|&k| k != keys[i]))
                .collect();
            for i in first_copy {
                let lower = lower_bound_by(&store, root, |n| n.key.cmp(&keys[i]));
                prop_assert_eq!(lower, Some(Handle::from_index(i)));
            }
        }
    }
}
