use core::cmp::Ordering;

use super::linkage::{child_at, color, direction_of, parent, ripple_structure_fixup, rotate, set_child, set_color};
use crate::{Color, Direction, Handle, NodeStore, RbNode};

/// Links `node` into the tree rooted at `root` and returns the new root.
///
/// `cmp(new, existing)` orders the incoming node against nodes already in the
/// tree. Nodes comparing equal are placed after the existing ones. The links of
/// `node` are overwritten; it must not currently be part of any tree.
///
/// # Examples
///
/// ```
/// use akakuro::{Handle, Links, RbNode, engine};
///
/// struct Node {
///     key: i32,
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
/// let mut store: Vec<Node> = [5, 3, 8].into_iter().map(|key| Node { key, links: Links::new() }).collect();
///
/// let mut root = None;
/// for i in 0..store.len() {
///     root = Some(engine::insert_by(&mut store, root, Handle::from_index(i), |a, b| a.key.cmp(&b.key)));
/// }
///
/// let root = root.unwrap();
/// assert_eq!(store[root.to_index()].key, 5);
/// let min = engine::leftmost_descendant(&store, root);
/// assert_eq!(store[min.to_index()].key, 3);
/// ```
///
/// # Panics
///
/// Panics if `node` or `root` does not address a node in `store`. Passing a
/// `node` that is already linked corrupts its current tree and may panic when
/// the descent reaches `node` itself; [`RbTree::insert_by`](crate::RbTree::insert_by)
/// checks this and refuses instead.
///
/// # Complexity
///
/// O(log n)
pub fn insert_by<S, F>(store: &mut S, root: Option<Handle>, node: Handle, mut cmp: F) -> Handle
where
    S: NodeStore + ?Sized,
    F: FnMut(&S::Node, &S::Node) -> Ordering,
{
    store.node_mut(node).links_mut().reset();

    if let Some(mut current) = root {
        loop {
            let dir = match cmp(store.node(node), store.node(current)) {
                Ordering::Less => Direction::Left,
                Ordering::Equal | Ordering::Greater => Direction::Right,
            };
            match child_at(store, current, dir) {
                Some(next) => current = next,
                None => {
                    set_child(store, current, Some(node), dir);
                    break;
                }
            }
        }
    }

    rebalance_after_insert(store, node)
}

/// Restores the red-black invariants after `this` was linked as a red leaf.
///
/// Returns the new root.
pub(crate) fn rebalance_after_insert<S: NodeStore + ?Sized>(store: &mut S, this: Handle) -> Handle {
    let mut x = this;

    while let Some(p) = parent(store, x)
        && color(store, p) == Color::Red
    {
        // Red root; forced black below.
        let Some(grandparent) = parent(store, p) else {
            break;
        };
        let child_dir = direction_of(store, grandparent, p);
        let other_dir = child_dir.flip();
        let uncle = child_at(store, grandparent, other_dir);

        if let Some(uncle) = uncle
            && color(store, uncle) == Color::Red
        {
            set_color(store, p, Color::Black);
            set_color(store, uncle, Color::Black);
            set_color(store, grandparent, Color::Red);
            x = grandparent;
        } else {
            // Straighten a zig-zag first so that `x`, its parent and the
            // grandparent lie on one line.
            let p = if child_at(store, p, other_dir) == Some(x) {
                x = p;
                rotate(store, x, child_dir)
            } else {
                p
            };
            // The black parent ends the loop.
            set_color(store, p, Color::Black);
            set_color(store, grandparent, Color::Red);
            rotate(store, grandparent, other_dir);
        }
    }

    let root = ripple_structure_fixup(store, this);
    set_color(store, root, Color::Black);
    root
}
