use super::linkage::{
    child_at, clear_child, color, color_of, direction_of, leftmost_descendant, links, parent, replace_with,
    ripple_structure_fixup, rotate, set_color,
};
use crate::{Color, Direction, Handle, NodeStore, RbNode};

/// Unlinks `this` from its tree and returns the new root, or `None` if the tree
/// is now empty.
///
/// The storage behind `this` is untouched apart from its links, which are reset
/// so that the node reads as unlinked. When `this` has two children, its
/// in-order successor takes over its position in the tree.
///
/// `this` must be part of a valid tree.
///
/// # Complexity
///
/// O(log n)
pub fn remove<S: NodeStore + ?Sized>(store: &mut S, this: Handle) -> Option<Handle> {
    let this_links = *links(store, this);

    // A root with at most one child: that child, if any, is the whole tree.
    if this_links.parent().is_none() && !(this_links.left().is_some() && this_links.right().is_some()) {
        let root = this_links.left().or(this_links.right());
        if let Some(root) = root {
            let root_links = store.node_mut(root).links_mut();
            root_links.set_parent(None);
            root_links.set_color(Color::Black);
        }
        store.node_mut(this).links_mut().reset();
        return root;
    }

    // The node physically taken out of its position. With two children that is
    // the successor, which has no left child.
    let remove_node = match (this_links.left(), this_links.right()) {
        (Some(_), Some(right)) => leftmost_descendant(store, right),
        _ => this,
    };

    let mut remove_color = color(store, remove_node);
    let mut d = Direction::None;

    let remove_links = *links(store, remove_node);
    let mut splice_node = if let Some(child) = remove_links.left().or(remove_links.right()) {
        // The child inherits the removed node's color, so its own color is the
        // one that leaves the tree.
        remove_color = color(store, child);
        replace_with(store, remove_node, child);
        child
    } else {
        let parent = remove_links.parent().expect("`remove()` - a non-root leaf must have a parent!");
        d = direction_of(store, parent, remove_node);
        clear_child(store, parent, d);
        parent
    };

    // Move the successor into the target's position instead of copying data.
    if remove_node != this {
        if splice_node == this {
            splice_node = remove_node;
        }
        replace_with(store, this, remove_node);
    }

    let root = rebalance_after_remove(store, splice_node, remove_color, d);
    set_color(store, root, Color::Black);
    store.node_mut(this).links_mut().reset();
    Some(root)
}

/// Restores the black height after a node of color `removed` left the tree.
///
/// `this` is the node that took over the removed position or, if `d` is not
/// [`Direction::None`], the parent of an emptied `d` slot. Returns the root.
pub(crate) fn rebalance_after_remove<S: NodeStore + ?Sized>(
    store: &mut S,
    this: Handle,
    removed: Color,
    d: Direction,
) -> Handle {
    if removed == Color::Black {
        let mut d = d;
        let (mut n, mut above) = if d == Direction::None {
            (Some(this), parent(store, this))
        } else {
            (None, Some(this))
        };

        while let Some(p) = above {
            if let Some(node) = n
                && color(store, node) == Color::Red
            {
                set_color(store, node, Color::Black);
                break;
            }

            // Written for `n` on the left; mirrored when it hangs on the right.
            let n_is_right = match n {
                Some(node) if d == Direction::None => direction_of(store, p, node) == Direction::Right,
                _ => d == Direction::Right,
            };
            let (near, far) = if n_is_right {
                (Direction::Right, Direction::Left)
            } else {
                (Direction::Left, Direction::Right)
            };

            let mut w = sibling(store, p, far);

            if color(store, w) == Color::Red {
                set_color(store, w, Color::Black);
                set_color(store, p, Color::Red);
                rotate(store, p, near);
                w = sibling(store, p, far);
            }

            let mut wfc = child_at(store, w, far);
            if color_of(store, child_at(store, w, near)) == Color::Black && color_of(store, wfc) == Color::Black {
                set_color(store, w, Color::Red);
                n = Some(p);
                above = parent(store, p);
                d = Direction::None;
            } else {
                if color_of(store, wfc) == Color::Black {
                    if let Some(wnc) = child_at(store, w, near) {
                        set_color(store, wnc, Color::Black);
                    }
                    set_color(store, w, Color::Red);
                    rotate(store, w, far);
                    w = sibling(store, p, far);
                    wfc = child_at(store, w, far);
                }
                set_color(store, w, color(store, p));
                set_color(store, p, Color::Black);
                if let Some(wfc) = wfc {
                    set_color(store, wfc, Color::Black);
                }
                rotate(store, p, near);
                break;
            }
        }
    }

    ripple_structure_fixup(store, this)
}

/// The sibling of a black-deficient subtree always exists.
fn sibling<S: NodeStore + ?Sized>(store: &S, parent: Handle, far: Direction) -> Handle {
    child_at(store, parent, far).expect("`rebalance_after_remove()` - deficient subtree has no sibling!")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::engine::test_support::{build, in_order, key_of, pre_order};
    use crate::engine::validate;
    use alloc::vec::Vec;
    use proptest::prelude::*;

    use crate::Color::{Black as B, Red as R};

    /// Keys are stored at `key - 1`.
    fn k(key: i32) -> Handle {
        Handle::from_index(usize::try_from(key - 1).unwrap())
    }

    fn ascending_seven() -> (Vec<crate::engine::test_support::Counted>, Handle) {
        let keys: Vec<i32> = (1..=7).collect();
        let (store, root) = build(&keys);
        assert_eq!(pre_order(&store, root), [(2, B), (1, B), (4, R), (3, B), (6, B), (5, R), (7, R)]);
        (store, root)
    }

    #[test]
    fn removing_only_node_empties_tree() {
        let (mut store, root) = build(&[5]);
        assert_eq!(remove(&mut store, root), None);
        assert!(store[0].links().is_unlinked());
    }

    #[test]
    fn removing_root_with_one_child_promotes_it() {
        let (mut store, root) = build(&[5, 3]);
        assert_eq!(color(&store, Handle::from_index(1)), R);
        let root = remove(&mut store, root).unwrap();
        assert_eq!(key_of(&store, root), 3);
        assert_eq!(color(&store, root), B);
        assert_eq!(parent(&store, root), None);
        assert_eq!(validate(&store, Some(root)), Ok(2));
    }

    #[test]
    fn red_sibling_then_black_nephews() {
        let (mut store, _) = ascending_seven();
        let root = remove(&mut store, Handle::from_index(0)).unwrap();
        assert_eq!(pre_order(&store, root), [(4, B), (2, B), (3, R), (6, B), (5, R), (7, R)]);
        assert!(validate(&store, Some(root)).is_ok());
        assert_eq!(store[root.to_index()].size, 6);
    }

    #[test]
    fn near_nephew_is_rotated_outward() {
        let (mut store, _) = ascending_seven();
        let mut root = None;
        for (key, expected) in [
            (1, &[(4, B), (2, B), (3, R), (6, B), (5, R), (7, R)][..]),
            (7, &[(4, B), (2, B), (3, R), (6, B), (5, R)][..]),
            (3, &[(4, B), (2, B), (6, B), (5, R)][..]),
            (2, &[(5, B), (4, B), (6, B)][..]),
        ] {
            let r = remove(&mut store, k(key)).unwrap();
            assert_eq!(pre_order(&store, r), expected, "after removing {key}");
            assert!(validate(&store, Some(r)).is_ok());
            root = Some(r);
        }
        assert_eq!(store[root.unwrap().to_index()].size, 3);
    }

    #[test]
    fn far_nephew_finishes_directly() {
        let (mut store, _) = ascending_seven();
        for (key, expected) in [
            (1, &[(4, B), (2, B), (3, R), (6, B), (5, R), (7, R)][..]),
            (5, &[(4, B), (2, B), (3, R), (6, B), (7, R)][..]),
            (3, &[(4, B), (2, B), (6, B), (7, R)][..]),
            (2, &[(6, B), (4, B), (7, B)][..]),
        ] {
            let r = remove(&mut store, k(key)).unwrap();
            assert_eq!(pre_order(&store, r), expected, "after removing {key}");
            assert!(validate(&store, Some(r)).is_ok());
        }
    }

    #[test]
    fn two_children_are_taken_over_by_successor() {
        let (mut store, _) = ascending_seven();
        let root = remove(&mut store, k(4)).unwrap();
        assert_eq!(pre_order(&store, root), [(2, B), (1, B), (5, R), (3, B), (6, B), (7, R)]);
        assert!(store[k(4).to_index()].links().is_unlinked());
        assert!(validate(&store, Some(root)).is_ok());
    }

    #[test]
    fn removing_root_with_two_children() {
        let (mut store, root) = ascending_seven();
        let root = remove(&mut store, root).unwrap();
        assert_eq!(key_of(&store, root), 3);
        assert_eq!(in_order(&store, root), [1, 3, 4, 5, 6, 7]);
        assert!(validate(&store, Some(root)).is_ok());
    }

    proptest! {
        #[test]
        fn invariants_hold_after_every_remove(
            keys in prop::collection::btree_set(-1000i32..1000, 1..300),
            order in prop::collection::vec(any::<prop::sample::Index>(), 0..300),
        ) {
            let keys: Vec<i32> = keys.into_iter().collect();
            let (mut store, root) = build(&keys);
            let mut root = Some(root);
            let mut live: Vec<usize> = (0..keys.len()).collect();

            for pick in order {
                if live.is_empty() {
                    break;
                }
                let index = live.swap_remove(pick.index(live.len()));
                root = remove(&mut store, Handle::from_index(index));
                prop_assert!(store[index].links().is_unlinked());
                prop_assert!(validate(&store, root).is_ok());

                let mut expected: Vec<i32> = live.iter().map(|&i| keys[i]).collect();
                expected.sort_unstable();
                match root {
                    Some(root) => {
                        prop_assert_eq!(store[root.to_index()].size, live.len());
                        prop_assert_eq!(in_order(&store, root), expected);
                    }
                    None => prop_assert!(live.is_empty()),
                }
            }
        }
    }
}
