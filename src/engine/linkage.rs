use crate::{Color, Direction, Handle, Links, NodeStore, RbNode};

#[inline]
pub(crate) fn links<S: NodeStore + ?Sized>(store: &S, handle: Handle) -> &Links {
    store.node(handle).links()
}

#[inline]
fn links_mut<S: NodeStore + ?Sized>(store: &mut S, handle: Handle) -> &mut Links {
    store.node_mut(handle).links_mut()
}

#[inline]
pub(crate) fn parent<S: NodeStore + ?Sized>(store: &S, handle: Handle) -> Option<Handle> {
    links(store, handle).parent()
}

#[inline]
pub(crate) fn color<S: NodeStore + ?Sized>(store: &S, handle: Handle) -> Color {
    links(store, handle).color()
}

/// Absent nodes are black.
#[inline]
pub(crate) fn color_of<S: NodeStore + ?Sized>(store: &S, handle: Option<Handle>) -> Color {
    handle.map_or(Color::Black, |h| color(store, h))
}

#[inline]
pub(crate) fn set_color<S: NodeStore + ?Sized>(store: &mut S, handle: Handle, color: Color) {
    links_mut(store, handle).set_color(color);
}

#[inline]
pub(crate) fn child_at<S: NodeStore + ?Sized>(store: &S, this: Handle, dir: Direction) -> Option<Handle> {
    links(store, this).child(dir)
}

/// Returns which side of `this` the node `child` hangs from.
pub(crate) fn direction_of<S: NodeStore + ?Sized>(store: &S, this: Handle, child: Handle) -> Direction {
    let links = links(store, this);
    if links.left() == Some(child) {
        Direction::Left
    } else if links.right() == Some(child) {
        Direction::Right
    } else {
        Direction::None
    }
}

/// Links `child` under `this` on side `dir`, updating the back-reference.
pub(crate) fn set_child<S: NodeStore + ?Sized>(
    store: &mut S,
    this: Handle,
    child: Option<Handle>,
    dir: Direction,
) -> Option<Handle> {
    if let Some(child) = child {
        links_mut(store, child).set_parent(Some(this));
    }
    links_mut(store, this).set_slot(dir, child);
    child
}

/// Empties the `dir` slot of `this`. The former child keeps its parent link.
#[inline]
pub(crate) fn clear_child<S: NodeStore + ?Sized>(store: &mut S, this: Handle, dir: Direction) {
    links_mut(store, this).set_slot(dir, None);
}

/// Runs the augmentation hook of `this` against its current children.
pub(crate) fn structure_fixup<S: NodeStore + ?Sized>(store: &mut S, this: Handle) {
    let links = *links(store, this);
    let (node, left, right) = store.node_with_children(this, links.left(), links.right());
    node.structure_fixup(left, right);
}

/// Rotates the subtree rooted at `this` toward `dir` and returns its new root.
///
/// The child opposite `dir` is lifted into the place of `this`. Without such a
/// child, or with [`Direction::None`], nothing happens and `this` is returned.
pub(crate) fn rotate<S: NodeStore + ?Sized>(store: &mut S, this: Handle, dir: Direction) -> Handle {
    let other_dir = dir.flip();
    let Some(child) = child_at(store, this, other_dir).filter(|_| dir != Direction::None) else {
        return this;
    };

    let parent = parent(store, this);
    let child_dir = parent.map_or(Direction::None, |p| direction_of(store, p, this));

    clear_child(store, this, other_dir);
    let inner = child_at(store, child, dir);
    set_child(store, this, inner, other_dir);
    clear_child(store, child, dir);
    set_child(store, child, Some(this), dir);

    // Bottom-up: `this` is now below `child`.
    structure_fixup(store, this);
    structure_fixup(store, child);

    match parent {
        Some(parent) => {
            clear_child(store, parent, child_dir);
            set_child(store, parent, Some(child), child_dir);
        }
        None => links_mut(store, child).set_parent(None),
    }
    child
}

/// Walks from `this` to the root, running the augmentation hook on every node
/// passed. Returns the root.
pub(crate) fn ripple_structure_fixup<S: NodeStore + ?Sized>(store: &mut S, this: Handle) -> Handle {
    let mut root = this;
    let mut current = Some(this);
    while let Some(node) = current {
        structure_fixup(store, node);
        root = node;
        current = parent(store, node);
    }
    root
}

/// Detaches `this` and installs `n` in its exact position, color included.
///
/// `n` may currently be a child of `this`.
pub(crate) fn replace_with<S: NodeStore + ?Sized>(store: &mut S, this: Handle, n: Handle) {
    let this_links = *links(store, this);
    set_color(store, n, this_links.color());

    match this_links.parent() {
        Some(parent) => {
            let d = direction_of(store, parent, this);
            set_child(store, parent, None, d);
            if parent != n {
                set_child(store, parent, Some(n), d);
            }
        }
        None => links_mut(store, n).set_parent(None),
    }

    // Clear first so `n` never ends up pointing at itself.
    clear_child(store, n, Direction::Left);
    clear_child(store, n, Direction::Right);
    if let Some(left) = this_links.left()
        && left != n
    {
        set_child(store, n, Some(left), Direction::Left);
    }
    if let Some(right) = this_links.right()
        && right != n
    {
        set_child(store, n, Some(right), Direction::Right);
    }

    clear_child(store, this, Direction::Left);
    clear_child(store, this, Direction::Right);
}

/// Returns the leftmost node of the subtree rooted at `this`.
///
/// For a tree root this is the minimum under the tree's order.
#[must_use]
pub fn leftmost_descendant<S: NodeStore + ?Sized>(store: &S, this: Handle) -> Handle {
    let mut node = this;
    while let Some(left) = links(store, node).left() {
        node = left;
    }
    node
}

/// Returns the rightmost node of the subtree rooted at `this`.
#[must_use]
pub fn rightmost_descendant<S: NodeStore + ?Sized>(store: &S, this: Handle) -> Handle {
    let mut node = this;
    while let Some(right) = links(store, node).right() {
        node = right;
    }
    node
}

/// Returns the in-order successor of `this`, if any.
#[must_use]
pub fn successor<S: NodeStore + ?Sized>(store: &S, this: Handle) -> Option<Handle> {
    if let Some(right) = links(store, this).right() {
        return Some(leftmost_descendant(store, right));
    }
    let mut node = this;
    while let Some(parent) = parent(store, node) {
        if links(store, parent).left() == Some(node) {
            return Some(parent);
        }
        node = parent;
    }
    None
}

/// Returns the in-order predecessor of `this`, if any.
#[must_use]
pub fn predecessor<S: NodeStore + ?Sized>(store: &S, this: Handle) -> Option<Handle> {
    if let Some(left) = links(store, this).left() {
        return Some(rightmost_descendant(store, left));
    }
    let mut node = this;
    while let Some(parent) = parent(store, node) {
        if links(store, parent).right() == Some(node) {
            return Some(parent);
        }
        node = parent;
    }
    None
}

/// Returns the root of the tree containing `this`.
#[must_use]
pub fn root_of<S: NodeStore + ?Sized>(store: &S, this: Handle) -> Handle {
    let mut node = this;
    while let Some(parent) = parent(store, node) {
        node = parent;
    }
    node
}
