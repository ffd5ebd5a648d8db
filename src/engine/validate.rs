use super::linkage::{color_of, links};
use crate::{Color, Handle, NodeStore, RbNode};

/// A structural defect found by [`validate`].
///
/// These are diagnostics only: no operation of the engine returns them, and a
/// tree that fails validation was corrupted by misuse (for example, changing
/// a key in place or relinking a node into two trees).
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("root {0:?} is red")]
    RedRoot(Handle),
    #[error("red node {child:?} has a red parent {parent:?}")]
    RedRed { parent: Handle, child: Handle },
    #[error("black height mismatch below {node:?}: left {left}, right {right}")]
    BlackHeightMismatch { node: Handle, left: usize, right: usize },
    #[error("{child:?} does not point back to its parent {parent:?}")]
    BrokenParentLink { parent: Option<Handle>, child: Handle },
    #[error("augmented data of {0:?} disagrees with its children")]
    StructureMismatch(Handle),
    #[error("tree reaches {actual} nodes but {expected} are recorded")]
    CountMismatch { expected: usize, actual: usize },
}

/// Checks every red-black invariant of the tree rooted at `root`.
///
/// On success returns the black height, counting the absent leaves as black
/// (so an empty tree has height 1). Also checks that every child points back to
/// its parent and that [`RbNode::structure_validate`] holds on every node.
///
/// This is a debugging aid: it visits every node and is never called by the
/// mutating operations.
///
/// # Errors
///
/// Returns the first defect found, in a depth-first, left-to-right walk.
///
/// # Complexity
///
/// O(n)
pub fn validate<S: NodeStore + ?Sized>(store: &S, root: Option<Handle>) -> Result<usize, ValidationError> {
    check(store, root).map(|(height, _)| height)
}

/// Like [`validate`], also returning the number of reachable nodes.
pub(crate) fn check<S: NodeStore + ?Sized>(store: &S, root: Option<Handle>) -> Result<(usize, usize), ValidationError> {
    let Some(root) = root else {
        return Ok((1, 0));
    };
    if color_of(store, Some(root)) == Color::Red {
        return Err(ValidationError::RedRoot(root));
    }
    check_subtree(store, root, None)
}

fn check_subtree<S: NodeStore + ?Sized>(
    store: &S,
    node: Handle,
    expected_parent: Option<Handle>,
) -> Result<(usize, usize), ValidationError> {
    let node_links = links(store, node);
    if node_links.parent() != expected_parent {
        return Err(ValidationError::BrokenParentLink {
            parent: expected_parent,
            child: node,
        });
    }

    let (left, left_count) = match node_links.left() {
        Some(left) => check_subtree(store, left, Some(node))?,
        None => (1, 0),
    };
    let (right, right_count) = match node_links.right() {
        Some(right) => check_subtree(store, right, Some(node))?,
        None => (1, 0),
    };

    if left != right {
        return Err(ValidationError::BlackHeightMismatch { node, left, right });
    }

    let height = match node_links.color() {
        Color::Black => left + 1,
        Color::Red => {
            for child in [node_links.left(), node_links.right()].into_iter().flatten() {
                if color_of(store, Some(child)) == Color::Red {
                    return Err(ValidationError::RedRed { parent: node, child });
                }
            }
            left
        }
    };

    let this = store.node(node);
    let left_node = node_links.left().map(|h| store.node(h));
    let right_node = node_links.right().map(|h| store.node(h));
    if !this.structure_validate(left_node, right_node) {
        return Err(ValidationError::StructureMismatch(node));
    }

    Ok((height, left_count + right_count + 1))
}
