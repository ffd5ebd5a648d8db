use crate::Handle;

/// The color of a red-black node.
///
/// An absent child is treated as [`Color::Black`] everywhere a color is read.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Color {
    /// Freshly inserted nodes start out red.
    #[default]
    Red,
    Black,
}

/// Which side of its parent a node hangs from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Direction {
    Left,
    Right,
    /// No parent, or not applicable.
    None,
}

impl Direction {
    /// Returns the mirrored direction. [`Direction::None`] maps to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use akakuro::Direction;
    ///
    /// assert_eq!(Direction::Left.flip(), Direction::Right);
    /// assert_eq!(Direction::None.flip(), Direction::None);
    /// ```
    #[inline]
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::None => Direction::None,
        }
    }
}

/// The linkage fields a tree node embeds in the caller's own record.
///
/// Callers can read the links but only the engine writes them, so the parent
/// and child references are always kept mutually consistent. The value of a
/// `Links` is irrelevant until its node is inserted: insertion overwrites it.
///
/// # Examples
///
/// ```
/// use akakuro::{Color, Links};
///
/// let links = Links::new();
/// assert_eq!(links.color(), Color::Red);
/// assert!(links.parent().is_none());
/// assert!(links.is_unlinked());
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Links {
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl Links {
    /// Creates unlinked, red links.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            color: Color::Red,
            parent: None,
            left: None,
            right: None,
        }
    }

    /// Returns the node's color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns the parent, or `None` for a root or an unlinked node.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    /// Returns the left child.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> Option<Handle> {
        self.left
    }

    /// Returns the right child.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> Option<Handle> {
        self.right
    }

    /// Returns the child on side `dir`, or `None` for [`Direction::None`].
    #[inline]
    #[must_use]
    pub const fn child(&self, dir: Direction) -> Option<Handle> {
        match dir {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::None => None,
        }
    }

    /// Returns true if the node has no parent and no children.
    ///
    /// A root of a single-node tree also reads as unlinked; the tree wrapper
    /// tells the two apart by comparing against its root.
    #[must_use]
    pub const fn is_unlinked(&self) -> bool {
        self.parent.is_none() && self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    pub(crate) fn set_slot(&mut self, dir: Direction, child: Option<Handle>) {
        match dir {
            Direction::Left => self.left = child,
            Direction::Right => self.right = child,
            Direction::None => {}
        }
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new();
    }
}

/// A record that can be linked into a red-black tree.
///
/// Implementors embed a [`Links`] and hand out access to it. Types that cache
/// per-subtree data (sizes, bounds, counts) also override
/// [`structure_fixup`](RbNode::structure_fixup), which the engine calls bottom-up
/// on every node whose children may have changed.
///
/// # Examples
///
/// A node that tracks the size of its subtree:
///
/// ```
/// use akakuro::{Links, RbNode};
///
/// struct Counted {
///     key: u32,
///     size: usize,
///     links: Links,
/// }
///
/// impl RbNode for Counted {
///     fn links(&self) -> &Links {
///         &self.links
///     }
///
///     fn links_mut(&mut self) -> &mut Links {
///         &mut self.links
///     }
///
///     fn structure_fixup(&mut self, left: Option<&Self>, right: Option<&Self>) {
///         self.size = 1 + left.map_or(0, |n| n.size) + right.map_or(0, |n| n.size);
///     }
///
///     fn structure_validate(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
///         self.size == 1 + left.map_or(0, |n| n.size) + right.map_or(0, |n| n.size)
///     }
/// }
/// ```
pub trait RbNode {
    /// Returns the embedded links.
    fn links(&self) -> &Links;

    /// Returns the embedded links mutably. Only the engine writes through this.
    fn links_mut(&mut self) -> &mut Links;

    /// Recomputes augmented data from the node's current children.
    ///
    /// Never called with stale children: the engine invokes it child-first after
    /// every relink.
    #[inline]
    fn structure_fixup(&mut self, left: Option<&Self>, right: Option<&Self>) {
        let _ = (left, right);
    }

    /// Reports whether the augmented data agrees with the children.
    ///
    /// Only the diagnostic validator calls this.
    #[inline]
    fn structure_validate(&self, left: Option<&Self>, right: Option<&Self>) -> bool {
        let _ = (left, right);
        true
    }
}
