use core::fmt;
use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// A reference to a node slot inside a [`NodeStore`](crate::NodeStore).
///
/// Handles are plain indices: they carry no lifetime and no ownership. A handle
/// is only meaningful for the store it was created for, and the tree never
/// allocates or frees the slot behind it.
///
/// `Option<Handle>` is the same size as `Handle`, so absent links cost nothing.
///
/// # Examples
///
/// ```
/// use akakuro::Handle;
///
/// let handle = Handle::from_index(7);
/// assert_eq!(handle.to_index(), 7);
/// ```
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Handle(NonZero<RawHandle>);

impl Handle {
    /// The largest slot index a handle can address.
    pub const MAX: usize = (RawHandle::MAX - 1) as usize;

    /// Creates a handle for the slot at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > Handle::MAX`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and cannot overflow.
        match NonZero::new((index + 1) as RawHandle) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    /// Returns the slot index this handle refers to.
    #[inline]
    #[must_use]
    pub const fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.to_index())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Absent links must stay free.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX`!")]
    fn invalid_handle() {
        let _ = Handle::from_index(Handle::MAX + 1);
    }

    #[test]
    fn debug_shows_index() {
        assert_eq!(alloc::format!("{:?}", Handle::from_index(3)), "Handle(3)");
    }

    proptest! {
        #[test]
        fn handle_round_trip(index in 0..=Handle::MAX) {
            let handle = Handle::from_index(index);
            assert_eq!(handle.to_index(), index);
        }

        #[test]
        fn handle_order_follows_index(a in 0..=Handle::MAX, b in 0..=Handle::MAX) {
            prop_assert_eq!(Handle::from_index(a).cmp(&Handle::from_index(b)), a.cmp(&b));
        }
    }
}
