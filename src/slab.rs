use alloc::vec::Vec;

use crate::store::split_slots;
use crate::{Handle, NodeStore, RbNode};

/// A free-list backed [`NodeStore`] with stable handles.
///
/// Removing a record frees its slot for reuse by a later
/// [`insert`](Slab::insert). The slab is owned by the caller; the tree engine
/// only relinks records already stored here.
///
/// # Examples
///
/// ```
/// use akakuro::Slab;
///
/// let mut slab = Slab::new();
/// let a = slab.insert("a");
/// let b = slab.insert("b");
/// assert_eq!(slab.len(), 2);
///
/// assert_eq!(slab.remove(a), "a");
/// let c = slab.insert("c");
/// assert_eq!(c, a); // the freed slot is reused
/// assert_eq!(*slab.get(b), "b");
/// ```
#[derive(Clone, Debug)]
pub struct Slab<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Slab<T> {
    /// Creates an empty slab. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Creates an empty slab with room for at least `capacity` records.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the number of live records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `element` and returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if more than `Handle::MAX + 1` records would be live.
    pub fn insert(&mut self, element: T) -> Handle {
        if let Some(h) = self.free.pop() {
            self.slots[h.to_index()] = Some(element);
            h
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Slab::insert()` - slab is at maximum capacity ({})",
                Handle::MAX + 1
            );
            self.slots.push(Some(element));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Returns true if `handle` addresses a live record.
    #[must_use]
    pub fn contains(&self, handle: Handle) -> bool {
        self.try_get(handle).is_some()
    }

    /// Returns the record behind `handle`, or `None` if its slot is free or out of range.
    #[inline]
    #[must_use]
    pub fn try_get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.to_index()).and_then(Option::as_ref)
    }

    /// # Panics
    ///
    /// Panics if `handle` does not address a live record.
    #[inline]
    #[must_use]
    pub fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Slab::get()` - `handle` is invalid!")
    }

    /// # Panics
    ///
    /// Panics if `handle` does not address a live record.
    #[inline]
    pub fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Slab::get_mut()` - `handle` is invalid!")
    }

    /// Takes the record out of the slab and frees its slot.
    ///
    /// Removing a record that is still linked into a tree leaves that tree
    /// pointing at a dead slot; unlink it first.
    ///
    /// # Panics
    ///
    /// Panics if `handle` does not address a live record.
    pub fn remove(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Slab::remove()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

impl<T> Default for Slab<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RbNode> NodeStore for Slab<T> {
    type Node = T;

    #[inline]
    fn node(&self, handle: Handle) -> &T {
        self.get(handle)
    }

    #[inline]
    fn try_node(&self, handle: Handle) -> Option<&T> {
        self.try_get(handle)
    }

    #[inline]
    fn node_mut(&mut self, handle: Handle) -> &mut T {
        self.get_mut(handle)
    }

    fn node_with_children(
        &mut self,
        handle: Handle,
        left: Option<Handle>,
        right: Option<Handle>,
    ) -> (&mut T, Option<&T>, Option<&T>) {
        let (this, l, r) = split_slots(
            &mut self.slots,
            handle.to_index(),
            left.map(Handle::to_index),
            right.map(Handle::to_index),
        );
        let this = this.as_mut().expect("`Slab::node_with_children()` - `handle` is invalid!");
        (this, l.map(live_child), r.map(live_child))
    }
}

fn live_child<T>(slot: &Option<T>) -> &T {
    slot.as_ref().expect("`Slab::node_with_children()` - child is invalid!")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn slab_capacity() {
        let slab: Slab<u32> = Slab::with_capacity(10);
        assert_eq!(slab.capacity(), 10);
    }

    #[test]
    #[should_panic(expected = "`Slab::get()` - `handle` is invalid!")]
    fn get_after_remove_panics() {
        let mut slab = Slab::new();
        let h = slab.insert(1u32);
        slab.remove(h);
        let _ = slab.get(h);
    }

    #[test]
    fn try_get_reads_free_slots_as_absent() {
        let mut slab = Slab::new();
        let a = slab.insert(1u32);
        let b = slab.insert(2u32);
        slab.remove(a);
        assert_eq!(slab.try_get(a), None);
        assert_eq!(slab.try_get(b), Some(&2));
        assert_eq!(slab.try_get(Handle::from_index(9)), None);
    }

    proptest! {
        #[test]
        fn slab_behaves_like_vec(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut slab: Slab<u32> = Slab::new();

            for operation in operations {
                match operation {
                    Operation::Insert(value) => {
                        let handle = slab.insert(value);
                        model.push((handle, value));
                    }
                    Operation::GetMut(which, value) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        *slab.get_mut(handle) = value;
                        model[index].1 = value;
                    }
                    Operation::Remove(which) => {
                        if model.is_empty() {
                            continue;
                        }

                        let index = which % model.len();
                        let handle = model[index].0;
                        let value1 = slab.remove(handle);
                        let (_, value2) = model.swap_remove(index);
                        prop_assert_eq!(value1, value2);
                        prop_assert!(!slab.contains(handle));
                    }
                    Operation::Clear => {
                        slab.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(slab.len(), model.len());
                prop_assert_eq!(slab.is_empty(), model.is_empty());

                for &(handle, value) in &model {
                    prop_assert!(slab.contains(handle));
                    prop_assert_eq!(*slab.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(u32),
        GetMut(usize, u32),
        Remove(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Insert),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::GetMut(which, value)),
            5 => any::<usize>().prop_map(Operation::Remove),
            1 => Just(Operation::Clear),
        ]
    }
}
