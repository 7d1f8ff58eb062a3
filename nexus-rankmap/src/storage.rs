//! Node arena with stable indices and insertion stamps.
//!
//! Storage provides insert/remove/get operations where indices remain valid
//! until explicitly removed. The skip list links nodes by these indices instead
//! of pointers, so erasing or clearing can never leave a dangling reference:
//! a stale index simply fails to resolve, or resolves to a slot whose stamp no
//! longer matches.
//!
//! Backed by [`slab::Slab`], which grows on demand and reuses vacated slots.

use core::marker::PhantomData;

use slab::Slab;

use crate::Index;

/// A stored value tagged with the serial of the insert that created it.
#[derive(Debug)]
struct Slot<T> {
    stamp: u64,
    value: T,
}

/// Growable slab storage addressed by `Idx`.
///
/// Every insert is assigned a fresh, monotonically increasing stamp. A slot
/// that is vacated and reused gets a new stamp, which is how positions held
/// by callers detect that their node is gone.
#[derive(Debug)]
pub(crate) struct Storage<T, Idx: Index> {
    slots: Slab<Slot<T>>,
    next_stamp: u64,
    _marker: PhantomData<Idx>,
}

impl<T, Idx: Index> Storage<T, Idx> {
    /// Creates storage with room for `capacity` values before reallocating.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Slab::with_capacity(capacity),
            next_stamp: 0,
            _marker: PhantomData,
        }
    }

    /// Creates empty storage whose stamps continue after this one's, so no
    /// stamp handed out by either ever repeats.
    pub(crate) fn successor(&self) -> Self {
        Self {
            slots: Slab::new(),
            next_stamp: self.next_stamp,
            _marker: PhantomData,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots allocated.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Inserts a value, returning its stable index and stamp.
    ///
    /// # Panics
    ///
    /// Panics if the slab key no longer fits in `Idx` below its sentinel.
    pub(crate) fn insert(&mut self, value: T) -> (Idx, u64) {
        let entry = self.slots.vacant_entry();
        let Some(idx) = Idx::try_from_usize(entry.key()) else {
            panic!("storage exceeds index type maximum");
        };
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        entry.insert(Slot { stamp, value });
        (idx, stamp)
    }

    /// Removes and returns the value at `idx`, if present.
    #[inline]
    pub(crate) fn remove(&mut self, idx: Idx) -> Option<T> {
        if idx.is_none() {
            return None;
        }
        self.slots.try_remove(idx.as_usize()).map(|slot| slot.value)
    }

    /// Returns a reference to the value at `idx`, if present.
    #[inline]
    pub(crate) fn get(&self, idx: Idx) -> Option<&T> {
        if idx.is_none() {
            return None;
        }
        self.slots.get(idx.as_usize()).map(|slot| &slot.value)
    }

    /// Returns a mutable reference to the value at `idx`, if present.
    #[inline]
    pub(crate) fn get_mut(&mut self, idx: Idx) -> Option<&mut T> {
        if idx.is_none() {
            return None;
        }
        self.slots.get_mut(idx.as_usize()).map(|slot| &mut slot.value)
    }

    /// Returns the stamp of the value at `idx`, if present.
    #[inline]
    pub(crate) fn stamp(&self, idx: Idx) -> Option<u64> {
        if idx.is_none() {
            return None;
        }
        self.slots.get(idx.as_usize()).map(|slot| slot.stamp)
    }

    /// Drops every stored value.
    ///
    /// Stamps keep counting, so positions taken before the clear stay stale
    /// even when their slot index is handed out again.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_get_remove() {
        let mut storage: Storage<u64, u32> = Storage::with_capacity(4);

        let (idx, _) = storage.insert(42);
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(idx), Some(&42));

        assert_eq!(storage.remove(idx), Some(42));
        assert_eq!(storage.get(idx), None);
        assert_eq!(storage.len(), 0);

        // Double remove returns None
        assert_eq!(storage.remove(idx), None);
    }

    #[test]
    fn sentinel_never_resolves() {
        let mut storage: Storage<u64, u32> = Storage::with_capacity(4);
        storage.insert(1);

        assert_eq!(storage.get(u32::NONE), None);
        assert_eq!(storage.stamp(u32::NONE), None);
        assert_eq!(storage.remove(u32::NONE), None);
    }

    #[test]
    fn get_mut() {
        let mut storage: Storage<u64, u32> = Storage::with_capacity(4);

        let (idx, _) = storage.insert(10);
        *storage.get_mut(idx).unwrap() = 20;

        assert_eq!(storage.get(idx), Some(&20));
    }

    #[test]
    fn reused_slot_gets_new_stamp() {
        let mut storage: Storage<&str, u32> = Storage::with_capacity(4);

        let (first, first_stamp) = storage.insert("a");
        storage.remove(first);

        let (second, second_stamp) = storage.insert("b");
        assert_eq!(first, second); // Slot reused
        assert_ne!(first_stamp, second_stamp);
        assert_eq!(storage.stamp(second), Some(second_stamp));
    }

    #[test]
    fn clear_keeps_stamps_monotonic() {
        let mut storage: Storage<u64, u32> = Storage::with_capacity(4);

        let (_, before) = storage.insert(1);
        storage.insert(2);
        storage.clear();
        assert_eq!(storage.len(), 0);

        let (_, after) = storage.insert(3);
        assert!(after > before);
    }

    #[test]
    fn successor_continues_stamps() {
        let mut storage: Storage<u64, u32> = Storage::with_capacity(4);
        let (idx, stamp) = storage.insert(1);

        let mut next = storage.successor();
        assert_eq!(next.len(), 0);
        let (reused, fresh) = next.insert(2);
        assert_eq!(idx, reused);
        assert!(fresh > stamp);
    }

    #[test]
    #[should_panic(expected = "index type maximum")]
    fn index_overflow_panics() {
        let mut storage: Storage<u64, u8> = Storage::with_capacity(256);
        for i in 0..256 {
            storage.insert(i);
        }
    }
}
