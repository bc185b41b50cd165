//! Linear-probing fixed-capacity hash set with tombstone deletion.
//!
//! `ProbingSet<T>` keeps all keys in one flat array of tri-state slots. A
//! key starts at its hash index and walks forward one slot at a time
//! (wrapping at the end) until the probe resolves. Deletion never empties a
//! slot; it leaves a tombstone so probe sequences that pass through the slot
//! still reach colliding keys stored behind it. Tombstones are reclaimed
//! only by `clear`, trading slot reuse for probe-sequence correctness.

use crate::hash::{slot_index, TableHash};
use core::borrow::Borrow;
use core::fmt;

/// One slot of the table.
///
/// The explicit tagged variant keeps "never used" and "deleted" distinct;
/// probes stop at `Empty` but must walk past `Tombstone`.
#[derive(Debug, Clone)]
enum Slot<T> {
    Empty,
    Tombstone,
    Occupied(T),
}

/// Fixed-capacity hash set resolving collisions by linear probing.
///
/// Capacity is the slot count, fixed for the set's lifetime, and also the
/// occupancy ceiling: once every slot is occupied, `insert` rejects new
/// keys. Every probe is bounded by one full pass over the table, so all
/// operations terminate even on pathological all-tombstone layouts.
#[derive(Debug, Clone)]
pub struct ProbingSet<T> {
    slots: Vec<Slot<T>>,
    len: usize,
}

impl<T: TableHash + Eq> ProbingSet<T> {
    /// Create a set with `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-slot table has no valid index
    /// for any key.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity != 0, "table capacity must be nonzero");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Empty);
        Self { slots, len: 0 }
    }

    /// Create a set with `capacity` slots and insert `keys` in order through
    /// the normal insert path; duplicates, and any key arriving after the
    /// table fills, are silently ignored.
    pub fn from_keys<I>(capacity: usize, keys: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_capacity(capacity);
        set.extend(keys);
        set
    }

    /// Insert a key.
    ///
    /// Returns `false` when the table is full or an equal key is already
    /// present. A successful insert prefers reusing the first tombstone met
    /// on the probe path over extending the chain into a later empty slot;
    /// that keeps average probe lengths short over the table's lifetime.
    pub fn insert(&mut self, key: T) -> bool {
        if self.is_full() {
            return false;
        }
        let capacity = self.slots.len();
        let mut index = slot_index(&key, capacity);
        let mut reusable: Option<usize> = None;
        let mut probed = 0;
        while probed < capacity {
            match &self.slots[index] {
                Slot::Occupied(stored) if *stored == key => return false,
                Slot::Occupied(_) => {}
                Slot::Tombstone => {
                    if reusable.is_none() {
                        reusable = Some(index);
                    }
                }
                Slot::Empty => break,
            }
            probed += 1;
            index = (index + 1) % capacity;
        }
        let target = match reusable {
            Some(tombstone) => tombstone,
            None if probed < capacity => index,
            // A full pass saw neither an empty slot nor a tombstone, so
            // every slot is occupied; the is_full check above rules that
            // out.
            None => unreachable!("probe exhausted a table that is not full"),
        };
        self.slots[target] = Slot::Occupied(key);
        self.len += 1;
        true
    }

    /// Probe for `key`, returning its slot index when present.
    ///
    /// Walks past tombstones and mismatched occupied slots, stopping at the
    /// first empty slot or after one full pass.
    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: TableHash + Eq + ?Sized,
    {
        let capacity = self.slots.len();
        let mut index = slot_index(key, capacity);
        for _ in 0..capacity {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(stored) if stored.borrow() == key => return Some(index),
                _ => {}
            }
            index = (index + 1) % capacity;
        }
        None
    }

    /// Whether an equal key is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: TableHash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Remove `key`, returning `1` when it was present and `0` otherwise.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: TableHash + Eq + ?Sized,
    {
        match self.find(key) {
            Some(index) => {
                // Tombstone, not Empty: keys that hashed to an earlier index
                // may have probed through this slot and must stay reachable.
                self.slots[index] = Slot::Tombstone;
                self.len -= 1;
                1
            }
            None => 0,
        }
    }

    /// Reset every slot to empty. The only operation that reclaims
    /// tombstones.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.len = 0;
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot is occupied; further inserts are rejected.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Slot count, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Enumerate `(slot_index, key)` pairs over occupied slots in index
    /// order. Do not mutate the set while iterating.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: self.slots.iter().enumerate(),
        }
    }
}

impl<T: TableHash + Eq> Extend<T> for ProbingSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        for key in keys {
            let _ = self.insert(key);
        }
    }
}

/// Iterator over `(slot_index, &key)` entries of a [`ProbingSet`].
pub struct Iter<'a, T> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Slot<T>>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        for (index, slot) in self.slots.by_ref() {
            if let Slot::Occupied(key) = slot {
                return Some((index, key));
            }
        }
        None
    }
}

/// Human-readable listing: one line per occupied slot, `slot <i>: key`.
impl<T: TableHash + Eq + fmt::Display> fmt::Display for ProbingSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, key) in self.iter() {
            writeln!(f, "slot {index}: {key}")?;
        }
        Ok(())
    }
}
