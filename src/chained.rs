//! Separate-chaining fixed-capacity hash set.
//!
//! `ChainedSet<T>` owns a fixed array of buckets; every key lives in the
//! bucket its hash selects, and collisions simply extend that bucket. Each
//! bucket is an ordered doubly-linked list whose nodes live in a
//! `slotmap::SlotMap` arena, so predecessor/successor links are generational
//! keys rather than raw pointers. The arena keeps the link-integrity
//! invariant easy to state and check: `a.next == b` iff `b.prev == a` at
//! every quiescent point.

use crate::hash::{slot_index, TableHash};
use core::borrow::Borrow;
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

#[derive(Debug, Clone)]
struct Node<T> {
    key: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

/// One chain of colliding keys, in insertion order.
#[derive(Debug, Clone)]
struct Bucket<T> {
    nodes: SlotMap<DefaultKey, Node<T>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Bucket<T> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// O(1) tail append.
    fn push_back(&mut self, key: T) {
        let node = self.nodes.insert(Node {
            key,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(node),
            None => self.head = Some(node),
        }
        self.tail = Some(node);
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        self.iter().any(|stored| stored.borrow() == key)
    }

    /// Remove every node equal to `key`, returning how many were unlinked.
    ///
    /// The set's insert path never creates duplicates, but the list stays
    /// duplicate-tolerant so its contract does not depend on the caller's.
    fn erase<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut removed = 0;
        let mut cursor = self.head;
        while let Some(node) = cursor {
            cursor = self.nodes[node].next;
            if self.nodes[node].key.borrow() == key {
                self.unlink(node);
                removed += 1;
            }
        }
        removed
    }

    /// Detach one node, relinking its neighbors (or head/tail) around it.
    fn unlink(&mut self, node: DefaultKey) {
        let Node { prev, next, .. } = self.nodes.remove(node).unwrap();
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    /// Keys in insertion order.
    fn iter(&self) -> BucketIter<'_, T> {
        BucketIter {
            nodes: &self.nodes,
            cursor: self.head,
        }
    }
}

struct BucketIter<'a, T> {
    nodes: &'a SlotMap<DefaultKey, Node<T>>,
    cursor: Option<DefaultKey>,
}

impl<'a, T> Iterator for BucketIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.nodes[self.cursor?];
        self.cursor = node.next;
        Some(&node.key)
    }
}

/// Fixed-capacity hash set resolving collisions by separate chaining.
///
/// Capacity is the bucket count, fixed for the set's lifetime; occupancy is
/// unbounded (buckets grow). `insert` rejects keys already present, `remove`
/// reports how many nodes it unlinked, and `iter` enumerates keys bucket by
/// bucket in insertion order within each bucket.
#[derive(Debug, Clone)]
pub struct ChainedSet<T> {
    buckets: Vec<Bucket<T>>,
    len: usize,
}

impl<T: TableHash + Eq> ChainedSet<T> {
    /// Create a set with `capacity` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; a zero-bucket table has no valid index
    /// for any key.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity != 0, "table capacity must be nonzero");
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Bucket::new);
        Self { buckets, len: 0 }
    }

    /// Create a set with `capacity` buckets and insert `keys` in order
    /// through the normal insert path; duplicates are silently ignored.
    pub fn from_keys<I>(capacity: usize, keys: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = Self::with_capacity(capacity);
        set.extend(keys);
        set
    }

    /// Insert a key, returning `false` if an equal key is already present.
    pub fn insert(&mut self, key: T) -> bool {
        let index = slot_index(&key, self.buckets.len());
        let bucket = &mut self.buckets[index];
        if bucket.contains(&key) {
            return false;
        }
        bucket.push_back(key);
        self.len += 1;
        true
    }

    /// Whether an equal key is present. Scans only the key's own bucket.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: TableHash + Eq + ?Sized,
    {
        let index = slot_index(key, self.buckets.len());
        self.buckets[index].contains(key)
    }

    /// Remove every key equal to `key`, returning how many were removed.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: TableHash + Eq + ?Sized,
    {
        let index = slot_index(key, self.buckets.len());
        let removed = self.buckets[index].erase(key);
        self.len -= removed;
        removed
    }

    /// Drop every key; bucket count is unchanged.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket count, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Enumerate `(bucket_index, key)` pairs, buckets in index order and
    /// keys in insertion order within a bucket. Do not mutate the set while
    /// iterating.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buckets: &self.buckets,
            bucket_index: 0,
            cursor: self.buckets[0].head,
        }
    }
}

impl<T: TableHash + Eq> Extend<T> for ChainedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, keys: I) {
        for key in keys {
            let _ = self.insert(key);
        }
    }
}

/// Iterator over `(bucket_index, &key)` entries of a [`ChainedSet`].
pub struct Iter<'a, T> {
    buckets: &'a [Bucket<T>],
    bucket_index: usize,
    cursor: Option<DefaultKey>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (usize, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(key) = self.cursor {
                let node = &self.buckets[self.bucket_index].nodes[key];
                self.cursor = node.next;
                return Some((self.bucket_index, &node.key));
            }
            self.bucket_index += 1;
            if self.bucket_index >= self.buckets.len() {
                return None;
            }
            self.cursor = self.buckets[self.bucket_index].head;
        }
    }
}

/// Human-readable listing: one line per non-empty bucket,
/// `bucket <i>: a -> b -> c`.
impl<T: fmt::Display> fmt::Display for ChainedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            write!(f, "bucket {index}:")?;
            for (position, key) in bucket.iter().enumerate() {
                if position == 0 {
                    write!(f, " {key}")?;
                } else {
                    write!(f, " -> {key}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Walk the chain both ways and check that forward and backward links
    /// agree with each other and with head/tail.
    fn assert_links<T: Eq + core::fmt::Debug>(bucket: &Bucket<T>) {
        let mut seen = 0;
        let mut prev: Option<DefaultKey> = None;
        let mut cursor = bucket.head;
        while let Some(node) = cursor {
            assert_eq!(bucket.nodes[node].prev, prev, "prev link mismatch");
            prev = Some(node);
            cursor = bucket.nodes[node].next;
            seen += 1;
        }
        assert_eq!(bucket.tail, prev, "tail must be the last reachable node");
        assert_eq!(seen, bucket.len(), "every node must be reachable");
    }

    fn keys(bucket: &Bucket<i32>) -> Vec<i32> {
        bucket.iter().copied().collect()
    }

    /// Invariant: tail append preserves insertion order and link integrity.
    #[test]
    fn bucket_push_back_orders_and_links() {
        let mut bucket: Bucket<i32> = Bucket::new();
        assert!(bucket.is_empty());
        for k in [1, 2, 3] {
            bucket.push_back(k);
            assert_links(&bucket);
        }
        assert_eq!(keys(&bucket), vec![1, 2, 3]);
        assert_eq!(bucket.len(), 3);
    }

    /// Invariant: erasing the head moves `head` to its successor and leaves
    /// the rest of the chain intact.
    #[test]
    fn bucket_erase_head() {
        let mut bucket: Bucket<i32> = Bucket::new();
        bucket.push_back(1);
        bucket.push_back(2);
        bucket.push_back(3);
        assert_eq!(bucket.erase(&1), 1);
        assert_links(&bucket);
        assert_eq!(keys(&bucket), vec![2, 3]);
    }

    /// Invariant: erasing the tail moves `tail` to its predecessor.
    #[test]
    fn bucket_erase_tail() {
        let mut bucket: Bucket<i32> = Bucket::new();
        bucket.push_back(1);
        bucket.push_back(2);
        bucket.push_back(3);
        assert_eq!(bucket.erase(&3), 1);
        assert_links(&bucket);
        assert_eq!(keys(&bucket), vec![1, 2]);
    }

    /// Invariant: erasing an interior node relinks both neighbors directly.
    #[test]
    fn bucket_erase_interior() {
        let mut bucket: Bucket<i32> = Bucket::new();
        bucket.push_back(1);
        bucket.push_back(2);
        bucket.push_back(3);
        assert_eq!(bucket.erase(&2), 1);
        assert_links(&bucket);
        assert_eq!(keys(&bucket), vec![1, 3]);
    }

    /// Invariant: the list primitive removes *every* match in one pass,
    /// even though the set's insert path never creates duplicates.
    #[test]
    fn bucket_erase_is_duplicate_tolerant() {
        let mut bucket: Bucket<i32> = Bucket::new();
        for k in [7, 1, 7, 2, 7] {
            bucket.push_back(k);
        }
        assert_eq!(bucket.erase(&7), 3);
        assert_links(&bucket);
        assert_eq!(keys(&bucket), vec![1, 2]);
        assert_eq!(bucket.erase(&7), 0);
    }

    /// Invariant: erasing the sole node resets both head and tail.
    #[test]
    fn bucket_erase_single_node_resets_ends() {
        let mut bucket: Bucket<i32> = Bucket::new();
        bucket.push_back(9);
        assert_eq!(bucket.erase(&9), 1);
        assert!(bucket.is_empty());
        assert_eq!(bucket.head, None);
        assert_eq!(bucket.tail, None);
        // Reusable after emptying.
        bucket.push_back(4);
        assert_links(&bucket);
        assert_eq!(keys(&bucket), vec![4]);
    }

    /// Invariant: every key lands in the bucket its hash selects.
    #[test]
    fn keys_land_in_their_hash_bucket() {
        let mut set: ChainedSet<u32> = ChainedSet::with_capacity(7);
        for k in 0..40u32 {
            assert!(set.insert(k));
        }
        for (bucket, key) in set.iter() {
            assert_eq!(bucket, slot_index(key, 7));
        }
        assert_eq!(set.len(), 40);
    }

    /// Invariant: occupancy equals the sum of bucket lengths after a mixed
    /// workload.
    #[test]
    fn len_matches_sum_of_bucket_lengths() {
        let mut set: ChainedSet<u32> = ChainedSet::with_capacity(3);
        for k in 0..20u32 {
            set.insert(k);
        }
        for k in (0..20u32).step_by(3) {
            set.remove(&k);
        }
        let total: usize = set.buckets.iter().map(Bucket::len).sum();
        assert_eq!(set.len(), total);
        for bucket in &set.buckets {
            assert_links(bucket);
        }
    }

    /// Invariant: borrowed lookup works (store `String`, query with `&str`).
    #[test]
    fn borrowed_lookup_with_str() {
        let mut set: ChainedSet<String> = ChainedSet::with_capacity(4);
        assert!(set.insert("hello".to_string()));
        assert!(set.contains("hello"));
        assert!(!set.contains("world"));
        assert_eq!(set.remove("hello"), 1);
        assert!(!set.contains("hello"));
    }
}
