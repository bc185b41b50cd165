//! fixed-hash-set: fixed-capacity hash sets with two independent
//! collision-resolution strategies behind one hashing abstraction.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: make the classic chained-vs-probing trade-off concrete as two
//!   small, independently usable set types that share nothing but the hash
//!   recipes.
//! - Layers:
//!   - hash::TableHash: per-type hash recipes producing a raw `u64`; the
//!     tables reduce it modulo their capacity to a slot index. Leaf
//!     dependency of both variants.
//!   - ChainedSet<T>: N buckets, each an ordered doubly-linked chain whose
//!     nodes live in a slotmap arena. Collisions extend the bucket, so
//!     occupancy is unbounded.
//!   - ProbingSet<T>: one flat array of N tri-state slots
//!     (Empty/Tombstone/Occupied). Collisions walk forward with wraparound;
//!     deletion leaves tombstones so probe chains stay intact. Occupancy is
//!     capped at N.
//!
//! Constraints
//! - Capacity is fixed for a table's lifetime: no resizing, no rehashing.
//!   Zero capacity is a construction-time panic.
//! - Single-threaded mutation model: no interior mutability, no locks;
//!   callers needing concurrent access serialize externally.
//! - Operation outcomes are return values (`bool`, counts), never errors:
//!   a failed insert means "duplicate" (or "full", probing only), a zero
//!   removal count means "not present".
//! - Lookups return booleans/counts, never handles into internal storage.
//!
//! Why two concrete types instead of one trait?
//! - The pair is closed: nothing dispatches over "a table" at runtime, and
//!   the variants differ in surface (`is_full` is meaningless for
//!   chaining). Each type states its own invariants precisely.
//!
//! Notes and non-goals
//! - The stored value is its own key: these are sets, not maps.
//! - Tombstones are reclaimed only by `clear`; deletion never shortens a
//!   probe chain.
//! - Iteration is read-only and ordered (bucket/slot index, then insertion
//!   order within a chained bucket); do not mutate while iterating.
//! - `Display` renders the occupied entries with their indices, one per
//!   line, for diagnostics.

pub mod chained;
mod chained_proptest;
pub mod hash;
pub mod probing;
mod probing_proptest;

// Public surface
pub use chained::ChainedSet;
pub use hash::TableHash;
pub use probing::ProbingSet;
