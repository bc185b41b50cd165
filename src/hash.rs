//! Per-type hash recipes shared by both table variants.
//!
//! The tables have a fixed capacity, so keys hash to a raw,
//! capacity-independent `u64` and the tables reduce it modulo their capacity
//! to obtain a slot index. Every recipe is deterministic and total: equal
//! keys produce equal indices for the lifetime of a table.
//!
//! The recipes are intentionally simple and non-cryptographic. Wider
//! integers pass through unchanged (the modulo reduction does the work),
//! byte-sized keys get a cheap avalanche-style mix so a plain modulo does
//! not collide on low bits, and text keys get a polynomial rolling hash so
//! lexically similar strings spread across buckets.

/// Seed for the single-byte mixing recipe.
const BYTE_SEED: u32 = 0xAAAA_AAAA;

/// Multiplier for the textual rolling hash.
const TEXT_PRIME: u64 = 263;

/// Large odd pseudo-modulus for the textual rolling hash: `(2^15 - 1)^2 - 2`.
const TEXT_PSEUDO_MODULUS: u64 = ((1u64 << 15) - 1) * ((1u64 << 15) - 1) - 2;

/// Keys storable in [`ChainedSet`](crate::ChainedSet) and
/// [`ProbingSet`](crate::ProbingSet).
///
/// `table_hash` must be pure: no side effects, and the same value for equal
/// keys across calls. The tables never cache hashes, so a non-deterministic
/// implementation would strand previously inserted keys.
pub trait TableHash {
    /// Raw, capacity-independent hash of the key.
    fn table_hash(&self) -> u64;
}

impl<T: TableHash + ?Sized> TableHash for &T {
    #[inline]
    fn table_hash(&self) -> u64 {
        (**self).table_hash()
    }
}

macro_rules! impl_identity_hash {
    ($($t:ty),* $(,)?) => {$(
        impl TableHash for $t {
            #[inline]
            fn table_hash(&self) -> u64 {
                *self as u64
            }
        }
    )*};
}

// Wider integers reduce well under a plain modulo; sign-extension of
// negative values is harmless because only determinism matters.
impl_identity_hash!(u16, u32, u64, usize, i16, i32, i64, isize);

/// Mix for byte-sized key domains, branching on the low bit.
#[inline]
fn mix_byte(value: u32) -> u64 {
    let mixed = if value & 1 == 0 {
        (BYTE_SEED << 7) ^ value.wrapping_mul(BYTE_SEED >> 3)
    } else {
        !((BYTE_SEED << 11).wrapping_add(value ^ (BYTE_SEED >> 5)))
    };
    u64::from(mixed)
}

impl TableHash for u8 {
    #[inline]
    fn table_hash(&self) -> u64 {
        mix_byte(u32::from(*self))
    }
}

impl TableHash for i8 {
    #[inline]
    fn table_hash(&self) -> u64 {
        mix_byte(u32::from(*self as u8))
    }
}

impl TableHash for char {
    #[inline]
    fn table_hash(&self) -> u64 {
        mix_byte(u32::from(*self))
    }
}

/// Polynomial rolling hash over UTF-8 bytes.
fn mix_text(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0;
    for &byte in bytes {
        let term = (TEXT_PRIME * TEXT_PSEUDO_MODULUS)
            ^ TEXT_PRIME.wrapping_mul(hash).wrapping_add(u64::from(byte));
        hash = hash.wrapping_add(term % TEXT_PSEUDO_MODULUS);
    }
    hash
}

impl TableHash for str {
    #[inline]
    fn table_hash(&self) -> u64 {
        mix_text(self.as_bytes())
    }
}

// Must agree with the `str` impl so borrowed lookups on `ChainedSet<String>`
// and `ProbingSet<String>` find owned keys.
impl TableHash for String {
    #[inline]
    fn table_hash(&self) -> u64 {
        mix_text(self.as_bytes())
    }
}

/// Reduce a key's raw hash to an index in `[0, capacity)`.
///
/// `capacity` is nonzero; both table constructors enforce that.
#[inline]
pub(crate) fn slot_index<K>(key: &K, capacity: usize) -> usize
where
    K: TableHash + ?Sized,
{
    (key.table_hash() % capacity as u64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_keys_reduce_modulo_capacity() {
        assert_eq!((42u64).table_hash(), 42);
        assert_eq!((42u32).table_hash(), 42);
        assert_eq!(slot_index(&7u32, 5), 2);
        assert_eq!(slot_index(&10u64, 5), 0);
    }

    #[test]
    fn owned_and_borrowed_text_agree() {
        for s in ["", "a", "Hello", "World!", "structure"] {
            assert_eq!(s.table_hash(), String::from(s).table_hash());
        }
    }

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!("Algorithm".table_hash(), "Algorithm".table_hash());
        assert_eq!((17u8).table_hash(), (17u8).table_hash());
        assert_eq!('x'.table_hash(), 'x'.table_hash());
        assert_eq!((-3i32).table_hash(), (-3i32).table_hash());
    }

    #[test]
    fn indices_stay_in_range() {
        for capacity in 1..=9usize {
            for b in 0u8..=255 {
                assert!(slot_index(&b, capacity) < capacity);
            }
            for c in ['\0', 'a', 'é', '中'] {
                assert!(slot_index(&c, capacity) < capacity);
            }
            for s in ["", "Hello", "World!", "Data", "structure", "Algorithm"] {
                assert!(slot_index(&s, capacity) < capacity);
            }
        }
    }

    #[test]
    fn byte_recipe_takes_parity_branches() {
        // Both branches are deterministic; even and odd inputs go through
        // different mixes.
        assert_eq!(mix_byte(2), (2u8).table_hash());
        assert_eq!(mix_byte(3), (3u8).table_hash());
        assert_eq!(
            mix_byte(2),
            u64::from((BYTE_SEED << 7) ^ 2u32.wrapping_mul(BYTE_SEED >> 3))
        );
        assert_eq!(
            mix_byte(3),
            u64::from(!((BYTE_SEED << 11).wrapping_add(3 ^ (BYTE_SEED >> 5))))
        );
    }
}
