//! Key indexing: byte string → bucket slot
//!
//! Provides:
//! - djb2 rolling hash (the default, and what the table's invariants refer to)
//! - `KeyHasher` seam so a table can be built over xxh3 instead
//! - modulo mapping into `[0, capacity)`

use crate::config::{DEFAULT_XXH3_SEED, DJB2_MULTIPLIER, DJB2_SEED};
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// djb2 hash of `key`: start at 5381, then `hash = hash * 33 + byte` per byte.
///
/// Arithmetic wraps at 64 bits.
#[inline]
pub fn hash_djb2(key: &[u8]) -> u64 {
    key.iter().fold(DJB2_SEED, |hash, &byte| {
        hash.wrapping_mul(DJB2_MULTIPLIER).wrapping_add(u64::from(byte))
    })
}

/// Bucket slot of `key` in a table of `capacity` buckets.
///
/// `capacity` must be nonzero; table construction already rejects zero.
#[inline]
pub fn key_index(key: &[u8], capacity: u64) -> u64 {
    hash_djb2(key) % capacity
}

/// Hash function used by a table to place its keys
pub trait KeyHasher {
    /// Hash the raw key bytes
    fn hash(&self, key: &[u8]) -> u64;

    /// Map `key` to a slot in `[0, capacity)`
    #[inline]
    fn index(&self, key: &[u8], capacity: u64) -> u64 {
        self.hash(key) % capacity
    }
}

/// The classic djb2 hasher
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Djb2;

impl KeyHasher for Djb2 {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        hash_djb2(key)
    }
}

/// Seeded xxHash3
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Xxh3 {
    pub seed: u64,
}

impl Xxh3 {
    pub fn with_seed(seed: u64) -> Self {
        Xxh3 { seed }
    }
}

impl Default for Xxh3 {
    fn default() -> Self {
        Self::with_seed(DEFAULT_XXH3_SEED)
    }
}

impl KeyHasher for Xxh3 {
    #[inline]
    fn hash(&self, key: &[u8]) -> u64 {
        xxh3_64_with_seed(key, self.seed)
    }
}
