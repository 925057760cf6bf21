//! Compile-time defaults shared by the table and its hashers

/// Starting value of the djb2 accumulator.
pub const DJB2_SEED: u64 = 5381;

/// djb2 folds each byte in as `hash * 33 + byte`.
pub const DJB2_MULTIPLIER: u64 = 33;

/// Bucket count used by `HashTable::default()` and the Python constructor.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Seed handed to xxh3 when an `Xxh3` hasher is built with `Xxh3::default()`.
pub const DEFAULT_XXH3_SEED: u64 = 0;
