//! chainhash - fixed-capacity string hash table with separate chaining
//!
//! Core library providing:
//! - djb2 key indexing (with an xxh3 alternative behind `KeyHasher`)
//! - Bucket chains with newest-first insertion and in-place update
//! - Deterministic `{'key': 'value'}` printing in bucket/chain order
//! - A handle-style create/set/get/print/delete surface

pub mod config;
pub mod error;
pub mod handle;
pub mod hashtable;
pub mod key_index;

pub use error::TableError;
pub use hashtable::HashTable;
pub use key_index::{hash_djb2, key_index, Djb2, KeyHasher, Xxh3};

#[cfg(test)]
mod tests;
