//! Fixed-capacity hash table with separate chaining
//!
//! Provides:
//! - String keys and values, owned copies made on insert
//! - One singly-linked chain per bucket, newest entry at the head
//! - Update-in-place for duplicate keys (keys are unique table-wide)
//! - Deterministic `{'key': 'value', ...}` rendering in bucket/chain order

use crate::config::DEFAULT_CAPACITY;
use crate::error::{Result, TableError};
use crate::key_index::{Djb2, KeyHasher};
use log::{debug, trace, warn};
use std::fmt;
use std::io::{self, Write};

/// Node in a bucket chain
pub(crate) struct Entry {
    pub(crate) key: String,
    pub(crate) value: String,
    pub(crate) next: Option<Box<Entry>>,
}

/// Walks one chain head to tail
struct Chain<'a> {
    next: Option<&'a Entry>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.next?;
        self.next = entry.next.as_deref();
        Some(entry)
    }
}

/// String hash table with a fixed number of buckets
pub struct HashTable<S = Djb2> {
    /// Chain heads, one per bucket; length never changes after creation
    pub(crate) buckets: Vec<Option<Box<Entry>>>,

    /// Number of entries across all chains
    pub(crate) len: usize,

    /// Maps keys to buckets
    pub(crate) hasher: S,
}

/// Copies `s` into a freshly allocated string, reporting allocation failure.
fn copy_str(s: &str) -> Result<String> {
    let mut copy = String::new();
    copy.try_reserve_exact(s.len()).map_err(|err| {
        warn!("failed to allocate {} bytes for a string copy", s.len());
        TableError::from(err)
    })?;
    copy.push_str(s);
    Ok(copy)
}

impl HashTable<Djb2> {
    /// Create a table with `capacity` buckets hashed by djb2
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero, `AllocationFailure` if the
    /// bucket array cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, Djb2)
    }
}

impl<S: KeyHasher> HashTable<S> {
    /// Create a table with `capacity` buckets placed by `hasher`
    pub fn with_hasher(capacity: usize, hasher: S) -> Result<Self> {
        if capacity == 0 {
            warn!("rejected hash table with zero capacity");
            return Err(TableError::InvalidCapacity);
        }

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(capacity).map_err(|err| {
            warn!("failed to allocate {} buckets", capacity);
            TableError::from(err)
        })?;
        buckets.resize_with(capacity, || None);

        debug!("created hash table with {} buckets", capacity);

        Ok(HashTable {
            buckets,
            len: 0,
            hasher,
        })
    }

    /// Bucket that `key` maps to, or `None` for an empty key
    pub fn bucket_index(&self, key: &str) -> Option<usize> {
        if key.is_empty() {
            return None;
        }
        Some(self.index_of(key))
    }

    #[inline]
    fn index_of(&self, key: &str) -> usize {
        // The result is below the bucket count, so it fits back into usize
        self.hasher.index(key.as_bytes(), self.buckets.len() as u64) as usize
    }

    /// Insert or update `key`
    ///
    /// A new key is prepended to its bucket's chain. An existing key has its
    /// value replaced in place. The value is copied before the chain is
    /// touched, so on error the table is left as it was.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty key, `AllocationFailure` if a copy of
    /// the key or value cannot be allocated.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key.is_empty() {
            warn!("rejected set with an empty key");
            return Err(TableError::InvalidArgument("key must not be empty"));
        }

        let value = copy_str(value)?;
        let idx = self.index_of(key);

        let mut current = self.buckets[idx].as_deref_mut();
        while let Some(entry) = current {
            if entry.key == key {
                trace!("updated '{}' in bucket {}", key, idx);
                entry.value = value;
                return Ok(());
            }
            current = entry.next.as_deref_mut();
        }

        let owned_key = copy_str(key)?;
        let head = self.buckets[idx].take();
        if head.is_some() {
            trace!("collision in bucket {}: '{}' becomes the chain head", idx, key);
        } else {
            trace!("inserted '{}' into empty bucket {}", key, idx);
        }

        self.buckets[idx] = Some(Box::new(Entry {
            key: owned_key,
            value,
            next: head,
        }));
        self.len += 1;

        Ok(())
    }

    /// Value stored under `key`, or `None` if absent or `key` is empty
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }

        let idx = self.index_of(key);
        self.chain(idx)
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }

    /// Like `get`, but names the reason for a miss
    ///
    /// # Errors
    /// `InvalidArgument` for an empty key, `NotFound` when no entry matches.
    pub fn try_get(&self, key: &str) -> Result<&str> {
        if key.is_empty() {
            return Err(TableError::InvalidArgument("key must not be empty"));
        }
        self.get(key)
            .ok_or_else(|| TableError::NotFound(key.to_string()))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl<S> HashTable<S> {
    fn chain(&self, idx: usize) -> Chain<'_> {
        Chain {
            next: self.buckets[idx].as_deref(),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets, fixed at creation
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Chain length of bucket `index`, `None` if out of range
    pub fn bucket_len(&self, index: usize) -> Option<usize> {
        if index >= self.buckets.len() {
            return None;
        }
        Some(self.chain(index).count())
    }

    /// Hasher placing this table's keys
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Iterate over `(key, value)` pairs in print order
    ///
    /// Buckets are visited from 0 upward; within a bucket the most recently
    /// inserted key comes first. This is not insertion order and not sorted.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.buckets
            .iter()
            .flat_map(|head| Chain {
                next: head.as_deref(),
            })
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    /// Write the table followed by a newline to `out`
    pub fn print_to<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{}", self)
    }

    /// Write the table followed by a newline to stdout
    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.print_to(stdout.lock())
    }

    /// Tear the table down, releasing every entry and the bucket array
    pub fn delete(self) {
        debug!(
            "deleting hash table with {} entries in {} buckets",
            self.len,
            self.buckets.len()
        );
        drop(self);
    }
}

impl<S> Drop for HashTable<S> {
    fn drop(&mut self) {
        // Unlink nodes one at a time; the default recursive drop of a long
        // chain would run out of stack.
        for head in self.buckets.iter_mut() {
            let mut current = head.take();
            while let Some(mut entry) = current {
                current = entry.next.take();
            }
        }
    }
}

impl<S> fmt::Display for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': '{}'", key, value)?;
        }
        f.write_str("}")
    }
}

impl<S: fmt::Debug> fmt::Debug for HashTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("capacity", &self.buckets.len())
            .field("len", &self.len)
            .field("hasher", &self.hasher)
            .finish()
    }
}

impl Default for HashTable<Djb2> {
    fn default() -> Self {
        HashTable {
            buckets: (0..DEFAULT_CAPACITY).map(|_| None).collect(),
            len: 0,
            hasher: Djb2,
        }
    }
}
