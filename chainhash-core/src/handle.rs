//! Handle-style surface: create / set / get / print / delete
//!
//! Mirrors the table's lifecycle with explicit, possibly absent arguments so a
//! test driver can exercise the absent-table and absent-argument paths.
//! `delete` takes the table by value, so a destroyed handle cannot be reused.

use crate::error::{Result, TableError};
use crate::hashtable::HashTable;
use crate::key_index::KeyHasher;
use log::warn;
use std::io;

/// Create a djb2 table with `capacity` buckets
pub fn create(capacity: usize) -> Result<HashTable> {
    HashTable::new(capacity)
}

/// Insert or update `key` in `table`
///
/// # Errors
/// `InvalidArgument` when the table, key or value is absent or the key is
/// empty; `AllocationFailure` when a copy cannot be made.
pub fn set<S: KeyHasher>(
    table: Option<&mut HashTable<S>>,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    let (table, key, value) = match (table, key, value) {
        (Some(table), Some(key), Some(value)) => (table, key, value),
        (None, _, _) => return Err(reject("table is absent")),
        (_, None, _) => return Err(reject("key is absent")),
        (_, _, None) => return Err(reject("value is absent")),
    };
    table.set(key, value)
}

fn reject(reason: &'static str) -> TableError {
    warn!("rejected set: {}", reason);
    TableError::InvalidArgument(reason)
}

/// Look up `key`; absent table, absent key and empty key all miss
pub fn get<'a, S: KeyHasher>(table: Option<&'a HashTable<S>>, key: Option<&str>) -> Option<&'a str> {
    table?.get(key?)
}

/// Print `table` to stdout; an absent table prints nothing
pub fn print<S>(table: Option<&HashTable<S>>) -> io::Result<()> {
    match table {
        Some(table) => table.print(),
        None => Ok(()),
    }
}

/// Destroy `table`; no-op when absent
pub fn delete<S>(table: Option<HashTable<S>>) {
    if let Some(table) = table {
        table.delete();
    }
}
