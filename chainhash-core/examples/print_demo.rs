//! Demo of the chained hash table
//!
//! Demonstrates:
//! - Creating a table
//! - Inserting and updating keys
//! - Printing in bucket/chain order
//! - Looking keys up and tearing the table down
//!
//! Run with `RUST_LOG=chainhash_core=trace` to see bucket placement.

use chainhash_core::{handle, HashTable, TableError};
use env_logger::Builder;
use log::LevelFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::new()
        .filter_level(LevelFilter::Info)
        .format_timestamp_millis()
        .parse_default_env()
        .init();

    println!("=== chainhash demo ===\n");

    let mut table = handle::create(1024)?;
    for key in ["y", "j", "c", "b", "z", "n", "a", "m"] {
        handle::set(Some(&mut table), Some(key), Some(key))?;
    }
    handle::print(Some(&table))?;

    handle::set(Some(&mut table), Some("c"), Some("updated"))?;
    println!(
        "c -> {}",
        handle::get(Some(&table), Some("c")).unwrap_or("(not found)")
    );
    println!(
        "missing -> {}",
        handle::get(Some(&table), Some("missing")).unwrap_or("(not found)")
    );

    // Tiny table: chains form, output is neither sorted nor insertion order
    let mut small = HashTable::new(5)?;
    for key in ["y", "j", "c", "b", "z", "n", "a", "m"] {
        small.set(key, key)?;
    }
    println!("\nSame keys in 5 buckets:");
    small.print()?;
    for index in 0..small.capacity() {
        println!("  bucket {}: {} entries", index, small.bucket_len(index).unwrap_or(0));
    }

    match HashTable::new(0) {
        Err(TableError::InvalidCapacity) => println!("\nzero capacity rejected"),
        other => println!("\nunexpected: {:?}", other.map(|t| t.capacity())),
    }

    handle::delete(Some(small));
    handle::delete(Some(table));
    Ok(())
}
