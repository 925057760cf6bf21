//! Integration tests for chainhash-core

use env_logger::Builder;
use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

fn initialize_logger() {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();

        builder
            .filter_level(LevelFilter::Warn)
            .filter_module("chainhash_core", LevelFilter::Debug)
            .format_timestamp_millis()
            .is_test(true)
            .parse_default_env();

        let _ = builder.try_init();
    });
}

/// Parse `{'k': 'v', ...}` back into pairs. Keys and values must not contain
/// quotes or ", ".
fn parse_printed(printed: &str) -> Vec<(String, String)> {
    let body = printed
        .trim_end_matches('\n')
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .expect("printed table is brace-delimited");
    if body.is_empty() {
        return Vec::new();
    }
    body.split(", ")
        .map(|pair| {
            let (key, value) = pair.split_once(": ").expect("pair has a separator");
            (
                key.trim_matches('\'').to_string(),
                value.trim_matches('\'').to_string(),
            )
        })
        .collect()
}

#[cfg(test)]
mod integration_tests {
    use super::{initialize_logger, parse_printed};
    use crate::handle;
    use crate::hashtable::Entry;
    use crate::{key_index, HashTable, TableError};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashMap;

    fn random_key(rng: &mut ChaCha8Rng) -> String {
        let len = rng.gen_range(1..=3);
        (0..len)
            .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
            .collect()
    }

    #[test]
    fn test_basic_workflow() {
        initialize_logger();

        let mut t = handle::create(5).unwrap();
        handle::set(Some(&mut t), Some("a"), Some("1")).unwrap();
        handle::set(Some(&mut t), Some("b"), Some("2")).unwrap();

        assert_eq!(handle::get(Some(&t), Some("a")), Some("1"));
        assert_eq!(handle::get(Some(&t), Some("z")), None);

        handle::delete(Some(t));
    }

    #[test]
    fn test_fresh_table_misses_everything() {
        initialize_logger();

        for capacity in [1, 2, 5, 64, 1024] {
            let ht = HashTable::new(capacity).unwrap();
            for key in ["a", "b", "hetairas", "mentioner", "longer key with spaces"] {
                assert_eq!(ht.get(key), None);
            }
            assert!(ht.is_empty());
        }
    }

    #[test]
    fn test_classic_print_order() {
        initialize_logger();

        let mut ht = HashTable::new(1024).unwrap();
        for key in ["y", "j", "c", "b", "z", "n", "a", "m"] {
            ht.set(key, key).unwrap();
        }
        // Single letters land in consecutive buckets, so bucket order is
        // alphabetical here
        assert_eq!(
            ht.to_string(),
            "{'a': 'a', 'b': 'b', 'c': 'c', 'j': 'j', 'm': 'm', 'n': 'n', 'y': 'y', 'z': 'z'}"
        );

        let mut small = HashTable::new(5).unwrap();
        for key in ["y", "j", "c", "b", "z", "n", "a", "m"] {
            small.set(key, key).unwrap();
        }
        // Not sorted: bucket index first, newest entry first within a bucket
        assert_eq!(
            small.to_string(),
            "{'a': 'a', 'z': 'z', 'b': 'b', 'm': 'm', 'c': 'c', 'n': 'n', 'j': 'j', 'y': 'y'}"
        );
    }

    #[test]
    fn test_brute_forced_collision() {
        initialize_logger();

        let capacity = 1024u64;
        let mut seen: HashMap<u64, String> = HashMap::new();
        let mut pair = None;

        'search: for a in b'a'..=b'z' {
            for b in b'a'..=b'z' {
                for c in b'a'..=b'z' {
                    let key = String::from_utf8(vec![a, b, c]).unwrap();
                    let idx = key_index(key.as_bytes(), capacity);
                    if let Some(prev) = seen.get(&idx) {
                        pair = Some((prev.clone(), key));
                        break 'search;
                    }
                    seen.insert(idx, key);
                }
            }
        }

        let (k1, k2) = pair.expect("three-letter keys must collide in 1024 buckets");
        assert_ne!(k1, k2);

        let mut ht = HashTable::new(capacity as usize).unwrap();
        ht.set(&k1, "first").unwrap();
        ht.set(&k2, "second").unwrap();

        let idx = ht.bucket_index(&k1).unwrap();
        assert_eq!(ht.bucket_index(&k2), Some(idx));
        assert_eq!(ht.bucket_len(idx), Some(2));
        assert_eq!(ht.get(&k1), Some("first"));
        assert_eq!(ht.get(&k2), Some("second"));

        ht.set(&k1, "updated").unwrap();
        assert_eq!(ht.get(&k1), Some("updated"));
        assert_eq!(ht.get(&k2), Some("second"));
        assert_eq!(ht.len(), 2);
    }

    #[test]
    fn test_known_collision_pair() {
        let mut ht = HashTable::new(1024).unwrap();
        ht.set("hetairas", "1").unwrap();
        ht.set("mentioner", "2").unwrap();

        assert_eq!(ht.get("hetairas"), Some("1"));
        assert_eq!(ht.get("mentioner"), Some("2"));
        assert_eq!(ht.to_string(), "{'mentioner': '2', 'hetairas': '1'}");
    }

    #[test]
    fn test_random_workload_matches_std_hashmap() {
        initialize_logger();

        let mut rng = ChaCha8Rng::seed_from_u64(12345);

        for capacity in [1, 7, 128] {
            let mut ht = HashTable::new(capacity).unwrap();
            let mut oracle: HashMap<String, String> = HashMap::new();

            for i in 0..2_000 {
                let key = random_key(&mut rng);
                let value = format!("v{}", i);
                ht.set(&key, &value).unwrap();
                oracle.insert(key, value);
            }

            assert_eq!(ht.len(), oracle.len());
            for (key, value) in &oracle {
                assert_eq!(ht.get(key), Some(value.as_str()));
            }
            for _ in 0..200 {
                let probe = random_key(&mut rng);
                assert_eq!(ht.get(&probe), oracle.get(&probe).map(String::as_str));
            }

            let chained: usize = (0..capacity).map(|i| ht.bucket_len(i).unwrap()).sum();
            assert_eq!(chained, ht.len());
        }
    }

    #[test]
    fn test_print_round_trip() {
        initialize_logger();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut ht = HashTable::new(13).unwrap();
        let mut inserted: HashMap<String, String> = HashMap::new();

        while inserted.len() < 50 {
            let key = random_key(&mut rng);
            let value = format!("value {}", inserted.len());
            ht.set(&key, &value).unwrap();
            inserted.insert(key, value);
        }

        let mut out = Vec::new();
        ht.print_to(&mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with("}\n"));

        let pairs = parse_printed(&printed);
        assert_eq!(pairs.len(), inserted.len());
        let parsed: HashMap<String, String> = pairs.into_iter().collect();
        assert_eq!(parsed, inserted);
    }

    #[test]
    fn test_empty_table_prints_braces() {
        let ht = HashTable::new(3).unwrap();
        let mut out = Vec::new();
        ht.print_to(&mut out).unwrap();
        assert_eq!(out, b"{}\n");
        assert!(parse_printed("{}\n").is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(HashTable::new(0).unwrap_err(), TableError::InvalidCapacity);

        let mut ht = HashTable::new(4).unwrap();
        assert!(matches!(ht.set("", "v"), Err(TableError::InvalidArgument(_))));
        assert_eq!(ht.get(""), None);
        assert!(!ht.contains_key(""));
    }

    #[test]
    fn test_long_chain_drop() {
        initialize_logger();

        // Splice entries in directly; going through `set` would scan the
        // whole chain on every insert.
        let mut ht = HashTable::new(1).unwrap();
        for i in 0..200_000 {
            let head = ht.buckets[0].take();
            ht.buckets[0] = Some(Box::new(Entry {
                key: format!("k{}", i),
                value: String::new(),
                next: head,
            }));
            ht.len += 1;
        }

        assert_eq!(ht.get("k199999"), Some(""));
        ht.delete();
    }
}
