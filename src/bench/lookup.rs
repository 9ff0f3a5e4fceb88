//! Containers under test
//!
//! A small trait over the three lookup structures so that one sweep
//! routine can fill and probe all of them.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::hash::{Hash, Hasher};

use crate::bench::rbtree::RedBlackTree;

/// A container that stores keys and answers membership queries
pub trait LookupContainer<K> {
    /// Store `key`; storing an existing key is a no-op
    fn insert_key(&mut self, key: K);

    /// Look `key` up
    fn contains_key(&self, key: &K) -> bool;

    /// Number of distinct keys stored
    fn key_count(&self) -> usize;
}

impl<K: Ord + Copy> LookupContainer<K> for BTreeMap<K, K> {
    fn insert_key(&mut self, key: K) {
        self.entry(key).or_insert(key);
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn key_count(&self) -> usize {
        self.len()
    }
}

impl<K: Hash + Eq + Copy> LookupContainer<K> for HashMap<K, K> {
    fn insert_key(&mut self, key: K) {
        self.entry(key).or_insert(key);
    }

    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    fn key_count(&self) -> usize {
        self.len()
    }
}

impl<K: Ord> LookupContainer<K> for RedBlackTree<K> {
    fn insert_key(&mut self, key: K) {
        self.insert(key);
    }

    fn contains_key(&self, key: &K) -> bool {
        self.contains(key)
    }

    fn key_count(&self) -> usize {
        self.len()
    }
}

/// `f64` key with a total order and bitwise hashing
///
/// Keys are generated from a bounded uniform range, so NaN never occurs
/// and `-0.0` is never produced.
#[derive(Debug, Clone, Copy)]
pub struct F64Key(pub f64);

impl PartialEq for F64Key {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for F64Key {}

impl PartialOrd for F64Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for F64Key {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for F64Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}
