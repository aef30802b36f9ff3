//! Separate-chaining hash table with a fixed bucket count.
//!
//! Provides the key/value store used for all graph indices. Unlike the
//! standard `HashMap`, the table never rehashes or grows: the bucket
//! count is derived from a size hint at construction and stays fixed, so
//! lookups degrade to linear chain scans under high load factors.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

/// Bucket count used by [`ChainedMap::new`], matching a size hint of 16.
const DEFAULT_SIZE_HINT: usize = 16;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

/// A key/value map backed by separate chaining over a fixed bucket array.
///
/// The bucket count is the construction-time size hint divided by 3,
/// floored, with a minimum of one bucket so that tiny hints stay valid.
/// Keys are hashed with the standard `RandomState` build hasher, which is
/// deterministic within a process and consistent with key equality.
///
/// There is no resizing and no protection against mutation while
/// iterating; the store is strictly single-threaded.
///
/// # Example
///
/// ```rust
/// use costscope::store::ChainedMap;
///
/// let mut map = ChainedMap::with_capacity(12);
/// map.insert("ALPHA".to_string(), 1);
/// map.insert("BETA".to_string(), 2);
///
/// assert!(map.contains_key("ALPHA"));
/// assert_eq!(map.remove("BETA"), Some(2));
/// assert_eq!(map.get("BETA"), None);
/// ```
#[derive(Debug, Clone)]
pub struct ChainedMap<K, V> {
    buckets: Vec<Vec<Entry<K, V>>>,
    len: usize,
    state: RandomState,
}

impl<K: Hash + Eq, V> ChainedMap<K, V> {
    /// Creates a store sized for a small default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_SIZE_HINT)
    }

    /// Creates a store sized for roughly `size_hint` entries.
    ///
    /// The bucket count is `size_hint / 3`, floored, but never below one,
    /// so hints smaller than 3 still produce a usable single-bucket table.
    pub fn with_capacity(size_hint: usize) -> Self {
        let bucket_count = (size_hint / 3).max(1);
        Self {
            buckets: (0..bucket_count).map(|_| Vec::new()).collect(),
            len: 0,
            state: RandomState::new(),
        }
    }

    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        (self.state.hash_one(key) % self.buckets.len() as u64) as usize
    }

    /// Returns a reference to the value associated with `key`, scanning
    /// the bucket chain the key hashes into.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key.borrow() == key)
            .map(|entry| &mut entry.value)
    }

    /// Inserts a key/value pair, returning the previous value when the
    /// key was already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use costscope::store::ChainedMap;
    ///
    /// let mut map = ChainedMap::with_capacity(6);
    /// assert_eq!(map.insert("APP".to_string(), 1), None);
    /// assert_eq!(map.insert("APP".to_string(), 2), Some(1));
    /// assert_eq!(map.get("APP"), Some(&2));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        if let Some(entry) = chain.iter_mut().find(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        chain.push(Entry { key, value });
        self.len += 1;
        None
    }

    /// Inserts only when the key is not already present.
    ///
    /// Returns `true` when the pair was inserted, `false` when an existing
    /// entry was left untouched.
    pub fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        let index = self.bucket_index(&key);
        let chain = &mut self.buckets[index];
        if chain.iter().any(|entry| entry.key == key) {
            return false;
        }
        chain.push(Entry { key, value });
        self.len += 1;
        true
    }

    /// Unlinks the entry for `key`, returning its value when one existed.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|entry| entry.key.borrow() == key)?;
        self.len -= 1;
        Some(chain.remove(position).value)
    }

    /// Returns `true` when an entry for `key` exists.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Iterates over all keys in unspecified (bucket) order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.buckets.iter().flatten().map(|entry| &entry.key)
    }

    /// Iterates over all values in unspecified (bucket) order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.buckets.iter().flatten().map(|entry| &entry.value)
    }

    /// Iterates over all values mutably, in unspecified order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.buckets
            .iter_mut()
            .flatten()
            .map(|entry| &mut entry.value)
    }

    /// Iterates over all key/value pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the fixed bucket count chosen at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Computes occupancy statistics for the table.
    ///
    /// The statistics are derived on demand from the current chains; the
    /// store itself keeps no running counters.
    pub fn stats(&self) -> ChainStats {
        ChainStats {
            entries: self.len,
            buckets: self.buckets.len(),
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl<K: Hash + Eq, V> Default for ChainedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Occupancy snapshot of a [`ChainedMap`].
///
/// `longest_chain` is the length of the most collided bucket; with a
/// fixed bucket count it grows linearly once the table is overloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainStats {
    /// Number of live entries across all chains.
    pub entries: usize,
    /// Fixed bucket count.
    pub buckets: usize,
    /// Length of the longest bucket chain.
    pub longest_chain: usize,
}
