//! Chained hash table keyed by names.
//!
//! [`HashStore`] is the one table implementation behind every game
//! collection. Each bucket owns a chain of entries; the table grows by
//! relinking entries into a larger bucket array before an insertion would
//! push the load factor to [`LOAD_FACTOR_THRESHOLD`].

use tracing::debug;

/// Bucket count used when a store is created without an explicit capacity.
pub const INITIAL_CAPACITY: usize = 13;

/// Occupied-entries-per-bucket ratio that an insertion must never reach.
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.7;

/// Modulus bounding intermediate hash values.
pub const HASH_MODULUS: u64 = 1_000_000_007;

const HASH_BASE: u64 = 31;

// Integer form of LOAD_FACTOR_THRESHOLD so the growth check stays exact.
const LOAD_NUMERATOR: usize = 7;
const LOAD_DENOMINATOR: usize = 10;

/// Polynomial rolling hash over a name.
///
/// Every character contributes `code - 'a' + 1`, weighted by successive powers
/// of 31, all reduced modulo [`HASH_MODULUS`]. Characters below `'a'`
/// (uppercase letters, the space) yield negative contributions, which are
/// folded back into `[0, HASH_MODULUS)` so any text hashes deterministically.
pub fn polynomial_hash(key: &str) -> u64 {
    let modulus = HASH_MODULUS as i64;
    let mut hash = 0u64;
    let mut power = 1u64;
    for ch in key.chars() {
        let code = (ch as i64 - 'a' as i64 + 1).rem_euclid(modulus) as u64;
        hash = (hash + code * power) % HASH_MODULUS;
        power = (power * HASH_BASE) % HASH_MODULUS;
    }
    hash
}

#[derive(Debug, Clone)]
struct Entry<V> {
    key: String,
    value: V,
}

/// Name-keyed associative store with chained buckets and incremental growth.
///
/// Keys are unique. [`HashStore::insert`] never overwrites and
/// [`HashStore::update`] never creates; callers pick one after a
/// [`HashStore::contains`] check. A missing key is a plain `None`/`false`,
/// never an error.
#[derive(Debug, Clone)]
pub struct HashStore<V> {
    buckets: Vec<Vec<Entry<V>>>,
    len: usize,
}

impl<V> HashStore<V> {
    /// Create a store with [`INITIAL_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_CAPACITY)
    }

    /// Create a store with `capacity` empty buckets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut buckets = Vec::with_capacity(capacity);
        buckets.resize_with(capacity, Vec::new);
        Self { buckets, len: 0 }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Entries per bucket.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Bucket index of `key` under the current capacity.
    pub fn bucket_index(&self, key: &str) -> usize {
        (polynomial_hash(key) % self.capacity() as u64) as usize
    }

    /// Returns true when `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Borrow the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Mutably borrow the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    /// Insert a new entry. Returns false (and drops `value`) if `key` exists.
    ///
    /// Grows the table first whenever the insertion would bring the load
    /// factor to [`LOAD_FACTOR_THRESHOLD`] or above.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        while self.would_overload(self.len + 1) {
            self.rehash();
        }
        let index = self.bucket_index(&key);
        self.buckets[index].push(Entry { key, value });
        self.len += 1;
        true
    }

    /// Replace the value of an existing entry. Returns false if `key` is absent.
    pub fn update(&mut self, key: &str, value: V) -> bool {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Unlink the entry stored under `key` and hand back its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let chain = &mut self.buckets[index];
        let position = chain.iter().position(|entry| entry.key == key)?;
        let entry = chain.swap_remove(position);
        self.len -= 1;
        Some(entry.value)
    }

    /// Grow to `2 * capacity + 1` buckets, relinking every entry.
    ///
    /// Entries are moved into the new chains; values are never cloned.
    pub fn rehash(&mut self) {
        let old_capacity = self.capacity();
        let new_capacity = old_capacity * 2 + 1;
        let mut buckets: Vec<Vec<Entry<V>>> = Vec::with_capacity(new_capacity);
        buckets.resize_with(new_capacity, Vec::new);

        for entry in std::mem::take(&mut self.buckets).into_iter().flatten() {
            let index = (polynomial_hash(&entry.key) % new_capacity as u64) as usize;
            buckets[index].push(entry);
        }
        self.buckets = buckets;

        debug!(
            old_capacity,
            new_capacity,
            entries = self.len,
            "rehashed store"
        );
    }

    /// Iterate over `(key, value)` pairs in bucket order (unspecified).
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (entry.key.as_str(), &entry.value))
    }

    /// Iterate over stored keys in bucket order (unspecified).
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    fn would_overload(&self, entries: usize) -> bool {
        entries * LOAD_DENOMINATOR >= self.capacity() * LOAD_NUMERATOR
    }
}

impl<V> Default for HashStore<V> {
    fn default() -> Self {
        Self::new()
    }
}
