//! Table trait and ready-made store implementations
//!
//! A table is any key-value store that can answer a keyed lookup with
//! `Some`/`None` and accept a keyed insert. The memo wrappers require
//! nothing else, so hash-based, tree-based, and dense slot stores all
//! plug in behind the same trait.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use ahash::RandomState;

/// Key-value store contract required by the memo wrappers.
///
/// `get` signals a miss by returning `None`; `put` records a computed
/// result. Key bounds live on each implementation rather than on the
/// wrappers, so any conforming store can be substituted without
/// touching the wrapping logic.
pub trait Table {
    /// Argument tuple the store is keyed by.
    type Key;
    /// Computed result stored per key.
    type Value;

    /// Look up a previously stored value. `None` signals a miss.
    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Store a computed value under a key, replacing any previous entry.
    fn put(&mut self, key: Self::Key, value: Self::Value);
}

/// Hash-backed table with the default hasher.
pub type HashTable<K, V> = HashMap<K, V, RandomState>;

/// Create an empty [`HashTable`].
///
/// This is the everyday table factory: `memoize(hash_table)`.
pub fn hash_table<K, V>() -> HashTable<K, V> {
    HashMap::with_hasher(RandomState::new())
}

impl<K, V, S> Table for HashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        HashMap::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

impl<K, V> Table for BTreeMap<K, V>
where
    K: Ord,
{
    type Key = K;
    type Value = V;

    fn get(&self, key: &K) -> Option<&V> {
        BTreeMap::get(self, key)
    }

    fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }
}

/// Dense table keyed by `usize`, backed by a growable slot vector.
///
/// Suited to callables over small dense index ranges; the key doubles
/// as the slot position. Slots between occupied entries stay empty and
/// read back as misses.
pub struct VecTable<V> {
    slots: Vec<Option<V>>,
    filled: usize,
}

impl<V> VecTable<V> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            filled: 0,
        }
    }

    /// Create an empty table with room for `capacity` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            filled: 0,
        }
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.filled
    }

    /// Check if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.filled = 0;
    }
}

impl<V> Default for VecTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Table for VecTable<V> {
    type Key = usize;
    type Value = V;

    fn get(&self, key: &usize) -> Option<&V> {
        self.slots.get(*key).and_then(|slot| slot.as_ref())
    }

    fn put(&mut self, key: usize, value: V) {
        if key >= self.slots.len() {
            self.slots.resize_with(key + 1, || None);
        }
        if self.slots[key].replace(value).is_none() {
            self.filled += 1;
        }
    }
}
