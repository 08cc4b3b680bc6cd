//! Sorted associative container that every collection in the engine sits on.
//!
//! Entries live in a vector kept in ascending order under the map's comparator.
//! Lookups are a binary search; insertion shifts the tail and is linear in the
//! number of entries.
//!
//! Two ways to walk a map:
//! - [`OrderedMap::iter`] borrows the map and is the fast path for read-only scans.
//! - [`KeyCursor`] hands out owned copies of keys and remembers only the last
//!   key it produced, so the caller may insert, update or remove entries
//!   between steps without invalidating it.

use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::fmt;

use thiserror::Error;

/// Errors reported by [`OrderedMap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MapError {
    /// The requested key is not in the map
    #[error("key not found")]
    NotFound,

    /// Growing the backing storage failed
    #[error("out of memory")]
    OutOfMemory,
}

impl From<TryReserveError> for MapError {
    fn from(_: TryReserveError) -> Self {
        MapError::OutOfMemory
    }
}

/// Ordering used to place keys
pub type Comparator<K> = fn(&K, &K) -> Ordering;

/// Ordered key/value container with deep-copy cloning.
///
/// `put` takes ownership of the key and value it is given; callers that want
/// to keep their originals pass clones. `Clone` produces a fully independent
/// copy: nothing is shared between the original and the clone.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    compare: Comparator<K>,
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Create an empty map ordered by `K`'s natural ordering
    pub fn new() -> Self {
        Self::with_comparator(K::cmp)
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Create an empty map ordered by `compare`
    pub fn with_comparator(compare: Comparator<K>) -> Self {
        Self {
            entries: Vec::new(),
            compare,
        }
    }

    fn find(&self, key: &K) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(probe, _)| (self.compare)(probe, key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_ok()
    }

    /// Live reference to the value stored under `key`
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).ok().map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        match self.find(key) {
            Ok(index) => Some(&mut self.entries[index].1),
            Err(_) => None,
        }
    }

    /// Insert or overwrite. Returns `true` when `key` was not present before.
    ///
    /// On `OutOfMemory` the map is unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<bool, MapError> {
        match self.find(&key) {
            Ok(index) => {
                self.entries[index].1 = value;
                Ok(false)
            }
            Err(index) => {
                self.entries.try_reserve(1)?;
                self.entries.insert(index, (key, value));
                Ok(true)
            }
        }
    }

    /// Make room for `additional` new keys so the next `additional` calls to
    /// [`put`](Self::put) cannot fail.
    pub fn reserve(&mut self, additional: usize) -> Result<(), MapError> {
        self.entries.try_reserve(additional)?;
        Ok(())
    }

    /// Remove `key`, handing its value back to the caller
    pub fn remove(&mut self, key: &K) -> Result<V, MapError> {
        match self.find(key) {
            Ok(index) => Ok(self.entries.remove(index).1),
            Err(_) => Err(MapError::NotFound),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Smallest key under the map's ordering
    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(key, _)| key)
    }

    /// Borrowing iterator in ascending key order
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + ExactSizeIterator {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    /// Start a mutation-tolerant walk over the keys, see [`KeyCursor`]
    pub fn cursor(&self) -> KeyCursor<K> {
        KeyCursor::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

/// Restartable key cursor that does not borrow the map between steps.
///
/// Each step looks up the successor of the previously returned key, so entries
/// added or removed in the meantime are handled naturally: removed keys are
/// never produced, and keys inserted ahead of the cursor will be.
///
/// ```
/// use chess_system::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// for id in 1..=4 {
///     map.put(id, id * 10).unwrap();
/// }
///
/// let mut cursor = map.cursor();
/// while let Some(id) = cursor.next(&map) {
///     if id % 2 == 0 {
///         map.remove(&id).unwrap();
///     }
/// }
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct KeyCursor<K> {
    last: Option<K>,
    finished: bool,
}

impl<K> KeyCursor<K> {
    pub fn new() -> Self {
        Self {
            last: None,
            finished: false,
        }
    }

    /// Rewind to before the first key
    pub fn restart(&mut self) {
        self.last = None;
        self.finished = false;
    }
}

impl<K> Default for KeyCursor<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> KeyCursor<K> {
    /// Fresh copy of the next key in ascending order, or `None` once past the end
    pub fn next<V>(&mut self, map: &OrderedMap<K, V>) -> Option<K> {
        if self.finished {
            return None;
        }

        let index = match &self.last {
            None => 0,
            Some(last) => match map.find(last) {
                Ok(index) => index + 1,
                Err(index) => index,
            },
        };

        match map.entries.get(index) {
            Some((key, _)) => {
                self.last = Some(key.clone());
                Some(key.clone())
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "ordered_map_tests.rs"]
mod ordered_map_tests;
