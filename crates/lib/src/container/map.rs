use std::fmt;

/// An insertion-ordered key-value container with immutable value semantics.
///
/// All update operations return a new `Map`; the receiver is never
/// modified. `with` replaces the value of an equal key while preserving
/// that key's original insertion position, and appends unknown keys at the
/// end. All operations are total.
///
/// # Examples
///
/// ```
/// use gridmeta::container::Map;
///
/// let empty: Map<&str, i64> = Map::new();
/// let one = empty.with("a", 1);
/// let two = one.with("b", 2).with("a", 10);
///
/// assert!(empty.is_empty());
/// assert_eq!(one.get(&"a"), Some(&1));
/// assert_eq!(two.iter().collect::<Vec<_>>(), vec![(&"a", &10), (&"b", &2)]);
/// ```
#[derive(Clone)]
pub struct Map<K, V> {
    entries: Vec<(K, V)>,
}

impl<K, V> Map<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns true if the map contains the given key.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Returns a new map with `value` stored under `key`.
    ///
    /// An existing key keeps its insertion position; a new key is appended.
    pub fn with(&self, key: K, value: V) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => entries.push((key, value)),
        }
        Self { entries }
    }

    /// Returns a new map without the entry for `key`.
    pub fn without(&self, key: &K) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(k, _)| k != key)
                .cloned()
                .collect(),
        }
    }

    /// Returns a new map combining this map with `entries`.
    ///
    /// Keys present on only one side pass through unchanged. On a key
    /// conflict the incoming (right-hand) value wins.
    pub fn with_entries(&self, entries: impl IntoIterator<Item = (K, V)>) -> Self {
        self.with_entries_merged(entries, |_, incoming| incoming.clone())
    }

    /// Returns a new map combining this map with `entries`, resolving key
    /// conflicts via `merge(existing, incoming)`.
    pub fn with_entries_merged(
        &self,
        entries: impl IntoIterator<Item = (K, V)>,
        merge: impl Fn(&V, &V) -> V,
    ) -> Self {
        let mut out = self.entries.clone();
        for (key, value) in entries {
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = merge(&slot.1, &value),
                None => out.push((key, value)),
            }
        }
        Self { entries: out }
    }

    /// Returns a new map with every value replaced by `f(value)`, keeping
    /// keys and their order.
    pub fn map_values<U, F>(&self, f: F) -> Map<K, U>
    where
        U: Clone,
        F: Fn(&V) -> U,
    {
        Map {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), f(v)))
                .collect(),
        }
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Eq + Clone, V: Clone> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Clone, V: Clone> FromIterator<(K, V)> for Map<K, V> {
    /// Collects entries in iteration order. A key seen more than once keeps
    /// its first position and takes the last value.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries: Vec<(K, V)> = Vec::new();
        for (key, value) in iter {
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => entries.push((key, value)),
            }
        }
        Self { entries }
    }
}

impl<K, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for Map<K, V> {
    /// Maps are equal when they hold the same entries in the same order.
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for Map<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Map<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
