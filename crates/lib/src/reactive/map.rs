use crate::container::Map;
use crate::reactive::{Observable, Readable, Subscription, derived};

/// An observable key-value container.
///
/// Wraps an [`Observable`] holding a [`Map`] snapshot. Mutations replace
/// the held map through the container's non-mutating operations and
/// publish the new snapshot to all subscribers synchronously, before the
/// mutating call returns. Point queries read the current snapshot; the
/// `derived_*` queries produce live projections that re-publish whenever
/// this container changes.
///
/// Absence of a key is meaningful: it is distinct from any stored value
/// and entries are never implicitly expired. A caller that wants an entry
/// gone must [`delete`](ObservableMap::delete) it.
///
/// Cloning an `ObservableMap` produces another handle to the same
/// container.
#[derive(Clone)]
pub struct ObservableMap<K, V> {
    cell: Observable<Map<K, V>>,
}

impl<K, V> ObservableMap<K, V>
where
    K: Eq + Clone + 'static,
    V: Clone + 'static,
{
    /// Creates an empty observable map.
    pub fn new() -> Self {
        Self {
            cell: Observable::new(Map::new()),
        }
    }

    /// Creates an observable map holding `entries`.
    pub fn from_entries(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Self {
            cell: Observable::new(entries.into_iter().collect()),
        }
    }

    /// Returns the underlying cell, for composition with
    /// [`derived`](crate::reactive::derived).
    pub fn observable(&self) -> Observable<Map<K, V>> {
        self.cell.clone()
    }

    /// Registers `callback`, invoking it immediately with the current
    /// snapshot and again on every mutation.
    pub fn subscribe(&self, callback: impl FnMut(&Map<K, V>) + 'static) -> Subscription {
        self.cell.subscribe(callback)
    }

    /// Returns the current snapshot.
    pub fn snapshot(&self) -> Map<K, V> {
        self.cell.get()
    }

    /// Gets the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<V> {
        self.cell.inner.borrow().value.get(key).cloned()
    }

    /// Returns true if an entry exists for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.cell.inner.borrow().value.contains_key(key)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.cell.inner.borrow().value.len()
    }

    /// Returns true if the container holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `value` under `key`, overwriting any prior entry, and
    /// publishes the new snapshot.
    pub fn set(&self, key: K, value: V) {
        self.cell.update(|map| map.with(key, value));
    }

    /// Removes the entry for `key` and publishes the new snapshot.
    pub fn delete(&self, key: &K) {
        self.cell.update(|map| map.without(key));
    }

    /// Replaces the contents with an empty map and publishes it.
    pub fn clear(&self) {
        self.cell.set(Map::new());
    }

    /// Replaces the whole contents with `entries` in one publish.
    pub fn reconstruct(&self, entries: impl IntoIterator<Item = (K, V)>) {
        self.cell.set(entries.into_iter().collect());
    }

    /// A live projection of the value stored under `key`.
    pub fn derived_get(&self, key: K) -> Readable<Option<V>> {
        derived(self.cell.clone(), move |map: Map<K, V>| {
            map.get(&key).cloned()
        })
        .read_only()
    }

    /// A live projection of whether an entry exists for `key`.
    pub fn derived_contains_key(&self, key: K) -> Readable<bool> {
        derived(self.cell.clone(), move |map: Map<K, V>| {
            map.contains_key(&key)
        })
        .read_only()
    }
}

impl<K: Eq + Clone + 'static, V: Clone + 'static> Default for ObservableMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

