use crate::ExposureState;
use crate::key::{ExposureKey, KeyMap};

#[derive(Clone, Debug)]
struct Entry<S> {
    state: ExposureState,
    snapshot: S,
}

/// A sparse map from item key to exposure state.
///
/// Alongside the state, the store keeps the latest display snapshot observed for each key so
/// a disappearance can still be reported after the item has left the render window. Entries
/// live only while their key is visible: a disappearance removes the entry.
///
/// Lookups and updates are O(1) amortized with `feature = "std"` (hash map) and O(log n)
/// otherwise.
#[derive(Clone, Debug)]
pub struct ExposureStore<K, S> {
    entries: KeyMap<K, Entry<S>>,
}

impl<K, S> Default for ExposureStore<K, S> {
    fn default() -> Self {
        Self {
            entries: KeyMap::new(),
        }
    }
}

impl<K, S> ExposureStore<K, S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: ExposureKey, S> ExposureStore<K, S> {

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &K) -> Option<&ExposureState> {
        self.entries.get(key).map(|e| &e.state)
    }

    /// Returns the latest display snapshot observed for `key`.
    pub fn snapshot(&self, key: &K) -> Option<&S> {
        self.entries.get(key).map(|e| &e.snapshot)
    }

    /// Inserts or replaces the state and snapshot for `key`, returning the previous state.
    pub fn upsert(&mut self, key: K, state: ExposureState, snapshot: S) -> Option<ExposureState> {
        self.entries
            .insert(key, Entry { state, snapshot })
            .map(|e| e.state)
    }

    pub(crate) fn entry_mut(&mut self, key: &K) -> Option<(&mut ExposureState, &mut S)> {
        self.entries
            .get_mut(key)
            .map(|e| (&mut e.state, &mut e.snapshot))
    }

    pub(crate) fn take(&mut self, key: &K) -> Option<(ExposureState, S)> {
        self.entries.remove(key).map(|e| (e.state, e.snapshot))
    }

    /// Drops a single key (e.g. the item was removed or edited by the host).
    pub fn remove(&mut self, key: &K) -> Option<ExposureState> {
        self.entries.remove(key).map(|e| e.state)
    }

    /// Drops every key. Use this when the underlying dataset is replaced wholesale.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over all tracked keys and their state in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &ExposureState)> + '_ {
        self.entries.iter().map(|(k, e)| (k, &e.state))
    }

    /// Iterates over the keys whose last pass reported them visible.
    pub fn visible_keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries
            .iter()
            .filter(|(_, e)| e.state.is_currently_visible)
            .map(|(k, _)| k)
    }
}
