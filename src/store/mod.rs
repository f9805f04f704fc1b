//! Configuration store
//!
//! Holds named configuration sets (profile groups). Each set is an ordered
//! list of `(profile name, entry)` pairs exactly as they were loaded, so
//! duplicate names survive loading and can be reported by the indexer.

mod load;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use load::StoreError;

/// One profile's own (non-inherited) settings
pub type ConfigEntry = BTreeMap<String, String>;

/// All profiles of one group, in load order
pub type ConfigSet = Vec<(String, ConfigEntry)>;

/// Read access to named configuration sets.
///
/// Implementations must not change while resolutions are running; the
/// resolver borrows entries for the duration of a call and performs no
/// locking of its own.
pub trait ConfigStore {
    /// Get the configuration set for a group, if the group is known
    fn config_set(&self, group: &str) -> Option<&ConfigSet>;
}

impl<T: ConfigStore + ?Sized> ConfigStore for &T {
    fn config_set(&self, group: &str) -> Option<&ConfigSet> {
        (**self).config_set(group)
    }
}

impl<T: ConfigStore + ?Sized> ConfigStore for Arc<T> {
    fn config_set(&self, group: &str) -> Option<&ConfigSet> {
        (**self).config_set(group)
    }
}

/// A file that contributed groups to a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSource {
    /// File path as given to [`ProfileStore::load`]
    pub path: String,

    /// SHA-256 digest of the raw file bytes
    pub digest: String,
}

/// In-memory configuration store
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    sets: HashMap<String, ConfigSet>,
    sources: Vec<StoreSource>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a profile to a group.
    ///
    /// An existing profile with the same name is kept; the new one is
    /// appended after it.
    pub fn insert(
        &mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        entry: ConfigEntry,
    ) -> &mut Self {
        self.sets
            .entry(group.into())
            .or_default()
            .push((name.into(), entry));
        self
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with_profile<I, K, V>(
        mut self,
        group: impl Into<String>,
        name: impl Into<String>,
        pairs: I,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.insert(group, name, entry(pairs));
        self
    }

    /// Group names with their profile counts, sorted by name
    pub fn groups(&self) -> Vec<(&str, usize)> {
        let mut groups: Vec<_> = self
            .sets
            .iter()
            .map(|(name, set)| (name.as_str(), set.len()))
            .collect();
        groups.sort_by(|a, b| a.0.cmp(b.0));
        groups
    }

    /// Files this store was loaded from
    pub fn sources(&self) -> &[StoreSource] {
        &self.sources
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Move all groups of `other` into this store, appending to groups
    /// that already exist.
    pub fn extend(&mut self, other: ProfileStore) {
        for (group, set) in other.sets {
            self.sets.entry(group).or_default().extend(set);
        }
        self.sources.extend(other.sources);
    }
}

impl ConfigStore for ProfileStore {
    fn config_set(&self, group: &str) -> Option<&ConfigSet> {
        self.sets.get(group)
    }
}

/// Build a [`ConfigEntry`] from key/value pairs
pub fn entry<I, K, V>(pairs: I) -> ConfigEntry
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
