//! Profile merging
//!
//! Entries are folded in order: later entries override earlier ones key by
//! key. A chain is folded root first, so every key ends up with the value
//! of the most specific profile defining it.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store::ConfigEntry;

use super::PARENT_KEY;

/// Flat key/value result of merging a profile hierarchy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedProfile {
    values: BTreeMap<String, String>,
}

impl MergedProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every pair of `entry` in, overwriting existing keys
    pub fn add(&mut self, entry: &ConfigEntry) {
        for (key, value) in entry {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse a value with [`FromStr`]; `None` if absent or unparsable
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get_parsed(key)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get_parsed(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_parsed(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_parsed(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// The parent named by the most specific profile, if any
    pub fn parent(&self) -> Option<&str> {
        self.get(PARENT_KEY)
    }

    /// Copy of this profile with the `PARENT` key removed
    pub fn without_parent(&self) -> Self {
        let mut values = self.values.clone();
        values.remove(PARENT_KEY);
        Self { values }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

impl From<BTreeMap<String, String>> for MergedProfile {
    fn from(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }
}

/// Merge entries in order (first is base, last has highest precedence)
pub fn merge_chain<'e, I>(entries: I) -> MergedProfile
where
    I: IntoIterator<Item = &'e ConfigEntry>,
{
    entries.into_iter().fold(MergedProfile::new(), |mut merged, entry| {
        merged.add(entry);
        merged
    })
}
