//! Parent chain resolution
//!
//! Walks `PARENT` links from a requested profile up to its root and keeps
//! the visited profiles ancestor-first.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::store::ConfigEntry;

use super::{merge_chain, MergedProfile, ProfileIndex, ProfileIssue};

/// Reserved key naming a profile's parent
pub const PARENT_KEY: &str = "PARENT";

/// Profiles from the hierarchy root down to the requested profile
#[derive(Debug, Clone, Default)]
pub struct ProfileChain<'a> {
    links: VecDeque<(&'a str, &'a ConfigEntry)>,
}

impl<'a> ProfileChain<'a> {
    /// Walk the parent chain of `start`.
    ///
    /// The walk stops at a profile without `PARENT`, at a name the index
    /// does not know, or at a name already collected. The latter two are
    /// returned as an issue alongside whatever was collected before them.
    pub fn resolve(index: &ProfileIndex<'a>, start: &str) -> (Self, Option<ProfileIssue>) {
        let mut chain = Self::default();
        let mut visited = HashSet::new();
        let mut current = start;

        loop {
            let Some((name, entry)) = index.get(current) else {
                let issue = ProfileIssue::ProfileNotFound {
                    group: index.group().to_string(),
                    name: current.to_string(),
                };
                issue.log();
                return (chain, Some(issue));
            };

            if !visited.insert(name) {
                let issue = ProfileIssue::CyclicHierarchy {
                    group: index.group().to_string(),
                    name: name.to_string(),
                };
                issue.log();
                return (chain, Some(issue));
            }

            debug!(group = %index.group(), profile = %name, "adding profile to chain");
            chain.links.push_front((name, entry));

            match entry.get(PARENT_KEY) {
                Some(parent) => current = parent.as_str(),
                None => return (chain, None),
            }
        }
    }

    /// Profile names, root first
    pub fn names(&self) -> Vec<&'a str> {
        self.links.iter().map(|(name, _)| *name).collect()
    }

    /// Entries, root first
    pub fn entries(&self) -> impl Iterator<Item = &'a ConfigEntry> + '_ {
        self.links.iter().map(|(_, entry)| *entry)
    }

    /// The hierarchy root, if anything was collected
    pub fn root(&self) -> Option<&'a str> {
        self.links.front().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Fold the chain into one profile, descendants overriding ancestors
    pub fn merge(&self) -> MergedProfile {
        merge_chain(self.entries())
    }
}
