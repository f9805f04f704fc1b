//! Profile loading
//!
//! [`ProfileHandler`] ties one profile group of a [`ConfigStore`] to the
//! consumers that want profiles from it: index the group, walk the parent
//! chain, merge, deliver.

use std::fmt::Display;

use serde::Serialize;
use tracing::debug;

use crate::store::ConfigStore;

use super::{MergedProfile, ProfileChain, ProfileIndex, ProfileIssue};

/// Receives a merged profile and initializes itself from it
pub trait ProfileConsumer {
    fn read_profile(&mut self, profile: &MergedProfile);
}

impl<F> ProfileConsumer for F
where
    F: FnMut(&MergedProfile),
{
    fn read_profile(&mut self, profile: &MergedProfile) {
        self(profile)
    }
}

/// Outcome of resolving one profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    /// Group the profile was looked up in
    pub group: String,

    /// Requested identifier in string form
    pub requested: String,

    /// Profile names that were merged, root first
    pub chain: Vec<String>,

    /// The merged profile handed to the consumer
    pub profile: MergedProfile,

    /// Conditions encountered, in the order they were found
    pub issues: Vec<ProfileIssue>,
}

impl Resolution {
    /// True when nothing was missing, duplicated or cyclic
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Loads profiles of one group from an injected store
#[derive(Debug, Clone)]
pub struct ProfileHandler<S> {
    store: S,
    group: String,
}

impl<S: ConfigStore> ProfileHandler<S> {
    pub fn new(store: S, group: impl Into<String>) -> Self {
        Self {
            store,
            group: group.into(),
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve and merge the hierarchy of `profile_id` without delivering it.
    ///
    /// Never fails: unknown groups, duplicate names, missing ancestors and
    /// cycles are logged and recorded in [`Resolution::issues`], and the
    /// profile is merged from whatever part of the chain was found.
    pub fn resolve(&self, profile_id: impl Display) -> Resolution {
        let requested = profile_id.to_string();
        debug!(group = %self.group, profile = %requested, "loading profile");

        let mut resolution = Resolution {
            group: self.group.clone(),
            requested,
            chain: Vec::new(),
            profile: MergedProfile::new(),
            issues: Vec::new(),
        };

        let index = match ProfileIndex::build(&self.store, &self.group) {
            Ok(index) => index,
            Err(issue) => {
                resolution.issues.push(issue);
                return resolution;
            }
        };
        resolution.issues.extend_from_slice(index.issues());

        let (chain, issue) = ProfileChain::resolve(&index, &resolution.requested);
        resolution.issues.extend(issue);
        resolution.chain = chain.names().into_iter().map(str::to_string).collect();
        resolution.profile = chain.merge();

        resolution
    }

    /// Resolve `profile_id` and hand the merged profile to `consumer`.
    ///
    /// The consumer always receives a profile, empty if nothing was found.
    pub fn load_profile<C>(&self, profile_id: impl Display, consumer: &mut C) -> Resolution
    where
        C: ProfileConsumer + ?Sized,
    {
        let resolution = self.resolve(profile_id);
        consumer.read_profile(&resolution.profile);
        resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProfileStore;
    use tracing_test::traced_test;

    #[derive(Debug, Default)]
    struct Sensor {
        speed: u64,
        range: u64,
        loaded: bool,
    }

    impl ProfileConsumer for Sensor {
        fn read_profile(&mut self, profile: &MergedProfile) {
            self.speed = profile.get_u64("speed").unwrap_or(0);
            self.range = profile.get_u64("range").unwrap_or(0);
            self.loaded = true;
        }
    }

    fn handler() -> ProfileHandler<ProfileStore> {
        let store = ProfileStore::new()
            .with_profile("Profiles", "A", [("speed", "1")])
            .with_profile("Profiles", "B", [("PARENT", "A"), ("speed", "2"), ("range", "10")])
            .with_profile("Profiles", "C", [("PARENT", "B"), ("range", "20")]);
        ProfileHandler::new(store, "Profiles")
    }

    #[test]
    fn test_load_into_consumer() {
        let mut sensor = Sensor::default();

        let resolution = handler().load_profile("C", &mut sensor);

        assert!(resolution.is_clean());
        assert!(sensor.loaded);
        assert_eq!(sensor.speed, 2);
        assert_eq!(sensor.range, 20);
    }

    #[test]
    fn test_parent_retained_in_result() {
        let resolution = handler().resolve("C");

        assert_eq!(resolution.chain, vec!["A", "B", "C"]);
        assert_eq!(resolution.profile.get("PARENT"), Some("B"));
        assert_eq!(resolution.profile.len(), 3);
    }

    #[test]
    fn test_closure_consumer() {
        let mut seen = Vec::new();
        handler().load_profile("B", &mut |p: &MergedProfile| seen.push(p.clone()));

        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("range"), Some("10"));
    }

    #[test]
    fn test_integer_identifiers() {
        let store = ProfileStore::new()
            .with_profile("Ids", "1", [("kind", "base")])
            .with_profile("Ids", "2", [("PARENT", "1"), ("size", "large")]);
        let handler = ProfileHandler::new(&store, "Ids");

        let resolution = handler.resolve(2);

        assert_eq!(resolution.requested, "2");
        assert_eq!(resolution.chain, vec!["1", "2"]);
        assert_eq!(resolution.profile.get("kind"), Some("base"));
    }

    #[traced_test]
    #[test]
    fn test_unknown_group_delivers_empty_profile() {
        let store = ProfileStore::new().with_profile("Profiles", "A", [("speed", "1")]);
        let handler = ProfileHandler::new(&store, "Missing");
        let mut sensor = Sensor::default();

        let resolution = handler.load_profile("A", &mut sensor);

        assert!(sensor.loaded);
        assert_eq!(sensor.speed, 0);
        assert!(resolution.profile.is_empty());
        assert!(resolution.chain.is_empty());
        assert!(matches!(
            resolution.issues.as_slice(),
            [ProfileIssue::NoSuchProfileSet { .. }]
        ));
        assert!(logs_contain("no config set 'Missing'"));
    }

    #[traced_test]
    #[test]
    fn test_missing_ancestor_logged() {
        let store = ProfileStore::new().with_profile("Profiles", "C", [("PARENT", "B"), ("range", "20")]);
        let handler = ProfileHandler::new(store, "Profiles");

        let resolution = handler.resolve("C");

        assert_eq!(resolution.chain, vec!["C"]);
        assert_eq!(resolution.profile.get("range"), Some("20"));
        assert!(logs_contain("profile 'B' does not exist in set 'Profiles'"));
    }

    #[traced_test]
    #[test]
    fn test_duplicate_reported_and_first_used() {
        let store = ProfileStore::new()
            .with_profile("Profiles", "X", [("v", "first")])
            .with_profile("Profiles", "X", [("v", "second")]);
        let handler = ProfileHandler::new(store, "Profiles");

        let resolution = handler.resolve("X");

        assert_eq!(resolution.profile.get("v"), Some("first"));
        assert_eq!(resolution.issues.len(), 1);
        assert!(logs_contain("occurs multiple times"));
    }

    #[test]
    fn test_resolution_json() {
        let json = handler().resolve("Z").to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["requested"], "Z");
        assert_eq!(value["issues"][0]["kind"], "profile_not_found");
        assert_eq!(value["profile"], serde_json::json!({}));
    }
}
