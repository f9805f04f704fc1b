//! Profile set indexing
//!
//! Turns the ordered configuration set of one group into a name lookup.

use std::collections::HashMap;

use crate::store::{ConfigEntry, ConfigStore};

use super::ProfileIssue;

/// Name lookup over one group's profiles, borrowed from the store
#[derive(Debug, Clone)]
pub struct ProfileIndex<'a> {
    group: String,
    profiles: HashMap<&'a str, &'a ConfigEntry>,
    issues: Vec<ProfileIssue>,
}

impl<'a> ProfileIndex<'a> {
    /// Index the configuration set named `group`.
    ///
    /// Fails with [`ProfileIssue::NoSuchProfileSet`] when the group is
    /// unknown or empty. Duplicate names keep the first occurrence and are
    /// recorded in [`issues`](Self::issues).
    pub fn build<S>(store: &'a S, group: &str) -> Result<Self, ProfileIssue>
    where
        S: ConfigStore + ?Sized,
    {
        let set = match store.config_set(group) {
            Some(set) if !set.is_empty() => set,
            _ => {
                let issue = ProfileIssue::NoSuchProfileSet {
                    group: group.to_string(),
                };
                issue.log();
                return Err(issue);
            }
        };

        let mut profiles = HashMap::with_capacity(set.len());
        let mut issues = Vec::new();
        for (name, entry) in set {
            if profiles.contains_key(name.as_str()) {
                let issue = ProfileIssue::DuplicateProfileName {
                    group: group.to_string(),
                    name: name.clone(),
                };
                issue.log();
                issues.push(issue);
                continue;
            }
            profiles.insert(name.as_str(), entry);
        }

        Ok(Self {
            group: group.to_string(),
            profiles,
            issues,
        })
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    /// Look up a profile, returning the name as stored alongside the entry
    pub fn get(&self, name: &str) -> Option<(&'a str, &'a ConfigEntry)> {
        self.profiles.get_key_value(name).map(|(k, v)| (*k, *v))
    }

    /// Conditions found while indexing
    pub fn issues(&self) -> &[ProfileIssue] {
        &self.issues
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProfileStore;

    #[test]
    fn test_build_index() {
        let store = ProfileStore::new()
            .with_profile("Profiles", "A", [("speed", "1")])
            .with_profile("Profiles", "B", [("speed", "2")]);

        let index = ProfileIndex::build(&store, "Profiles").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.group(), "Profiles");
        assert_eq!(index.get("B").unwrap().1["speed"], "2");
        assert!(index.get("C").is_none());
        assert!(index.issues().is_empty());
    }

    #[test]
    fn test_unknown_group() {
        let store = ProfileStore::new().with_profile("Profiles", "A", [("speed", "1")]);

        let err = ProfileIndex::build(&store, "Vehicles").unwrap_err();
        assert_eq!(
            err,
            ProfileIssue::NoSuchProfileSet {
                group: "Vehicles".to_string()
            }
        );
    }

    #[test]
    fn test_empty_group() {
        struct EmptyStore(Vec<(String, ConfigEntry)>);
        impl ConfigStore for EmptyStore {
            fn config_set(&self, _group: &str) -> Option<&Vec<(String, ConfigEntry)>> {
                Some(&self.0)
            }
        }

        let store = EmptyStore(Vec::new());
        let err = ProfileIndex::build(&store, "Profiles").unwrap_err();
        assert!(matches!(err, ProfileIssue::NoSuchProfileSet { .. }));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let store = ProfileStore::new()
            .with_profile("Profiles", "X", [("v", "first")])
            .with_profile("Profiles", "Y", [("v", "other")])
            .with_profile("Profiles", "X", [("v", "second")]);

        let index = ProfileIndex::build(&store, "Profiles").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.get("X").unwrap().1["v"], "first");
        assert_eq!(
            index.issues(),
            &[ProfileIssue::DuplicateProfileName {
                group: "Profiles".to_string(),
                name: "X".to_string(),
            }]
        );
    }
}
