//! Non-fatal resolution conditions
//!
//! Malformed profile data degrades a resolution instead of failing it. Each
//! condition is logged where it is detected and recorded on the
//! [`Resolution`](super::Resolution) so callers can inspect it.

use serde::{Deserialize, Serialize};
use tracing::{error, warn, Level};

/// A condition encountered while resolving a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileIssue {
    /// The group has no profiles at all
    #[error("no config set '{group}', no profiles made")]
    NoSuchProfileSet { group: String },

    /// Two profiles in one group share a name; the first one is used
    #[error("profile '{name}' occurs multiple times in set '{group}'")]
    DuplicateProfileName { group: String, name: String },

    /// The requested profile, or one of its ancestors, does not exist
    #[error("profile '{name}' does not exist in set '{group}'")]
    ProfileNotFound { group: String, name: String },

    /// Following `PARENT` links led back to a profile already in the chain
    #[error("profile '{name}' in set '{group}' is its own ancestor")]
    CyclicHierarchy { group: String, name: String },
}

impl ProfileIssue {
    /// Log level this condition is reported at
    pub fn level(&self) -> Level {
        match self {
            Self::NoSuchProfileSet { .. } | Self::DuplicateProfileName { .. } => Level::WARN,
            Self::ProfileNotFound { .. } | Self::CyclicHierarchy { .. } => Level::ERROR,
        }
    }

    pub fn group(&self) -> &str {
        match self {
            Self::NoSuchProfileSet { group }
            | Self::DuplicateProfileName { group, .. }
            | Self::ProfileNotFound { group, .. }
            | Self::CyclicHierarchy { group, .. } => group,
        }
    }

    /// Emit this condition on the diagnostics sink
    pub(crate) fn log(&self) {
        let group = self.group();
        if self.level() == Level::WARN {
            warn!(group = %group, "{}", self);
        } else {
            error!(group = %group, "{}", self);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        let missing_set = ProfileIssue::NoSuchProfileSet {
            group: "Profiles".to_string(),
        };
        let not_found = ProfileIssue::ProfileNotFound {
            group: "Profiles".to_string(),
            name: "B".to_string(),
        };

        assert_eq!(missing_set.level(), Level::WARN);
        assert_eq!(not_found.level(), Level::ERROR);
    }

    #[test]
    fn test_serialized_kind() {
        let issue = ProfileIssue::DuplicateProfileName {
            group: "Profiles".to_string(),
            name: "X".to_string(),
        };

        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["kind"], "duplicate_profile_name");
        assert_eq!(value["name"], "X");
        assert_eq!(issue.group(), "Profiles");
    }

    #[test]
    fn test_display() {
        let issue = ProfileIssue::CyclicHierarchy {
            group: "Profiles".to_string(),
            name: "A".to_string(),
        };
        assert!(issue.to_string().contains("own ancestor"));
    }
}
