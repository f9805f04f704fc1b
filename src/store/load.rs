//! TOML store loading
//!
//! Each top-level key names a group and holds an array of tables. Every
//! table is one profile: `name` identifies it and every other key is a
//! setting.
//!
//! ```toml
//! [[Profiles]]
//! name = "A"
//! speed = 1
//!
//! [[Profiles]]
//! name = "B"
//! PARENT = "A"
//! range = 10
//! ```

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;

use super::{ConfigEntry, ProfileStore, StoreSource};

/// Key carrying the profile name inside a profile table
const NAME_KEY: &str = "name";

/// Errors that can occur when loading a store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read store file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Group '{group}': {reason}")]
    InvalidGroup { group: String, reason: String },

    #[error("Group '{group}': profile #{index} has no 'name'")]
    MissingName { group: String, index: usize },

    #[error("Group '{group}', profile '{profile}': invalid value for '{key}': {reason}")]
    InvalidValue {
        group: String,
        profile: String,
        key: String,
        reason: String,
    },
}

impl ProfileStore {
    /// Load a store from a TOML file, recording its digest
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let bytes = std::fs::read(path)?;

        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let digest = hex::encode(hasher.finalize());

        let content = String::from_utf8(bytes).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut store = Self::parse(&content)?;
        debug!(path = %path.display(), %digest, "loaded profile store");
        store.sources.push(StoreSource {
            path: path.to_string_lossy().to_string(),
            digest,
        });
        Ok(store)
    }

    /// Parse a store from a TOML string
    pub fn parse(content: &str) -> Result<Self, StoreError> {
        let table: toml::Table = content.parse()?;
        let mut store = Self::new();

        for (group, value) in table {
            let toml::Value::Array(profiles) = value else {
                return Err(StoreError::InvalidGroup {
                    group,
                    reason: "expected an array of profile tables".to_string(),
                });
            };

            for (index, profile) in profiles.into_iter().enumerate() {
                let toml::Value::Table(mut profile) = profile else {
                    return Err(StoreError::InvalidGroup {
                        group,
                        reason: format!("entry #{} is not a table", index),
                    });
                };

                let name = match profile.remove(NAME_KEY) {
                    Some(value) => scalar_to_string(value).map_err(|reason| {
                        StoreError::InvalidValue {
                            group: group.clone(),
                            profile: format!("#{}", index),
                            key: NAME_KEY.to_string(),
                            reason,
                        }
                    })?,
                    None => {
                        return Err(StoreError::MissingName { group, index });
                    }
                };

                let mut entry = ConfigEntry::new();
                for (key, value) in profile {
                    let value = scalar_to_string(value).map_err(|reason| {
                        StoreError::InvalidValue {
                            group: group.clone(),
                            profile: name.clone(),
                            key: key.clone(),
                            reason,
                        }
                    })?;
                    entry.insert(key, value);
                }

                store.insert(group.clone(), name, entry);
            }
        }

        Ok(store)
    }
}

/// Stringify a TOML scalar; settings are flat strings
fn scalar_to_string(value: toml::Value) -> Result<String, String> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        toml::Value::Datetime(_) => Err("datetimes are not supported".to_string()),
        toml::Value::Array(_) => Err("arrays are not supported".to_string()),
        toml::Value::Table(_) => Err("nested tables are not supported".to_string()),
    }
}
