//! Test fixtures for profile store loading

use std::path::{Path, PathBuf};

use profile_hierarchy::ProfileStore;

/// Path to the sample profile store
pub fn profiles_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/profiles.toml")
}

/// Load the sample profile store
pub fn load_profiles() -> ProfileStore {
    ProfileStore::load(&profiles_path()).expect("Failed to load profile fixture")
}
