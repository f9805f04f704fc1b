//! Profile Hierarchy - inherited configuration profiles
//!
//! Profiles live in named groups of a configuration store. A profile may
//! name a parent in the same group; loading a profile merges the whole
//! parent chain, most specific last, and hands the result to a consumer.

pub mod profile;
pub mod store;

pub use profile::{
    MergedProfile, ProfileChain, ProfileConsumer, ProfileHandler, ProfileIndex, ProfileIssue,
    Resolution, PARENT_KEY,
};
pub use store::{ConfigEntry, ConfigSet, ConfigStore, ProfileStore, StoreError, StoreSource};
