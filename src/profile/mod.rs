//! Profile hierarchy resolution
//!
//! A profile names its parent through the reserved `PARENT` key. Resolving a
//! profile collects it and all of its ancestors, then merges their settings
//! root first so descendants override ancestors.

mod chain;
mod handler;
mod index;
mod issue;
mod merge;

pub use chain::{ProfileChain, PARENT_KEY};
pub use handler::{ProfileConsumer, ProfileHandler, Resolution};
pub use index::ProfileIndex;
pub use issue::ProfileIssue;
pub use merge::{merge_chain, MergedProfile};
