//! Error type for trie lookups.

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by trie operations.
///
/// Lookup failure is the only recoverable error: structural invariant
/// violations are engine bugs and abort via `assert!` instead of being
/// surfaced here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// No content is stored under the requested key. Covers both a missing
    /// structural path and a path that ends at a content-less branch node.
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
}
