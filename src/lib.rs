//! # radixkv
//!
//! An observable compressed radix trie (PATRICIA-style) mapping string keys
//! to values.
//!
//! Edges carry whole key segments rather than single characters, and any
//! interior node that holds no value and fewer than two children is folded
//! away on the spot, so the tree stays compressed after every mutation.
//! Every structural change (node creation, content insertion, content
//! deletion, subtree moves, node removal) is reported synchronously
//! through the [`Watcher`] protocol, which makes the tree usable as the
//! indexing backbone of a hierarchical store whose consumers react to shape
//! changes instead of polling final state.
//!
//! ## Example
//!
//! ```rust
//! use radixkv::RadixTree;
//!
//! let mut tree: RadixTree<u64> = RadixTree::new();
//! tree.insert("cat", 1);
//! tree.insert("car", 2);
//! tree.insert("dog", 3);
//!
//! assert_eq!(tree.get("cat"), Ok(&1));
//! // root, the "ca" branch, "t", "r", and "dog"
//! assert_eq!(tree.node_count(), 5);
//!
//! let keys: Vec<String> = tree.iter().map(|(k, _)| k).collect();
//! assert_eq!(keys, ["car", "cat", "dog"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod arena;
mod error;
pub mod trie;
pub mod watch;

pub use error::{Error, Result};
pub use trie::{Iter, RadixTree, Subtrie};
pub use watch::{NoopWatcher, Watcher};

#[cfg(test)]
mod proptests;
