//! Compressed radix trie with structural-change notifications.
//!
//! Edges carry whole key segments. Inserting a key that disagrees with an
//! existing edge splits that edge at the shared prefix; deleting content
//! re-compacts the tree so that no content-less node keeps fewer than two
//! children. Both directions report every step to the tree's
//! [`Watcher`](crate::Watcher).

mod debug;
mod iter;
mod subtrie;

pub use iter::Iter;
pub use subtrie::Subtrie;

use std::collections::BTreeMap;

use smallvec::SmallVec;
use tracing::trace;

use crate::arena::{Arena, NodeId};
use crate::error::{Error, Result};
use crate::watch::{NoopWatcher, Watcher};

pub(crate) struct Node<V> {
    /// Key segment relative to the parent; empty only for the root.
    pub(crate) suffix: String,
    pub(crate) parent: Option<NodeId>,
    /// Children keyed by suffix; the sorted map drives iteration order.
    pub(crate) children: BTreeMap<String, NodeId>,
    pub(crate) content: Option<V>,
}

impl<V> Node<V> {
    fn new(suffix: String, parent: Option<NodeId>) -> Self {
        Self {
            suffix,
            parent,
            children: BTreeMap::new(),
            content: None,
        }
    }
}

/// Byte length of the longest common character prefix of `a` and `b`.
///
/// Walked per character so the result always lands on a UTF-8 boundary of
/// both strings; a byte-wise scan could stop inside a multi-byte sequence.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, ca), cb)| ca != cb)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

/// Compressed radix trie mapping string keys to values.
///
/// Structural changes are reported through the [`Watcher`] supplied at
/// construction; [`RadixTree::new`] wires in the no-op sink. Mutation is
/// `&mut self` throughout, so observing callbacks can never re-enter the
/// tree they are watching.
pub struct RadixTree<V> {
    nodes: Arena<Node<V>>,
    root: NodeId,
    watcher: Box<dyn Watcher<V>>,
    len: usize,
}

impl<V> RadixTree<V> {
    /// Create an empty tree with the no-op watcher.
    pub fn new() -> Self {
        Self::with_watcher(NoopWatcher)
    }

    /// Create an empty tree reporting to `watcher`.
    ///
    /// The watcher is shared by every node the tree ever creates; it sees
    /// an `on_create` for the root immediately.
    pub fn with_watcher<W: Watcher<V> + 'static>(watcher: W) -> Self {
        let mut nodes = Arena::new();
        let root = nodes.alloc(Node::new(String::new(), None));
        let mut tree = Self {
            nodes,
            root,
            watcher: Box::new(watcher),
            len: 0,
        };
        tree.watcher.on_create("");
        tree
    }

    /// Look up the value stored under `key`.
    pub fn get(&self, key: &str) -> Result<&V> {
        self.lookup(self.root, key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Whether a value is stored under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup(self.root, key).is_some()
    }

    /// Store `value` under `key`, splitting edges as needed. Returns the
    /// previous value if the key was already present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        trace!(key, "insert");
        self.insert_at(self.root, key, value)
    }

    /// Clear the value stored under `key` and re-compact the tree.
    ///
    /// Fails without touching the tree if `key` holds no content.
    pub fn remove(&mut self, key: &str) -> Result<V> {
        self.remove_at(self.root, key)
            .ok_or_else(|| Error::KeyNotFound(key.to_owned()))
    }

    /// Number of values stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree stores no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of nodes, branch and leaf alike, root included.
    /// Recomputed on every call.
    pub fn node_count(&self) -> usize {
        self.node_count_at(self.root)
    }

    /// Read-only handle onto the root node.
    pub fn root(&self) -> Subtrie<'_, V> {
        Subtrie::new(self, self.root)
    }

    /// Direct child of the root registered under exactly `suffix`.
    ///
    /// See [`Subtrie::subtrie`] for the exact-match contract.
    pub fn subtrie(&self, suffix: &str) -> Result<Subtrie<'_, V>> {
        self.root().subtrie(suffix)
    }

    /// Deterministic pre-order iteration over `(absolute key, value)`
    /// pairs, children visited in lexicographic suffix order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self, self.root)
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Absolute key of `node`: suffixes concatenated root-first. Always
    /// recomputed from the live parent links, never cached.
    pub(crate) fn chain(&self, node: NodeId) -> String {
        let mut path: SmallVec<[NodeId; 16]> = SmallVec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.nodes[id].parent;
        }
        let mut out = String::new();
        for id in path.iter().rev() {
            out.push_str(&self.nodes[*id].suffix);
        }
        out
    }

    /// Child of `node` whose suffix shares a non-empty prefix with `rkey`,
    /// with the shared byte length. Sibling disjointness guarantees at
    /// most one candidate.
    fn find_overlap(&self, node: NodeId, rkey: &str) -> Option<(String, usize)> {
        for suffix in self.nodes[node].children.keys() {
            let shared = common_prefix_len(suffix, rkey);
            if shared > 0 {
                return Some((suffix.clone(), shared));
            }
        }
        None
    }

    pub(crate) fn lookup(&self, node: NodeId, rkey: &str) -> Option<&V> {
        if rkey.is_empty() {
            return self.nodes[node].content.as_ref();
        }
        let (suffix, shared) = self.find_overlap(node, rkey)?;
        if shared != suffix.len() {
            // Overlap that does not consume the whole edge is a dead end.
            return None;
        }
        self.lookup(self.nodes[node].children[&suffix], &rkey[shared..])
    }

    pub(crate) fn node_count_at(&self, node: NodeId) -> usize {
        1 + self.nodes[node]
            .children
            .values()
            .map(|child| self.node_count_at(*child))
            .sum::<usize>()
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    fn insert_at(&mut self, node: NodeId, rkey: &str, value: V) -> Option<V> {
        if rkey.is_empty() {
            let chain = self.chain(node);
            let old = self.nodes[node].content.replace(value);
            if old.is_none() {
                self.len += 1;
            }
            trace!(chain = %chain, "stored value");
            if let Some(stored) = self.nodes[node].content.as_ref() {
                self.watcher.on_insert(&chain, stored);
            }
            return old;
        }

        match self.find_overlap(node, rkey) {
            // No overlapping edge: the remaining key becomes a fresh leaf.
            None => {
                let child = self.add_child(node, rkey.to_owned());
                self.insert_at(child, "", value)
            }
            Some((suffix, shared)) => {
                if shared == suffix.len() {
                    // The edge is fully consumed; descend with the rest.
                    let child = self.nodes[node].children[&suffix];
                    self.insert_at(child, &rkey[shared..], value)
                } else if shared == rkey.len() {
                    // The key ends inside the edge: a node for the key
                    // slots in above the existing child.
                    let child = self.detach_child(node, &suffix);
                    let above = self.add_child(node, rkey.to_owned());
                    self.demote(node, child, &suffix, above);
                    self.insert_at(above, "", value)
                } else {
                    // Key and edge diverge after a shared prefix: branch
                    // there and push the existing child below the branch.
                    let child = self.detach_child(node, &suffix);
                    let branch = self.add_child(node, rkey[..shared].to_owned());
                    self.demote(node, child, &suffix, branch);
                    self.insert_at(branch, &rkey[shared..], value)
                }
            }
        }
    }

    fn remove_at(&mut self, node: NodeId, rkey: &str) -> Option<V> {
        if rkey.is_empty() {
            let value = self.nodes[node].content.take()?;
            self.len -= 1;
            let chain = self.chain(node);
            trace!(chain = %chain, "removed value");
            self.watcher.on_delete(&chain, &value);
            self.compact(node);
            return Some(value);
        }
        let (suffix, shared) = self.find_overlap(node, rkey)?;
        if shared != suffix.len() {
            return None;
        }
        self.remove_at(self.nodes[node].children[&suffix], &rkey[shared..])
    }

    /// Restore the rule that a non-root node without content keeps at
    /// least two children, cascading upward while ancestors violate it.
    fn compact(&mut self, node: NodeId) {
        if self.nodes[node].content.is_some() {
            return;
        }
        let Some(parent) = self.nodes[node].parent else {
            // The root is never compacted.
            return;
        };
        match self.nodes[node].children.len() {
            0 => {
                let chain = self.chain(node);
                let suffix = self.nodes[node].suffix.clone();
                let detached = self.nodes[parent].children.remove(&suffix);
                debug_assert_eq!(detached, Some(node));
                self.nodes.free(node);
                trace!(chain = %chain, "removed empty node");
                self.watcher.on_remove(&chain);
                self.compact(parent);
            }
            1 => {
                // Single child and no content: fold this node into its
                // child, handing the child to the grandparent under the
                // combined suffix.
                let Some((child_suffix, child)) = self.nodes[node].children.pop_first() else {
                    unreachable!("child count checked above");
                };
                let node_chain = self.chain(node);
                let parent_chain = self.chain(parent);
                let node_suffix = self.nodes[node].suffix.clone();
                let merged = format!("{node_suffix}{child_suffix}");
                let detached = self.nodes[parent].children.remove(&node_suffix);
                debug_assert_eq!(detached, Some(node));
                self.relink(child, parent, merged.clone());
                self.nodes.free(node);
                trace!(chain = %node_chain, suffix = %merged, "merged single-child node");
                self.watcher
                    .on_move(&node_chain, &child_suffix, &parent_chain, &merged);
                self.watcher.on_remove(&node_chain);
                self.compact(parent);
            }
            _ => {}
        }
    }

    /// Allocate a fresh content-less node under `parent` and report it.
    fn add_child(&mut self, parent: NodeId, suffix: String) -> NodeId {
        debug_assert!(!suffix.is_empty(), "only the root may have an empty suffix");
        let id = self.nodes.alloc(Node::new(suffix.clone(), Some(parent)));
        self.link_child(parent, suffix, id);
        let chain = self.chain(id);
        trace!(chain = %chain, "created node");
        self.watcher.on_create(&chain);
        id
    }

    /// Unregister the child under `suffix` without compacting or
    /// reporting; the caller re-links it right away.
    fn detach_child(&mut self, parent: NodeId, suffix: &str) -> NodeId {
        let Some(child) = self.nodes[parent].children.remove(suffix) else {
            unreachable!("detaching unregistered child {suffix:?}");
        };
        child
    }

    /// Hand the detached `child` (previously under `old_suffix` below
    /// `parent`) to `dest`, a child of `parent`, truncating its suffix by
    /// `dest`'s. Reports the move.
    fn demote(&mut self, parent: NodeId, child: NodeId, old_suffix: &str, dest: NodeId) {
        let cut = self.nodes[dest].suffix.len();
        let new_suffix = old_suffix[cut..].to_owned();
        let old_parent_chain = self.chain(parent);
        let new_parent_chain = self.chain(dest);
        self.relink(child, dest, new_suffix.clone());
        trace!(
            from = %old_parent_chain,
            to = %new_parent_chain,
            suffix = %new_suffix,
            "moved subtree"
        );
        self.watcher
            .on_move(&old_parent_chain, old_suffix, &new_parent_chain, &new_suffix);
    }

    /// Reparent `node` under `new_parent` with `suffix`: an index re-link,
    /// never a copy. The caller has already detached `node`.
    fn relink(&mut self, node: NodeId, new_parent: NodeId, suffix: String) {
        let n = &mut self.nodes[node];
        n.parent = Some(new_parent);
        n.suffix = suffix.clone();
        self.link_child(new_parent, suffix, node);
    }

    /// Register `child` under `parent`. A duplicate or overlapping sibling
    /// suffix is engine corruption and aborts.
    fn link_child(&mut self, parent: NodeId, suffix: String, child: NodeId) {
        debug_assert!(
            self.nodes[parent]
                .children
                .keys()
                .all(|existing| common_prefix_len(existing, &suffix) == 0),
            "sibling suffixes must be disjoint"
        );
        let prev = self.nodes[parent].children.insert(suffix, child);
        assert!(prev.is_none(), "duplicate child suffix");
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
