//! Structural-change notification protocol.
//!
//! A [`RadixTree`](crate::RadixTree) reports every structural mutation to
//! the [`Watcher`] it was built with, synchronously and exactly once per
//! change, while the mutating call is still in progress. The five events
//! below are the complete alphabet: a consumer projecting the tree onto an
//! external representation (directory entries, an index file, a UI) needs
//! to handle nothing else.
//!
//! All chains are absolute keys: the concatenation of edge suffixes from
//! the root down to the node in question.

/// Observer for structural changes to a tree.
///
/// Every method has a no-op default body, so an implementation only spells
/// out the events it cares about. Events fire after the tree is internally
/// consistent again, so a callback may read derived state it has been
/// handed, but it cannot touch the tree itself: the tree stays exclusively
/// borrowed for the duration of the mutating call.
pub trait Watcher<V> {
    /// A node was instantiated. Fires for the root when the tree is built,
    /// then for every branch or leaf added during insertion.
    fn on_create(&mut self, _chain: &str) {}

    /// A value was stored at the node `chain` names, replacing any
    /// previous value silently.
    fn on_insert(&mut self, _chain: &str, _value: &V) {}

    /// The value at `chain` was cleared; `value` is the content that was
    /// removed. Compaction events for the vacated node follow separately.
    fn on_delete(&mut self, _chain: &str, _value: &V) {}

    /// A subtree was reparented. The node previously registered under
    /// `old_suffix` below the node at `old_parent` is now registered under
    /// `new_suffix` below the node at `new_parent`.
    fn on_move(
        &mut self,
        _old_parent: &str,
        _old_suffix: &str,
        _new_parent: &str,
        _new_suffix: &str,
    ) {
    }

    /// The node at `chain` was detached from the tree entirely.
    fn on_remove(&mut self, _chain: &str) {}
}

/// Watcher that ignores every event; the default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopWatcher;

impl<V> Watcher<V> for NoopWatcher {}
