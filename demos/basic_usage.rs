//! Walkthrough of the radixkv surface: the mapping, subtries, and the
//! structural-change watcher.

use radixkv::{RadixTree, Watcher};

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    example_mapping();
    example_subtrie();
    example_watcher();
}

fn example_mapping() {
    println!("=== Mapping ===\n");

    let mut tree: RadixTree<u64> = RadixTree::new();
    tree.insert("docs/reports/q1", 1);
    tree.insert("docs/reports/q2", 2);
    tree.insert("docs/drafts/intro", 3);

    println!("docs/reports/q1 = {:?}", tree.get("docs/reports/q1"));
    println!("docs/missing    = {:?}", tree.get("docs/missing"));
    println!("values: {}, nodes: {}\n", tree.len(), tree.node_count());

    println!("{tree:?}");
}

fn example_subtrie() {
    println!("=== Subtrie ===\n");

    let mut tree: RadixTree<u64> = RadixTree::new();
    tree.insert("cat", 1);
    tree.insert("car", 2);
    tree.insert("dog", 3);

    // "cat" and "car" share the "ca" branch node.
    let ca = tree.subtrie("ca").expect("branch exists");
    println!("chain: {:?}", ca.chain());
    for (key, value) in ca.iter() {
        println!("  relative key {key:?} -> {value}");
    }
    println!();
}

struct PrintWatcher;

impl Watcher<u64> for PrintWatcher {
    fn on_create(&mut self, chain: &str) {
        println!("  create {chain:?}");
    }

    fn on_insert(&mut self, chain: &str, value: &u64) {
        println!("  insert {chain:?} = {value}");
    }

    fn on_delete(&mut self, chain: &str, value: &u64) {
        println!("  delete {chain:?} (was {value})");
    }

    fn on_move(&mut self, old_parent: &str, old_suffix: &str, new_parent: &str, new_suffix: &str) {
        println!("  move   {old_parent:?}/{old_suffix:?} -> {new_parent:?}/{new_suffix:?}");
    }

    fn on_remove(&mut self, chain: &str) {
        println!("  remove {chain:?}");
    }
}

fn example_watcher() {
    println!("=== Watcher ===\n");

    let mut tree: RadixTree<u64> = RadixTree::with_watcher(PrintWatcher);

    println!("insert cat:");
    tree.insert("cat", 1);
    println!("insert car (splits the edge):");
    tree.insert("car", 2);
    println!("remove cat (merges the branch away):");
    tree.remove("cat").expect("cat is present");
}
