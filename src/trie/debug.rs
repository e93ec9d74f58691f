//! Tree-shape rendering for troubleshooting.

use std::fmt;

use crate::arena::NodeId;

use super::RadixTree;

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "RadixTree {{ len: {}, nodes: {} }}",
            self.len,
            self.node_count()
        )?;
        self.fmt_node(f, self.root, 0)
    }
}

impl<V: fmt::Debug> RadixTree<V> {
    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: NodeId, depth: usize) -> fmt::Result {
        let n = &self.nodes[node];
        for _ in 0..depth {
            f.write_str("  ")?;
        }
        if n.suffix.is_empty() {
            f.write_str("(root)")?;
        } else {
            write!(f, "{:?}", n.suffix)?;
        }
        match n.content.as_ref() {
            Some(value) => writeln!(f, " -> {value:?}")?,
            None => writeln!(f)?,
        }
        for child in n.children.values() {
            self.fmt_node(f, *child, depth + 1)?;
        }
        Ok(())
    }
}
