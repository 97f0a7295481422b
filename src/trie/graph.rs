use std::fmt;

use super::{Node, UNRANKED};

/// Display the populated nodes of a trie in the graphviz format.
/// Placeholder children (empty subtrees) are left out.
pub struct Graph<'a> {
    root: &'a Node,
}

impl<'a> Graph<'a> {
    pub(super) fn new(root: &'a Node) -> Self {
        Self { root }
    }
}

impl fmt::Display for Graph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "digraph G {{")?;

        let mut next_id = 0;
        fmt_rec(f, self.root, &mut next_id)?;

        writeln!(f, "}}")
    }
}

fn fmt_rec(f: &mut fmt::Formatter, node: &Node, next_id: &mut usize) -> fmt::Result {
    let id = *next_id;
    *next_id += 1;

    let words: Vec<&str> = node.words.iter().map(|w| w.text.as_str()).collect();
    if words.is_empty() {
        writeln!(f, "{} [label=\"{}\"];", id, node.best_rank)?;
    } else {
        writeln!(
            f,
            "{} [label=\"{}\\n{}\", color=green, style=filled];",
            id,
            node.best_rank,
            words.join(" ")
        )?;
    }

    let Some(children) = &node.children else {
        return Ok(());
    };

    for (slot, child) in children.iter().enumerate() {
        if child.best_rank == UNRANKED {
            continue;
        }

        writeln!(f, "{} -> {} [label=\"{}\"];", id, *next_id, slot + 2)?;
        fmt_rec(f, child, next_id)?;
    }

    Ok(())
}
