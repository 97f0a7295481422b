//! Ranked keypad trie.
//!
//! Every node stands for a digit prefix and has up to eight children, one per
//! letter key. Words hang off the node where their full encoding ends. Each
//! node also caches the best (lowest) rank in its subtree and the order in
//! which to visit its children, so that a bounded query can stop descending
//! into subtrees that can't beat what it already collected.

mod collect;
mod graph;

pub use collect::TopN;
pub use graph::Graph;

use serde::Serialize;

use crate::keypad::{self, KEYS, SEPARATOR};

/// Position of a word in the corpus. Lower is more popular.
pub type Rank = usize;

/// Best rank of a subtree holding no words.
pub const UNRANKED: Rank = Rank::MAX;

const NATURAL_ORDER: [u8; KEYS] = [0, 1, 2, 3, 4, 5, 6, 7];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("encode error: {0}")]
    Encode(#[from] keypad::Error),
    #[error("'{0}' contains a word separator and can't be stored")]
    Separator(String),
    #[error("invalid digit query '{0}', only keys 2-9 are allowed")]
    InvalidDigitQuery(String),
}

/// Dictionary word and its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    pub text: String,
    pub rank: Rank,
}

impl Word {
    pub fn new(text: impl Into<String>, rank: Rank) -> Self {
        Self {
            text: text.into(),
            rank,
        }
    }
}

#[derive(Debug)]
struct Node {
    /// Either absent or all eight present. Indexed by `keypad::digit_index`.
    children: Option<Box<[Node; KEYS]>>,
    /// Words whose whole encoding ends here.
    words: Vec<Word>,
    /// Lowest rank in this subtree.
    best_rank: Rank,
    /// Child slots sorted by their `best_rank`, ties in slot order.
    search_order: [u8; KEYS],
}

impl Default for Node {
    fn default() -> Self {
        Self {
            children: None,
            words: Vec::new(),
            best_rank: UNRANKED,
            search_order: NATURAL_ORDER,
        }
    }
}

impl Node {
    fn sort_children(&mut self) {
        if let Some(children) = &self.children {
            let mut order = NATURAL_ORDER;
            // sort_by_key is stable: empty children keep their natural order.
            order.sort_by_key(|&slot| children[slot as usize].best_rank);
            self.search_order = order;
        }
    }

    fn sort_rec(&mut self) {
        self.sort_children();

        if let Some(children) = &mut self.children {
            children.iter_mut().for_each(Node::sort_rec);
        }
    }

    fn collect<'a>(&'a self, top: &mut TopN<'a>) {
        if !top.accepts(self.best_rank) {
            return;
        }

        for word in &self.words {
            top.offer(word);
        }

        if let Some(children) = &self.children {
            for &slot in &self.search_order {
                let child = &children[slot as usize];
                // Skip rather than stop: the order may be stale after an
                // insertion, and later children could still be better.
                if top.accepts(child.best_rank) {
                    child.collect(top);
                }
            }
        }
    }

    fn count_words(&self) -> usize {
        self.words.len()
            + self
                .children
                .iter()
                .flat_map(|children| children.iter())
                .map(Node::count_words)
                .sum::<usize>()
    }

    fn count_nodes(&self) -> usize {
        1 + self
            .children
            .iter()
            .flat_map(|children| children.iter())
            .map(Node::count_nodes)
            .sum::<usize>()
    }

    fn height(&self) -> usize {
        self.children
            .iter()
            .flat_map(|children| children.iter())
            .map(|child| 1 + child.height())
            .max()
            .unwrap_or(0)
    }
}

/// In-memory trie built once from a corpus and queried many times.
///
/// Queries only read the trie, so a finished trie can be shared between
/// threads behind a plain reference.
#[derive(Debug, Default)]
pub struct T9Trie {
    root: Node,
    /// Set by `insert`, cleared by `recompute_search_order`.
    stale: bool,
}

impl T9Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a word without touching any `search_order`.
    ///
    /// Queries stay correct afterwards but prune less until
    /// `recompute_search_order` runs. Used for bulk loads.
    pub fn insert(&mut self, word: Word) -> Result<(), Error> {
        self.insert_path(word)?;
        self.stale = true;
        Ok(())
    }

    /// Insert a word and re-sort the children of every node on its path.
    ///
    /// Only nodes on the path can see a child's `best_rank` change, so this
    /// keeps the order fresh for this word. It doesn't clear staleness left
    /// by earlier `insert` calls.
    pub fn insert_ordered(&mut self, word: Word) -> Result<(), Error> {
        let slots = self.insert_path(word)?;

        let mut node = &mut self.root;
        for slot in slots {
            node.sort_children();
            let Some(children) = node.children.as_mut() else {
                break;
            };
            node = &mut children[slot];
        }

        Ok(())
    }

    /// Walk (and grow) the trie along the word's digits, returning the slots taken.
    fn insert_path(&mut self, word: Word) -> Result<Vec<usize>, Error> {
        let digits = keypad::encode(&word.text)?;

        // Resolve every slot up front so a rejected word leaves no nodes behind.
        let slots = digits
            .chars()
            .map(keypad::digit_index)
            .collect::<Option<Vec<usize>>>()
            .ok_or_else(|| {
                debug_assert!(digits.contains(SEPARATOR));
                Error::Separator(word.text.clone())
            })?;

        let mut node = &mut self.root;
        node.best_rank = node.best_rank.min(word.rank);

        for &slot in &slots {
            let children = node
                .children
                .get_or_insert_with(|| Box::new(Default::default()));
            node = &mut children[slot];
            node.best_rank = node.best_rank.min(word.rank);
        }

        node.words.push(word);
        Ok(slots)
    }

    /// Re-sort the visit order of every node, top-down.
    pub fn recompute_search_order(&mut self) {
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("sorting visit order of {} nodes", self.count_nodes());
        }
        self.root.sort_rec();
        self.stale = false;
    }

    /// True if words were inserted since the last `recompute_search_order`.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Get the `n` best ranked words whose encoding starts with `digits`,
    /// in ascending rank. The words are borrowed from the trie.
    pub fn query(&self, n: usize, digits: &str) -> Result<Vec<&Word>, Error> {
        if !keypad::is_valid_digit_query(digits) {
            return Err(Error::InvalidDigitQuery(digits.to_string()));
        }

        if n == 0 {
            return Ok(Vec::new());
        }

        let mut node = &self.root;
        for digit in digits.chars() {
            let (Some(children), Some(slot)) = (&node.children, keypad::digit_index(digit)) else {
                // No word goes this deep along this prefix.
                return Ok(Vec::new());
            };
            node = &children[slot];
        }

        let mut top = TopN::new(n);
        node.collect(&mut top);
        Ok(top.into_sorted())
    }

    /// Same as `query`, returning only the texts.
    pub fn get_word_list(&self, n: usize, digits: &str) -> Result<Vec<String>, Error> {
        Ok(self
            .query(n, digits)?
            .into_iter()
            .map(|w| w.text.clone())
            .collect())
    }

    pub fn count_words(&self) -> usize {
        self.root.count_words()
    }

    /// Allocated nodes, placeholders and root included.
    pub fn count_nodes(&self) -> usize {
        self.root.count_nodes()
    }

    /// Deepest allocated level (0 for an empty trie).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Graphviz view of the populated part of the trie.
    pub fn graph(&self) -> Graph<'_> {
        Graph::new(&self.root)
    }
}
