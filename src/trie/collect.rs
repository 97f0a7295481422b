use super::{Rank, Word, UNRANKED};

/// Fixed capacity buffer keeping the `n` best ranked words seen so far.
///
/// N is expected to stay small (a screen of suggestions), so a full buffer
/// is rescanned linearly on replacement instead of being kept in a heap.
pub struct TopN<'a> {
    words: Vec<&'a Word>,
    capacity: usize,
    /// Highest rank currently held. `UNRANKED` until the buffer is full.
    worst: Rank,
}

impl<'a> TopN<'a> {
    pub fn new(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
            capacity,
            worst: UNRANKED,
        }
    }

    pub fn is_full(&self) -> bool {
        self.words.len() >= self.capacity
    }

    /// True if a subtree whose best rank is `best` may still improve the buffer.
    pub fn accepts(&self, best: Rank) -> bool {
        self.capacity > 0 && (!self.is_full() || best < self.worst)
    }

    pub fn offer(&mut self, word: &'a Word) {
        if !self.is_full() {
            self.words.push(word);
            // `worst` only becomes meaningful once the last slot is taken.
            if self.is_full() {
                self.worst = self.max_rank();
            }
            return;
        }

        if word.rank >= self.worst {
            return;
        }

        if let Some(slot) = self.words.iter().position(|w| w.rank == self.worst) {
            self.words[slot] = word;
            self.worst = self.max_rank();
        }
    }

    fn max_rank(&self) -> Rank {
        self.words.iter().map(|w| w.rank).max().unwrap_or(UNRANKED)
    }

    pub fn into_sorted(mut self) -> Vec<&'a Word> {
        self.words.sort_by_key(|w| w.rank);
        self.words
    }
}
