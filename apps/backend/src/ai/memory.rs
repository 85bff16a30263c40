//! Bounded, recency-ordered card memory for the opponent planner.

use std::collections::VecDeque;

/// Remembered `(card index, pair id)` entries, oldest first.
///
/// Re-remembering an index moves it to the newest position. When the
/// capacity is exceeded the oldest entry is evicted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AiMemory {
    seen: VecDeque<(usize, String)>,
    capacity: Option<usize>,
}

impl AiMemory {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            seen: VecDeque::new(),
            capacity,
        }
    }

    pub fn remember(&mut self, index: usize, pair_id: &str) {
        self.seen.retain(|(i, _)| *i != index);
        self.seen.push_back((index, pair_id.to_string()));
        if let Some(cap) = self.capacity {
            while self.seen.len() > cap {
                self.seen.pop_front();
            }
        }
    }

    /// Drop every entry of a matched pair.
    pub fn forget_pair(&mut self, pair_id: &str) {
        self.seen.retain(|(_, p)| p != pair_id);
    }

    pub fn recall(&self, index: usize) -> Option<&str> {
        self.seen
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, p)| p.as_str())
    }

    /// Remembered indices holding `pair_id`, newest first.
    pub fn indices_of<'a>(&'a self, pair_id: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.seen
            .iter()
            .rev()
            .filter(move |(_, p)| p == pair_id)
            .map(|(i, _)| *i)
    }

    /// A pair with both cards remembered and still available, newest first.
    pub fn known_pair(&self, available: impl Fn(usize) -> bool) -> Option<(usize, usize)> {
        self.seen.iter().rev().find_map(|(i, pair)| {
            if !available(*i) {
                return None;
            }
            self.indices_of(pair)
                .find(|j| j != i && available(*j))
                .map(|j| (*i, j))
        })
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
