//! Bounded most-recent window over unordered comment batches
//!
//! The Feddit API does not return comments in creation order, so the only
//! way to find the newest ones is to look at every page. The window keeps
//! at most `capacity` comments at any time: each batch is filtered by the
//! time range, merged in (skipping IDs already held), sorted newest first
//! and truncated.
//!
//! Comments with equal `created_at` keep their arrival order, but callers
//! must not rely on the order of ties.

use std::collections::HashSet;

use crate::types::{RawComment, TimeRange};

/// Top-`capacity` most recent comments seen so far
#[derive(Debug, Clone)]
pub struct MergeWindow {
    capacity: usize,
    range: TimeRange,
    items: Vec<RawComment>,
}

impl MergeWindow {
    pub fn new(capacity: usize, range: TimeRange) -> Self {
        Self {
            capacity,
            range,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Merge one batch into the window
    ///
    /// Returns the number of comments from the batch that passed the time
    /// filter and were not duplicates (before truncation).
    pub fn merge(&mut self, batch: Vec<RawComment>) -> usize {
        let range = self.range;
        let mut seen: HashSet<i64> = self.items.iter().map(|c| c.id).collect();
        let before = self.items.len();

        self.items.extend(
            batch
                .into_iter()
                .filter(|c| range.contains(c.created_at))
                .filter(|c| seen.insert(c.id)),
        );
        let accepted = self.items.len() - before;

        // Stable sort: ties stay in arrival order
        self.items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        self.items.truncate(self.capacity);

        accepted
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current contents, newest first
    pub fn items(&self) -> &[RawComment] {
        &self.items
    }

    pub fn into_items(self) -> Vec<RawComment> {
        self.items
    }
}
