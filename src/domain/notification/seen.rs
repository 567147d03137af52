//! Bounded memory of processed notification ids

use std::collections::{HashSet, VecDeque};

use super::NotificationId;

/// Default number of ids remembered before the oldest is evicted
pub const DEFAULT_SEEN_CAPACITY: usize = 10_000;

/// Set of already-processed notification ids with FIFO eviction.
#[derive(Debug, Clone)]
pub struct SeenSet {
    capacity: usize,
    ids: HashSet<NotificationId>,
    order: VecDeque<NotificationId>,
}

impl SeenSet {
    /// Create a set remembering at most `capacity` ids (minimum 1)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            ids: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    /// Record an id. Returns true if it had not been seen before.
    pub fn insert(&mut self, id: NotificationId) -> bool {
        if self.ids.contains(&id) {
            return false;
        }

        while self.order.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.ids.remove(&oldest);
                }
                None => break,
            }
        }

        self.order.push_back(id.clone());
        self.ids.insert(id);
        true
    }

    /// Record every id of one store snapshot, in order.
    ///
    /// Returns, per id, whether it was new. Ids present in the snapshot are
    /// never evicted, so the set may hold more than `capacity` ids while the
    /// store itself is larger than that.
    pub fn observe_snapshot<'a, I>(&mut self, ids: I) -> Vec<bool>
    where
        I: IntoIterator<Item = &'a NotificationId>,
    {
        let mut current = HashSet::new();
        let mut novelty = Vec::new();

        for id in ids {
            current.insert(id.clone());
            let is_new = self.ids.insert(id.clone());
            if is_new {
                self.order.push_back(id.clone());
            }
            novelty.push(is_new);
        }

        self.evict_outside(&current);
        novelty
    }

    /// Drop the oldest ids beyond capacity, skipping those in `keep`
    fn evict_outside(&mut self, keep: &HashSet<NotificationId>) {
        let mut kept = VecDeque::new();
        while self.ids.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if keep.contains(&oldest) {
                kept.push_back(oldest);
            } else {
                self.ids.remove(&oldest);
            }
        }
        while let Some(id) = kept.pop_back() {
            self.order.push_front(id);
        }
    }

    pub fn contains(&self, id: &NotificationId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for SeenSet {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_SEEN_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> NotificationId {
        NotificationId::new(s)
    }

    #[test]
    fn insert_reports_novelty() {
        let mut seen = SeenSet::default();
        assert!(seen.insert(id("a")));
        assert!(!seen.insert(id("a")));
        assert!(seen.contains(&id("a")));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn evicts_oldest_when_full() {
        let mut seen = SeenSet::with_capacity(2);
        seen.insert(id("a"));
        seen.insert(id("b"));
        seen.insert(id("c"));

        assert!(!seen.contains(&id("a")));
        assert!(seen.contains(&id("b")));
        assert!(seen.contains(&id("c")));
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn duplicate_insert_does_not_refresh_position() {
        let mut seen = SeenSet::with_capacity(2);
        seen.insert(id("a"));
        seen.insert(id("b"));
        seen.insert(id("a"));
        seen.insert(id("c"));

        assert!(!seen.contains(&id("a")));
        assert!(seen.contains(&id("c")));
    }

    #[test]
    fn snapshot_larger_than_capacity_stays_seen() {
        let mut seen = SeenSet::with_capacity(2);
        let store = vec![id("a"), id("b"), id("c")];

        assert_eq!(seen.observe_snapshot(&store), vec![true, true, true]);
        assert_eq!(seen.observe_snapshot(&store), vec![false, false, false]);
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn snapshot_evicts_only_ids_that_left_the_store() {
        let mut seen = SeenSet::with_capacity(2);
        seen.observe_snapshot(&[id("a"), id("b"), id("c")]);

        assert_eq!(seen.observe_snapshot(&[id("c"), id("d")]), vec![false, true]);
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&id("c")));
        assert!(seen.contains(&id("d")));
        assert!(!seen.contains(&id("a")));
    }

    #[test]
    fn duplicate_ids_in_one_snapshot_count_once() {
        let mut seen = SeenSet::with_capacity(10);
        assert_eq!(seen.observe_snapshot(&[id("a"), id("a")]), vec![true, false]);
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut seen = SeenSet::with_capacity(0);
        assert_eq!(seen.capacity(), 1);
        assert!(seen.insert(id("a")));
        assert!(seen.insert(id("b")));
        assert!(!seen.contains(&id("a")));
    }
}
