//! In-memory holding area for uploaded comparison datasets.

use std::collections::{HashMap, VecDeque};

use reelbook_core::comparison::Dataset;
use uuid::Uuid;

/// Uploaded datasets keyed by id, bounded to `capacity` entries.
///
/// Inserting past capacity evicts the oldest upload.
#[derive(Debug)]
pub struct DatasetCache {
    capacity: usize,
    order: VecDeque<Uuid>,
    entries: HashMap<Uuid, Dataset>,
}

impl DatasetCache {
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Store a dataset, returning the ids evicted to make room.
    pub fn insert(&mut self, id: Uuid, dataset: Dataset) -> Vec<Uuid> {
        if self.entries.insert(id, dataset).is_none() {
            self.order.push_back(id);
        }

        let mut evicted = Vec::new();
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            evicted.push(oldest);
        }
        evicted
    }

    pub fn get(&self, id: &Uuid) -> Option<&Dataset> {
        self.entries.get(id)
    }

    /// Drop a dataset. Returns `false` when it was not held.
    pub fn remove(&mut self, id: &Uuid) -> bool {
        if self.entries.remove(id).is_none() {
            return false;
        }
        self.order.retain(|held| held != id);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset {
            columns: vec!["brand".into(), "model".into()],
            rows: Vec::new(),
        }
    }

    #[test]
    fn oldest_upload_is_evicted_past_capacity() {
        let mut cache = DatasetCache::new(2);
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();

        assert!(cache.insert(ids[0], dataset()).is_empty());
        assert!(cache.insert(ids[1], dataset()).is_empty());
        assert_eq!(cache.insert(ids[2], dataset()), vec![ids[0]]);

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&ids[0]).is_none());
        assert!(cache.get(&ids[2]).is_some());
    }

    #[test]
    fn removed_entries_free_their_slot() {
        let mut cache = DatasetCache::new(2);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        cache.insert(a, dataset());
        cache.insert(b, dataset());

        assert!(cache.remove(&a));
        assert!(!cache.remove(&a));
        assert!(cache.insert(c, dataset()).is_empty());
        assert!(cache.get(&b).is_some());
    }

    #[test]
    fn zero_capacity_still_holds_the_latest() {
        let mut cache = DatasetCache::new(0);
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        cache.insert(a, dataset());
        assert_eq!(cache.insert(b, dataset()), vec![a]);
        assert!(cache.get(&b).is_some());
    }
}
