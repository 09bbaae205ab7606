//! Bounded append-only history stores.
//!
//! Two process-wide instances back the engine: weather samples (cap 100) and
//! prediction records (cap 50). Initialized empty at startup, cleared only
//! explicitly, never implicitly reset.

use std::collections::VecDeque;
use std::sync::{Arc, PoisonError, RwLock};

/// Generic capped append log. Insertion order is preserved; once full, the
/// oldest entries are evicted first so the most recent `capacity` items
/// remain.
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn append(&mut self, item: T) {
        self.items.push_back(item);
        while self.items.len() > self.capacity {
            self.items.pop_front();
        }
        debug_assert!(self.items.len() <= self.capacity);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// Snapshot in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }
}

/// Shared handle over a bounded history. The write lock serializes appends;
/// readers take a consistent snapshot without holding writers off
/// indefinitely.
#[derive(Debug)]
pub struct SharedHistory<T> {
    inner: Arc<RwLock<BoundedHistory<T>>>,
}

impl<T> Clone for SharedHistory<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SharedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(BoundedHistory::new(capacity))),
        }
    }

    pub fn append(&self, item: T) {
        // A panic elsewhere poisons the lock but leaves the store in its
        // last consistent state; keep accepting writes rather than silently
        // dropping them.
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .append(item);
    }

    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl<T: Clone> SharedHistory<T> {
    pub fn all(&self) -> Vec<T> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .all()
    }
}
