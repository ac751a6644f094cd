//! Request id allocation
//!
//! Every outgoing call borrows an integer id for the duration of its
//! round trip. The allocator hands out the smallest positive integer
//! not currently in flight, so ids are recycled instead of growing
//! without bound and tests see deterministic values.
//!
//! # Concurrency
//!
//! The active set is shared by every clone of the allocator. Both
//! operations take one exclusive critical section covering the whole
//! scan-and-insert (or remove), so concurrent calls can never observe
//! or produce a duplicate id. A `std::sync::Mutex` is used rather than
//! an async lock: the critical section is a short in-memory scan and is
//! never held across an await.
//!
//! # Cleanup
//!
//! [`IdAllocator::lease`] returns an [`IdGuard`] that releases the id
//! on drop. The pipeline holds the guard for the whole round trip,
//! which guarantees release on every exit path, panics included.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

/// Allocator for in-flight request ids
///
/// Cheaply cloneable; all clones share the same active set.
///
/// # Examples
///
/// ```rust
/// use remit_client::IdAllocator;
///
/// let ids = IdAllocator::new();
/// assert_eq!(ids.allocate(), 1);
/// assert_eq!(ids.allocate(), 2);
/// ids.release(1);
/// // 1 is free again and is the smallest free id
/// assert_eq!(ids.allocate(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    /// Exactly the ids allocated but not yet released
    active: Arc<Mutex<BTreeSet<i64>>>,
}

impl IdAllocator {
    /// Create a new allocator with no ids in flight
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the smallest positive integer not currently in flight
    pub fn allocate(&self) -> i64 {
        let mut active = self.lock();
        let mut id = 1;
        // BTreeSet iterates in ascending order, so the first gap in the
        // sequence 1, 2, 3, ... is the smallest free id
        for &held in active.iter() {
            if held == id {
                id += 1;
            } else if held > id {
                break;
            }
        }
        active.insert(id);
        id
    }

    /// Release an id back to the pool
    ///
    /// Releasing an id that is not in flight is a no-op.
    pub fn release(&self, id: i64) {
        self.lock().remove(&id);
    }

    /// Number of ids currently in flight
    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }

    /// Allocate an id wrapped in a guard that releases it on drop
    pub fn lease(&self) -> IdGuard {
        IdGuard {
            id: self.allocate(),
            allocator: self.clone(),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeSet<i64>> {
        // A poisoned lock only means another call panicked mid-scan;
        // the set itself is still consistent
        self.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// RAII lease on a request id
///
/// Dropping the guard releases the id, whatever path the call took.
#[derive(Debug)]
pub struct IdGuard {
    id: i64,
    allocator: IdAllocator,
}

impl IdGuard {
    /// The leased id
    pub fn id(&self) -> i64 {
        self.id
    }
}

impl Drop for IdGuard {
    fn drop(&mut self) {
        self.allocator.release(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocates_smallest_free() {
        let ids = IdAllocator::new();
        assert_eq!(ids.allocate(), 1);
        assert_eq!(ids.allocate(), 2);
        assert_eq!(ids.allocate(), 3);
    }

    #[test]
    fn test_recycles_released_id() {
        let ids = IdAllocator::new();
        ids.allocate();
        ids.allocate();
        ids.allocate();
        ids.release(2);
        assert_eq!(ids.allocate(), 2);
        assert_eq!(ids.allocate(), 4);
    }

    #[test]
    fn test_release_is_idempotent() {
        let ids = IdAllocator::new();
        let id = ids.allocate();
        ids.release(id);
        ids.release(id);
        ids.release(99);
        assert_eq!(ids.in_flight(), 0);
    }

    #[test]
    fn test_guard_releases_on_drop() {
        let ids = IdAllocator::new();
        {
            let lease = ids.lease();
            assert_eq!(lease.id(), 1);
            assert_eq!(ids.in_flight(), 1);
        }
        assert_eq!(ids.in_flight(), 0);
        assert_eq!(ids.allocate(), 1);
    }

    #[test]
    fn test_guard_releases_on_panic() {
        let ids = IdAllocator::new();
        let inner = ids.clone();
        let result = std::panic::catch_unwind(move || {
            let _lease = inner.lease();
            panic!("call blew up");
        });
        assert!(result.is_err());
        assert_eq!(ids.in_flight(), 0);
    }

    #[test]
    fn test_concurrent_allocation_no_duplicates() {
        let ids = IdAllocator::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || {
                    let mut got = Vec::new();
                    for _ in 0..100 {
                        got.push(ids.allocate());
                    }
                    got
                })
            })
            .collect();

        let mut all: Vec<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort_unstable();
        all.dedup();
        // No two in-flight calls ever share an id
        assert_eq!(all.len(), total);
        assert_eq!(ids.in_flight(), total);
    }

    #[test]
    fn test_concurrent_allocate_release_keeps_set_consistent() {
        let ids = IdAllocator::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ids = ids.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        let lease = ids.lease();
                        assert!(lease.id() >= 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(ids.in_flight(), 0);
    }
}
