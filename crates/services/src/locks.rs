//! Per-user write serialization.
//!
//! Transcript persistence is a read-modify-write cycle over the whole
//! transcript, so concurrent requests for the same user must not
//! interleave. This registry hands out one async mutex per user, bounded
//! with LRU eviction so unique user ids cannot exhaust memory.

use std::sync::Arc;

use indexmap::IndexMap;
use tokio::sync::{Mutex, RwLock};

/// Default maximum number of users to track before LRU eviction.
const DEFAULT_MAX_USERS: usize = 10000;

/// Registry of per-user mutexes with LRU eviction.
#[derive(Debug)]
pub struct UserLocks {
    /// Map from user ID to their lock.
    /// Uses IndexMap to maintain insertion order for LRU eviction.
    locks: RwLock<IndexMap<String, Arc<Mutex<()>>>>,
    /// Maximum number of users to track before LRU eviction.
    max_users: usize,
}

impl Default for UserLocks {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_USERS)
    }
}

impl UserLocks {
    /// Create a registry bounded to `max_users` tracked users.
    pub fn new(max_users: usize) -> Self {
        Self {
            locks: RwLock::new(IndexMap::new()),
            max_users,
        }
    }

    /// Get the lock for a user, creating it on first use.
    ///
    /// Marks the user as recently used for LRU purposes. Callers hold the
    /// returned handle and `lock().await` it for the duration of their
    /// read-modify-write cycle.
    ///
    /// A lock with an outstanding handle is never evicted, so the
    /// registry can exceed the bound while every tracked user is
    /// mid-request.
    pub async fn acquire(&self, user_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.write().await;

        // Move to end to mark as recently used (LRU behavior)
        let lock = match locks.shift_remove(user_id) {
            Some(existing) => existing,
            None => Arc::new(Mutex::new(())),
        };
        locks.insert(user_id.to_string(), Arc::clone(&lock));

        // LRU eviction: drop the oldest entries nobody holds. Evicting a
        // held lock would let a second request for that user race the
        // first, so in-use entries are skipped.
        while locks.len() > self.max_users {
            let Some(idx) = locks.iter().position(|(_, l)| Arc::strong_count(l) == 1) else {
                break;
            };
            locks.shift_remove_index(idx);
        }

        lock
    }

    /// Number of currently tracked users.
    pub async fn tracked_users(&self) -> usize {
        self.locks.read().await.len()
    }
}
