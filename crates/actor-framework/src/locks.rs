//! # Keyed Locks
//!
//! Actors make single-entity operations atomic. When a workflow has to read and then
//! write *several* entities of the same actor without anyone else interleaving (the
//! "row lock" of a database transaction), it takes a [`Claim`] on those keys first.
//!
//! One async mutex is created lazily per key and removed again when the last claim
//! on it (held or waiting) goes away, so the registry only holds keys in use.
//! [`KeyedLocks::claim`] acquires a set of keys in ascending order, so two claims
//! over overlapping key sets cannot deadlock. Claims over disjoint key sets never
//! wait on each other.

use std::collections::{BTreeSet, HashMap};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;

type Registry<K> = Arc<Mutex<HashMap<K, Arc<AsyncMutex<()>>>>>;

/// Registry of per-key async locks.
pub struct KeyedLocks<K> {
    locks: Registry<K>,
}

impl<K> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self {
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> KeyedLocks<K>
where
    K: Ord + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_for(&self, key: &K) -> Arc<AsyncMutex<()>> {
        // Every update is a single insert or remove, so a poisoned map is still consistent.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Exclusively claim every key in `keys` (duplicates are ignored).
    ///
    /// Waits until all keys are free. The claim is released when dropped.
    pub async fn claim(&self, keys: impl IntoIterator<Item = K>) -> Claim<K> {
        let ordered: BTreeSet<K> = keys.into_iter().collect();
        let mut guards = Vec::with_capacity(ordered.len());
        for key in &ordered {
            let lock = self.lock_for(key);
            guards.push(lock.lock_owned().await);
            trace!(?key, "claimed");
        }
        Claim {
            keys: ordered.into_iter().collect(),
            guards,
            registry: self.locks.clone(),
        }
    }

    /// Keys currently held or waited on.
    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Exclusive hold on a set of keys, released on drop.
#[must_use = "the claim is released as soon as it is dropped"]
pub struct Claim<K: Eq + Hash> {
    keys: Vec<K>,
    guards: Vec<OwnedMutexGuard<()>>,
    registry: Registry<K>,
}

impl<K: Eq + Hash> Claim<K> {
    /// The claimed keys, in acquisition (ascending) order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }
}

impl<K: Eq + Hash> Drop for Claim<K> {
    fn drop(&mut self) {
        self.guards.clear();
        let mut locks = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        for key in &self.keys {
            // Only the map's own reference left: nobody holds or waits on this key.
            if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
                locks.remove(key);
            }
        }
    }
}
