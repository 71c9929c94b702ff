//! Expiring key-value store
//!
//! An injectable TTL map for ephemeral state such as verification codes.
//! Entries expire lazily on read; `purge_expired` offers an explicit sweep
//! for callers that prefer active eviction. There is no background task.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::hash::Hash;

struct Entry<V> {
    value: V,
    expires_at: DateTime<Utc>,
}

/// Key-value store whose entries carry a per-insert time-to-live
pub struct ExpiringStore<K, V> {
    entries: HashMap<K, Entry<V>>,
}

impl<K: Eq + Hash, V> Default for ExpiringStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> ExpiringStore<K, V> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Insert a value that expires after `ttl`. Overwrites any previous
    /// entry for the key, including its deadline.
    pub fn insert(&mut self, key: K, value: V, ttl: Duration) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Utc::now() + ttl,
            },
        );
    }

    /// Read a value; an expired entry is removed and reads as absent
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expires_at <= Utc::now(),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries.get(key).map(|e| &e.value)
    }

    /// Remove a value regardless of expiry, returning it if still live
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let entry = self.entries.remove(key)?;
        if entry.expires_at <= Utc::now() {
            None
        } else {
            Some(entry.value)
        }
    }

    /// Drop every expired entry, returning how many were evicted
    pub fn purge_expired(&mut self) -> usize {
        let now = Utc::now();
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        before - self.entries.len()
    }

    /// Number of entries currently held, expired or not
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
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_starts_empty() {
        let store: ExpiringStore<&str, u32> = ExpiringStore::default();
        assert!(store.is_empty());
    }

    #[test]
    fn test_live_entry_readable() {
        let mut store = ExpiringStore::new();
        store.insert("code", 123456, Duration::minutes(5));

        assert_eq!(store.get(&"code"), Some(&123456));
    }

    #[test]
    fn test_expired_entry_removed_on_read() {
        let mut store = ExpiringStore::new();
        store.insert("code", 123456, Duration::milliseconds(-1));

        assert_eq!(store.get(&"code"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_respects_expiry() {
        let mut store = ExpiringStore::new();
        store.insert("live", 1, Duration::minutes(5));
        store.insert("dead", 2, Duration::milliseconds(-1));

        assert_eq!(store.remove(&"live"), Some(1));
        assert_eq!(store.remove(&"dead"), None);
    }

    #[test]
    fn test_purge_expired_sweeps() {
        let mut store = ExpiringStore::new();
        store.insert("a", 1, Duration::minutes(5));
        store.insert("b", 2, Duration::milliseconds(-1));
        store.insert("c", 3, Duration::milliseconds(-1));

        assert_eq!(store.purge_expired(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reinsert_resets_deadline() {
        let mut store = ExpiringStore::new();
        store.insert("code", 1, Duration::milliseconds(-1));
        store.insert("code", 2, Duration::minutes(5));

        assert_eq!(store.get(&"code"), Some(&2));
    }
}
