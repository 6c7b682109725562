//! In-memory reference store
//!
//! [`MemoryStore`] implements [`StoreClient`] over a
//! `parking_lot::RwLock<HashMap>`. It exists for tests and for embedded
//! deployments that want cache semantics without a network store.
//!
//! # Design Notes
//!
//! - **Two entry shapes**: a key holds either a flat value or a field map,
//!   never both. Commands of the wrong shape fail with a `WRONGTYPE`
//!   transport error, mirroring the backing store this trait models.
//! - **Logical TTL expiration**: expired entries are filtered at read time;
//!   writes evict them lazily. There is no background cleaner.
//! - **No cross-call atomicity**: each command takes the lock once;
//!   concurrent writers race under last-write-wins, as the adapter contract
//!   documents.

use crate::client::{StoreClient, StoreResult};
use bucketcache_core::error::TransportError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// A stored entry: one shape plus an optional expiry deadline
#[derive(Debug, Clone)]
struct Entry {
    shape: Shape,
    expires_at: Option<Instant>,
}

#[derive(Debug, Clone)]
enum Shape {
    Flat(Vec<u8>),
    Hash(HashMap<String, Vec<u8>>),
}

impl Entry {
    fn flat(value: Vec<u8>, ttl_seconds: u64) -> Self {
        Entry {
            shape: Shape::Flat(value),
            expires_at: deadline(ttl_seconds),
        }
    }

    fn empty_hash() -> Self {
        Entry {
            shape: Shape::Hash(HashMap::new()),
            expires_at: None,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Instant::now())
    }
}

fn deadline(ttl_seconds: u64) -> Option<Instant> {
    (ttl_seconds > 0).then(|| Instant::now() + Duration::from_secs(ttl_seconds))
}

fn wrong_type(key: &str) -> TransportError {
    TransportError::Command(format!(
        "WRONGTYPE operation against a key holding the wrong kind of value: {key}"
    ))
}

/// In-memory [`StoreClient`] backend
///
/// # Examples
///
/// ```
/// use bucketcache_storage::{MemoryStore, StoreClient};
///
/// let store = MemoryStore::new();
/// store.set("greeting", 0, b"hi")?;
/// assert_eq!(store.get("greeting")?, Some(b"hi".to_vec()));
/// # Ok::<(), bucketcache_core::error::TransportError>(())
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) keys, any shape
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|e| !e.is_expired())
            .count()
    }

    /// True when no live keys exist
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Run `f` over the live entry for `key`, evicting it first if expired
    fn with_live_entry<T>(&self, key: &str, f: impl FnOnce(Option<&Entry>) -> T) -> T {
        {
            let guard = self.entries.read();
            match guard.get(key) {
                None => return f(None),
                Some(entry) if !entry.is_expired() => return f(Some(entry)),
                Some(_) => {}
            }
        }
        self.entries.write().remove(key);
        f(None)
    }
}

impl StoreClient for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.with_live_entry(key, |entry| match entry {
            None => Ok(None),
            Some(Entry {
                shape: Shape::Flat(value),
                ..
            }) => Ok(Some(value.clone())),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn set(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> StoreResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), Entry::flat(value.to_vec(), ttl_seconds));
        Ok(())
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<Vec<u8>>> {
        self.with_live_entry(key, |entry| match entry {
            None => Ok(None),
            Some(Entry {
                shape: Shape::Hash(fields),
                ..
            }) => Ok(fields.get(field).cloned()),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn hset(&self, key: &str, field: &str, value: &[u8]) -> StoreResult<()> {
        let mut guard = self.entries.write();
        let entry = guard.entry(key.to_string()).or_insert_with(Entry::empty_hash);
        if entry.is_expired() {
            *entry = Entry::empty_hash();
        }
        match &mut entry.shape {
            Shape::Hash(fields) => {
                fields.insert(field.to_string(), value.to_vec());
                Ok(())
            }
            Shape::Flat(_) => Err(wrong_type(key)),
        }
    }

    fn hdel(&self, key: &str, field: &str) -> StoreResult<()> {
        let mut guard = self.entries.write();
        let Some(entry) = guard.get_mut(key) else {
            return Ok(());
        };
        if entry.is_expired() {
            guard.remove(key);
            return Ok(());
        }
        match &mut entry.shape {
            Shape::Hash(fields) => {
                fields.remove(field);
                // The backing store removes empty hashes
                if fields.is_empty() {
                    guard.remove(key);
                }
                Ok(())
            }
            Shape::Flat(_) => Err(wrong_type(key)),
        }
    }

    fn hvals(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        self.with_live_entry(key, |entry| match entry {
            None => Ok(Vec::new()),
            Some(Entry {
                shape: Shape::Hash(fields),
                ..
            }) => Ok(fields.values().cloned().collect()),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn hmget(&self, key: &str, fields: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>> {
        self.with_live_entry(key, |entry| match entry {
            None => Ok(vec![None; fields.len()]),
            Some(Entry {
                shape: Shape::Hash(map),
                ..
            }) => Ok(fields.iter().map(|f| map.get(f).cloned()).collect()),
            Some(_) => Err(wrong_type(key)),
        })
    }

    fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
        let mut guard = self.entries.write();
        if ttl_seconds == 0 {
            // EXPIRE with zero deletes the key outright
            guard.remove(key);
            return Ok(());
        }
        if let Some(entry) = guard.get_mut(key) {
            if entry.is_expired() {
                guard.remove(key);
            } else {
                entry.expires_at = deadline(ttl_seconds);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expired_flat(value: &[u8]) -> Entry {
        Entry {
            shape: Shape::Flat(value.to_vec()),
            expires_at: Some(Instant::now() - Duration::from_millis(1)),
        }
    }

    // === Flat keys ===

    #[test]
    fn test_set_get_roundtrip() {
        let store = MemoryStore::new();
        store.set("k", 0, b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn test_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", 0, b"old").unwrap();
        store.set("k", 0, b"new").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"new".to_vec()));
    }

    #[test]
    fn test_del_removes_any_shape() {
        let store = MemoryStore::new();
        store.set("flat", 0, b"v").unwrap();
        store.hset("bucket", "f", b"v").unwrap();
        store.del("flat").unwrap();
        store.del("bucket").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_flat_key_reads_as_absent() {
        let store = MemoryStore::new();
        store
            .entries
            .write()
            .insert("k".to_string(), expired_flat(b"v"));
        assert_eq!(store.get("k").unwrap(), None);
        // Lazy eviction removed it
        assert!(store.entries.read().is_empty());
    }

    // === Hash keys ===

    #[test]
    fn test_hset_hget_roundtrip() {
        let store = MemoryStore::new();
        store.hset("users", "123", b"alice").unwrap();
        assert_eq!(store.hget("users", "123").unwrap(), Some(b"alice".to_vec()));
        assert_eq!(store.hget("users", "456").unwrap(), None);
    }

    #[test]
    fn test_hvals_returns_all_values() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.hset("users", "2", b"b").unwrap();
        store.hset("users", "3", b"c").unwrap();
        let mut values = store.hvals("users").unwrap();
        values.sort();
        assert_eq!(values, vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn test_hvals_missing_bucket_is_empty() {
        let store = MemoryStore::new();
        assert!(store.hvals("nope").unwrap().is_empty());
    }

    #[test]
    fn test_hmget_is_positionally_aligned() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.hset("users", "3", b"c").unwrap();
        let fields: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();
        assert_eq!(
            store.hmget("users", &fields).unwrap(),
            vec![Some(b"a".to_vec()), None, Some(b"c".to_vec())]
        );
    }

    #[test]
    fn test_hmget_missing_bucket_is_all_none() {
        let store = MemoryStore::new();
        let fields: Vec<String> = vec!["a".to_string(), "b".to_string()];
        assert_eq!(store.hmget("nope", &fields).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_hdel_removes_field_and_empty_bucket() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.hset("users", "2", b"b").unwrap();
        store.hdel("users", "1").unwrap();
        assert_eq!(store.hget("users", "1").unwrap(), None);
        assert_eq!(store.hget("users", "2").unwrap(), Some(b"b".to_vec()));
        store.hdel("users", "2").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_hdel_missing_is_noop() {
        let store = MemoryStore::new();
        store.hdel("nope", "f").unwrap();
    }

    // === Shape mismatches ===

    #[test]
    fn test_get_on_hash_is_wrongtype() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        let err = store.get("users").unwrap_err();
        assert!(matches!(err, TransportError::Command(ref msg) if msg.contains("WRONGTYPE")));
    }

    #[test]
    fn test_hget_on_flat_is_wrongtype() {
        let store = MemoryStore::new();
        store.set("k", 0, b"v").unwrap();
        assert!(store.hget("k", "f").is_err());
        assert!(store.hvals("k").is_err());
        assert!(store.hset("k", "f", b"x").is_err());
    }

    // === Expiry ===

    #[test]
    fn test_expire_sets_deadline_on_bucket() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.expire("users", 3600).unwrap();
        let guard = store.entries.read();
        assert!(guard.get("users").unwrap().expires_at.is_some());
    }

    #[test]
    fn test_expire_zero_deletes_key() {
        let store = MemoryStore::new();
        store.set("k", 0, b"v").unwrap();
        store.expire("k", 0).unwrap();
        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn test_expire_missing_is_noop() {
        let store = MemoryStore::new();
        store.expire("nope", 60).unwrap();
    }

    #[test]
    fn test_expired_bucket_reads_as_absent_everywhere() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.entries.write().get_mut("users").unwrap().expires_at =
            Some(Instant::now() - Duration::from_millis(1));
        assert_eq!(store.hget("users", "1").unwrap(), None);
        assert!(store.hvals("users").unwrap().is_empty());
        let fields = vec!["1".to_string()];
        assert_eq!(store.hmget("users", &fields).unwrap(), vec![None]);
    }

    #[test]
    fn test_hset_on_expired_bucket_starts_fresh() {
        let store = MemoryStore::new();
        store.hset("users", "1", b"a").unwrap();
        store.entries.write().get_mut("users").unwrap().expires_at =
            Some(Instant::now() - Duration::from_millis(1));
        store.hset("users", "2", b"b").unwrap();
        assert_eq!(store.hget("users", "1").unwrap(), None);
        assert_eq!(store.hget("users", "2").unwrap(), Some(b"b".to_vec()));
    }

    #[test]
    fn test_set_with_ttl_is_live_before_deadline() {
        let store = MemoryStore::new();
        store.set("k", 3600, b"v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.len(), 1);
    }
}
