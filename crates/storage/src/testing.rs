//! Store test doubles
//!
//! Utilities for asserting how the driver talks to its store:
//! - [`RecordingStore`] wraps any client and counts every command, so tests
//!   can assert call counts (e.g. "a configuration error makes zero store
//!   calls", "120 fields issue exactly 3 `hmget` round trips").
//! - [`FailingStore`] rejects every command with a transport error, for
//!   passthrough and abort-on-chunk-failure tests.

use crate::client::{StoreClient, StoreResult};
use bucketcache_core::error::TransportError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Per-command call counters
///
/// Shared between a [`RecordingStore`] and the test that owns it.
#[derive(Debug, Default)]
pub struct OpCounters {
    /// `get` calls
    pub get: AtomicUsize,
    /// `set` calls
    pub set: AtomicUsize,
    /// `del` calls
    pub del: AtomicUsize,
    /// `hget` calls
    pub hget: AtomicUsize,
    /// `hset` calls
    pub hset: AtomicUsize,
    /// `hdel` calls
    pub hdel: AtomicUsize,
    /// `hvals` calls
    pub hvals: AtomicUsize,
    /// `hmget` calls
    pub hmget: AtomicUsize,
    /// `expire` calls
    pub expire: AtomicUsize,
}

impl OpCounters {
    /// Total store calls of any kind
    pub fn total(&self) -> usize {
        [
            &self.get,
            &self.set,
            &self.del,
            &self.hget,
            &self.hset,
            &self.hdel,
            &self.hvals,
            &self.hmget,
            &self.expire,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

/// Call-counting wrapper around any store client
///
/// # Examples
///
/// ```
/// use bucketcache_storage::{MemoryStore, StoreClient};
/// use bucketcache_storage::testing::RecordingStore;
/// use std::sync::atomic::Ordering;
///
/// let store = RecordingStore::new(MemoryStore::new());
/// let counters = store.counters();
/// store.set("k", 0, b"v")?;
/// assert_eq!(counters.set.load(Ordering::SeqCst), 1);
/// assert_eq!(counters.total(), 1);
/// # Ok::<(), bucketcache_core::error::TransportError>(())
/// ```
#[derive(Debug)]
pub struct RecordingStore<S> {
    inner: S,
    counters: Arc<OpCounters>,
}

impl<S> RecordingStore<S> {
    /// Wrap a client
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            counters: Arc::new(OpCounters::default()),
        }
    }

    /// Handle to the shared counters
    pub fn counters(&self) -> Arc<OpCounters> {
        Arc::clone(&self.counters)
    }

    /// The wrapped client
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: StoreClient> StoreClient for RecordingStore<S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.counters.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key)
    }

    fn set(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> StoreResult<()> {
        self.counters.set.fetch_add(1, Ordering::SeqCst);
        self.inner.set(key, ttl_seconds, value)
    }

    fn del(&self, key: &str) -> StoreResult<()> {
        self.counters.del.fetch_add(1, Ordering::SeqCst);
        self.inner.del(key)
    }

    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<Vec<u8>>> {
        self.counters.hget.fetch_add(1, Ordering::SeqCst);
        self.inner.hget(key, field)
    }

    fn hset(&self, key: &str, field: &str, value: &[u8]) -> StoreResult<()> {
        self.counters.hset.fetch_add(1, Ordering::SeqCst);
        self.inner.hset(key, field, value)
    }

    fn hdel(&self, key: &str, field: &str) -> StoreResult<()> {
        self.counters.hdel.fetch_add(1, Ordering::SeqCst);
        self.inner.hdel(key, field)
    }

    fn hvals(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
        self.counters.hvals.fetch_add(1, Ordering::SeqCst);
        self.inner.hvals(key)
    }

    fn hmget(&self, key: &str, fields: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>> {
        self.counters.hmget.fetch_add(1, Ordering::SeqCst);
        self.inner.hmget(key, fields)
    }

    fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
        self.counters.expire.fetch_add(1, Ordering::SeqCst);
        self.inner.expire(key, ttl_seconds)
    }
}

/// A store whose every command fails with a transport error
///
/// Optionally succeeds for the first `succeed_first` commands, which lets
/// tests fail a specific chunk of a batched read.
#[derive(Debug, Default)]
pub struct FailingStore {
    succeed_first: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    /// Fail every command
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed for the first `n` commands, then fail
    pub fn failing_after(n: usize) -> Self {
        Self {
            succeed_first: n,
            calls: AtomicUsize::new(0),
        }
    }

    /// Commands seen so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) -> StoreResult<()> {
        let seen = self.calls.fetch_add(1, Ordering::SeqCst);
        if seen < self.succeed_first {
            Ok(())
        } else {
            Err(TransportError::Command("injected failure".to_string()))
        }
    }
}

impl StoreClient for FailingStore {
    fn get(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.tick().map(|_| None)
    }

    fn set(&self, _key: &str, _ttl_seconds: u64, _value: &[u8]) -> StoreResult<()> {
        self.tick()
    }

    fn del(&self, _key: &str) -> StoreResult<()> {
        self.tick()
    }

    fn hget(&self, _key: &str, _field: &str) -> StoreResult<Option<Vec<u8>>> {
        self.tick().map(|_| None)
    }

    fn hset(&self, _key: &str, _field: &str, _value: &[u8]) -> StoreResult<()> {
        self.tick()
    }

    fn hdel(&self, _key: &str, _field: &str) -> StoreResult<()> {
        self.tick()
    }

    fn hvals(&self, _key: &str) -> StoreResult<Vec<Vec<u8>>> {
        self.tick().map(|_| Vec::new())
    }

    fn hmget(&self, _key: &str, fields: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>> {
        self.tick().map(|_| vec![None; fields.len()])
    }

    fn expire(&self, _key: &str, _ttl_seconds: u64) -> StoreResult<()> {
        self.tick()
    }
}
