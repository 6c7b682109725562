//! Store client seam
//!
//! [`StoreClient`] mirrors the command set of the backing key-value store:
//! flat-key commands (`get`/`set`/`del`), hash commands
//! (`hget`/`hset`/`hdel`/`hvals`/`hmget`) and `expire`. Everything is
//! synchronous and byte-valued; payload encoding is a concern of the layer
//! above.
//!
//! Connection and pool lifecycle belong to the implementation. The adapter
//! never opens, pools or closes anything, and it imposes no timeout; callers
//! needing bounded latency enforce it in the client.

use bucketcache_core::error::TransportError;
use std::sync::Arc;

/// Result type for store commands
pub type StoreResult<T> = std::result::Result<T, TransportError>;

/// Synchronous, byte-valued key-value store commands
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; one client instance may serve
/// several drivers concurrently.
///
/// # Failure Semantics
///
/// Every error is a [`TransportError`] and is propagated to the caller
/// unchanged. Absence is not an error: `get`/`hget` return `None`,
/// `hmget` marks absent fields as `None`, `hvals` returns an empty list.
pub trait StoreClient: Send + Sync {
    /// Read a flat key
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write a flat key with an expiry; `ttl_seconds == 0` means no expiry
    fn set(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> StoreResult<()>;

    /// Delete a key of any shape
    fn del(&self, key: &str) -> StoreResult<()>;

    /// Read one field of a bucket
    fn hget(&self, key: &str, field: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Write one field of a bucket; the bucket's expiry is untouched
    fn hset(&self, key: &str, field: &str, value: &[u8]) -> StoreResult<()>;

    /// Delete one field of a bucket
    fn hdel(&self, key: &str, field: &str) -> StoreResult<()>;

    /// Read all values of a bucket, order unspecified
    fn hvals(&self, key: &str) -> StoreResult<Vec<Vec<u8>>>;

    /// Read several fields of a bucket in one round trip
    ///
    /// The result is positionally aligned to `fields`: absent fields are
    /// `None` at their requested index.
    fn hmget(&self, key: &str, fields: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>>;

    /// Set or refresh the expiry of a whole key (bucket-wide for hashes)
    fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()>;
}

macro_rules! delegate_store_client {
    ($wrapper:ty) => {
        impl<S: StoreClient + ?Sized> StoreClient for $wrapper {
            fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
                (**self).get(key)
            }
            fn set(&self, key: &str, ttl_seconds: u64, value: &[u8]) -> StoreResult<()> {
                (**self).set(key, ttl_seconds, value)
            }
            fn del(&self, key: &str) -> StoreResult<()> {
                (**self).del(key)
            }
            fn hget(&self, key: &str, field: &str) -> StoreResult<Option<Vec<u8>>> {
                (**self).hget(key, field)
            }
            fn hset(&self, key: &str, field: &str, value: &[u8]) -> StoreResult<()> {
                (**self).hset(key, field, value)
            }
            fn hdel(&self, key: &str, field: &str) -> StoreResult<()> {
                (**self).hdel(key, field)
            }
            fn hvals(&self, key: &str) -> StoreResult<Vec<Vec<u8>>> {
                (**self).hvals(key)
            }
            fn hmget(&self, key: &str, fields: &[String]) -> StoreResult<Vec<Option<Vec<u8>>>> {
                (**self).hmget(key, fields)
            }
            fn expire(&self, key: &str, ttl_seconds: u64) -> StoreResult<()> {
                (**self).expire(key, ttl_seconds)
            }
        }
    };
}

delegate_store_client!(&S);
delegate_store_client!(Arc<S>);
delegate_store_client!(Box<S>);
