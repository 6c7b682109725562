//! Strategy-dispatching cache driver
//!
//! [`CacheDriver`] is a stateless facade over an injected [`StoreClient`].
//! Each public call resolves its storage operation from the strategy hint,
//! the shape of the key and the presence of a field list, then executes it
//! through the store, encoding and decoding payloads with the
//! [`PayloadCodec`].
//!
//! ## Result shape
//!
//! Reads return a `Vec<T>`: the empty vector is the cache miss, single-value
//! operations yield at most one element, batched operations yield one
//! element per *present* field. The batched read is **not** positionally
//! aligned to the requested field list; absent fields shrink the output
//! instead of leaving gaps. Callers that need positions use the store
//! client's `hmget` directly.
//!
//! ## TTL model
//!
//! A bucket shares one expiry across all of its fields. A field write with a
//! positive TTL refreshes the expiry of the **entire bucket**, so sibling
//! fields' lifetime is extended as a side effect. A TTL of zero never
//! touches expiry.

use bucketcache_core::error::Result;
use bucketcache_core::key::{self, WILDCARD_FIELD};
use bucketcache_core::strategy::{self, DeleteOp, ReadOp, Strategy, WriteOp};
use bucketcache_core::{CacheParams, DelimiterConfig};
use bucketcache_storage::StoreClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::codec::PayloadCodec;

/// Maximum number of fields per batched multi-field read
pub const MAX_HMGET_FIELDS: usize = 50;

/// Strategy-dispatching cache driver over a store client
///
/// Stateless per call; holds only the injected store, codec and delimiter
/// configuration. Cloning the store (or wrapping it in `Arc`) allows many
/// drivers over one connection.
///
/// # Examples
///
/// ```
/// use bucketcache_core::{CacheParams, DelimiterConfig};
/// use bucketcache_driver::CacheDriver;
/// use bucketcache_storage::MemoryStore;
///
/// let driver = CacheDriver::new(MemoryStore::new(), DelimiterConfig::default());
/// let params = CacheParams::new().with_strategy("hash");
///
/// driver.set("users#123", &"Alice", 3600, &params)?;
/// let cached: Vec<String> = driver.get("users#123", &params)?;
/// assert_eq!(cached, vec!["Alice".to_string()]);
/// # Ok::<(), bucketcache_core::error::Error>(())
/// ```
#[derive(Debug)]
pub struct CacheDriver<S> {
    store: S,
    codec: PayloadCodec,
    config: DelimiterConfig,
}

impl<S: StoreClient> CacheDriver<S> {
    /// Driver with the default codec (MessagePack + zstd)
    pub fn new(store: S, config: DelimiterConfig) -> Self {
        Self::with_codec(store, config, PayloadCodec::default())
    }

    /// Driver with an explicit payload codec
    pub fn with_codec(store: S, config: DelimiterConfig, codec: PayloadCodec) -> Self {
        Self {
            store,
            codec,
            config,
        }
    }

    /// The injected store client
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The injected delimiter configuration
    pub fn config(&self) -> &DelimiterConfig {
        &self.config
    }

    /// Read from the cache
    ///
    /// The operation is resolved from `params` and the key shape; see
    /// [`bucketcache_core::strategy::resolve_read`] for the exact order.
    /// `force_strategy` replaces the explicit strategy unconditionally.
    /// A miss is `Ok(vec![])`.
    pub fn get<T: DeserializeOwned>(&self, key: &str, params: &CacheParams) -> Result<Vec<T>> {
        let op = self.resolve_read(key, params)?;
        let result = match op {
            ReadOp::Value => self.read_value(key)?,
            ReadOp::HashField => self.read_hash_field(key)?,
            ReadOp::HashFields => self.read_hash_fields(key, params.fields())?,
            ReadOp::HashAll => self.read_hash_all(key)?,
        };
        debug!(target: "cache", op = op.name(), key, hits = result.len(), "cache get");
        Ok(result)
    }

    /// Write to the cache, returning `&self` for chaining
    ///
    /// The hash shape is the default: without a strategy the key is split
    /// and written as a bucket field. `ttl_seconds` of zero means no expiry
    /// and never triggers a bucket-wide refresh.
    pub fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_seconds: u64,
        params: &CacheParams,
    ) -> Result<&Self> {
        let op = self.resolve_write(params)?;
        let payload = self.codec.serialize(value)?;
        match op {
            WriteOp::SetEx => self.write_setex(key, ttl_seconds, &payload)?,
            WriteOp::HSet => self.write_hset(key, ttl_seconds, &payload)?,
        }
        debug!(target: "cache", op = op.name(), key, ttl_seconds, "cache set");
        Ok(self)
    }

    /// Delete from the cache, returning `&self` for chaining
    ///
    /// The hash shape is the default. A compound key whose field is `*`
    /// deletes the entire bucket.
    pub fn delete(&self, key: &str, params: &CacheParams) -> Result<&Self> {
        let op = self.resolve_delete(params)?;
        match op {
            DeleteOp::Del => self.delete_del(key)?,
            DeleteOp::HDel => self.delete_hdel(key)?,
        }
        debug!(target: "cache", op = op.name(), key, "cache delete");
        Ok(self)
    }

    /// Delimiter a caller should append when building a compound key for
    /// the strategy it intends to use
    ///
    /// Hash-shaped strategies select the hash delimiter; everything else,
    /// including no strategy at all or an unknown name, selects the string
    /// delimiter.
    pub fn id_postfix_by_strategy(&self, params: &CacheParams) -> &str {
        let hash_shaped = params
            .strategy()
            .and_then(|name| Strategy::parse(name).ok())
            .is_some_and(|s| s.is_hash_shaped());
        if hash_shaped {
            self.config.hash_delimiter()
        } else {
            self.config.string_delimiter()
        }
    }

    // ========== Strategy resolution ==========

    fn key_has_delimiter(&self, key: &str) -> bool {
        let delimiter = self.config.hash_delimiter();
        !delimiter.is_empty() && key.contains(delimiter)
    }

    fn resolve_read(&self, key: &str, params: &CacheParams) -> Result<ReadOp> {
        // The forced strategy replaces the explicit one before resolution,
        // so an unparseable explicit strategy is rescued by a valid force.
        let name = params.force_strategy().or(params.strategy());
        let parsed = name.map(Strategy::parse).transpose()?;
        let has_fields = !params.fields().is_empty();
        Ok(strategy::resolve_read(
            parsed,
            has_fields,
            self.key_has_delimiter(key),
        )?)
    }

    fn resolve_write(&self, params: &CacheParams) -> Result<WriteOp> {
        let parsed = params.strategy().map(Strategy::parse).transpose()?;
        Ok(strategy::resolve_write(parsed)?)
    }

    fn resolve_delete(&self, params: &CacheParams) -> Result<DeleteOp> {
        let parsed = params.strategy().map(Strategy::parse).transpose()?;
        Ok(strategy::resolve_delete(parsed)?)
    }

    // ========== Read operations ==========

    fn read_value<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let data = self.store.get(key)?;
        let mut out = Vec::new();
        if let Some(value) = self.codec.unserialize(data.as_deref())? {
            out.push(value);
        }
        Ok(out)
    }

    fn read_hash_field<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let (bucket, field) = key::split_with_legacy(key, self.config.hash_delimiter());
        let data = self.store.hget(bucket, field)?;
        let mut out = Vec::new();
        if let Some(value) = self.codec.unserialize(data.as_deref())? {
            out.push(value);
        }
        Ok(out)
    }

    fn read_hash_fields<T: DeserializeOwned>(&self, key: &str, fields: &[String]) -> Result<Vec<T>> {
        let mut out = Vec::new();
        for chunk in fields.chunks(MAX_HMGET_FIELDS) {
            // One round trip per chunk; a failing chunk aborts the whole
            // call and earlier chunks are discarded.
            let items = self.store.hmget(key, chunk)?;
            for item in items.into_iter().flatten() {
                if let Some(value) = self.codec.unserialize(Some(&item))? {
                    out.push(value);
                }
            }
        }
        Ok(out)
    }

    fn read_hash_all<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        let items = self.store.hvals(key)?;
        let mut out = Vec::new();
        for item in items {
            if let Some(value) = self.codec.unserialize(Some(&item))? {
                out.push(value);
            }
        }
        Ok(out)
    }

    // ========== Write operations ==========

    fn write_setex(&self, key: &str, ttl_seconds: u64, payload: &[u8]) -> Result<()> {
        self.store.set(key, ttl_seconds, payload)?;
        Ok(())
    }

    fn write_hset(&self, key: &str, ttl_seconds: u64, payload: &[u8]) -> Result<()> {
        match key::split(key, self.config.hash_delimiter()) {
            Some((bucket, field)) => {
                self.store.hset(bucket, field, payload)?;
                // Bucket-wide refresh: all sibling fields share one expiry
                if ttl_seconds > 0 {
                    self.store.expire(bucket, ttl_seconds)?;
                }
                Ok(())
            }
            // No field segment: degrade to the flat write
            None => {
                debug!(target: "cache", key, "no delimiter in hash write, using setex");
                self.write_setex(key, ttl_seconds, payload)
            }
        }
    }

    // ========== Delete operations ==========

    fn delete_del(&self, key: &str) -> Result<()> {
        self.store.del(key)?;
        Ok(())
    }

    fn delete_hdel(&self, key: &str) -> Result<()> {
        match key::split(key, self.config.hash_delimiter()) {
            Some((bucket, field)) if field == WILDCARD_FIELD => {
                debug!(target: "cache", bucket, "wildcard delete of whole bucket");
                self.delete_del(bucket)
            }
            Some((bucket, field)) => {
                self.store.hdel(bucket, field)?;
                Ok(())
            }
            None => {
                debug!(target: "cache", key, "no delimiter in hash delete, using del");
                self.delete_del(key)
            }
        }
    }
}
