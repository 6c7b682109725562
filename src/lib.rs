//! bucketcache - strategy-dispatching cache adapter
//!
//! bucketcache stores and retrieves serialized domain values in a key-value
//! store supporting two storage shapes: flat string keys and field-bucketed
//! hash tables. The storage operation is inferred from an explicit strategy
//! hint, the shape of the key and an optional field list.
//!
//! # Quick Start
//!
//! ```
//! use bucketcache::{CacheDriver, CacheParams, DelimiterConfig, MemoryStore};
//!
//! let driver = CacheDriver::new(MemoryStore::new(), DelimiterConfig::default());
//! let params = CacheParams::new().with_strategy("hash");
//!
//! // "users#123" splits into bucket "users", field "123"
//! driver.set("users#123", &"Alice", 3600, &params)?;
//! let cached: Vec<String> = driver.get("users#123", &params)?;
//! assert_eq!(cached, vec!["Alice".to_string()]);
//! # Ok::<(), bucketcache::Error>(())
//! ```
//!
//! # Architecture
//!
//! The adapter is a stateless, synchronous per-call layer: strategy
//! resolution picks the operation, the key codec splits compound keys, the
//! payload codec encodes values (MessagePack + zstd), and the store seam
//! executes byte-level commands. Connection lifecycle, retries and timeouts
//! belong to the [`StoreClient`] implementation.

// Re-export the public API from the layer crates
pub use bucketcache_core::key;
pub use bucketcache_core::{
    CacheParams, ConfigurationError, DecodeError, DelimiterConfig, Error, Result, Strategy,
    TransportError, WILDCARD_FIELD,
};
pub use bucketcache_driver::{
    CacheDriver, Compressor, PayloadCodec, ZstdCompressor, MAX_HMGET_FIELDS,
};
pub use bucketcache_storage::{MemoryStore, StoreClient, StoreResult};

/// Store test doubles, re-exported for downstream test suites
pub mod testing {
    pub use bucketcache_storage::testing::{FailingStore, OpCounters, RecordingStore};
}
