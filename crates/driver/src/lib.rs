//! Cache driver layer for bucketcache
//!
//! This crate implements the engine on top of the store seam:
//! - PayloadCodec: MessagePack serialization + zstd compression behind the
//!   Compressor seam
//! - CacheDriver: strategy resolution, compound-key handling, chunked
//!   batched reads, and the flat/hash operation set
//!
//! The driver is stateless per call and owns no connections; it talks to
//! whatever [`bucketcache_storage::StoreClient`] it is constructed with.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod driver;

pub use codec::{Compressor, PayloadCodec, ZstdCompressor, DEFAULT_COMPRESSION_LEVEL};
pub use driver::{CacheDriver, MAX_HMGET_FIELDS};
