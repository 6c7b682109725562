//! Core types for the bucketcache adapter
//!
//! This crate defines the foundational types used throughout the system:
//! - Error: the error taxonomy (configuration, decode, transport)
//! - DelimiterConfig: injected bucket/field and flat-key delimiters
//! - Key codec: compound-key split/compose with the legacy fallback
//! - Strategy: closed strategy set and operation resolution
//! - CacheParams: per-call strategy hints
//!
//! No I/O happens here; everything is pure and synchronous.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod key;
pub mod params;
pub mod strategy;

// Re-export commonly used types
pub use config::{DelimiterConfig, DEFAULT_HASH_DELIMITER, DEFAULT_STRING_DELIMITER};
pub use error::{ConfigurationError, DecodeError, Error, Result, TransportError};
pub use key::{compose, split, split_with_legacy, WILDCARD_FIELD};
pub use params::CacheParams;
pub use strategy::{
    resolve_delete, resolve_read, resolve_write, DeleteOp, ReadOp, Strategy, WriteOp,
};
