//! Strategy names and operation resolution
//!
//! A strategy is a named policy selecting which storage primitive backs a
//! `get`/`set`/`delete` call. Callers name strategies as configuration
//! strings; [`Strategy::parse`] maps them into a closed enum, and the
//! `resolve_*` functions map a strategy (plus the shape of the call) onto
//! the concrete operation through an exhaustive match. There is no
//! stringly-typed dispatch past this module.
//!
//! Three name groups are accepted:
//! - storage shapes: `string`, `hash`, `table` (`table` is an alias of
//!   `hash`),
//! - legacy read operations: `getValue`, `getHValue`, `getHValues`,
//!   `getAllHash`,
//! - legacy write/delete operations: `setex`, `hset`, `del`, `hdel`.
//!
//! Legacy names are honored for backward compatibility with configuration
//! that named storage operations directly.

use crate::error::ConfigurationError;
use std::str::FromStr;

/// Closed set of strategy names accepted from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Flat string storage shape
    String,
    /// Field-bucketed hash storage shape
    Hash,
    /// Alias of [`Strategy::Hash`]
    Table,
    /// Legacy name: single flat read
    GetValue,
    /// Legacy name: single field read
    GetHValue,
    /// Legacy name: batched multi-field read
    GetHValues,
    /// Legacy name: whole-bucket read
    GetAllHash,
    /// Legacy name: flat write with expiry
    SetEx,
    /// Legacy name: field write
    HSet,
    /// Legacy name: flat delete
    Del,
    /// Legacy name: field delete
    HDel,
}

impl Strategy {
    /// Parse a configuration string into a strategy
    ///
    /// This is the single source of [`ConfigurationError::UnknownStrategy`].
    pub fn parse(name: &str) -> Result<Self, ConfigurationError> {
        match name {
            "string" => Ok(Self::String),
            "hash" => Ok(Self::Hash),
            "table" => Ok(Self::Table),
            "getValue" => Ok(Self::GetValue),
            "getHValue" => Ok(Self::GetHValue),
            "getHValues" => Ok(Self::GetHValues),
            "getAllHash" => Ok(Self::GetAllHash),
            "setex" => Ok(Self::SetEx),
            "hset" => Ok(Self::HSet),
            "del" => Ok(Self::Del),
            "hdel" => Ok(Self::HDel),
            _ => Err(ConfigurationError::UnknownStrategy {
                name: name.to_string(),
            }),
        }
    }

    /// Canonical configuration name of this strategy
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Hash => "hash",
            Self::Table => "table",
            Self::GetValue => "getValue",
            Self::GetHValue => "getHValue",
            Self::GetHValues => "getHValues",
            Self::GetAllHash => "getAllHash",
            Self::SetEx => "setex",
            Self::HSet => "hset",
            Self::Del => "del",
            Self::HDel => "hdel",
        }
    }

    /// Whether this strategy addresses the hash storage shape
    ///
    /// Backs the key-postfix helper: hash-shaped strategies build compound
    /// keys with the hash delimiter, everything else with the string
    /// delimiter.
    pub fn is_hash_shaped(&self) -> bool {
        matches!(
            self,
            Self::Hash
                | Self::Table
                | Self::GetAllHash
                | Self::GetHValue
                | Self::GetHValues
                | Self::HSet
                | Self::HDel
        )
    }
}

impl FromStr for Strategy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolved read operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOp {
    /// Single flat read (`get`)
    Value,
    /// Single field read on a split key (`hget`)
    HashField,
    /// Chunked multi-field read (`hmget`)
    HashFields,
    /// Whole-bucket read (`hvals`)
    HashAll,
}

impl ReadOp {
    /// Operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Value => "getValue",
            Self::HashField => "getHValue",
            Self::HashFields => "getHValues",
            Self::HashAll => "getAllHash",
        }
    }
}

/// Resolved write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOp {
    /// Flat write with expiry (`setex`)
    SetEx,
    /// Field write, bucket-wide expiry refresh (`hset`)
    HSet,
}

impl WriteOp {
    /// Operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetEx => "setex",
            Self::HSet => "hset",
        }
    }
}

/// Resolved delete operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOp {
    /// Flat delete (`del`)
    Del,
    /// Field or whole-bucket delete (`hdel`)
    HDel,
}

impl DeleteOp {
    /// Operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Del => "del",
            Self::HDel => "hdel",
        }
    }
}

/// Resolve the read operation for a `get` call
///
/// Inputs beyond the strategy are the two shape signals: whether the caller
/// supplied a non-empty field list and whether the key contains the hash
/// delimiter.
///
/// Resolution order:
/// 1. `string` reads the flat key.
/// 2. `hash`/`table` pick the most specific hash read: fields beat key
///    shape, key shape beats whole-bucket.
/// 3. No strategy, or a legacy read name: `getAllHash` is honored as given;
///    otherwise a non-empty field list promotes to `getHValues` unless that
///    is already the strategy; otherwise a compound key promotes to
///    `getHValue` unless that is already the strategy; otherwise the legacy
///    name (default `getValue`) stands.
///
/// Write/delete names in read position have no read handler and fail before
/// any store interaction.
pub fn resolve_read(
    strategy: Option<Strategy>,
    has_fields: bool,
    key_has_delimiter: bool,
) -> Result<ReadOp, ConfigurationError> {
    match strategy {
        Some(Strategy::String) => Ok(ReadOp::Value),
        Some(Strategy::Hash) | Some(Strategy::Table) => {
            if has_fields {
                Ok(ReadOp::HashFields)
            } else if key_has_delimiter {
                Ok(ReadOp::HashField)
            } else {
                Ok(ReadOp::HashAll)
            }
        }
        Some(Strategy::GetAllHash) => Ok(ReadOp::HashAll),
        None | Some(Strategy::GetValue | Strategy::GetHValue | Strategy::GetHValues) => {
            if has_fields && strategy != Some(Strategy::GetHValues) {
                Ok(ReadOp::HashFields)
            } else if key_has_delimiter && strategy != Some(Strategy::GetHValue) {
                Ok(ReadOp::HashField)
            } else {
                Ok(match strategy {
                    Some(Strategy::GetHValues) => ReadOp::HashFields,
                    Some(Strategy::GetHValue) => ReadOp::HashField,
                    _ => ReadOp::Value,
                })
            }
        }
        Some(other) => Err(ConfigurationError::UnsupportedOperation {
            operation: other.name(),
            call: "get",
        }),
    }
}

/// Resolve the write operation for a `set` call
///
/// The hash shape is the default: absent strategy writes a field.
pub fn resolve_write(strategy: Option<Strategy>) -> Result<WriteOp, ConfigurationError> {
    match strategy {
        Some(Strategy::String) | Some(Strategy::SetEx) => Ok(WriteOp::SetEx),
        None | Some(Strategy::Hash | Strategy::Table | Strategy::HSet) => Ok(WriteOp::HSet),
        Some(other) => Err(ConfigurationError::UnsupportedOperation {
            operation: other.name(),
            call: "set",
        }),
    }
}

/// Resolve the delete operation for a `delete` call
///
/// The hash shape is the default: absent strategy deletes a field.
pub fn resolve_delete(strategy: Option<Strategy>) -> Result<DeleteOp, ConfigurationError> {
    match strategy {
        Some(Strategy::String) | Some(Strategy::Del) => Ok(DeleteOp::Del),
        None | Some(Strategy::Hash | Strategy::Table | Strategy::HDel) => Ok(DeleteOp::HDel),
        Some(other) => Err(ConfigurationError::UnsupportedOperation {
            operation: other.name(),
            call: "delete",
        }),
    }
}
