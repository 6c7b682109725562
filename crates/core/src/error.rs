//! Error types for the cache adapter
//!
//! This module defines the error taxonomy used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! The taxonomy has three classes:
//! - [`ConfigurationError`]: the caller supplied a strategy the adapter does
//!   not know, or one that has no handler for the attempted call. Raised
//!   before the store is touched.
//! - [`DecodeError`]: a payload was present but could not be encoded or
//!   decoded.
//! - [`TransportError`]: the backing store was unreachable or rejected a
//!   command. Produced by store clients and passed through unchanged.
//!
//! A cache miss is not an error; read operations report it as an empty
//! result container.

use thiserror::Error;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the cache adapter
///
/// Wraps the three error classes transparently so callers can match either
/// on the class or on the specific failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Unrecognized or unusable strategy configuration
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Payload codec failure
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Store client failure
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Strategy configuration errors
///
/// Both variants fire during strategy resolution, before any store call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The strategy name did not parse into any known strategy
    #[error("Unknown strategy: {name}")]
    UnknownStrategy {
        /// The name as supplied by the caller
        name: String,
    },

    /// A known operation name with no handler for this kind of call
    /// (e.g. a write operation supplied to `get`)
    #[error("No {call} handler for operation '{operation}'")]
    UnsupportedOperation {
        /// The resolved operation name
        operation: &'static str,
        /// The public call that attempted to use it (`get`, `set`, `delete`)
        call: &'static str,
    },
}

/// Payload codec errors
///
/// An absent or empty payload is not an error; it decodes to "no value".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Value could not be serialized or compressed for storage
    #[error("Encode error: {0}")]
    Encode(String),

    /// Stored payload could not be decompressed
    #[error("Decompress error: {0}")]
    Decompress(String),

    /// Decompressed payload could not be deserialized
    #[error("Deserialize error: {0}")]
    Deserialize(String),
}

/// Store transport errors
///
/// The adapter never retries or reinterprets these; they propagate to the
/// caller exactly as the store client produced them.
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O failure talking to the store
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store rejected the command
    #[error("Store command rejected: {0}")]
    Command(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unknown_strategy_display() {
        let err = ConfigurationError::UnknownStrategy {
            name: "bogus".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown strategy: bogus");
    }

    #[test]
    fn test_unsupported_operation_display() {
        let err = ConfigurationError::UnsupportedOperation {
            operation: "setex",
            call: "get",
        };
        assert_eq!(err.to_string(), "No get handler for operation 'setex'");
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::Decompress("truncated frame".to_string());
        assert!(err.to_string().contains("Decompress error"));
        assert!(err.to_string().contains("truncated frame"));
    }

    #[test]
    fn test_transport_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
        let err: TransportError = io_err.into();
        assert!(matches!(err, TransportError::Io(_)));
        assert!(err.to_string().contains("Store I/O error"));
    }

    #[test]
    fn test_error_wraps_classes_transparently() {
        let err: Error = ConfigurationError::UnknownStrategy {
            name: "nope".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Unknown strategy: nope");
        assert!(matches!(err, Error::Configuration(_)));

        let err: Error = DecodeError::Deserialize("bad marker".to_string()).into();
        assert!(matches!(err, Error::Decode(_)));

        let err: Error = TransportError::Command("WRONGTYPE".to_string()).into();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<u32> {
            Ok(7)
        }
        assert_eq!(returns_result().unwrap(), 7);
    }
}
