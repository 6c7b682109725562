//! Delimiter configuration
//!
//! Two delimiters govern key layout:
//! - the hash delimiter separates a bucket from its trailing field segment
//!   in compound keys,
//! - the string delimiter is what callers append when building flat keys.
//!
//! The configuration is injected at driver construction and immutable for
//! the driver's lifetime.

/// Default bucket/field separator for compound keys
pub const DEFAULT_HASH_DELIMITER: &str = "#";

/// Default separator for flat string keys
pub const DEFAULT_STRING_DELIMITER: &str = ":";

/// Immutable delimiter pair for one driver instance
///
/// # Examples
///
/// ```
/// use bucketcache_core::config::DelimiterConfig;
///
/// let config = DelimiterConfig::default();
/// assert_eq!(config.hash_delimiter(), "#");
/// assert_eq!(config.string_delimiter(), ":");
///
/// let custom = DelimiterConfig::new("::", "-");
/// assert_eq!(custom.hash_delimiter(), "::");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimiterConfig {
    hash_delimiter: String,
    string_delimiter: String,
}

impl Default for DelimiterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DELIMITER, DEFAULT_STRING_DELIMITER)
    }
}

impl DelimiterConfig {
    /// Create a configuration with explicit delimiters
    pub fn new(hash_delimiter: impl Into<String>, string_delimiter: impl Into<String>) -> Self {
        Self {
            hash_delimiter: hash_delimiter.into(),
            string_delimiter: string_delimiter.into(),
        }
    }

    /// Bucket/field separator for compound keys
    pub fn hash_delimiter(&self) -> &str {
        &self.hash_delimiter
    }

    /// Separator for flat string keys
    pub fn string_delimiter(&self) -> &str {
        &self.string_delimiter
    }
}
