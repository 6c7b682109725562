//! Compound-key codec
//!
//! A compound key has the form `bucket<delimiter>field`. The delimiter
//! separates only the trailing field segment: everything before its last
//! occurrence is the bucket identifier, so buckets may themselves contain
//! the delimiter.
//!
//! Two split flavors exist because the operations that consume them fall
//! back differently when the delimiter is absent:
//! - [`split`] reports absence (`None`); hash writes and deletes then fall
//!   back to the flat-key operation.
//! - [`split_with_legacy`] retries on the last `:` (legacy key layout) and,
//!   failing that, yields an empty bucket with the whole key as field. The
//!   field-level read path always wants *some* bucket/field pair.

/// Field sentinel addressing the whole bucket (delete only)
pub const WILDCARD_FIELD: &str = "*";

/// Legacy bucket/field separator, tried when the configured delimiter is absent
const LEGACY_DELIMITER: &str = ":";

/// Split a compound key at the last occurrence of `delimiter`
///
/// Returns `None` when the delimiter does not occur. An empty delimiter
/// never matches.
///
/// # Examples
///
/// ```
/// use bucketcache_core::key::split;
///
/// assert_eq!(split("users#123", "#"), Some(("users", "123")));
/// assert_eq!(split("a#b#c", "#"), Some(("a#b", "c")));
/// assert_eq!(split("users:123", "#"), None);
/// ```
pub fn split<'a>(key: &'a str, delimiter: &str) -> Option<(&'a str, &'a str)> {
    if delimiter.is_empty() {
        return None;
    }
    key.rfind(delimiter)
        .map(|pos| (&key[..pos], &key[pos + delimiter.len()..]))
}

/// Split a compound key, falling back to the legacy `:` layout
///
/// When neither the configured delimiter nor `:` occurs, the bucket is
/// empty and the whole key is the field.
///
/// # Examples
///
/// ```
/// use bucketcache_core::key::split_with_legacy;
///
/// assert_eq!(split_with_legacy("users#123", "#"), ("users", "123"));
/// assert_eq!(split_with_legacy("users:123", "#"), ("users", "123"));
/// assert_eq!(split_with_legacy("users", "#"), ("", "users"));
/// ```
pub fn split_with_legacy<'a>(key: &'a str, delimiter: &str) -> (&'a str, &'a str) {
    split(key, delimiter)
        .or_else(|| split(key, LEGACY_DELIMITER))
        .unwrap_or(("", key))
}

/// Compose a compound key from a bucket and a field
pub fn compose(bucket: &str, field: &str, delimiter: &str) -> String {
    format!("{bucket}{delimiter}{field}")
}
