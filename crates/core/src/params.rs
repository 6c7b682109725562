//! Per-call cache parameters
//!
//! Strategy hints travel as configuration strings and are parsed into the
//! closed [`Strategy`](crate::strategy::Strategy) enum at call time, which
//! keeps configuration-origin typos observable as `ConfigurationError`
//! rather than silent fallbacks.

/// Parameters controlling strategy resolution for one call
///
/// - `strategy`: explicit strategy name.
/// - `fields`: field list, meaningful only for hash-shaped reads.
/// - `force_strategy`: overrides the resolved strategy unconditionally;
///   consulted by `get` only.
///
/// # Examples
///
/// ```
/// use bucketcache_core::params::CacheParams;
///
/// let params = CacheParams::new()
///     .with_strategy("hash")
///     .with_fields(["17", "42"]);
/// assert_eq!(params.strategy(), Some("hash"));
/// assert_eq!(params.fields().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheParams {
    strategy: Option<String>,
    fields: Vec<String>,
    force_strategy: Option<String>,
}

impl CacheParams {
    /// Empty parameters: full strategy inference from key shape
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy name
    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = Some(strategy.into());
        self
    }

    /// Set the field list for multi-field reads
    pub fn with_fields<I, F>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the unconditional strategy override
    pub fn with_force_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.force_strategy = Some(strategy.into());
        self
    }

    /// Explicit strategy name, if any
    pub fn strategy(&self) -> Option<&str> {
        self.strategy.as_deref()
    }

    /// Field list for multi-field reads
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Unconditional strategy override, if any
    pub fn force_strategy(&self) -> Option<&str> {
        self.force_strategy.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let params = CacheParams::new();
        assert_eq!(params.strategy(), None);
        assert_eq!(params.force_strategy(), None);
        assert!(params.fields().is_empty());
    }

    #[test]
    fn test_builder() {
        let params = CacheParams::new()
            .with_strategy("hash")
            .with_fields(vec!["1".to_string(), "2".to_string()])
            .with_force_strategy("getAllHash");
        assert_eq!(params.strategy(), Some("hash"));
        assert_eq!(params.fields(), ["1", "2"]);
        assert_eq!(params.force_strategy(), Some("getAllHash"));
    }

    #[test]
    fn test_fields_accept_str_slices() {
        let params = CacheParams::new().with_fields(["a", "b", "c"]);
        assert_eq!(params.fields(), ["a", "b", "c"]);
    }
}
