//! Payload codec
//!
//! Values are structurally encoded with MessagePack and then compressed.
//! The compressor sits behind the [`Compressor`] seam so deployments can
//! swap the algorithm without touching the driver; [`ZstdCompressor`] at a
//! mid-high level is the default, balancing ratio against CPU cost for the
//! typically small payloads this layer sees.
//!
//! Absent payloads short-circuit: decoding `None` or empty bytes yields
//! `Ok(None)` without touching the decompressor.

use bucketcache_core::error::DecodeError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Default zstd compression level
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 7;

/// Bytes-to-bytes compression seam
///
/// Implementations must be `Send + Sync`; one codec instance serves every
/// call through a driver.
pub trait Compressor: Send + Sync {
    /// Compress encoded payload bytes
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, DecodeError>;

    /// Decompress stored payload bytes
    ///
    /// Corrupt or truncated input is a [`DecodeError`].
    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, DecodeError>;

    /// Stable identifier of the algorithm and parameters
    fn codec_id(&self) -> &'static str;
}

/// zstd compression at a fixed level
#[derive(Debug, Clone)]
pub struct ZstdCompressor {
    level: i32,
}

impl Default for ZstdCompressor {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ZstdCompressor {
    /// Compressor with an explicit level
    pub fn with_level(level: i32) -> Self {
        Self { level }
    }
}

impl Compressor for ZstdCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>, DecodeError> {
        zstd::encode_all(data, self.level).map_err(|e| DecodeError::Encode(e.to_string()))
    }

    fn decompress(&self, data: &[u8]) -> Result<Vec<u8>, DecodeError> {
        zstd::decode_all(data).map_err(|e| DecodeError::Decompress(e.to_string()))
    }

    fn codec_id(&self) -> &'static str {
        "zstd"
    }
}

/// Serialize-then-compress codec for cache payloads
///
/// # Examples
///
/// ```
/// use bucketcache_driver::codec::PayloadCodec;
///
/// let codec = PayloadCodec::default();
/// let bytes = codec.serialize(&"Alice")?;
/// let back: Option<String> = codec.unserialize(Some(&bytes))?;
/// assert_eq!(back.as_deref(), Some("Alice"));
/// # Ok::<(), bucketcache_core::error::DecodeError>(())
/// ```
pub struct PayloadCodec {
    compressor: Box<dyn Compressor>,
}

impl Default for PayloadCodec {
    fn default() -> Self {
        Self::new(Box::new(ZstdCompressor::default()))
    }
}

impl PayloadCodec {
    /// Codec over an explicit compressor
    pub fn new(compressor: Box<dyn Compressor>) -> Self {
        Self { compressor }
    }

    /// Identifier of the underlying compressor
    pub fn codec_id(&self) -> &'static str {
        self.compressor.codec_id()
    }

    /// Encode a value into storable payload bytes
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, DecodeError> {
        let encoded = rmp_serde::to_vec(value).map_err(|e| DecodeError::Encode(e.to_string()))?;
        self.compressor.compress(&encoded)
    }

    /// Decode payload bytes back into a value
    ///
    /// `None` or empty input is the absent payload and decodes to
    /// `Ok(None)` without any decompression attempt.
    pub fn unserialize<T: DeserializeOwned>(
        &self,
        data: Option<&[u8]>,
    ) -> Result<Option<T>, DecodeError> {
        let Some(data) = data else {
            return Ok(None);
        };
        if data.is_empty() {
            return Ok(None);
        }
        let raw = self.compressor.decompress(data)?;
        rmp_serde::from_slice(&raw)
            .map(Some)
            .map_err(|e| DecodeError::Deserialize(e.to_string()))
    }
}

impl std::fmt::Debug for PayloadCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadCodec")
            .field("codec_id", &self.codec_id())
            .finish()
    }
}
