//! Compression codecs wrapped around TAR archives.
//!
//! A compressed TAR is inflated into memory before it is indexed so that
//! members can be opened in any order. Inflation is bounded: a stream whose
//! inflated size exceeds the configured limit is rejected as a structural
//! error.
//!
//! # Supported Codecs
//!
//! - **Gzip** (.tar.gz, .tgz)
//! - **Bzip2** (.tar.bz2, .tbz2)
//! - **Xz** (.tar.xz, .txz)
//! - **Zstd** (.tar.zst, .tzst)

use std::io::Read;

use bzip2::read::BzDecoder;
use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

use crate::ExtractionError;
use crate::Result;
use crate::error::QuotaResource;
use crate::io::bounded::Bounded;
use crate::io::read_bounded;

/// Compression codec for archive files.
///
/// # Examples
///
/// ```
/// use archtext_core::formats::compression::CompressionCodec;
///
/// assert_eq!(
///     CompressionCodec::from_magic(b"\x1f\x8b\x08\x00"),
///     Some(CompressionCodec::Gzip)
/// );
/// assert_eq!(CompressionCodec::from_magic(b"PK\x03\x04"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Gzip compression (deflate algorithm).
    Gzip,
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,
    /// Xz compression (LZMA2 algorithm).
    Xz,
    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

const GZIP_MAGIC: &[u8] = &[0x1F, 0x8B];
const BZIP2_MAGIC: &[u8] = b"BZh";
const XZ_MAGIC: &[u8] = &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];
const ZSTD_MAGIC: &[u8] = &[0x28, 0xB5, 0x2F, 0xFD];

impl CompressionCodec {
    /// Identifies a codec from the leading bytes of a stream.
    #[must_use]
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        [
            (GZIP_MAGIC, Self::Gzip),
            (BZIP2_MAGIC, Self::Bzip2),
            (XZ_MAGIC, Self::Xz),
            (ZSTD_MAGIC, Self::Zstd),
        ]
        .into_iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, codec)| codec)
    }

    /// Returns the typical file extension for this codec when used with TAR.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Gzip => "tar.gz",
            Self::Bzip2 => "tar.bz2",
            Self::Xz => "tar.xz",
            Self::Zstd => "tar.zst",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Inflates `compressed` into memory, refusing to produce more than
    /// `max_inflated` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::QuotaExceeded`] if the inflated stream is
    /// larger than `max_inflated`, and [`ExtractionError::InvalidArchive`] if
    /// the compressed stream is corrupt.
    pub fn inflate(self, compressed: &[u8], max_inflated: u64) -> Result<Vec<u8>> {
        let decoder: Box<dyn Read + '_> = match self {
            Self::Gzip => Box::new(MultiGzDecoder::new(compressed)),
            Self::Bzip2 => Box::new(BzDecoder::new(compressed)),
            Self::Xz => Box::new(XzDecoder::new(compressed)),
            Self::Zstd => Box::new(zstd::stream::read::Decoder::new(compressed).map_err(|e| {
                ExtractionError::InvalidArchive(format!("failed to open zstd stream: {e}"))
            })?),
        };

        match read_bounded(decoder, max_inflated) {
            Ok(Bounded::Complete(bytes)) => Ok(bytes),
            Ok(Bounded::Exceeded) => Err(ExtractionError::QuotaExceeded {
                resource: QuotaResource::InflatedSize { max: max_inflated },
            }),
            Err(e) => Err(ExtractionError::InvalidArchive(format!(
                "corrupt {} stream: {e}",
                self.name()
            ))),
        }
    }
}
