//! Archive format detection and opening.
//!
//! Uploaded archives arrive as bare bytes with no trustworthy file name, so
//! the container is recognised from its magic bytes alone.

use std::fs::File;
use std::io::BufReader;
use std::io::Cursor;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::ExtractionConfig;
use crate::ExtractionError;
use crate::Result;

use super::compression::CompressionCodec;
use super::tar::TarSource;
use super::traits::ArchiveSource;
use super::zip::ZipSource;

/// Local file header, empty archive, and spanned archive signatures.
const ZIP_MAGICS: [&[u8]; 3] = [b"PK\x03\x04", b"PK\x05\x06", b"PK\x07\x08"];

/// Offset of the `ustar` magic inside a TAR header block.
const USTAR_OFFSET: usize = 257;
const USTAR_MAGIC: &[u8] = b"ustar";

/// Enough leading bytes to recognise every supported format.
pub const SNIFF_LEN: usize = 512;

/// Supported archive formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveType {
    /// Tar archive (uncompressed).
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Zstd-compressed tar archive.
    TarZst,
    /// ZIP archive.
    Zip,
}

impl ArchiveType {
    /// Returns the compression codec wrapped around a TAR, if any.
    #[must_use]
    pub const fn compression(self) -> Option<CompressionCodec> {
        match self {
            Self::TarGz => Some(CompressionCodec::Gzip),
            Self::TarBz2 => Some(CompressionCodec::Bzip2),
            Self::TarXz => Some(CompressionCodec::Xz),
            Self::TarZst => Some(CompressionCodec::Zstd),
            Self::Tar | Self::Zip => None,
        }
    }

    const fn from_codec(codec: CompressionCodec) -> Self {
        match codec {
            CompressionCodec::Gzip => Self::TarGz,
            CompressionCodec::Bzip2 => Self::TarBz2,
            CompressionCodec::Xz => Self::TarXz,
            CompressionCodec::Zstd => Self::TarZst,
        }
    }
}

/// Detects the archive type from its leading bytes.
///
/// A compressed stream is assumed to wrap a TAR; that assumption is checked
/// when the inflated stream is indexed.
///
/// # Errors
///
/// Returns [`ExtractionError::UnsupportedFormat`] if no known signature
/// matches.
///
/// # Examples
///
/// ```
/// use archtext_core::formats::detect::ArchiveType;
/// use archtext_core::formats::detect::detect_format;
///
/// assert_eq!(detect_format(b"PK\x03\x04rest")?, ArchiveType::Zip);
/// assert_eq!(detect_format(b"\x1f\x8b\x08")?, ArchiveType::TarGz);
/// assert!(detect_format(b"Rar!\x1a\x07").is_err());
/// # Ok::<(), archtext_core::ExtractionError>(())
/// ```
pub fn detect_format(header: &[u8]) -> Result<ArchiveType> {
    if ZIP_MAGICS.iter().any(|magic| header.starts_with(magic)) {
        return Ok(ArchiveType::Zip);
    }
    if let Some(codec) = CompressionCodec::from_magic(header) {
        return Ok(ArchiveType::from_codec(codec));
    }
    if header
        .get(USTAR_OFFSET..USTAR_OFFSET + USTAR_MAGIC.len())
        .is_some_and(|magic| magic == USTAR_MAGIC)
    {
        return Ok(ArchiveType::Tar);
    }
    Err(ExtractionError::UnsupportedFormat)
}

/// Opens an in-memory archive, detecting its format.
///
/// The archive is fully indexed before this returns, so any structural
/// problem surfaces here rather than during extraction.
///
/// # Errors
///
/// Returns [`ExtractionError::UnsupportedFormat`] for unrecognised data,
/// [`ExtractionError::InvalidArchive`] for a corrupt container, and
/// [`ExtractionError::QuotaExceeded`] if a compressed TAR inflates past
/// [`ExtractionConfig::max_inflated_size`].
///
/// # Examples
///
/// ```
/// use archtext_core::ExtractionConfig;
/// use archtext_core::formats::open_archive;
/// use archtext_core::test_utils::create_test_tar_gz;
///
/// let data = create_test_tar_gz(vec![("notes.txt", b"hello")]);
/// let source = open_archive(data, &ExtractionConfig::default())?;
/// assert_eq!(source.format_name(), "tar.gz");
/// assert_eq!(source.members().len(), 1);
/// # Ok::<(), archtext_core::ExtractionError>(())
/// ```
pub fn open_archive(data: Vec<u8>, config: &ExtractionConfig) -> Result<Box<dyn ArchiveSource>> {
    let format = detect_format(&data)?;
    debug!(?format, bytes = data.len(), "opening archive");

    let source: Box<dyn ArchiveSource> = match format {
        ArchiveType::Zip => Box::new(ZipSource::new(Cursor::new(data))?),
        ArchiveType::Tar => Box::new(TarSource::new(data)?),
        compressed => {
            let codec = compressed
                .compression()
                .ok_or(ExtractionError::UnsupportedFormat)?;
            Box::new(TarSource::from_compressed(
                &data,
                codec,
                config.max_inflated_size,
            )?)
        }
    };
    Ok(source)
}

/// Opens an archive file, detecting its format.
///
/// ZIP archives are read from disk on demand; TAR archives are loaded into
/// memory (inflated if compressed) because they have no central directory.
///
/// # Errors
///
/// Same as [`open_archive`], plus [`ExtractionError::Io`] if the file cannot
/// be read.
pub fn open_archive_path<P: AsRef<Path>>(
    path: P,
    config: &ExtractionConfig,
) -> Result<Box<dyn ArchiveSource>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let mut header = Vec::with_capacity(SNIFF_LEN);
    (&mut file).take(SNIFF_LEN as u64).read_to_end(&mut header)?;

    if detect_format(&header)? == ArchiveType::Zip {
        debug!(path = %path.display(), "opening ZIP archive from disk");
        let file = File::open(path)?;
        return Ok(Box::new(ZipSource::new(BufReader::new(file))?));
    }

    let mut data = header;
    file.read_to_end(&mut data)?;
    open_archive(data, config)
}
