//! TAR archive provider.

use std::io::Read;
use std::ops::Range;

use crate::ExtractionError;
use crate::Result;

use super::compression::CompressionCodec;
use super::traits::ArchiveMember;
use super::traits::ArchiveSource;

/// An in-memory TAR archive with random access to member data.
///
/// TAR has no central directory, so the whole stream is walked once when the
/// source is created and each member's data range is remembered.
pub struct TarSource {
    data: Vec<u8>,
    members: Vec<ArchiveMember>,
    ranges: Vec<Range<usize>>,
    format_name: &'static str,
}

impl TarSource {
    /// Indexes an uncompressed TAR archive.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidArchive`] if a header is corrupt or
    /// the stream ends inside a member's data.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::formats::ArchiveSource;
    /// use archtext_core::formats::TarSource;
    /// use archtext_core::test_utils::create_test_tar;
    ///
    /// let source = TarSource::new(create_test_tar(vec![("src/lib.rs", b"pub fn f() {}")]))?;
    /// assert_eq!(source.members()[0].path, "src/lib.rs");
    /// assert_eq!(source.members()[0].size, 13);
    /// # Ok::<(), archtext_core::ExtractionError>(())
    /// ```
    pub fn new(data: Vec<u8>) -> Result<Self> {
        Self::with_format_name(data, "tar")
    }

    /// Inflates a compressed TAR archive, then indexes it.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::QuotaExceeded`] if the inflated stream is
    /// larger than `max_inflated` bytes, or
    /// [`ExtractionError::InvalidArchive`] if either layer is corrupt.
    pub fn from_compressed(
        compressed: &[u8],
        codec: CompressionCodec,
        max_inflated: u64,
    ) -> Result<Self> {
        let data = codec.inflate(compressed, max_inflated)?;
        Self::with_format_name(data, codec.extension())
    }

    fn with_format_name(data: Vec<u8>, format_name: &'static str) -> Result<Self> {
        let (members, ranges) = index(&data)?.into_iter().unzip();
        Ok(Self {
            data,
            members,
            ranges,
            format_name,
        })
    }
}

fn index(data: &[u8]) -> Result<Vec<(ArchiveMember, Range<usize>)>> {
    let mut archive = tar::Archive::new(data);
    let entries = archive
        .entries()
        .map_err(|e| ExtractionError::InvalidArchive(format!("failed to read TAR entries: {e}")))?;

    let mut indexed = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| {
            ExtractionError::InvalidArchive(format!("failed to read TAR entry: {e}"))
        })?;

        let entry_type = entry.header().entry_type();
        if entry_type.is_pax_global_extensions() {
            continue;
        }

        let path = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let size = entry.size();
        let range = usize::try_from(entry.raw_file_position())
            .ok()
            .zip(usize::try_from(size).ok())
            .and_then(|(start, len)| Some(start..start.checked_add(len)?))
            .filter(|range| range.end <= data.len())
            .ok_or_else(|| ExtractionError::InvalidArchive(format!("truncated TAR entry: {path}")))?;

        indexed.push((
            ArchiveMember {
                path,
                size,
                compressed_size: None,
                is_dir: entry_type.is_dir(),
            },
            range,
        ));
    }

    Ok(indexed)
}

impl ArchiveSource for TarSource {
    fn format_name(&self) -> &'static str {
        self.format_name
    }

    fn members(&self) -> &[ArchiveMember] {
        &self.members
    }

    fn open_member(&mut self, index: usize) -> Result<Box<dyn Read + '_>> {
        let range = self.ranges.get(index).cloned().ok_or_else(|| {
            ExtractionError::InvalidArchive(format!("TAR member {index} does not exist"))
        })?;
        Ok(Box::new(&self.data[range]))
    }
}
