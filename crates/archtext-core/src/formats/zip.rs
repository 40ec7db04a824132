//! ZIP archive provider.

use std::io::Read;
use std::io::Seek;

use crate::ExtractionError;
use crate::Result;

use super::traits::ArchiveMember;
use super::traits::ArchiveSource;

/// A ZIP archive indexed from its central directory.
///
/// Indexing reads raw entry metadata only, so encrypted or exotically
/// compressed entries still appear in [`members`](ArchiveSource::members);
/// they fail when opened instead.
pub struct ZipSource<R: Read + Seek> {
    archive: zip::ZipArchive<R>,
    members: Vec<ArchiveMember>,
}

impl<R: Read + Seek> ZipSource<R> {
    /// Opens and indexes a ZIP archive.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::InvalidArchive`] if the central directory
    /// cannot be read.
    ///
    /// # Examples
    ///
    /// ```
    /// use archtext_core::formats::ArchiveSource;
    /// use archtext_core::formats::ZipSource;
    /// use archtext_core::test_utils::create_test_zip;
    /// use std::io::Cursor;
    ///
    /// let data = create_test_zip(vec![("README.md", b"# hi")]);
    /// let source = ZipSource::new(Cursor::new(data))?;
    /// assert_eq!(source.members()[0].path, "README.md");
    /// # Ok::<(), archtext_core::ExtractionError>(())
    /// ```
    pub fn new(reader: R) -> Result<Self> {
        let mut archive = zip::ZipArchive::new(reader)
            .map_err(|e| ExtractionError::InvalidArchive(format!("failed to open ZIP archive: {e}")))?;

        let mut members = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index_raw(i).map_err(|e| {
                ExtractionError::InvalidArchive(format!("failed to read ZIP entry: {e}"))
            })?;
            members.push(ArchiveMember {
                path: entry.name().to_string(),
                size: entry.size(),
                compressed_size: Some(entry.compressed_size()),
                is_dir: entry.is_dir(),
            });
        }

        Ok(Self { archive, members })
    }
}

impl<R: Read + Seek> ArchiveSource for ZipSource<R> {
    fn format_name(&self) -> &'static str {
        "zip"
    }

    fn members(&self) -> &[ArchiveMember] {
        &self.members
    }

    fn open_member(&mut self, index: usize) -> Result<Box<dyn Read + '_>> {
        let file = self.archive.by_index(index).map_err(|e| {
            ExtractionError::InvalidArchive(format!("failed to open ZIP entry {index}: {e}"))
        })?;
        Ok(Box::new(file))
    }
}
