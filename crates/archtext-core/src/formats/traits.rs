//! Common traits for archive providers.

use std::io::Read;

use serde::Serialize;

use crate::Result;

/// One entry in an archive's directory.
///
/// `path` comes straight from the archive and is untrusted: it is only ever
/// used as a lookup key and display string, never as a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveMember {
    /// Member path as recorded in the archive.
    pub path: String,
    /// Declared uncompressed size in bytes.
    pub size: u64,
    /// Compressed size in bytes, for formats that record one.
    pub compressed_size: Option<u64>,
    /// Whether the member is a directory entry.
    pub is_dir: bool,
}

/// An opened, randomly accessible archive.
///
/// Implementations index the whole archive when they are opened, so a
/// malformed container fails before any member is visited.
pub trait ArchiveSource {
    /// Returns the archive format name.
    fn format_name(&self) -> &'static str;

    /// Returns every member in the archive's listing order.
    fn members(&self) -> &[ArchiveMember];

    /// Opens the member at `index` for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the member's data
    /// cannot be read (unsupported compression method, encryption, corrupt
    /// local header).
    fn open_member(&mut self, index: usize) -> Result<Box<dyn Read + '_>>;
}
