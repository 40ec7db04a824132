//! Error conversion utilities for CLI.
//!
//! Converts archtext-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use archtext_core::ExtractionError;

/// Converts `ExtractionError` to user-friendly anyhow error with context.
///
/// `source` is the display name of the archive (`<stdin>` when piped).
pub fn convert_extraction_error(err: ExtractionError, source: &str) -> anyhow::Error {
    match err {
        ExtractionError::QuotaExceeded { resource } => {
            anyhow!(
                "Archive '{source}' exceeds an indexing limit: {resource}\n\
                 HINT: Use --max-inflated-size to allow larger compressed TAR streams."
            )
        }
        ExtractionError::Io(io_err) => {
            anyhow!("I/O error while reading '{source}': {io_err}")
        }
        ExtractionError::UnsupportedFormat => {
            anyhow!(
                "Archive format not supported: {source}\n\
                 HINT: Supported formats: zip, tar, tar.gz, tar.bz2, tar.xz, tar.zst"
            )
        }
        ExtractionError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{source}': {reason}\n\
                 HINT: The archive may be corrupted or truncated."
            )
        }
        ExtractionError::InvalidConfig { reason } => {
            anyhow!(
                "Invalid limits: {reason}\n\
                 HINT: --max-files, --max-total-size, --max-member-size and \
                 --max-inflated-size must all be positive."
            )
        }
        err @ (ExtractionError::Template(_) | ExtractionError::TaskFailed(_)) => {
            anyhow::Error::from(err).context(format!("Error processing archive '{source}'"))
        }
    }
}

/// Adds context to a library result about the archive being processed.
pub fn add_archive_context<T>(
    result: Result<T, ExtractionError>,
    source: &str,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_extraction_error(e, source))
}
