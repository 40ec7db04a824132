//! High-level public API for text extraction.

use std::path::Path;

use crate::ExtractionConfig;
use crate::Result;
use crate::extraction::extract_text_files;
use crate::extraction::extract_with_progress;
use crate::formats::open_archive;
use crate::formats::open_archive_path;
use crate::report::ExtractionResult;
use crate::report::ProgressCallback;

/// Extracts every text file from an in-memory archive.
///
/// This is the main entry point. The archive format is detected from its
/// magic bytes; ZIP and TAR (plain, gzip, bzip2, xz or zstd compressed) are
/// supported.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the archive cannot be
/// opened and indexed. Once indexing succeeds, a result is always returned.
///
/// # Examples
///
/// ```
/// use archtext_core::ExtractionConfig;
/// use archtext_core::extract_text;
/// use archtext_core::test_utils::create_test_zip;
///
/// let data = create_test_zip(vec![
///     ("README.md", b"# Project"),
///     ("src/main.rs", b"fn main() {}"),
///     ("logo.png", b"\x89PNG\r\n\x1a\n\x00"),
/// ]);
/// let result = extract_text(data, &ExtractionConfig::default())?;
///
/// assert_eq!(result.paths().collect::<Vec<_>>(), ["README.md", "src/main.rs"]);
/// assert_eq!(result.total_member_count, 3);
/// # Ok::<(), archtext_core::ExtractionError>(())
/// ```
pub fn extract_text(data: Vec<u8>, config: &ExtractionConfig) -> Result<ExtractionResult> {
    config.validate()?;
    let mut source = open_archive(data, config)?;
    extract_text_files(source.as_mut(), config)
}

/// Extracts every text file from an archive on disk.
///
/// # Errors
///
/// Same as [`extract_text`], plus I/O errors reading the file.
///
/// # Examples
///
/// ```no_run
/// use archtext_core::ExtractionConfig;
/// use archtext_core::extract_text_from_path;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = extract_text_from_path("repo.zip", &ExtractionConfig::default())?;
/// println!("Extracted {} files", result.len());
/// # Ok(())
/// # }
/// ```
pub fn extract_text_from_path<P: AsRef<Path>>(
    path: P,
    config: &ExtractionConfig,
) -> Result<ExtractionResult> {
    extract_text_from_path_with_progress(path, config, &mut crate::NoopProgress)
}

/// Extracts every text file from an archive on disk, reporting progress.
///
/// # Errors
///
/// Same as [`extract_text_from_path`].
pub fn extract_text_from_path_with_progress<P: AsRef<Path>>(
    path: P,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionResult> {
    config.validate()?;
    let mut source = open_archive_path(path, config)?;
    extract_with_progress(source.as_mut(), config, progress)
}

/// Runs [`extract_text`] on tokio's blocking thread pool.
///
/// Scanning is synchronous CPU and memory work, so calling [`extract_text`]
/// directly from an async task would stall the runtime. Dropping the returned
/// future abandons the result; the scan itself runs to completion.
///
/// # Errors
///
/// Same as [`extract_text`], plus [`ExtractionError::TaskFailed`] if the
/// worker panicked or the runtime shut down.
///
/// [`ExtractionError::TaskFailed`]: crate::ExtractionError::TaskFailed
///
/// # Examples
///
/// ```
/// use archtext_core::ExtractionConfig;
/// use archtext_core::extract_text_offloaded;
/// use archtext_core::test_utils::create_test_tar_gz;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), archtext_core::ExtractionError> {
/// let data = create_test_tar_gz(vec![("notes.txt", b"remember")]);
/// let result = extract_text_offloaded(data, ExtractionConfig::default()).await?;
/// assert_eq!(result.get("notes.txt"), Some("remember"));
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn extract_text_offloaded(
    data: Vec<u8>,
    config: ExtractionConfig,
) -> Result<ExtractionResult> {
    tokio::task::spawn_blocking(move || extract_text(data, &config))
        .await
        .map_err(|e| crate::ExtractionError::TaskFailed(e.to_string()))?
}
