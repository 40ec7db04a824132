//! Extraction limits and exclusions.

use std::collections::HashSet;

use crate::ExtractionError;
use crate::Result;

/// Limits applied while scanning an archive for text files.
///
/// The two result limits (`max_files`, `max_total_size`) are reported back as
/// flags on the [`ExtractionResult`](crate::ExtractionResult); they stop the
/// scan without failing it. The remaining fields bound memory use per member
/// and per archive.
///
/// # Examples
///
/// ```
/// use archtext_core::ExtractionConfig;
///
/// // Defaults: 1000 files, 10 MiB of text
/// let config = ExtractionConfig::default();
///
/// // Customize for specific needs
/// let custom = ExtractionConfig::default()
///     .with_max_files(50)
///     .with_max_total_size(512 * 1024)
///     .with_excluded_path("repo-main/package-lock.json");
/// assert!(custom.is_excluded("repo-main/package-lock.json"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// Maximum number of text files included in the result.
    pub max_files: usize,

    /// Maximum cumulative decoded text length, in characters.
    pub max_total_size: usize,

    /// Member paths skipped entirely. Matching is exact.
    pub excluded_paths: HashSet<String>,

    /// Maximum uncompressed size of a single member in bytes.
    ///
    /// Larger members are skipped as oversized without being decoded.
    pub max_member_size: u64,

    /// Maximum inflated size of a compressed TAR stream in bytes.
    pub max_inflated_size: u64,
}

impl Default for ExtractionConfig {
    /// Creates an `ExtractionConfig` with default settings.
    ///
    /// Default values:
    /// - `max_files`: 1000
    /// - `max_total_size`: 10 MiB
    /// - `excluded_paths`: empty
    /// - `max_member_size`: 50 MiB
    /// - `max_inflated_size`: 500 MiB
    fn default() -> Self {
        Self {
            max_files: 1000,
            max_total_size: 10 * 1024 * 1024,
            excluded_paths: HashSet::new(),
            max_member_size: 50 * 1024 * 1024,
            max_inflated_size: 500 * 1024 * 1024,
        }
    }
}

impl ExtractionConfig {
    /// Creates a new `ExtractionConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of extracted files.
    #[must_use]
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Sets the maximum total decoded size in characters.
    #[must_use]
    pub fn with_max_total_size(mut self, max_total_size: usize) -> Self {
        self.max_total_size = max_total_size;
        self
    }

    /// Adds one excluded member path.
    #[must_use]
    pub fn with_excluded_path(mut self, path: impl Into<String>) -> Self {
        self.excluded_paths.insert(path.into());
        self
    }

    /// Replaces the excluded member paths.
    #[must_use]
    pub fn with_excluded_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the maximum size of a single member.
    #[must_use]
    pub fn with_max_member_size(mut self, max_member_size: u64) -> Self {
        self.max_member_size = max_member_size;
        self
    }

    /// Sets the maximum inflated size of a compressed TAR stream.
    #[must_use]
    pub fn with_max_inflated_size(mut self, max_inflated_size: u64) -> Self {
        self.max_inflated_size = max_inflated_size;
        self
    }

    /// Returns `true` if the member path is excluded.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_paths.contains(path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any limit is zero.
    pub fn validate(&self) -> Result<()> {
        let zero = if self.max_files == 0 {
            Some("max_files")
        } else if self.max_total_size == 0 {
            Some("max_total_size")
        } else if self.max_member_size == 0 {
            Some("max_member_size")
        } else if self.max_inflated_size == 0 {
            Some("max_inflated_size")
        } else {
            None
        };

        match zero {
            Some(field) => Err(ExtractionError::InvalidConfig {
                reason: format!("{field} must be positive"),
            }),
            None => Ok(()),
        }
    }
}
